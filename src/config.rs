//! Loads and saves [`SceneOptions`] as TOML, the render's one externally
//! editable configuration surface.

use crate::error::RenderError;
use crate::scene::SceneOptions;

pub fn load(text: &str) -> Result<SceneOptions, RenderError> {
	let options: SceneOptions = toml::from_str(text)?;
	Ok(options)
}

pub fn save(options: &SceneOptions) -> Result<String, RenderError> {
	let text = toml::to_string_pretty(options)?;
	Ok(text)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn round_trips_default_options() {
		let options = SceneOptions::default();
		let text = save(&options).unwrap();
		let parsed = load(&text).unwrap();
		assert_eq!(parsed.samples_per_pixel, options.samples_per_pixel);
		assert_eq!(parsed.bounces, options.bounces);
	}

	#[test]
	fn rejects_malformed_toml() {
		assert!(load("samples_per_pixel = [not valid").is_err());
	}

	#[test]
	fn partial_toml_falls_back_to_defaults() {
		let parsed = load("samples_per_pixel = 256").unwrap();
		assert_eq!(parsed.samples_per_pixel, 256);
		assert_eq!(parsed.bounces, SceneOptions::default().bounces);
	}
}
