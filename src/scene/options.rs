use serde::{Deserialize, Serialize};

use crate::color::Tonemapping;
use crate::integrator::Integrator;
use crate::sampler::SamplingMethod;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Accelerator {
	Bvh,
	Linear,
}

impl Default for Accelerator {
	fn default() -> Self {
		Accelerator::Bvh
	}
}

/// Render-wide knobs, serializable to/from TOML so a scene's settings can
/// round-trip through a config file.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneOptions {
	pub samples_per_pixel: u32,
	pub bounces: u32,
	/// Half-width of the per-pixel jitter range, in `[0, 0.5]`; `0` samples
	/// only the pixel center, `0.5` covers the whole pixel.
	pub subpixel_jitter: f32,
	pub tonemapping: Tonemapping,
	pub accelerator: Accelerator,
	pub sampling_method: SamplingMethod,
	pub strata: u32,
	pub integrator: Integrator,
	pub manual_exposure: f32,
	pub gamma: f32,
	pub environment_map: Option<String>,
}

impl Default for SceneOptions {
	fn default() -> Self {
		Self {
			samples_per_pixel: 64,
			bounces: 5,
			subpixel_jitter: 0.5,
			tonemapping: Tonemapping::default(),
			accelerator: Accelerator::default(),
			sampling_method: SamplingMethod::default(),
			strata: 4,
			integrator: Integrator::default(),
			manual_exposure: 1.0,
			gamma: 2.2,
			environment_map: None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_options_have_sane_sample_count() {
		let opts = SceneOptions::default();
		assert_eq!(opts.samples_per_pixel, 64);
		assert_eq!(opts.bounces, 5);
	}
}
