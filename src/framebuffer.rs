//! Accumulation target for the renderer: one running sum and sample count
//! per pixel, resolved to displayable colour only on read-out.

use crate::color::tonemap;
use crate::error::RenderError;
use crate::math::Vec3;
use crate::scene::SceneOptions;

pub struct Framebuffer {
	pub width: usize,
	pub height: usize,
	sum: Vec<Vec3>,
	count: Vec<u32>,
}

impl Framebuffer {
	pub fn new(width: usize, height: usize) -> Result<Self, RenderError> {
		if width == 0 || height == 0 {
			return Err(RenderError::InvalidDimensions { width, height });
		}
		Ok(Self { width, height, sum: vec![Vec3::ZERO; width * height], count: vec![0; width * height] })
	}

	pub fn clear(&mut self) {
		self.sum.iter_mut().for_each(|c| *c = Vec3::ZERO);
		self.count.iter_mut().for_each(|c| *c = 0);
	}

	/// Accumulates one sample's radiance into pixel `(x, y)`.
	pub fn add_sample(&mut self, x: usize, y: usize, radiance: Vec3) {
		let i = y * self.width + x;
		self.sum[i] += radiance;
		self.count[i] += 1;
	}

	/// Divides accumulated radiance by sample count, applies exposure, and
	/// tonemaps to a displayable linear-or-LDR colour depending on `options`.
	pub fn resolve(&self, options: &SceneOptions) -> Vec<Vec3> {
		self.sum
			.iter()
			.zip(&self.count)
			.map(|(&sum, &count)| {
				let mean = if count > 0 { sum / count as f32 } else { Vec3::ZERO };
				let exposed = mean * options.manual_exposure;
				tonemap(options.tonemapping, exposed, options.gamma)
			})
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn new_rejects_zero_dimensions() {
		assert!(Framebuffer::new(0, 4).is_err());
	}

	#[test]
	fn averages_multiple_samples_at_the_same_pixel() {
		let mut fb = Framebuffer::new(1, 1).unwrap();
		fb.add_sample(0, 0, Vec3::splat(1.0));
		fb.add_sample(0, 0, Vec3::splat(3.0));
		let options = SceneOptions { tonemapping: crate::color::Tonemapping::None, manual_exposure: 1.0, ..SceneOptions::default() };
		let resolved = fb.resolve(&options);
		assert_eq!(resolved[0].x, 2.0);
	}

	#[test]
	fn clear_resets_accumulation() {
		let mut fb = Framebuffer::new(1, 1).unwrap();
		fb.add_sample(0, 0, Vec3::splat(5.0));
		fb.clear();
		let options = SceneOptions { tonemapping: crate::color::Tonemapping::None, ..SceneOptions::default() };
		let resolved = fb.resolve(&options);
		assert_eq!(resolved[0].x, 0.0);
	}
}
