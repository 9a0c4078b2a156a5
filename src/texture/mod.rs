//! Texture construction and filtered lookup: mip/rip pyramids, sRGB
//! linearisation, bilinear filtering, and latitude-longitude environment
//! map sampling.

mod downscale;
mod sample;

use crate::color::srgb_to_linear;
use crate::error::RenderError;
use crate::math::Vec3;
use bitflags::bitflags;

bitflags! {
	#[derive(Clone, Copy, Debug, PartialEq, Eq)]
	pub struct SamplerFlags: u32 {
		const POINT       = 0b0000_0001;
		const BILINEAR    = 0b0000_0010;
		const TRILINEAR   = 0b0000_0100;
		const ANISOTROPIC = 0b0000_1000;
		const SPHERICAL   = 0b0001_0000;
		const SRGB        = 0b0010_0000;
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddressMode {
	Wrap,
	Mirror,
	Clamp,
}

/// One RGBA float32 plane, row-major, width * height texels.
#[derive(Clone)]
pub struct Map {
	pub width: usize,
	pub height: usize,
	pub texels: Vec<[f32; 4]>,
}

impl Map {
	fn texel(&self, x: usize, y: usize) -> [f32; 4] {
		let x = x.min(self.width.saturating_sub(1));
		let y = y.min(self.height.saturating_sub(1));
		self.texels[y * self.width + x]
	}
}

pub struct Texture {
	pub flags: SamplerFlags,
	pub address: AddressMode,
	/// Mip chain, index 0 is full resolution.
	pub mips: Vec<Map>,
	/// Anisotropic pyramid, present only when `ANISOTROPIC` is set.
	pub rips: Option<Vec<Vec<Map>>>,
}

impl Texture {
	/// Builds a texture from 8-bit LDR pixel data (padded to 4 channels).
	pub fn from_ldr(
		data: &[u8],
		width: usize,
		height: usize,
		components: usize,
		flags: SamplerFlags,
		address: AddressMode,
	) -> Result<Self, RenderError> {
		if width == 0 || height == 0 {
			return Err(RenderError::InvalidDimensions { width, height });
		}
		if !(1..=4).contains(&components) {
			return Err(RenderError::InvalidComponents { components });
		}
		if data.is_empty() {
			return Err(RenderError::EmptyPixelData);
		}

		let mut texels = Vec::with_capacity(width * height);
		for i in 0..width * height {
			let mut rgba = [0.0f32, 0.0, 0.0, 1.0];
			for c in 0..components.min(4) {
				rgba[c] = data[i * components + c] as f32 / 255.0;
			}
			texels.push(rgba);
		}
		Self::from_mip0(Map { width, height, texels }, flags, address)
	}

	/// Builds a texture from 32-bit float HDR pixel data (padded to 4 channels).
	pub fn from_hdr(
		data: &[f32],
		width: usize,
		height: usize,
		components: usize,
		flags: SamplerFlags,
		address: AddressMode,
	) -> Result<Self, RenderError> {
		if width == 0 || height == 0 {
			return Err(RenderError::InvalidDimensions { width, height });
		}
		if !(1..=4).contains(&components) {
			return Err(RenderError::InvalidComponents { components });
		}
		if data.is_empty() {
			return Err(RenderError::EmptyPixelData);
		}

		let mut texels = Vec::with_capacity(width * height);
		for i in 0..width * height {
			let mut rgba = [0.0f32, 0.0, 0.0, 1.0];
			for c in 0..components.min(4) {
				rgba[c] = data[i * components + c];
			}
			texels.push(rgba);
		}
		Self::from_mip0(Map { width, height, texels }, flags, address)
	}

	fn from_mip0(mut mip0: Map, flags: SamplerFlags, address: AddressMode) -> Result<Self, RenderError> {
		if flags.contains(SamplerFlags::SRGB) {
			for t in &mut mip0.texels {
				t[0] = srgb_to_linear(t[0]);
				t[1] = srgb_to_linear(t[1]);
				t[2] = srgb_to_linear(t[2]);
			}
		}

		let mips = if flags.contains(SamplerFlags::TRILINEAR) || flags.contains(SamplerFlags::ANISOTROPIC) {
			downscale::build_mip_chain(mip0)
		} else {
			vec![mip0]
		};

		let rips = if flags.contains(SamplerFlags::ANISOTROPIC) {
			Some(downscale::build_rip_pyramid(&mips[0]))
		} else {
			None
		};

		log::trace!(
			"texture built: {} mip level(s), rip pyramid: {}",
			mips.len(),
			rips.as_ref().map_or(0, |r| r.len())
		);

		Ok(Self { flags, address, mips, rips })
	}

	/// Width/height of the base mip level.
	pub fn dimensions(&self) -> (usize, usize) {
		(self.mips[0].width, self.mips[0].height)
	}

	/// Samples the texture at 2D texture coordinates `(u, v)`.
	pub fn sample(&self, uv: (f32, f32)) -> Vec3 {
		sample::sample_2d(self, uv)
	}

	/// Samples the texture at a normalized direction, treating it as a
	/// latitude-longitude environment map.
	pub fn sample_direction(&self, dir: Vec3) -> Vec3 {
		sample::sample_latlong(self, dir)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn construction_rejects_zero_dimensions() {
		let data = [0u8; 4];
		let err = Texture::from_ldr(&data, 0, 1, 4, SamplerFlags::POINT, AddressMode::Clamp);
		assert!(err.is_err());
	}

	#[test]
	fn construction_rejects_empty_data() {
		let err = Texture::from_ldr(&[], 2, 2, 4, SamplerFlags::POINT, AddressMode::Clamp);
		assert!(err.is_err());
	}

	#[test]
	fn flat_white_texture_samples_white() {
		let data = [255u8, 255, 255, 255];
		let tex = Texture::from_ldr(&data, 1, 1, 4, SamplerFlags::POINT, AddressMode::Clamp).unwrap();
		let c = tex.sample((0.5, 0.5));
		assert_eq!(c.x, 1.0);
		assert_eq!(c.y, 1.0);
		assert_eq!(c.z, 1.0);
	}

	#[test]
	fn srgb_flag_linearizes_construction_time() {
		let data = [188u8, 188, 188, 255]; // ~0.737 sRGB -> ~0.5 linear
		let tex = Texture::from_ldr(&data, 1, 1, 4, SamplerFlags::POINT | SamplerFlags::SRGB, AddressMode::Clamp).unwrap();
		let c = tex.sample((0.5, 0.5));
		assert!((c.x - 0.5).abs() < 0.02);
	}
}
