use super::{AddressMode, Map, SamplerFlags, Texture};
use crate::math::Vec3;

fn apply_address(mode: AddressMode, v: f32) -> f32 {
	match mode {
		AddressMode::Wrap => v - v.floor(),
		AddressMode::Mirror => {
			let t = v.abs().fract();
			let period = v.abs().floor() as i64;
			if period % 2 == 0 {
				t
			} else {
				1.0 - t
			}
		}
		AddressMode::Clamp => v.clamp(0.0, 1.0),
	}
}

fn point_sample(map: &Map, u: f32, v: f32) -> [f32; 4] {
	let x = ((u * map.width as f32) as usize).min(map.width - 1);
	let y = ((v * map.height as f32) as usize).min(map.height - 1);
	map.texel(x, y)
}

fn bilinear_sample(map: &Map, u: f32, v: f32) -> [f32; 4] {
	let fx = u * map.width as f32 - 0.5;
	let fy = v * map.height as f32 - 0.5;
	let x0 = fx.floor();
	let y0 = fy.floor();
	let tx = fx - x0;
	let ty = fy - y0;

	let wrap = |c: f32, max: usize| -> usize {
		let c = c as i64;
		c.rem_euclid(max as i64) as usize
	};

	let x0i = wrap(x0, map.width);
	let x1i = wrap(x0 + 1.0, map.width);
	let y0i = wrap(y0, map.height);
	let y1i = wrap(y0 + 1.0, map.height);

	let t00 = map.texel(x0i, y0i);
	let t10 = map.texel(x1i, y0i);
	let t01 = map.texel(x0i, y1i);
	let t11 = map.texel(x1i, y1i);

	let mut out = [0.0f32; 4];
	for c in 0..4 {
		let top = t00[c] * (1.0 - tx) + t10[c] * tx;
		let bot = t01[c] * (1.0 - tx) + t11[c] * tx;
		out[c] = top * (1.0 - ty) + bot * ty;
	}
	out
}

pub fn sample_2d(tex: &Texture, uv: (f32, f32)) -> Vec3 {
	let u = apply_address(tex.address, uv.0);
	let v = apply_address(tex.address, uv.1);

	let rgba = if tex.flags.contains(SamplerFlags::TRILINEAR) {
		// Mip 0 is used for single-ray path tracing: there is no ray
		// differential to pick a higher level from.
		bilinear_sample(&tex.mips[0], u, v)
	} else if tex.flags.contains(SamplerFlags::BILINEAR) {
		bilinear_sample(&tex.mips[0], u, v)
	} else {
		point_sample(&tex.mips[0], u, v)
	};

	Vec3::new(rgba[0], rgba[1], rgba[2])
}

/// Converts a world-space direction to latitude-longitude texture
/// coordinates and samples through the configured filter.
pub fn sample_latlong(tex: &Texture, dir: Vec3) -> Vec3 {
	let theta = dir.y.clamp(-1.0, 1.0).acos();
	let phi = dir.z.atan2(dir.x) + crate::math::PI;

	let u = phi / (2.0 * crate::math::PI);
	let v = theta / crate::math::PI;

	sample_2d(tex, (u, v))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn checker() -> Map {
		// 2x2: top-left white, rest black.
		Map {
			width: 2,
			height: 2,
			texels: vec![[1.0, 1.0, 1.0, 1.0], [0.0, 0.0, 0.0, 1.0], [0.0, 0.0, 0.0, 1.0], [0.0, 0.0, 0.0, 1.0]],
		}
	}

	#[test]
	fn wrap_address_is_periodic() {
		assert_eq!(apply_address(AddressMode::Wrap, 1.25), apply_address(AddressMode::Wrap, 0.25));
	}

	#[test]
	fn clamp_address_saturates() {
		assert_eq!(apply_address(AddressMode::Clamp, 2.0), 1.0);
		assert_eq!(apply_address(AddressMode::Clamp, -2.0), 0.0);
	}

	#[test]
	fn mirror_address_reflects_past_one() {
		let a = apply_address(AddressMode::Mirror, 1.25);
		assert!((a - 0.75).abs() < 1e-6);
	}

	#[test]
	fn point_sample_reads_nearest_texel() {
		let map = checker();
		let c = point_sample(&map, 0.1, 0.1);
		assert_eq!(c[0], 1.0);
		let c = point_sample(&map, 0.9, 0.9);
		assert_eq!(c[0], 0.0);
	}
}
