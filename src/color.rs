//! sRGB transfer function and the tonemap operators applied at framebuffer
//! read-out. None of this runs during accumulation; `Framebuffer::resolve`
//! (see `framebuffer.rs`) is the only caller.

use crate::math::Vec3;
use serde::{Deserialize, Serialize};

/// Converts a single sRGB-encoded channel to linear light.
pub fn srgb_to_linear(c: f32) -> f32 {
	if c <= 0.04045 {
		c / 12.92
	} else {
		((c + 0.055) / 1.055).powf(2.4)
	}
}

/// Converts a single linear channel to sRGB encoding.
pub fn linear_to_srgb(c: f32) -> f32 {
	if c <= 0.0031308 {
		c * 12.92
	} else {
		1.055 * c.powf(1.0 / 2.4) - 0.055
	}
}

pub fn srgb_to_linear_vec3(c: Vec3) -> Vec3 {
	Vec3::new(srgb_to_linear(c.x), srgb_to_linear(c.y), srgb_to_linear(c.z))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tonemapping {
	None,
	Linear,
	Reinhard,
	Filmic,
	Uncharted2,
}

impl Default for Tonemapping {
	fn default() -> Self {
		Tonemapping::Filmic
	}
}

fn gamma_correct(c: Vec3, gamma: f32) -> Vec3 {
	let inv_gamma = 1.0 / gamma;
	Vec3::new(c.x.max(0.0).powf(inv_gamma), c.y.max(0.0).powf(inv_gamma), c.z.max(0.0).powf(inv_gamma))
}

fn reinhard(c: Vec3) -> Vec3 {
	Vec3::new(c.x / (1.0 + c.x), c.y / (1.0 + c.y), c.z / (1.0 + c.z))
}

/// Hable's filmic approximation (gamma 2.2 baked in, per-channel).
fn filmic_channel(c: f32) -> f32 {
	let x = (c - 0.004).max(0.0);
	(x * (6.2 * x + 0.5)) / (x * (6.2 * x + 1.7) + 0.06)
}

fn filmic(c: Vec3) -> Vec3 {
	Vec3::new(filmic_channel(c.x), filmic_channel(c.y), filmic_channel(c.z))
}

const UNCHARTED2_A: f32 = 0.15;
const UNCHARTED2_B: f32 = 0.5;
const UNCHARTED2_C: f32 = 0.1;
const UNCHARTED2_D: f32 = 0.2;
const UNCHARTED2_E: f32 = 0.02;
const UNCHARTED2_F: f32 = 0.3;
const UNCHARTED2_WHITE: f32 = 11.2;
const UNCHARTED2_EXPOSURE_BIAS: f32 = 2.0;

fn uncharted2_channel(x: f32) -> f32 {
	((x * (UNCHARTED2_A * x + UNCHARTED2_C * UNCHARTED2_B) + UNCHARTED2_D * UNCHARTED2_E)
		/ (x * (UNCHARTED2_A * x + UNCHARTED2_B) + UNCHARTED2_D * UNCHARTED2_F))
		- UNCHARTED2_E / UNCHARTED2_F
}

fn uncharted2(c: Vec3) -> Vec3 {
	let exposed = c * UNCHARTED2_EXPOSURE_BIAS;
	let mapped = Vec3::new(
		uncharted2_channel(exposed.x),
		uncharted2_channel(exposed.y),
		uncharted2_channel(exposed.z),
	);
	let white_scale = 1.0 / uncharted2_channel(UNCHARTED2_WHITE);
	mapped * white_scale
}

/// Maps a linear HDR color to a displayable LDR color. `gamma` is applied
/// by every operator except `Filmic` (which already bakes gamma 2.2 in,
/// matching the source) and `Uncharted2` (display-referred already).
pub fn tonemap(op: Tonemapping, color: Vec3, gamma: f32) -> Vec3 {
	match op {
		Tonemapping::None => color,
		Tonemapping::Linear => gamma_correct(color, gamma),
		Tonemapping::Reinhard => gamma_correct(reinhard(color), gamma),
		Tonemapping::Filmic => filmic(color),
		Tonemapping::Uncharted2 => uncharted2(color),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn linear_tonemap_with_unit_gamma_is_identity() {
		let c = tonemap(Tonemapping::Linear, Vec3::new(0.5, 0.25, 1.0), 1.0);
		assert_eq!(c.x, 0.5);
		assert_eq!(c.y, 0.25);
		assert_eq!(c.z, 1.0);
	}

	#[test]
	fn reinhard_compresses_bright_values_below_one() {
		let c = tonemap(Tonemapping::Reinhard, Vec3::new(100.0, 100.0, 100.0), 1.0);
		assert!(c.x < 1.0 && c.x > 0.0);
	}

	#[test]
	fn srgb_round_trip_is_close() {
		let x = 0.42f32;
		let y = linear_to_srgb(srgb_to_linear(x));
		assert!((x - y).abs() < 1e-5);
	}

	#[test]
	fn uncharted2_white_point_maps_near_one() {
		let c = uncharted2_channel(UNCHARTED2_WHITE) / uncharted2_channel(UNCHARTED2_WHITE);
		assert_eq!(c, 1.0);
	}
}
