use crate::math::Vec3;
use crate::texture::Texture;
use std::sync::Arc;

/// A material input that is either a flat constant or sampled from a
/// texture. Standing in for the source's function-pointer-plus-opaque-state
/// pattern: `Arc<Texture>`'s `Drop` plays the role the
/// source's `finalize` callback plays, releasing the texture when the last
/// material referencing it is dropped.
#[derive(Clone)]
pub enum Attribute {
	Constant(Vec3),
	Texture(Arc<Texture>),
}

impl Attribute {
	pub const BLACK: Attribute = Attribute::Constant(Vec3::ZERO);

	pub fn constant(value: Vec3) -> Self {
		Attribute::Constant(value)
	}

	pub fn texture(texture: Arc<Texture>) -> Self {
		Attribute::Texture(texture)
	}

	/// Evaluates this attribute at a 2D surface coordinate.
	pub fn eval_uv(&self, uv: (f32, f32)) -> Vec3 {
		match self {
			Attribute::Constant(c) => *c,
			Attribute::Texture(tex) => tex.sample(uv),
		}
	}

	/// Evaluates this attribute at a direction, for cubemap/latlong use.
	pub fn eval_direction(&self, dir: Vec3) -> Vec3 {
		match self {
			Attribute::Constant(c) => *c,
			Attribute::Texture(tex) => tex.sample_direction(dir),
		}
	}

	pub fn is_zero(&self) -> bool {
		matches!(self, Attribute::Constant(c) if c.x == 0.0 && c.y == 0.0 && c.z == 0.0)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn constant_attribute_ignores_uv() {
		let a = Attribute::constant(Vec3::new(0.2, 0.4, 0.6));
		let c = a.eval_uv((0.9, 0.1));
		assert_eq!(c.y, 0.4);
	}

	#[test]
	fn black_default_is_zero() {
		assert!(Attribute::BLACK.is_zero());
	}
}
