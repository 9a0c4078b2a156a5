//! Small generic linear algebra core shared by every renderer module.
//!
//! Kept close to the engine's original math crate: a const-generic
//! `Matrix<T, R, C>` with `Vector2/3/4` and `Matrix3/4` aliases, a numeric
//! trait hierarchy (`Number`, `Float`, `FloatOps`) that lets the operators
//! be written once instead of per scalar type, and a `Unit<T>` wrapper for
//! values that are known to be normalized.

pub mod num;
pub mod matrix;
pub mod unit;
pub mod aabb;
pub mod ray;

use num::{Number, NumberOps, cast};

pub use matrix::{Matrix, Matrix2, Matrix3, Matrix4, Vector, Vector2, Vector3, Vector4};
pub use unit::Unit;
pub use aabb::Aabb;
pub use ray::Ray;

pub type Vec2 = Vector2<f32>;
pub type Vec3 = Vector3<f32>;
pub type Vec4 = Vector4<f32>;

pub type Mat3 = Matrix3<f32>;
pub type Mat4 = Matrix4<f32>;
pub type Mat3x4 = Matrix<f32, 3, 4>;

pub const PI: f32 = std::f32::consts::PI;

/// Clamps x to be in the range [min, max].
pub fn clamp<T: Number + NumberOps<T>>(x: T, min: T, max: T) -> T {
	T::max(min, T::min(max, x))
}

/// Remaps a value from one range to another.
pub fn map_range<T: Number>(x: T, min: T, max: T, new_min: T, new_max: T) -> T {
	(x - min) * (new_max - new_min) / (max - min) + new_min
}

/// Linear interpolation between `a` and `b`.
pub fn lerp<T: Number>(a: T, b: T, t: T) -> T {
	a + (b - a) * t
}

pub fn deg_to_rad(deg: f32) -> f32 {
	cast::<f32, f32>(deg) * (PI / 180.0)
}

/// Builds the 3x3 camera-to-world rotation whose Y axis is `forward` cross-completed
/// by `world_up`, matching the frame convention `scene::shading::build_tangent_frame`
/// uses for shading normals.
pub fn look_to(forward: Unit<Vec3>, world_up: Vec3) -> Mat3 {
	let z = *forward;
	let x = *world_up.cross(z).normalize();
	let y = z.cross(x);
	Mat3::from_axes(x, y, z)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn clamp_bounds() {
		assert_eq!(clamp(5.0f32, 0.0, 1.0), 1.0);
		assert_eq!(clamp(-5.0f32, 0.0, 1.0), 0.0);
		assert_eq!(clamp(0.5f32, 0.0, 1.0), 0.5);
	}

	#[test]
	fn lerp_midpoint() {
		assert_eq!(lerp(0.0f32, 10.0, 0.5), 5.0);
	}
}
