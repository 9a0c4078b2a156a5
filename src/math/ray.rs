use super::Vec3;

/// A ray in world space. `inv_direction` is cached so every AABB slab test
/// avoids a division; relies on IEEE `1.0 / 0.0 = inf` for axis-aligned rays
/// (see `geometry::ray_aabb`).
#[derive(Clone, Copy)]
pub struct Ray {
	pub origin: Vec3,
	pub direction: Vec3,
	pub inv_direction: Vec3,
}

impl Ray {
	pub fn new(origin: Vec3, direction: Vec3) -> Self {
		Self {
			origin,
			direction,
			inv_direction: Vec3::new(1.0 / direction.x, 1.0 / direction.y, 1.0 / direction.z),
		}
	}

	pub fn at(&self, t: f32) -> Vec3 {
		self.origin + self.direction * t
	}

	/// Builds the ray for the next bounce, nudging the origin off the
	/// surface along the geometric normal to avoid self-intersection.
	pub fn offset(origin: Vec3, direction: Vec3, normal: Vec3) -> Self {
		const EPSILON: f32 = 1e-4;
		let side = if direction.dot(normal) >= 0.0 { 1.0 } else { -1.0 };
		Self::new(origin + normal * (EPSILON * side), direction)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn at_advances_along_direction() {
		let r = Ray::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
		let p = r.at(2.0);
		assert_eq!(p.x, 2.0);
		assert_eq!(p.y, 0.0);
	}

	#[test]
	fn inv_direction_is_reciprocal() {
		let r = Ray::new(Vec3::ZERO, Vec3::new(2.0, 0.0, -4.0));
		assert_eq!(r.inv_direction.x, 0.5);
		assert_eq!(r.inv_direction.z, -0.25);
	}

	#[test]
	fn inv_direction_of_zero_component_is_infinite() {
		let r = Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));
		assert!(r.inv_direction.x.is_infinite());
	}
}
