use super::Vec3;

/// Axis-aligned bounding box. `min`/`max` are kept tight: after a BVH build
/// every interior node's box exactly encloses both children, every leaf box
/// exactly encloses its one triangle (plus the small fit epsilon below).
#[derive(Clone, Copy)]
pub struct Aabb {
	pub min: Vec3,
	pub max: Vec3,
}

const FIT_EPSILON: f32 = 1e-5;

impl Aabb {
	pub const EMPTY: Self = Self {
		min: Vec3::new(f32::INFINITY, f32::INFINITY, f32::INFINITY),
		max: Vec3::new(f32::NEG_INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY),
	};

	pub fn from_points(a: Vec3, b: Vec3, c: Vec3) -> Self {
		let mut aabb = Self::EMPTY;
		aabb.fit_point(a);
		aabb.fit_point(b);
		aabb.fit_point(c);
		aabb
	}

	pub fn fit_point(&mut self, p: Vec3) {
		self.min.x = self.min.x.min(p.x);
		self.min.y = self.min.y.min(p.y);
		self.min.z = self.min.z.min(p.z);
		self.max.x = self.max.x.max(p.x);
		self.max.y = self.max.y.max(p.y);
		self.max.z = self.max.z.max(p.z);
	}

	pub fn fit_aabb(&mut self, other: &Aabb) {
		self.min.x = self.min.x.min(other.min.x);
		self.min.y = self.min.y.min(other.min.y);
		self.min.z = self.min.z.min(other.min.z);
		self.max.x = self.max.x.max(other.max.x);
		self.max.y = self.max.y.max(other.max.y);
		self.max.z = self.max.z.max(other.max.z);
	}

	/// Grows max by a small epsilon so zero-thickness (e.g. axis-aligned
	/// planar triangles) boxes never have zero surface area.
	pub fn padded(&self) -> Self {
		Self {
			min: self.min,
			max: Vec3::new(self.max.x + FIT_EPSILON, self.max.y + FIT_EPSILON, self.max.z + FIT_EPSILON),
		}
	}

	pub fn centroid(&self) -> Vec3 {
		(self.min + self.max) * 0.5
	}

	pub fn surface_area(&self) -> f32 {
		let d = self.max - self.min;
		if d.x < 0.0 || d.y < 0.0 || d.z < 0.0 {
			return 0.0;
		}
		2.0 * (d.x * d.y + d.y * d.z + d.z * d.x)
	}
}

/// `aabb_fit_triangle` from the geometry module: expands `box` to include
/// all three vertices of `tri`, padding the max corner.
pub fn aabb_fit_triangle(b: &Aabb, a: Vec3, v1: Vec3, v2: Vec3) -> Aabb {
	let mut out = *b;
	out.fit_point(a);
	out.fit_point(v1);
	out.fit_point(v2);
	out.padded()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn from_points_encloses_all_three() {
		let b = Aabb::from_points(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0));
		assert_eq!(b.min.x, 0.0);
		assert_eq!(b.min.y, 0.0);
		assert_eq!(b.max.x, 1.0);
		assert_eq!(b.max.y, 1.0);
	}

	#[test]
	fn degenerate_triangle_aabb_has_positive_thickness_after_padding() {
		let b = Aabb::from_points(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 0.0, 0.0));
		let padded = b.padded();
		assert!(padded.max.z > padded.min.z);
	}

	#[test]
	fn surface_area_of_unit_cube() {
		let b = Aabb { min: Vec3::new(0.0, 0.0, 0.0), max: Vec3::new(1.0, 1.0, 1.0) };
		assert_eq!(b.surface_area(), 6.0);
	}
}
