//! Ray/primitive intersection routines. These are pure functions with no
//! allocation; the BVH (`bvh.rs`) is the only caller during a render.

use crate::math::{Aabb, Ray, Vec3};

const TRIANGLE_EPSILON: f32 = 1e-4;

pub struct TriangleHit {
	pub t: f32,
	pub u: f32,
	pub v: f32,
	pub point: Vec3,
}

/// Moller-Trumbore intersection. Two-sided: back-face hits are not culled,
/// since the integrator needs to see the inside of e.g. glass objects.
pub fn ray_triangle(ray: &Ray, a: Vec3, b: Vec3, c: Vec3) -> Option<TriangleHit> {
	let edge1 = b - a;
	let edge2 = c - a;

	let p = ray.direction.cross(edge2);
	let det = edge1.dot(p);

	if det.abs() < TRIANGLE_EPSILON {
		return None;
	}

	let inv_det = 1.0 / det;
	let t_vec = ray.origin - a;
	let u = t_vec.dot(p) * inv_det;
	if !(0.0..=1.0).contains(&u) {
		return None;
	}

	let q = t_vec.cross(edge1);
	let v = ray.direction.dot(q) * inv_det;
	if v < 0.0 || u + v > 1.0 {
		return None;
	}

	let t = edge2.dot(q) * inv_det;
	if t <= TRIANGLE_EPSILON {
		return None;
	}

	Some(TriangleHit { t, u, v, point: ray.at(t) })
}

/// Watertight ray/triangle intersection (Woop et al. 2013): shears the
/// triangle into a space where the ray is +Z, so edge tests never miss due
/// to catastrophic cancellation near silhouette edges. Kept alongside
/// `ray_triangle` as an independently testable alternative, not currently
/// wired into `bvh::traverse`.
pub fn ray_triangle_watertight(ray: &Ray, a: Vec3, b: Vec3, c: Vec3) -> Option<TriangleHit> {
	let d = ray.direction;
	let kz = if d.x.abs() > d.y.abs() && d.x.abs() > d.z.abs() {
		0
	} else if d.y.abs() > d.z.abs() {
		1
	} else {
		2
	};
	let kx = (kz + 1) % 3;
	let ky = (kz + 2) % 3;

	let d_arr = [d.x, d.y, d.z];
	let (dx, dy, dz) = (d_arr[kx], d_arr[ky], d_arr[kz]);
	let sx = dx / dz;
	let sy = dy / dz;
	let sz = 1.0 / dz;

	let shear = |p: Vec3| -> (f64, f64, f64) {
		let arr = [p.x, p.y, p.z];
		let o = [ray.origin.x, ray.origin.y, ray.origin.z];
		let px = arr[kx] - o[kx];
		let py = arr[ky] - o[ky];
		let pz = arr[kz] - o[kz];
		((px - sx * pz) as f64, (py - sy * pz) as f64, (pz * sz) as f64)
	};

	let (ax, ay, az) = shear(a);
	let (bx, by, bz) = shear(b);
	let (cx, cy, cz) = shear(c);

	let u = bx * cy - by * cx;
	let v = cx * ay - cy * ax;
	let w = ax * by - ay * bx;

	if (u < 0.0 || v < 0.0 || w < 0.0) && (u > 0.0 || v > 0.0 || w > 0.0) {
		return None;
	}

	let det = u + v + w;
	if det == 0.0 {
		return None;
	}

	let t_scaled = u * az + v * bz + w * cz;
	if det < 0.0 && t_scaled >= 0.0 {
		return None;
	}
	if det > 0.0 && t_scaled <= 0.0 {
		return None;
	}

	let inv_det = 1.0 / det;
	let t = (t_scaled * inv_det) as f32;
	if t <= TRIANGLE_EPSILON {
		return None;
	}

	Some(TriangleHit {
		t,
		u: (v * inv_det) as f32,
		v: (w * inv_det) as f32,
		point: ray.at(t),
	})
}

/// Slab test against an AABB. Relies on `ray.inv_direction` being `+-inf`
/// for zero direction components, which is what the IEEE division in
/// `Ray::new` already produces; no special case is added for it.
pub fn ray_aabb(ray: &Ray, aabb: &Aabb) -> Option<(f32, f32)> {
	let t1 = (aabb.min.x - ray.origin.x) * ray.inv_direction.x;
	let t2 = (aabb.max.x - ray.origin.x) * ray.inv_direction.x;
	let mut tmin = t1.min(t2);
	let mut tmax = t1.max(t2);

	let t1 = (aabb.min.y - ray.origin.y) * ray.inv_direction.y;
	let t2 = (aabb.max.y - ray.origin.y) * ray.inv_direction.y;
	tmin = tmin.max(t1.min(t2));
	tmax = tmax.min(t1.max(t2));

	let t1 = (aabb.min.z - ray.origin.z) * ray.inv_direction.z;
	let t2 = (aabb.max.z - ray.origin.z) * ray.inv_direction.z;
	tmin = tmin.max(t1.min(t2));
	tmax = tmax.min(t1.max(t2));

	if tmax >= tmin.max(0.0) {
		Some((tmin, tmax))
	} else {
		None
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn ray_hits_triangle_head_on() {
		let ray = Ray::new(Vec3::new(0.25, 0.25, -1.0), Vec3::new(0.0, 0.0, 1.0));
		let hit = ray_triangle(
			&ray,
			Vec3::new(0.0, 0.0, 0.0),
			Vec3::new(1.0, 0.0, 0.0),
			Vec3::new(0.0, 1.0, 0.0),
		);
		assert!(hit.is_some());
		assert_eq!(hit.unwrap().t, 1.0);
	}

	#[test]
	fn ray_misses_triangle_outside_edges() {
		let ray = Ray::new(Vec3::new(2.0, 2.0, -1.0), Vec3::new(0.0, 0.0, 1.0));
		let hit = ray_triangle(
			&ray,
			Vec3::new(0.0, 0.0, 0.0),
			Vec3::new(1.0, 0.0, 0.0),
			Vec3::new(0.0, 1.0, 0.0),
		);
		assert!(hit.is_none());
	}

	#[test]
	fn degenerate_triangle_never_hits() {
		let ray = Ray::new(Vec3::new(0.0, 0.0, -1.0), Vec3::new(0.0, 0.0, 1.0));
		let hit = ray_triangle(
			&ray,
			Vec3::new(0.0, 0.0, 0.0),
			Vec3::new(1.0, 0.0, 0.0),
			Vec3::new(2.0, 0.0, 0.0),
		);
		assert!(hit.is_none());
	}

	#[test]
	fn watertight_agrees_with_moller_trumbore() {
		let ray = Ray::new(Vec3::new(0.25, 0.25, -1.0), Vec3::new(0.0, 0.0, 1.0));
		let a = Vec3::new(0.0, 0.0, 0.0);
		let b = Vec3::new(1.0, 0.0, 0.0);
		let c = Vec3::new(0.0, 1.0, 0.0);
		let h1 = ray_triangle(&ray, a, b, c).unwrap();
		let h2 = ray_triangle_watertight(&ray, a, b, c).unwrap();
		assert!((h1.t - h2.t).abs() < 1e-4);
	}

	#[test]
	fn ray_aabb_unit_cube_from_outside() {
		let aabb = Aabb { min: Vec3::new(-1.0, -1.0, -1.0), max: Vec3::new(1.0, 1.0, 1.0) };
		let ray = Ray::new(Vec3::new(2.0, 0.0, 0.0), Vec3::new(-1.0, 0.0, 0.0));
		let (tmin, _tmax) = ray_aabb(&ray, &aabb).unwrap();
		assert_eq!(tmin, 1.0);
	}

	#[test]
	fn ray_grazing_aabb_edge_is_accepted() {
		// Passes exactly through the (x=-1, y=-1) edge of the box.
		let aabb = Aabb { min: Vec3::new(-1.0, -1.0, -1.0), max: Vec3::new(1.0, 1.0, 1.0) };
		let ray = Ray::new(Vec3::new(-2.0, -2.0, 0.0), Vec3::new(1.0, 1.0, 0.0));
		let (tmin, _) = ray_aabb(&ray, &aabb).unwrap();
		assert_eq!(tmin, 1.0);
	}

	#[test]
	fn ray_misses_aabb_entirely() {
		let aabb = Aabb { min: Vec3::new(-1.0, -1.0, -1.0), max: Vec3::new(1.0, 1.0, 1.0) };
		let ray = Ray::new(Vec3::new(5.0, 5.0, 5.0), Vec3::new(0.0, 0.0, 1.0));
		assert!(ray_aabb(&ray, &aabb).is_none());
	}
}
