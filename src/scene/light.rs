use crate::math::Vec3;

/// An emissive object surfaced separately from [`super::Object`] so the
/// integrator can pick a light without scanning every triangle in the
/// scene. Built at `Scene::commit` time from every object
/// whose material `is_emissive()`.
pub struct Light {
	pub object_idx: u32,
	/// Cumulative per-triangle area, used to pick a triangle within this
	/// light proportional to its area. `areas[i]` is the sum of triangle
	/// areas `0..=i`; `areas.last()` is the light's total area.
	pub cumulative_areas: Vec<f32>,
	pub power: f32,
}

impl Light {
	pub fn new(object_idx: u32, triangle_areas: &[f32], radiance: Vec3) -> Self {
		let mut cumulative_areas = Vec::with_capacity(triangle_areas.len());
		let mut running = 0.0;
		for area in triangle_areas {
			running += area;
			cumulative_areas.push(running);
		}
		let total_area = running;
		// Power of a diffuse area emitter integrated over the hemisphere: pi * radiance * area.
		let power = crate::math::PI * (radiance.x + radiance.y + radiance.z) / 3.0 * total_area;
		Self { object_idx, cumulative_areas, power }
	}

	pub fn area(&self) -> f32 {
		*self.cumulative_areas.last().unwrap_or(&0.0)
	}

	/// Picks a triangle within this light proportional to its area, given
	/// `u` uniform in `[0, 1)`.
	pub fn pick_triangle(&self, u: f32) -> usize {
		let target = u * self.area();
		match self.cumulative_areas.binary_search_by(|a| a.partial_cmp(&target).unwrap()) {
			Ok(i) => i,
			Err(i) => i.min(self.cumulative_areas.len() - 1),
		}
	}
}
