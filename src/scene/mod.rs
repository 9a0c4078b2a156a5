pub mod object;
pub mod light;
pub mod options;
pub mod shading;

pub use light::Light;
pub use object::{Object, Triangle, TriangleProperties};
pub use options::{Accelerator, SceneOptions};
pub use shading::{build_tangent_frame, ShadingSurface, SurfaceAttributes};

use std::sync::Arc;

use crate::bvh::Bvh;
use crate::material::Bsdf;
use crate::math::{Aabb, Ray, Vec3};
use crate::texture::Texture;

/// A single ray/scene intersection, everything the integrator needs to
/// build a [`ShadingSurface`] for the hit object's material.
pub struct Intersection<'a> {
	pub t: f32,
	pub point: Vec3,
	pub geometric_normal: Vec3,
	pub shading_normal: Vec3,
	pub uv: (f32, f32),
	pub object: &'a Object,
	pub object_idx: u32,
}

/// Owns every object and light in a render; built incrementally with
/// `add_object`, then `commit` builds the acceleration structure and light
/// list once before the first `raycast`.
pub struct Scene {
	options: SceneOptions,
	objects: Vec<Object>,
	lights: Vec<Light>,
	bvh: Option<Bvh>,
	environment: Option<Arc<Texture>>,
}

impl Scene {
	pub fn new(options: SceneOptions) -> Self {
		Self { options, objects: Vec::new(), lights: Vec::new(), bvh: None, environment: None }
	}

	pub fn get_options(&self) -> &SceneOptions {
		&self.options
	}

	pub fn set_environment(&mut self, environment: Arc<Texture>) {
		self.environment = Some(environment);
	}

	/// Registers an object, returning the index future `raycast` results
	/// reference it by. Invalidates any previously built acceleration
	/// structure; call `commit` again before rendering.
	pub fn add_object(&mut self, object: Object) -> u32 {
		let idx = self.objects.len() as u32;
		self.objects.push(object);
		self.bvh = None;
		idx
	}

	pub fn object(&self, idx: u32) -> &Object {
		&self.objects[idx as usize]
	}

	pub fn object_count(&self) -> usize {
		self.objects.len()
	}

	pub fn is_empty(&self) -> bool {
		self.objects.iter().all(|o| o.triangle_count() == 0)
	}

	/// Builds the BVH over every triangle and the per-object light list.
	/// Must be called (again) after any `add_object` before `raycast` or
	/// `pick_light` are used.
	pub fn commit(&mut self) {
		log::info!(
			"committing scene: {} objects, {} triangles",
			self.objects.len(),
			self.objects.iter().map(|o| o.triangle_count()).sum::<usize>()
		);

		let mut triangle_refs = Vec::new();
		for (object_idx, object) in self.objects.iter().enumerate() {
			for triangle_idx in 0..object.triangle_count() {
				let t = &object.triangles[triangle_idx];
				let aabb = Aabb::from_points(t.a, t.b, t.c).padded();
				triangle_refs.push((object_idx as u32, triangle_idx as u32, aabb));
			}
		}
		self.bvh = Some(Bvh::build(triangle_refs.into_iter()));

		self.lights = self
			.objects
			.iter()
			.enumerate()
			.filter(|(_, o)| o.material.is_emissive())
			.map(|(object_idx, o)| {
				let areas: Vec<f32> = (0..o.triangle_count()).map(|i| o.triangle_area(i)).collect();
				let radiance = o.material.emissive.eval_uv((0.5, 0.5));
				Light::new(object_idx as u32, &areas, radiance)
			})
			.collect();

		log::debug!("found {} emissive lights", self.lights.len());
	}

	pub fn lights(&self) -> &[Light] {
		&self.lights
	}

	/// Uniformly picks one light and returns it with its selection pdf.
	/// Known simplification, preserved rather than fixed: this ignores
	/// each light's power, so a small dim light is sampled exactly as
	/// often as a large bright one.
	pub fn pick_light(&self, u: f32) -> Option<(&Light, f32)> {
		if self.lights.is_empty() {
			return None;
		}
		let idx = ((u * self.lights.len() as f32) as usize).min(self.lights.len() - 1);
		Some((&self.lights[idx], 1.0 / self.lights.len() as f32))
	}

	/// Power-proportional light selection, kept for reference but unused:
	/// the integrator calls the uniform `pick_light` above instead.
	#[allow(dead_code)]
	fn pick_light_by_power(&self, u: f32) -> Option<(&Light, f32)> {
		let total_power: f32 = self.lights.iter().map(|l| l.power).sum();
		if total_power <= 0.0 {
			return None;
		}
		let target = u * total_power;
		let mut running = 0.0;
		for light in &self.lights {
			running += light.power;
			if target <= running {
				return Some((light, light.power / total_power));
			}
		}
		self.lights.last().map(|l| (l, l.power / total_power))
	}

	pub fn environment_radiance(&self, direction: Vec3) -> Vec3 {
		match &self.environment {
			Some(tex) => tex.sample_direction(direction),
			None => Vec3::ZERO,
		}
	}

	/// Nudges the origin forward by `0.001 * direction` before traversal, so
	/// a ray spawned on a surface (the next bounce, a shadow ray) doesn't
	/// immediately re-hit the surface it started on.
	pub fn raycast(&self, ray: &Ray) -> Option<Intersection<'_>> {
		let ray = Ray::new(ray.origin + ray.direction * 0.001, ray.direction);
		let ray = &ray;

		let bvh = self.bvh.as_ref()?;
		let hit = bvh.traverse(ray, |leaf| {
			let object = &self.objects[leaf.object_idx() as usize];
			let t = &object.triangles[leaf.triangle_idx() as usize];
			crate::geometry::ray_triangle(ray, t.a, t.b, t.c).map(|h| (h.t, h.u, h.v))
		})?;

		let object = &self.objects[hit.leaf.object_idx() as usize];
		let triangle_idx = hit.leaf.triangle_idx() as usize;
		let triangle = &object.triangles[triangle_idx];
		let geometric_normal = *(triangle.b - triangle.a).cross(triangle.c - triangle.a).normalize();
		let shading_normal = *object.interpolated_normal(triangle_idx, hit.u, hit.v).normalize();

		Some(Intersection {
			t: hit.t,
			point: ray.at(hit.t),
			geometric_normal,
			shading_normal,
			uv: object.interpolated_uv(triangle_idx, hit.u, hit.v),
			object,
			object_idx: hit.leaf.object_idx(),
		})
	}

	/// Finds the light registered for `object_idx`, if that object is one,
	/// with its uniform selection pdf (matching `pick_light`'s own pdf).
	pub fn light_for_object(&self, object_idx: u32) -> Option<(&Light, f32)> {
		let light = self.lights.iter().find(|l| l.object_idx == object_idx)?;
		Some((light, 1.0 / self.lights.len() as f32))
	}
}

impl<'a> Intersection<'a> {
	/// Builds the shading surface the material's BSDF samples/evaluates
	/// against, resolving every attribute texture at this hit's UV.
	pub fn shading_surface(&self) -> ShadingSurface {
		let material = &self.object.material;
		let attributes = SurfaceAttributes {
			albedo: material.albedo.eval_uv(self.uv),
			specular_color: material.specular_color.eval_uv(self.uv),
			emissive: material.emissive.eval_uv(self.uv),
			roughness: material.roughness.eval_uv(self.uv).x,
			metalness: material.metalness.eval_uv(self.uv).x,
			ior: material.ior,
		};
		ShadingSurface {
			point: self.point,
			geometric_normal: self.geometric_normal,
			normal: self.shading_normal,
			uv: self.uv,
			tangent_to_world: build_tangent_frame(self.shading_normal),
			attributes,
			scratch: 0.0,
		}
	}

	pub fn bsdf(&self) -> &Bsdf {
		&self.object.material.bsdf
	}
}
