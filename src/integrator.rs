//! Light transport estimators. Every variant walks the same iterative
//! bounce loop rather than recursing, so path depth is bounded by a plain
//! counter instead of by stack space.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::material::{Bsdf, BsdfOps};
use crate::math::{Ray, Vec3};
use crate::scene::{Scene, ShadingSurface};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Integrator {
	/// BSDF-sampling only, no explicit light sampling.
	Simple,
	/// Next-event estimation with a shadow ray, no MIS weighting.
	Direct,
	/// Next-event estimation combined with BSDF sampling via the power heuristic.
	DirectMis,
	DebugMono,
	DebugDepth,
	DebugNormals,
}

impl Default for Integrator {
	fn default() -> Self {
		Integrator::DirectMis
	}
}

/// Power heuristic with beta = 2, per Veach's MIS formulation.
fn power_heuristic(pdf_a: f32, pdf_b: f32) -> f32 {
	let a2 = pdf_a * pdf_a;
	let b2 = pdf_b * pdf_b;
	if a2 + b2 <= 0.0 {
		0.0
	} else {
		a2 / (a2 + b2)
	}
}

fn is_glossy_lobe(bsdf: &Bsdf) -> bool {
	matches!(bsdf, Bsdf::Glass | Bsdf::RoughDielectric)
}

impl Integrator {
	pub fn radiance(&self, scene: &Scene, primary_ray: Ray, rng: &mut impl Rng) -> Vec3 {
		match self {
			Integrator::DebugMono => return debug_mono(scene, primary_ray),
			Integrator::DebugDepth => return debug_depth(scene, primary_ray),
			Integrator::DebugNormals => return debug_normals(scene, primary_ray),
			_ => {}
		}

		let options = scene.get_options();
		let mut ray = primary_ray;
		let mut throughput = Vec3::ONE;
		let mut radiance = Vec3::ZERO;
		let mut bounce = 0u32;
		// Set whenever the previous bounce sampled a non-diffuse lobe: direct
		// light sampling at the *next* hit would double-count what BSDF
		// sampling can already reach on its own.
		let mut specular_bounce = true;
		// The pdf (solid angle measure) the previous bounce sampled `ray.direction`
		// with; needed to weight this hit's emissive contribution against the
		// light-sampling estimator under DirectMis.
		let mut prev_bsdf_pdf = 0.0f32;

		loop {
			let hit = match scene.raycast(&ray) {
				Some(hit) => hit,
				None => {
					radiance += throughput * scene.environment_radiance(ray.direction);
					break;
				}
			};

			let mut surface = hit.shading_surface();
			let bsdf = hit.bsdf();
			let wo = -ray.direction;

			if surface.attributes.emissive != Vec3::ZERO {
				if specular_bounce || matches!(self, Integrator::Simple) {
					radiance += throughput * surface.attributes.emissive;
				} else if matches!(self, Integrator::DirectMis) {
					if let Some(light_solid_angle_pdf) =
						bsdf_sampled_light_pdf(scene, hit.object_idx, hit.geometric_normal, hit.t, ray.direction)
					{
						let weight = power_heuristic(prev_bsdf_pdf, light_solid_angle_pdf);
						radiance += throughput * surface.attributes.emissive * weight;
					}
				}
			}

			if matches!(self, Integrator::Direct | Integrator::DirectMis) {
				radiance += throughput * sample_direct_light(scene, &surface, bsdf, wo, self, rng);
			}

			bounce += 1;
			if bounce >= options.bounces {
				break;
			}

			let (e1, e2, e3): (f32, f32, f32) = (rng.gen(), rng.gen(), rng.gen());
			let wi = bsdf.sample(&mut surface, e1, e2, e3, wo);
			let pdf = bsdf.pdf(&surface, wi, wo);
			if pdf <= 0.0 {
				break;
			}

			let f = bsdf.eval(&surface, wi, wo);
			let cos_theta = surface.normal.dot(wi).abs();
			throughput = throughput * f * (cos_theta / pdf);
			specular_bounce = matches!(self, Integrator::Simple) || is_glossy_lobe(bsdf);
			prev_bsdf_pdf = pdf;

			if throughput == Vec3::ZERO {
				break;
			}

			let survive = throughput.x.max(throughput.y).max(throughput.z).clamp(0.05, 0.95);
			if rng.gen::<f32>() > survive {
				break;
			}
			throughput = throughput / survive;

			ray = Ray::offset(surface.point, wi, surface.geometric_normal);
		}

		radiance
	}
}

/// The solid-angle pdf of having picked `hit_point` via `sample_direct_light`'s
/// light sampling, used to weight a BSDF-sampled ray that happened to land on
/// an emissive triangle. `None` if the hit object isn't a registered light, or
/// the light is seen from behind.
fn bsdf_sampled_light_pdf(
	scene: &Scene,
	object_idx: u32,
	hit_geometric_normal: Vec3,
	hit_t: f32,
	incoming_direction: Vec3,
) -> Option<f32> {
	let (light, light_pick_pdf) = scene.light_for_object(object_idx)?;
	let light_area = light.area();
	if light_area <= 0.0 {
		return None;
	}

	let cos_light = hit_geometric_normal.dot(-incoming_direction);
	if cos_light <= 0.0 {
		return None;
	}

	let area_pdf = light_pick_pdf / light_area;
	let distance_sq = hit_t * hit_t;
	let solid_angle_pdf = area_pdf * distance_sq / cos_light;
	if solid_angle_pdf <= 0.0 {
		None
	} else {
		Some(solid_angle_pdf)
	}
}

/// Next-event estimation: picks one light, samples a point on it, traces a
/// shadow ray, and (for `DirectMis`) combines the light-sampling and
/// BSDF-sampling estimators with the power heuristic.
fn sample_direct_light(
	scene: &Scene,
	surface: &ShadingSurface,
	bsdf: &Bsdf,
	wo: Vec3,
	integrator: &Integrator,
	rng: &mut impl Rng,
) -> Vec3 {
	let (light, light_pick_pdf) = match scene.pick_light(rng.gen()) {
		Some(lp) => lp,
		None => return Vec3::ZERO,
	};

	let object = scene.object(light.object_idx);
	let triangle_idx = light.pick_triangle(rng.gen());
	let triangle = &object.triangles[triangle_idx];
	let (bu, bv) = sample_triangle_barycentric(rng.gen(), rng.gen());
	let light_point = triangle.a * (1.0 - bu - bv) + triangle.b * bu + triangle.c * bv;
	let light_normal = *(triangle.b - triangle.a).cross(triangle.c - triangle.a).normalize();

	let to_light = light_point - surface.point;
	let distance_sq = to_light.length_sq();
	if distance_sq <= 1e-8 {
		return Vec3::ZERO;
	}
	let distance = distance_sq.sqrt();
	let wi = to_light / distance;

	let cos_surface = surface.normal.dot(wi);
	let cos_light = light_normal.dot(-wi);
	if cos_surface <= 0.0 || cos_light <= 0.0 {
		return Vec3::ZERO;
	}

	let shadow_ray = Ray::offset(surface.point, wi, surface.geometric_normal);
	if let Some(occluder) = scene.raycast(&shadow_ray) {
		if occluder.t < distance - 1e-3 {
			return Vec3::ZERO;
		}
	}

	let light_area = light.area();
	let area_pdf = light_pick_pdf / light_area;
	let solid_angle_pdf = area_pdf * distance_sq / cos_light;
	if solid_angle_pdf <= 0.0 {
		return Vec3::ZERO;
	}

	let emitted = object.material.emissive.eval_uv((0.5, 0.5));
	let f = bsdf.eval(surface, wi, wo);
	let weight = match integrator {
		Integrator::DirectMis => {
			let bsdf_pdf = bsdf.pdf(surface, wi, wo);
			power_heuristic(solid_angle_pdf, bsdf_pdf)
		}
		_ => 1.0,
	};

	f * emitted * (cos_surface * weight / solid_angle_pdf)
}

fn sample_triangle_barycentric(e1: f32, e2: f32) -> (f32, f32) {
	let sqrt_e1 = e1.sqrt();
	(1.0 - sqrt_e1, e2 * sqrt_e1)
}

const DEBUG_DEPTH_FAR: f32 = 500.0;

/// Positive components light up red/green/blue; negative components light
/// up the complementary magenta/yellow/cyan. Contributions are summed, so a
/// normal with mixed-sign components blends both.
fn debug_normals(scene: &Scene, ray: Ray) -> Vec3 {
	match scene.raycast(&ray) {
		Some(hit) => {
			let n = hit.shading_normal;
			let x = if n.x >= 0.0 { Vec3::new(n.x, 0.0, 0.0) } else { Vec3::new(0.0, -n.x, -n.x) };
			let y = if n.y >= 0.0 { Vec3::new(0.0, n.y, 0.0) } else { Vec3::new(-n.y, -n.y, 0.0) };
			let z = if n.z >= 0.0 { Vec3::new(0.0, 0.0, n.z) } else { Vec3::new(0.0, -n.z, -n.z) };
			x + y + z
		}
		None => Vec3::ZERO,
	}
}

fn debug_depth(scene: &Scene, ray: Ray) -> Vec3 {
	match scene.raycast(&ray) {
		Some(hit) => Vec3::splat(hit.t / DEBUG_DEPTH_FAR),
		None => Vec3::ZERO,
	}
}

fn debug_mono(scene: &Scene, ray: Ray) -> Vec3 {
	match scene.raycast(&ray) {
		Some(_) => Vec3::splat(0.8),
		None => Vec3::ZERO,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::material::{Attribute, Bsdf, Material};
	use crate::scene::{Object, SceneOptions, Triangle, TriangleProperties};
	use rand::SeedableRng;

	fn single_triangle_scene(material: Material) -> Scene {
		let mut scene = Scene::new(SceneOptions { bounces: 2, ..SceneOptions::default() });
		let t = Triangle { a: Vec3::new(-1.0, -1.0, 0.0), b: Vec3::new(1.0, -1.0, 0.0), c: Vec3::new(0.0, 1.0, 0.0) };
		let mut o = Object::with_capacity(1, material);
		o.push_triangle(t, TriangleProperties::flat(&t));
		scene.add_object(o);
		scene.commit();
		scene
	}

	#[test]
	fn empty_scene_returns_background() {
		let mut scene = Scene::new(SceneOptions::default());
		scene.commit();
		let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 1.0));
		let mut rng = rand::rngs::StdRng::seed_from_u64(1);
		let radiance = Integrator::Simple.radiance(&scene, ray, &mut rng);
		assert_eq!(radiance.x, 0.0);
		assert_eq!(radiance.y, 0.0);
		assert_eq!(radiance.z, 0.0);
	}

	#[test]
	fn emissive_hit_seen_directly_returns_its_radiance() {
		let material = Material::new(Bsdf::Diffuse).with_emissive(Attribute::constant(Vec3::splat(3.0)));
		let scene = single_triangle_scene(material);
		let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 1.0));
		let mut rng = rand::rngs::StdRng::seed_from_u64(2);
		let radiance = Integrator::Simple.radiance(&scene, ray, &mut rng);
		assert_eq!(radiance.x, 3.0);
	}

	#[test]
	fn debug_normals_is_zero_on_a_miss() {
		let scene = single_triangle_scene(Material::new(Bsdf::Diffuse));
		let ray = Ray::new(Vec3::new(5.0, 5.0, -5.0), Vec3::new(0.0, 0.0, 1.0));
		let c = debug_normals(&scene, ray);
		assert_eq!(c.x, 0.0);
	}

	#[test]
	fn bsdf_sampled_light_pdf_is_none_for_a_non_light_object() {
		let scene = single_triangle_scene(Material::new(Bsdf::Diffuse));
		let pdf = bsdf_sampled_light_pdf(&scene, 0, Vec3::new(0.0, 0.0, 1.0), 5.0, Vec3::new(0.0, 0.0, -1.0));
		assert!(pdf.is_none());
	}

	#[test]
	fn bsdf_sampled_light_pdf_is_some_and_positive_for_a_light_hit_from_the_front() {
		let material = Material::new(Bsdf::Diffuse).with_emissive(Attribute::constant(Vec3::splat(3.0)));
		let scene = single_triangle_scene(material);
		// The triangle's geometric normal faces +Z; a ray traveling in -Z
		// sees its front face.
		let pdf = bsdf_sampled_light_pdf(&scene, 0, Vec3::new(0.0, 0.0, 1.0), 5.0, Vec3::new(0.0, 0.0, -1.0));
		assert!(pdf.unwrap() > 0.0);
	}

	#[test]
	fn bsdf_sampled_light_pdf_is_none_when_seen_from_behind() {
		let material = Material::new(Bsdf::Diffuse).with_emissive(Attribute::constant(Vec3::splat(3.0)));
		let scene = single_triangle_scene(material);
		let pdf = bsdf_sampled_light_pdf(&scene, 0, Vec3::new(0.0, 0.0, 1.0), 5.0, Vec3::new(0.0, 0.0, 1.0));
		assert!(pdf.is_none());
	}
}
