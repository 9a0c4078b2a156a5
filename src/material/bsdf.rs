//! BSDF presets. Each preset implements the `(sample, pdf, eval)` triple
//! as a trait method; `Bsdf` is matched on statically
//! rather than boxed, since a material's BSDF kind is fixed at construction.

use crate::math::{Mat3, Vec3, PI};
use crate::scene::shading::ShadingSurface;

/// Scattering behavior of a material. `wo` points away from the surface,
/// back toward the previous ray segment; `wi` is the incident direction
/// being sampled or evaluated, also pointing away from the surface.
pub trait BsdfOps {
	/// Takes `surface` mutably solely so the Glass preset can cache its
	/// chosen Fresnel weight in `surface.scratch` for the matching
	/// `pdf`/`eval` calls on the same vertex.
	fn sample(&self, surface: &mut ShadingSurface, e1: f32, e2: f32, e3: f32, wo: Vec3) -> Vec3;
	fn pdf(&self, surface: &ShadingSurface, wi: Vec3, wo: Vec3) -> f32;
	fn eval(&self, surface: &ShadingSurface, wi: Vec3, wo: Vec3) -> Vec3;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bsdf {
	Diffuse,
	Phong { exponent: f32 },
	RoughDielectric,
	Glass,
}

/// Cosine-weighted hemisphere sample via the disk-to-hemisphere projection,
/// in the local frame where Y is up; transformed to world by `frame`.
fn sample_cosine_hemisphere(e1: f32, e2: f32, frame: &Mat3) -> Vec3 {
	let r = e1.max(0.0).sqrt();
	let theta = 2.0 * PI * e2;
	let local = Vec3::new(r * theta.cos(), (1.0 - e1).max(0.0).sqrt(), r * theta.sin());
	*frame * local
}

fn fresnel_schlick(f0: Vec3, cos_theta: f32) -> Vec3 {
	let m = (1.0 - cos_theta.max(0.0)).clamp(0.0, 1.0).powi(5);
	f0 + (Vec3::ONE - f0) * m
}

fn f0_from_ior(ior: f32, albedo: Vec3, metalness: f32) -> Vec3 {
	let f = ((1.0 - ior) / (1.0 + ior)).powi(2);
	Vec3::splat(f) * (1.0 - metalness) + albedo * metalness
}

impl BsdfOps for Bsdf {
	fn sample(&self, surface: &mut ShadingSurface, e1: f32, e2: f32, e3: f32, wo: Vec3) -> Vec3 {
		match *self {
			Bsdf::Diffuse => sample_cosine_hemisphere(e1, e2, &surface.tangent_to_world),

			Bsdf::Phong { exponent } => {
				let (kd, _ks) = phong_lobe_probabilities(surface.attributes.albedo, surface.attributes.specular_color);
				if e3 < kd {
					sample_cosine_hemisphere(e1, e2, &surface.tangent_to_world)
				} else {
					let phi = 2.0 * PI * e1;
					let cos_alpha = (1.0 - e2).powf(1.0 / (exponent + 1.0));
					let sin_alpha = (1.0 - cos_alpha * cos_alpha).max(0.0).sqrt();
					// Lobe is centered on the mirror reflection of wo, not on the normal.
					let reflected = reflect(wo, surface.normal);
					let lobe_frame = tangent_frame_around(reflected);
					let local = Vec3::new(sin_alpha * phi.cos(), cos_alpha, sin_alpha * phi.sin());
					lobe_frame * local
				}
			}

			Bsdf::RoughDielectric => {
				let metalness = surface.attributes.metalness;
				if e3 < 1.0 - metalness {
					sample_cosine_hemisphere(e1, e2, &surface.tangent_to_world)
				} else {
					let alpha = surface.attributes.roughness.max(1e-3).powi(2);
					let theta = (alpha * e1.sqrt() / (1.0 - e1).max(1e-6).sqrt()).atan();
					let phi = 2.0 * PI * e2;
					let half = Vec3::new(theta.sin() * phi.cos(), theta.cos(), theta.sin() * phi.sin());
					let half_world = surface.tangent_to_world * half;
					reflect(wo, half_world)
				}
			}

			Bsdf::Glass => {
				let (refracted, reflected, r) = glass_directions(surface, wo);
				match refracted {
					Some(refracted) if e3 >= r => {
						surface.scratch = 1.0 - r;
						refracted
					}
					_ => {
						surface.scratch = r;
						reflected
					}
				}
			}
		}
	}

	fn pdf(&self, surface: &ShadingSurface, wi: Vec3, wo: Vec3) -> f32 {
		match *self {
			Bsdf::Diffuse => (surface.normal.dot(wi)).max(0.0) / PI,

			Bsdf::Phong { exponent } => {
				let (kd, ks) = phong_lobe_probabilities(surface.attributes.albedo, surface.attributes.specular_color);
				let diffuse_pdf = (surface.normal.dot(wi)).max(0.0) / PI;
				let reflected = reflect(wo, surface.normal);
				let cos_alpha = reflected.dot(wi).max(0.0);
				let specular_pdf = (exponent + 1.0) / (2.0 * PI) * cos_alpha.powf(exponent);
				kd * diffuse_pdf + ks * specular_pdf
			}

			Bsdf::RoughDielectric => {
				let metalness = surface.attributes.metalness;
				let diffuse_pdf = (surface.normal.dot(wi)).max(0.0) / PI;
				let alpha = surface.attributes.roughness.max(1e-3).powi(2);
				let half = *(wi + wo).normalize();
				let n_dot_h = surface.normal.dot(half).max(1e-6);
				let d = ggx_d(n_dot_h, alpha);
				let specular_pdf = d * n_dot_h / (4.0 * wo.dot(half).abs().max(1e-6));
				(1.0 - metalness) * diffuse_pdf + metalness * specular_pdf
			}

			Bsdf::Glass => surface.scratch, // cached R or 1-R from the last sample()
		}
	}

	fn eval(&self, surface: &ShadingSurface, wi: Vec3, wo: Vec3) -> Vec3 {
		match *self {
			Bsdf::Diffuse => surface.attributes.albedo / PI,

			Bsdf::Phong { exponent } => {
				let (kd, ks) = phong_lobe_probabilities(surface.attributes.albedo, surface.attributes.specular_color);
				let reflected = reflect(wo, surface.normal);
				let cos_alpha = reflected.dot(wi).max(0.0);
				let diffuse = surface.attributes.albedo / PI;
				let specular = surface.attributes.specular_color * ((exponent + 2.0) / (2.0 * PI) * cos_alpha.powf(exponent));
				diffuse * kd + specular * ks
			}

			Bsdf::RoughDielectric => {
				let metalness = surface.attributes.metalness;
				let n_dot_l = surface.normal.dot(wi).max(0.0);
				let n_dot_v = surface.normal.dot(wo).max(0.0);
				let alpha = surface.attributes.roughness.max(1e-3).powi(2);
				let half = *(wi + wo).normalize();
				let n_dot_h = surface.normal.dot(half).max(0.0);
				let d = ggx_d(n_dot_h, alpha);
				let g = ggx_g1(n_dot_l, alpha) * ggx_g1(n_dot_v, alpha);
				let f0 = f0_from_ior(surface.attributes.ior, surface.attributes.albedo, metalness);
				let f = fresnel_schlick(f0, wo.dot(half).max(0.0));
				let denom = (4.0 * n_dot_l * n_dot_v + 0.05).min(1.0).max(1e-6);
				let specular = f * (d * g / denom);
				let diffuse = surface.attributes.albedo / PI * (1.0 - metalness);
				diffuse + specular
			}

			Bsdf::Glass => Vec3::splat(surface.scratch),
		}
	}
}

fn reflect(v: Vec3, n: Vec3) -> Vec3 {
	n * (2.0 * v.dot(n)) - v
}

/// Builds an arbitrary orthonormal frame whose Y axis is `up`; used to
/// sample a Phong specular lobe around the mirror-reflection direction.
fn tangent_frame_around(up: Vec3) -> Mat3 {
	let helper = if up.x.abs() < 0.99 { Vec3::X } else { Vec3::Y };
	let x = *helper.cross(up).normalize();
	let z = x.cross(up);
	Mat3::from_axes(x, up, z)
}

/// `terra_bsdf_phong_calculate_ks_kd`: the heavier-luminance lobe receives
/// the *smaller* selection probability. This is a known inversion carried
/// over verbatim, not a bug fix.
fn phong_lobe_probabilities(albedo: Vec3, specular_color: Vec3) -> (f32, f32) {
	let diffuse = (albedo.x + albedo.y + albedo.z).max(1e-4);
	let specular = (specular_color.x + specular_color.y + specular_color.z).max(1e-4);

	if specular > diffuse {
		let kd = 0.5 * diffuse / specular;
		(kd, 1.0 - kd)
	} else {
		let ks = 0.5 * specular / diffuse;
		(1.0 - ks, ks)
	}
}

fn ggx_chi(x: f32) -> f32 {
	if x > 0.0 {
		1.0
	} else {
		0.0
	}
}

fn ggx_d(n_dot_h: f32, alpha: f32) -> f32 {
	let a2 = alpha * alpha;
	let denom = PI * (n_dot_h.powi(2) * (a2 - 1.0) + 1.0).powi(2);
	ggx_chi(n_dot_h) * a2 / denom.max(1e-8)
}

fn ggx_g1(n_dot_x: f32, alpha: f32) -> f32 {
	let a2 = alpha * alpha;
	let tan2 = (1.0 - n_dot_x * n_dot_x).max(0.0) / (n_dot_x * n_dot_x).max(1e-8);
	2.0 / (1.0 + (1.0 + a2 * tan2).sqrt())
}

/// Computes the glass BSDF's reflected/refracted directions and the
/// unpolarized Schlick Fresnel reflectance `R`. Returns `None` for the
/// refracted direction under total internal reflection.
fn glass_directions(surface: &ShadingSurface, wo: Vec3) -> (Option<Vec3>, Vec3, f32) {
	let incident = -wo;
	let mut n = surface.normal;
	let mut cos_i = -n.dot(incident);
	let (n1, n2) = if cos_i < 0.0 {
		n = -n;
		cos_i = -cos_i;
		(surface.attributes.ior, 1.0)
	} else {
		(1.0, surface.attributes.ior)
	};

	let eta = n1 / n2;
	let sin_t2 = eta * eta * (1.0 - cos_i * cos_i).max(0.0);
	let reflected = reflect(wo, n);

	if sin_t2 > 1.0 {
		return (None, reflected, 1.0);
	}

	let cos_t = (1.0 - sin_t2).max(0.0).sqrt();
	let refracted = incident * eta + n * (eta * cos_i - cos_t);

	let r0 = ((n1 - n2) / (n1 + n2)).powi(2);
	let cos_for_schlick = if n1 <= n2 { cos_i } else { cos_t };
	let r = r0 + (1.0 - r0) * (1.0 - cos_for_schlick).powi(5);

	(Some(refracted), reflected, r)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::scene::shading::SurfaceAttributes;

	fn flat_surface(attrs: SurfaceAttributes) -> ShadingSurface {
		ShadingSurface {
			point: Vec3::ZERO,
			geometric_normal: *Vec3::Y,
			normal: *Vec3::Y,
			uv: (0.0, 0.0),
			tangent_to_world: Mat3::from_axes(*Vec3::X, *Vec3::Y, *Vec3::Z),
			attributes: attrs,
			scratch: 0.0,
		}
	}

	#[test]
	fn diffuse_pdf_is_cosine_weighted() {
		let s = flat_surface(SurfaceAttributes::default());
		let p = Bsdf::Diffuse.pdf(&s, *Vec3::Y, *Vec3::Y);
		assert!((p - 1.0 / PI).abs() < 1e-5);
	}

	#[test]
	fn diffuse_pdf_is_zero_below_horizon() {
		let s = flat_surface(SurfaceAttributes::default());
		let p = Bsdf::Diffuse.pdf(&s, -*Vec3::Y, *Vec3::Y);
		assert_eq!(p, 0.0);
	}

	#[test]
	fn diffuse_eval_is_albedo_over_pi() {
		let mut a = SurfaceAttributes::default();
		a.albedo = Vec3::splat(0.8);
		let s = flat_surface(a);
		let f = Bsdf::Diffuse.eval(&s, *Vec3::Y, *Vec3::Y);
		assert!((f.x - 0.8 / PI).abs() < 1e-5);
	}

	#[test]
	fn phong_lobe_probabilities_invert_luminance() {
		// Bright specular, dim diffuse: specular should get the SMALLER probability.
		let (kd, ks) = phong_lobe_probabilities(Vec3::splat(0.1), Vec3::splat(0.9));
		assert!(ks < kd);
	}

	#[test]
	fn glass_total_internal_reflection_yields_no_refraction() {
		let mut a = SurfaceAttributes::default();
		a.ior = 1.5;
		let mut s = flat_surface(a);
		// Grazing angle from inside a denser medium triggers TIR.
		s.normal = *(-Vec3::Y);
		let wo = *Vec3::new(0.99, 0.01, 0.0).normalize();
		let (refracted, _reflected, r) = glass_directions(&s, wo);
		assert!(refracted.is_none());
		assert_eq!(r, 1.0);
	}
}
