use crate::math::{Mat3, Vec3};

/// Material attribute values evaluated once per hit, cached on the
/// [`ShadingSurface`] so a BSDF's `sample`/`pdf`/`eval` never re-samples a
/// texture for the same vertex.
#[derive(Clone, Copy)]
pub struct SurfaceAttributes {
	pub albedo: Vec3,
	pub specular_color: Vec3,
	pub emissive: Vec3,
	pub roughness: f32,
	pub metalness: f32,
	pub ior: f32,
}

impl Default for SurfaceAttributes {
	fn default() -> Self {
		Self {
			albedo: Vec3::splat(0.8),
			specular_color: Vec3::ZERO,
			emissive: Vec3::ZERO,
			roughness: 0.5,
			metalness: 0.0,
			ior: 1.5,
		}
	}
}

/// Everything the integrator and a BSDF need at one ray/triangle hit.
/// One instance lives on the stack per bounce; it does not outlive the
/// iteration of `integrator::radiance` that produced it.
pub struct ShadingSurface {
	pub point: Vec3,
	pub geometric_normal: Vec3,
	pub normal: Vec3,
	pub uv: (f32, f32),
	/// Tangent-to-world rotation whose Y axis equals `normal`.
	pub tangent_to_world: Mat3,
	pub attributes: SurfaceAttributes,
	/// BSDF-private scratch; only the Glass preset uses it today.
	pub scratch: f32,
}

/// Builds an orthonormal frame whose Y axis is `normal`, using the
/// "pick whichever world axis is least parallel" completion — deterministic,
/// and continuous except at the one axis flip.
pub fn build_tangent_frame(normal: Vec3) -> Mat3 {
	let helper = if normal.x.abs() < 0.99 { Vec3::X } else { Vec3::Z };
	let x = *helper.cross(normal).normalize();
	let z = x.cross(normal);
	Mat3::from_axes(x, normal, z)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn tangent_frame_y_axis_matches_normal() {
		let n = *Vec3::new(0.3, 0.9, 0.1).normalize();
		let frame = build_tangent_frame(n);
		assert!((frame[(0, 1)] - n.x).abs() < 1e-5);
		assert!((frame[(1, 1)] - n.y).abs() < 1e-5);
		assert!((frame[(2, 1)] - n.z).abs() < 1e-5);
	}
}
