pub mod attribute;
pub mod bsdf;

pub use attribute::Attribute;
pub use bsdf::{Bsdf, BsdfOps};

use bitflags::bitflags;

bitflags! {
	#[derive(Clone, Copy, Debug, PartialEq, Eq)]
	pub struct MaterialFlags: u32 {
		const HAS_BUMP_MAP   = 0b0001;
		const HAS_NORMAL_MAP = 0b0010;
		const HAS_EMISSIVE   = 0b0100;
	}
}

/// A BSDF descriptor plus the attributes it and the shared material-level
/// slots (ior, emissive, bump/normal map) pull from. Every slot holds a
/// valid attribute after construction; `Material::new` defaults everything
/// to a black constant.
pub struct Material {
	pub bsdf: Bsdf,
	pub flags: MaterialFlags,

	pub albedo: Attribute,
	pub specular_color: Attribute,
	pub roughness: Attribute,
	pub metalness: Attribute,

	pub ior: f32,
	pub emissive: Attribute,
	pub bump_map: Option<Attribute>,
	pub normal_map: Option<Attribute>,
}

impl Material {
	pub fn new(bsdf: Bsdf) -> Self {
		Self {
			bsdf,
			flags: MaterialFlags::empty(),
			albedo: Attribute::BLACK,
			specular_color: Attribute::BLACK,
			roughness: Attribute::constant(crate::math::Vec3::splat(0.5)),
			metalness: Attribute::BLACK,
			ior: 1.5,
			emissive: Attribute::BLACK,
			bump_map: None,
			normal_map: None,
		}
	}

	pub fn with_albedo(mut self, albedo: Attribute) -> Self {
		self.albedo = albedo;
		self
	}

	pub fn with_specular_color(mut self, specular_color: Attribute) -> Self {
		self.specular_color = specular_color;
		self
	}

	pub fn with_roughness(mut self, roughness: Attribute) -> Self {
		self.roughness = roughness;
		self
	}

	pub fn with_metalness(mut self, metalness: Attribute) -> Self {
		self.metalness = metalness;
		self
	}

	pub fn with_ior(mut self, ior: f32) -> Self {
		self.ior = ior;
		self
	}

	pub fn with_emissive(mut self, emissive: Attribute) -> Self {
		self.flags.set(MaterialFlags::HAS_EMISSIVE, !emissive.is_zero());
		self.emissive = emissive;
		self
	}

	pub fn is_emissive(&self) -> bool {
		!self.emissive.is_zero()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn new_material_defaults_to_black_attributes() {
		let m = Material::new(Bsdf::Diffuse);
		assert!(m.albedo.is_zero());
		assert!(!m.is_emissive());
	}

	#[test]
	fn with_emissive_sets_flag() {
		let m = Material::new(Bsdf::Diffuse).with_emissive(Attribute::constant(crate::math::Vec3::splat(2.0)));
		assert!(m.is_emissive());
		assert!(m.flags.contains(MaterialFlags::HAS_EMISSIVE));
	}
}
