//! Pinhole camera: maps a framebuffer pixel plus a subpixel jitter sample
//! to a primary ray in world space.

use crate::math::{deg_to_rad, look_to, Mat3, Ray, Vec3};

pub struct Camera {
	pub position: Vec3,
	/// Camera-to-world rotation; column Z is the view direction.
	orientation: Mat3,
	tan_half_fov_y: f32,
	aspect_ratio: f32,
}

impl Camera {
	pub fn new(position: Vec3, look_at: Vec3, world_up: Vec3, vertical_fov_degrees: f32, width: usize, height: usize) -> Self {
		let forward = (look_at - position).normalize();
		let orientation = look_to(forward, world_up);
		let tan_half_fov_y = (deg_to_rad(vertical_fov_degrees) * 0.5).tan();
		Self { position, orientation, tan_half_fov_y, aspect_ratio: width as f32 / height as f32 }
	}

	/// Builds the primary ray for pixel `(x, y)` out of `width x height`,
	/// offset within the pixel by `(jitter_x, jitter_y)` in `[0, 1)`.
	pub fn primary_ray(&self, x: usize, y: usize, width: usize, height: usize, jitter_x: f32, jitter_y: f32) -> Ray {
		let ndc_x = ((x as f32 + jitter_x) / width as f32) * 2.0 - 1.0;
		let ndc_y = 1.0 - ((y as f32 + jitter_y) / height as f32) * 2.0;

		let camera_space = Vec3::new(
			ndc_x * self.tan_half_fov_y * self.aspect_ratio,
			ndc_y * self.tan_half_fov_y,
			1.0,
		);
		let direction = *(self.orientation * camera_space).normalize();
		Ray::new(self.position, direction)
	}
}
