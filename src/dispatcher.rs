//! Partitions a frame into tiles and renders them in parallel via
//! `rayon`, one independently-seeded RNG per tile so the
//! result is reproducible regardless of how many threads actually run it.

use rand::SeedableRng;
use rayon::prelude::*;

use crate::camera::Camera;
use crate::framebuffer::Framebuffer;
use crate::integrator::Integrator;
use crate::sampler;
use crate::scene::Scene;
use crate::scheduler::Scheduler;

const TILE_SIZE: usize = 32;

struct Tile {
	x0: usize,
	y0: usize,
	x1: usize,
	y1: usize,
	seed: u64,
}

fn partition_tiles(width: usize, height: usize) -> Vec<Tile> {
	let mut tiles = Vec::new();
	let mut seed = 0u64;
	let mut y0 = 0;
	while y0 < height {
		let y1 = (y0 + TILE_SIZE).min(height);
		let mut x0 = 0;
		while x0 < width {
			let x1 = (x0 + TILE_SIZE).min(width);
			tiles.push(Tile { x0, y0, x1, y1, seed });
			seed += 1;
			x0 = x1;
		}
		y0 = y1;
	}
	tiles
}

struct TileResult {
	x0: usize,
	y0: usize,
	width: usize,
	samples: Vec<crate::math::Vec3>,
}

fn render_tile(tile: &Tile, scene: &Scene, camera: &Camera, framebuffer_width: usize, framebuffer_height: usize) -> TileResult {
	let options = scene.get_options();
	let width = tile.x1 - tile.x0;
	let height = tile.y1 - tile.y0;
	let mut samples = vec![crate::math::Vec3::ZERO; width * height];

	let mut rng = rand::rngs::StdRng::seed_from_u64(tile.seed);

	for y in tile.y0..tile.y1 {
		for x in tile.x0..tile.x1 {
			let jitter_sampler = sampler::build(options.sampling_method, options.samples_per_pixel, options.strata, &mut rng);
			// Stratified sampling yields strata^2 samples, which may exceed
			// samples_per_pixel; round the target up to take every one of them
			// instead of truncating back down to the configured count.
			let target = (jitter_sampler.len() as u32).max(options.samples_per_pixel);
			let mut accumulated = crate::math::Vec3::ZERO;
			let mut taken = 0u32;
			for (jx, jy) in jitter_sampler {
				if taken >= target {
					break;
				}
				let jitter = options.subpixel_jitter;
				let dx = -jitter + 2.0 * jx * jitter;
				let dy = -jitter + 2.0 * jy * jitter;
				let ray = camera.primary_ray(x, y, framebuffer_width, framebuffer_height, 0.5 + dx, 0.5 + dy);
				accumulated += options.integrator.radiance(scene, ray, &mut rng);
				taken += 1;
			}
			let i = (y - tile.y0) * width + (x - tile.x0);
			samples[i] = accumulated / taken.max(1) as f32;
		}
	}

	TileResult { x0: tile.x0, y0: tile.y0, width, samples }
}

/// Renders the whole frame into `framebuffer`, overwriting any existing
/// accumulation. `scene` must already have had `commit` called on it.
pub fn render(scene: &Scene, camera: &Camera, framebuffer: &mut Framebuffer, scheduler: &Scheduler) {
	let tiles = partition_tiles(framebuffer.width, framebuffer.height);
	let (fb_width, fb_height) = (framebuffer.width, framebuffer.height);

	log::info!("dispatching {} tiles of {}x{} across the render thread pool", tiles.len(), TILE_SIZE, TILE_SIZE);

	let results: Vec<TileResult> =
		scheduler.run(|| tiles.par_iter().map(|tile| render_tile(tile, scene, camera, fb_width, fb_height)).collect());

	framebuffer.clear();
	for result in results {
		for row in 0..(result.samples.len() / result.width) {
			for col in 0..result.width {
				let radiance = result.samples[row * result.width + col];
				framebuffer.add_sample(result.x0 + col, result.y0 + row, radiance);
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn partition_tiles_covers_every_pixel_exactly_once() {
		let tiles = partition_tiles(70, 40);
		let mut covered = vec![0u32; 70 * 40];
		for tile in &tiles {
			for y in tile.y0..tile.y1 {
				for x in tile.x0..tile.x1 {
					covered[y * 70 + x] += 1;
				}
			}
		}
		assert!(covered.iter().all(|&c| c == 1));
	}

	#[test]
	fn partition_tiles_assigns_distinct_seeds() {
		let tiles = partition_tiles(70, 40);
		let mut seeds: Vec<u64> = tiles.iter().map(|t| t.seed).collect();
		seeds.sort_unstable();
		seeds.dedup();
		assert_eq!(seeds.len(), tiles.len());
	}
}
