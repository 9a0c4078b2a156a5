use super::Map;

/// Box-filter then a [1 2 1; 2 4 2; 1 2 1] (normalized by 16) convolution,
/// used as the guidance image for the detail-preserving downscale below.
fn guidance_map(src: &Map) -> Vec<[f32; 3]> {
	let box_filtered: Vec<[f32; 3]> = (0..src.height)
		.flat_map(|y| {
			(0..src.width).map(move |x| {
				let mut sum = [0.0f32; 3];
				let mut n = 0.0f32;
				for dy in -1i32..=1 {
					for dx in -1i32..=1 {
						let sx = (x as i32 + dx).clamp(0, src.width as i32 - 1) as usize;
						let sy = (y as i32 + dy).clamp(0, src.height as i32 - 1) as usize;
						let t = src.texel(sx, sy);
						sum[0] += t[0];
						sum[1] += t[1];
						sum[2] += t[2];
						n += 1.0;
					}
				}
				[sum[0] / n, sum[1] / n, sum[2] / n]
			})
		})
		.collect();

	const KERNEL: [[f32; 3]; 3] = [[1.0, 2.0, 1.0], [2.0, 4.0, 2.0], [1.0, 2.0, 1.0]];
	(0..src.height)
		.flat_map(|y| {
			let box_filtered = &box_filtered;
			(0..src.width).map(move |x| {
				let mut sum = [0.0f32; 3];
				for (ky, row) in KERNEL.iter().enumerate() {
					for (kx, &w) in row.iter().enumerate() {
						let sx = (x as i32 + kx as i32 - 1).clamp(0, src.width as i32 - 1) as usize;
						let sy = (y as i32 + ky as i32 - 1).clamp(0, src.height as i32 - 1) as usize;
						let t = box_filtered[sy * src.width + sx];
						sum[0] += t[0] * w;
						sum[1] += t[1] * w;
						sum[2] += t[2] * w;
					}
				}
				[sum[0] / 16.0, sum[1] / 16.0, sum[2] / 16.0]
			})
		})
		.collect()
}

const LAMBDA: f32 = 1.0;

/// Downscales `src` to `(dst_w, dst_h)` using a detail-preserving joint
/// bilateral filter: source texels overlapping a destination texel are
/// weighted both by their fractional geometric overlap and by how close
/// they are, in the guidance image, to the destination's own guidance
/// value — so a mip level doesn't blur away a thin bright highlight.
fn downscale_to(src: &Map, dst_w: usize, dst_h: usize) -> Map {
	let guidance = guidance_map(src);
	let scale_x = src.width as f32 / dst_w as f32;
	let scale_y = src.height as f32 / dst_h as f32;

	let mut texels = Vec::with_capacity(dst_w * dst_h);

	for dy in 0..dst_h {
		let src_y0 = dy as f32 * scale_y;
		let src_y1 = src_y0 + scale_y;
		for dx in 0..dst_w {
			let src_x0 = dx as f32 * scale_x;
			let src_x1 = src_x0 + scale_x;

			// Guidance value at the destination, by nearest-sample of the
			// guidance map at the window's center.
			let cx = ((src_x0 + src_x1) * 0.5).floor().max(0.0) as usize;
			let cy = ((src_y0 + src_y1) * 0.5).floor().max(0.0) as usize;
			let cx = cx.min(src.width - 1);
			let cy = cy.min(src.height - 1);
			let ig = guidance[cy * src.width + cx];

			let mut sum = [0.0f32; 4];
			let mut weight_sum = 0.0f32;

			let x_start = src_x0.floor().max(0.0) as usize;
			let x_end = (src_x1.ceil() as usize).min(src.width);
			let y_start = src_y0.floor().max(0.0) as usize;
			let y_end = (src_y1.ceil() as usize).min(src.height);

			for sy in y_start..y_end.max(y_start + 1) {
				let overlap_y = (src_y1.min((sy + 1) as f32) - src_y0.max(sy as f32)).clamp(0.0, 1.0);
				for sx in x_start..x_end.max(x_start + 1) {
					let overlap_x = (src_x1.min((sx + 1) as f32) - src_x0.max(sx as f32)).clamp(0.0, 1.0);
					let overlap = overlap_x * overlap_y;
					if overlap <= 0.0 {
						continue;
					}

					let t = src.texel(sx.min(src.width - 1), sy.min(src.height - 1));
					let g = guidance[sy.min(src.height - 1) * src.width + sx.min(src.width - 1)];
					let dist = (((g[0] - ig[0]).powi(2) + (g[1] - ig[1]).powi(2) + (g[2] - ig[2]).powi(2)).sqrt()
						/ 3f32.sqrt())
					.powf(LAMBDA);
					let w = overlap * (1.0 - dist).max(1e-4);

					sum[0] += t[0] * w;
					sum[1] += t[1] * w;
					sum[2] += t[2] * w;
					sum[3] += t[3] * w;
					weight_sum += w;
				}
			}

			if weight_sum > 0.0 {
				for c in sum.iter_mut() {
					*c /= weight_sum;
				}
			}
			texels.push(sum);
		}
	}

	Map { width: dst_w, height: dst_h, texels }
}

pub fn build_mip_chain(mip0: Map) -> Vec<Map> {
	let mut chain = Vec::new();
	let levels = (mip0.width.max(mip0.height) as f32).log2().floor() as usize + 1;
	let mut w = mip0.width;
	let mut h = mip0.height;
	chain.push(mip0);

	for _ in 1..levels {
		w = (w / 2).max(1);
		h = (h / 2).max(1);
		let next = downscale_to(chain.last().expect("chain always has mip 0"), w, h);
		chain.push(next);
	}

	chain
}

/// Builds the `(log2 w) * (log2 h)` anisotropic rip pyramid: `rips[i][j]`
/// is downscaled by `2^(i+1)` horizontally and `2^(j+1)` vertically.
pub fn build_rip_pyramid(mip0: &Map) -> Vec<Vec<Map>> {
	let levels_x = (mip0.width as f32).log2().floor() as usize;
	let levels_y = (mip0.height as f32).log2().floor() as usize;

	let mut rips = Vec::with_capacity(levels_x);
	for i in 0..levels_x.max(1) {
		let mut row = Vec::with_capacity(levels_y.max(1));
		let w = (mip0.width >> (i + 1)).max(1);
		for j in 0..levels_y.max(1) {
			let h = (mip0.height >> (j + 1)).max(1);
			row.push(downscale_to(mip0, w, h));
		}
		rips.push(row);
	}
	rips
}

#[cfg(test)]
mod tests {
	use super::*;

	fn flat(w: usize, h: usize, v: [f32; 4]) -> Map {
		Map { width: w, height: h, texels: vec![v; w * h] }
	}

	#[test]
	fn downscale_of_flat_color_preserves_color() {
		let src = flat(4, 4, [1.0, 0.5, 0.25, 1.0]);
		let dst = downscale_to(&src, 2, 2);
		for t in &dst.texels {
			assert!((t[0] - 1.0).abs() < 1e-3);
			assert!((t[1] - 0.5).abs() < 1e-3);
			assert!((t[2] - 0.25).abs() < 1e-3);
		}
	}

	#[test]
	fn mip_chain_ends_at_one_by_one() {
		let chain = build_mip_chain(flat(8, 4, [1.0, 1.0, 1.0, 1.0]));
		let last = chain.last().unwrap();
		assert_eq!(last.width, 1);
		assert_eq!(last.height, 1);
	}
}
