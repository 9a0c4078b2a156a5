use super::random::Random1D;
use super::Sampler2D;

/// Jittered k*k grid, k strata per axis as configured. Sample `i` at
/// `((x + u) / k, (y + v) / k)` where `(x, y)` is the stratum and `(u, v)`
/// is a uniform jitter inside it.
pub struct Stratified {
	rng: Random1D,
	k: u32,
	next: u32,
	count: u32,
}

impl Stratified {
	pub fn new(_requested: u32, strata_hint: u32, seed_source: &mut impl rand::Rng) -> Self {
		let k = strata_hint.max(1);
		Self {
			rng: Random1D::new(seed_source.gen()),
			k,
			next: 0,
			count: k * k,
		}
	}
}

impl Iterator for Stratified {
	type Item = (f32, f32);

	fn next(&mut self) -> Option<Self::Item> {
		if self.next >= self.count {
			return None;
		}
		let x = self.next % self.k;
		let y = self.next / self.k;
		self.next += 1;

		let u = self.rng.next_f32();
		let v = self.rng.next_f32();
		let k = self.k as f32;

		// Clamp strictly below 1 so address-mode wrap never sees exactly 1.0.
		let one_ulp_below_one = 1.0 - f32::EPSILON;
		let sx = (((x as f32) + u) / k).min(one_ulp_below_one);
		let sy = (((y as f32) + v) / k).min(one_ulp_below_one);

		Some((sx, sy))
	}
}

impl Sampler2D for Stratified {
	fn len(&self) -> usize {
		(self.count - self.next) as usize
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;

	#[test]
	fn produces_exactly_strata_squared_samples() {
		let mut seed_rng = rand::rngs::StdRng::seed_from_u64(1);
		let s = Stratified::new(10, 4, &mut seed_rng);
		let samples: Vec<_> = s.collect();
		assert_eq!(samples.len(), 16);
	}

	#[test]
	fn every_sample_is_in_unit_square() {
		let mut seed_rng = rand::rngs::StdRng::seed_from_u64(2);
		let s = Stratified::new(9, 3, &mut seed_rng);
		for (x, y) in s {
			assert!(x >= 0.0 && x < 1.0);
			assert!(y >= 0.0 && y < 1.0);
		}
	}

	#[test]
	fn strata_hint_of_zero_still_yields_one_sample() {
		let mut seed_rng = rand::rngs::StdRng::seed_from_u64(3);
		let s = Stratified::new(9, 0, &mut seed_rng);
		let samples: Vec<_> = s.collect();
		assert_eq!(samples.len(), 1);
	}
}
