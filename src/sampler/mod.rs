//! Random and low-discrepancy sample generators.
//!
//! A [`Sampler2D`] hands out exactly `nextPowerOfTwoSquare(n)` pairs in
//! `[0,1)^2`, possibly more than requested — callers consume it as an
//! iterator and stop once they have enough. `Stratified` is the exception:
//! its count is `strata*strata`, taken directly from the configured grid
//! size rather than derived from the requested sample count.

mod random;
mod stratified;
mod halton;
mod hammersley;

pub use random::Random1D;
pub use stratified::Stratified;
pub use halton::Halton;
pub use hammersley::Hammersley;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingMethod {
	Random,
	Stratified,
	Halton,
	Hammersley,
}

impl Default for SamplingMethod {
	fn default() -> Self {
		SamplingMethod::Random
	}
}

/// The smallest `k*k >= n`.
pub fn next_power_of_two_square(n: u32) -> u32 {
	let mut k = 1u32;
	while k * k < n {
		k += 1;
	}
	k * k
}

/// Produces pairs of canonical samples in `[0,1)^2`; exhausted samplers
/// simply stop yielding, matching Rust's fused-iterator convention instead
/// of panicking on over-consumption.
pub trait Sampler2D: Iterator<Item = (f32, f32)> {
	/// Number of samples this instance will actually produce.
	fn len(&self) -> usize;
}

/// Builds the configured 2D sampler for `requested` samples, using `rng`
/// to seed the random components it needs.
pub fn build(method: SamplingMethod, requested: u32, strata: u32, rng: &mut impl rand::Rng) -> Box<dyn Sampler2D> {
	match method {
		SamplingMethod::Random => Box::new(random::Random2D::new(requested, rng)),
		SamplingMethod::Stratified => Box::new(Stratified::new(requested, strata.max(1), rng)),
		SamplingMethod::Halton => Box::new(Halton::new(requested)),
		SamplingMethod::Hammersley => Box::new(Hammersley::new(requested)),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn next_power_of_two_square_rounds_up() {
		assert_eq!(next_power_of_two_square(1), 1);
		assert_eq!(next_power_of_two_square(4), 4);
		assert_eq!(next_power_of_two_square(5), 9);
		assert_eq!(next_power_of_two_square(10), 16);
	}
}
