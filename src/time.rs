//! Monotonic timing helpers used to log render/BVH-build durations. Plays
//! the role `TERRA_CLOCK()` plays in the source: an opaque tick counter
//! plus conversions to microseconds/milliseconds, built directly on
//! `std::time::Instant` rather than a platform-specific counter.

pub struct Time {
	start: std::time::Instant,
	delta: std::time::Duration,
}

impl Default for Time {
	fn default() -> Self {
		Self::new()
	}
}

impl Time {
	pub fn new() -> Self {
		let now = std::time::Instant::now();
		Time { start: now, delta: now.duration_since(now) }
	}

	pub fn update(&mut self) {
		let now = std::time::Instant::now();
		self.delta = now.duration_since(self.start);
		self.start = now;
	}

	pub fn delta_seconds(&self) -> f32 {
		self.delta.as_secs_f32()
	}
}

/// A single-shot stopwatch, used to time one BVH build or one `render()` call.
pub struct Stopwatch {
	start: std::time::Instant,
}

impl Stopwatch {
	pub fn start() -> Self {
		Self { start: std::time::Instant::now() }
	}

	pub fn elapsed_ms(&self) -> f64 {
		self.start.elapsed().as_secs_f64() * 1000.0
	}

	pub fn elapsed_us(&self) -> f64 {
		self.start.elapsed().as_secs_f64() * 1_000_000.0
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn fresh_time_has_zero_delta() {
		let t = Time::new();
		assert_eq!(t.delta_seconds(), 0.0);
	}

	#[test]
	fn stopwatch_reports_nonnegative_elapsed_time() {
		let sw = Stopwatch::start();
		assert!(sw.elapsed_us() >= 0.0);
	}
}
