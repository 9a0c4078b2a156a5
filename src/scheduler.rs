//! Thin wrapper over a `rayon` thread pool, matching the engine's
//! submit/wait job-scheduler shape instead of calling
//! `rayon` directly from the dispatcher.

pub struct Scheduler {
	pool: rayon::ThreadPool,
}

impl Scheduler {
	/// Builds a scheduler with `threads` workers; `0` defers to rayon's
	/// own default (the number of logical cores).
	pub fn new(threads: usize) -> Self {
		let mut builder = rayon::ThreadPoolBuilder::new();
		if threads > 0 {
			builder = builder.num_threads(threads);
		}
		let pool = builder.build().expect("failed to build render thread pool");
		Self { pool }
	}

	/// Runs `job` once, blocking the caller until it completes.
	pub fn submit<F: FnOnce() + Send>(&self, job: F) {
		self.pool.install(job);
	}

	/// Runs `job` once on a pool thread, returning its result to the caller.
	pub fn run<R: Send>(&self, job: impl FnOnce() -> R + Send) -> R {
		self.pool.install(job)
	}

	/// Runs `job` over every item in `items` in parallel, blocking the
	/// caller until every invocation has completed.
	pub fn submit_many<T: Sync>(&self, items: &[T], job: impl Fn(&T) + Sync) {
		use rayon::prelude::*;
		self.pool.install(|| {
			items.par_iter().for_each(|item| job(item));
		});
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::atomic::{AtomicU32, Ordering};

	#[test]
	fn submit_many_visits_every_item() {
		let scheduler = Scheduler::new(2);
		let items = vec![1, 2, 3, 4, 5];
		let total = AtomicU32::new(0);
		scheduler.submit_many(&items, |i| {
			total.fetch_add(*i as u32, Ordering::Relaxed);
		});
		assert_eq!(total.load(Ordering::Relaxed), 15);
	}
}
