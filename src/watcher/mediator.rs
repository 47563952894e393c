//! Path-masking table suppressing the watcher's echo of this device's own
//! writes. Uses a next/postponed double buffer so a burst of self-writes
//! can't starve a genuinely external edit to the same path arriving in the
//! same window.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::Mutex;

const MASK_WINDOW: Duration = Duration::from_millis(500);

struct Buffers {
	current: HashSet<PathBuf>,
	postponed: HashSet<PathBuf>,
}

pub struct Mediator {
	buffers: Mutex<Buffers>,
}

impl Mediator {
	pub fn new() -> Self {
		Mediator { buffers: Mutex::new(Buffers { current: HashSet::new(), postponed: HashSet::new() }) }
	}

	/// Called by the file I/O actor right after it wrote `path` itself.
	pub async fn push(&self, path: &Path) {
		let mut guard = self.buffers.lock().await;
		guard.current.insert(path.to_path_buf());
	}

	/// Called by the watcher before emitting an event for `path`: returns
	/// `true` if the event should be suppressed as a self-write echo.
	pub async fn should_mask(&self, path: &Path) -> bool {
		let mut guard = self.buffers.lock().await;
		if guard.current.remove(path) {
			// Keep masking this path through the swap in case the
			// filesystem event arrives split across the window boundary.
			guard.postponed.insert(path.to_path_buf());
			return true;
		}
		guard.postponed.remove(path)
	}

	/// Swaps `postponed` into `current`'s slot and clears the old postponed
	/// set, run on a fixed tick by the background task `spawn_ticker`
	/// starts.
	pub async fn swap(&self) {
		let mut guard = self.buffers.lock().await;
		guard.postponed.clear();
		std::mem::swap(&mut guard.current, &mut guard.postponed);
	}

	pub fn spawn_ticker(self: std::sync::Arc<Self>) -> tokio::task::JoinHandle<()> {
		tokio::spawn(async move {
			let mut interval = tokio::time::interval(MASK_WINDOW);
			loop {
				interval.tick().await;
				self.swap().await;
			}
		})
	}
}

impl Default for Mediator {
	fn default() -> Self {
		Self::new()
	}
}


// vim: ts=4
