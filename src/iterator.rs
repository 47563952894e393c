//! Per-peer file iterator: a pull-order-aware frontier cursor, round-robin
//! across shared folders. Grounded on the teacher's `chunk_tracker.rs`
//! shape — a plain tracked-state struct with explicit mutation methods and
//! no hidden async.

use crate::model::{FileInfo, PullOrder};
use std::collections::VecDeque;
use uuid::Uuid;

pub struct PeerCursor {
	folders: VecDeque<Uuid>,
	frontiers: std::collections::HashMap<Uuid, Vec<FileEntry>>,
	orders: std::collections::HashMap<Uuid, PullOrder>,
}

#[derive(Clone)]
struct FileEntry {
	name: String,
	is_dir: bool,
	deleted: bool,
	size: u64,
	modified_s: i64,
	/// Handed out by a prior `next()` and not yet released — skipped until
	/// `complete` or `release` clears it, so the same work never gets
	/// dispatched to two in-flight requests at once.
	locked: bool,
	/// Parent replaced by a file, permission denied, or some other local
	/// obstacle; skipped until `mark_reachable` clears it.
	unreachable: bool,
}

impl PeerCursor {
	pub fn new() -> Self {
		PeerCursor {
			folders: VecDeque::new(),
			frontiers: std::collections::HashMap::new(),
			orders: std::collections::HashMap::new(),
		}
	}

	pub fn register_folder(&mut self, folder: Uuid, order: PullOrder) {
		if !self.folders.contains(&folder) {
			self.folders.push_back(folder);
		}
		self.orders.insert(folder, order);
		self.frontiers.entry(folder).or_default();
	}

	/// Re-sorts the frontier for `folder` whenever a file is learned about
	/// or updated: directories first, deleted last, then the order-specific
	/// key.
	pub fn on_upsert(&mut self, folder: Uuid, file: &FileInfo) {
		let order = *self.orders.get(&folder).unwrap_or(&PullOrder::Random);
		let entry = FileEntry {
			name: file.name.clone(),
			is_dir: matches!(file.file_type, crate::model::FileType::Directory),
			deleted: file.deleted,
			size: file.size,
			modified_s: file.modified_s,
			locked: false,
			unreachable: false,
		};

		let frontier = self.frontiers.entry(folder).or_default();
		frontier.retain(|e| e.name != entry.name);
		frontier.push(entry);
		sort_frontier(frontier, order);
	}

	/// Rotates to the next folder and hands out its first entry that is
	/// neither locked nor unreachable, locking it in the process so a second
	/// call before `complete`/`release` moves on to a different entry (or a
	/// different folder) instead of handing out the same work twice.
	pub fn next(&mut self) -> Option<(Uuid, String)> {
		for _ in 0..self.folders.len() {
			let folder = self.folders.pop_front()?;
			self.folders.push_back(folder);
			if let Some(frontier) = self.frontiers.get_mut(&folder) {
				if let Some(entry) = frontier.iter_mut().find(|e| !e.locked && !e.unreachable) {
					entry.locked = true;
					return Some((folder, entry.name.clone()));
				}
			}
		}
		None
	}

	/// The entry has been fully applied (or was a tombstone with nothing
	/// left to do); drop it from the frontier entirely.
	pub fn complete(&mut self, folder: Uuid, name: &str) {
		if let Some(frontier) = self.frontiers.get_mut(&folder) {
			frontier.retain(|e| e.name != name);
		}
	}

	/// The in-flight attempt didn't finish (e.g. the peer disconnected);
	/// unlock the entry so it is eligible for a future `next()` again.
	pub fn release(&mut self, folder: Uuid, name: &str) {
		if let Some(frontier) = self.frontiers.get_mut(&folder) {
			if let Some(entry) = frontier.iter_mut().find(|e| e.name == name) {
				entry.locked = false;
			}
		}
	}

	/// Removes the entry from consideration until `mark_reachable` clears
	/// it — used when the resolver reports the local path is blocked.
	pub fn mark_unreachable(&mut self, folder: Uuid, name: &str) {
		if let Some(frontier) = self.frontiers.get_mut(&folder) {
			if let Some(entry) = frontier.iter_mut().find(|e| e.name == name) {
				entry.unreachable = true;
				entry.locked = false;
			}
		}
	}

	pub fn mark_reachable(&mut self, folder: Uuid, name: &str) {
		if let Some(frontier) = self.frontiers.get_mut(&folder) {
			if let Some(entry) = frontier.iter_mut().find(|e| e.name == name) {
				entry.unreachable = false;
			}
		}
	}
}

impl Default for PeerCursor {
	fn default() -> Self {
		Self::new()
	}
}

fn sort_frontier(frontier: &mut [FileEntry], order: PullOrder) {
	frontier.sort_by(|a, b| {
		// directories before files, deleted always last
		match (a.deleted, b.deleted) {
			(false, true) => return std::cmp::Ordering::Less,
			(true, false) => return std::cmp::Ordering::Greater,
			_ => {}
		}
		match (a.is_dir, b.is_dir) {
			(true, false) => return std::cmp::Ordering::Less,
			(false, true) => return std::cmp::Ordering::Greater,
			_ => {}
		}
		match order {
			PullOrder::Random | PullOrder::Alphabetic => a.name.cmp(&b.name),
			PullOrder::Smallest => a.size.cmp(&b.size).then_with(|| a.name.cmp(&b.name)),
			PullOrder::Largest => b.size.cmp(&a.size).then_with(|| a.name.cmp(&b.name)),
			PullOrder::Oldest => a.modified_s.cmp(&b.modified_s).then_with(|| a.name.cmp(&b.name)),
			PullOrder::Newest => b.modified_s.cmp(&a.modified_s).then_with(|| a.name.cmp(&b.name)),
		}
	});
}


// vim: ts=4
