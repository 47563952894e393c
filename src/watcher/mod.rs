//! Filesystem watching: a backend-agnostic event type, a pure coalescing
//! function over a small event buffer, and the self-write-masking mediator.

pub mod mediator;

use crate::error::WatchError;
use std::path::PathBuf;
use std::time::Duration;

/// How long a raw event sits in the coalescing buffer before it's flushed,
/// long enough to absorb the usual remove+create rename pattern without
/// meaningfully delaying propagation.
pub const COALESCE_WINDOW: Duration = Duration::from_millis(150);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
	Create,
	Write,
	Remove,
	Rename,
}

#[derive(Debug, Clone)]
pub struct FileChangeEvent {
	pub kind: EventKind,
	pub path: PathBuf,
	pub prev_path: Option<PathBuf>,
}

/// Coalesces a burst of raw events for the same path within one window:
/// create+remove cancels out, write+write collapses to one write,
/// remove+create collapses to a rename (content replaced in place).
pub fn coalesce(events: Vec<FileChangeEvent>) -> Vec<FileChangeEvent> {
	let mut order: Vec<PathBuf> = Vec::new();
	let mut by_path: std::collections::HashMap<PathBuf, FileChangeEvent> = std::collections::HashMap::new();

	for ev in events {
		match by_path.get(&ev.path) {
			None => {
				order.push(ev.path.clone());
				by_path.insert(ev.path.clone(), ev);
			}
			Some(existing) => {
				let merged = merge(existing.clone(), ev.clone());
				by_path.insert(ev.path, merged);
			}
		}
	}

	order.into_iter().filter_map(|path| by_path.remove(&path)).collect()
}

fn merge(prev: FileChangeEvent, next: FileChangeEvent) -> FileChangeEvent {
	match (prev.kind, next.kind.clone()) {
		(EventKind::Create, EventKind::Remove) => {
			FileChangeEvent { kind: EventKind::Remove, path: next.path, prev_path: Some(PathBuf::new()) }
		}
		(EventKind::Remove, EventKind::Create) => {
			FileChangeEvent { kind: EventKind::Rename, path: next.path.clone(), prev_path: None }
		}
		_ => next,
	}
}

#[async_trait::async_trait]
pub trait WatchBackend: Send + Sync {
	async fn watch(&self, root: &std::path::Path) -> Result<tokio::sync::mpsc::Receiver<FileChangeEvent>, WatchError>;
}

#[cfg(target_os = "linux")]
pub struct NotifyBackend;

#[cfg(target_os = "linux")]
#[async_trait::async_trait]
impl WatchBackend for NotifyBackend {
	async fn watch(&self, root: &std::path::Path) -> Result<tokio::sync::mpsc::Receiver<FileChangeEvent>, WatchError> {
		use notify::{RecursiveMode, Watcher};

		let (raw_tx, mut raw_rx) = tokio::sync::mpsc::channel(256);
		let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
			if let Ok(event) = res {
				let _ = raw_tx.blocking_send(event);
			}
		})
		.map_err(|e| WatchError::BackendUnavailable(e.to_string()))?;

		watcher
			.watch(root, RecursiveMode::Recursive)
			.map_err(|e| WatchError::BackendUnavailable(e.to_string()))?;

		let (tx, rx) = tokio::sync::mpsc::channel(256);
		tokio::spawn(async move {
			let _watcher = watcher;
			while let Some(event) = raw_rx.recv().await {
				let kind = match event.kind {
					notify::EventKind::Create(_) => EventKind::Create,
					notify::EventKind::Modify(_) => EventKind::Write,
					notify::EventKind::Remove(_) => EventKind::Remove,
					_ => continue,
				};
				for path in event.paths {
					if tx.send(FileChangeEvent { kind: kind.clone(), path, prev_path: None }).await.is_err() {
						return;
					}
				}
			}
		});

		Ok(rx)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn ev(kind: EventKind, path: &str) -> FileChangeEvent {
		FileChangeEvent { kind, path: PathBuf::from(path), prev_path: None }
	}

	#[test]
	fn repeated_writes_collapse_to_one() {
		let events = vec![ev(EventKind::Write, "a.txt"), ev(EventKind::Write, "a.txt")];
		let out = coalesce(events);
		assert_eq!(out.len(), 1);
		assert_eq!(out[0].kind, EventKind::Write);
	}

	#[test]
	fn unrelated_paths_are_kept_independent() {
		let events = vec![ev(EventKind::Write, "a.txt"), ev(EventKind::Write, "b.txt")];
		let out = coalesce(events);
		assert_eq!(out.len(), 2);
	}
}

// vim: ts=4
