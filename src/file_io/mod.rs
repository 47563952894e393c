//! The file I/O actor: every on-disk mutation goes through here so it can
//! be serialized behind one mailbox and so writes can notify the watcher
//! mediator to suppress the resulting self-write echo event.

use crate::error::IoActorError;
use crate::watcher::mediator::Mediator;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs::File;
use tokio::io::{AsyncSeekExt, AsyncWriteExt};

const TEMP_SUFFIX: &str = ".syncspirit-tmp";

pub fn temp_path(final_path: &Path) -> PathBuf {
	let mut name = final_path.file_name().unwrap_or_default().to_os_string();
	name.push(TEMP_SUFFIX);
	final_path.with_file_name(name)
}

struct OpenHandle {
	path: PathBuf,
	file: File,
}

/// Hand-rolled LRU of open write handles, bounded so a long-running sync
/// never accumulates unbounded open file descriptors.
struct HandleCache {
	capacity: usize,
	order: VecDeque<PathBuf>,
	handles: std::collections::HashMap<PathBuf, OpenHandle>,
}

impl HandleCache {
	fn new(capacity: usize) -> Self {
		HandleCache { capacity, order: VecDeque::new(), handles: std::collections::HashMap::new() }
	}

	fn touch(&mut self, path: &Path) {
		if let Some(pos) = self.order.iter().position(|p| p == path) {
			self.order.remove(pos);
		}
		self.order.push_back(path.to_path_buf());
	}

	async fn evict_if_needed(&mut self) {
		while self.handles.len() > self.capacity {
			if let Some(oldest) = self.order.pop_front() {
				if let Some(mut handle) = self.handles.remove(&oldest) {
					let _ = handle.file.flush().await;
				}
			} else {
				break;
			}
		}
	}
}

pub struct IoActor {
	cache: tokio::sync::Mutex<HandleCache>,
	mediator: Arc<Mediator>,
}

impl IoActor {
	pub fn new(mediator: Arc<Mediator>, handle_capacity: usize) -> Self {
		IoActor { cache: tokio::sync::Mutex::new(HandleCache::new(handle_capacity)), mediator }
	}

	pub async fn open_write(&self, path: &Path) -> Result<(), IoActorError> {
		let tmp = temp_path(path);
		let file = File::create(&tmp)
			.await
			.map_err(|e| IoActorError::Io { op: "open_write", path: tmp.display().to_string(), source: e })?;

		let mut cache = self.cache.lock().await;
		cache.handles.insert(tmp.clone(), OpenHandle { path: tmp.clone(), file });
		cache.touch(&tmp);
		cache.evict_if_needed().await;
		Ok(())
	}

	pub async fn write_at(&self, path: &Path, offset: u64, data: &[u8]) -> Result<(), IoActorError> {
		let tmp = temp_path(path);
		let mut cache = self.cache.lock().await;
		let handle = cache
			.handles
			.get_mut(&tmp)
			.ok_or_else(|| IoActorError::Io {
				op: "write_at",
				path: tmp.display().to_string(),
				source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not open for write"),
			})?;

		handle
			.file
			.seek(std::io::SeekFrom::Start(offset))
			.await
			.map_err(|e| IoActorError::Io { op: "write_at(seek)", path: tmp.display().to_string(), source: e })?;
		handle
			.file
			.write_all(data)
			.await
			.map_err(|e| IoActorError::Io { op: "write_at", path: tmp.display().to_string(), source: e })?;

		self.mediator.push(path).await;
		Ok(())
	}

	pub async fn close(&self, path: &Path) -> Result<(), IoActorError> {
		let tmp = temp_path(path);
		let mut cache = self.cache.lock().await;
		if let Some(mut handle) = cache.handles.remove(&tmp) {
			handle
				.file
				.flush()
				.await
				.map_err(|e| IoActorError::Io { op: "close", path: handle.path.display().to_string(), source: e })?;
		}
		Ok(())
	}

	/// Verifies the temp file's content hash against `expected` before
	/// renaming it into place; on mismatch the temp file is left behind for
	/// inspection rather than silently discarded.
	pub async fn commit(&self, path: &Path, expected: &crate::model::Sha256) -> Result<(), IoActorError> {
		let tmp = temp_path(path);
		self.close(path).await?;

		let data = tokio::fs::read(&tmp)
			.await
			.map_err(|e| IoActorError::Io { op: "commit(read)", path: tmp.display().to_string(), source: e })?;
		let actual = crate::hasher::strong_hash(&data);
		if &actual != expected {
			return Err(IoActorError::DigestMismatch { path: path.display().to_string() });
		}

		self.rename_atomic(&tmp, path).await
	}

	pub async fn rename_atomic(&self, from: &Path, to: &Path) -> Result<(), IoActorError> {
		tokio::fs::rename(from, to)
			.await
			.map_err(|e| IoActorError::Io { op: "rename_atomic", path: to.display().to_string(), source: e })?;
		self.mediator.push(to).await;
		Ok(())
	}

	pub async fn delete(&self, path: &Path) -> Result<(), IoActorError> {
		match tokio::fs::remove_file(path).await {
			Ok(()) => {}
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
			Err(e) => return Err(IoActorError::Io { op: "delete", path: path.display().to_string(), source: e }),
		}
		self.mediator.push(path).await;
		Ok(())
	}

	pub async fn create_dir(&self, path: &Path) -> Result<(), IoActorError> {
		tokio::fs::create_dir_all(path)
			.await
			.map_err(|e| IoActorError::Io { op: "create_dir", path: path.display().to_string(), source: e })
	}

	#[cfg(unix)]
	pub async fn create_symlink(&self, target: &Path, link: &Path) -> Result<(), IoActorError> {
		tokio::fs::symlink(target, link)
			.await
			.map_err(|e| IoActorError::Io { op: "create_symlink", path: link.display().to_string(), source: e })
	}

	#[cfg(unix)]
	pub async fn set_permissions(&self, path: &Path, mode: u32) -> Result<(), IoActorError> {
		use std::os::unix::fs::PermissionsExt;
		let perms = std::fs::Permissions::from_mode(mode);
		tokio::fs::set_permissions(path, perms)
			.await
			.map_err(|e| IoActorError::Io { op: "set_permissions", path: path.display().to_string(), source: e })
	}

	pub async fn set_mtime(&self, path: &Path, modified_s: i64) -> Result<(), IoActorError> {
		let ft = filetime::FileTime::from_unix_time(modified_s, 0);
		let path = path.to_path_buf();
		tokio::task::spawn_blocking(move || filetime::set_file_mtime(&path, ft))
			.await
			.expect("blocking task panicked")
			.map_err(|e| IoActorError::Io { op: "set_mtime", path: "<file>".to_string(), source: e })
	}
}


// vim: ts=4
