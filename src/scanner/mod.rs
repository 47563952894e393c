//! Directory scanner: walks one folder root depth-first in normalized
//! lexicographic order and classifies each entry against the locally
//! recorded `FileInfo`.

use crate::error::ScanError;
use crate::hasher::HasherPool;
use crate::model::{FileInfo, FileType};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Suffix the file I/O actor writes in-progress downloads under; a scan must
/// never treat one of these as a finished entry of its own.
const TEMP_SUFFIX: &str = ".syncspirit-tmp";

#[derive(Debug)]
pub enum ScanResult {
	UnchangedMeta { path: PathBuf },
	ChangedMeta { path: PathBuf, file: FileInfo },
	UnknownFile { path: PathBuf, file: FileInfo },
	Removed { path: PathBuf },
	Incomplete { path: PathBuf },
	IncompleteRemoved { path: PathBuf },
	FileError { path: PathBuf, error: ScanError },
	ScanErrors(Vec<ScanError>),
}

pub struct ScanTask {
	root: PathBuf,
	hashers: Arc<HasherPool>,
	hash_limit: Arc<Semaphore>,
}

impl ScanTask {
	pub fn new(root: PathBuf, hashers: Arc<HasherPool>, requested_hashes_limit: usize) -> Self {
		ScanTask { root, hashers, hash_limit: Arc::new(Semaphore::new(requested_hashes_limit.max(1))) }
	}

	/// Walks the tree depth-first, lexicographically at each level, and
	/// returns one `ScanResult` per entry plus a terminal `Removed` for any
	/// previously known path no longer present on disk.
	pub async fn scan(&self, known: &[(String, FileInfo)]) -> Vec<ScanResult> {
		let known: HashMap<&str, &FileInfo> = known.iter().map(|(n, f)| (n.as_str(), f)).collect();
		let mut results = Vec::new();
		let mut seen = std::collections::HashSet::new();

		self.walk(&self.root, &known, &mut results, &mut seen).await;

		for name in known.keys() {
			if !seen.contains(*name) {
				results.push(ScanResult::Removed { path: PathBuf::from(name) });
			}
		}

		results
	}

	async fn walk(
		&self,
		dir: &Path,
		known: &HashMap<&str, &FileInfo>,
		results: &mut Vec<ScanResult>,
		seen: &mut std::collections::HashSet<String>,
	) {
		let mut entries = match tokio::fs::read_dir(dir).await {
			Ok(e) => e,
			Err(e) => {
				results.push(ScanResult::FileError {
					path: dir.to_path_buf(),
					error: ScanError::Io { path: dir.display().to_string(), source: e },
				});
				return;
			}
		};

		let mut names = Vec::new();
		while let Ok(Some(entry)) = entries.next_entry().await {
			names.push(entry.file_name());
		}
		names.sort();

		for name in names {
			let path = dir.join(&name);
			let rel = path.strip_prefix(&self.root).unwrap_or(&path).to_string_lossy().to_string();

			if rel.ends_with(TEMP_SUFFIX) {
				// An in-progress download; the final name is what `known`
				// and future scans track, not the temp path itself.
				seen.insert(rel.clone());
				results.push(ScanResult::Incomplete { path });
				continue;
			}
			seen.insert(rel.clone());

			let meta = match tokio::fs::symlink_metadata(&path).await {
				Ok(m) => m,
				Err(e) => {
					results.push(ScanResult::FileError {
						path: path.clone(),
						error: ScanError::Io { path: path.display().to_string(), source: e },
					});
					continue;
				}
			};

			if meta.file_type().is_symlink() {
				match self.classify_symlink(&path, &rel, known.get(rel.as_str()).copied()).await {
					Ok(result) => results.push(result),
					Err(error) => results.push(ScanResult::FileError { path, error }),
				}
				continue;
			}

			if meta.is_dir() {
				Box::pin(self.walk(&path, known, results, seen)).await;
				continue;
			}

			let known_entry = known.get(rel.as_str()).copied();
			if let Some(prior) = known_entry {
				if !metadata_changed(&meta, prior) {
					results.push(ScanResult::UnchangedMeta { path });
					continue;
				}
			}

			match self.hash_file(&path, &rel, meta.len()).await {
				Ok(file) => {
					let result = if known_entry.is_some() {
						ScanResult::ChangedMeta { path, file }
					} else {
						ScanResult::UnknownFile { path, file }
					};
					results.push(result);
				}
				Err(error) => results.push(ScanResult::FileError { path, error }),
			}
		}
	}

	async fn classify_symlink(
		&self,
		path: &Path,
		rel: &str,
		known: Option<&FileInfo>,
	) -> Result<ScanResult, ScanError> {
		let target = tokio::fs::read_link(path)
			.await
			.map_err(|e| ScanError::Io { path: path.display().to_string(), source: e })?
			.to_string_lossy()
			.to_string();

		if let Some(prior) = known {
			if prior.symlink_target.as_deref() == Some(target.as_str()) {
				return Ok(ScanResult::UnchangedMeta { path: path.to_path_buf() });
			}
		}

		let file = FileInfo {
			id: uuid::Uuid::new_v4(),
			folder_info: uuid::Uuid::nil(),
			name: rel.to_string(),
			file_type: FileType::Symlink,
			size: 0,
			block_size: 0,
			permissions: 0,
			modified_s: 0,
			modified_ns: 0,
			version: crate::model::Version::empty(),
			deleted: false,
			invalid: false,
			no_permissions: false,
			symlink_target: Some(target),
			blocks: Vec::new(),
			sequence: 0,
			local: true,
			locked: false,
			block_available: Vec::new(),
			source: None,
		};
		Ok(if known.is_some() { ScanResult::ChangedMeta { path: path.to_path_buf(), file } } else { ScanResult::UnknownFile { path: path.to_path_buf(), file } })
	}

	async fn hash_file(&self, path: &Path, rel: &str, size: u64) -> Result<FileInfo, ScanError> {
		use tokio::io::AsyncReadExt;

		let block_size = crate::hasher::block_size_for(size, None);
		let mut file = tokio::fs::File::open(path)
			.await
			.map_err(|e| ScanError::Io { path: path.display().to_string(), source: e })?;

		let mut blocks = Vec::new();
		let mut buf = vec![0u8; block_size as usize];
		loop {
			let _permit = self.hash_limit.acquire().await.expect("semaphore never closed");
			let n = file
				.read(&mut buf)
				.await
				.map_err(|e| ScanError::Io { path: path.display().to_string(), source: e })?;
			if n == 0 {
				break;
			}
			let (hash, _weak) = self
				.hashers
				.hash(buf[..n].to_vec())
				.await
				.map_err(|e| ScanError::HashFailed { path: path.display().to_string(), message: e.to_string() })?;
			blocks.push(hash);
		}

		let meta = tokio::fs::metadata(path).await.map_err(|e| ScanError::Io { path: path.display().to_string(), source: e })?;
		let modified_s = mtime_of(&meta);
		let block_count = blocks.len();

		Ok(FileInfo {
			id: uuid::Uuid::new_v4(),
			folder_info: uuid::Uuid::nil(),
			name: rel.to_string(),
			file_type: FileType::File,
			size,
			block_size,
			permissions: mode_of(&meta),
			modified_s,
			modified_ns: 0,
			version: crate::model::Version::empty(),
			deleted: false,
			invalid: false,
			no_permissions: false,
			symlink_target: None,
			blocks,
			sequence: 0,
			local: true,
			locked: false,
			block_available: vec![true; block_count],
			source: None,
		})
	}
}

/// True if either size or mtime disagrees with the previously recorded entry
/// — the cheap check a scan does before paying for a rehash.
fn metadata_changed(meta: &std::fs::Metadata, prior: &FileInfo) -> bool {
	meta.len() != prior.size || mtime_of(meta) != prior.modified_s
}

fn mtime_of(meta: &std::fs::Metadata) -> i64 {
	filetime::FileTime::from_last_modification_time(meta).unix_seconds()
}

#[cfg(unix)]
fn mode_of(meta: &std::fs::Metadata) -> u32 {
	use std::os::unix::fs::PermissionsExt;
	meta.permissions().mode()
}

#[cfg(not(unix))]
fn mode_of(_meta: &std::fs::Metadata) -> u32 {
	0o644
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn scans_a_small_tree_and_hashes_files() {
		let dir = tempfile::tempdir().unwrap();
		tokio::fs::write(dir.path().join("a.txt"), b"hello world").await.unwrap();
		tokio::fs::create_dir(dir.path().join("sub")).await.unwrap();
		tokio::fs::write(dir.path().join("sub/b.txt"), b"nested").await.unwrap();

		let hashers = HasherPool::spawn(1, 2);
		let task = ScanTask::new(dir.path().to_path_buf(), hashers, 4);
		let results = task.scan(&[]).await;

		let unknown = results.iter().filter(|r| matches!(r, ScanResult::UnknownFile { .. })).count();
		assert_eq!(unknown, 2);
	}

	#[tokio::test]
	async fn missing_known_path_is_reported_removed() {
		let dir = tempfile::tempdir().unwrap();
		let hashers = HasherPool::spawn(1, 2);
		let task = ScanTask::new(dir.path().to_path_buf(), hashers, 4);

		let known_file = FileInfo {
			id: uuid::Uuid::new_v4(),
			folder_info: uuid::Uuid::nil(),
			name: "gone.txt".into(),
			file_type: FileType::File,
			size: 0,
			block_size: 131072,
			permissions: 0o644,
			modified_s: 0,
			modified_ns: 0,
			version: crate::model::Version::empty(),
			deleted: false,
			invalid: false,
			no_permissions: false,
			symlink_target: None,
			blocks: vec![],
			sequence: 0,
			local: true,
			locked: false,
			block_available: vec![],
			source: None,
		};
		let results = task.scan(&[("gone.txt".to_string(), known_file)]).await;
		assert!(results.iter().any(|r| matches!(r, ScanResult::Removed { .. })));
	}

	#[tokio::test]
	async fn an_unmodified_known_file_reports_unchanged_meta() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("a.txt");
		tokio::fs::write(&path, b"hello world").await.unwrap();
		let meta = tokio::fs::metadata(&path).await.unwrap();

		let hashers = HasherPool::spawn(1, 2);
		let task = ScanTask::new(dir.path().to_path_buf(), hashers, 4);

		let known_file = FileInfo {
			id: uuid::Uuid::new_v4(),
			folder_info: uuid::Uuid::nil(),
			name: "a.txt".into(),
			file_type: FileType::File,
			size: meta.len(),
			block_size: 131072,
			permissions: 0o644,
			modified_s: mtime_of(&meta),
			modified_ns: 0,
			version: crate::model::Version::empty(),
			deleted: false,
			invalid: false,
			no_permissions: false,
			symlink_target: None,
			blocks: vec![],
			sequence: 0,
			local: true,
			locked: false,
			block_available: vec![],
			source: None,
		};

		let results = task.scan(&[("a.txt".to_string(), known_file)]).await;
		assert!(results.iter().any(|r| matches!(r, ScanResult::UnchangedMeta { .. })));
		assert!(!results.iter().any(|r| matches!(r, ScanResult::UnknownFile { .. } | ScanResult::ChangedMeta { .. })));
	}

	#[tokio::test]
	async fn a_known_file_with_a_different_size_reports_changed_meta() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("a.txt");
		tokio::fs::write(&path, b"hello world").await.unwrap();

		let hashers = HasherPool::spawn(1, 2);
		let task = ScanTask::new(dir.path().to_path_buf(), hashers, 4);

		let known_file = FileInfo {
			id: uuid::Uuid::new_v4(),
			folder_info: uuid::Uuid::nil(),
			name: "a.txt".into(),
			file_type: FileType::File,
			size: 0,
			block_size: 131072,
			permissions: 0o644,
			modified_s: 0,
			modified_ns: 0,
			version: crate::model::Version::empty(),
			deleted: false,
			invalid: false,
			no_permissions: false,
			symlink_target: None,
			blocks: vec![],
			sequence: 0,
			local: true,
			locked: false,
			block_available: vec![],
			source: None,
		};

		let results = task.scan(&[("a.txt".to_string(), known_file)]).await;
		assert!(results.iter().any(|r| matches!(r, ScanResult::ChangedMeta { .. })));
	}

	#[tokio::test]
	async fn an_incomplete_temp_file_is_reported_and_not_hashed() {
		let dir = tempfile::tempdir().unwrap();
		tokio::fs::write(dir.path().join("a.txt.syncspirit-tmp"), b"partial").await.unwrap();

		let hashers = HasherPool::spawn(1, 2);
		let task = ScanTask::new(dir.path().to_path_buf(), hashers, 4);
		let results = task.scan(&[]).await;

		assert!(results.iter().any(|r| matches!(r, ScanResult::Incomplete { .. })));
		assert!(!results.iter().any(|r| matches!(r, ScanResult::UnknownFile { .. })));
	}
}

// vim: ts=4
