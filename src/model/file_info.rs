//! Per-file metadata as tracked inside one folder's index.

use crate::model::{Sha256, Version};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum FileType {
	File,
	Directory,
	Symlink,
}

/// One entry in a folder's index: a file, directory, or symlink, local or
/// remote, live or tombstoned.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct FileInfo {
	pub id: Uuid,
	pub folder_info: Uuid,
	pub name: String,
	pub file_type: FileType,
	pub size: u64,
	pub block_size: u32,
	pub permissions: u32,
	pub modified_s: i64,
	pub modified_ns: u32,
	pub version: Version,
	pub deleted: bool,
	pub invalid: bool,
	pub no_permissions: bool,
	pub symlink_target: Option<String>,
	pub blocks: Vec<Sha256>,
	/// Position within this entry's `FolderInfo`; `FolderInfo::max_sequence`
	/// tracks the largest one seen.
	pub sequence: u64,
	/// Scanned and confirmed present on disk. A file learned about from a
	/// peer but never locally scanned is not yet eligible for resolution.
	pub local: bool,
	/// Set while an I/O actor has the file open for writing; the resolver
	/// and the file iterator both treat a locked file as busy.
	pub locked: bool,
	/// Per-block local availability, parallel to `blocks`. Empty until the
	/// file is locally known; a block at index N being absent means it still
	/// has to come from a peer or be cloned from elsewhere in the file.
	pub block_available: Vec<bool>,
	/// The `FileInfo` this entry is being built from when it is a local copy
	/// in progress of a peer's file — cleared once `finish_file` lands.
	pub source: Option<Uuid>,
}

impl FileInfo {
	/// The device that owns the current best counter in `version` — always
	/// recomputed, never stored independently, so it cannot drift from the
	/// version it is derived from.
	pub fn modified_by(&self) -> Option<Sha256> {
		self.version.best_counter().map(|c| c.device)
	}

	pub fn block_count(&self) -> u32 {
		self.blocks.len() as u32
	}
}

/// Names BEP reserves or that this implementation uses for its own
/// bookkeeping; files with these names are never synced as ordinary entries.
pub fn is_reserved_name(name: &str) -> bool {
	name == ".stfolder"
		|| name == ".stignore"
		|| name == ".stversions"
		|| name.starts_with(".syncspirit")
}

/// A name already carrying a `sync-conflict` suffix — i.e. the result of a
/// prior resolution. Conflict suffixes never nest.
pub fn is_conflict_name(name: &str) -> bool {
	name.contains(".sync-conflict-")
}

/// `basename.sync-conflict-YYYYMMDD-HHMMSS-XXXXXXX.ext`, where the 7-char
/// suffix is the first 7 characters of the winning peer's device id, base32
/// encoded, matching BEP's established naming convention.
pub fn conflict_name(name: &str, when_unix_s: i64, winner: &Sha256) -> String {
	use std::time::{Duration, UNIX_EPOCH};

	let dt = UNIX_EPOCH + Duration::from_secs(when_unix_s.max(0) as u64);
	let datetime = humantime_like_stamp(dt);
	let encoded = base32::encode(base32::Alphabet::RFC4648 { padding: false }, winner.as_bytes());
	let suffix = encoded[..7.min(encoded.len())].to_string();

	let path = std::path::Path::new(name);
	match (path.file_stem(), path.extension()) {
		(Some(stem), Some(ext)) => {
			format!("{}.sync-conflict-{}-{}.{}", stem.to_string_lossy(), datetime, suffix, ext.to_string_lossy())
		}
		_ => format!("{}.sync-conflict-{}-{}", name, datetime, suffix),
	}
}

fn humantime_like_stamp(time: std::time::SystemTime) -> String {
	let secs = time.duration_since(std::time::UNIX_EPOCH).unwrap_or_default().as_secs();
	let days = secs / 86400;
	let rem = secs % 86400;
	let (y, m, d) = civil_from_days(days as i64);
	let hh = rem / 3600;
	let mm = (rem % 3600) / 60;
	let ss = rem % 60;
	format!("{:04}{:02}{:02}-{:02}{:02}{:02}", y, m, d, hh, mm, ss)
}

/// Howard Hinnant's civil_from_days algorithm (days since epoch -> y/m/d),
/// used so this module has no chrono/time dependency of its own.
fn civil_from_days(z: i64) -> (i64, u32, u32) {
	let z = z + 719468;
	let era = if z >= 0 { z } else { z - 146096 } / 146097;
	let doe = (z - era * 146097) as u64;
	let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
	let y = yoe as i64 + era * 400;
	let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
	let mp = (5 * doy + 2) / 153;
	let d = (doy - (153 * mp + 2) / 5 + 1) as u32;
	let m = if mp < 10 { mp + 3 } else { mp - 9 } as u32;
	(if m <= 2 { y + 1 } else { y }, m, d)
}


// vim: ts=4
