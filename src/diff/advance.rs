//! Advancement diffs: moving a file through its download lifecycle, from the
//! resolver's verdict to a fully materialized local copy.

use crate::diff::ApplyEffect;
use crate::error::ApplyError;
use crate::model::{Cluster, FileInfo};
use uuid::Uuid;

/// Starts a local copy of a remote file: creates (or overwrites) the local
/// entry with `source` pointing at the remote `FileInfo` it is being pulled
/// from, `local: false` until `finish_file` confirms it on disk.
#[derive(Debug)]
pub struct Advance {
	pub folder_info: Uuid,
	pub file: FileInfo,
}

impl ApplyEffect for Advance {
	fn apply_effect(&self, cluster: &mut Cluster) -> Result<(), ApplyError> {
		let fi = cluster
			.folder_infos
			.get_mut(&self.folder_info)
			.ok_or_else(|| ApplyError::UnknownReferent { kind: "folder_info", id: self.folder_info.to_string() })?;
		fi.upsert(self.file.clone());
		Ok(())
	}
}

/// Marks a file as fully downloaded and verified: clears `source`, flips
/// `local` to true, and fills every slot of `block_available`.
#[derive(Debug)]
pub struct FinishFile {
	pub folder_info: Uuid,
	pub name: String,
}

impl ApplyEffect for FinishFile {
	fn apply_effect(&self, cluster: &mut Cluster) -> Result<(), ApplyError> {
		let fi = cluster
			.folder_infos
			.get_mut(&self.folder_info)
			.ok_or_else(|| ApplyError::UnknownReferent { kind: "folder_info", id: self.folder_info.to_string() })?;
		let mut file = fi
			.get(&self.name)
			.cloned()
			.ok_or_else(|| ApplyError::UnknownReferent { kind: "file", id: self.name.clone() })?;
		file.local = true;
		file.locked = false;
		file.source = None;
		file.block_available = vec![true; file.blocks.len()];
		fi.upsert(file);
		Ok(())
	}
}


// vim: ts=4
