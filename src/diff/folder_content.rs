//! Per-folder index diffs: a device's view of one file changing, and a
//! whole `FolderInfo` being dropped (device unshared from a folder).

use crate::diff::ApplyEffect;
use crate::error::ApplyError;
use crate::model::{Cluster, FileInfo, FolderInfo, Sha256};
use uuid::Uuid;

#[derive(Debug)]
pub struct UpsertFile {
	pub folder_info: Uuid,
	pub folder: Uuid,
	pub device: Sha256,
	pub index_id: u64,
	pub file: FileInfo,
}

impl ApplyEffect for UpsertFile {
	fn apply_effect(&self, cluster: &mut Cluster) -> Result<(), ApplyError> {
		if !cluster.folders.contains_key(&self.folder) {
			return Err(ApplyError::UnknownReferent { kind: "folder", id: self.folder.to_string() });
		}

		let fi = cluster
			.folder_infos
			.entry(self.folder_info)
			.or_insert_with(|| FolderInfo::new(self.folder_info, self.folder, self.device, self.index_id));

		fi.upsert(self.file.clone());
		Ok(())
	}
}

#[derive(Debug)]
pub struct RemoveFolderInfo {
	pub folder_info: Uuid,
}

impl ApplyEffect for RemoveFolderInfo {
	fn apply_effect(&self, cluster: &mut Cluster) -> Result<(), ApplyError> {
		cluster.folder_infos.remove(&self.folder_info);
		Ok(())
	}
}

/// Drops one entry from a `FolderInfo`, e.g. once its tombstone has been
/// propagated and is no longer needed locally.
#[derive(Debug)]
pub struct RemoveFile {
	pub folder_info: Uuid,
	pub name: String,
}

impl ApplyEffect for RemoveFile {
	fn apply_effect(&self, cluster: &mut Cluster) -> Result<(), ApplyError> {
		match cluster.folder_infos.get_mut(&self.folder_info) {
			Some(fi) => {
				fi.remove(&self.name);
				Ok(())
			}
			None => Err(ApplyError::UnknownReferent { kind: "folder_info", id: self.folder_info.to_string() }),
		}
	}
}

/// Marks a local entry as being actively written to, so the resolver and the
/// pull iterator both skip it until `UnlockFile` lands.
#[derive(Debug)]
pub struct LockFile {
	pub folder_info: Uuid,
	pub name: String,
}

impl ApplyEffect for LockFile {
	fn apply_effect(&self, cluster: &mut Cluster) -> Result<(), ApplyError> {
		set_locked(cluster, &self.folder_info, &self.name, true)
	}
}

#[derive(Debug)]
pub struct UnlockFile {
	pub folder_info: Uuid,
	pub name: String,
}

impl ApplyEffect for UnlockFile {
	fn apply_effect(&self, cluster: &mut Cluster) -> Result<(), ApplyError> {
		set_locked(cluster, &self.folder_info, &self.name, false)
	}
}

fn set_locked(cluster: &mut Cluster, folder_info: &Uuid, name: &str, locked: bool) -> Result<(), ApplyError> {
	let fi = cluster
		.folder_infos
		.get_mut(folder_info)
		.ok_or_else(|| ApplyError::UnknownReferent { kind: "folder_info", id: folder_info.to_string() })?;
	let file = fi
		.get(name)
		.cloned()
		.ok_or_else(|| ApplyError::UnknownReferent { kind: "file", id: name.to_string() })?;
	let mut file = file;
	file.locked = locked;
	fi.upsert(file);
	Ok(())
}


// vim: ts=4
