//! Cluster-wide structural diffs: processing an inbound `ClusterConfig`, and
//! creating/updating a folder's own configuration.

use crate::diff::ApplyEffect;
use crate::error::ApplyError;
use crate::model::{Cluster, Folder, Sha256};
use uuid::Uuid;

/// Applied once per inbound `ClusterConfig` message; its children are the
/// per-folder `UpsertFolder`/`UpdatePendingDevice` diffs derived from the
/// message's folder list, in message order (duplicate folder ids: last one
/// in the list wins, matching how the apply walks the list and overwrites).
#[derive(Debug)]
pub struct ClusterUpdate {
	pub peer: crate::model::Sha256,
}

impl ApplyEffect for ClusterUpdate {
	fn apply_effect(&self, cluster: &mut Cluster) -> Result<(), ApplyError> {
		if !cluster.devices.contains_key(&self.peer) {
			return Err(ApplyError::UnknownReferent { kind: "device", id: self.peer.to_string() });
		}
		Ok(())
	}
}

#[derive(Debug)]
pub struct UpsertFolder {
	pub folder: Folder,
}

impl ApplyEffect for UpsertFolder {
	fn apply_effect(&self, cluster: &mut Cluster) -> Result<(), ApplyError> {
		cluster.folders.insert(self.folder.id, self.folder.clone());
		Ok(())
	}
}

/// Drops a folder's own configuration entry. Its per-device indexes are
/// removed separately via `RemoveFolderInfo` children, one per device.
#[derive(Debug)]
pub struct RemoveFolder {
	pub folder: Uuid,
}

impl ApplyEffect for RemoveFolder {
	fn apply_effect(&self, cluster: &mut Cluster) -> Result<(), ApplyError> {
		cluster.folders.remove(&self.folder);
		Ok(())
	}
}

/// Adds a device to a folder's share list, if it isn't already there.
#[derive(Debug)]
pub struct ShareFolder {
	pub folder: Uuid,
	pub device: Sha256,
}

impl ApplyEffect for ShareFolder {
	fn apply_effect(&self, cluster: &mut Cluster) -> Result<(), ApplyError> {
		let folder = cluster
			.folders
			.get_mut(&self.folder)
			.ok_or_else(|| ApplyError::UnknownReferent { kind: "folder", id: self.folder.to_string() })?;
		if !folder.device_ids.contains(&self.device) {
			folder.device_ids.push(self.device);
		}
		Ok(())
	}
}

/// Removes a device from a folder's share list. The caller is responsible
/// for emitting the matching `RemoveFolderInfo` child to drop that device's
/// index.
#[derive(Debug)]
pub struct UnshareFolder {
	pub folder: Uuid,
	pub device: Sha256,
}

impl ApplyEffect for UnshareFolder {
	fn apply_effect(&self, cluster: &mut Cluster) -> Result<(), ApplyError> {
		let folder = cluster
			.folders
			.get_mut(&self.folder)
			.ok_or_else(|| ApplyError::UnknownReferent { kind: "folder", id: self.folder.to_string() })?;
		folder.device_ids.retain(|d| d != &self.device);
		Ok(())
	}
}

#[derive(Debug)]
pub struct SetFolderPaused {
	pub folder: Uuid,
	pub paused: bool,
}

impl ApplyEffect for SetFolderPaused {
	fn apply_effect(&self, cluster: &mut Cluster) -> Result<(), ApplyError> {
		let folder = cluster
			.folders
			.get_mut(&self.folder)
			.ok_or_else(|| ApplyError::UnknownReferent { kind: "folder", id: self.folder.to_string() })?;
		folder.paused = self.paused;
		Ok(())
	}
}


// vim: ts=4
