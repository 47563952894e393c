//! Local-only diffs: no counterpart on the wire, used for this device's own
//! suspend/resume bookkeeping.

use crate::diff::ApplyEffect;
use crate::error::ApplyError;
use crate::model::Cluster;
use uuid::Uuid;

/// Taints the whole cluster — used for unrecoverable local errors.
#[derive(Debug)]
pub struct Suspend {
	pub reason: String,
}

impl ApplyEffect for Suspend {
	fn apply_effect(&self, cluster: &mut Cluster) -> Result<(), ApplyError> {
		cluster.taint();
		Err(ApplyError::InvariantViolation { message: self.reason.clone() })
	}
}

/// Suspends one folder (e.g. persistent I/O errors) without tainting the
/// whole cluster.
#[derive(Debug)]
pub struct SuspendFolder {
	pub folder: Uuid,
	pub reason: String,
}

impl ApplyEffect for SuspendFolder {
	fn apply_effect(&self, cluster: &mut Cluster) -> Result<(), ApplyError> {
		match cluster.folders.get_mut(&self.folder) {
			Some(folder) => {
				folder.suspend_reason = Some(self.reason.clone());
				Ok(())
			}
			None => Err(ApplyError::UnknownReferent { kind: "folder", id: self.folder.to_string() }),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::{Folder, FolderType, PullOrder};

	fn folder(id: Uuid) -> Folder {
		Folder {
			id,
			label: "x".into(),
			path: "/tmp".into(),
			device_ids: vec![],
			folder_type: FolderType::SendReceive,
			rescan_interval_s: 3600,
			pull_order: PullOrder::Random,
			watched: false,
			ignore_permissions: false,
			read_only: false,
			ignore_delete: false,
			disable_temp_indexes: false,
			paused: false,
			suspend_reason: None,
		}
	}

	#[test]
	fn suspend_folder_sets_reason_without_tainting() {
		let mut cluster = Cluster::new();
		let id = Uuid::new_v4();
		cluster.folders.insert(id, folder(id));
		SuspendFolder { folder: id, reason: "disk full".into() }.apply_effect(&mut cluster).unwrap();
		assert!(cluster.folders[&id].is_suspended());
		assert!(!cluster.is_tainted());
	}

	#[test]
	fn suspend_taints_the_cluster() {
		let mut cluster = Cluster::new();
		let err = Suspend { reason: "corrupt db".into() }.apply_effect(&mut cluster);
		assert!(err.is_err());
		assert!(cluster.is_tainted());
	}
}

// vim: ts=4
