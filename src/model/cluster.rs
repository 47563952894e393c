//! The in-memory cluster model: the coordinator's single source of truth.
//!
//! `Cluster` is owned exclusively by the coordinator task. Every mutation
//! flows through [`crate::diff::Diff::apply`]; nothing else may call
//! `apply_diff` directly, which is why it is `pub(crate)`.

use crate::model::{Block, Device, Folder, FolderInfo, IgnoredDevice, Sha256};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use uuid::Uuid;

/// A folder a peer has offered but this cluster has not yet accepted, keyed
/// by folder id, one entry per offering device.
#[derive(Debug, Clone)]
pub struct PendingFolder {
	pub device: Sha256,
	pub label: String,
	pub index_id: u64,
	pub max_sequence: u64,
}

pub struct Cluster {
	pub devices: HashMap<Sha256, Device>,
	pub devices_by_uint_id: HashMap<u64, Sha256>,
	pub folders: HashMap<Uuid, Folder>,
	pub folder_infos: HashMap<Uuid, FolderInfo>,
	pub blocks: HashMap<Sha256, Block>,
	pub pending_devices: HashMap<Sha256, String>,
	pub pending_folders: HashMap<Uuid, PendingFolder>,
	pub ignored_devices: HashMap<Sha256, IgnoredDevice>,
	tainted: AtomicBool,
}

impl Cluster {
	pub fn new() -> Self {
		Cluster {
			devices: HashMap::new(),
			devices_by_uint_id: HashMap::new(),
			folders: HashMap::new(),
			folder_infos: HashMap::new(),
			blocks: HashMap::new(),
			pending_devices: HashMap::new(),
			pending_folders: HashMap::new(),
			ignored_devices: HashMap::new(),
			tainted: AtomicBool::new(false),
		}
	}

	/// Cheap to read from any thread; only the coordinator ever writes it.
	pub fn is_tainted(&self) -> bool {
		self.tainted.load(Ordering::Acquire)
	}

	pub(crate) fn taint(&self) {
		self.tainted.store(true, Ordering::Release);
	}

	pub fn folder_info_for(&self, folder: Uuid, device: Sha256) -> Option<&FolderInfo> {
		self.folder_infos.values().find(|fi| fi.folder == folder && fi.device == device)
	}

	/// Inserts or replaces a device, keeping `devices_by_uint_id` in sync so
	/// it can never point at a stale or missing entry.
	pub fn upsert_device(&mut self, device: Device) {
		let uint_id = device.uint_id;
		let id = device.id;
		if let Some(previous) = self.devices.insert(id, device) {
			if previous.uint_id != uint_id {
				self.devices_by_uint_id.remove(&previous.uint_id);
			}
		}
		self.devices_by_uint_id.insert(uint_id, id);
	}

	pub fn device_by_uint_id(&self, uint_id: u64) -> Option<&Device> {
		self.devices_by_uint_id.get(&uint_id).and_then(|id| self.devices.get(id))
	}
}

impl Default for Cluster {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn new_cluster_is_not_tainted() {
		let c = Cluster::new();
		assert!(!c.is_tainted());
	}

	#[test]
	fn taint_is_visible_after_set() {
		let c = Cluster::new();
		c.taint();
		assert!(c.is_tainted());
	}

	fn device(uint_id: u64) -> Device {
		Device {
			id: Sha256([uint_id as u8; 32]),
			uint_id,
			name: "peer".into(),
			addresses: vec![],
			compression: crate::model::Compression::Metadata,
			introducer: false,
			paused: false,
		}
	}

	#[test]
	fn upsert_device_indexes_by_uint_id() {
		let mut c = Cluster::new();
		let d = device(7);
		let id = d.id;
		c.upsert_device(d);
		assert_eq!(c.device_by_uint_id(7).unwrap().id, id);
	}

	#[test]
	fn reassigning_a_devices_uint_id_drops_the_old_index_entry() {
		let mut c = Cluster::new();
		let d = device(7);
		let id = d.id;
		c.upsert_device(d);
		let mut updated = device(9);
		updated.id = id;
		c.upsert_device(updated);
		assert!(c.device_by_uint_id(7).is_none());
		assert_eq!(c.device_by_uint_id(9).unwrap().id, id);
	}
}

// vim: ts=4
