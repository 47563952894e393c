//! Device-identity diffs: learning about a new device, pending or accepted.

use crate::diff::ApplyEffect;
use crate::error::ApplyError;
use crate::model::{Cluster, Device, IgnoredDevice, Sha256};

#[derive(Debug)]
pub struct UpdateDevice {
	pub device: Device,
}

impl ApplyEffect for UpdateDevice {
	fn apply_effect(&self, cluster: &mut Cluster) -> Result<(), ApplyError> {
		cluster.upsert_device(self.device.clone());
		cluster.pending_devices.remove(&self.device.id);
		cluster.ignored_devices.remove(&self.device.id);
		Ok(())
	}
}

#[derive(Debug)]
pub struct UpdatePendingDevice {
	pub id: Sha256,
	pub name: String,
}

impl ApplyEffect for UpdatePendingDevice {
	fn apply_effect(&self, cluster: &mut Cluster) -> Result<(), ApplyError> {
		if !cluster.devices.contains_key(&self.id) && !cluster.ignored_devices.contains_key(&self.id) {
			cluster.pending_devices.insert(self.id, self.name.clone());
		}
		Ok(())
	}
}

/// Blocks a device from reappearing as pending until explicitly forgotten.
#[derive(Debug)]
pub struct IgnoreDevice {
	pub device: IgnoredDevice,
}

impl ApplyEffect for IgnoreDevice {
	fn apply_effect(&self, cluster: &mut Cluster) -> Result<(), ApplyError> {
		cluster.pending_devices.remove(&self.device.id);
		cluster.ignored_devices.insert(self.device.id, self.device.clone());
		Ok(())
	}
}

/// Reverses `IgnoreDevice`, letting the id reappear in future pending lists.
#[derive(Debug)]
pub struct UnignoreDevice {
	pub id: Sha256,
}

impl ApplyEffect for UnignoreDevice {
	fn apply_effect(&self, cluster: &mut Cluster) -> Result<(), ApplyError> {
		cluster.ignored_devices.remove(&self.id);
		Ok(())
	}
}

/// Drops a device entirely: from the accepted table, pending, and ignored.
#[derive(Debug)]
pub struct RemoveDevice {
	pub id: Sha256,
}

impl ApplyEffect for RemoveDevice {
	fn apply_effect(&self, cluster: &mut Cluster) -> Result<(), ApplyError> {
		if let Some(removed) = cluster.devices.remove(&self.id) {
			cluster.devices_by_uint_id.remove(&removed.uint_id);
		}
		cluster.pending_devices.remove(&self.id);
		cluster.ignored_devices.remove(&self.id);
		Ok(())
	}
}


// vim: ts=4
