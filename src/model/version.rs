//! Vector-clock version type used to order concurrent edits to a file.

use crate::model::Sha256;
use std::cmp::Ordering as StdOrdering;

/// One device's contribution to a [`Version`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Counter {
	pub device: Sha256,
	pub value: u64,
}

/// A vector clock: one counter per device that has ever modified the file.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct Version(pub Vec<Counter>);

/// Result of comparing two versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionCmp {
	Equal,
	Dominates,
	Dominated,
	Concurrent,
}

impl Version {
	pub fn empty() -> Self {
		Version(Vec::new())
	}

	/// The counter with the largest value, ties broken by device id. This is
	/// always the device recorded as `modified_by`.
	pub fn best_counter(&self) -> Option<&Counter> {
		self.0.iter().max_by(|a, b| match a.value.cmp(&b.value) {
			StdOrdering::Equal => a.device.cmp(&b.device),
			other => other,
		})
	}

	fn get(&self, device: &Sha256) -> u64 {
		self.0.iter().find(|c| &c.device == device).map(|c| c.value).unwrap_or(0)
	}

	/// Merge in a new counter for `device`, replacing any existing entry.
	pub fn bump(&mut self, device: Sha256, value: u64) {
		if let Some(c) = self.0.iter_mut().find(|c| c.device == device) {
			c.value = value;
		} else {
			self.0.push(Counter { device, value });
		}
	}

	pub fn compare(&self, other: &Version) -> VersionCmp {
		let mut self_ahead = false;
		let mut other_ahead = false;

		let mut devices: Vec<Sha256> = self.0.iter().map(|c| c.device).collect();
		for c in &other.0 {
			if !devices.contains(&c.device) {
				devices.push(c.device);
			}
		}

		for device in devices {
			let a = self.get(&device);
			let b = other.get(&device);
			match a.cmp(&b) {
				StdOrdering::Greater => self_ahead = true,
				StdOrdering::Less => other_ahead = true,
				StdOrdering::Equal => {}
			}
		}

		match (self_ahead, other_ahead) {
			(false, false) => VersionCmp::Equal,
			(true, false) => VersionCmp::Dominates,
			(false, true) => VersionCmp::Dominated,
			(true, true) => VersionCmp::Concurrent,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn dev(b: u8) -> Sha256 {
		Sha256([b; 32])
	}

	#[test]
	fn equal_versions_compare_equal() {
		let mut a = Version::empty();
		a.bump(dev(1), 3);
		let b = a.clone();
		assert_eq!(a.compare(&b), VersionCmp::Equal);
	}

	#[test]
	fn strictly_greater_counter_dominates() {
		let mut a = Version::empty();
		a.bump(dev(1), 3);
		let mut b = Version::empty();
		b.bump(dev(1), 2);
		assert_eq!(a.compare(&b), VersionCmp::Dominates);
		assert_eq!(b.compare(&a), VersionCmp::Dominated);
	}

	#[test]
	fn disjoint_devices_are_concurrent() {
		let mut a = Version::empty();
		a.bump(dev(1), 1);
		let mut b = Version::empty();
		b.bump(dev(2), 1);
		assert_eq!(a.compare(&b), VersionCmp::Concurrent);
	}

	#[test]
	fn best_counter_ties_break_by_device_id() {
		let mut v = Version::empty();
		v.bump(dev(1), 5);
		v.bump(dev(2), 5);
		assert_eq!(v.best_counter().unwrap().device, dev(2));
	}

	#[test]
	fn empty_versions_are_equal() {
		assert_eq!(Version::empty().compare(&Version::empty()), VersionCmp::Equal);
	}
}

// vim: ts=4
