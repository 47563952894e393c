//! Remote device identity and connection-relevant metadata.

use crate::model::Sha256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Compression {
	Metadata,
	Always,
	Never,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Device {
	pub id: Sha256,
	/// A short numeric alias assigned by the sequencer, used wherever BEP
	/// wire indices reference a device more cheaply than its full id.
	pub uint_id: u64,
	pub name: String,
	pub addresses: Vec<String>,
	pub compression: Compression,
	pub introducer: bool,
	pub paused: bool,
}

/// A device that tried to connect but was never accepted as a full peer, and
/// has since been explicitly blocked from appearing in pending lists again.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct IgnoredDevice {
	pub id: Sha256,
	pub name: String,
	pub last_seen_address: Option<String>,
	pub last_seen_s: i64,
}

// vim: ts=4
