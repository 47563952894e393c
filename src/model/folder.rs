//! Folder configuration, grounded on the upstream `folder_config_t` layout.

use std::path::PathBuf;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FolderType {
	SendReceive,
	SendOnly,
	ReceiveOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PullOrder {
	Random,
	Alphabetic,
	Smallest,
	Largest,
	Oldest,
	Newest,
}

impl std::str::FromStr for PullOrder {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"random" => Ok(PullOrder::Random),
			"alphabetic" => Ok(PullOrder::Alphabetic),
			"smallest" => Ok(PullOrder::Smallest),
			"largest" => Ok(PullOrder::Largest),
			"oldest" => Ok(PullOrder::Oldest),
			"newest" => Ok(PullOrder::Newest),
			other => Err(format!("unknown pull order: {}", other)),
		}
	}
}

impl std::fmt::Display for PullOrder {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let s = match self {
			PullOrder::Random => "random",
			PullOrder::Alphabetic => "alphabetic",
			PullOrder::Smallest => "smallest",
			PullOrder::Largest => "largest",
			PullOrder::Oldest => "oldest",
			PullOrder::Newest => "newest",
		};
		write!(f, "{}", s)
	}
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Folder {
	pub id: Uuid,
	pub label: String,
	pub path: PathBuf,
	pub device_ids: Vec<crate::model::Sha256>,
	pub folder_type: FolderType,
	pub rescan_interval_s: u32,
	pub pull_order: PullOrder,
	pub watched: bool,
	pub ignore_permissions: bool,
	pub read_only: bool,
	pub ignore_delete: bool,
	pub disable_temp_indexes: bool,
	pub paused: bool,
	pub suspend_reason: Option<String>,
}

impl Folder {
	pub fn is_suspended(&self) -> bool {
		self.suspend_reason.is_some()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn pull_order_round_trips_through_str() {
		for s in ["random", "alphabetic", "smallest", "largest", "oldest", "newest"] {
			let parsed: PullOrder = s.parse().unwrap();
			assert_eq!(parsed.to_string(), s);
		}
	}

	#[test]
	fn unknown_pull_order_is_rejected() {
		assert!("fastest".parse::<PullOrder>().is_err());
	}
}

// vim: ts=4
