//! Ambient process configuration.
//!
//! Config-file parsing is out of scope: folders, devices, and share
//! relationships arrive as already-constructed values via diffs, never read
//! from a file by this crate. What's left is the handful of environment
//! variables the process itself needs to locate its home directory and pick
//! a log level.

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct CoreConfig {
	/// Directory holding the persistence database and lock file, default
	/// `~/.syncspirit`.
	pub home: PathBuf,

	/// `SYNCSPIRIT_LOG_LEVEL`, if set; `logging::init_tracing` falls back to
	/// `RUST_LOG` and then `info` when this is `None`.
	pub log_level: Option<String>,
}

impl CoreConfig {
	pub fn from_env() -> Self {
		let home = std::env::var("SYNCSPIRIT_HOME")
			.map(PathBuf::from)
			.unwrap_or_else(|_| default_home());
		let log_level = std::env::var("SYNCSPIRIT_LOG_LEVEL").ok();
		CoreConfig { home, log_level }
	}

	/// Create `self.home` if it doesn't exist yet.
	pub fn ensure_home(&self) -> std::io::Result<()> {
		std::fs::create_dir_all(&self.home)
	}

	pub fn database_path(&self) -> PathBuf {
		self.home.join("cluster.redb")
	}

	pub fn lock_path(&self) -> PathBuf {
		self.home.join(".syncspirit-lock")
	}
}

fn default_home() -> PathBuf {
	std::env::var("HOME").map(|h| PathBuf::from(h).join(".syncspirit")).unwrap_or_else(|_| PathBuf::from(".syncspirit"))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn database_and_lock_paths_live_under_home() {
		let cfg = CoreConfig { home: PathBuf::from("/tmp/x"), log_level: None };
		assert_eq!(cfg.database_path(), PathBuf::from("/tmp/x/cluster.redb"));
		assert_eq!(cfg.lock_path(), PathBuf::from("/tmp/x/.syncspirit-lock"));
	}
}

// vim: ts=4
