//! Error types, one enum per subsystem, unified at the top by `CoreError`.
//!
//! No `thiserror`/`anyhow` — every enum implements `Display` and
//! `std::error::Error` by hand, matching how the rest of this crate's
//! ancestry handles errors.

use std::fmt;
use std::io;

#[derive(Debug)]
pub enum ModelError {
	UnknownFolder(uuid::Uuid),
	UnknownDevice(String),
	UnknownBlock(String),
}

impl fmt::Display for ModelError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ModelError::UnknownFolder(id) => write!(f, "unknown folder: {}", id),
			ModelError::UnknownDevice(id) => write!(f, "unknown device: {}", id),
			ModelError::UnknownBlock(hash) => write!(f, "unknown block: {}", hash),
		}
	}
}

impl std::error::Error for ModelError {}

#[derive(Debug)]
pub enum ApplyError {
	UnknownReferent { kind: &'static str, id: String },
	InvariantViolation { message: String },
	Model(ModelError),
}

impl fmt::Display for ApplyError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ApplyError::UnknownReferent { kind, id } => write!(f, "diff references unknown {}: {}", kind, id),
			ApplyError::InvariantViolation { message } => write!(f, "invariant violated: {}", message),
			ApplyError::Model(e) => write!(f, "{}", e),
		}
	}
}

impl std::error::Error for ApplyError {}

impl From<ModelError> for ApplyError {
	fn from(e: ModelError) -> Self {
		ApplyError::Model(e)
	}
}

#[derive(Debug)]
pub enum PersistError {
	Database(String),
	Encoding(String),
	Io(io::Error),
}

impl fmt::Display for PersistError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			PersistError::Database(msg) => write!(f, "database error: {}", msg),
			PersistError::Encoding(msg) => write!(f, "encoding error: {}", msg),
			PersistError::Io(e) => write!(f, "I/O error: {}", e),
		}
	}
}

impl std::error::Error for PersistError {}

impl From<io::Error> for PersistError {
	fn from(e: io::Error) -> Self {
		PersistError::Io(e)
	}
}

impl From<redb::DatabaseError> for PersistError {
	fn from(e: redb::DatabaseError) -> Self {
		PersistError::Database(e.to_string())
	}
}

impl From<redb::TransactionError> for PersistError {
	fn from(e: redb::TransactionError) -> Self {
		PersistError::Database(e.to_string())
	}
}

impl From<redb::TableError> for PersistError {
	fn from(e: redb::TableError) -> Self {
		PersistError::Database(e.to_string())
	}
}

impl From<redb::StorageError> for PersistError {
	fn from(e: redb::StorageError) -> Self {
		PersistError::Database(e.to_string())
	}
}

impl From<redb::CommitError> for PersistError {
	fn from(e: redb::CommitError) -> Self {
		PersistError::Database(e.to_string())
	}
}

impl From<Box<bincode::ErrorKind>> for PersistError {
	fn from(e: Box<bincode::ErrorKind>) -> Self {
		PersistError::Encoding(e.to_string())
	}
}

#[derive(Debug)]
pub enum ScanError {
	Io { path: String, source: io::Error },
	HashFailed { path: String, message: String },
}

impl fmt::Display for ScanError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ScanError::Io { path, source } => write!(f, "scan I/O error on {}: {}", path, source),
			ScanError::HashFailed { path, message } => write!(f, "hashing failed for {}: {}", path, message),
		}
	}
}

impl std::error::Error for ScanError {}

#[derive(Debug)]
pub enum HashError {
	WorkerUnavailable,
	Io(io::Error),
}

impl fmt::Display for HashError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			HashError::WorkerUnavailable => write!(f, "no hasher worker available"),
			HashError::Io(e) => write!(f, "I/O error while hashing: {}", e),
		}
	}
}

impl std::error::Error for HashError {}

impl From<io::Error> for HashError {
	fn from(e: io::Error) -> Self {
		HashError::Io(e)
	}
}

#[derive(Debug)]
pub enum IoActorError {
	Io { op: &'static str, path: String, source: io::Error },
	DigestMismatch { path: String },
}

impl fmt::Display for IoActorError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			IoActorError::Io { op, path, source } => write!(f, "{} failed on {}: {}", op, path, source),
			IoActorError::DigestMismatch { path } => write!(f, "digest mismatch writing {}", path),
		}
	}
}

impl std::error::Error for IoActorError {}

#[derive(Debug)]
pub enum ResolverError {
	Indeterminate { reason: String },
}

impl fmt::Display for ResolverError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ResolverError::Indeterminate { reason } => write!(f, "could not resolve: {}", reason),
		}
	}
}

impl std::error::Error for ResolverError {}

#[derive(Debug)]
pub enum WatchError {
	BackendUnavailable(String),
	Io(io::Error),
}

impl fmt::Display for WatchError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			WatchError::BackendUnavailable(msg) => write!(f, "watch backend unavailable: {}", msg),
			WatchError::Io(e) => write!(f, "watcher I/O error: {}", e),
		}
	}
}

impl std::error::Error for WatchError {}

impl From<io::Error> for WatchError {
	fn from(e: io::Error) -> Self {
		WatchError::Io(e)
	}
}

#[derive(Debug)]
pub enum ControllerError {
	ProtocolViolation { peer: String, message: String },
	Timeout { peer: String },
	Closed { peer: String },
}

impl fmt::Display for ControllerError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ControllerError::ProtocolViolation { peer, message } => {
				write!(f, "protocol violation from {}: {}", peer, message)
			}
			ControllerError::Timeout { peer } => write!(f, "timed out waiting for {}", peer),
			ControllerError::Closed { peer } => write!(f, "connection to {} closed", peer),
		}
	}
}

impl std::error::Error for ControllerError {}

/// The crate-wide error type: direct variants for the common cases, plus one
/// nested variant per subsystem error enum.
#[derive(Debug)]
pub enum CoreError {
	Apply(ApplyError),
	Persist(PersistError),
	Scan(ScanError),
	Hash(HashError),
	IoActor(IoActorError),
	Resolver(ResolverError),
	Watch(WatchError),
	Controller(ControllerError),
	Config { message: String },
}

impl fmt::Display for CoreError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			CoreError::Apply(e) => write!(f, "{}", e),
			CoreError::Persist(e) => write!(f, "{}", e),
			CoreError::Scan(e) => write!(f, "{}", e),
			CoreError::Hash(e) => write!(f, "{}", e),
			CoreError::IoActor(e) => write!(f, "{}", e),
			CoreError::Resolver(e) => write!(f, "{}", e),
			CoreError::Watch(e) => write!(f, "{}", e),
			CoreError::Controller(e) => write!(f, "{}", e),
			CoreError::Config { message } => write!(f, "configuration error: {}", message),
		}
	}
}

impl std::error::Error for CoreError {}

impl From<ApplyError> for CoreError {
	fn from(e: ApplyError) -> Self {
		CoreError::Apply(e)
	}
}

impl From<PersistError> for CoreError {
	fn from(e: PersistError) -> Self {
		CoreError::Persist(e)
	}
}

impl From<ScanError> for CoreError {
	fn from(e: ScanError) -> Self {
		CoreError::Scan(e)
	}
}

impl From<HashError> for CoreError {
	fn from(e: HashError) -> Self {
		CoreError::Hash(e)
	}
}

impl From<IoActorError> for CoreError {
	fn from(e: IoActorError) -> Self {
		CoreError::IoActor(e)
	}
}

impl From<ResolverError> for CoreError {
	fn from(e: ResolverError) -> Self {
		CoreError::Resolver(e)
	}
}

impl From<WatchError> for CoreError {
	fn from(e: WatchError) -> Self {
		CoreError::Watch(e)
	}
}

impl From<ControllerError> for CoreError {
	fn from(e: ControllerError) -> Self {
		CoreError::Controller(e)
	}
}

/// Exit codes for the CLI binary, per the external-interfaces contract.
impl CoreError {
	pub fn exit_code(&self) -> i32 {
		match self {
			CoreError::Config { .. } => 2,
			CoreError::Persist(_) => 3,
			CoreError::Apply(_) => 4,
			_ => 1,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn subsystem_errors_convert_into_core_error() {
		let e: CoreError = ResolverError::Indeterminate { reason: "tie".into() }.into();
		assert!(matches!(e, CoreError::Resolver(_)));
	}

	#[test]
	fn exit_codes_are_stable() {
		assert_eq!(CoreError::Config { message: "x".into() }.exit_code(), 2);
		assert_eq!(
			CoreError::Apply(ApplyError::InvariantViolation { message: "x".into() }).exit_code(),
			4
		);
	}
}

// vim: ts=4
