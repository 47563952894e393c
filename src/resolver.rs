//! Conflict resolver: given a local and a remote `FileInfo` for the same
//! path, decide which side wins. A pure function over small typed inputs,
//! in the shape of the teacher's own resolver — only the decision table
//! itself changes.

use crate::error::ResolverError;
use crate::model::{conflict_name, is_conflict_name, is_reserved_name, FileInfo, Sha256, VersionCmp};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceAction {
	RemoteCopy,
	ResolveRemoteWin,
	ResolveLocalWin,
	Ignore,
}

pub struct ResolveInput<'a> {
	pub local: Option<&'a FileInfo>,
	pub remote: &'a FileInfo,
	pub local_device: Sha256,
	pub remote_device: Sha256,
	/// True if a third peer's version for this same path strictly
	/// dominates `remote`'s — if so, waiting for that peer wins over
	/// deciding now.
	pub third_peer_dominates: bool,
	pub path_unreachable: bool,
	pub folder_ignore_delete: bool,
}

/// The ordered 12-step decision table. Earlier steps short-circuit later
/// ones.
pub fn resolve(input: &ResolveInput) -> Result<AdvanceAction, ResolverError> {
	// 1. invalid remote entries are never pulled.
	if input.remote.invalid {
		return Ok(AdvanceAction::Ignore);
	}

	// 2. unreachable local path (e.g. parent replaced by a file) blocks any action.
	if input.path_unreachable {
		return Ok(AdvanceAction::Ignore);
	}

	// 3. a third peer already dominates the remote version — defer to it.
	if input.third_peer_dominates {
		return Ok(AdvanceAction::Ignore);
	}

	// 4. reserved names are never synced as ordinary entries.
	if is_reserved_name(&input.remote.name) {
		return Ok(AdvanceAction::Ignore);
	}

	let local = match input.local {
		// 5. local entry missing entirely: take the remote verbatim.
		None => return Ok(AdvanceAction::RemoteCopy),
		Some(local) => local,
	};

	// 6. local entry not yet scanned is not eligible for resolution yet; wait
	// for a scan to confirm it rather than guessing.
	if !local.local {
		return Ok(AdvanceAction::Ignore);
	}

	// 7. both sides agree the file is gone: nothing to do.
	if local.deleted && input.remote.deleted {
		return Ok(AdvanceAction::Ignore);
	}

	let cmp = local.version.compare(&input.remote.version);

	// 8. folder configured to ignore deletes: a delete that does not already
	// dominate the local version is suppressed; one that does still wins, or
	// the folder would get stuck diverging from every other peer forever.
	if input.remote.deleted && input.folder_ignore_delete && cmp != VersionCmp::Dominated {
		return Ok(AdvanceAction::Ignore);
	}

	match cmp {
		// 9. identical versions: nothing to transfer.
		VersionCmp::Equal => Ok(AdvanceAction::Ignore),

		// 10. one side strictly dominates the other.
		VersionCmp::Dominated => Ok(AdvanceAction::RemoteCopy),
		VersionCmp::Dominates => Ok(AdvanceAction::Ignore),

		// 11/12. concurrent edits: a name that is already a conflict copy
		// never spawns a sibling conflict of its own; otherwise tie-break by
		// mtime, then device id, and the losing side is renamed aside as a
		// conflict copy by the caller.
		VersionCmp::Concurrent => {
			if is_conflict_name(&local.name) {
				return Ok(AdvanceAction::ResolveRemoteWin);
			}
			let cmp = local
				.modified_s
				.cmp(&input.remote.modified_s)
				.then_with(|| input.local_device.cmp(&input.remote_device));
			match cmp {
				std::cmp::Ordering::Less => Ok(AdvanceAction::ResolveRemoteWin),
				std::cmp::Ordering::Greater => Ok(AdvanceAction::ResolveLocalWin),
				std::cmp::Ordering::Equal => Ok(AdvanceAction::ResolveRemoteWin),
			}
		}
	}
}

/// Builds the sync-conflict name the losing side of a concurrent edit is
/// renamed to, suffixed with a fragment of the winning device's id.
pub fn conflict_name_for(local: &FileInfo, winner_device: &Sha256) -> String {
	conflict_name(&local.name, local.modified_s, winner_device)
}


// vim: ts=4
