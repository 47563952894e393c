//! Block-table diffs: registering new content-addressed blocks and reaping
//! ones whose last reference just dropped.
//!
//! `RemoveBlocks` is always emitted as a child of whatever diff dropped the
//! last reference (e.g. a file delete or an overwrite) — never invoked
//! independently, so the refcount-to-zero invariant (Σ blocks = Σ refcount)
//! can't be violated by applying it out of order.

use crate::diff::ApplyEffect;
use crate::error::ApplyError;
use crate::model::{Block, BlockRef, Cluster, Sha256};

#[derive(Debug)]
pub struct AddBlocks {
	pub blocks: Vec<(Sha256, u32, u32)>,
	pub referent: BlockRef,
}

impl ApplyEffect for AddBlocks {
	fn apply_effect(&self, cluster: &mut Cluster) -> Result<(), ApplyError> {
		for (hash, size, weak_hash) in &self.blocks {
			let block = cluster.blocks.entry(*hash).or_insert_with(|| Block::new(*hash, *size, *weak_hash));
			block.add_ref(self.referent);
		}
		Ok(())
	}
}

#[derive(Debug)]
pub struct RemoveBlocks {
	pub hashes: Vec<Sha256>,
	pub referent: BlockRef,
}

impl ApplyEffect for RemoveBlocks {
	fn apply_effect(&self, cluster: &mut Cluster) -> Result<(), ApplyError> {
		for hash in &self.hashes {
			let orphaned = match cluster.blocks.get_mut(hash) {
				Some(block) => block.remove_ref(&self.referent),
				None => continue,
			};
			if orphaned {
				cluster.blocks.remove(hash);
			}
		}
		Ok(())
	}
}

/// Registers a single block pulled over the wire from a peer and marks it
/// available at one index of the owning file.
#[derive(Debug)]
pub struct AppendBlock {
	pub hash: Sha256,
	pub size: u32,
	pub weak_hash: u32,
	pub referent: BlockRef,
}

impl ApplyEffect for AppendBlock {
	fn apply_effect(&self, cluster: &mut Cluster) -> Result<(), ApplyError> {
		let block = cluster.blocks.entry(self.hash).or_insert_with(|| Block::new(self.hash, self.size, self.weak_hash));
		block.add_ref(self.referent);
		mark_available(cluster, &self.referent);
		Ok(())
	}
}

/// Satisfies a block by copying it from an already-local file instead of
/// requesting it over the wire — the common case when two files share
/// content.
#[derive(Debug)]
pub struct CloneBlock {
	pub hash: Sha256,
	pub referent: BlockRef,
}

impl ApplyEffect for CloneBlock {
	fn apply_effect(&self, cluster: &mut Cluster) -> Result<(), ApplyError> {
		let block = cluster
			.blocks
			.get_mut(&self.hash)
			.ok_or_else(|| ApplyError::UnknownReferent { kind: "block", id: self.hash.to_string() })?;
		block.add_ref(self.referent);
		mark_available(cluster, &self.referent);
		Ok(())
	}
}

/// A no-op acknowledgement of a peer's `Response` for one requested block,
/// recorded so the pull iterator can tell a pending request from a settled
/// one. Carries no cluster mutation of its own beyond that bookkeeping.
#[derive(Debug)]
pub struct BlockAck {
	pub referent: BlockRef,
}

impl ApplyEffect for BlockAck {
	fn apply_effect(&self, _cluster: &mut Cluster) -> Result<(), ApplyError> {
		Ok(())
	}
}

fn mark_available(cluster: &mut Cluster, referent: &BlockRef) {
	let Some(fi) = cluster.folder_infos.get_mut(&referent.folder_info) else { return };
	let Some(mut file) = fi.iter().find(|f| f.id == referent.file).cloned() else { return };
	if let Some(slot) = file.block_available.get_mut(referent.index as usize) {
		*slot = true;
	}
	fi.upsert(file);
}


// vim: ts=4
