//! The diff pipeline: every mutation to the cluster model is expressed as a
//! `Diff` value and applied through exactly one entry point,
//! [`Diff::apply`].

mod advance;
mod blocks;
mod contacts;
mod folder_content;
mod local;
mod structural;

pub use advance::{Advance, FinishFile};
pub use blocks::{AddBlocks, AppendBlock, BlockAck, CloneBlock, RemoveBlocks};
pub use contacts::{IgnoreDevice, RemoveDevice, UnignoreDevice, UpdateDevice, UpdatePendingDevice};
pub use folder_content::{LockFile, RemoveFile, RemoveFolderInfo, UnlockFile, UpsertFile};
pub use local::{Suspend, SuspendFolder};
pub use structural::{ClusterUpdate, RemoveFolder, SetFolderPaused, ShareFolder, UnshareFolder, UpsertFolder};

use crate::error::ApplyError;
use crate::model::Cluster;

/// A single node in the diff tree. Every variant carries `sibling`/`child`
/// slots so one logical operation can compose several primitive effects.
#[derive(Debug)]
pub enum Diff {
	ClusterUpdate(Box<Node<ClusterUpdate>>),
	UpsertFolder(Box<Node<UpsertFolder>>),
	RemoveFolder(Box<Node<RemoveFolder>>),
	ShareFolder(Box<Node<ShareFolder>>),
	UnshareFolder(Box<Node<UnshareFolder>>),
	SetFolderPaused(Box<Node<SetFolderPaused>>),
	UpdateDevice(Box<Node<UpdateDevice>>),
	UpdatePendingDevice(Box<Node<UpdatePendingDevice>>),
	IgnoreDevice(Box<Node<IgnoreDevice>>),
	UnignoreDevice(Box<Node<UnignoreDevice>>),
	RemoveDevice(Box<Node<RemoveDevice>>),
	UpsertFile(Box<Node<UpsertFile>>),
	RemoveFile(Box<Node<RemoveFile>>),
	LockFile(Box<Node<LockFile>>),
	UnlockFile(Box<Node<UnlockFile>>),
	RemoveFolderInfo(Box<Node<RemoveFolderInfo>>),
	AddBlocks(Box<Node<AddBlocks>>),
	RemoveBlocks(Box<Node<RemoveBlocks>>),
	AppendBlock(Box<Node<AppendBlock>>),
	CloneBlock(Box<Node<CloneBlock>>),
	BlockAck(Box<Node<BlockAck>>),
	Advance(Box<Node<Advance>>),
	FinishFile(Box<Node<FinishFile>>),
	Suspend(Box<Node<Suspend>>),
	SuspendFolder(Box<Node<SuspendFolder>>),
	/// Composite used only by the persistence cold-load path: a flat
	/// sequence of diffs whose in-order application reproduces the cluster.
	LoadSequence(Vec<Diff>),
}

/// Wraps a variant's payload with the sibling/child composition slots every
/// diff carries.
#[derive(Debug)]
pub struct Node<T> {
	pub payload: T,
	pub child: Option<Diff>,
	pub sibling: Option<Diff>,
}

impl<T> Node<T> {
	pub fn new(payload: T) -> Self {
		Node { payload, child: None, sibling: None }
	}

	pub fn with_child(mut self, child: Diff) -> Self {
		self.child = Some(child);
		self
	}

	pub fn with_sibling(mut self, sibling: Diff) -> Self {
		self.sibling = Some(sibling);
		self
	}
}

/// Applies a single variant's own effect to the cluster. Implemented per
/// payload type in its own submodule.
pub trait ApplyEffect {
	fn apply_effect(&self, cluster: &mut Cluster) -> Result<(), ApplyError>;
}

/// Visitor over the closed diff union, with a default dispatch
/// (`apply_impl`) that callers can override per-variant — persistence uses
/// this to record the put/delete set alongside each apply.
pub trait ApplyController {
	fn apply_impl(&mut self, diff: &Diff, cluster: &mut Cluster) -> Result<(), ApplyError> {
		default_apply(self, diff, cluster)
	}
}

/// The controller with no side behavior: just mutates the cluster.
pub struct DefaultController;

impl ApplyController for DefaultController {}

fn default_apply<C: ApplyController + ?Sized>(
	controller: &mut C,
	diff: &Diff,
	cluster: &mut Cluster,
) -> Result<(), ApplyError> {
	apply_self(diff, cluster)?;

	if let Some(child) = child_of(diff) {
		controller.apply_impl(child, cluster)?;
	}

	// Siblings walk iteratively via an explicit stack so a long sibling
	// chain never recurses — only the self/child edge does, and that depth
	// is bounded by composition depth, not list length.
	let mut next = sibling_of(diff);
	while let Some(sib) = next {
		apply_self(sib, cluster)?;
		if let Some(child) = child_of(sib) {
			controller.apply_impl(child, cluster)?;
		}
		next = sibling_of(sib);
	}

	Ok(())
}

fn apply_self(diff: &Diff, cluster: &mut Cluster) -> Result<(), ApplyError> {
	let result = match diff {
		Diff::ClusterUpdate(n) => n.payload.apply_effect(cluster),
		Diff::UpsertFolder(n) => n.payload.apply_effect(cluster),
		Diff::RemoveFolder(n) => n.payload.apply_effect(cluster),
		Diff::ShareFolder(n) => n.payload.apply_effect(cluster),
		Diff::UnshareFolder(n) => n.payload.apply_effect(cluster),
		Diff::SetFolderPaused(n) => n.payload.apply_effect(cluster),
		Diff::UpdateDevice(n) => n.payload.apply_effect(cluster),
		Diff::UpdatePendingDevice(n) => n.payload.apply_effect(cluster),
		Diff::IgnoreDevice(n) => n.payload.apply_effect(cluster),
		Diff::UnignoreDevice(n) => n.payload.apply_effect(cluster),
		Diff::RemoveDevice(n) => n.payload.apply_effect(cluster),
		Diff::UpsertFile(n) => n.payload.apply_effect(cluster),
		Diff::RemoveFile(n) => n.payload.apply_effect(cluster),
		Diff::LockFile(n) => n.payload.apply_effect(cluster),
		Diff::UnlockFile(n) => n.payload.apply_effect(cluster),
		Diff::RemoveFolderInfo(n) => n.payload.apply_effect(cluster),
		Diff::AddBlocks(n) => n.payload.apply_effect(cluster),
		Diff::RemoveBlocks(n) => n.payload.apply_effect(cluster),
		Diff::AppendBlock(n) => n.payload.apply_effect(cluster),
		Diff::CloneBlock(n) => n.payload.apply_effect(cluster),
		Diff::BlockAck(n) => n.payload.apply_effect(cluster),
		Diff::Advance(n) => n.payload.apply_effect(cluster),
		Diff::FinishFile(n) => n.payload.apply_effect(cluster),
		Diff::Suspend(n) => n.payload.apply_effect(cluster),
		Diff::SuspendFolder(n) => n.payload.apply_effect(cluster),
		Diff::LoadSequence(diffs) => {
			for d in diffs {
				apply_self(d, cluster)?;
				if let Some(child) = child_of(d) {
					apply_self(child, cluster)?;
				}
			}
			Ok(())
		}
	};
	if result.is_err() {
		cluster.taint();
	}
	result
}

fn child_of(diff: &Diff) -> Option<&Diff> {
	match diff {
		Diff::ClusterUpdate(n) => n.child.as_ref(),
		Diff::UpsertFolder(n) => n.child.as_ref(),
		Diff::RemoveFolder(n) => n.child.as_ref(),
		Diff::ShareFolder(n) => n.child.as_ref(),
		Diff::UnshareFolder(n) => n.child.as_ref(),
		Diff::SetFolderPaused(n) => n.child.as_ref(),
		Diff::UpdateDevice(n) => n.child.as_ref(),
		Diff::UpdatePendingDevice(n) => n.child.as_ref(),
		Diff::IgnoreDevice(n) => n.child.as_ref(),
		Diff::UnignoreDevice(n) => n.child.as_ref(),
		Diff::RemoveDevice(n) => n.child.as_ref(),
		Diff::UpsertFile(n) => n.child.as_ref(),
		Diff::RemoveFile(n) => n.child.as_ref(),
		Diff::LockFile(n) => n.child.as_ref(),
		Diff::UnlockFile(n) => n.child.as_ref(),
		Diff::RemoveFolderInfo(n) => n.child.as_ref(),
		Diff::AddBlocks(n) => n.child.as_ref(),
		Diff::RemoveBlocks(n) => n.child.as_ref(),
		Diff::AppendBlock(n) => n.child.as_ref(),
		Diff::CloneBlock(n) => n.child.as_ref(),
		Diff::BlockAck(n) => n.child.as_ref(),
		Diff::Advance(n) => n.child.as_ref(),
		Diff::FinishFile(n) => n.child.as_ref(),
		Diff::Suspend(n) => n.child.as_ref(),
		Diff::SuspendFolder(n) => n.child.as_ref(),
		Diff::LoadSequence(_) => None,
	}
}

fn sibling_of(diff: &Diff) -> Option<&Diff> {
	match diff {
		Diff::ClusterUpdate(n) => n.sibling.as_ref(),
		Diff::UpsertFolder(n) => n.sibling.as_ref(),
		Diff::RemoveFolder(n) => n.sibling.as_ref(),
		Diff::ShareFolder(n) => n.sibling.as_ref(),
		Diff::UnshareFolder(n) => n.sibling.as_ref(),
		Diff::SetFolderPaused(n) => n.sibling.as_ref(),
		Diff::UpdateDevice(n) => n.sibling.as_ref(),
		Diff::UpdatePendingDevice(n) => n.sibling.as_ref(),
		Diff::IgnoreDevice(n) => n.sibling.as_ref(),
		Diff::UnignoreDevice(n) => n.sibling.as_ref(),
		Diff::RemoveDevice(n) => n.sibling.as_ref(),
		Diff::UpsertFile(n) => n.sibling.as_ref(),
		Diff::RemoveFile(n) => n.sibling.as_ref(),
		Diff::LockFile(n) => n.sibling.as_ref(),
		Diff::UnlockFile(n) => n.sibling.as_ref(),
		Diff::RemoveFolderInfo(n) => n.sibling.as_ref(),
		Diff::AddBlocks(n) => n.sibling.as_ref(),
		Diff::RemoveBlocks(n) => n.sibling.as_ref(),
		Diff::AppendBlock(n) => n.sibling.as_ref(),
		Diff::CloneBlock(n) => n.sibling.as_ref(),
		Diff::BlockAck(n) => n.sibling.as_ref(),
		Diff::Advance(n) => n.sibling.as_ref(),
		Diff::FinishFile(n) => n.sibling.as_ref(),
		Diff::Suspend(n) => n.sibling.as_ref(),
		Diff::SuspendFolder(n) => n.sibling.as_ref(),
		Diff::LoadSequence(_) => None,
	}
}

impl Diff {
	/// Apply using the default controller — the common case for diffs that
	/// don't need a persistence/cold-load hook.
	pub fn apply(&self, cluster: &mut Cluster) -> Result<(), ApplyError> {
		let mut controller = DefaultController;
		controller.apply_impl(self, cluster)
	}
}


// vim: ts=4
