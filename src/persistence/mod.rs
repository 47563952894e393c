//! Durable persistence on top of `redb`, one table per entity prefix with
//! `bincode`-encoded values. Grounded on the teacher's `cache.rs`
//! (`redb::TableDefinition` + `bincode`), generalized from one shared table
//! to one table per entity so range scans become full-table iteration
//! instead of a manual prefix filter.

pub mod keys;
mod migration;

use crate::diff::{AddBlocks, Diff, Node, UpdateDevice, UpsertFile, UpsertFolder};
use crate::error::PersistError;
use crate::model::{Block, Device, FileInfo, Folder, Sha256};
use redb::{Database, ReadableTable, TableDefinition};
use std::path::Path;
use uuid::Uuid;

const DEVICES: TableDefinition<&[u8], &[u8]> = TableDefinition::new("devices");
const FOLDERS: TableDefinition<&[u8], &[u8]> = TableDefinition::new("folders");
const FOLDER_INFOS: TableDefinition<&[u8], &[u8]> = TableDefinition::new("folder_infos");
const FILES: TableDefinition<&[u8], &[u8]> = TableDefinition::new("files");
const BLOCKS: TableDefinition<&[u8], &[u8]> = TableDefinition::new("blocks");

/// One persisted `FileInfo` record, alongside the folder/device/index it
/// belongs to — `FileInfo` itself doesn't carry its owning `FolderInfo`'s
/// device, so the record wraps it for the load path to reconstruct
/// `UpsertFile` diffs.
#[derive(serde::Serialize, serde::Deserialize)]
struct FileRecord {
	folder_info: Uuid,
	folder: Uuid,
	device: Sha256,
	index_id: u64,
	file: FileInfo,
}

pub struct Store {
	db: Database,
}

impl Store {
	pub fn open(path: &Path) -> Result<Self, PersistError> {
		let db = Database::create(path)?;
		migration::ensure_current(&db)?;
		Ok(Store { db })
	}

	/// Scans every table and builds one composite diff whose linearization
	/// reproduces the cluster exactly. Dangling referents (a `FileInfo`
	/// naming a block absent from the block table, a `FolderInfo` naming an
	/// absent folder) are dropped with a warning rather than failing the
	/// load.
	pub fn load_all(&self) -> Result<Diff, PersistError> {
		let txn = self.db.begin_read()?;
		let mut diffs = Vec::new();

		if let Ok(table) = txn.open_table(DEVICES) {
			for entry in table.iter()? {
				let (_, v) = entry?;
				match bincode::deserialize::<Device>(v.value()) {
					Ok(device) => diffs.push(Diff::UpdateDevice(Box::new(Node::new(UpdateDevice { device })))),
					Err(e) => crate::logging::warn!("dropping corrupt device record: {}", e),
				}
			}
		}

		let mut known_folders = std::collections::HashSet::new();
		if let Ok(table) = txn.open_table(FOLDERS) {
			for entry in table.iter()? {
				let (_, v) = entry?;
				match bincode::deserialize::<Folder>(v.value()) {
					Ok(folder) => {
						known_folders.insert(folder.id);
						diffs.push(Diff::UpsertFolder(Box::new(Node::new(UpsertFolder { folder }))));
					}
					Err(e) => crate::logging::warn!("dropping corrupt folder record: {}", e),
				}
			}
		}

		let mut known_blocks = std::collections::HashSet::new();
		if let Ok(table) = txn.open_table(BLOCKS) {
			for entry in table.iter()? {
				let (_, v) = entry?;
				match bincode::deserialize::<Block>(v.value()) {
					Ok(block) => {
						known_blocks.insert(block.hash);
						diffs.push(Diff::AddBlocks(Box::new(Node::new(AddBlocks {
							blocks: vec![(block.hash, block.size, block.weak_hash)],
							referent: crate::model::BlockRef { folder_info: Uuid::nil(), file: Uuid::nil(), index: 0 },
						}))));
					}
					Err(e) => crate::logging::warn!("dropping corrupt block record: {}", e),
				}
			}
		}

		if let Ok(table) = txn.open_table(FILES) {
			for entry in table.iter()? {
				let (_, v) = entry?;
				match bincode::deserialize::<FileRecord>(v.value()) {
					Ok(rec) => {
						if !known_folders.contains(&rec.folder) {
							crate::logging::warn!(
								"dropping file {} referencing unknown folder {}",
								rec.file.name,
								rec.folder
							);
							continue;
						}
						let unknown_block =
							rec.file.blocks.iter().find(|h| !known_blocks.contains(h));
						if let Some(h) = unknown_block {
							crate::logging::warn!(
								"dropping file {} referencing unknown block {}",
								rec.file.name,
								h
							);
							continue;
						}
						diffs.push(Diff::UpsertFile(Box::new(Node::new(UpsertFile {
							folder_info: rec.folder_info,
							folder: rec.folder,
							device: rec.device,
							index_id: rec.index_id,
							file: rec.file,
						}))));
					}
					Err(e) => crate::logging::warn!("dropping corrupt file record: {}", e),
				}
			}
		}

		Ok(Diff::LoadSequence(diffs))
	}

	pub fn put_device(&self, device: &Device) -> Result<(), PersistError> {
		let key = keys::device_key(&device.id);
		let value = bincode::serialize(device)?;
		let txn = self.db.begin_write()?;
		{
			let mut table = txn.open_table(DEVICES)?;
			table.insert(key.as_slice(), value.as_slice())?;
		}
		txn.commit()?;
		Ok(())
	}

	pub fn put_folder(&self, folder: &Folder) -> Result<(), PersistError> {
		let key = keys::folder_key(&folder.id);
		let value = bincode::serialize(folder)?;
		let txn = self.db.begin_write()?;
		{
			let mut table = txn.open_table(FOLDERS)?;
			table.insert(key.as_slice(), value.as_slice())?;
		}
		txn.commit()?;
		Ok(())
	}

	pub fn put_block(&self, block: &Block) -> Result<(), PersistError> {
		let key = keys::block_key(&block.hash);
		let value = bincode::serialize(block)?;
		let txn = self.db.begin_write()?;
		{
			let mut table = txn.open_table(BLOCKS)?;
			table.insert(key.as_slice(), value.as_slice())?;
		}
		txn.commit()?;
		Ok(())
	}

	pub fn delete_block(&self, hash: &Sha256) -> Result<(), PersistError> {
		let key = keys::block_key(hash);
		let txn = self.db.begin_write()?;
		{
			let mut table = txn.open_table(BLOCKS)?;
			table.remove(key.as_slice())?;
		}
		txn.commit()?;
		Ok(())
	}

	pub fn put_file(
		&self,
		folder_info: Uuid,
		folder: Uuid,
		device: Sha256,
		index_id: u64,
		file: &FileInfo,
	) -> Result<(), PersistError> {
		let key = keys::file_info_key(&file.id);
		let record = FileRecord { folder_info, folder, device, index_id, file: file.clone() };
		let value = bincode::serialize(&record)?;
		let txn = self.db.begin_write()?;
		{
			let mut table = txn.open_table(FILES)?;
			table.insert(key.as_slice(), value.as_slice())?;
		}
		txn.commit()?;
		Ok(())
	}
}


// vim: ts=4
