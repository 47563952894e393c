//! A per-(folder, device) index: the set of `FileInfo`s one device claims to
//! hold for one folder.

use crate::model::{FileInfo, Sha256};
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct FolderInfo {
	pub id: Uuid,
	pub folder: Uuid,
	pub device: Sha256,
	pub index_id: u64,
	pub max_sequence: u64,
	files: HashMap<String, FileInfo>,
}

impl FolderInfo {
	pub fn new(id: Uuid, folder: Uuid, device: Sha256, index_id: u64) -> Self {
		FolderInfo { id, folder, device, index_id, max_sequence: 0, files: HashMap::new() }
	}

	pub fn get(&self, name: &str) -> Option<&FileInfo> {
		self.files.get(name)
	}

	pub fn upsert(&mut self, file: FileInfo) {
		self.max_sequence = self.max_sequence.max(file.sequence);
		self.files.insert(file.name.clone(), file);
	}

	pub fn remove(&mut self, name: &str) -> Option<FileInfo> {
		self.files.remove(name)
	}

	pub fn iter(&self) -> impl Iterator<Item = &FileInfo> {
		self.files.values()
	}

	pub fn len(&self) -> usize {
		self.files.len()
	}

	pub fn is_empty(&self) -> bool {
		self.files.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::{FileType, Version};

	fn file(name: &str, sequence: u64) -> FileInfo {
		FileInfo {
			id: Uuid::new_v4(),
			folder_info: Uuid::nil(),
			name: name.to_string(),
			file_type: FileType::File,
			size: 0,
			block_size: 131072,
			permissions: 0o644,
			modified_s: 0,
			modified_ns: 0,
			version: Version::empty(),
			deleted: false,
			invalid: false,
			no_permissions: false,
			symlink_target: None,
			blocks: Vec::new(),
			sequence,
			local: true,
			locked: false,
			block_available: Vec::new(),
			source: None,
		}
	}

	#[test]
	fn upsert_replaces_by_name() {
		let mut fi = FolderInfo::new(Uuid::nil(), Uuid::nil(), Sha256([0; 32]), 1);
		fi.upsert(file("a.txt", 1));
		assert_eq!(fi.len(), 1);
		fi.upsert(file("a.txt", 2));
		assert_eq!(fi.len(), 1);
	}

	#[test]
	fn remove_returns_the_removed_entry() {
		let mut fi = FolderInfo::new(Uuid::nil(), Uuid::nil(), Sha256([0; 32]), 1);
		fi.upsert(file("a.txt", 1));
		let removed = fi.remove("a.txt");
		assert!(removed.is_some());
		assert!(fi.is_empty());
	}

	#[test]
	fn max_sequence_tracks_the_highest_sequence_upserted() {
		let mut fi = FolderInfo::new(Uuid::nil(), Uuid::nil(), Sha256([0; 32]), 1);
		fi.upsert(file("a.txt", 5));
		fi.upsert(file("b.txt", 12));
		fi.upsert(file("c.txt", 3));
		assert_eq!(fi.max_sequence, 12);
	}
}

// vim: ts=4
