//! Byte-prefix key layout for each persisted entity.

pub const DEVICE_PREFIX: u8 = 0x01;
pub const FOLDER_PREFIX: u8 = 0x02;
pub const FOLDER_INFO_PREFIX: u8 = 0x03;
pub const FILE_INFO_PREFIX: u8 = 0x04;
pub const BLOCK_PREFIX: u8 = 0x05;

pub fn device_key(id: &crate::model::Sha256) -> [u8; 33] {
	prefixed_sha(DEVICE_PREFIX, id)
}

pub fn block_key(hash: &crate::model::Sha256) -> [u8; 33] {
	prefixed_sha(BLOCK_PREFIX, hash)
}

pub fn folder_key(id: &uuid::Uuid) -> [u8; 17] {
	prefixed_uuid(FOLDER_PREFIX, id)
}

pub fn folder_info_key(id: &uuid::Uuid) -> [u8; 17] {
	prefixed_uuid(FOLDER_INFO_PREFIX, id)
}

pub fn file_info_key(id: &uuid::Uuid) -> [u8; 17] {
	prefixed_uuid(FILE_INFO_PREFIX, id)
}

fn prefixed_sha(prefix: u8, hash: &crate::model::Sha256) -> [u8; 33] {
	let mut key = [0u8; 33];
	key[0] = prefix;
	key[1..].copy_from_slice(hash.as_bytes());
	key
}

fn prefixed_uuid(prefix: u8, id: &uuid::Uuid) -> [u8; 17] {
	let mut key = [0u8; 17];
	key[0] = prefix;
	key[1..].copy_from_slice(id.as_bytes());
	key
}


// vim: ts=4
