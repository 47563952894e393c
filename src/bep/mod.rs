//! Semantic Block Exchange Protocol message types.
//!
//! These are the message shapes the per-peer controller (`crate::controller`)
//! consumes and produces. Wire framing, the protobuf schema, compression,
//! TLS, and transport discovery are all out of scope — `PeerTransport`
//! (see `controller::transport`) is the seam where a real implementation
//! would plug in a codec over these types.

use crate::model::Sha256;

#[derive(Debug, Clone)]
pub struct Hello {
	pub device_name: String,
	pub client_name: String,
	pub client_version: String,
}

#[derive(Debug, Clone)]
pub struct FolderShare {
	pub folder_id: String,
	pub label: String,
	pub read_only: bool,
	pub devices: Vec<Sha256>,
}

#[derive(Debug, Clone)]
pub struct ClusterConfig {
	pub folders: Vec<FolderShare>,
}

#[derive(Debug, Clone)]
pub struct BlockInfo {
	pub offset: u64,
	pub size: u32,
	pub hash: Sha256,
	pub weak_hash: u32,
}

#[derive(Debug, Clone)]
pub struct FileInfoMsg {
	pub name: String,
	pub folder_id: String,
	pub size: u64,
	pub block_size: u32,
	pub modified_s: i64,
	pub deleted: bool,
	pub version_counters: Vec<(Sha256, u64)>,
	pub blocks: Vec<BlockInfo>,
}

#[derive(Debug, Clone)]
pub struct Index {
	pub folder_id: String,
	pub files: Vec<FileInfoMsg>,
}

#[derive(Debug, Clone)]
pub struct IndexUpdate {
	pub folder_id: String,
	pub files: Vec<FileInfoMsg>,
}

#[derive(Debug, Clone)]
pub struct Request {
	pub id: i32,
	pub folder_id: String,
	pub name: String,
	pub offset: u64,
	pub size: u32,
	pub hash: Sha256,
}

#[derive(Debug, Clone)]
pub struct Response {
	pub id: i32,
	pub data: Vec<u8>,
	pub code: ResponseCode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseCode {
	NoError,
	Generic,
	NoSuchFile,
	InvalidFile,
}

#[derive(Debug, Clone)]
pub struct DownloadProgress {
	pub folder_id: String,
	pub updates: Vec<(String, Vec<u32>)>,
}

#[derive(Debug, Clone)]
pub struct Ping;

#[derive(Debug, Clone)]
pub struct Close {
	pub reason: String,
}

// vim: ts=4
