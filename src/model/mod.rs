//! The cluster model: devices, folders, per-folder indexes, files, and
//! content-addressed blocks. See `cluster.rs` for the top-level aggregate.

mod block;
mod cluster;
mod device;
mod file_info;
mod folder;
mod folder_info;
mod sha256;
mod version;

pub use block::{Block, BlockRef};
pub use cluster::Cluster;
pub use device::{Compression, Device, IgnoredDevice};
pub use file_info::{conflict_name, is_conflict_name, is_reserved_name, FileInfo, FileType};
pub use folder::{Folder, FolderType, PullOrder};
pub use folder_info::FolderInfo;
pub use sha256::Sha256;
pub use version::{Counter, Version, VersionCmp};

// vim: ts=4
