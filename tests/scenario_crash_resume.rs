//! A store that already has devices, folders, blocks and files committed
//! must reproduce the exact same cluster after being closed and reopened —
//! this is what lets the coordinator resume after a crash without
//! re-scanning or re-exchanging indexes with every peer.

use bepsync::model::{Cluster, Compression, Device, FileType, Folder, FolderType, PullOrder, Sha256, Version};
use bepsync::persistence::Store;

fn a_device(b: u8) -> Device {
	Device {
		id: Sha256([b; 32]),
		uint_id: b as u64,
		name: format!("dev{}", b),
		addresses: vec!["tcp://127.0.0.1:22000".into()],
		compression: Compression::Metadata,
		introducer: false,
		paused: false,
	}
}

fn a_folder(id: uuid::Uuid) -> Folder {
	Folder {
		id,
		label: "photos".into(),
		path: "/tmp/photos".into(),
		device_ids: vec![],
		folder_type: FolderType::SendReceive,
		rescan_interval_s: 3600,
		pull_order: PullOrder::Newest,
		watched: true,
		ignore_permissions: false,
		read_only: false,
		ignore_delete: false,
		disable_temp_indexes: false,
		paused: false,
		suspend_reason: None,
	}
}

fn a_file(name: &str) -> bepsync::model::FileInfo {
	bepsync::model::FileInfo {
		id: uuid::Uuid::new_v4(),
		folder_info: uuid::Uuid::nil(),
		name: name.into(),
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
		blocks: vec![],
		sequence: 1,
		local: true,
		locked: false,
		block_available: vec![],
		source: None,
	}
}

#[test]
fn a_full_cluster_survives_a_close_and_reopen_of_the_store() {
	let dir = tempfile::tempdir().unwrap();
	let db_path = dir.path().join("cluster.redb");

	let device = a_device(1);
	let folder_id = uuid::Uuid::new_v4();
	let folder = a_folder(folder_id);
	let folder_info_id = uuid::Uuid::new_v4();
	let file = a_file("sunset.jpg");

	{
		let store = Store::open(&db_path).unwrap();
		store.put_device(&device).unwrap();
		store.put_folder(&folder).unwrap();
		store.put_file(folder_info_id, folder_id, device.id, 1, &file).unwrap();
	}

	// Reopen as a fresh `Store` — simulating the process restarting after a
	// crash with nothing but the durable file on disk.
	let store = Store::open(&db_path).unwrap();
	let diff = store.load_all().unwrap();
	let mut cluster = Cluster::new();
	diff.apply(&mut cluster).unwrap();

	assert!(cluster.devices.contains_key(&device.id));
	assert!(cluster.folders.contains_key(&folder_id));
	let fi = cluster.folder_infos.get(&folder_info_id).unwrap();
	assert!(fi.get("sunset.jpg").is_some());
}

#[test]
fn reopening_an_empty_database_yields_an_empty_cluster_not_an_error() {
	let dir = tempfile::tempdir().unwrap();
	let db_path = dir.path().join("cluster.redb");

	{
		let _store = Store::open(&db_path).unwrap();
	}
	let store = Store::open(&db_path).unwrap();
	let diff = store.load_all().unwrap();
	let mut cluster = Cluster::new();
	diff.apply(&mut cluster).unwrap();

	assert!(cluster.devices.is_empty());
	assert!(cluster.folders.is_empty());
	assert!(!cluster.is_tainted());
}

#[test]
fn deleting_a_block_removes_it_from_the_next_load() {
	let dir = tempfile::tempdir().unwrap();
	let db_path = dir.path().join("cluster.redb");
	let block = bepsync::model::Block::new(Sha256([7; 32]), 131072, 1);

	{
		let store = Store::open(&db_path).unwrap();
		store.put_block(&block).unwrap();
		store.delete_block(&block.hash).unwrap();
	}

	let store = Store::open(&db_path).unwrap();
	let diff = store.load_all().unwrap();
	let mut cluster = Cluster::new();
	diff.apply(&mut cluster).unwrap();
	assert!(!cluster.blocks.contains_key(&block.hash));
}
