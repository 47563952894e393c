//! A device with no local copy of a path pulls the remote verbatim, and the
//! resulting file lands on disk through the file I/O actor's temp-then-
//! commit path.

use bepsync::file_io::IoActor;
use bepsync::hasher;
use bepsync::model::{Cluster, Compression, Device, FileType, FolderType, PullOrder, Sha256, Version};
use bepsync::resolver::{resolve, AdvanceAction, ResolveInput};
use bepsync::watcher::mediator::Mediator;
use std::sync::Arc;
use uuid::Uuid;

fn device(b: u8) -> Device {
	Device {
		id: Sha256([b; 32]),
		uint_id: b as u64,
		name: format!("dev{}", b),
		addresses: vec![],
		compression: Compression::Metadata,
		introducer: false,
		paused: false,
	}
}

fn remote_file(name: &str, remote_dev: Sha256) -> bepsync::model::FileInfo {
	let mut version = Version::empty();
	version.bump(remote_dev, 1);
	bepsync::model::FileInfo {
		id: Uuid::new_v4(),
		folder_info: Uuid::nil(),
		name: name.into(),
		file_type: FileType::File,
		size: 5,
		block_size: hasher::MIN_BLOCK_SIZE,
		permissions: 0o644,
		modified_s: 1_700_000_000,
		modified_ns: 0,
		version,
		deleted: false,
		invalid: false,
		no_permissions: false,
		symlink_target: None,
		blocks: vec![hasher::strong_hash(b"hello")],
		sequence: 1,
		local: true,
		locked: false,
		block_available: vec![true],
		source: None,
	}
}

#[test]
fn cluster_setup_recognizes_a_pending_peer_as_a_full_device() {
	let mut cluster = Cluster::new();
	let local = device(1);
	let remote = device(2);
	cluster.devices.insert(local.id, local.clone());
	cluster.devices.insert(remote.id, remote.clone());

	let folder = bepsync::model::Folder {
		id: Uuid::new_v4(),
		label: "docs".into(),
		path: "/tmp/docs".into(),
		device_ids: vec![local.id, remote.id],
		folder_type: FolderType::SendReceive,
		rescan_interval_s: 3600,
		pull_order: PullOrder::Alphabetic,
		watched: true,
		ignore_permissions: false,
		read_only: false,
		ignore_delete: false,
		disable_temp_indexes: false,
		paused: false,
		suspend_reason: None,
	};
	cluster.folders.insert(folder.id, folder.clone());

	assert!(cluster.folders.contains_key(&folder.id));
	assert_eq!(cluster.devices.len(), 2);
}

#[test]
fn missing_local_entry_resolves_to_a_remote_copy() {
	let local_dev = Sha256([1; 32]);
	let remote_dev = Sha256([2; 32]);
	let remote = remote_file("hello.txt", remote_dev);

	let input = ResolveInput {
		local: None,
		remote: &remote,
		local_device: local_dev,
		remote_device: remote_dev,
		third_peer_dominates: false,
		path_unreachable: false,
		folder_ignore_delete: false,
	};
	assert_eq!(resolve(&input).unwrap(), AdvanceAction::RemoteCopy);
}

#[tokio::test]
async fn remote_copy_materializes_as_a_verified_file_on_disk() {
	let dir = tempfile::tempdir().unwrap();
	let target = dir.path().join("hello.txt");
	let mediator = Arc::new(Mediator::new());
	let actor = IoActor::new(mediator, 4);

	let contents = b"hello";
	let expected = hasher::strong_hash(contents);

	actor.open_write(&target).await.unwrap();
	actor.write_at(&target, 0, contents).await.unwrap();
	actor.commit(&target, &expected).await.unwrap();

	let on_disk = tokio::fs::read(&target).await.unwrap();
	assert_eq!(on_disk, contents);
}
