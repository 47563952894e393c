//! A peer cursor presented with a mixed frontier of directories, files, and
//! deletions must always offer directories first and deletions last,
//! ordering the remainder per the folder's configured `PullOrder`, and must
//! round-robin fairly across every folder it is tracking.

use bepsync::iterator::PeerCursor;
use bepsync::model::{FileType, PullOrder, Version};
use uuid::Uuid;

fn file(name: &str, is_dir: bool, deleted: bool, size: u64, modified_s: i64) -> bepsync::model::FileInfo {
	bepsync::model::FileInfo {
		id: Uuid::new_v4(),
		folder_info: Uuid::nil(),
		name: name.into(),
		file_type: if is_dir { FileType::Directory } else { FileType::File },
		size,
		block_size: 131072,
		permissions: 0o644,
		modified_s,
		modified_ns: 0,
		version: Version::empty(),
		deleted,
		invalid: false,
		no_permissions: false,
		symlink_target: None,
		blocks: vec![],
		sequence: 0,
		local: true,
		locked: false,
		block_available: vec![],
		source: None,
	}
}

#[test]
fn smallest_first_order_respects_size_with_directories_and_deletes_pinned() {
	let folder = Uuid::new_v4();
	let mut cursor = PeerCursor::new();
	cursor.register_folder(folder, PullOrder::Smallest);

	cursor.on_upsert(folder, &file("big.bin", false, false, 9_000, 0));
	cursor.on_upsert(folder, &file("small.bin", false, false, 10, 0));
	cursor.on_upsert(folder, &file("assets", true, false, 0, 0));
	cursor.on_upsert(folder, &file("gone.bin", false, true, 0, 0));

	let (_, first) = cursor.next().unwrap();
	assert_eq!(first, "assets", "directories always sort before files regardless of pull order");
}

#[test]
fn newest_first_order_prefers_the_most_recently_modified_file() {
	let folder = Uuid::new_v4();
	let mut cursor = PeerCursor::new();
	cursor.register_folder(folder, PullOrder::Newest);

	cursor.on_upsert(folder, &file("old.txt", false, false, 1, 1_000));
	cursor.on_upsert(folder, &file("new.txt", false, false, 1, 9_000));

	let (_, first) = cursor.next().unwrap();
	assert_eq!(first, "new.txt");
}

#[test]
fn three_folders_rotate_in_round_robin_order_without_starving_any_one() {
	let f1 = Uuid::new_v4();
	let f2 = Uuid::new_v4();
	let f3 = Uuid::new_v4();
	let mut cursor = PeerCursor::new();
	cursor.register_folder(f1, PullOrder::Alphabetic);
	cursor.register_folder(f2, PullOrder::Alphabetic);
	cursor.register_folder(f3, PullOrder::Alphabetic);

	cursor.on_upsert(f1, &file("a.txt", false, false, 1, 0));
	cursor.on_upsert(f2, &file("b.txt", false, false, 1, 0));
	cursor.on_upsert(f3, &file("c.txt", false, false, 1, 0));

	let mut seen = Vec::new();
	for _ in 0..3 {
		let (folder, _) = cursor.next().unwrap();
		seen.push(folder);
	}
	seen.sort();
	let mut expected = vec![f1, f2, f3];
	expected.sort();
	assert_eq!(seen, expected, "every registered folder gets exactly one turn per full rotation");
}

#[test]
fn an_empty_cursor_yields_nothing() {
	let mut cursor = PeerCursor::new();
	assert!(cursor.next().is_none());
}
