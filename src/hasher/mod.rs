//! Content hashing: fixed block-size selection, strong (blake3) and weak
//! (rollsum) hashes, and a least-loaded worker pool.

mod pool;

pub use pool::HasherPool;

use crate::error::HashError;

/// Minimum block size BEP ever uses.
pub const MIN_BLOCK_SIZE: u32 = 128 * 1024;

/// Smallest power-of-two block size >= 128 KiB such that
/// `ceil(file_size / block_size) <= 2^14`, preferring `prior` when it still
/// satisfies the bound (so an unchanged file keeps its existing block
/// boundaries across rescans).
pub fn block_size_for(file_size: u64, prior: Option<u32>) -> u32 {
	const MAX_BLOCKS: u64 = 1 << 14;

	if let Some(prior) = prior {
		if fits(file_size, prior as u64) {
			return prior;
		}
	}

	let mut size = MIN_BLOCK_SIZE as u64;
	while !fits(file_size, size) {
		size *= 2;
	}
	size as u32
}

fn fits(file_size: u64, block_size: u64) -> bool {
	if file_size == 0 {
		return true;
	}
	file_size.div_ceil(block_size) <= (1u64 << 14)
}

/// Strong content hash of a whole buffer.
pub fn strong_hash(data: &[u8]) -> crate::model::Sha256 {
	crate::model::Sha256(*blake3::hash(data).as_bytes())
}

/// Weak rolling hash of one fixed-size block, driven with `rollsum`'s
/// primitive rather than its content-defined boundary search — BEP blocks
/// are fixed-size, so there is no boundary to find.
pub fn weak_hash(data: &[u8]) -> u32 {
	let mut bup = rollsum::Bup::new_with_chunk_bits(17);
	for &byte in data {
		bup.roll_byte(byte);
	}
	bup.digest()
}


// vim: ts=4
