//! Per-cluster id and sequence-counter generator.
//!
//! Grounded on the upstream `sequencer_t`: a mutex-guarded, explicitly seeded
//! RNG driving both a UUID generator and a u64 counter generator. No global
//! state — every `Cluster` owns exactly one `Sequencer`, seeded once at
//! startup, so tests can reproduce a deterministic id stream by fixing the
//! seed.

use std::sync::Mutex;
use uuid::Uuid;

struct State {
	rng: Xoshiro,
	counter: u64,
}

/// Small, dependency-free splitmix64-derived generator. Good enough for
/// non-cryptographic id generation; not used anywhere a cryptographic
/// guarantee is required (block hashes are blake3, not this).
struct Xoshiro(u64);

impl Xoshiro {
	fn next_u64(&mut self) -> u64 {
		self.0 = self.0.wrapping_add(0x9E3779B97F4A7C15);
		let mut z = self.0;
		z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
		z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
		z ^ (z >> 31)
	}
}

pub struct Sequencer {
	state: Mutex<State>,
}

impl Sequencer {
	pub fn new(seed: u64) -> Self {
		Sequencer { state: Mutex::new(State { rng: Xoshiro(seed), counter: 0 }) }
	}

	pub fn next_uuid(&self) -> Uuid {
		let mut guard = self.state.lock().expect("sequencer mutex poisoned");
		let hi = guard.rng.next_u64();
		let lo = guard.rng.next_u64();
		let mut bytes = [0u8; 16];
		bytes[..8].copy_from_slice(&hi.to_be_bytes());
		bytes[8..].copy_from_slice(&lo.to_be_bytes());
		Uuid::from_bytes(bytes)
	}

	pub fn next_uint64(&self) -> u64 {
		let mut guard = self.state.lock().expect("sequencer mutex poisoned");
		guard.counter += 1;
		guard.counter
	}
}


// vim: ts=4
