//! Least-loaded-worker dispatch with round-robin tie-break, backed by one
//! `tokio::sync::Semaphore` permit per worker for back-pressure.

use crate::error::HashError;
use crate::model::Sha256;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, Semaphore};

pub struct HashJob {
	pub data: Vec<u8>,
	pub reply: oneshot::Sender<(Sha256, u32)>,
}

struct Worker {
	tx: mpsc::Sender<HashJob>,
	score: AtomicUsize,
	semaphore: Arc<Semaphore>,
}

pub struct HasherPool {
	workers: Vec<Worker>,
	cursor: AtomicUsize,
}

impl HasherPool {
	/// Spawns `worker_count` OS-scheduled tokio tasks, each able to run
	/// `permits_per_worker` jobs concurrently before callers block.
	pub fn spawn(worker_count: usize, permits_per_worker: usize) -> Arc<Self> {
		let mut workers = Vec::with_capacity(worker_count);
		for _ in 0..worker_count {
			let (tx, mut rx) = mpsc::channel::<HashJob>(64);
			tokio::spawn(async move {
				while let Some(job) = rx.recv().await {
					let hash = super::strong_hash(&job.data);
					let weak = super::weak_hash(&job.data);
					let _ = job.reply.send((hash, weak));
				}
			});
			workers.push(Worker {
				tx,
				score: AtomicUsize::new(0),
				semaphore: Arc::new(Semaphore::new(permits_per_worker)),
			});
		}
		Arc::new(HasherPool { workers, cursor: AtomicUsize::new(0) })
	}

	fn pick_worker(&self) -> usize {
		let mut best = 0;
		let mut best_score = usize::MAX;
		let start = self.cursor.fetch_add(1, Ordering::Relaxed) % self.workers.len();
		for offset in 0..self.workers.len() {
			let idx = (start + offset) % self.workers.len();
			let score = self.workers[idx].score.load(Ordering::Relaxed);
			if score < best_score {
				best_score = score;
				best = idx;
			}
		}
		best
	}

	pub async fn hash(&self, data: Vec<u8>) -> Result<(Sha256, u32), HashError> {
		let idx = self.pick_worker();
		let worker = &self.workers[idx];

		let permit = worker.semaphore.clone().acquire_owned().await.map_err(|_| HashError::WorkerUnavailable)?;
		worker.score.fetch_add(1, Ordering::Relaxed);

		let (reply_tx, reply_rx) = oneshot::channel();
		worker.tx.send(HashJob { data, reply: reply_tx }).await.map_err(|_| HashError::WorkerUnavailable)?;

		let result = reply_rx.await.map_err(|_| HashError::WorkerUnavailable);
		worker.score.fetch_sub(1, Ordering::Relaxed);
		drop(permit);
		result
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn hashes_a_block_end_to_end() {
		let pool = HasherPool::spawn(2, 4);
		let (hash, _weak) = pool.hash(b"block contents".to_vec()).await.unwrap();
		assert_eq!(hash, crate::hasher::strong_hash(b"block contents"));
	}

	#[tokio::test]
	async fn concurrent_jobs_spread_across_workers() {
		let pool = HasherPool::spawn(4, 4);
		let mut handles = Vec::new();
		for i in 0..16 {
			let pool = Arc::clone(&pool);
			handles.push(tokio::spawn(async move { pool.hash(vec![i as u8; 8]).await.unwrap() }));
		}
		for h in handles {
			h.await.unwrap();
		}
	}
}

// vim: ts=4
