//! Per-peer BEP controller: one state machine per connected device, driven
//! by an abstract transport so the sync logic never depends on wire
//! details. Grounded on the teacher's `SyncProtocol` async trait — the same
//! separation applied to BEP's actual message set.

pub mod transport;

pub use transport::PeerTransport;

use crate::bep::{ClusterConfig, FileInfoMsg, Index, IndexUpdate, Request, Response, ResponseCode};
use crate::error::ControllerError;
use crate::hasher::strong_hash;
use std::sync::Arc;
use tokio::sync::Semaphore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
	Disconnected,
	HelloExchanged,
	ClusterSent,
	IndexExchanged,
	Streaming,
	Closing,
}

/// Default cap on outstanding block requests in flight to one peer.
pub const DEFAULT_PIPELINE_DEPTH: usize = 16;

pub struct PeerController<T: PeerTransport> {
	transport: T,
	state: ConnectionState,
	pipeline: Arc<Semaphore>,
	/// Files carried by the last `Index`/`IndexUpdate`, waiting for the
	/// coordinator to drain them into `upsert_file` diffs.
	pending_files: Vec<FileInfoMsg>,
}

impl<T: PeerTransport> PeerController<T> {
	pub fn new(transport: T) -> Self {
		PeerController {
			transport,
			state: ConnectionState::Disconnected,
			pipeline: Arc::new(Semaphore::new(DEFAULT_PIPELINE_DEPTH)),
			pending_files: Vec::new(),
		}
	}

	pub fn state(&self) -> ConnectionState {
		self.state
	}

	pub async fn handshake(&mut self) -> Result<(), ControllerError> {
		self.require(ConnectionState::Disconnected)?;
		self.transport.send_hello().await?;
		self.transport.recv_hello().await?;
		self.state = ConnectionState::HelloExchanged;
		Ok(())
	}

	pub async fn send_cluster_config(&mut self, config: ClusterConfig) -> Result<(), ControllerError> {
		self.require(ConnectionState::HelloExchanged)?;
		self.transport.send_cluster_config(config).await?;
		self.state = ConnectionState::ClusterSent;
		Ok(())
	}

	/// Receiving an inbound `ClusterConfig`/`Index`/`IndexUpdate` translates
	/// directly to `cluster_update`/`upsert_file` diffs — that translation
	/// lives in the coordinator, not here; this method only advances state.
	pub fn on_cluster_config_received(&mut self) -> Result<(), ControllerError> {
		self.require(ConnectionState::ClusterSent)?;
		self.state = ConnectionState::IndexExchanged;
		Ok(())
	}

	pub fn on_index_received(&mut self, index: &Index) -> Result<(), ControllerError> {
		self.require_one_of(&[ConnectionState::IndexExchanged, ConnectionState::Streaming])?;
		self.pending_files.extend(index.files.iter().cloned());
		self.state = ConnectionState::Streaming;
		Ok(())
	}

	pub fn on_index_update_received(&mut self, update: &IndexUpdate) -> Result<(), ControllerError> {
		self.require(ConnectionState::Streaming)?;
		self.pending_files.extend(update.files.iter().cloned());
		Ok(())
	}

	/// Drains the files queued by `on_index_received`/`on_index_update_received`
	/// for the coordinator to turn into `upsert_file` diffs.
	pub fn take_pending_files(&mut self) -> Vec<FileInfoMsg> {
		std::mem::take(&mut self.pending_files)
	}

	/// Sends a block `Request`, blocking if `DEFAULT_PIPELINE_DEPTH`
	/// requests are already outstanding, and rejecting a response whose data
	/// doesn't hash to the block's advertised digest.
	pub async fn request_block(&mut self, request: Request) -> Result<Response, ControllerError> {
		self.require(ConnectionState::Streaming)?;
		let expected_hash = request.hash;
		let permit = self.pipeline.clone().acquire_owned().await.map_err(|_| ControllerError::Closed {
			peer: "unknown".into(),
		})?;
		let response = self.transport.send_request(request).await?;
		drop(permit);

		if response.code == ResponseCode::NoError && strong_hash(&response.data) != expected_hash {
			return Err(ControllerError::ProtocolViolation {
				peer: "unknown".into(),
				message: format!("block response for request {} does not match its advertised hash", response.id),
			});
		}

		Ok(response)
	}

	pub async fn close(&mut self, reason: String) -> Result<(), ControllerError> {
		self.state = ConnectionState::Closing;
		self.transport.send_close(reason).await?;
		self.state = ConnectionState::Disconnected;
		Ok(())
	}

	fn require(&self, expected: ConnectionState) -> Result<(), ControllerError> {
		if self.state != expected {
			return Err(ControllerError::ProtocolViolation {
				peer: "unknown".into(),
				message: format!("expected state {:?}, was in {:?}", expected, self.state),
			});
		}
		Ok(())
	}

	fn require_one_of(&self, expected: &[ConnectionState]) -> Result<(), ControllerError> {
		if !expected.contains(&self.state) {
			return Err(ControllerError::ProtocolViolation {
				peer: "unknown".into(),
				message: format!("expected one of {:?}, was in {:?}", expected, self.state),
			});
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::controller::transport::tests::FakeTransport;
	use crate::model::Sha256;

	async fn streaming_controller() -> PeerController<FakeTransport> {
		let mut controller = PeerController::new(FakeTransport::default());
		controller.handshake().await.unwrap();
		controller.send_cluster_config(ClusterConfig { folders: vec![] }).await.unwrap();
		controller.on_cluster_config_received().unwrap();
		controller.on_index_received(&Index { folder_id: "f".into(), files: vec![] }).unwrap();
		controller
	}

	#[tokio::test]
	async fn happy_path_walks_through_every_state() {
		let mut controller = PeerController::new(FakeTransport::default());
		assert_eq!(controller.state(), ConnectionState::Disconnected);

		controller.handshake().await.unwrap();
		assert_eq!(controller.state(), ConnectionState::HelloExchanged);

		controller.send_cluster_config(ClusterConfig { folders: vec![] }).await.unwrap();
		assert_eq!(controller.state(), ConnectionState::ClusterSent);

		controller.on_cluster_config_received().unwrap();
		assert_eq!(controller.state(), ConnectionState::IndexExchanged);

		controller.on_index_received(&Index { folder_id: "f".into(), files: vec![] }).unwrap();
		assert_eq!(controller.state(), ConnectionState::Streaming);
	}

	#[tokio::test]
	async fn out_of_order_message_is_a_protocol_violation() {
		let mut controller = PeerController::new(FakeTransport::default());
		let err = controller.send_cluster_config(ClusterConfig { folders: vec![] }).await;
		assert!(err.is_err());
	}

	#[tokio::test]
	async fn a_response_matching_its_advertised_hash_is_accepted() {
		let mut controller = streaming_controller().await;
		let request = Request { id: 1, folder_id: "f".into(), name: "a.txt".into(), offset: 0, size: 0, hash: strong_hash(&[]) };
		let response = controller.request_block(request).await.unwrap();
		assert_eq!(response.id, 1);
	}

	#[tokio::test]
	async fn a_response_whose_data_does_not_match_its_advertised_hash_is_rejected() {
		let mut controller = streaming_controller().await;
		let request = Request { id: 2, folder_id: "f".into(), name: "a.txt".into(), offset: 0, size: 0, hash: Sha256([0xff; 32]) };
		let err = controller.request_block(request).await;
		assert!(matches!(err, Err(ControllerError::ProtocolViolation { .. })));
	}

	#[tokio::test]
	async fn index_and_index_update_files_queue_up_for_the_coordinator_to_drain() {
		let mut controller = PeerController::new(FakeTransport::default());
		controller.handshake().await.unwrap();
		controller.send_cluster_config(ClusterConfig { folders: vec![] }).await.unwrap();
		controller.on_cluster_config_received().unwrap();

		let msg = FileInfoMsg {
			name: "a.txt".into(),
			folder_id: "f".into(),
			size: 0,
			block_size: 131072,
			modified_s: 0,
			deleted: false,
			version_counters: vec![],
			blocks: vec![],
		};
		controller.on_index_received(&Index { folder_id: "f".into(), files: vec![msg.clone()] }).unwrap();
		controller.on_index_update_received(&IndexUpdate { folder_id: "f".into(), files: vec![msg] }).unwrap();

		let pending = controller.take_pending_files();
		assert_eq!(pending.len(), 2);
		assert!(controller.take_pending_files().is_empty(), "draining empties the queue");
	}
}

// vim: ts=4
