//! Transport abstraction the controller depends on instead of a concrete
//! wire implementation — wire framing, TLS, and compression all live on the
//! other side of this trait.

use crate::bep::{ClusterConfig, Request, Response};
use crate::error::ControllerError;

#[async_trait::async_trait]
pub trait PeerTransport: Send {
	async fn send_hello(&mut self) -> Result<(), ControllerError>;
	async fn recv_hello(&mut self) -> Result<(), ControllerError>;
	async fn send_cluster_config(&mut self, config: ClusterConfig) -> Result<(), ControllerError>;
	async fn send_request(&mut self, request: Request) -> Result<Response, ControllerError>;
	async fn send_close(&mut self, reason: String) -> Result<(), ControllerError>;
}

#[cfg(test)]
pub mod tests {
	use super::*;
	use crate::bep::ResponseCode;

	#[derive(Default)]
	pub struct FakeTransport;

	#[async_trait::async_trait]
	impl PeerTransport for FakeTransport {
		async fn send_hello(&mut self) -> Result<(), ControllerError> {
			Ok(())
		}

		async fn recv_hello(&mut self) -> Result<(), ControllerError> {
			Ok(())
		}

		async fn send_cluster_config(&mut self, _config: ClusterConfig) -> Result<(), ControllerError> {
			Ok(())
		}

		async fn send_request(&mut self, request: Request) -> Result<Response, ControllerError> {
			Ok(Response { id: request.id, data: vec![], code: ResponseCode::NoError })
		}

		async fn send_close(&mut self, _reason: String) -> Result<(), ControllerError> {
			Ok(())
		}
	}
}

// vim: ts=4
