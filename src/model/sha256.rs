//! Content-addressing and device-identity hash newtype.

use std::fmt;

/// A 32-byte SHA-256 digest, used both as a block's content hash and as a
/// device identity.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct Sha256(pub [u8; 32]);

impl Sha256 {
	pub fn from_bytes(bytes: &[u8]) -> Result<Self, InvalidLength> {
		if bytes.len() != 32 {
			return Err(InvalidLength(bytes.len()));
		}
		let mut buf = [0u8; 32];
		buf.copy_from_slice(bytes);
		Ok(Sha256(buf))
	}

	pub fn as_bytes(&self) -> &[u8; 32] {
		&self.0
	}
}

impl fmt::Debug for Sha256 {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Sha256({})", hex::encode(self.0))
	}
}

impl fmt::Display for Sha256 {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", hex::encode(self.0))
	}
}

#[derive(Debug)]
pub struct InvalidLength(pub usize);

impl fmt::Display for InvalidLength {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "expected 32 bytes, got {}", self.0)
	}
}

impl std::error::Error for InvalidLength {}


// vim: ts=4
