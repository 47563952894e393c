//! Logging prelude module for convenient access to tracing macros.
//!
//! This module provides convenient re-exports of common tracing macros
//! to reduce verbosity and maintain consistency across the codebase.
//!
//! # Usage
//!
//! ```ignore
//! use crate::logging::*;
//!
//! info!("This is an info message");
//! warn!("This is a warning");
//! error!("An error occurred");
//! debug!("Debug information");
//! trace!("Detailed trace information");
//! ```

pub use tracing::{debug, error, info, trace, warn};

/// Initialize the tracing subscriber with environment filter support.
///
/// `SYNCSPIRIT_LOG_LEVEL` takes precedence over `RUST_LOG`, defaulting to
/// `info` if neither is set:
///
/// ```bash
/// SYNCSPIRIT_LOG_LEVEL=debug bepsync serve
/// RUST_LOG=bepsync::scanner=trace bepsync serve
/// ```
pub fn init_tracing() {
	let filter = std::env::var("SYNCSPIRIT_LOG_LEVEL")
		.ok()
		.and_then(|v| tracing_subscriber::EnvFilter::try_new(v).ok())
		.or_else(|| tracing_subscriber::EnvFilter::try_from_default_env().ok())
		.unwrap_or_else(|| tracing_subscriber::EnvFilter::new("info"));

	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

// vim: ts=4
