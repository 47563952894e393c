//! # bepsync
//!
//! A peer-to-peer file-synchronization engine compatible with the Syncthing
//! Block Exchange Protocol (BEP): a content-addressed, deduplicated block
//! model; a vector-clock version scheme for detecting concurrent edits; a
//! closed diff pipeline that is the sole path to mutating cluster state; and
//! an actor mesh (scanner, hasher pool, file I/O, watcher, per-peer
//! controller) coordinated through owned mailbox messages.
//!
//! Wire framing, the BEP protobuf schema, compression, TLS, and peer
//! discovery are all out of scope — [`bep`] defines the semantic boundary a
//! transport would plug into via [`controller::PeerTransport`].

#![deny(unsafe_code)]
#![warn(dead_code)]

pub mod bep;
pub mod cli;
pub mod config;
pub mod controller;
pub mod diff;
pub mod error;
pub mod file_io;
pub mod hasher;
pub mod iterator;
pub mod logging;
pub mod model;
pub mod persistence;
pub mod resolver;
pub mod scanner;
pub mod sequencer;
pub mod watcher;

pub use error::CoreError;
pub use model::Cluster;

// vim: ts=4
