//! Telemetry ingestion from the plant
//!
//! The plant periodically pushes its full state as one JSON document
//! fragmented across exactly 13 UDP datagrams. This module reassembles
//! those fragments, projects the document onto [`fluora_core::FluoraState`]
//! and keeps the most recent state in a shared store.
//!
//! - [`assembler`] - the per-frame reassembly state machine
//! - [`decode`] - fixed-path projection of the parsed document
//! - [`store`] - the shared single-record state store
//! - [`server`] - the UDP receive loop

pub mod assembler;
pub mod decode;
pub mod server;
pub mod store;

pub use assembler::FrameAssembler;
pub use decode::project_state;
pub use server::StateServer;
pub use store::StateStore;

use thiserror::Error;

/// Telemetry reassembly and decode errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// Datagram shorter than the 4-byte fragment header
    #[error("Datagram too short: {0} bytes")]
    Truncated(usize),

    /// Fragment sequence number outside 0-12
    #[error("Fragment sequence {0} out of range")]
    InvalidSequence(u8),

    /// Fragment payload is not valid UTF-8
    #[error("Fragment is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    /// Reassembled frame did not parse as JSON (including frames garbled
    /// by a lost intermediate fragment)
    #[error("Invalid JSON in telemetry frame: {0}")]
    Json(#[from] serde_json::Error),

    /// A required path is absent from the document
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// A present path holds a value of the wrong type
    #[error("Unexpected type at {0}")]
    TypeMismatch(&'static str),
}
