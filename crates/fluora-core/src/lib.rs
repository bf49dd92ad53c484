//! Fluora Core - Domain Model for the Fluora LED plant
//!
//! This crate contains the device-independent domain model:
//! - Animation catalog and the flat-code namespace rules
//! - Canonical plant state record
//!
//! Protocol handling (OSC command encoding, telemetry reassembly) lives in
//! `fluora-control`.

#![warn(missing_docs)]

pub mod catalog;
pub mod state;

pub use catalog::{mode_of, names, resolve, AnimationMode, AnimationSelection, CatalogError};
pub use state::FluoraState;
