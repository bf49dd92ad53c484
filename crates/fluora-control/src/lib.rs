//! Fluora Control - OSC command and telemetry layer for the Fluora plant
//!
//! This crate talks to a Fluora LED plant over UDP:
//! - **Commands**: fire-and-forget OSC messages for power, brightness,
//!   animations, palette and audio response
//! - **Telemetry**: reassembly of the plant's 13-fragment JSON state
//!   pushes into a shared state record
//!
//! The command path is unacknowledged by design: the device neither
//! confirms nor retries, and neither does this crate. The telemetry path
//! is receive-only and recovers locally from every malformed frame.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fluora_control::{FluoraApi, FluoraConfig};
//!
//! # async fn demo() -> fluora_control::Result<()> {
//! let config = FluoraConfig::new("192.168.4.48:12345");
//! let mut api = FluoraApi::connect(config).await?;
//!
//! api.client().power(1)?;
//! api.client().brightness_set(0.8)?;
//! api.client().animation_set("Party")?;
//!
//! println!("{:?}", api.state());
//! api.shutdown().await;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`client`] - OSC command encoding and sending
//! - [`telemetry`] - fragment reassembly, state projection, receive loop
//! - [`config`] - connection configuration
//! - [`api`] - facade bundling a command client with a state server
//! - [`error`] - error types

#![allow(missing_docs)]

/// Facade bundling client and state server
pub mod api;
/// OSC command client
pub mod client;
/// Connection configuration
pub mod config;
/// Error types
pub mod error;
/// Telemetry ingestion
pub mod telemetry;

// Re-exports
pub use api::FluoraApi;
pub use client::FluoraClient;
pub use config::{FluoraConfig, DEFAULT_TELEMETRY_PORT};
pub use error::{ControlError, Result};
pub use telemetry::{FrameAssembler, StateServer, StateStore, TelemetryError};

// Domain model re-exports for consumers
pub use fluora_core::{AnimationMode, AnimationSelection, CatalogError, FluoraState};
