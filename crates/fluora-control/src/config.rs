//! Connection configuration

use serde::{Deserialize, Serialize};

/// Default UDP port the plant pushes state updates to
pub const DEFAULT_TELEMETRY_PORT: u16 = 12345;

/// Configuration for one plant connection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FluoraConfig {
    /// Address the plant listens on for OSC commands,
    /// e.g. `"192.168.4.48:12345"`
    pub plant_addr: String,
    /// Local address telemetry is received on
    pub listen_addr: String,
}

impl Default for FluoraConfig {
    fn default() -> Self {
        Self {
            plant_addr: String::new(),
            listen_addr: format!("0.0.0.0:{DEFAULT_TELEMETRY_PORT}"),
        }
    }
}

impl FluoraConfig {
    /// Create a config for a plant at the given command address
    pub fn new(plant_addr: impl Into<String>) -> Self {
        Self {
            plant_addr: plant_addr.into(),
            ..Default::default()
        }
    }

    /// Set the local telemetry listen address
    pub fn with_listen_addr(mut self, addr: impl Into<String>) -> Self {
        self.listen_addr = addr.into();
        self
    }
}
