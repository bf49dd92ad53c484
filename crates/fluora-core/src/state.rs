//! Canonical plant state
//!
//! One `FluoraState` record holds the most recent telemetry snapshot of a
//! plant. The `animation_*` and `palette_*` dashboard fields are optional
//! because the device only reports the widgets of the currently loaded
//! animation; a telemetry frame that omits them leaves the previous values
//! in place rather than resetting them.

use serde::{Deserialize, Serialize};

/// Most recent known state of a Fluora plant
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FluoraState {
    /// Device model identifier
    pub model: String,
    /// WiFi signal strength (dBm)
    pub rssi: i32,
    /// Device MAC address
    pub mac_address: String,

    /// Audio filter level (0-1)
    pub audio_filter: f32,
    /// Audio release level (0-1)
    pub audio_release: f32,
    /// Audio gain level (0-1)
    pub audio_gain: f32,
    /// Audio attack level (0-1)
    pub audio_attack: f32,

    /// Whether the ambient light sensor is enabled
    pub light_sensor_enabled: bool,

    /// Whether the main light is currently displaying
    pub main_light_on: bool,
    /// Master brightness (0-1)
    pub brightness: f32,

    /// Animation mode code reported by the engine
    pub animation_mode: u32,
    /// Index of the active animation within its mode
    pub active_animation: u32,
    /// Bloom level of the loaded animation (0-1), once reported
    pub animation_bloom: Option<f32>,
    /// Speed level of the loaded animation (0-1), once reported
    pub animation_speed: Option<f32>,
    /// Size level of the loaded animation (0-1), once reported
    pub animation_size: Option<f32>,

    /// Palette saturation (0-1), once reported
    pub palette_saturation: Option<f32>,
    /// Palette hue (0-1), once reported
    pub palette_hue: Option<f32>,
}
