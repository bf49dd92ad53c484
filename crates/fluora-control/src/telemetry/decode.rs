//! Projection of a telemetry document onto the canonical state record
//!
//! The device reports deeply nested JSON; the known paths are projected
//! through a fixed table instead of dynamic traversal. Required paths fail
//! the whole frame when missing. The dashboard widget and palette entries
//! are optional: the device only reports widgets of the currently loaded
//! animation, and an absent entry keeps the previously stored value. A
//! present value of the wrong type always fails the frame - no coercion.

use serde_json::Value;

use fluora_core::FluoraState;

use super::TelemetryError;

fn lookup<'a>(doc: &'a Value, path: &'static str) -> Option<&'a Value> {
    let mut node = doc;
    for key in path.split('.') {
        node = node.get(key)?;
    }
    Some(node)
}

fn require<'a>(doc: &'a Value, path: &'static str) -> Result<&'a Value, TelemetryError> {
    lookup(doc, path).ok_or(TelemetryError::MissingField(path))
}

fn require_str(doc: &Value, path: &'static str) -> Result<String, TelemetryError> {
    require(doc, path)?
        .as_str()
        .map(str::to_string)
        .ok_or(TelemetryError::TypeMismatch(path))
}

fn require_f32(doc: &Value, path: &'static str) -> Result<f32, TelemetryError> {
    require(doc, path)?
        .as_f64()
        .map(|v| v as f32)
        .ok_or(TelemetryError::TypeMismatch(path))
}

fn require_bool(doc: &Value, path: &'static str) -> Result<bool, TelemetryError> {
    require(doc, path)?
        .as_bool()
        .ok_or(TelemetryError::TypeMismatch(path))
}

fn require_i32(doc: &Value, path: &'static str) -> Result<i32, TelemetryError> {
    require(doc, path)?
        .as_i64()
        .and_then(|v| i32::try_from(v).ok())
        .ok_or(TelemetryError::TypeMismatch(path))
}

fn require_u32(doc: &Value, path: &'static str) -> Result<u32, TelemetryError> {
    require(doc, path)?
        .as_u64()
        .and_then(|v| u32::try_from(v).ok())
        .ok_or(TelemetryError::TypeMismatch(path))
}

fn require_object(doc: &Value, path: &'static str) -> Result<(), TelemetryError> {
    if require(doc, path)?.is_object() {
        Ok(())
    } else {
        Err(TelemetryError::TypeMismatch(path))
    }
}

/// Absent is fine (previous value kept); a present non-number is not
fn optional_f32(doc: &Value, path: &'static str) -> Result<Option<f32>, TelemetryError> {
    match lookup(doc, path) {
        None => Ok(None),
        Some(v) => v
            .as_f64()
            .map(|v| Some(v as f32))
            .ok_or(TelemetryError::TypeMismatch(path)),
    }
}

/// Project a parsed telemetry document onto a copy of `previous`.
///
/// Nothing is mutated on failure: the caller only commits the returned
/// record when the whole projection succeeded.
pub fn project_state(doc: &Value, previous: &FluoraState) -> Result<FluoraState, TelemetryError> {
    let mut state = previous.clone();

    state.model = require_str(doc, "model")?;
    state.rssi = require_i32(doc, "rssi")?;
    state.mac_address = require_str(doc, "network.macAddress")?;

    state.audio_filter = require_f32(doc, "audio.filter.value")?;
    state.audio_release = require_f32(doc, "audio.release.value")?;
    state.audio_gain = require_f32(doc, "audio.gain.value")?;
    state.audio_attack = require_f32(doc, "audio.attack.value")?;

    state.light_sensor_enabled = require_bool(doc, "lightSensor.enabled.value")?;
    state.brightness = require_f32(doc, "engine.brightness.value")?;
    state.main_light_on = require_bool(doc, "engine.isDisplaying.value")?;
    state.animation_mode = require_u32(doc, "engine.manualMode.loadedAnimationIndex")?;
    state.active_animation = require_u32(doc, "engine.manualMode.activeAnimationIndex.value")?;

    // Dashboard widgets are keyed by the same opaque ids the firmware uses
    // for their OSC control addresses. The containers themselves are
    // always reported; individual widgets only while loaded.
    require_object(doc, "engine.manualMode.dashboard")?;
    if let Some(v) = optional_f32(doc, "engine.manualMode.dashboard.Ve3ZS5tBUo4T.value")? {
        state.animation_bloom = Some(v);
    }
    if let Some(v) = optional_f32(doc, "engine.manualMode.dashboard.Ve3ZSfv3PK4T.value")? {
        state.animation_speed = Some(v);
    }
    if let Some(v) = optional_f32(doc, "engine.manualMode.dashboard.Ve3ZSfSgP54T.value")? {
        state.animation_size = Some(v);
    }

    require_object(doc, "engine.manualMode.palette")?;
    if let Some(v) = optional_f32(doc, "engine.manualMode.palette.saturation.value")? {
        state.palette_saturation = Some(v);
    }
    if let Some(v) = optional_f32(doc, "engine.manualMode.palette.hue.value")? {
        state.palette_hue = Some(v);
    }

    Ok(state)
}
