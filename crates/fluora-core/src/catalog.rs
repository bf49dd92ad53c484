//! Animation catalog and mode namespace rules
//!
//! The plant addresses every animation through a single flat code that
//! encodes both the mode and the mode-relative index:
//! - code 0 is reserved for AUTO mode
//! - codes 100-199 are MANUAL animations (device index = code - 100)
//! - codes 200-299 are SCENE animations (device index = code - 200)
//!
//! Display names are unique and looked up case-insensitively.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// First flat code of the MANUAL namespace
const MANUAL_BASE: u16 = 100;
/// First flat code of the SCENE namespace
const SCENE_BASE: u16 = 200;

/// Catalog lookup errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// No animation with the given display name
    #[error("Unknown animation: {0}")]
    UnknownAnimation(String),

    /// No animation mode with the given name
    #[error("Unknown animation mode: {0}")]
    UnknownMode(String),

    /// Flat code outside the 0 / 100-199 / 200-299 namespaces
    #[error("Invalid animation code: {0}")]
    InvalidAnimationCode(u16),
}

/// Animation modes of the plant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimationMode {
    /// The device cycles through animations on its own
    Auto,
    /// Preset scenes (Party, Chill, ...)
    Scene,
    /// Directly selected animations
    Manual,
}

impl AnimationMode {
    /// Integer value the device expects in a mode-select message
    pub fn wire_value(self) -> i32 {
        match self {
            AnimationMode::Auto => 0,
            AnimationMode::Scene => 1,
            AnimationMode::Manual => 2,
        }
    }
}

impl fmt::Display for AnimationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnimationMode::Auto => write!(f, "Auto"),
            AnimationMode::Scene => write!(f, "Scene"),
            AnimationMode::Manual => write!(f, "Manual"),
        }
    }
}

impl FromStr for AnimationMode {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("auto") {
            Ok(AnimationMode::Auto)
        } else if s.eq_ignore_ascii_case("scene") {
            Ok(AnimationMode::Scene)
        } else if s.eq_ignore_ascii_case("manual") {
            Ok(AnimationMode::Manual)
        } else {
            Err(CatalogError::UnknownMode(s.to_string()))
        }
    }
}

/// Animation display names and their flat codes, in discovery order
pub const ANIMATIONS: &[(&str, u16)] = &[
    // system reserved
    ("Auto", 0),
    // manual mode animations
    ("Leafswirl", 101),
    ("Snakes", 102),
    ("Stemeq", 103),
    ("Hueeq", 104),
    ("Boomclap", 105),
    ("Huecycle", 106),
    ("Rainbow", 107),
    ("Rainbowbloom", 108),
    ("Twinkle", 109),
    ("Leaffade", 110),
    ("Stemfade", 111),
    ("Solidcolor", 112),
    ("Sweep", 113),
    ("Pulse", 114),
    // scene mode animations
    ("Party", 200),
    ("Chill", 201),
    ("Focus", 202),
    ("Bedtime", 203),
    ("Awaken", 204),
];

/// A resolved animation: the mode plus the index the device expects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationSelection {
    /// Canonical display name
    pub name: &'static str,
    /// Flat catalog code
    pub code: u16,
    /// Mode namespace the code falls in
    pub mode: AnimationMode,
    /// Mode-relative device index; `None` in AUTO mode
    pub index: Option<u8>,
}

/// Classify a flat code into its mode namespace
pub fn mode_of(code: u16) -> Result<AnimationMode, CatalogError> {
    match code {
        0 => Ok(AnimationMode::Auto),
        100..=199 => Ok(AnimationMode::Manual),
        200..=299 => Ok(AnimationMode::Scene),
        _ => Err(CatalogError::InvalidAnimationCode(code)),
    }
}

fn selection(name: &'static str, code: u16) -> Result<AnimationSelection, CatalogError> {
    let mode = mode_of(code)?;
    let index = match mode {
        AnimationMode::Auto => None,
        AnimationMode::Manual => Some((code - MANUAL_BASE) as u8),
        AnimationMode::Scene => Some((code - SCENE_BASE) as u8),
    };
    Ok(AnimationSelection {
        name,
        code,
        mode,
        index,
    })
}

/// Resolve a display name (case-insensitive) to its mode and device index
pub fn resolve(name: &str) -> Result<AnimationSelection, CatalogError> {
    match ANIMATIONS.iter().find(|(n, _)| n.eq_ignore_ascii_case(name)) {
        Some(&(n, code)) => selection(n, code),
        None => Err(CatalogError::UnknownAnimation(name.to_string())),
    }
}

/// All animation display names, in stable catalog order
pub fn names() -> Vec<&'static str> {
    ANIMATIONS.iter().map(|&(name, _)| name).collect()
}
