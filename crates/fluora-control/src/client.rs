//! OSC command client for the Fluora plant
//!
//! Every command is a single fire-and-forget UDP datagram carrying one OSC
//! message. The device exposes its controls under fixed opaque addresses;
//! each message carries a two-element argument list `[value, mirror]`,
//! where `mirror` repeats the value for the power and light sensor
//! switches and is a literal integer 0 for everything else.
//!
//! Parameters are validated before any I/O happens: a rejected command
//! sends nothing.

use std::net::{SocketAddr, UdpSocket};

use rosc::{encoder, OscMessage, OscPacket, OscType};
use tracing::info;

use fluora_core::{catalog, AnimationMode, AnimationSelection};

use crate::{error::ControlError, Result};

// Control addresses of the plant. These are opaque identifiers fixed by
// the device firmware, not derived at runtime.
const ADDR_POWER: &str = "/SyYOTiXjQBjW";
const ADDR_LIGHT_SENSOR: &str = "/S53upLXAu7vg";
const ADDR_REBOOT: &str = "/pixelair/engine/reboot";
const ADDR_BRIGHTNESS: &str = "/Uv7aMFw5P2lX";
const ADDR_ANIMATION_MODE: &str = "/iwaaMkVzOfUM";
const ADDR_MANUAL_ANIMATION: &str = "/tdU63ENxy4UG";
const ADDR_SCENE_ANIMATION: &str = "/EpUwZA1GSPjO";
const ADDR_ANIMATION_BLOOM: &str = "/Ve3ZS5tBUo4T";
const ADDR_ANIMATION_SPEED: &str = "/Ve3ZSfv3PK4T";
const ADDR_ANIMATION_SIZE: &str = "/Ve3ZSfSgP54T";
const ADDR_PALETTE_SATURATION: &str = "/y687U4Zgymsj";
const ADDR_PALETTE_HUE: &str = "/ThWnxs65l0sj";
const ADDR_AUDIO_GAIN: &str = "/HwBeJeS0ufSp";
const ADDR_AUDIO_ATTACK: &str = "/HwBeGOxYN5Sp";
const ADDR_AUDIO_RELEASE: &str = "/HwBeogt1MBDp";
const ADDR_AUDIO_FILTER: &str = "/HwBeiitcOaSp";

/// Command client for one plant
pub struct FluoraClient {
    socket: UdpSocket,
    target: SocketAddr,
}

impl FluoraClient {
    /// Create a client sending to the plant's command address
    pub fn new(target: &str) -> Result<Self> {
        let socket = UdpSocket::bind("0.0.0.0:0")?;
        let target: SocketAddr = target
            .parse()
            .map_err(|e| ControlError::InvalidConfig(format!("Invalid plant address: {e}")))?;

        Ok(Self { socket, target })
    }

    /// Encode one OSC message and send it as a single datagram
    fn send(&self, addr: &str, args: Vec<OscType>) -> Result<()> {
        let packet = OscPacket::Message(OscMessage {
            addr: addr.to_string(),
            args,
        });
        let bytes = encoder::encode(&packet).map_err(|e| ControlError::OscError(e.to_string()))?;
        self.socket.send_to(&bytes, self.target)?;
        Ok(())
    }

    /// Validate a [0, 1] level and send it. NaN fails the range check.
    fn send_level(&self, param: &'static str, addr: &str, level: f32) -> Result<()> {
        if !(0.0..=1.0).contains(&level) {
            return Err(ControlError::OutOfRange {
                param,
                value: level,
            });
        }
        info!("Plant command: set {} {}", param, level);
        self.send(addr, vec![OscType::Float(level), OscType::Int(0)])
    }

    /// Validate a 0/1 switch state and send it mirrored
    fn send_switch(&self, param: &'static str, addr: &str, state: u8) -> Result<()> {
        if state > 1 {
            return Err(ControlError::InvalidState {
                param,
                value: state,
            });
        }
        info!("Plant command: {} {}", param, state);
        let value = OscType::Int(i32::from(state));
        self.send(addr, vec![value.clone(), value])
    }

    /// Change the power state of the plant (0 = off, 1 = on)
    pub fn power(&self, state: u8) -> Result<()> {
        self.send_switch("power", ADDR_POWER, state)
    }

    /// Enable or disable the ambient light sensor (0 = off, 1 = on)
    pub fn light_sensor(&self, state: u8) -> Result<()> {
        self.send_switch("light sensor", ADDR_LIGHT_SENSOR, state)
    }

    /// Reboot the plant
    pub fn reboot(&self) -> Result<()> {
        info!("Plant command: reboot");
        self.send(ADDR_REBOOT, vec![OscType::Int(1), OscType::Int(0)])
    }

    /// Set the master brightness level
    pub fn brightness_set(&self, level: f32) -> Result<()> {
        self.send_level("brightness", ADDR_BRIGHTNESS, level)
    }

    /// Set the animation mode
    pub fn animation_set_mode(&self, mode: AnimationMode) -> Result<()> {
        info!("Plant command: set animation mode {}", mode);
        self.send(
            ADDR_ANIMATION_MODE,
            vec![OscType::Int(mode.wire_value()), OscType::Int(0)],
        )
    }

    /// Select an animation by display name.
    ///
    /// Sends a mode-select message, then (for MANUAL and SCENE animations)
    /// a second message with the mode-relative index. The two sends are
    /// not transactional: if the index message fails the plant is already
    /// in the new mode, which is reported as
    /// [`ControlError::AnimationIndexNotSent`].
    pub fn animation_set(&self, name: &str) -> Result<AnimationSelection> {
        let selection = catalog::resolve(name)?;
        info!("Plant command: set animation {}", selection.name);

        self.animation_set_mode(selection.mode)?;
        match (selection.mode, selection.index) {
            (AnimationMode::Manual, Some(index)) => {
                self.send_animation_index(ADDR_MANUAL_ANIMATION, index, selection.mode)?;
            }
            (AnimationMode::Scene, Some(index)) => {
                self.send_animation_index(ADDR_SCENE_ANIMATION, index, selection.mode)?;
            }
            // AUTO carries no index message
            _ => {}
        }
        Ok(selection)
    }

    fn send_animation_index(&self, addr: &str, index: u8, mode: AnimationMode) -> Result<()> {
        self.send(addr, vec![OscType::Int(i32::from(index)), OscType::Int(0)])
            .map_err(|source| ControlError::AnimationIndexNotSent {
                mode,
                source: Box::new(source),
            })
    }

    /// Control the bloom level of the loaded animation
    pub fn animation_control_bloom(&self, bloom: f32) -> Result<()> {
        self.send_level("bloom", ADDR_ANIMATION_BLOOM, bloom)
    }

    /// Control the speed level of the loaded animation
    pub fn animation_control_speed(&self, speed: f32) -> Result<()> {
        self.send_level("speed", ADDR_ANIMATION_SPEED, speed)
    }

    /// Control the size of the loaded animation
    pub fn animation_control_size(&self, size: f32) -> Result<()> {
        self.send_level("size", ADDR_ANIMATION_SIZE, size)
    }

    /// Set the palette saturation level
    pub fn palette_saturation_set(&self, saturation: f32) -> Result<()> {
        self.send_level("palette saturation", ADDR_PALETTE_SATURATION, saturation)
    }

    /// Set the palette hue level
    pub fn palette_hue_set(&self, hue: f32) -> Result<()> {
        self.send_level("palette hue", ADDR_PALETTE_HUE, hue)
    }

    /// Set the audio gain level
    pub fn audio_gain_set(&self, gain: f32) -> Result<()> {
        self.send_level("audio gain", ADDR_AUDIO_GAIN, gain)
    }

    /// Set the audio attack level
    pub fn audio_attack_set(&self, attack: f32) -> Result<()> {
        self.send_level("audio attack", ADDR_AUDIO_ATTACK, attack)
    }

    /// Set the audio release level
    pub fn audio_release_set(&self, release: f32) -> Result<()> {
        self.send_level("audio release", ADDR_AUDIO_RELEASE, release)
    }

    /// Set the audio filter level
    pub fn audio_filter_set(&self, filter: f32) -> Result<()> {
        self.send_level("audio filter", ADDR_AUDIO_FILTER, filter)
    }

    /// List of supported animation display names
    pub fn effect_list(&self) -> Vec<&'static str> {
        catalog::names()
    }
}
