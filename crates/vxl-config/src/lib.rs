//! World dimensions and physics tuning, loaded from TOML.
#![forbid(unsafe_code)]

use serde::Deserialize;
use std::error::Error;
use std::fmt;
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct SimConfig {
    #[serde(default)]
    pub world: WorldDims,
    #[serde(default)]
    pub trace: TraceParams,
    #[serde(default)]
    pub player: PlayerParams,
    #[serde(default)]
    pub grenade: GrenadeParams,
}

impl SimConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: SimConfig = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Checks the invariants the store and the clamp tables rely on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.world.validate()?;
        if self.trace.sight_max_steps == 0 {
            return Err(ConfigError::NonPositive("trace.sight_max_steps"));
        }
        if self.trace.block_line_max == 0 {
            return Err(ConfigError::NonPositive("trace.block_line_max"));
        }
        let positive = [
            ("player.motion_scale", self.player.motion_scale),
            ("player.climb_ease_secs", self.player.climb_ease_secs),
            ("player.max_position_drift", self.player.max_position_drift),
            ("grenade.motion_scale", self.grenade.motion_scale),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive(name));
            }
        }
        if !(self.grenade.restitution >= 0.0 && self.grenade.restitution <= 1.0) {
            return Err(ConfigError::OutOfRange {
                field: "grenade.restitution",
                value: self.grenade.restitution,
            });
        }
        if self.player.fall_damage_velocity < self.player.fall_slow_down {
            return Err(ConfigError::OutOfRange {
                field: "player.fall_damage_velocity",
                value: self.player.fall_damage_velocity,
            });
        }
        Ok(())
    }
}

pub fn load_config_from_path(path: &Path) -> Result<SimConfig, Box<dyn Error>> {
    let s = fs::read_to_string(path)?;
    let cfg = SimConfig::from_toml_str(&s)?;
    log::info!(
        "loaded sim config from {} (world {}x{}x{})",
        path.display(),
        cfg.world.size_x,
        cfg.world.size_y,
        cfg.world.size_z
    );
    Ok(cfg)
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    NotPowerOfTwo { axis: &'static str, value: u32 },
    TooShallow(u32),
    NonPositive(&'static str),
    OutOfRange { field: &'static str, value: f32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NotPowerOfTwo { axis, value } => {
                write!(f, "world.{axis} must be a power of two, got {value}")
            }
            ConfigError::TooShallow(z) => write!(f, "world.size_z must be at least 3, got {z}"),
            ConfigError::NonPositive(field) => write!(f, "{field} must be positive"),
            ConfigError::OutOfRange { field, value } => {
                write!(f, "{field} is out of range: {value}")
            }
        }
    }
}

impl Error for ConfigError {}

// --- World ---

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
pub struct WorldDims {
    #[serde(default = "default_size_xy")]
    pub size_x: u32,
    #[serde(default = "default_size_xy")]
    pub size_y: u32,
    #[serde(default = "default_size_z")]
    pub size_z: u32,
}

fn default_size_xy() -> u32 {
    512
}
fn default_size_z() -> u32 {
    64
}

impl Default for WorldDims {
    fn default() -> Self {
        Self {
            size_x: default_size_xy(),
            size_y: default_size_xy(),
            size_z: default_size_z(),
        }
    }
}

impl WorldDims {
    pub const fn new(size_x: u32, size_y: u32, size_z: u32) -> Self {
        Self {
            size_x,
            size_y,
            size_z,
        }
    }

    #[inline]
    pub fn volume(&self) -> usize {
        self.size_x as usize * self.size_y as usize * self.size_z as usize
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (axis, value) in [("size_x", self.size_x), ("size_y", self.size_y)] {
            if !value.is_power_of_two() {
                return Err(ConfigError::NotPowerOfTwo { axis, value });
            }
        }
        if self.size_z < 3 {
            return Err(ConfigError::TooShallow(self.size_z));
        }
        Ok(())
    }
}

// --- Traversal ---

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TraceParams {
    /// Step budget for line-of-sight tests.
    pub sight_max_steps: u32,
    /// Longest block line the enumerator will return.
    pub block_line_max: usize,
}

impl Default for TraceParams {
    fn default() -> Self {
        Self {
            sight_max_steps: 32,
            block_line_max: 50,
        }
    }
}

// --- Player ---

#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlayerParams {
    /// World units moved per unit of velocity per second.
    pub motion_scale: f32,
    pub gravity: f32,
    pub jump_velocity: f32,
    pub airborne_accel: f32,
    pub crouch_accel: f32,
    /// Sneaking or aiming down sights with the gun.
    pub aim_accel: f32,
    pub sprint_accel: f32,
    /// Horizontal drag while airborne. Zero leaves airborne speed unscaled.
    pub air_friction: f32,
    pub ground_friction: f32,
    pub water_friction: f32,
    pub climb_damping: f32,
    pub climb_ease_secs: f32,
    /// Looking down at least this steeply disables autoclimb.
    pub steep_look: f32,
    /// Landing below this depth counts as wading.
    pub wade_level: f32,
    pub fall_slow_down: f32,
    pub fall_damage_velocity: f32,
    pub fall_damage_scalar: f32,
    pub landing_damping: f32,
    pub max_position_drift: f32,
}

impl Default for PlayerParams {
    fn default() -> Self {
        Self {
            motion_scale: 32.0,
            gravity: 1.0,
            jump_velocity: 0.36,
            airborne_accel: 0.1,
            crouch_accel: 0.3,
            aim_accel: 0.5,
            sprint_accel: 1.3,
            air_friction: 0.0,
            ground_friction: 4.0,
            water_friction: 6.0,
            climb_damping: 0.5,
            climb_ease_secs: 0.25,
            steep_look: 0.5,
            wade_level: 61.0,
            fall_slow_down: 0.24,
            fall_damage_velocity: 0.58,
            fall_damage_scalar: 4096.0,
            landing_damping: 0.5,
            max_position_drift: 3.0,
        }
    }
}

// --- Grenade ---

#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct GrenadeParams {
    pub motion_scale: f32,
    pub gravity: f32,
    /// Fraction of velocity kept after a bounce.
    pub restitution: f32,
    /// Bounces faster than this on any axis are audible.
    pub sound_threshold: f32,
}

impl Default for GrenadeParams {
    fn default() -> Self {
        Self {
            motion_scale: 32.0,
            gravity: 1.0,
            restitution: 0.36,
            sound_threshold: 0.1,
        }
    }
}
