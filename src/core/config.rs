//! Keeper configuration with documented constants
//!
//! Every tuning knob of the keeper policies lives here. Values are loaded
//! from TOML (`data/keeper_ai/{name}.toml`); any missing section falls back
//! to the defaults below.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::{KeeperError, Result};

/// Largest accepted room side; keeps footprint areas far from `i32` overflow
pub const MAX_ROOM_SIZE: i32 = 64;

/// Timers gating how often the expensive policies run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    /// Cooldown reset value after each room-planning pass
    pub room_search_interval: f64,

    /// Cooldown reset value after each gold search
    ///
    /// Gold searches scan the whole map, so they run five times less often
    /// than room planning at the default values.
    pub gold_search_interval: f64,

    /// Multiplier applied to elapsed time before it is taken off a cooldown
    ///
    /// At 10.0 and one-second ticks, a 120 room interval elapses in 12 ticks.
    pub time_scale: f64,

    /// Upper bound (inclusive) of the random defense cooldown, in ticks
    pub defense_cooldown_max: u32,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            room_search_interval: 120.0,
            gold_search_interval: 600.0,
            time_scale: 10.0,
            defense_cooldown_max: 5,
        }
    }
}

/// Treasury thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    /// Treasury tiles the keeper keeps at all times
    pub min_treasury_tiles: usize,

    /// Below this much free treasury space the keeper stops mining and
    /// considers building more storage
    pub min_empty_storage: i64,

    /// Funds above which extra treasuries are never built
    pub treasury_funds_ceiling: i64,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            min_treasury_tiles: 3,
            min_empty_storage: 100,
            treasury_funds_ceiling: 20_000,
        }
    }
}

/// Spatial parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Side of the square footprint used for every planned room
    pub room_size: i32,

    /// Fleeing creatures closer than this (on both axes) to the home anchor
    /// are considered safe
    pub rescue_radius: i32,

    /// How many neighbor levels of gold are queued around a found deposit
    pub gold_cluster_depth: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            room_size: 5,
            rescue_radius: 5,
            gold_cluster_depth: 2,
        }
    }
}

/// Complete keeper configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeeperConfig {
    /// Name of this configuration (set from filename)
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub timers: TimerConfig,
    #[serde(default)]
    pub economy: EconomyConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
}

impl KeeperConfig {
    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.timers.time_scale <= 0.0 {
            return Err(format!(
                "time_scale ({}) must be positive",
                self.timers.time_scale
            ));
        }

        if self.timers.room_search_interval < 0.0 || self.timers.gold_search_interval < 0.0 {
            return Err("Search intervals must not be negative".into());
        }

        if !(1..=MAX_ROOM_SIZE).contains(&self.layout.room_size) {
            return Err(format!(
                "room_size ({}) must be between 1 and {}",
                self.layout.room_size, MAX_ROOM_SIZE
            ));
        }

        if self.layout.rescue_radius < 0 {
            return Err("rescue_radius must not be negative".into());
        }

        if self.economy.min_empty_storage < 0 || self.economy.treasury_funds_ceiling < 0 {
            return Err("Economy thresholds must not be negative".into());
        }

        Ok(())
    }
}

/// Load a named configuration from `data/keeper_ai/{name}.toml`
pub fn load_config(name: &str) -> Result<KeeperConfig> {
    let mut config = load_config_from(&config_path(name))?;
    config.name = name.to_string();
    Ok(config)
}

/// Load and validate a configuration from an explicit path
pub fn load_config_from(path: &Path) -> Result<KeeperConfig> {
    let contents = fs::read_to_string(path)?;
    let mut config: KeeperConfig = toml::from_str(&contents)?;

    if config.name.is_empty() {
        if let Some(stem) = path.file_stem() {
            config.name = stem.to_string_lossy().into_owned();
        }
    }

    config.validate().map_err(KeeperError::InvalidConfig)?;
    Ok(config)
}

fn config_path(name: &str) -> PathBuf {
    PathBuf::from("data/keeper_ai").join(format!("{}.toml", name))
}
