//! Demo runner settings
//!
//! Stored as JSON next to the binary; anything missing falls back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_ARENA_HEIGHT, DEFAULT_ARENA_WIDTH};
use crate::sim::Difficulty;

/// How the player agent is driven in the headless runner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlayerDriver {
    /// Decision engine steers the player as well (attract/demo mode)
    #[default]
    Autopilot,
    /// Seeded random turns
    Wanderer,
}

impl PlayerDriver {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerDriver::Autopilot => "autopilot",
            PlayerDriver::Wanderer => "wanderer",
        }
    }
}

/// Runner settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Opponent difficulty
    pub difficulty: Difficulty,

    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,

    // === Demo ===
    /// Rounds to play before exiting
    pub rounds: u32,
    /// Safety cap on ticks per round
    pub max_ticks_per_round: u64,
    pub player_driver: PlayerDriver,
    /// Seed for the wanderer driver
    pub seed: u64,
    /// Chance per tick that the wanderer tries a turn (0.0 - 1.0)
    pub wander_turn_chance: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,

            arena_width: DEFAULT_ARENA_WIDTH,
            arena_height: DEFAULT_ARENA_HEIGHT,

            rounds: 5,
            max_ticks_per_round: 60 * 60 * 10,
            player_driver: PlayerDriver::Autopilot,
            seed: 0x5eed,
            wander_turn_chance: 0.02,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Option<Self> {
        match serde_json::from_str::<Settings>(json) {
            Ok(settings) => Some(settings.sanitized()),
            Err(err) => {
                log::warn!("Invalid settings JSON: {}", err);
                None
            }
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Load from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => {
                if let Some(settings) = Self::from_json(&json) {
                    log::info!("Loaded settings from {}", path.display());
                    return settings;
                }
            }
            Err(err) => log::warn!("Could not read {}: {}", path.display(), err),
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Replace out-of-range values with defaults
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.arena_width.is_finite() && self.arena_width > 0.0) {
            self.arena_width = defaults.arena_width;
        }
        if !(self.arena_height.is_finite() && self.arena_height > 0.0) {
            self.arena_height = defaults.arena_height;
        }
        if self.max_ticks_per_round == 0 {
            self.max_ticks_per_round = defaults.max_ticks_per_round;
        }
        self.wander_turn_chance = if self.wander_turn_chance.is_finite() {
            self.wander_turn_chance.clamp(0.0, 1.0)
        } else {
            defaults.wander_turn_chance
        };
        self
    }
}
