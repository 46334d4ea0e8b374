//! Opponent difficulty profiles

use serde::{Deserialize, Serialize};

/// Difficulty levels selectable by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

/// Tuning that drives the AI decision engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyProfile {
    /// Seconds between AI decisions (shorter = more reactive)
    pub decision_interval: f32,
    /// Cap on the straight-ahead clearance scan, in cells
    pub clearance_cells: u32,
    /// Scales the post-turn cooldown distance
    pub cooldown_factor: f32,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "medium" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn profile(&self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile {
                decision_interval: 0.20,
                clearance_cells: 6,
                cooldown_factor: 1.5,
            },
            Difficulty::Normal => DifficultyProfile {
                decision_interval: 0.10,
                clearance_cells: 8,
                cooldown_factor: 1.0,
            },
            Difficulty::Hard => DifficultyProfile {
                decision_interval: 0.05,
                clearance_cells: 10,
                cooldown_factor: 0.6,
            },
        }
    }
}
