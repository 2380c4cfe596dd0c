//! Difficulty tiers and their tuning tables

use serde::{Deserialize, Serialize};

/// Difficulty tier, persisted under the names the start screen uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Difficulty {
    #[default]
    #[serde(rename = "Andi")]
    Easy,
    #[serde(rename = "Schuh")]
    Medium,
    #[serde(rename = "Mexxx")]
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Andi",
            Difficulty::Medium => "Schuh",
            Difficulty::Hard => "Mexxx",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "andi" | "easy" => Some(Difficulty::Easy),
            "schuh" | "medium" => Some(Difficulty::Medium),
            "mexxx" | "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Parse a tier, falling back to the easiest one for unknown input
    pub fn parse_or_default(s: &str) -> Self {
        Self::from_str(s).unwrap_or_else(|| {
            log::warn!("Unknown difficulty {:?}, using {}", s, Difficulty::Easy.as_str());
            Difficulty::Easy
        })
    }

    /// HUD icon for the tier
    pub fn icon(&self) -> &'static str {
        match self {
            Difficulty::Easy => "🐔",
            Difficulty::Medium => "🦃",
            Difficulty::Hard => "🔥",
        }
    }

    /// Spawn speed multiplier applied to every entity's initial velocity
    pub fn speed_multiplier(&self) -> f32 {
        match self {
            Difficulty::Easy => 1.0,
            Difficulty::Medium => 1.5,
            Difficulty::Hard => 2.0,
        }
    }

    /// Sprite size as a fraction of the canvas (width, height)
    pub fn size_ratio(&self) -> (f32, f32) {
        match self {
            Difficulty::Easy => (0.09, 0.09),
            Difficulty::Medium => (0.06, 0.08),
            Difficulty::Hard => (0.055, 0.055),
        }
    }

    /// One-time velocity scale obstacles apply on their first update
    pub fn obstacle_scale(&self) -> f32 {
        match self {
            Difficulty::Easy => 1.0,
            Difficulty::Medium => 1.8,
            Difficulty::Hard => 1.0,
        }
    }

    /// Whether common collectibles fly erratically
    pub fn erratic_flight(&self) -> bool {
        *self == Difficulty::Hard
    }

    /// Whether bonus obstacles switch to spiral movement
    pub fn spiral_bonus(&self) -> bool {
        *self == Difficulty::Hard
    }
}

/// Size ratio used by bonus obstacles on the spiral tier
pub const SPIRAL_BONUS_SIZE_RATIO: f32 = 0.12;
