//! Difficulty presets and player preferences

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Difficulty preset, selected on the menu screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "med" | "medium" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Orbs needed to win
    pub fn score_goal(&self) -> u32 {
        match self {
            Difficulty::Easy => 8,
            Difficulty::Normal => 12,
            Difficulty::Hard => 20,
        }
    }

    /// Ceiling on simultaneously active enemies
    pub fn enemy_cap(&self) -> usize {
        match self {
            Difficulty::Easy => 4,
            Difficulty::Normal => 8,
            Difficulty::Hard => 12,
        }
    }

    /// Seconds between enemy spawn waves
    pub fn spawn_interval_secs(&self) -> f32 {
        match self {
            Difficulty::Easy => 3.0,
            Difficulty::Normal => 2.0,
            Difficulty::Hard => 1.25,
        }
    }

    /// Next preset in menu order, wrapping.
    pub fn next(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Normal,
            Difficulty::Normal => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }

    /// Previous preset in menu order, wrapping.
    pub fn prev(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Hard,
            Difficulty::Normal => Difficulty::Easy,
            Difficulty::Hard => Difficulty::Normal,
        }
    }
}

/// Player preferences. The embedder persists these however it likes; the
/// crate only defines the shape and a JSON loader for the harness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Preselected difficulty shown when the menu opens
    pub difficulty: Difficulty,

    // === Audio (consumed by the external audio layer) ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Mute when the window loses focus
    pub mute_on_blur: bool,

    // === Accessibility ===
    /// Minimize the death-fade flash
    pub reduced_flash: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            master_volume: 0.8,
            sfx_volume: 1.0,
            mute_on_blur: true,
            reduced_flash: false,
        }
    }
}

impl Settings {
    /// Effective SFX gain for the audio layer
    pub fn effective_sfx_volume(&self) -> f32 {
        (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
    }

    /// Load settings, falling back to defaults on a missing or bad file.
    pub fn load_or_default(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(settings) => {
                    log::info!("loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("ignoring malformed settings {}: {e}", path.display());
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }
}
