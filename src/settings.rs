//! Player preferences
//!
//! Kept apart from balance tuning; the host decides where to store them.

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Start the session muted
    pub start_muted: bool,

    // === Behaviour ===
    /// Pause when the host reports the game hidden (tab switch, minimize)
    pub pause_when_hidden: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 1.0,
            sfx_volume: 0.4,
            music_volume: 0.25,
            start_muted: false,
            pause_when_hidden: true,
        }
    }
}

impl Settings {
    /// Effective sound effect volume (0 when muted)
    pub fn effective_sfx_volume(&self, muted: bool) -> f32 {
        if muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// Effective music volume (0 when muted)
    pub fn effective_music_volume(&self, muted: bool) -> f32 {
        if muted {
            0.0
        } else {
            (self.master_volume * self.music_volume).clamp(0.0, 1.0)
        }
    }

    /// Load settings from JSON, falling back to defaults on bad input
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => {
                log::info!("Loaded settings");
                settings
            }
            Err(e) => {
                log::warn!("Ignoring unreadable settings: {}", e);
                Self::default()
            }
        }
    }
}
