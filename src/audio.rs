//! Sound cues derived from simulation events
//!
//! Playback belongs to the host; this only decides which cue plays and how
//! loud.

use serde::Serialize;

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundEffect {
    /// A plant fired
    Shoot,
    /// Resource appeared or was collected
    Sun,
    /// Plant placed
    Place,
    /// An attacker is eating
    Chomp,
    /// Game over
    Over,
}

impl SoundEffect {
    /// Cue for an event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Fired { .. } => Some(SoundEffect::Shoot),
            GameEvent::ResourceSpawned { .. } | GameEvent::ResourceCollected { .. } => {
                Some(SoundEffect::Sun)
            }
            GameEvent::PlantPlaced { .. } => Some(SoundEffect::Place),
            GameEvent::Eating { .. } => Some(SoundEffect::Chomp),
            GameEvent::GameOver { .. } => Some(SoundEffect::Over),
            _ => None,
        }
    }
}

/// A cue ready for the host to play
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Cue {
    pub effect: SoundEffect,
    pub volume: f32,
}

/// Cues for a batch of events; each effect plays at most once per batch
pub fn cues_for(events: &[GameEvent], settings: &Settings, muted: bool) -> Vec<Cue> {
    let volume = settings.effective_sfx_volume(muted);
    if volume <= 0.0 {
        return Vec::new();
    }
    let mut cues: Vec<Cue> = Vec::new();
    for effect in events.iter().filter_map(SoundEffect::for_event) {
        if !cues.iter().any(|c| c.effect == effect) {
            cues.push(Cue { effect, volume });
        }
    }
    cues
}
