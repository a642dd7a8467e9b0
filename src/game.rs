//! Game controller
//!
//! Owns the simulation aggregate. Hosts feed it frame timestamps and
//! commands, and read back snapshots, events and sound cues; nothing outside
//! the controller mutates the stores.

use crate::audio::{self, Cue};
use crate::platform::FrameClock;
use crate::settings::Settings;
use crate::sim::{
    self, Command, CommandOutcome, EntityId, GameEvent, GameState, PlantKind, Snapshot,
};
use crate::tuning::Tuning;

/// Game instance holding all state
#[derive(Debug, Clone)]
pub struct Game {
    state: GameState,
    tuning: Tuning,
    settings: Settings,
    clock: FrameClock,
}

impl Game {
    pub fn new(seed: u64, tuning: Tuning, settings: Settings) -> Self {
        let mut state = GameState::new(seed, &tuning);
        state.muted = settings.start_muted;
        log::info!("Game initialized with seed: {}", seed);
        Self {
            state,
            tuning,
            settings,
            clock: FrameClock::default(),
        }
    }

    /// Default balance and preferences
    pub fn with_seed(seed: u64) -> Self {
        Self::new(seed, Tuning::default(), Settings::default())
    }

    /// Run one frame for a host timestamp in seconds
    ///
    /// Time that passes while paused is dropped, not replayed on resume.
    pub fn frame(&mut self, now_secs: f64) {
        let dt = self.clock.advance(now_secs);
        if self.state.paused {
            return;
        }
        sim::tick(&mut self.state, &self.tuning, dt);
    }

    /// Run one frame with an explicit delta (clamped like any frame)
    pub fn step(&mut self, dt: f32) {
        sim::tick(&mut self.state, &self.tuning, dt);
    }

    pub fn apply(&mut self, command: Command) -> CommandOutcome {
        let outcome = sim::apply(&mut self.state, &self.tuning, command);
        if command == Command::Reset {
            // Next frame starts a fresh delta
            self.clock.reset();
        }
        outcome
    }

    pub fn place_plant(&mut self, row: usize, col: usize, kind: PlantKind) -> CommandOutcome {
        self.apply(Command::PlacePlant { row, col, kind })
    }

    pub fn collect_resource(&mut self, id: EntityId) -> CommandOutcome {
        self.apply(Command::CollectResource { id })
    }

    pub fn set_paused(&mut self, paused: bool) -> CommandOutcome {
        self.apply(Command::SetPaused { paused })
    }

    pub fn set_muted(&mut self, muted: bool) -> CommandOutcome {
        self.apply(Command::SetMuted { muted })
    }

    pub fn reset(&mut self) -> CommandOutcome {
        self.apply(Command::Reset)
    }

    pub fn resize_board(&mut self, width: f32, height: f32) -> CommandOutcome {
        self.apply(Command::ResizeBoard { width, height })
    }

    /// Host visibility changed (tab hidden, window minimized)
    pub fn set_hidden(&mut self, hidden: bool) {
        if hidden
            && self.settings.pause_when_hidden
            && !self.state.is_over()
            && self.set_paused(true).is_applied()
        {
            log::info!("Auto-paused (hidden)");
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }

    /// Take every event emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.state.events)
    }

    /// Drain events and turn them into sound cues
    pub fn drain_cues(&mut self) -> Vec<Cue> {
        let events = self.drain_events();
        audio::cues_for(&events, &self.settings, self.state.muted)
    }

    pub fn music_volume(&self) -> f32 {
        self.settings.effective_music_volume(self.state.muted)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}
