//! Lane Defense - A lane-based tower defense simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, combat, economy, waves)
//! - `game`: Controller that owns the simulation and talks to the host
//! - `platform`: Frame clock and browser facade
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences
//! - `audio`: Event to sound cue mapping

pub mod audio;
pub mod game;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Grid dimensions (lanes x columns)
    pub const ROWS: usize = 5;
    pub const COLS: usize = 9;

    /// Upper bound on a single frame delta in seconds (absorbs backgrounded tabs)
    pub const MAX_FRAME_DT: f32 = 0.05;

    /// Board size before the host reports a measurement
    pub const DEFAULT_BOARD_WIDTH: f32 = 1200.0;
    pub const DEFAULT_BOARD_HEIGHT: f32 = 700.0;
}

/// Approximate float equality
#[inline]
pub fn approx_eq(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}
