//! Validated commands from the host
//!
//! A command either applies completely or is a no-op. Rejections never
//! mutate state or emit events; they are only reported back for callers
//! that care.

use serde::{Deserialize, Serialize};

use super::economy;
use super::geometry::{Board, Tile};
use super::state::{GameState, PlantKind};
use super::store::EntityId;
use crate::tuning::Tuning;

/// Commands accepted by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    PlacePlant { row: usize, col: usize, kind: PlantKind },
    CollectResource { id: EntityId },
    SetPaused { paused: bool },
    SetMuted { muted: bool },
    Reset,
    ResizeBoard { width: f32, height: f32 },
}

/// Why a command was ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoOpReason {
    Paused,
    GameOver,
    OutOfBounds,
    Occupied,
    InsufficientFunds,
    UnknownResource,
    InvalidBoard,
    /// The requested value is already in effect
    Unchanged,
}

/// Result of applying a command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandOutcome {
    Applied,
    NoOp(NoOpReason),
}

impl CommandOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, CommandOutcome::Applied)
    }
}

impl<T> From<Result<T, NoOpReason>> for CommandOutcome {
    fn from(result: Result<T, NoOpReason>) -> Self {
        match result {
            Ok(_) => CommandOutcome::Applied,
            Err(reason) => CommandOutcome::NoOp(reason),
        }
    }
}

/// Apply a command to the state
pub fn apply(state: &mut GameState, tuning: &Tuning, command: Command) -> CommandOutcome {
    let outcome: CommandOutcome = match command {
        Command::PlacePlant { row, col, kind } => {
            economy::place_plant(state, tuning, Tile::new(row, col), kind).into()
        }
        Command::CollectResource { id } => economy::collect_resource(state, tuning, id).into(),
        Command::SetPaused { paused } => set_paused(state, paused).into(),
        Command::SetMuted { muted } => set_muted(state, muted).into(),
        Command::Reset => {
            state.reset(tuning);
            log::info!("Game reset (seed {})", state.seed);
            CommandOutcome::Applied
        }
        Command::ResizeBoard { width, height } => {
            resize_board(state, tuning, width, height).into()
        }
    };

    if let CommandOutcome::NoOp(reason) = outcome {
        log::debug!("Ignored {:?}: {:?}", command, reason);
    }
    outcome
}

fn set_paused(state: &mut GameState, paused: bool) -> Result<(), NoOpReason> {
    if state.paused == paused {
        return Err(NoOpReason::Unchanged);
    }
    state.paused = paused;
    log::info!("{}", if paused { "Paused" } else { "Resumed" });
    Ok(())
}

fn set_muted(state: &mut GameState, muted: bool) -> Result<(), NoOpReason> {
    if state.muted == muted {
        return Err(NoOpReason::Unchanged);
    }
    state.muted = muted;
    Ok(())
}

/// Change the pixel mapping while keeping every entity on its logical spot
fn resize_board(
    state: &mut GameState,
    tuning: &Tuning,
    width: f32,
    height: f32,
) -> Result<(), NoOpReason> {
    if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
        return Err(NoOpReason::InvalidBoard);
    }
    let next = Board::new(
        width.max(tuning.min_board_width),
        height.max(tuning.min_board_height),
    );
    let prev = state.board;
    if next == prev {
        return Err(NoOpReason::Unchanged);
    }

    let sx = next.width / prev.width;
    let sy = next.height / prev.height;
    for attacker in state.attackers.iter_mut() {
        attacker.x *= sx;
    }
    for projectile in state.projectiles.iter_mut() {
        projectile.x *= sx;
    }
    for resource in state.resources.iter_mut() {
        resource.pos.x *= sx;
        resource.pos.y *= sy;
    }
    state.board = next;
    log::info!("Board resized to {}x{}", next.width, next.height);
    Ok(())
}
