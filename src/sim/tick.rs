//! Simulation tick
//!
//! Core game loop that advances the simulation by one frame. Phases run in a
//! fixed order against the same stores:
//!
//! 0. scheduled events due by the new clock
//! 1. plant cooldowns (emission and fire)
//! 2. projectile travel
//! 3. projectile hits, on positions from before attacker movement
//! 4. occupancy, eating and attacker movement
//! 5. resource decay
//! 6. wave director
//! 7. game over check

use super::scheduler::Scheduled;
use super::state::{GameEvent, GameState, RoundPhase};
use super::{combat, eating, economy, wave};
use crate::consts::MAX_FRAME_DT;
use crate::tuning::Tuning;

/// Advance the game state by one frame of `dt` seconds (clamped)
pub fn tick(state: &mut GameState, tuning: &Tuning, dt: f32) {
    // Don't tick if paused or game over
    if state.is_frozen() {
        return;
    }
    let dt = if dt.is_finite() {
        dt.clamp(0.0, MAX_FRAME_DT)
    } else {
        0.0
    };
    state.time += f64::from(dt);

    run_scheduled(state, tuning);
    economy::plant_phase(state, tuning, dt);
    combat::advance_projectiles(state, tuning, dt);
    combat::resolve_hits(state, tuning);
    eating::resolve_eating(state, tuning, dt);
    economy::decay_resources(state, dt);
    state.banner_remaining = (state.banner_remaining - dt).max(0.0);
    wave::evaluate(state, tuning);
    check_game_over(state);
}

fn run_scheduled(state: &mut GameState, tuning: &Tuning) {
    for event in state.scheduler.drain_due(state.time) {
        match event {
            Scheduled::SpawnAttacker { round } => wave::spawn_attacker(state, tuning, round),
            Scheduled::AdvanceRound { round } => wave::advance_round(state, round),
            Scheduled::FollowUpShot { row, col } => {
                let x = combat::muzzle_x(&state.board, tuning, col);
                combat::spawn_projectile(state, tuning, row, x);
            }
        }
    }
}

/// Enter the terminal state once any attacker reaches x <= 0
fn check_game_over(state: &mut GameState) {
    let breached = state.attackers.iter().find(|a| a.x <= 0.0).map(|a| a.row);
    let Some(row) = breached else {
        return;
    };
    let round = state.round.number;
    state.round.phase = RoundPhase::GameOver;
    state.round.pending_spawns = 0;
    state.scheduler.cancel_all();
    state.banner_remaining = 0.0;
    state.emit(GameEvent::GameOver { round });
    log::info!("Game over in round {} (lane {} breached)", round, row);
}
