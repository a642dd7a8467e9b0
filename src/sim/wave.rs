//! Wave director
//!
//! `Idle -> Spawning -> Cleared -> Idle(round + 1)`, with `GameOver` reachable
//! from anywhere. Spawns and the round advance are deferred through the
//! scheduler so they follow simulated time.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::scheduler::Scheduled;
use super::state::{Attacker, GameEvent, GameState, RoundPhase};
use crate::consts::ROWS;
use crate::tuning::{MAX_ROUND_SPAWNS, Tuning};

/// Difficulty of one round
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundConfig {
    /// Attackers spawned this round
    pub count: u32,
    pub hp: f32,
    /// Base speed before per-spawn jitter
    pub speed: f32,
}

/// Round difficulty for a 1-based round number
pub fn round_config(tuning: &Tuning, round: u32) -> RoundConfig {
    let step = round.saturating_sub(1) as f32;
    RoundConfig {
        count: tuning
            .count_per_round
            .saturating_mul(round)
            .saturating_add(tuning.base_count)
            .min(MAX_ROUND_SPAWNS),
        hp: tuning.attacker_base_hp * (1.0 + tuning.hp_growth * step),
        speed: tuning.attacker_base_speed * (1.0 + tuning.speed_growth * step),
    }
}

/// Tick phase 6: advance the state machine on board emptiness
pub fn evaluate(state: &mut GameState, tuning: &Tuning) {
    if !state.attackers.is_empty() {
        return;
    }
    match state.round.phase {
        RoundPhase::Idle => start_round(state, tuning),
        RoundPhase::Spawning if state.round.pending_spawns == 0 => {
            let round = state.round.number;
            state.round.phase = RoundPhase::Cleared;
            let at = state.time + f64::from(tuning.round_delay);
            state.scheduler.schedule(at, Scheduled::AdvanceRound { round });
            state.emit(GameEvent::RoundCleared { round });
            log::info!("Round {} cleared", round);
        }
        _ => {}
    }
}

/// Begin the current round: schedule its staggered spawns
fn start_round(state: &mut GameState, tuning: &Tuning) {
    let round = state.round.number;
    let config = round_config(tuning, round);

    for i in 0..config.count {
        let at = state.time + f64::from(tuning.spawn_stagger) * f64::from(i);
        state.scheduler.schedule(at, Scheduled::SpawnAttacker { round });
    }
    state.round.phase = RoundPhase::Spawning;
    state.round.pending_spawns = config.count;
    state.banner_remaining = tuning.banner_duration;
    state.emit(GameEvent::RoundStarted { round });
    log::info!(
        "Round {} started: {} attackers, hp {}, speed {}",
        round,
        config.count,
        config.hp,
        config.speed
    );
}

/// Scheduled spawn: one attacker in a random lane at the far edge
pub fn spawn_attacker(state: &mut GameState, tuning: &Tuning, round: u32) {
    debug_assert!(
        state.round.phase == RoundPhase::Spawning && state.round.number == round,
        "stale spawn for round {round}"
    );
    if state.round.pending_spawns == 0 || state.round.number != round {
        return;
    }

    let config = round_config(tuning, round);
    let row = state.rng.random_range(0..ROWS);
    let jitter = state
        .rng
        .random_range(tuning.speed_jitter_min..tuning.speed_jitter_max);
    let id = state.next_entity_id();
    state.attackers.insert(Attacker {
        id,
        row,
        x: state.board.width + tuning.spawn_offset,
        hp: config.hp,
        speed: config.speed * jitter,
        eating: false,
    });
    state.round.pending_spawns -= 1;
    state.emit(GameEvent::AttackerSpawned { attacker: id, row });
    log::debug!("Spawned attacker {} in lane {}", id, row);
}

/// Scheduled round advance after the clear delay
pub fn advance_round(state: &mut GameState, round: u32) {
    debug_assert!(
        state.round.phase == RoundPhase::Cleared && state.round.number == round,
        "stale round advance for round {round}"
    );
    if state.round.phase != RoundPhase::Cleared || state.round.number != round {
        return;
    }
    state.round.number += 1;
    state.round.phase = RoundPhase::Idle;
    log::info!("Advancing to round {}", state.round.number);
}
