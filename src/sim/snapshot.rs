//! Read-only view handed to rendering and audio collaborators

use serde::Serialize;

use super::geometry::Board;
use super::state::{Attacker, GameState, Plant, Projectile, Resource, RoundPhase};

/// Copy of everything presentation needs after a tick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub time: f64,
    pub balance: u32,
    pub round: u32,
    pub phase: RoundPhase,
    pub paused: bool,
    pub game_over: bool,
    pub muted: bool,
    /// Whether the "round start" announcement is showing
    pub round_banner: bool,
    pub board: Board,
    pub tile_size: (f32, f32),
    pub plants: Vec<Plant>,
    pub projectiles: Vec<Projectile>,
    pub attackers: Vec<Attacker>,
    pub resources: Vec<Resource>,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            time: state.time,
            balance: state.balance,
            round: state.round.number,
            phase: state.round.phase,
            paused: state.paused,
            game_over: state.is_over(),
            muted: state.muted,
            round_banner: state.banner_remaining > 0.0,
            board: state.board,
            tile_size: state.board.tile_size(),
            plants: state.plants.as_slice().to_vec(),
            projectiles: state.projectiles.as_slice().to_vec(),
            attackers: state.attackers.as_slice().to_vec(),
            resources: state.resources.as_slice().to_vec(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    #[test]
    fn test_snapshot_json_shape() {
        let state = GameState::new(1, &Tuning::default());
        let json = Snapshot::capture(&state).to_json().expect("serializable");
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["balance"], 100);
        assert_eq!(value["round"], 1);
        assert_eq!(value["phase"], "Idle");
        assert_eq!(value["round_banner"], false);
        assert!(value["plants"].as_array().unwrap().is_empty());
    }
}
