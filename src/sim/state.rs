//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in [`GameState`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::{Board, Tile};
use super::scheduler::Scheduler;
use super::store::{Entity, EntityId, Store};
use crate::tuning::Tuning;

/// Plant types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlantKind {
    /// Emits collectible resources
    Generator,
    /// Fires one projectile per volley
    SingleShooter,
    /// Fires two projectiles per volley
    DoubleShooter,
}

impl PlantKind {
    pub const ALL: [PlantKind; 3] = [
        PlantKind::Generator,
        PlantKind::SingleShooter,
        PlantKind::DoubleShooter,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlantKind::Generator => "generator",
            PlantKind::SingleShooter => "single_shooter",
            PlantKind::DoubleShooter => "double_shooter",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "generator" => Some(PlantKind::Generator),
            "single_shooter" | "single" => Some(PlantKind::SingleShooter),
            "double_shooter" | "double" => Some(PlantKind::DoubleShooter),
            _ => None,
        }
    }
}

/// A defensive unit fixed to one tile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plant {
    pub id: EntityId,
    pub kind: PlantKind,
    pub row: usize,
    pub col: usize,
    /// Seconds until the next emission/volley (may go negative while idle)
    pub cooldown: f32,
    pub hp: f32,
}

impl Plant {
    pub fn tile(&self) -> Tile {
        Tile::new(self.row, self.col)
    }
}

impl Entity for Plant {
    fn id(&self) -> EntityId {
        self.id
    }

    fn conflicts_with(&self, other: &Self) -> bool {
        self.row == other.row && self.col == other.col
    }
}

/// A shot travelling toward the far side of its lane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: EntityId,
    pub row: usize,
    pub x: f32,
    pub speed: f32,
}

impl Entity for Projectile {
    fn id(&self) -> EntityId {
        self.id
    }
}

/// An enemy walking toward x = 0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attacker {
    pub id: EntityId,
    pub row: usize,
    pub x: f32,
    pub hp: f32,
    pub speed: f32,
    pub eating: bool,
}

impl Entity for Attacker {
    fn id(&self) -> EntityId {
        self.id
    }
}

/// A collectible dropped by a generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: EntityId,
    pub pos: Vec2,
    /// Seconds left before it expires
    pub ttl: f32,
}

impl Entity for Resource {
    fn id(&self) -> EntityId {
        self.id
    }
}

/// Wave director phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Waiting for the board to empty before starting the round
    Idle,
    /// Spawns are scheduled or attackers are alive
    Spawning,
    /// Round beaten; the next one starts after a delay
    Cleared,
    /// An attacker reached the defender's edge
    GameOver,
}

/// Round progression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    /// 1-based round number
    pub number: u32,
    pub phase: RoundPhase,
    /// Scheduled spawns that have not fired yet
    pub pending_spawns: u32,
}

impl Default for RoundState {
    fn default() -> Self {
        Self {
            number: 1,
            phase: RoundPhase::Idle,
            pending_spawns: 0,
        }
    }
}

/// Discrete events for audio and UI cues
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    Fired { plant: EntityId, row: usize },
    ResourceSpawned { resource: EntityId },
    ResourceCollected { resource: EntityId, amount: u32 },
    PlantPlaced { plant: EntityId, kind: PlantKind, row: usize, col: usize },
    /// Emitted once per tick for each plant being eaten
    Eating { plant: EntityId },
    PlantDestroyed { plant: EntityId },
    AttackerSpawned { attacker: EntityId, row: usize },
    AttackerKilled { attacker: EntityId },
    RoundStarted { round: u32 },
    RoundCleared { round: u32 },
    GameOver { round: u32 },
}

/// Complete simulation state, owned by a single controller
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    /// Simulated seconds since start/reset
    pub time: f64,
    pub balance: u32,
    pub round: RoundState,
    pub paused: bool,
    /// Host should silence audio cues
    pub muted: bool,
    pub board: Board,
    /// Seconds left on the round start banner
    pub banner_remaining: f32,
    pub plants: Store<Plant>,
    pub projectiles: Store<Projectile>,
    pub attackers: Store<Attacker>,
    pub resources: Store<Resource>,
    pub scheduler: Scheduler,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: EntityId,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time: 0.0,
            balance: tuning.starting_balance,
            round: RoundState::default(),
            paused: false,
            muted: false,
            board: Board::default(),
            banner_remaining: 0.0,
            plants: Store::new(),
            projectiles: Store::new(),
            attackers: Store::new(),
            resources: Store::new(),
            scheduler: Scheduler::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_over(&self) -> bool {
        self.round.phase == RoundPhase::GameOver
    }

    /// Whether ticks and gameplay commands are currently frozen
    pub fn is_frozen(&self) -> bool {
        self.paused || self.is_over()
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Live plant on a tile, if any
    pub fn plant_at(&self, tile: Tile) -> Option<&Plant> {
        self.plants
            .iter()
            .find(|p| p.row == tile.row && p.col == tile.col)
    }

    /// Return to the initial state, keeping the board size and mute flag
    pub fn reset(&mut self, tuning: &Tuning) {
        let board = self.board;
        let muted = self.muted;
        *self = GameState::new(self.seed, tuning);
        self.board = board;
        self.muted = muted;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_defaults() {
        let state = GameState::new(7, &Tuning::default());
        assert_eq!(state.balance, 100);
        assert_eq!(state.round.number, 1);
        assert_eq!(state.round.phase, RoundPhase::Idle);
        assert!(!state.is_frozen());
    }

    #[test]
    fn test_plants_conflict_on_same_tile() {
        let a = Plant {
            id: 1,
            kind: PlantKind::Generator,
            row: 2,
            col: 3,
            cooldown: 0.0,
            hp: 300.0,
        };
        let b = Plant { id: 2, ..a.clone() };
        let c = Plant { id: 3, col: 4, ..a.clone() };
        assert!(a.conflicts_with(&b));
        assert!(!a.conflicts_with(&c));
    }

    #[test]
    fn test_plant_kind_names() {
        for kind in PlantKind::ALL {
            assert_eq!(PlantKind::from_name(kind.as_str()), Some(kind));
        }
        assert_eq!(PlantKind::from_name("Double"), Some(PlantKind::DoubleShooter));
        assert_eq!(PlantKind::from_name("cactus"), None);
    }

    #[test]
    fn test_ids_are_monotonic() {
        let mut state = GameState::new(1, &Tuning::default());
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert!(b > a);
    }
}
