//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Deferred work keyed by simulated time, never wall-clock
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod combat;
pub mod command;
pub mod eating;
pub mod economy;
pub mod geometry;
pub mod scheduler;
pub mod snapshot;
pub mod state;
pub mod store;
pub mod tick;
pub mod wave;

pub use command::{Command, CommandOutcome, NoOpReason, apply};
pub use geometry::{Board, Tile, tile_size};
pub use scheduler::{Scheduled, Scheduler};
pub use snapshot::Snapshot;
pub use state::{
    Attacker, GameEvent, GameState, Plant, PlantKind, Projectile, Resource, RoundPhase,
    RoundState,
};
pub use store::{Entity, EntityId, Store, StoreError};
pub use tick::tick;
pub use wave::{RoundConfig, round_config};
