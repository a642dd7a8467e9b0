//! Economy: plant cooldowns, resource emission/decay, collection, placement

use super::command::NoOpReason;
use super::combat;
use super::geometry::Tile;
use super::scheduler::Scheduled;
use super::state::{GameEvent, GameState, Plant, PlantKind, Resource};
use super::store::EntityId;
use crate::tuning::Tuning;

/// Tick phase 1: count down plant cooldowns and let ready plants act
///
/// Generators emit a resource at their tile center. Shooters fire only when
/// an attacker is ahead of them in their lane; otherwise they stay ready.
pub fn plant_phase(state: &mut GameState, tuning: &Tuning, dt: f32) {
    let board = state.board;
    let mut emitters: Vec<Tile> = Vec::new();
    let mut volleys: Vec<(EntityId, PlantKind, usize, usize)> = Vec::new();

    for plant in state.plants.iter_mut() {
        plant.cooldown -= dt;
        if plant.cooldown > 0.0 {
            continue;
        }
        match plant.kind {
            PlantKind::Generator => {
                emitters.push(plant.tile());
                plant.cooldown = tuning.cadence(plant.kind);
            }
            kind => {
                let trigger_x = board.column_left(plant.col) + tuning.fire_lead;
                let target_ahead = state
                    .attackers
                    .iter()
                    .any(|a| a.row == plant.row && a.x > trigger_x);
                if target_ahead {
                    volleys.push((plant.id, kind, plant.row, plant.col));
                    plant.cooldown = tuning.cadence(kind);
                }
            }
        }
    }

    for tile in emitters {
        let id = state.next_entity_id();
        state.resources.insert(Resource {
            id,
            pos: board.tile_center(tile),
            ttl: tuning.resource_ttl,
        });
        state.emit(GameEvent::ResourceSpawned { resource: id });
    }

    for (plant, kind, row, col) in volleys {
        let x = combat::muzzle_x(&board, tuning, col);
        combat::spawn_projectile(state, tuning, row, x);
        if kind == PlantKind::DoubleShooter {
            let at = state.time + f64::from(tuning.follow_up_delay);
            state.scheduler.schedule(at, Scheduled::FollowUpShot { row, col });
        }
        state.emit(GameEvent::Fired { plant, row });
    }
}

/// Tick phase 5: age resources and drop expired ones uncollected
pub fn decay_resources(state: &mut GameState, dt: f32) {
    for resource in state.resources.iter_mut() {
        resource.ttl -= dt;
    }
    state.resources.remove_where(|r| r.ttl <= 0.0);
}

/// Place a plant, debiting its cost only if the tile is free
pub fn place_plant(
    state: &mut GameState,
    tuning: &Tuning,
    tile: Tile,
    kind: PlantKind,
) -> Result<EntityId, NoOpReason> {
    if state.is_over() {
        return Err(NoOpReason::GameOver);
    }
    if state.paused {
        return Err(NoOpReason::Paused);
    }
    if !tile.in_bounds() {
        return Err(NoOpReason::OutOfBounds);
    }
    let remaining = state
        .balance
        .checked_sub(tuning.cost(kind))
        .ok_or(NoOpReason::InsufficientFunds)?;
    if state.plant_at(tile).is_some() {
        return Err(NoOpReason::Occupied);
    }

    let id = state.next_entity_id();
    let plant = Plant {
        id,
        kind,
        row: tile.row,
        col: tile.col,
        cooldown: tuning.initial_cooldown(kind),
        hp: tuning.plant_hp,
    };
    state
        .plants
        .add(plant)
        .map_err(|_| NoOpReason::Occupied)?;
    state.balance = remaining;
    state.emit(GameEvent::PlantPlaced {
        plant: id,
        kind,
        row: tile.row,
        col: tile.col,
    });
    Ok(id)
}

/// Collect a resource, crediting the balance; unknown ids are ignored
pub fn collect_resource(
    state: &mut GameState,
    tuning: &Tuning,
    id: EntityId,
) -> Result<u32, NoOpReason> {
    if state.is_over() {
        return Err(NoOpReason::GameOver);
    }
    if state.paused {
        return Err(NoOpReason::Paused);
    }
    state
        .resources
        .remove(id)
        .ok_or(NoOpReason::UnknownResource)?;
    let amount = tuning.collect_amount;
    state.balance = state.balance.saturating_add(amount);
    state.emit(GameEvent::ResourceCollected {
        resource: id,
        amount,
    });
    Ok(amount)
}
