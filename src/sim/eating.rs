//! Occupancy and eating
//!
//! An attacker standing on a planted tile stops and eats; otherwise it walks
//! toward x = 0. The plant is looked up by tile every tick, so nothing holds a
//! reference that could dangle once either side is removed.

use super::state::{GameEvent, GameState};
use super::store::EntityId;
use crate::tuning::Tuning;

/// Tick phase 4: gate attacker movement on occupancy and apply eating damage
pub fn resolve_eating(state: &mut GameState, tuning: &Tuning, dt: f32) {
    let board = state.board;
    let mut bites: Vec<EntityId> = Vec::new();

    for attacker in state.attackers.iter_mut() {
        let target = board.column_at(attacker.x).and_then(|col| {
            state
                .plants
                .iter()
                .find(|p| p.row == attacker.row && p.col == col)
                .map(|p| p.id)
        });
        match target {
            Some(plant) => {
                attacker.eating = true;
                bites.push(plant);
            }
            None => {
                attacker.eating = false;
                attacker.x -= attacker.speed * dt;
            }
        }
    }

    if bites.is_empty() {
        return;
    }

    let bite = tuning.eat_dps * dt;
    for id in &bites {
        if let Some(plant) = state.plants.get_mut(*id) {
            plant.hp -= bite;
        }
    }

    bites.sort_unstable();
    bites.dedup();
    for plant in bites {
        state.emit(GameEvent::Eating { plant });
    }

    let destroyed = state.plants.remove_where(|p| p.hp <= 0.0);
    for plant in destroyed {
        log::debug!("Plant {} at ({}, {}) eaten", plant.id, plant.row, plant.col);
        state.emit(GameEvent::PlantDestroyed { plant: plant.id });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geometry::Tile;
    use crate::sim::state::{Attacker, Plant, PlantKind};

    fn setup() -> (GameState, Tuning) {
        let tuning = Tuning::default();
        let mut state = GameState::new(11, &tuning);
        for _ in 0..10 {
            state.next_entity_id();
        }
        (state, tuning)
    }

    fn plant(id: EntityId, row: usize, col: usize, hp: f32) -> Plant {
        Plant {
            id,
            kind: PlantKind::Generator,
            row,
            col,
            cooldown: 7.0,
            hp,
        }
    }

    fn walker(id: EntityId, row: usize, x: f32) -> Attacker {
        Attacker {
            id,
            row,
            x,
            hp: 450.0,
            speed: 20.0,
            eating: false,
        }
    }

    #[test]
    fn test_free_lane_moves_left() {
        let (mut state, tuning) = setup();
        state.plants.insert(plant(1, 1, 3, 300.0));
        state.attackers.insert(walker(2, 0, 450.0));

        resolve_eating(&mut state, &tuning, 0.5);

        let a = state.attackers.get(2).unwrap();
        assert!(!a.eating);
        assert!((a.x - 440.0).abs() < 1e-4);
        assert_eq!(state.plants.get(1).map(|p| p.hp), Some(300.0));
    }

    #[test]
    fn test_occupied_tile_stops_and_eats() {
        let (mut state, tuning) = setup();
        let center = state.board.tile_center(Tile::new(2, 3));
        state.plants.insert(plant(1, 2, 3, 300.0));
        state.attackers.insert(walker(2, 2, center.x));
        state.attackers.insert(walker(3, 2, center.x + 5.0));

        resolve_eating(&mut state, &tuning, 0.1);

        assert!(state.attackers.iter().all(|a| a.eating && a.x >= center.x));
        // Two eaters stack damage; one event per plant
        let hp = state.plants.get(1).map(|p| p.hp).unwrap();
        assert!((hp - (300.0 - 2.0 * 15.0 * 0.1)).abs() < 1e-3);
        assert_eq!(state.events, vec![GameEvent::Eating { plant: 1 }]);
    }

    #[test]
    fn test_kill_removes_plant_and_resumes_next_tick() {
        let (mut state, tuning) = setup();
        let center = state.board.tile_center(Tile::new(4, 0));
        state.plants.insert(plant(1, 4, 0, 0.5));
        state.attackers.insert(walker(2, 4, center.x));

        resolve_eating(&mut state, &tuning, 0.05);
        assert!(state.plants.is_empty());
        let a = state.attackers.get(2).unwrap();
        assert!(a.eating);
        assert_eq!(a.x, center.x);

        resolve_eating(&mut state, &tuning, 0.05);
        let a = state.attackers.get(2).unwrap();
        assert!(!a.eating);
        assert!(a.x < center.x);
    }

    #[test]
    fn test_offboard_attacker_never_eats() {
        let (mut state, tuning) = setup();
        state.plants.insert(plant(1, 0, 8, 300.0));
        let x = state.board.width + 60.0;
        state.attackers.insert(walker(2, 0, x));

        resolve_eating(&mut state, &tuning, 0.05);

        assert!(!state.attackers.get(2).unwrap().eating);
    }
}
