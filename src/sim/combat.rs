//! Projectile travel and projectile/attacker collision

use super::geometry::Board;
use super::state::{Attacker, GameEvent, GameState, Projectile};
use super::store::EntityId;
use crate::tuning::{HitPolicy, Tuning};

/// Spawn x for shots from a column, on the current board scale
pub fn muzzle_x(board: &Board, tuning: &Tuning, col: usize) -> f32 {
    board.column_left(col) + board.tile_width() * tuning.muzzle_offset
}

/// Add a projectile to a lane
pub fn spawn_projectile(state: &mut GameState, tuning: &Tuning, row: usize, x: f32) -> EntityId {
    let id = state.next_entity_id();
    state.projectiles.insert(Projectile {
        id,
        row,
        x,
        speed: tuning.projectile_speed,
    });
    id
}

/// Tick phase 2: move projectiles toward the far side and drop the ones that left
pub fn advance_projectiles(state: &mut GameState, tuning: &Tuning, dt: f32) {
    for projectile in state.projectiles.iter_mut() {
        projectile.x += projectile.speed * dt;
    }
    let exit_x = state.board.width + tuning.projectile_exit_margin;
    state.projectiles.remove_where(|p| p.x > exit_x);
}

/// Tick phase 3: apply projectile damage using this frame's attacker positions
///
/// Under [`HitPolicy::Consume`] each projectile damages only the nearest
/// living attacker in range (lowest id on ties) and is removed. Under
/// [`HitPolicy::Pierce`] it damages every living attacker in range and keeps
/// flying. Projectiles resolve in id order, so one killed earlier in the
/// phase is no longer a target.
pub fn resolve_hits(state: &mut GameState, tuning: &Tuning) {
    let threshold = tuning.hit_threshold(state.board.tile_width());
    let damage = tuning.projectile_damage;
    let mut spent: Vec<EntityId> = Vec::new();
    let mut landed = false;

    for projectile in state.projectiles.iter() {
        let in_range = |a: &Attacker| {
            a.hp > 0.0 && a.row == projectile.row && (a.x - projectile.x).abs() < threshold
        };
        match tuning.hit_policy {
            HitPolicy::Consume => {
                let nearest = state
                    .attackers
                    .iter_mut()
                    .filter(|a| in_range(a))
                    .min_by(|a, b| {
                        (a.x - projectile.x)
                            .abs()
                            .total_cmp(&(b.x - projectile.x).abs())
                    });
                if let Some(target) = nearest {
                    target.hp -= damage;
                    spent.push(projectile.id);
                    landed = true;
                }
            }
            HitPolicy::Pierce => {
                for target in state.attackers.iter_mut().filter(|a| in_range(a)) {
                    target.hp -= damage;
                    landed = true;
                }
            }
        }
    }

    for id in &spent {
        state.projectiles.remove(*id);
    }
    if !landed {
        return;
    }

    let killed = state.attackers.remove_where(|a| a.hp <= 0.0);
    for attacker in killed {
        log::debug!("Attacker {} killed in lane {}", attacker.id, attacker.row);
        state.emit(GameEvent::AttackerKilled {
            attacker: attacker.id,
        });
    }
}
