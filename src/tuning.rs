//! Data-driven game balance
//!
//! Every constant the simulation reads lives here so a host can override
//! balance with a JSON document without recompiling.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::PlantKind;

/// Upper bound on attackers spawned in a single round
pub const MAX_ROUND_SPAWNS: u32 = 10_000;

/// How a projectile behaves after it connects with an attacker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitPolicy {
    /// Removed on its first hit; damages the nearest attacker once
    #[default]
    Consume,
    /// Keeps flying and damages every attacker in range on every tick
    Pierce,
}

/// Errors raised while loading a tuning document
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Balance constants for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Economy ===
    pub starting_balance: u32,
    pub generator_cost: u32,
    pub single_shooter_cost: u32,
    pub double_shooter_cost: u32,
    /// Balance added per collected resource
    pub collect_amount: u32,
    /// Seconds between resource emissions
    pub emission_interval: f32,
    /// Seconds an uncollected resource survives
    pub resource_ttl: f32,

    // === Plants ===
    pub plant_hp: f32,
    /// Cooldown given to a freshly placed shooter
    pub placement_cooldown: f32,
    pub single_shooter_cadence: f32,
    pub double_shooter_cadence: f32,
    /// Delay before the double shooter's second projectile
    pub follow_up_delay: f32,
    /// Attacker must be this far past the shooter's column edge to trigger fire
    pub fire_lead: f32,

    // === Projectiles ===
    pub projectile_speed: f32,
    pub projectile_damage: f32,
    /// Spawn offset inside the shooter tile as a fraction of tile width
    pub muzzle_offset: f32,
    /// Projectiles are dropped this far past the far edge
    pub projectile_exit_margin: f32,
    /// Hit threshold as a fraction of tile width
    pub hit_fraction: f32,
    /// Hit threshold floor in pixels
    pub min_hit_radius: f32,
    pub hit_policy: HitPolicy,

    // === Attackers ===
    pub attacker_base_hp: f32,
    pub attacker_base_speed: f32,
    /// Plant hp removed per second by one eating attacker
    pub eat_dps: f32,
    /// Spawn position past the far edge
    pub spawn_offset: f32,

    // === Waves ===
    pub base_count: u32,
    pub count_per_round: u32,
    /// Fractional hp growth per round
    pub hp_growth: f32,
    /// Fractional speed growth per round
    pub speed_growth: f32,
    pub speed_jitter_min: f32,
    pub speed_jitter_max: f32,
    /// Seconds between staggered spawns
    pub spawn_stagger: f32,
    /// Seconds between a cleared round and the next one
    pub round_delay: f32,
    /// Seconds the round start banner stays visible
    pub banner_duration: f32,

    // === Board ===
    pub min_board_width: f32,
    pub min_board_height: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            starting_balance: 100,
            generator_cost: 50,
            single_shooter_cost: 100,
            double_shooter_cost: 200,
            collect_amount: 25,
            emission_interval: 7.0,
            resource_ttl: 6.5,

            plant_hp: 300.0,
            placement_cooldown: 0.3,
            single_shooter_cadence: 0.9,
            double_shooter_cadence: 0.65,
            follow_up_delay: 0.14,
            fire_lead: 24.0,

            projectile_speed: 260.0,
            projectile_damage: 20.0,
            muzzle_offset: 0.7,
            projectile_exit_margin: 80.0,
            hit_fraction: 0.15,
            min_hit_radius: 12.0,
            hit_policy: HitPolicy::Consume,

            attacker_base_hp: 450.0,
            attacker_base_speed: 18.0,
            eat_dps: 15.0,
            spawn_offset: 60.0,

            base_count: 5,
            count_per_round: 2,
            hp_growth: 0.25,
            speed_growth: 0.1,
            speed_jitter_min: 0.9,
            speed_jitter_max: 1.15,
            spawn_stagger: 1.2,
            round_delay: 2.5,
            banner_duration: 2.0,

            min_board_width: 720.0,
            min_board_height: 400.0,
        }
    }
}

impl Tuning {
    /// Parse a JSON document; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("emission_interval", self.emission_interval),
            ("resource_ttl", self.resource_ttl),
            ("plant_hp", self.plant_hp),
            ("single_shooter_cadence", self.single_shooter_cadence),
            ("double_shooter_cadence", self.double_shooter_cadence),
            ("projectile_speed", self.projectile_speed),
            ("projectile_damage", self.projectile_damage),
            ("min_hit_radius", self.min_hit_radius),
            ("hit_fraction", self.hit_fraction),
            ("attacker_base_hp", self.attacker_base_hp),
            ("attacker_base_speed", self.attacker_base_speed),
            ("eat_dps", self.eat_dps),
            ("speed_jitter_min", self.speed_jitter_min),
            ("min_board_width", self.min_board_width),
            ("min_board_height", self.min_board_height),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must be a positive number",
                });
            }
        }

        let non_negative = [
            ("placement_cooldown", self.placement_cooldown),
            ("follow_up_delay", self.follow_up_delay),
            ("hp_growth", self.hp_growth),
            ("fire_lead", self.fire_lead),
            ("spawn_offset", self.spawn_offset),
            ("projectile_exit_margin", self.projectile_exit_margin),
            ("speed_growth", self.speed_growth),
            ("spawn_stagger", self.spawn_stagger),
            ("round_delay", self.round_delay),
            ("banner_duration", self.banner_duration),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must not be negative",
                });
            }
        }

        if self.speed_jitter_max <= self.speed_jitter_min {
            return Err(TuningError::Invalid {
                field: "speed_jitter_max",
                reason: "must exceed speed_jitter_min",
            });
        }
        if !(0.0..=1.0).contains(&self.muzzle_offset) {
            return Err(TuningError::Invalid {
                field: "muzzle_offset",
                reason: "must lie within the tile (0.0 - 1.0)",
            });
        }
        match self.base_count.checked_add(self.count_per_round) {
            Some(0) => {
                return Err(TuningError::Invalid {
                    field: "base_count",
                    reason: "round 1 must spawn at least one attacker",
                });
            }
            Some(count) if count <= MAX_ROUND_SPAWNS => {}
            _ => {
                return Err(TuningError::Invalid {
                    field: "count_per_round",
                    reason: "round 1 spawns too many attackers",
                });
            }
        }
        Ok(())
    }

    /// Price of a plant type
    pub fn cost(&self, kind: PlantKind) -> u32 {
        match kind {
            PlantKind::Generator => self.generator_cost,
            PlantKind::SingleShooter => self.single_shooter_cost,
            PlantKind::DoubleShooter => self.double_shooter_cost,
        }
    }

    /// Cooldown a plant starts with right after placement
    pub fn initial_cooldown(&self, kind: PlantKind) -> f32 {
        match kind {
            PlantKind::Generator => self.emission_interval,
            _ => self.placement_cooldown,
        }
    }

    /// Cooldown after a plant acts
    pub fn cadence(&self, kind: PlantKind) -> f32 {
        match kind {
            PlantKind::Generator => self.emission_interval,
            PlantKind::SingleShooter => self.single_shooter_cadence,
            PlantKind::DoubleShooter => self.double_shooter_cadence,
        }
    }

    /// Horizontal separation under which a projectile connects
    pub fn hit_threshold(&self, tile_w: f32) -> f32 {
        (tile_w * self.hit_fraction).max(self.min_hit_radius)
    }
}
