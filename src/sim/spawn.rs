//! Spawn policies
//!
//! One policy per entity family. A policy is fixed configuration plus a
//! decision function: given the round context and when it last fired, it
//! either declines or hands back a freshly built entity.

use glam::Vec2;
use rand::seq::IndexedRandom;
use rand::{Rng, RngCore};

use super::difficulty::{Difficulty, SPIRAL_BONUS_SIZE_RATIO};
use super::entity::{Entity, PlayField};
use super::specials::SpecialLedger;
use crate::consts::*;

/// Round state a policy may consult when deciding to spawn
pub struct SpawnContext<'a> {
    pub field: PlayField,
    pub difficulty: Difficulty,
    /// Unpaused milliseconds since the round started
    pub game_time_ms: f64,
    pub time_remaining_secs: u32,
    /// Special ids caught/spawned so far; the special policy marks spawns
    pub specials: &'a mut SpecialLedger,
}

impl SpawnContext<'_> {
    /// Fraction of the round still to play (1.0 at start)
    pub fn time_fraction_remaining(&self) -> f32 {
        self.time_remaining_secs as f32 / ROUND_DURATION_SECS as f32
    }
}

/// Outcome of a spawn attempt
#[derive(Debug, Clone, PartialEq)]
pub enum SpawnResult {
    Skip,
    Spawn(Entity),
}

impl SpawnResult {
    pub fn should_spawn(&self) -> bool {
        matches!(self, SpawnResult::Spawn(_))
    }

    pub fn into_entity(self) -> Option<Entity> {
        match self {
            SpawnResult::Spawn(entity) => Some(entity),
            SpawnResult::Skip => None,
        }
    }
}

pub trait SpawnPolicy {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Decide whether to spawn this tick
    fn try_spawn(
        &self,
        ctx: &mut SpawnContext<'_>,
        last_spawn_ms: f64,
        rng: &mut dyn RngCore,
    ) -> SpawnResult;
}

/// Entry position and velocity shared by every policy.
///
/// Entities enter from the left or right edge and head inward.
pub fn entry_kinematics(field: PlayField, difficulty: Difficulty, rng: &mut dyn RngCore) -> (Vec2, Vec2) {
    let from_left = rng.random::<f32>() < 0.5;
    let x = if from_left {
        -SPAWN_EDGE_OFFSET
    } else {
        field.width + SPAWN_EDGE_OFFSET
    };
    let y = rng.random::<f32>() * (field.height - SPAWN_BOTTOM_CLEARANCE).max(0.0);

    let speed = difficulty.speed_multiplier();
    let direction = if from_left { 1.0 } else { -1.0 };
    let vx = direction * (2.0 + rng.random::<f32>() * 2.0) * speed;
    let vy = (rng.random::<f32>() - 0.5) * 2.0 * speed;

    (Vec2::new(x, y), Vec2::new(vx, vy))
}

/// Sprite size as a fraction of the canvas, floored at the minimum
pub fn sprite_size(field: PlayField, (width_ratio, height_ratio): (f32, f32)) -> Vec2 {
    Vec2::new(
        (field.width * width_ratio).floor().max(MIN_ENTITY_SIZE),
        (field.height * height_ratio).floor().max(MIN_ENTITY_SIZE),
    )
}

fn interval_elapsed(ctx: &SpawnContext<'_>, last_spawn_ms: f64, interval_ms: f64) -> bool {
    ctx.game_time_ms - last_spawn_ms >= interval_ms
}

/// Common turkeys
#[derive(Debug, Clone, Copy, Default)]
pub struct TurkeyPolicy;

impl TurkeyPolicy {
    pub const INTERVAL_MS: f64 = 2000.0;
    pub const CHANCE: f32 = 0.5;
}

impl SpawnPolicy for TurkeyPolicy {
    fn name(&self) -> &'static str {
        "turkey"
    }

    fn try_spawn(
        &self,
        ctx: &mut SpawnContext<'_>,
        last_spawn_ms: f64,
        rng: &mut dyn RngCore,
    ) -> SpawnResult {
        if !interval_elapsed(ctx, last_spawn_ms, Self::INTERVAL_MS) {
            return SpawnResult::Skip;
        }
        if rng.random::<f32>() >= Self::CHANCE {
            return SpawnResult::Skip;
        }

        let (pos, vel) = entry_kinematics(ctx.field, ctx.difficulty, rng);
        let size = sprite_size(ctx.field, ctx.difficulty.size_ratio());
        SpawnResult::Spawn(Entity::turkey(pos, vel, size))
    }
}

/// Numbered golden turkeys. Guarantees every id shows up before time runs out.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpecialTurkeyPolicy;

impl SpecialTurkeyPolicy {
    pub const INTERVAL_MS: f64 = 2000.0;
    pub const CHANCE: f32 = 0.3;
    /// Below this fraction of time left, unspawned ids skip the chance roll
    pub const FORCED_SPAWN_THRESHOLD: f32 = 0.3;

    fn pick_id(ctx: &SpawnContext<'_>, rng: &mut dyn RngCore) -> Option<u8> {
        let unspawned = ctx.specials.unspawned();
        if !unspawned.is_empty() && ctx.time_fraction_remaining() < Self::FORCED_SPAWN_THRESHOLD {
            return unspawned.choose(rng).copied();
        }

        if rng.random::<f32>() >= Self::CHANCE {
            return None;
        }

        let caught = ctx.specials.caught();
        let fresh: Vec<u8> = unspawned
            .into_iter()
            .filter(|id| !caught.contains(id))
            .collect();
        if !fresh.is_empty() {
            return fresh.choose(rng).copied();
        }

        // Everything has appeared; give the uncaught ones another pass
        ctx.specials.uncaught().choose(rng).copied()
    }
}

impl SpawnPolicy for SpecialTurkeyPolicy {
    fn name(&self) -> &'static str {
        "special-turkey"
    }

    fn try_spawn(
        &self,
        ctx: &mut SpawnContext<'_>,
        last_spawn_ms: f64,
        rng: &mut dyn RngCore,
    ) -> SpawnResult {
        if !interval_elapsed(ctx, last_spawn_ms, Self::INTERVAL_MS) {
            return SpawnResult::Skip;
        }
        let Some(special_id) = Self::pick_id(ctx, rng) else {
            return SpawnResult::Skip;
        };

        ctx.specials.mark_spawned(special_id);
        let is_last = ctx.specials.uncaught().iter().all(|&id| id == special_id);

        let (pos, vel) = entry_kinematics(ctx.field, ctx.difficulty, rng);
        let size = sprite_size(ctx.field, ctx.difficulty.size_ratio());
        SpawnResult::Spawn(Entity::special(pos, vel, size, special_id, is_last))
    }
}

/// Obstacles; a share of them are bonus targets
#[derive(Debug, Clone, Copy, Default)]
pub struct ObstaclePolicy;

impl ObstaclePolicy {
    pub const INTERVAL_MS: f64 = 2000.0;
    pub const CHANCE: f32 = 0.2;
    pub const BONUS_CHANCE: f32 = 0.2;
}

impl SpawnPolicy for ObstaclePolicy {
    fn name(&self) -> &'static str {
        "obstacle"
    }

    fn try_spawn(
        &self,
        ctx: &mut SpawnContext<'_>,
        last_spawn_ms: f64,
        rng: &mut dyn RngCore,
    ) -> SpawnResult {
        if !interval_elapsed(ctx, last_spawn_ms, Self::INTERVAL_MS) {
            return SpawnResult::Skip;
        }
        if rng.random::<f32>() >= Self::CHANCE {
            return SpawnResult::Skip;
        }

        let bonus = rng.random::<f32>() < Self::BONUS_CHANCE;
        let (pos, vel) = entry_kinematics(ctx.field, ctx.difficulty, rng);
        // Spiral bonus targets are bigger, slower-reading hazards
        let ratio = if bonus && ctx.difficulty.spiral_bonus() {
            (SPIRAL_BONUS_SIZE_RATIO, SPIRAL_BONUS_SIZE_RATIO)
        } else {
            ctx.difficulty.size_ratio()
        };
        let size = sprite_size(ctx.field, ratio);
        SpawnResult::Spawn(Entity::obstacle(pos, vel, size, bonus))
    }
}
