//! Movable sprites: turkeys, numbered specials and obstacles
//!
//! Every entity shares the same contract: `update` integrates one tick of
//! movement, `on_click` reports the payoff of catching it, `render` draws
//! it. The per-kind differences live in the `EntityKind` match arms.

use std::collections::BTreeSet;

use glam::Vec2;
use rand::{Rng, RngCore};

use super::difficulty::Difficulty;
use crate::consts::*;
use crate::renderer::{Surface, sprites};

/// Chance per tick that a turkey jinks on the erratic tier
const ERRATIC_FLIP_CHANCE: f32 = 0.05;
/// Peak-to-peak random vy added on a jink (px/tick)
const ERRATIC_JITTER: f32 = 2.0;

/// Spiral tuning for bonus obstacles on the hardest tier
const SPIRAL_RADIUS_GROWTH: f32 = 0.5;
const SPIRAL_ANGLE_STEP: f32 = 0.1;
const SPIRAL_MAX_RADIUS: f32 = 150.0;
const SPIRAL_WAVE_STEP: f32 = 0.05;
/// Wave multiplier swings between 1 - A and 1 + A
const SPIRAL_WAVE_AMPLITUDE: f32 = 0.7;
const SPIRAL_FREEZE_CHANCE: f32 = 0.01;
/// About half a second at 60 fps
const SPIRAL_FREEZE_TICKS: u32 = 30;

/// Canvas dimensions the simulation runs in (px)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayField {
    pub width: f32,
    pub height: f32,
}

impl Default for PlayField {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
        }
    }
}

impl PlayField {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Whether an entity at `x` is still inside the eviction margin
    pub fn keeps(&self, x: f32) -> bool {
        x > -OFFSCREEN_MARGIN && x < self.width + OFFSCREEN_MARGIN
    }
}

/// Point `vel.y` back into `[0, max_y]` when `y` is past either edge.
/// Returns whether `y` was outside.
fn bounce(y: f32, vel: &mut Vec2, max_y: f32) -> bool {
    if y < 0.0 {
        vel.y = vel.y.abs();
        true
    } else if y > max_y {
        vel.y = -vel.y.abs();
        true
    } else {
        false
    }
}

/// Spiral movement state for a bonus obstacle
#[derive(Debug, Clone, PartialEq)]
pub struct SpiralMotion {
    pub center: Vec2,
    pub radius: f32,
    pub angle: f32,
    wave_phase: f32,
    frozen_ticks: u32,
}

impl SpiralMotion {
    pub fn new(center: Vec2) -> Self {
        Self {
            center,
            radius: 0.0,
            angle: 0.0,
            wave_phase: 0.0,
            frozen_ticks: 0,
        }
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen_ticks > 0
    }

    /// Current speed factor applied to the center drift
    pub fn wave_multiplier(&self) -> f32 {
        1.0 + SPIRAL_WAVE_AMPLITUDE * self.wave_phase.sin()
    }

    pub fn position(&self) -> Vec2 {
        self.center + Vec2::new(self.angle.cos(), self.angle.sin()) * self.radius
    }

    /// Advance one tick. `vel` is the base drift and may flip vertically
    /// when the center hits the top or bottom.
    fn step(&mut self, vel: &mut Vec2, max_y: f32, rng: &mut dyn RngCore) -> Vec2 {
        if self.frozen_ticks > 0 {
            self.frozen_ticks -= 1;
            return self.position();
        }
        if rng.random::<f32>() < SPIRAL_FREEZE_CHANCE {
            self.frozen_ticks = SPIRAL_FREEZE_TICKS;
            return self.position();
        }

        self.wave_phase += SPIRAL_WAVE_STEP;
        self.center += *vel * self.wave_multiplier();
        bounce(self.center.y, vel, max_y);

        self.radius += SPIRAL_RADIUS_GROWTH;
        if self.radius > SPIRAL_MAX_RADIUS {
            self.radius = 0.0;
        }
        self.angle += SPIRAL_ANGLE_STEP;

        self.position()
    }
}

/// Entity variants
#[derive(Debug, Clone, PartialEq)]
pub enum EntityKind {
    /// Common collectible
    Turkey,
    /// One of the numbered rare collectibles
    SpecialTurkey { special_id: u8, is_last: bool },
    /// Penalty obstacle, or a reward when `bonus` is set
    Obstacle {
        bonus: bool,
        /// One-time tier speed scaling has been applied
        scaled: bool,
        /// Present once a bonus obstacle has switched to spiral movement
        spiral: Option<SpiralMotion>,
    },
}

/// Payoff of clicking an entity. The round controller applies it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClickResult {
    pub money_delta: i64,
    pub should_remove: bool,
    pub caught_id: Option<u8>,
    pub completion_message: Option<String>,
    pub should_end_round: bool,
    pub end_round_delay_ms: f64,
}

/// A sprite moving across the play field
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub id: u32,
    /// Top-left corner (px)
    pub pos: Vec2,
    /// Velocity (px/tick)
    pub vel: Vec2,
    /// Fixed at spawn
    size: Vec2,
    pub kind: EntityKind,
}

impl Entity {
    pub fn new(kind: EntityKind, pos: Vec2, vel: Vec2, size: Vec2) -> Self {
        Self {
            id: 0,
            pos,
            vel,
            size,
            kind,
        }
    }

    pub fn turkey(pos: Vec2, vel: Vec2, size: Vec2) -> Self {
        Self::new(EntityKind::Turkey, pos, vel, size)
    }

    pub fn special(pos: Vec2, vel: Vec2, size: Vec2, special_id: u8, is_last: bool) -> Self {
        Self::new(
            EntityKind::SpecialTurkey {
                special_id,
                is_last,
            },
            pos,
            vel,
            size,
        )
    }

    pub fn obstacle(pos: Vec2, vel: Vec2, size: Vec2, bonus: bool) -> Self {
        Self::new(
            EntityKind::Obstacle {
                bonus,
                scaled: false,
                spiral: None,
            },
            pos,
            vel,
            size,
        )
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    pub fn special_id(&self) -> Option<u8> {
        match self.kind {
            EntityKind::SpecialTurkey { special_id, .. } => Some(special_id),
            _ => None,
        }
    }

    /// Special flagged as the last uncaught id when it spawned
    pub fn is_last_special(&self) -> bool {
        matches!(self.kind, EntityKind::SpecialTurkey { is_last: true, .. })
    }

    pub fn is_bonus_obstacle(&self) -> bool {
        matches!(self.kind, EntityKind::Obstacle { bonus: true, .. })
    }

    /// Short name used in logs
    pub fn label(&self) -> &'static str {
        match self.kind {
            EntityKind::Turkey => "turkey",
            EntityKind::SpecialTurkey { .. } => "special-turkey",
            EntityKind::Obstacle { bonus: false, .. } => "obstacle",
            EntityKind::Obstacle { bonus: true, .. } => "bonus-obstacle",
        }
    }

    /// Axis-aligned hit test, edges inclusive
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.pos.x
            && point.x <= self.pos.x + self.size.x
            && point.y >= self.pos.y
            && point.y <= self.pos.y + self.size.y
    }

    /// Advance one tick of movement
    pub fn update(&mut self, field: PlayField, difficulty: Difficulty, rng: &mut dyn RngCore) {
        let max_y = field.height - self.size.y;

        if let EntityKind::Obstacle {
            bonus: true,
            spiral,
            ..
        } = &mut self.kind
        {
            if difficulty.spiral_bonus() {
                let start = self.pos;
                let motion = spiral.get_or_insert_with(|| SpiralMotion::new(start));
                self.pos = motion.step(&mut self.vel, max_y, rng);
                return;
            }
        }

        self.pos += self.vel;
        let outside = bounce(self.pos.y, &mut self.vel, max_y);

        self.apply_difficulty_behavior(difficulty, outside, rng);
    }

    /// Tier behaviour after movement. No jink while outside the band, so an
    /// entity past an edge always heads back in.
    fn apply_difficulty_behavior(
        &mut self,
        difficulty: Difficulty,
        outside: bool,
        rng: &mut dyn RngCore,
    ) {
        match &mut self.kind {
            EntityKind::Turkey | EntityKind::SpecialTurkey { .. } => {
                if !outside
                    && difficulty.erratic_flight()
                    && rng.random::<f32>() < ERRATIC_FLIP_CHANCE
                {
                    self.vel.y = -self.vel.y + (rng.random::<f32>() - 0.5) * ERRATIC_JITTER;
                }
            }
            EntityKind::Obstacle { scaled, .. } => {
                if !*scaled {
                    self.vel *= difficulty.obstacle_scale();
                    *scaled = true;
                }
            }
        }
    }

    /// Payoff of clicking this entity given the ids caught so far
    pub fn on_click(&self, caught: &BTreeSet<u8>) -> ClickResult {
        match self.kind {
            EntityKind::Turkey => ClickResult {
                money_delta: COMMON_REWARD,
                should_remove: true,
                ..Default::default()
            },
            EntityKind::SpecialTurkey { special_id, .. } => {
                let completes = !caught.contains(&special_id)
                    && caught.len() + 1 == SPECIAL_COUNT as usize;
                if completes {
                    ClickResult {
                        money_delta: SPECIAL_REWARD + ALL_SPECIALS_BONUS,
                        should_remove: true,
                        caught_id: Some(special_id),
                        completion_message: Some(format!(
                            "🎉 All {} Truttis caught! +${} bonus! 🎉",
                            SPECIAL_COUNT, ALL_SPECIALS_BONUS
                        )),
                        should_end_round: true,
                        end_round_delay_ms: COMPLETION_END_DELAY_MS,
                    }
                } else {
                    ClickResult {
                        money_delta: SPECIAL_REWARD,
                        should_remove: true,
                        caught_id: Some(special_id),
                        ..Default::default()
                    }
                }
            }
            EntityKind::Obstacle { bonus, .. } => ClickResult {
                money_delta: if bonus {
                    BONUS_OBSTACLE_REWARD
                } else {
                    OBSTACLE_PENALTY
                },
                should_remove: true,
                ..Default::default()
            },
        }
    }

    /// Draw the sprite
    pub fn render(&self, surface: &mut dyn Surface) {
        sprites::draw_entity(surface, self);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::{RngCore, SeedableRng};
    use rand_pcg::Pcg32;

    /// RNG that always yields the same word; `Fixed(0)` rolls 0.0 on every
    /// `random::<f32>()`, `Fixed(u32::MAX)` rolls just under 1.0.
    pub(crate) struct Fixed(pub u32);

    impl RngCore for Fixed {
        fn next_u32(&mut self) -> u32 {
            self.0
        }

        fn next_u64(&mut self) -> u64 {
            ((self.0 as u64) << 32) | self.0 as u64
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for (i, byte) in dest.iter_mut().enumerate() {
                *byte = self.0.to_le_bytes()[i % 4];
            }
        }
    }

    fn field() -> PlayField {
        PlayField::new(800.0, 600.0)
    }

    fn size() -> Vec2 {
        Vec2::new(60.0, 60.0)
    }

    #[test]
    fn test_update_integrates_velocity() {
        let mut e = Entity::turkey(Vec2::new(100.0, 200.0), Vec2::new(3.0, -1.0), size());
        e.update(field(), Difficulty::Easy, &mut Fixed(0));
        assert_eq!(e.pos, Vec2::new(103.0, 199.0));
        assert_eq!(e.vel, Vec2::new(3.0, -1.0));
    }

    #[test]
    fn test_update_bounces_off_top_and_bottom() {
        let mut top = Entity::turkey(Vec2::new(100.0, 0.5), Vec2::new(2.0, -1.0), size());
        top.update(field(), Difficulty::Easy, &mut Fixed(0));
        assert_eq!(top.vel.y, 1.0);

        let mut bottom = Entity::turkey(Vec2::new(100.0, 539.5), Vec2::new(2.0, 1.0), size());
        bottom.update(field(), Difficulty::Easy, &mut Fixed(0));
        assert_eq!(bottom.vel.y, -1.0);
    }

    #[test]
    fn test_hard_turkey_near_edge_stays_bounded() {
        let max_y = 600.0 - size().y;
        for seed in 0..200 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut e = Entity::turkey(Vec2::new(400.0, 1.0), Vec2::new(0.0, -1.0), size());
            for _ in 0..600 {
                e.update(field(), Difficulty::Hard, &mut rng);
                let slack = e.vel.y.abs() + 1e-3;
                assert!(e.pos.y >= -slack, "seed {}: y {} vy {}", seed, e.pos.y, e.vel.y);
                assert!(e.pos.y <= max_y + slack, "seed {}: y {} vy {}", seed, e.pos.y, e.vel.y);
            }
        }
    }

    #[test]
    fn test_bounce_points_back_inward() {
        // Already heading in: the sign is kept
        let mut e = Entity::turkey(Vec2::new(100.0, -3.0), Vec2::new(0.0, 1.0), size());
        e.update(field(), Difficulty::Easy, &mut Fixed(0));
        assert_eq!(e.vel.y, 1.0);

        let mut e = Entity::turkey(Vec2::new(100.0, 545.0), Vec2::new(0.0, -1.0), size());
        e.update(field(), Difficulty::Easy, &mut Fixed(0));
        assert_eq!(e.vel.y, -1.0);
    }

    #[test]
    fn test_no_horizontal_bounce() {
        let mut e = Entity::turkey(Vec2::new(899.0, 300.0), Vec2::new(2.0, 0.0), size());
        e.update(field(), Difficulty::Easy, &mut Fixed(0));
        assert_eq!(e.vel.x, 2.0);
        assert!(!field().keeps(e.pos.x));
    }

    #[test]
    fn test_erratic_flight_only_on_hard() {
        // Fixed(0) rolls 0.0: the jink always fires and adds -1.0 jitter
        let mut hard = Entity::turkey(Vec2::new(100.0, 300.0), Vec2::new(2.0, 1.0), size());
        hard.update(field(), Difficulty::Hard, &mut Fixed(0));
        assert_eq!(hard.vel.y, -2.0);

        let mut medium = Entity::turkey(Vec2::new(100.0, 300.0), Vec2::new(2.0, 1.0), size());
        medium.update(field(), Difficulty::Medium, &mut Fixed(0));
        assert_eq!(medium.vel.y, 1.0);

        // Rolling ~1.0 never jinks
        let mut calm = Entity::turkey(Vec2::new(100.0, 300.0), Vec2::new(2.0, 1.0), size());
        calm.update(field(), Difficulty::Hard, &mut Fixed(u32::MAX));
        assert_eq!(calm.vel.y, 1.0);
    }

    #[test]
    fn test_obstacle_scaling_applied_once() {
        let mut e = Entity::obstacle(Vec2::new(100.0, 300.0), Vec2::new(2.0, 1.0), size(), false);
        e.update(field(), Difficulty::Medium, &mut Fixed(0));
        assert!((e.vel.x - 3.6).abs() < 1e-5);
        assert!((e.vel.y - 1.8).abs() < 1e-5);

        e.update(field(), Difficulty::Medium, &mut Fixed(0));
        assert!((e.vel.x - 3.6).abs() < 1e-5);
        assert!(matches!(e.kind, EntityKind::Obstacle { scaled: true, .. }));
    }

    #[test]
    fn test_obstacle_not_scaled_on_easy_or_hard() {
        for tier in [Difficulty::Easy, Difficulty::Hard] {
            let mut e =
                Entity::obstacle(Vec2::new(100.0, 300.0), Vec2::new(2.0, 1.0), size(), false);
            e.update(field(), tier, &mut Fixed(0));
            assert_eq!(e.vel, Vec2::new(2.0, 1.0));
        }
    }

    #[test]
    fn test_bonus_obstacle_spirals_on_hard() {
        let mut e = Entity::obstacle(Vec2::new(100.0, 300.0), Vec2::new(2.0, 0.0), size(), true);
        // Rolling ~1.0 never freezes
        let mut rng = Fixed(u32::MAX);
        for _ in 0..20 {
            e.update(field(), Difficulty::Hard, &mut rng);
        }
        let EntityKind::Obstacle {
            spiral: Some(ref motion),
            ..
        } = e.kind
        else {
            panic!("bonus obstacle should be spiralling");
        };
        assert!(motion.radius > 0.0);
        assert!(motion.center.x > 100.0);
        assert_eq!(e.pos, motion.position());
    }

    #[test]
    fn test_spiral_radius_is_bounded() {
        let mut e = Entity::obstacle(Vec2::new(100.0, 300.0), Vec2::new(0.0, 0.0), size(), true);
        let mut rng = Fixed(u32::MAX);
        for _ in 0..1000 {
            e.update(field(), Difficulty::Hard, &mut rng);
            if let EntityKind::Obstacle {
                spiral: Some(ref m),
                ..
            } = e.kind
            {
                assert!(m.radius <= SPIRAL_MAX_RADIUS);
            }
        }
    }

    #[test]
    fn test_spiral_freeze_holds_position() {
        let mut e = Entity::obstacle(Vec2::new(100.0, 300.0), Vec2::new(2.0, 0.0), size(), true);
        // Fixed(0) rolls the freeze on the first tick
        e.update(field(), Difficulty::Hard, &mut Fixed(0));
        let frozen_at = e.pos;
        for _ in 0..SPIRAL_FREEZE_TICKS {
            e.update(field(), Difficulty::Hard, &mut Fixed(u32::MAX));
            assert_eq!(e.pos, frozen_at);
        }
        e.update(field(), Difficulty::Hard, &mut Fixed(u32::MAX));
        assert_ne!(e.pos, frozen_at);
    }

    fn spiral_center(e: &Entity) -> Vec2 {
        match &e.kind {
            EntityKind::Obstacle {
                spiral: Some(m), ..
            } => m.center,
            _ => panic!("bonus obstacle should be spiralling"),
        }
    }

    #[test]
    fn test_spiral_center_bounces_off_top() {
        let mut e = Entity::obstacle(Vec2::new(100.0, 2.0), Vec2::new(1.0, -3.0), size(), true);
        let mut rng = Fixed(u32::MAX);
        let mut flipped = false;
        let mut returned = false;
        for _ in 0..200 {
            e.update(field(), Difficulty::Hard, &mut rng);
            let y = spiral_center(&e).y;
            assert!(y >= -3.0 * 1.7 - 1e-3);
            flipped |= e.vel.y > 0.0;
            returned |= flipped && y >= 0.0;
        }
        assert!(flipped);
        assert!(returned);
    }

    #[test]
    fn test_spiral_center_bounces_off_bottom() {
        let max_y = 600.0 - size().y;
        let mut e = Entity::obstacle(Vec2::new(100.0, max_y - 2.0), Vec2::new(1.0, 3.0), size(), true);
        let mut rng = Fixed(u32::MAX);
        let mut flipped = false;
        let mut returned = false;
        for _ in 0..200 {
            e.update(field(), Difficulty::Hard, &mut rng);
            let y = spiral_center(&e).y;
            assert!(y <= max_y + 3.0 * 1.7 + 1e-3);
            flipped |= e.vel.y < 0.0;
            returned |= flipped && y <= max_y;
        }
        assert!(flipped);
        assert!(returned);
    }

    #[test]
    fn test_spiral_center_never_sticks_past_an_edge() {
        // The wave multiplier swings the step between 0.3x and 1.7x of |vy|
        let max_y = 600.0 - size().y;
        for seed in 0..50 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut e = Entity::obstacle(Vec2::new(100.0, 1.0), Vec2::new(0.5, -4.0), size(), true);
            let mut outside_run = 0;
            for _ in 0..1000 {
                e.update(field(), Difficulty::Hard, &mut rng);
                let y = spiral_center(&e).y;
                assert!(y >= -4.0 * 1.7 - 1e-3 && y <= max_y + 4.0 * 1.7 + 1e-3);
                if y < 0.0 || y > max_y {
                    outside_run += 1;
                } else {
                    outside_run = 0;
                }
                // Moving ticks need at most ~23 steps at 0.3x; freezes add 30 each
                assert!(outside_run < 120, "seed {}: stuck at y {}", seed, y);
            }
        }
    }

    #[test]
    fn test_spiral_wave_multiplier_range() {
        let mut m = SpiralMotion::new(Vec2::ZERO);
        let mut vel = Vec2::new(1.0, 0.0);
        let mut rng = Fixed(u32::MAX);
        for _ in 0..500 {
            m.step(&mut vel, 500.0, &mut rng);
            let w = m.wave_multiplier();
            assert!((0.3 - 1e-4..=1.7 + 1e-4).contains(&w));
        }
    }

    #[test]
    fn test_bonus_obstacle_linear_off_hard() {
        let mut e = Entity::obstacle(Vec2::new(100.0, 300.0), Vec2::new(2.0, 1.0), size(), true);
        e.update(field(), Difficulty::Easy, &mut Fixed(0));
        assert_eq!(e.pos, Vec2::new(102.0, 301.0));
        assert!(matches!(e.kind, EntityKind::Obstacle { spiral: None, .. }));
    }

    #[test]
    fn test_click_payoffs() {
        let caught = BTreeSet::new();
        let turkey = Entity::turkey(Vec2::ZERO, Vec2::ZERO, size());
        let r = turkey.on_click(&caught);
        assert_eq!(r.money_delta, 10);
        assert!(r.should_remove);
        assert_eq!(r.caught_id, None);

        let plain = Entity::obstacle(Vec2::ZERO, Vec2::ZERO, size(), false);
        assert_eq!(plain.on_click(&caught).money_delta, -50);

        let bonus = Entity::obstacle(Vec2::ZERO, Vec2::ZERO, size(), true);
        let r = bonus.on_click(&caught);
        assert_eq!(r.money_delta, 100);
        assert!(r.should_remove);
    }

    #[test]
    fn test_special_click_before_last() {
        let caught: BTreeSet<u8> = (1..=7).collect();
        let e = Entity::special(Vec2::ZERO, Vec2::ZERO, size(), 8, false);
        let r = e.on_click(&caught);
        assert_eq!(r.money_delta, 50);
        assert_eq!(r.caught_id, Some(8));
        assert!(!r.should_end_round);
        assert!(r.completion_message.is_none());
    }

    #[test]
    fn test_special_click_completes_set() {
        let caught: BTreeSet<u8> = (1..=8).collect();
        let e = Entity::special(Vec2::ZERO, Vec2::ZERO, size(), 9, true);
        let r = e.on_click(&caught);
        assert_eq!(r.money_delta, 550);
        assert_eq!(r.caught_id, Some(9));
        assert!(r.should_end_round);
        assert_eq!(r.end_round_delay_ms, 2000.0);
        assert!(r.completion_message.unwrap().contains("All 9"));
    }

    #[test]
    fn test_duplicate_special_does_not_repeat_bonus() {
        let caught: BTreeSet<u8> = (1..=9).collect();
        let e = Entity::special(Vec2::ZERO, Vec2::ZERO, size(), 9, false);
        let r = e.on_click(&caught);
        assert_eq!(r.money_delta, 50);
        assert!(!r.should_end_round);
    }

    #[test]
    fn test_contains_is_inclusive() {
        let e = Entity::turkey(Vec2::new(10.0, 20.0), Vec2::ZERO, Vec2::new(40.0, 40.0));
        assert!(e.contains(Vec2::new(10.0, 20.0)));
        assert!(e.contains(Vec2::new(50.0, 60.0)));
        assert!(!e.contains(Vec2::new(50.1, 60.0)));
        assert!(!e.contains(Vec2::new(9.9, 30.0)));
    }

    #[test]
    fn test_size_never_changes() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut e = Entity::obstacle(Vec2::new(0.0, 100.0), Vec2::new(3.0, 2.0), size(), true);
        for _ in 0..300 {
            e.update(field(), Difficulty::Hard, &mut rng);
        }
        assert_eq!(e.size(), size());
    }

    proptest! {
        #[test]
        fn prop_bounce_keeps_y_near_field(
            y in 0.0f32..540.0,
            vy in -4.0f32..4.0,
            vx in -4.0f32..4.0,
            ticks in 1usize..200,
            tier in 0usize..3,
            obstacle in any::<bool>(),
            seed in any::<u64>(),
        ) {
            let tier = Difficulty::ALL[tier];
            let mut e = if obstacle {
                Entity::obstacle(Vec2::new(400.0, y), Vec2::new(vx, vy), size(), false)
            } else {
                Entity::turkey(Vec2::new(400.0, y), Vec2::new(vx, vy), size())
            };
            let mut rng = Pcg32::seed_from_u64(seed);
            for _ in 0..ticks {
                e.update(field(), tier, &mut rng);
                let slack = e.vel.y.abs() + 1e-3;
                prop_assert!(e.vel.y.is_finite());
                prop_assert!(e.pos.y >= -slack);
                prop_assert!(e.pos.y <= 600.0 - e.size().y + slack);
            }
        }
    }
}
