//! Spawn coordinator: runs every registered policy once per tick

use rand::RngCore;

use super::entity::Entity;
use super::spawn::{ObstaclePolicy, SpawnContext, SpawnPolicy, SpecialTurkeyPolicy, TurkeyPolicy};

struct SpawnerEntry {
    policy: Box<dyn SpawnPolicy>,
    last_spawn_ms: f64,
}

/// Ordered set of policies with their last-fire times
#[derive(Default)]
pub struct SpawnCoordinator {
    entries: Vec<SpawnerEntry>,
}

impl std::fmt::Debug for SpawnCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|e| (e.policy.name(), e.last_spawn_ms)))
            .finish()
    }
}

impl SpawnCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// One policy per entity family, in draw order: turkeys, specials, obstacles
    pub fn with_default_policies() -> Self {
        let mut coordinator = Self::new();
        coordinator.register(Box::new(TurkeyPolicy));
        coordinator.register(Box::new(SpecialTurkeyPolicy));
        coordinator.register(Box::new(ObstaclePolicy));
        coordinator
    }

    pub fn register(&mut self, policy: Box<dyn SpawnPolicy>) {
        self.entries.push(SpawnerEntry {
            policy,
            last_spawn_ms: 0.0,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Last fire time of the policy at `index`
    pub fn last_spawn_ms(&self, index: usize) -> Option<f64> {
        self.entries.get(index).map(|e| e.last_spawn_ms)
    }

    /// Give every policy a chance to spawn. Returns new entities in
    /// registration order; one policy firing never blocks another.
    pub fn update(&mut self, ctx: &mut SpawnContext<'_>, rng: &mut dyn RngCore) -> Vec<Entity> {
        let mut spawned = Vec::new();

        for entry in &mut self.entries {
            if let Some(entity) = entry
                .policy
                .try_spawn(ctx, entry.last_spawn_ms, rng)
                .into_entity()
            {
                log::debug!(
                    "Spawned {} at ({:.0}, {:.0}) t={:.0}ms",
                    entity.label(),
                    entity.pos.x,
                    entity.pos.y,
                    ctx.game_time_ms
                );
                spawned.push(entity);
                entry.last_spawn_ms = ctx.game_time_ms;
            }
        }

        spawned
    }

    /// Zero every last-fire time for a fresh round
    pub fn reset(&mut self) {
        for entry in &mut self.entries {
            entry.last_spawn_ms = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::difficulty::Difficulty;
    use crate::sim::entity::PlayField;
    use crate::sim::entity::tests::Fixed;
    use crate::sim::spawn::SpawnResult;
    use crate::sim::specials::SpecialLedger;
    use glam::Vec2;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Policy that spawns whenever told to and counts its calls
    struct Scripted {
        fire: bool,
        calls: Rc<Cell<u32>>,
        x: f32,
    }

    impl SpawnPolicy for Scripted {
        fn name(&self) -> &'static str {
            "scripted"
        }

        fn try_spawn(
            &self,
            _ctx: &mut SpawnContext<'_>,
            _last_spawn_ms: f64,
            _rng: &mut dyn RngCore,
        ) -> SpawnResult {
            self.calls.set(self.calls.get() + 1);
            if self.fire {
                SpawnResult::Spawn(Entity::turkey(
                    Vec2::new(self.x, 0.0),
                    Vec2::ZERO,
                    Vec2::splat(50.0),
                ))
            } else {
                SpawnResult::Skip
            }
        }
    }

    fn context(ledger: &mut SpecialLedger, game_time_ms: f64) -> SpawnContext<'_> {
        SpawnContext {
            field: PlayField::default(),
            difficulty: Difficulty::Easy,
            game_time_ms,
            time_remaining_secs: 85,
            specials: ledger,
        }
    }

    #[test]
    fn test_update_collects_in_registration_order() {
        let calls = Rc::new(Cell::new(0));
        let mut coordinator = SpawnCoordinator::new();
        for x in [1.0, 2.0] {
            coordinator.register(Box::new(Scripted {
                fire: true,
                calls: calls.clone(),
                x,
            }));
        }

        let mut ledger = SpecialLedger::default();
        let spawned = coordinator.update(&mut context(&mut ledger, 3000.0), &mut Fixed(0));
        assert_eq!(spawned.len(), 2);
        assert_eq!(spawned[0].pos.x, 1.0);
        assert_eq!(spawned[1].pos.x, 2.0);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_only_firing_policy_records_time() {
        let calls = Rc::new(Cell::new(0));
        let mut coordinator = SpawnCoordinator::new();
        coordinator.register(Box::new(Scripted {
            fire: true,
            calls: calls.clone(),
            x: 0.0,
        }));
        coordinator.register(Box::new(Scripted {
            fire: false,
            calls: calls.clone(),
            x: 0.0,
        }));

        let mut ledger = SpecialLedger::default();
        coordinator.update(&mut context(&mut ledger, 4500.0), &mut Fixed(0));
        assert_eq!(coordinator.last_spawn_ms(0), Some(4500.0));
        assert_eq!(coordinator.last_spawn_ms(1), Some(0.0));

        coordinator.reset();
        assert_eq!(coordinator.last_spawn_ms(0), Some(0.0));
    }

    #[test]
    fn test_default_policies_fire_independently() {
        let mut coordinator = SpawnCoordinator::with_default_policies();
        assert_eq!(coordinator.len(), 3);

        let mut ledger = SpecialLedger::default();
        // Fixed(0) passes every chance roll
        let spawned = coordinator.update(&mut context(&mut ledger, 2000.0), &mut Fixed(0));
        assert_eq!(spawned.len(), 3);
        assert_eq!(spawned[0].label(), "turkey");
        assert_eq!(spawned[1].label(), "special-turkey");
        assert_eq!(spawned[2].label(), "bonus-obstacle");

        // Interval not yet elapsed for any of them
        let spawned = coordinator.update(&mut context(&mut ledger, 3000.0), &mut Fixed(0));
        assert!(spawned.is_empty());
    }
}
