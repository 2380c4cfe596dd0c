//! Round controller
//!
//! Drives one 90-second round: countdown, pause/resume, spawning, movement,
//! click resolution, end-of-round detection and scoreboard qualification.
//! The host calls `tick` once per animation frame and `handle_click` from
//! its input handler, both with the current wall-clock time in ms.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::coordinator::SpawnCoordinator;
use super::difficulty::Difficulty;
use super::entity::{ClickResult, Entity, PlayField};
use super::spawn::SpawnContext;
use super::specials::SpecialLedger;
use crate::consts::*;
use crate::persistence::Storage;
use crate::renderer::{self, Surface};
use crate::scoreboard::{ScoreEntry, Scoreboard};

/// Lifecycle of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    /// No round in progress
    Idle,
    Running,
    Paused,
    /// Finished; state is read-only until `reset` or `start`
    Ended,
}

/// Why a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    TimeUp,
    /// The last uncaught special flew off the field
    LastSpecialEscaped,
    AllSpecialsCaught,
    /// Host asked for it
    Manual,
}

/// Notifications for the UI layer, drained after each call
#[derive(Debug, Clone, PartialEq)]
pub enum RoundEvent {
    Started { difficulty: Difficulty },
    Paused,
    Resumed,
    ScoreChanged { money: i64, delta: i64 },
    SpecialCaught { id: u8, caught: usize },
    Completion(String),
    TimerTick { remaining: u32 },
    Ended { qualifies: bool, reason: EndReason },
}

/// Initial input for `start`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RoundConfig {
    pub difficulty: Difficulty,
    pub field: PlayField,
    /// Seed for every random decision in the round
    pub seed: u64,
}

impl RoundConfig {
    pub fn new(difficulty: Difficulty, width: f32, height: f32, seed: u64) -> Self {
        Self {
            difficulty,
            field: PlayField::new(width, height),
            seed,
        }
    }
}

/// A deferred round end, tied to the round generation that scheduled it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledEnd {
    pub due_ms: f64,
    pub generation: u64,
}

pub struct Round {
    phase: RoundPhase,
    difficulty: Difficulty,
    field: PlayField,
    money: i64,
    time_remaining: u32,
    entities: Vec<Entity>,
    specials: SpecialLedger,
    coordinator: SpawnCoordinator,
    rng: Pcg32,

    /// Wall-clock time the round started
    started_ms: f64,
    /// Countdown reference; advances 1000 ms per decrement
    timer_ref_ms: f64,
    paused_at_ms: Option<f64>,
    paused_total_ms: f64,

    /// Bumped on every start/reset so stale deferred ends can be ignored
    generation: u64,
    scheduled_end: Option<ScheduledEnd>,

    completion_message: Option<String>,
    end_reason: Option<EndReason>,
    qualifies_for_top: bool,
    scoreboard: Scoreboard,
    storage: Box<dyn Storage>,

    events: Vec<RoundEvent>,
    next_id: u32,
}

impl Round {
    /// Create an idle controller backed by `storage` for the scoreboard
    pub fn new(storage: Box<dyn Storage>) -> Self {
        Self {
            phase: RoundPhase::Idle,
            difficulty: Difficulty::default(),
            field: PlayField::default(),
            money: 0,
            time_remaining: ROUND_DURATION_SECS,
            entities: Vec::new(),
            specials: SpecialLedger::default(),
            coordinator: SpawnCoordinator::with_default_policies(),
            rng: Pcg32::seed_from_u64(0),
            started_ms: 0.0,
            timer_ref_ms: 0.0,
            paused_at_ms: None,
            paused_total_ms: 0.0,
            generation: 0,
            scheduled_end: None,
            completion_message: None,
            end_reason: None,
            qualifies_for_top: false,
            scoreboard: Scoreboard::new(),
            storage,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Begin a fresh round, discarding whatever the previous one left
    pub fn start(&mut self, config: RoundConfig, now_ms: f64) {
        self.clear_round_state();

        self.difficulty = config.difficulty;
        self.field = config.field;
        self.rng = Pcg32::seed_from_u64(config.seed);
        self.started_ms = now_ms;
        self.timer_ref_ms = now_ms;
        self.phase = RoundPhase::Running;

        log::info!(
            "Round {} started ({}, {}x{}, seed {})",
            self.generation,
            self.difficulty.as_str(),
            self.field.width,
            self.field.height,
            config.seed
        );
        self.events.push(RoundEvent::Started {
            difficulty: self.difficulty,
        });
    }

    /// Drop all round state and return to idle. Leaves the stored scoreboard alone.
    pub fn reset(&mut self) {
        self.clear_round_state();
        self.phase = RoundPhase::Idle;
        log::info!("Round reset");
    }

    fn clear_round_state(&mut self) {
        self.generation += 1;
        self.money = 0;
        self.time_remaining = ROUND_DURATION_SECS;
        self.entities.clear();
        self.specials.clear();
        self.coordinator.reset();
        self.paused_at_ms = None;
        self.paused_total_ms = 0.0;
        self.scheduled_end = None;
        self.completion_message = None;
        self.end_reason = None;
        self.qualifies_for_top = false;
        self.events.clear();
        self.next_id = 1;
    }

    /// Canvas was resized; applies from the next tick
    pub fn resize(&mut self, width: f32, height: f32) {
        self.field = PlayField::new(width, height);
    }

    /// Advance one animation frame
    pub fn tick(&mut self, now_ms: f64) {
        self.run_scheduled(now_ms);

        if self.phase != RoundPhase::Running {
            return;
        }

        // Countdown follows wall-clock time, not frame count
        while self.time_remaining > 0 && now_ms - self.timer_ref_ms >= TIMER_STEP_MS {
            self.time_remaining -= 1;
            self.timer_ref_ms += TIMER_STEP_MS;
            self.events.push(RoundEvent::TimerTick {
                remaining: self.time_remaining,
            });
        }
        if self.time_remaining == 0 {
            self.end_round(EndReason::TimeUp);
            return;
        }

        let mut ctx = SpawnContext {
            field: self.field,
            difficulty: self.difficulty,
            game_time_ms: self.game_time_ms(now_ms),
            time_remaining_secs: self.time_remaining,
            specials: &mut self.specials,
        };
        let spawned = self.coordinator.update(&mut ctx, &mut self.rng);
        for mut entity in spawned {
            entity.id = self.next_entity_id();
            self.entities.push(entity);
        }

        for entity in &mut self.entities {
            entity.update(self.field, self.difficulty, &mut self.rng);
        }

        let field = self.field;
        let caught = self.specials.caught();
        let last_escaped = self.entities.iter().any(|e| {
            !field.keeps(e.pos.x)
                && e.is_last_special()
                && e.special_id().is_some_and(|id| !caught.contains(&id))
        });
        self.entities.retain(|e| field.keeps(e.pos.x));

        if last_escaped {
            log::info!("Last special escaped");
            self.end_round(EndReason::LastSpecialEscaped);
        }
    }

    /// Resolve a click at canvas coordinates. Returns the payoff of the
    /// entity hit, or None if nothing was hit or the round isn't live.
    pub fn handle_click(&mut self, x: f32, y: f32, now_ms: f64) -> Option<ClickResult> {
        if self.phase != RoundPhase::Running {
            return None;
        }

        // Topmost (last drawn) first
        let point = Vec2::new(x, y);
        let index = self.entities.iter().rposition(|e| e.contains(point))?;
        let result = self.entities[index].on_click(self.specials.caught());
        log::debug!(
            "Clicked {} #{} for {:+}",
            self.entities[index].label(),
            self.entities[index].id,
            result.money_delta
        );

        if result.should_remove {
            self.entities.remove(index);
        }

        if result.money_delta != 0 {
            self.money += result.money_delta;
            self.events.push(RoundEvent::ScoreChanged {
                money: self.money,
                delta: result.money_delta,
            });
        }

        if let Some(id) = result.caught_id {
            if self.specials.mark_caught(id) {
                self.events.push(RoundEvent::SpecialCaught {
                    id,
                    caught: self.specials.caught().len(),
                });
            }
        }

        if let Some(message) = &result.completion_message {
            log::info!("{}", message);
            self.completion_message = Some(message.clone());
            self.events.push(RoundEvent::Completion(message.clone()));
        }

        if result.should_end_round {
            if result.end_round_delay_ms > 0.0 {
                self.scheduled_end = Some(ScheduledEnd {
                    due_ms: now_ms + result.end_round_delay_ms,
                    generation: self.generation,
                });
            } else {
                self.end_round(EndReason::AllSpecialsCaught);
            }
        }

        Some(result)
    }

    /// Fire the deferred end if it is due and still belongs to this round
    fn run_scheduled(&mut self, now_ms: f64) {
        let Some(scheduled) = self.scheduled_end else {
            return;
        };
        if now_ms >= scheduled.due_ms {
            self.scheduled_end = None;
            self.end_round_if_current(scheduled.generation);
        }
    }

    /// End the round on behalf of a deferred task from `generation`.
    /// A task from an earlier round is a no-op.
    pub fn end_round_if_current(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            log::debug!(
                "Ignoring stale round end from generation {} (now {})",
                generation,
                self.generation
            );
            return false;
        }
        if !matches!(self.phase, RoundPhase::Running | RoundPhase::Paused) {
            return false;
        }
        self.end_round(EndReason::AllSpecialsCaught);
        true
    }

    /// Stop the round and check the stored scoreboard for qualification
    pub fn end_round(&mut self, reason: EndReason) -> bool {
        if !matches!(self.phase, RoundPhase::Running | RoundPhase::Paused) {
            return self.qualifies_for_top;
        }

        self.phase = RoundPhase::Ended;
        self.paused_at_ms = None;
        self.scheduled_end = None;
        self.end_reason = Some(reason);

        self.scoreboard = Scoreboard::load(self.storage.as_ref());
        self.qualifies_for_top = self.scoreboard.qualifies(self.money);

        log::info!(
            "Round {} ended ({:?}): money {}, specials {}/{}, qualifies {}",
            self.generation,
            reason,
            self.money,
            self.specials.caught().len(),
            self.specials.universe().len(),
            self.qualifies_for_top
        );
        self.events.push(RoundEvent::Ended {
            qualifies: self.qualifies_for_top,
            reason,
        });

        self.qualifies_for_top
    }

    /// Record the finished round under `name`. Returns the rank achieved.
    pub fn save_score(&mut self, name: &str, date: String) -> Option<usize> {
        if self.phase != RoundPhase::Ended {
            return None;
        }
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        let rank = self.scoreboard.add(ScoreEntry {
            name: name.to_string(),
            score: self.money,
            date,
            difficulty: self.difficulty,
        });
        if let Err(e) = self.scoreboard.save(self.storage.as_mut()) {
            log::warn!("Failed to save scoreboard: {}", e);
        }
        rank
    }

    pub fn pause(&mut self, now_ms: f64) -> bool {
        if self.phase != RoundPhase::Running {
            return false;
        }
        self.phase = RoundPhase::Paused;
        self.paused_at_ms = Some(now_ms);
        log::info!("Paused at {}s", self.time_remaining);
        self.events.push(RoundEvent::Paused);
        true
    }

    pub fn resume(&mut self, now_ms: f64) -> bool {
        if self.phase != RoundPhase::Paused {
            return false;
        }
        // None of the paused interval counts toward the countdown or spawns
        let paused_for = self
            .paused_at_ms
            .take()
            .map(|at| (now_ms - at).max(0.0))
            .unwrap_or(0.0);
        self.timer_ref_ms += paused_for;
        self.paused_total_ms += paused_for;
        self.phase = RoundPhase::Running;
        log::info!("Resumed after {:.0}ms", paused_for);
        self.events.push(RoundEvent::Resumed);
        true
    }

    pub fn toggle_pause(&mut self, now_ms: f64) -> bool {
        match self.phase {
            RoundPhase::Running => self.pause(now_ms),
            RoundPhase::Paused => self.resume(now_ms),
            _ => false,
        }
    }

    /// Unpaused milliseconds since start
    pub fn game_time_ms(&self, now_ms: f64) -> f64 {
        let now = self.paused_at_ms.unwrap_or(now_ms);
        (now - self.started_ms - self.paused_total_ms).max(0.0)
    }

    /// Add an entity to the top of the live list
    pub fn insert_entity(&mut self, mut entity: Entity) -> u32 {
        entity.id = self.next_entity_id();
        let id = entity.id;
        self.entities.push(entity);
        id
    }

    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Draw the current frame
    pub fn render(&self, surface: &mut dyn Surface, now_ms: f64) {
        renderer::render_scene(surface, self.field, &self.entities, now_ms);
    }

    pub fn drain_events(&mut self) -> Vec<RoundEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == RoundPhase::Running
    }

    pub fn is_paused(&self) -> bool {
        self.phase == RoundPhase::Paused
    }

    pub fn is_ended(&self) -> bool {
        self.phase == RoundPhase::Ended
    }

    pub fn money(&self) -> i64 {
        self.money
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn field(&self) -> PlayField {
        self.field
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn specials(&self) -> &SpecialLedger {
        &self.specials
    }

    pub fn caught_count(&self) -> usize {
        self.specials.caught().len()
    }

    pub fn completion_message(&self) -> Option<&str> {
        self.completion_message.as_deref()
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    pub fn qualifies_for_top(&self) -> bool {
        self.qualifies_for_top
    }

    /// Scoreboard as loaded at round end
    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn scheduled_end(&self) -> Option<ScheduledEnd> {
        self.scheduled_end
    }

    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }
}
