//! Simulation module
//!
//! All gameplay logic lives here. Nothing in this module touches the DOM or
//! the clock directly:
//! - Time comes in as a `now_ms` argument
//! - Randomness comes from a seeded RNG passed down explicitly
//! - Entities update and hit-test in list order (last drawn is topmost)

pub mod coordinator;
pub mod difficulty;
pub mod entity;
pub mod round;
pub mod spawn;
pub mod specials;

pub use coordinator::SpawnCoordinator;
pub use difficulty::{Difficulty, SPIRAL_BONUS_SIZE_RATIO};
pub use entity::{ClickResult, Entity, EntityKind, PlayField, SpiralMotion};
pub use round::{EndReason, Round, RoundConfig, RoundEvent, RoundPhase, ScheduledEnd};
pub use spawn::{
    ObstaclePolicy, SpawnContext, SpawnPolicy, SpawnResult, SpecialTurkeyPolicy, TurkeyPolicy,
};
pub use specials::SpecialLedger;
