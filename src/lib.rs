//! Trutti Hunt - a 90-second canvas arcade hunt
//!
//! Core modules:
//! - `sim`: Round simulation (entities, spawn policies, round state machine)
//! - `renderer`: Canvas 2D drawing contract and sprites
//! - `platform`: Browser/native clock abstraction
//! - `persistence`: Key-value storage (LocalStorage on web)
//! - `scoreboard`: Persisted top-5 results
//! - `settings`: Persisted last-used round settings

pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod scoreboard;
pub mod settings;
pub mod sim;

pub use scoreboard::{ScoreEntry, Scoreboard};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Length of a round in seconds
    pub const ROUND_DURATION_SECS: u32 = 90;
    /// Wall-clock milliseconds per countdown step
    pub const TIMER_STEP_MS: f64 = 1000.0;

    /// Default canvas dimensions (px)
    pub const DEFAULT_CANVAS_WIDTH: f32 = 800.0;
    pub const DEFAULT_CANVAS_HEIGHT: f32 = 600.0;

    /// Entities further than this outside the left/right edge are evicted
    pub const OFFSCREEN_MARGIN: f32 = 100.0;
    /// Horizontal distance outside the canvas where entities enter
    pub const SPAWN_EDGE_OFFSET: f32 = 50.0;
    /// Spawn `y` is drawn from `[0, height - SPAWN_BOTTOM_CLEARANCE)`
    pub const SPAWN_BOTTOM_CLEARANCE: f32 = 100.0;
    /// Smallest sprite dimension regardless of canvas size
    pub const MIN_ENTITY_SIZE: f32 = 40.0;

    /// Rare collectibles are numbered 1..=SPECIAL_COUNT
    pub const SPECIAL_COUNT: u8 = 9;

    /// Money per catch
    pub const COMMON_REWARD: i64 = 10;
    pub const SPECIAL_REWARD: i64 = 50;
    pub const ALL_SPECIALS_BONUS: i64 = 500;
    pub const OBSTACLE_PENALTY: i64 = -50;
    pub const BONUS_OBSTACLE_REWARD: i64 = 100;

    /// Delay between catching the last special and the round ending
    pub const COMPLETION_END_DELAY_MS: f64 = 2000.0;

    /// Scoreboard length
    pub const SCOREBOARD_CAPACITY: usize = 5;
}
