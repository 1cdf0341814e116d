//! Dirt Blitz - a timed dirt-clearing arcade mini-game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (session state machine, spawning, hit resolution)
//! - `clock`: Cancellable wall-time scheduling for ticks and the delayed spawn burst
//! - `progress`: Durable cross-session progression (last score, high score, level)
//! - `game`: Host-facing facade wiring timers and pointer input into the simulation

pub mod clock;
pub mod game;
pub mod progress;
pub mod sim;

pub use game::MiniGame;
pub use progress::{FileStore, MemoryStore, ProgressionRecord, ProgressionStore};

/// Game configuration constants
pub mod consts {
    /// Wall time between countdown ticks
    pub const TICK_INTERVAL_MS: u64 = 1_000;
    /// Delay before the post-power-up spawn batch lands
    pub const BURST_DELAY_MS: u64 = 500;
    /// Countdown length of one attempt, in seconds
    pub const SESSION_SECONDS: u32 = 30;

    /// Play-field inset; dirt never spawns closer than this to an edge
    pub const FIELD_PADDING: f32 = 40.0;

    /// Dirt size is drawn uniformly from [DIRT_MIN_SIZE, DIRT_MIN_SIZE + DIRT_SIZE_SPREAD)
    pub const DIRT_MIN_SIZE: f32 = 30.0;
    pub const DIRT_SIZE_SPREAD: f32 = 40.0;
    /// Blobs larger than this score BIG_DIRT_SCORE, the rest SMALL_DIRT_SCORE
    pub const BIG_DIRT_SIZE: f32 = 50.0;
    pub const BIG_DIRT_SCORE: u32 = 25;
    pub const SMALL_DIRT_SCORE: u32 = 15;

    /// Blobs placed the instant a session starts
    pub const OPENING_WAVE: usize = 8;

    /// Meter gain per blob cleared by a pointer hit
    pub const ENERGY_PER_HIT: u32 = 5;
    /// Full meter; the clear-field burst unlocks here
    pub const ENERGY_FULL: u32 = 100;

    /// Target score for level 1
    pub const BASE_TARGET: u32 = 200;
    /// Additional target per level beyond the first
    pub const TARGET_STEP: u32 = 150;
}

/// Score threshold that completes the given level
#[inline]
pub fn target_score(level: u32) -> u32 {
    consts::BASE_TARGET + level.saturating_sub(1) * consts::TARGET_STEP
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_score_formula() {
        assert_eq!(target_score(1), 200);
        assert_eq!(target_score(2), 350);
        assert_eq!(target_score(5), 800);
    }
}
