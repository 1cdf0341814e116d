//! Session state and core simulation types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::target_score;

/// Current phase of a mini-game session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the player to start (or restart) an attempt
    Idle,
    /// Countdown running, input live
    Playing,
    /// Target score reached before the countdown expired
    LevelComplete,
    /// Countdown expired short of the target
    GameOver,
}

/// Dirt categories. Cosmetic grouping for the host's renderer; scoring
/// depends only on size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirtKind {
    Mud,
    Dust,
    Stain,
}

/// A spawned dirt blob - the clickable scoring target
#[derive(Debug, Clone)]
pub struct Dirt {
    pub id: u32,
    /// Center in field coordinates
    pub pos: Vec2,
    /// Diameter in field units
    pub size: f32,
    pub kind: DirtKind,
}

impl Dirt {
    /// Points awarded when this blob is cleared
    pub fn score_value(&self) -> u32 {
        if self.size > BIG_DIRT_SIZE {
            BIG_DIRT_SCORE
        } else {
            SMALL_DIRT_SCORE
        }
    }
}

/// Cleaning tool. A derived view of the session level, never stored or
/// mutated independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Hand,
    Spray,
    Vacuum,
    Laser,
}

impl Tool {
    /// Tool unlocked at the given level
    pub fn for_level(level: u32) -> Self {
        match level {
            0..=4 => Tool::Hand,
            5..=9 => Tool::Spray,
            10..=19 => Tool::Vacuum,
            _ => Tool::Laser,
        }
    }

    /// Pointer reach added on top of a blob's own radius
    pub fn effective_radius(&self) -> f32 {
        match self {
            Tool::Hand => 40.0,
            Tool::Spray => 60.0,
            Tool::Vacuum => 80.0,
            Tool::Laser => 100.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tool::Hand => "hand",
            Tool::Spray => "spray",
            Tool::Vacuum => "vacuum",
            Tool::Laser => "laser",
        }
    }
}

/// Play-field bounding box, supplied by the hosting view at mount
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldBounds {
    pub width: f32,
    pub height: f32,
}

impl FieldBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True when the padded spawn rectangle has positive area. A degenerate
    /// field means the host has not measured itself yet; spawn requests are
    /// dropped rather than placed outside the field.
    pub fn can_spawn(&self) -> bool {
        self.width > 2.0 * FIELD_PADDING && self.height > 2.0 * FIELD_PADDING
    }
}

/// Complete state of one play-through, spanning levels via retries/advances
#[derive(Debug, Clone)]
pub struct Session {
    pub phase: Phase,
    /// Current level, 1-based. Carries across attempts via the progression record.
    pub level: u32,
    pub score: u32,
    /// Score threshold that completes the current level
    pub target_score: u32,
    /// Power-up meter, 0..=ENERGY_FULL
    pub energy: u32,
    /// Whole seconds left on the countdown
    pub time_remaining: u32,
    /// Live dirt, oldest first
    pub dirt: Vec<Dirt>,
    pub bounds: FieldBounds,
    /// Session RNG; every draw flows through here for reproducibility
    pub(crate) rng: Pcg32,
    /// Next dirt ID
    next_id: u32,
}

impl Session {
    /// Create an idle session at the given level (normally the persisted one)
    pub fn new(bounds: FieldBounds, level: u32, seed: u64) -> Self {
        let level = level.max(1);
        Self {
            phase: Phase::Idle,
            level,
            score: 0,
            target_score: target_score(level),
            energy: 0,
            time_remaining: 0,
            dirt: Vec::new(),
            bounds,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Active tool is a pure function of level
    pub fn tool(&self) -> Tool {
        Tool::for_level(self.level)
    }

    /// Allocate a dirt ID; never reused while the session lives
    pub(crate) fn next_dirt_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Sum of score values over all live dirt
    pub fn field_value(&self) -> u32 {
        self.dirt.iter().map(Dirt::score_value).sum()
    }
}
