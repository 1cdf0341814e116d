//! Procedural dirt spawning
//!
//! Spawn pressure scales with level: the base per-tick chance grows by 0.1
//! per level and extra independent draws switch on past levels 2, 5 and 8.

use glam::Vec2;
use rand::Rng;

use super::state::{Dirt, DirtKind, Session};
use crate::consts::*;

/// Blobs placed the instant a session starts, regardless of level
pub fn opening_wave(session: &mut Session) {
    spawn_many(session, OPENING_WAVE);
}

/// Per-tick spawn decision.
///
/// The base chance is left uncapped on purpose: from level 5 upward the
/// draw always lands and higher levels add pressure through the extra
/// draws instead.
pub fn on_tick(session: &mut Session) {
    let level = session.level;
    let base = 0.5 + 0.1 * level as f64;
    if session.rng.random::<f64>() < base {
        spawn_one(session);
    }
    if level > 2 && session.rng.random_bool(0.5) {
        spawn_one(session);
    }
    if level > 5 && session.rng.random_bool(0.6) {
        spawn_one(session);
    }
    if level > 8 {
        spawn_one(session);
    }
}

/// Size of the delayed batch that follows a power-up burst
pub fn burst_batch(level: u32) -> usize {
    (3 + level) as usize
}

pub fn spawn_many(session: &mut Session, count: usize) {
    for _ in 0..count {
        spawn_one(session);
    }
}

/// Place one blob uniformly inside the padded field rectangle
pub fn spawn_one(session: &mut Session) {
    let bounds = session.bounds;
    if !bounds.can_spawn() {
        log::debug!("spawn dropped: no usable field bounds");
        return;
    }

    let x = session
        .rng
        .random_range(FIELD_PADDING..bounds.width - FIELD_PADDING);
    let y = session
        .rng
        .random_range(FIELD_PADDING..bounds.height - FIELD_PADDING);
    let size = DIRT_MIN_SIZE + DIRT_SIZE_SPREAD * session.rng.random::<f32>();
    let kind = roll_kind(session.rng.random::<f32>());

    let id = session.next_dirt_id();
    session.dirt.push(Dirt {
        id,
        pos: Vec2::new(x, y),
        size,
        kind,
    });
}

/// Category split: 40% mud, 30% stain, 30% dust
fn roll_kind(r: f32) -> DirtKind {
    if r > 0.6 {
        DirtKind::Mud
    } else if r > 0.3 {
        DirtKind::Stain
    } else {
        DirtKind::Dust
    }
}
