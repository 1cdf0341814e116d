//! Pointer hit resolution
//!
//! One pointer-down clears every blob whose pickup circle contains the
//! point; the pickup circle is the blob's own radius extended by the active
//! tool's reach.

use glam::Vec2;

use super::state::{Phase, Session};
use super::tick::{Transition, check_target};
use crate::consts::*;

/// Outcome of one resolved pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitReport {
    /// Blobs removed by this pointer event
    pub cleared: u32,
    /// Score added
    pub points: u32,
    /// Phase change caused by the score delta, if any
    pub transition: Transition,
}

impl HitReport {
    fn miss() -> Self {
        Self {
            cleared: 0,
            points: 0,
            transition: Transition::None,
        }
    }
}

/// Resolve a pointer-down at `point` against the live dirt set.
///
/// All qualifying blobs are cleared by the same event - the operation is a
/// set, not a sequence. Removal, score, energy and the win check are
/// applied as one step, so the phase decision always sees the post-hit
/// score. Zero hits leave the session untouched.
pub fn resolve_hit(session: &mut Session, point: Vec2) -> HitReport {
    if session.phase != Phase::Playing {
        return HitReport::miss();
    }

    let reach = session.tool().effective_radius();
    let mut cleared = 0u32;
    let mut points = 0u32;
    session.dirt.retain(|d| {
        if point.distance(d.pos) < d.size / 2.0 + reach {
            cleared += 1;
            points += d.score_value();
            false
        } else {
            true
        }
    });

    if cleared == 0 {
        return HitReport::miss();
    }

    session.score += points;
    session.energy = (session.energy + ENERGY_PER_HIT * cleared).min(ENERGY_FULL);

    HitReport {
        cleared,
        points,
        transition: check_target(session),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Dirt, DirtKind, FieldBounds};
    use crate::sim::tick::start;

    fn playing_session(level: u32) -> Session {
        let mut s = Session::new(FieldBounds::new(800.0, 600.0), level, 42);
        start(&mut s);
        s.dirt.clear();
        s
    }

    fn blob_at(id: u32, x: f32, y: f32, size: f32) -> Dirt {
        Dirt {
            id,
            pos: Vec2::new(x, y),
            size,
            kind: DirtKind::Mud,
        }
    }

    #[test]
    fn test_hand_reach_clears_nearby_blob() {
        // Blob at (100,100), size 60, Hand reach 40: pointer at (110,105)
        // is ~11.2 away, well inside 30 + 40.
        let mut s = playing_session(1);
        s.dirt.push(blob_at(1, 100.0, 100.0, 60.0));
        let report = resolve_hit(&mut s, Vec2::new(110.0, 105.0));
        assert_eq!(report.cleared, 1);
        assert_eq!(report.points, 25);
        assert_eq!(s.score, 25);
        assert_eq!(s.energy, 5);
        assert!(s.dirt.is_empty());
    }

    #[test]
    fn test_out_of_reach_is_untouched() {
        let mut s = playing_session(1);
        s.dirt.push(blob_at(1, 100.0, 100.0, 40.0));
        // Reach is 20 + 40 = 60; the pointer sits 80 away.
        let report = resolve_hit(&mut s, Vec2::new(180.0, 100.0));
        assert_eq!(report.cleared, 0);
        assert_eq!(s.score, 0);
        assert_eq!(s.energy, 0);
        assert_eq!(s.dirt.len(), 1);
    }

    #[test]
    fn test_one_event_clears_the_whole_set() {
        let mut s = playing_session(1);
        s.dirt.push(blob_at(1, 100.0, 100.0, 40.0));
        s.dirt.push(blob_at(2, 120.0, 100.0, 60.0));
        s.dirt.push(blob_at(3, 700.0, 500.0, 40.0));
        let report = resolve_hit(&mut s, Vec2::new(110.0, 100.0));
        assert_eq!(report.cleared, 2);
        assert_eq!(report.points, 15 + 25);
        assert_eq!(s.energy, 10);
        assert_eq!(s.dirt.len(), 1);
        assert_eq!(s.dirt[0].id, 3);
    }

    #[test]
    fn test_ignored_outside_playing() {
        let mut s = Session::new(FieldBounds::new(800.0, 600.0), 1, 42);
        s.dirt.push(blob_at(1, 100.0, 100.0, 60.0));
        let report = resolve_hit(&mut s, Vec2::new(100.0, 100.0));
        assert_eq!(report.cleared, 0);
        assert_eq!(s.dirt.len(), 1);
    }

    #[test]
    fn test_energy_clamps_at_full() {
        let mut s = playing_session(1);
        s.energy = 98;
        s.dirt.push(blob_at(1, 100.0, 100.0, 40.0));
        resolve_hit(&mut s, Vec2::new(100.0, 100.0));
        assert_eq!(s.energy, ENERGY_FULL);
    }

    #[test]
    fn test_win_decision_sees_post_hit_score() {
        let mut s = playing_session(1);
        s.score = 190;
        s.dirt.push(blob_at(1, 100.0, 100.0, 60.0));
        let report = resolve_hit(&mut s, Vec2::new(100.0, 100.0));
        assert_eq!(s.score, 215);
        assert_eq!(report.transition, Transition::LevelComplete);
        assert_eq!(s.phase, Phase::LevelComplete);
    }

    #[test]
    fn test_score_monotonic_over_random_pokes() {
        let mut s = playing_session(1);
        crate::sim::spawn::spawn_many(&mut s, 30);
        let mut last = s.score;
        for i in 0..40 {
            let p = Vec2::new((i * 37 % 800) as f32, (i * 53 % 600) as f32);
            resolve_hit(&mut s, p);
            assert!(s.score >= last);
            last = s.score;
            if s.phase != Phase::Playing {
                break;
            }
        }
    }

    #[test]
    fn test_laser_reach_beats_hand() {
        let mut near_miss_for_hand = playing_session(1);
        near_miss_for_hand.dirt.push(blob_at(1, 100.0, 100.0, 40.0));
        let report = resolve_hit(&mut near_miss_for_hand, Vec2::new(170.0, 100.0));
        assert_eq!(report.cleared, 0);

        let mut laser = playing_session(20);
        laser.dirt.push(blob_at(1, 100.0, 100.0, 40.0));
        let report = resolve_hit(&mut laser, Vec2::new(170.0, 100.0));
        assert_eq!(report.cleared, 1);
    }
}
