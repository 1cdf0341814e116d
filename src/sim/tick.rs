//! Session lifecycle and the once-per-second countdown step

use super::spawn;
use super::state::{Phase, Session};
use crate::consts::*;
use crate::target_score;

/// Phase change produced by a simulation step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    None,
    /// Score reached the target; the countdown stops
    LevelComplete,
    /// Countdown expired short of the target
    GameOver,
}

/// Begin an attempt: Idle -> Playing.
///
/// Score, energy and countdown reset; level and target carry over from the
/// last known progression.
pub fn start(session: &mut Session) {
    if session.phase != Phase::Idle {
        return;
    }
    session.score = 0;
    session.energy = 0;
    session.time_remaining = SESSION_SECONDS;
    session.dirt.clear();
    spawn::opening_wave(session);
    session.phase = Phase::Playing;
    log::debug!(
        "attempt started: level {} target {} tool {}",
        session.level,
        session.target_score,
        session.tool().label()
    );
}

/// One countdown second.
///
/// Expiry wins over spawning: the tick that reaches zero only reports
/// GameOver, so at most one expiry is ever observed per attempt.
pub fn tick(session: &mut Session) -> Transition {
    if session.phase != Phase::Playing {
        return Transition::None;
    }
    session.time_remaining = session.time_remaining.saturating_sub(1);
    if session.time_remaining == 0 {
        session.phase = Phase::GameOver;
        return Transition::GameOver;
    }
    spawn::on_tick(session);
    Transition::None
}

/// Win check. Must run in the same step as the score mutation it follows,
/// so the phase decision always sees the post-update score.
pub(crate) fn check_target(session: &mut Session) -> Transition {
    if session.phase == Phase::Playing && session.score >= session.target_score {
        session.phase = Phase::LevelComplete;
        Transition::LevelComplete
    } else {
        Transition::None
    }
}

/// Outcome of a power-up activation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerUp {
    /// Whether the meter was full and the burst fired
    pub fired: bool,
    pub transition: Transition,
}

impl PowerUp {
    fn noop() -> Self {
        Self {
            fired: false,
            transition: Transition::None,
        }
    }
}

/// Spend a full meter to clear the field.
///
/// Scores every live blob, drains the meter and re-evaluates the target
/// against the new score. The follow-up spawn batch is the caller's to
/// schedule, and to cancel if the session leaves Playing before it lands.
pub fn activate_power_up(session: &mut Session) -> PowerUp {
    if session.phase != Phase::Playing || session.energy < ENERGY_FULL {
        return PowerUp::noop();
    }
    let burst_value = session.field_value();
    session.score += burst_value;
    session.dirt.clear();
    session.energy = 0;
    log::debug!("power-up burst cleared the field for {burst_value}");
    PowerUp {
        fired: true,
        transition: check_target(session),
    }
}

/// LevelComplete -> Idle, moving on to the next level
pub fn advance_level(session: &mut Session) {
    if session.phase != Phase::LevelComplete {
        return;
    }
    session.level += 1;
    session.target_score = target_score(session.level);
    session.phase = Phase::Idle;
}

/// GameOver -> Idle, re-attempting the same level
pub fn retry(session: &mut Session) {
    if session.phase != Phase::GameOver {
        return;
    }
    session.phase = Phase::Idle;
}
