//! Host-facing facade
//!
//! Owns the single mutable [`Session`], the countdown timer, the delayed
//! burst timer and the progression store. The clock callbacks and pointer
//! input all funnel through one mutex, so every mutation is an atomic
//! read-modify-write step; a timer that fires after the session has left
//! Playing finds a phase guard and does nothing.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use glam::Vec2;

use crate::clock::{self, TimerHandle};
use crate::consts::*;
use crate::progress::{ProgressionRecord, ProgressionStore};
use crate::sim::{self, FieldBounds, Phase, Session, Transition, spawn};

/// One embedded mini-game instance.
///
/// Cheap to clone into timer callbacks; all clones share the same session.
pub struct MiniGame {
    inner: Arc<Inner>,
}

struct Inner {
    session: Mutex<Session>,
    store: Box<dyn ProgressionStore>,
    /// In-memory copy of the persisted record; mutated and saved together
    progression: Mutex<ProgressionRecord>,
    ticker: Mutex<Option<TimerHandle>>,
    burst: Mutex<Option<TimerHandle>>,
}

impl MiniGame {
    /// Mount the mini-game: load progression and build an idle session at
    /// the stored level. `seed` drives all randomness of the session.
    pub fn new(bounds: FieldBounds, store: Box<dyn ProgressionStore>, seed: u64) -> Self {
        let record = store.load();
        let session = Session::new(bounds, record.level, seed);
        Self {
            inner: Arc::new(Inner {
                session: Mutex::new(session),
                store,
                progression: Mutex::new(record),
                ticker: Mutex::new(None),
                burst: Mutex::new(None),
            }),
        }
    }

    /// Begin an attempt and start the countdown. No-op outside Idle.
    pub fn start(&self) {
        {
            let mut session = self.inner.session.lock().unwrap();
            if session.phase != Phase::Idle {
                return;
            }
            sim::start(&mut session);
        }

        let inner = Arc::clone(&self.inner);
        let handle = clock::every(Duration::from_millis(TICK_INTERVAL_MS), move || {
            let mut session = inner.session.lock().unwrap();
            if session.phase != Phase::Playing {
                return false;
            }
            let transition = sim::tick(&mut session);
            inner.settle(&session, transition);
            session.phase == Phase::Playing
        });
        *self.inner.ticker.lock().unwrap() = Some(handle);
    }

    /// Resolve a pointer-down in field coordinates. Ignored outside Playing.
    pub fn handle_pointer(&self, x: f32, y: f32) {
        let mut session = self.inner.session.lock().unwrap();
        let report = sim::resolve_hit(&mut session, Vec2::new(x, y));
        self.inner.settle(&session, report.transition);
    }

    /// Fire the clear-field burst if the meter is full, then schedule the
    /// follow-up spawn batch half a second out.
    pub fn activate_power_up(&self) {
        let level;
        {
            let mut session = self.inner.session.lock().unwrap();
            let outcome = sim::activate_power_up(&mut session);
            self.inner.settle(&session, outcome.transition);
            if !outcome.fired || session.phase != Phase::Playing {
                return;
            }
            level = session.level;
        }

        // The lock is released before scheduling; if a tick ends the
        // session in that window the callback's phase guard drops the
        // batch, and the transition path cancels the handle as well.
        let inner = Arc::clone(&self.inner);
        let handle = clock::after(Duration::from_millis(BURST_DELAY_MS), move || {
            let mut session = inner.session.lock().unwrap();
            if session.phase != Phase::Playing {
                return;
            }
            spawn::spawn_many(&mut session, spawn::burst_batch(level));
        });
        *self.inner.burst.lock().unwrap() = Some(handle);
    }

    /// Move on after a completed level. No-op outside LevelComplete.
    pub fn advance_level(&self) {
        let mut session = self.inner.session.lock().unwrap();
        sim::advance_level(&mut session);
    }

    /// Re-attempt the same level after a game over. No-op outside GameOver.
    pub fn retry(&self) {
        let mut session = self.inner.session.lock().unwrap();
        sim::retry(&mut session);
    }

    /// Cancel every pending timer. The session stays readable; no callback
    /// mutates it after this returns.
    pub fn dispose(&self) {
        self.inner.cancel_timers();
    }

    /// Read-only copy of the current session for rendering
    pub fn snapshot(&self) -> Session {
        self.inner.session.lock().unwrap().clone()
    }

    /// Progression as currently persisted
    pub fn progression(&self) -> ProgressionRecord {
        *self.inner.progression.lock().unwrap()
    }

    #[cfg(test)]
    fn session_mut(&self) -> std::sync::MutexGuard<'_, Session> {
        self.inner.session.lock().unwrap()
    }
}

impl Clone for MiniGame {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl Inner {
    /// Apply a transition's side effects: stop the timers and persist.
    /// Runs under the session lock, so the persistence decision is part of
    /// the same step as the mutation that caused it.
    fn settle(&self, session: &Session, transition: Transition) {
        match transition {
            Transition::None => {}
            Transition::LevelComplete => {
                self.cancel_timers();
                self.persist(session.score, Some(session.level + 1));
                log::info!(
                    "level {} complete at {} of {}",
                    session.level,
                    session.score,
                    session.target_score
                );
            }
            Transition::GameOver => {
                self.cancel_timers();
                self.persist(session.score, None);
                log::info!(
                    "time up at {} of {}",
                    session.score,
                    session.target_score
                );
            }
        }
    }

    /// Fold a finished attempt into the record and write it through.
    /// `unlocked` carries the next level on a win.
    fn persist(&self, score: u32, unlocked: Option<u32>) {
        let mut record = self.progression.lock().unwrap();
        record.last_score = score;
        if score > record.high_score {
            record.high_score = score;
        }
        if let Some(level) = unlocked {
            record.level = level;
        }
        self.store.save(&record);
    }

    fn cancel_timers(&self) {
        if let Some(t) = self.ticker.lock().unwrap().take() {
            t.cancel();
        }
        if let Some(b) = self.burst.lock().unwrap().take() {
            b.cancel();
        }
    }
}
