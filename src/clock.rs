//! Cancellable wall-time scheduling
//!
//! The simulation is pure; the only suspension points in the crate are the
//! one-second countdown tick and the half-second delay before a post-burst
//! spawn batch. Both run on plain threads and hand a [`TimerHandle`] back
//! to the owner; once the handle is cancelled the callback never fires
//! again.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

/// Cancellation token for a scheduled callback.
///
/// Dropping the handle cancels it too, so a forgotten timer cannot outlive
/// its owner.
#[derive(Debug)]
pub struct TimerHandle {
    cancelled: Arc<AtomicBool>,
}

impl TimerHandle {
    fn new() -> (Self, Arc<AtomicBool>) {
        let flag = Arc::new(AtomicBool::new(false));
        (
            Self {
                cancelled: Arc::clone(&flag),
            },
            flag,
        )
    }

    /// Stop the timer. The callback will not run after this returns; a wait
    /// already in progress finishes on its own thread and exits.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Run `f` every `period` until it returns `false` or the handle is
/// cancelled. The first run happens one full period after this call.
pub fn every<F>(period: Duration, mut f: F) -> TimerHandle
where
    F: FnMut() -> bool + Send + 'static,
{
    let (handle, cancelled) = TimerHandle::new();
    thread::spawn(move || {
        loop {
            thread::sleep(period);
            if cancelled.load(Ordering::SeqCst) {
                break;
            }
            if !f() {
                break;
            }
        }
    });
    handle
}

/// Run `f` once after `delay` unless the handle is cancelled first
pub fn after<F>(delay: Duration, f: F) -> TimerHandle
where
    F: FnOnce() + Send + 'static,
{
    let (handle, cancelled) = TimerHandle::new();
    thread::spawn(move || {
        thread::sleep(delay);
        if !cancelled.load(Ordering::SeqCst) {
            f();
        }
    });
    handle
}
