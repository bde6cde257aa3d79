//! Injectable time source for the capture session.
//!
//! The session's only suspension points are plain sleeps: the settle delay
//! after opening the port and the short backoff between empty polls. Routing
//! both through [`Clock`] lets tests drive the timeout path deterministically,
//! without real hardware or real delays.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Time capability used by the capture session.
pub trait Clock {
    /// Current instant.
    fn now(&self) -> Instant;

    /// Suspend the calling thread for `duration`.
    fn sleep(&self, duration: Duration);
}

/// Wall-clock implementation backed by `std::thread::sleep`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Deterministic clock for tests.
///
/// `sleep` advances virtual time instead of blocking. `now` additionally
/// advances by a fixed tick per call, so a polling loop that is fed data on
/// every poll (and therefore never sleeps) still makes progress toward its
/// deadline. Clones share the same virtual time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    base: Instant,
    offset: Rc<Cell<Duration>>,
    tick: Duration,
}

impl ManualClock {
    /// Clock that only advances on `sleep` and explicit `advance` calls.
    pub fn new() -> Self {
        Self::with_tick(Duration::ZERO)
    }

    /// Clock that also advances by `tick` on every `now` call.
    pub fn with_tick(tick: Duration) -> Self {
        Self {
            base: Instant::now(),
            offset: Rc::new(Cell::new(Duration::ZERO)),
            tick,
        }
    }

    /// Advance virtual time by `duration`.
    pub fn advance(&self, duration: Duration) {
        self.offset.set(self.offset.get() + duration);
    }

    /// Total virtual time elapsed since construction.
    pub fn elapsed(&self) -> Duration {
        self.offset.get()
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        let now = self.base + self.offset.get();
        self.offset.set(self.offset.get() + self.tick);
        now
    }

    fn sleep(&self, duration: Duration) {
        self.advance(duration);
    }
}
