//! Simulation time model.
//!
//! # Design
//!
//! Every "has enough time passed" decision reads a single [`Clock`] owned by
//! the world driver.  Timestamps are plain `f64` seconds since the clock's
//! origin, which keeps mandate payloads (`WaitInfo`, `Wander::since`, …)
//! `Copy` and trivially comparable.
//!
//! Frames are counted separately as [`Tick`]s.  The driver calls
//! [`Clock::advance`] once per tick with the configured frame length; clocks
//! that follow real time ignore the hint.
//!
//! Tests substitute [`ManualClock`] and move time explicitly.

use std::fmt;
use std::time::Instant;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// A frame counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    #[inline]
    pub fn next(self) -> Tick {
        Tick(self.0 + 1)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── Clock ─────────────────────────────────────────────────────────────────────

/// Source of "now" for every time-dependent rule.
pub trait Clock {
    /// Seconds since the clock's origin.
    fn now(&self) -> f64;

    /// Called by the driver once per tick with the nominal frame length.
    fn advance(&mut self, _dt_secs: f64) {}
}

/// Fully controlled clock for tests: time moves only when told to.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: f64,
    /// When `true`, [`Clock::advance`] adds the driver's frame length.
    follow_ticks: bool,
}

impl ManualClock {
    /// A frozen clock at `start`; only [`set`](Self::set) and
    /// [`skip`](Self::skip) move it.
    pub fn frozen(start: f64) -> Self {
        Self { now: start, follow_ticks: false }
    }

    /// A clock at `start` that also advances with every driver tick.
    pub fn ticking(start: f64) -> Self {
        Self { now: start, follow_ticks: true }
    }

    pub fn set(&mut self, now: f64) {
        self.now = now;
    }

    pub fn skip(&mut self, secs: f64) {
        self.now += secs;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now
    }

    fn advance(&mut self, dt_secs: f64) {
        if self.follow_ticks {
            self.now += dt_secs;
        }
    }
}

/// Fixed-step clock: `now = ticks * tick_secs`.
///
/// Integer tick counting keeps long runs free of accumulated float drift.
#[derive(Clone, Debug)]
pub struct TickClock {
    pub tick: Tick,
    pub tick_secs: f64,
}

impl TickClock {
    pub fn new(tick_secs: f64) -> Self {
        Self { tick: Tick::ZERO, tick_secs }
    }
}

impl Clock for TickClock {
    fn now(&self) -> f64 {
        self.tick.0 as f64 * self.tick_secs
    }

    fn advance(&mut self, _dt_secs: f64) {
        self.tick = self.tick.next();
    }
}

/// Real elapsed time since construction.
#[derive(Clone, Debug)]
pub struct WallClock {
    origin: Instant,
}

impl WallClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for WallClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}
