//! Customer arrival cadence.

use cafe_core::{SimConfig, SimRng};

/// Decides when the next customer walks in: every `interval ± jitter`
/// seconds, paused while the floor is at capacity.
#[derive(Clone, Debug)]
pub struct Spawner {
    interval: f64,
    jitter:   f64,
    cap:      usize,
    next_at:  f64,
    rng:      SimRng,
}

impl Spawner {
    pub fn new(cfg: &SimConfig) -> Self {
        Self {
            interval: cfg.spawn_interval_secs,
            jitter:   cfg.spawn_jitter_secs,
            cap:      cfg.max_agents,
            next_at:  0.0,
            rng:      SimRng::new(cfg.seed.rotate_left(17)),
        }
    }

    pub fn enabled(&self) -> bool {
        self.interval > 0.0 && self.cap > 0
    }

    /// Time of the next scheduled arrival.
    pub fn next_at(&self) -> f64 {
        self.next_at
    }

    /// `true` when a customer should spawn now.  Schedules the following
    /// arrival as a side effect.  A full floor delays the arrival until a
    /// place frees up.
    pub fn poll(&mut self, now: f64, live: usize) -> bool {
        if !self.enabled() || now < self.next_at || live >= self.cap {
            return false;
        }
        self.next_at = now + self.rng.jitter(self.interval, self.jitter);
        true
    }
}
