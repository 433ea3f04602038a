//! Driver and behavior configuration.
//!
//! Both structs have sensible `Default`s tuned for the stock café floor
//! (scene units ≈ pixels).  Applications typically deserialize them (with
//! the `serde` feature) and call `validate()` before building a `Sim`.

use crate::{CafeError, CafeResult, Rect, Vec2};

/// Timed rules compare elapsed time modulo this window, so every wait that
/// goes through them must be strictly shorter.
pub const ELAPSED_WINDOW_SECS: f64 = 60.0;

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// World-driver configuration.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Nominal frame length passed to `Clock::advance`.
    pub tick_secs: f64,

    /// Frames to simulate in `Sim::run`.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed reproduces the same run.
    pub seed: u64,

    /// Seconds between customer spawns.  `0` disables the spawner.
    pub spawn_interval_secs: f64,

    /// Uniform jitter applied to each spawn interval.
    pub spawn_jitter_secs: f64,

    /// Spawning pauses while this many agents are alive.
    pub max_agents: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_secs:           1.0 / 30.0,
            total_ticks:         30 * 60 * 5,
            seed:                42,
            spawn_interval_secs: 8.0,
            spawn_jitter_secs:   2.0,
            max_agents:          12,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> CafeResult<()> {
        if !(self.tick_secs > 0.0) {
            return Err(CafeError::Config(format!(
                "tick_secs must be positive, got {}",
                self.tick_secs
            )));
        }
        if self.spawn_interval_secs < 0.0 || self.spawn_jitter_secs < 0.0 {
            return Err(CafeError::Config("spawn timing must not be negative".into()));
        }
        Ok(())
    }
}

// ── BehaviorConfig ────────────────────────────────────────────────────────────

/// Thresholds and timings used by the mandate handlers and their rules.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BehaviorConfig {
    /// `arrived_at_destination` succeeds strictly inside this radius.
    pub arrival_radius: f64,

    /// `enter_scene` tolerance along the entry path's dominant axis.
    pub entry_tolerance: f64,

    /// `exit_reached` succeeds strictly inside this radius.
    pub exit_radius: f64,

    /// Edge length of one queue slot cell.
    pub slot_size: f64,

    /// Upper bound on slots probed per direction.
    pub max_queue_slots: usize,

    /// Optional walkable area; queue slots never leave it.
    pub floor_bounds: Option<Rect>,

    /// Seconds an agent waits in its slot before it may be served.
    pub queue_wait_secs: f64,

    /// Seconds spent at the counter once served.
    pub service_secs: f64,

    /// Seconds spent seated.
    pub consume_secs: f64,

    /// Delay before a wandering agent retries its abandoned mandate.
    pub wander_retry_secs: f64,

    /// Sustained-contact period after which a queueing agent gives up.
    pub stuck_grace_secs: f64,

    /// Radius of planned paths (stay-on-path tolerance).
    pub path_radius: f64,

    /// Cruise speed handed to the decelerate goal while following a path.
    pub max_speed: f64,

    /// First-attempt ignore radius around the path's start and end.
    pub corridor_radius: f64,

    /// Second-attempt ignore width around the straight start→end line.
    pub pathway_width: f64,

    /// Consecutive setup faults tolerated before an agent is removed.
    pub max_config_faults: u32,

    /// Pull-back point for wandering agents.
    pub play_area_center: Vec2,

    /// Scene paths resolved through `WorldQuery::find_nodes`.
    pub entry_path:   String,
    pub counter_path: String,
    pub seat_path:    String,
    pub exit_path:    String,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            arrival_radius:    60.0,
            entry_tolerance:   5.0,
            exit_radius:       30.0,
            slot_size:         50.0,
            max_queue_slots:   6,
            floor_bounds:      None,
            queue_wait_secs:   3.0,
            service_secs:      4.0,
            consume_secs:      20.0,
            wander_retry_secs: 5.0,
            stuck_grace_secs:  6.0,
            path_radius:       20.0,
            max_speed:         120.0,
            corridor_radius:   40.0,
            pathway_width:     30.0,
            max_config_faults: 3,
            play_area_center:  Vec2::new(400.0, 300.0),
            entry_path:        "floor/entry".into(),
            counter_path:      "floor/counter".into(),
            seat_path:         "floor/seat".into(),
            exit_path:         "floor/exit".into(),
        }
    }
}

impl BehaviorConfig {
    pub fn validate(&self) -> CafeResult<()> {
        let positive = [
            ("arrival_radius", self.arrival_radius),
            ("entry_tolerance", self.entry_tolerance),
            ("exit_radius", self.exit_radius),
            ("slot_size", self.slot_size),
            ("path_radius", self.path_radius),
            ("max_speed", self.max_speed),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(CafeError::Config(format!("{name} must be positive, got {value}")));
            }
        }

        let windowed = [
            ("queue_wait_secs", self.queue_wait_secs),
            ("service_secs", self.service_secs),
            ("consume_secs", self.consume_secs),
            ("wander_retry_secs", self.wander_retry_secs),
            ("stuck_grace_secs", self.stuck_grace_secs),
        ];
        for (name, value) in windowed {
            if !(0.0..ELAPSED_WINDOW_SECS).contains(&value) {
                return Err(CafeError::Config(format!(
                    "{name} must lie in [0, {ELAPSED_WINDOW_SECS}), got {value}"
                )));
            }
        }

        if self.max_queue_slots == 0 {
            return Err(CafeError::Config("max_queue_slots must be at least 1".into()));
        }
        Ok(())
    }
}
