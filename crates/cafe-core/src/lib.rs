//! `cafe-core`: foundational types for the `cafe_sim` floor simulation.
//!
//! This crate is a dependency of every other `cafe-*` crate.  It has no
//! `cafe-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`ids`]      | `AgentId`, `NodeId`, `ObstacleId`, `WaypointId`, `TaskId` |
//! | [`geom`]     | `Vec2`, `Axis`, `Rect`, `Polygon`, segment helpers        |
//! | [`time`]     | `Clock` trait, `ManualClock`, `TickClock`, `WallClock`    |
//! | [`rng`]      | `AgentRng` (per-agent), `SimRng` (driver-level)           |
//! | [`config`]   | `SimConfig`, `BehaviorConfig`                             |
//! | [`error`]    | `CafeError`, `CafeResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids, geometry and config. |

pub mod config;
pub mod error;
pub mod geom;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{BehaviorConfig, SimConfig};
pub use error::{CafeError, CafeResult};
pub use geom::{Axis, Polygon, Rect, Vec2};
pub use ids::{AgentId, NodeId, ObstacleId, TaskId, WaypointId};
pub use rng::{AgentRng, SimRng};
pub use time::{Clock, ManualClock, Tick, TickClock, WallClock};
