//! `cafe-queue`: waiting slots in front of counters.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`slots`]    | `Direction`, `SlotProbe`: where a queue's slots can go   |
//! | [`manager`]  | `QueueManagement`, `SlotPosition`, `MovementCommand`      |
//! | [`registry`] | `QueueRegistry`, `join_or_create`, `JoinOutcome`          |
//!
//! # Queue model (summary)
//!
//! ```text
//! slots    = [S0, S1, S2, ...]   fixed at creation, S0 next to the counter
//! waiting  = [A, B, C]           FIFO by join order; waiting[i] stands at S(i)
//! ```
//!
//! An agent's index is never stored on the agent: it is re-derived from
//! `waiting` every time it is needed, so a removal from the middle of the
//! line needs no bookkeeping beyond the `VecDeque` itself.
//!
//! # Feature flags
//!
//! | Flag      | Effect                                              |
//! |-----------|-----------------------------------------------------|
//! | `fx-hash` | `QueueRegistry` keys its map with `FxHashMap`.       |

pub mod manager;
pub mod registry;
pub mod slots;


pub use manager::{MovementCommand, QueueManagement, SlotPosition};
pub use registry::{JoinOutcome, QueueRegistry, join_or_create};
pub use slots::{Direction, SlotProbe};
