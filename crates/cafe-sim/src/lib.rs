//! `cafe-sim`: world driver for the cafe_sim engine.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Clock      : advance by tick_secs.
//!   ② Completions: executor tasks that finished: resume the agent, reset
//!                   its queue arrival, or mark it for removal.
//!   ③ Arrivals   : the spawner may place one customer on the entry route.
//!   ④ Behavior   : MandateMachine::step for each agent in ascending id;
//!                   its Intents are applied before the next agent:
//!                     Relocate → stop, dispatch MoveTo, suspend
//!                     Remove   → mark for removal
//!   ⑤ Movement   : integrate goal sets; track contact for stuck detection.
//!   ⑥ Removal    : release queue slot / seat, then drop the agent.
//! ```
//!
//! # Reference collaborators
//!
//! | Type                 | Implements           | Notes                          |
//! |----------------------|----------------------|--------------------------------|
//! | [`FloorPlan`]        | `WorldQuery`         | static nodes, furniture, waypoints |
//! | [`TimedExecutor`]    | `MovementExecutor`   | sequences complete on a timer  |
//! | [`GoalSeekIntegrator`] | `MovementIntegrator` | Euler over the goal force    |
//!
//! # Cargo features
//!
//! | Feature   | Effect                                                   |
//! |-----------|----------------------------------------------------------|
//! | `fx-hash` | FxHash for queue registry, seat claims, velocity table.  |
//! | `serde`   | Serialize floor plans and configuration.                 |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use cafe_core::{BehaviorConfig, SimConfig};
//! use cafe_sim::{FloorPlan, NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::with_floor(SimConfig::default(), BehaviorConfig::default(), floor)
//!     .build()?;
//! sim.run(&mut NoopObserver);
//! ```

pub mod builder;
pub mod error;
pub mod executor;
pub mod floor;
pub mod integrator;
pub mod observer;
pub mod sim;
pub mod spawner;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use executor::TimedExecutor;
pub use floor::{DEFAULT_CONTACT_RADIUS, FloorNode, FloorPlan};
pub use integrator::GoalSeekIntegrator;
pub use observer::{DespawnReason, NoopObserver, SimObserver};
pub use sim::Sim;
pub use spawner::Spawner;
