//! `cafe-nav`: obstacles, navigation graph, and the path planner.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`obstacle`] | `Obstacle`, `ObstacleSet` (R-tree over buffered bounds)    |
//! | [`graph`]    | `NavigationGraph`: waypoints + obstacles, visibility edges |
//! | [`search`]   | `GraphSearch` trait, `DijkstraSearch`                      |
//! | [`planner`]  | `plot_path`, `Path`, `ObstacleFilter`                      |
//! | [`error`]    | `PathError`, `PathResult<T>`                               |
//!
//! # Planning model
//!
//! The floor plan changes while the café runs (furniture can be moved), so
//! no edge list is ever cached: two waypoints are connected whenever the
//! straight segment between them clears every blocking obstacle's buffer.
//! Callers rebuild the obstacle set before each planning call and the planner
//! leaves the waypoint set exactly as it found it.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `Obstacle` and `Path`.  |

pub mod error;
pub mod graph;
pub mod obstacle;
pub mod planner;
pub mod search;


pub use error::{PathError, PathResult};
pub use graph::NavigationGraph;
pub use obstacle::{Obstacle, ObstacleSet};
pub use planner::{ObstacleFilter, Path, plot_path, plot_path_with};
pub use search::{DijkstraSearch, GraphSearch};
