//! Path planning with a looser second attempt.
//!
//! | Attempt | Ignored obstacles                                            |
//! |---------|--------------------------------------------------------------|
//! | 1       | corridor around both endpoints + the destination's furniture |
//! | 2       | anything on the straight line between the endpoints          |
//!
//! Each attempt asks the world for a fresh graph, since furniture may have
//! moved.  When both fail the caller gets `Ok(None)` and sends the agent
//! wandering; `NoPathFound` and `BadPathDestination` are treated the same.

use tracing::debug;

use cafe_core::{BehaviorConfig, NodeId, Vec2};
use cafe_nav::{NavigationGraph, Obstacle, ObstacleFilter, Path, plot_path};

use crate::error::{BehaviorError, BehaviorResult};
use crate::world::WorldQuery;

/// A successful plan plus the obstacles it was planned against (fed to the
/// avoidance goal).
#[derive(Clone, Debug)]
pub struct PlannedRoute {
    pub path:      Path,
    pub obstacles: Vec<Obstacle>,
}

pub fn plan_with_fallback(
    world: &dyn WorldQuery,
    start: Vec2,
    end: Vec2,
    destination: Option<NodeId>,
    cfg: &BehaviorConfig,
) -> BehaviorResult<Option<PlannedRoute>> {
    let owned: Vec<_> = match destination {
        Some(node) => world
            .obstacles_near(node)
            .ok_or(BehaviorError::MissingObstacles(node))?
            .into_iter()
            .map(|o| o.id)
            .collect(),
        None => Vec::new(),
    };

    let corridor = ObstacleFilter::Corridor { radius: cfg.corridor_radius };
    let mut graph = fresh_graph(world)?;
    let mut ignore = corridor.ignore_set(graph.obstacles(), start, end, destination);
    ignore.extend(owned);
    ignore.sort_unstable();
    ignore.dedup();

    let first = match plot_path(start, end, &ignore, cfg.path_radius, &mut graph) {
        Ok(path) => return Ok(Some(route(path, &graph))),
        Err(e) => e,
    };

    let pathway = ObstacleFilter::Pathway { width: cfg.pathway_width };
    let mut graph = fresh_graph(world)?;
    let ignore = pathway.ignore_set(graph.obstacles(), start, end, destination);
    match plot_path(start, end, &ignore, cfg.path_radius, &mut graph) {
        Ok(path) => Ok(Some(route(path, &graph))),
        Err(second) => {
            debug!(%start, %end, first = %first, second = %second, "both planning attempts failed");
            Ok(None)
        }
    }
}

fn fresh_graph(world: &dyn WorldQuery) -> BehaviorResult<NavigationGraph> {
    world.navigation_graph().ok_or(BehaviorError::MissingNavigationGraph)
}

fn route(path: Path, graph: &NavigationGraph) -> PlannedRoute {
    PlannedRoute { path, obstacles: graph.obstacles().iter().cloned().collect() }
}
