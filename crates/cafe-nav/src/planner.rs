//! `plot_path` and the obstacle filters callers feed it.

use tracing::debug;

use cafe_core::{NodeId, ObstacleId, Vec2, WaypointId};

use crate::error::{PathError, PathResult};
use crate::graph::NavigationGraph;
use crate::obstacle::ObstacleSet;
use crate::search::{DijkstraSearch, GraphSearch};

// ── Path ──────────────────────────────────────────────────────────────────────

/// A planned polyline plus the corridor radius the steering layer should keep
/// the agent within.  The points double as debug waypoints.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    points: Vec<Vec2>,
    radius: f64,
}

impl Path {
    pub fn new(points: Vec<Vec2>, radius: f64) -> Self {
        Self { points, radius }
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn end(&self) -> Option<Vec2> {
        self.points.last().copied()
    }

    /// Total polyline length.
    pub fn length(&self) -> f64 {
        self.points.windows(2).map(|w| w[0].distance(w[1])).sum()
    }

    /// Closest point on the polyline to `p`, with the index of the segment
    /// it lies on.  `None` for paths with fewer than two points.
    pub fn project(&self, p: Vec2) -> Option<(usize, Vec2)> {
        self.points
            .windows(2)
            .enumerate()
            .map(|(i, w)| (i, closest_on_segment(p, w[0], w[1])))
            .min_by(|(_, x), (_, y)| p.distance(*x).total_cmp(&p.distance(*y)))
    }

    /// The point `ahead` units further along the polyline from the
    /// projection of `p`, clamped to the last point.
    pub fn point_ahead(&self, p: Vec2, ahead: f64) -> Option<Vec2> {
        let (mut seg, mut at) = self.project(p)?;
        let mut remaining = ahead.max(0.0);
        while seg + 1 < self.points.len() {
            let next = self.points[seg + 1];
            let d = at.distance(next);
            if d >= remaining {
                return Some(at.step_toward(next, remaining));
            }
            remaining -= d;
            at = next;
            seg += 1;
        }
        self.end()
    }
}

fn closest_on_segment(p: Vec2, a: Vec2, b: Vec2) -> Vec2 {
    let ab = b - a;
    let len2 = ab.dot(ab);
    if len2 <= cafe_core::geom::EPSILON {
        return a;
    }
    let t = ((p - a).dot(ab) / len2).clamp(0.0, 1.0);
    a + ab * t
}

// ── Obstacle filters ──────────────────────────────────────────────────────────

/// Picks the obstacles a planning call may pass close to.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObstacleFilter {
    /// Obstacles within `radius` of either endpoint, plus everything the
    /// destination node owns.
    Corridor { radius: f64 },
    /// Obstacles sitting on the straight line between the endpoints.
    Pathway { width: f64 },
}

impl ObstacleFilter {
    pub fn ignore_set(
        &self,
        obstacles: &ObstacleSet,
        start: Vec2,
        end: Vec2,
        destination: Option<NodeId>,
    ) -> Vec<ObstacleId> {
        let mut ids = match *self {
            ObstacleFilter::Corridor { radius } => {
                let mut ids = obstacles.near_point(start, radius);
                ids.extend(obstacles.near_point(end, radius));
                if let Some(node) = destination {
                    ids.extend(obstacles.owned_by(node));
                }
                ids
            }
            ObstacleFilter::Pathway { width } => obstacles.along_segment(start, end, width * 0.5),
        };
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}

// ── plot_path ─────────────────────────────────────────────────────────────────

/// Plan from `start` to `end` with the default Dijkstra search.
///
/// The graph's waypoint set is the same on return as on entry, whatever the
/// outcome.
pub fn plot_path(
    start: Vec2,
    end: Vec2,
    ignore: &[ObstacleId],
    path_radius: f64,
    graph: &mut NavigationGraph,
) -> PathResult<Path> {
    plot_path_with(&DijkstraSearch, start, end, ignore, path_radius, graph)
}

pub fn plot_path_with<S: GraphSearch + ?Sized>(
    search: &S,
    start: Vec2,
    end: Vec2,
    ignore: &[ObstacleId],
    path_radius: f64,
    graph: &mut NavigationGraph,
) -> PathResult<Path> {
    let from = graph.insert_temporary(start, ignore);
    let to = graph.insert_temporary(end, ignore);

    let nodes = search.shortest(graph, from, to);
    let result = classify(graph, &nodes, start, end, path_radius);

    // End first: it is the tail slot, so the id space shrinks back cleanly.
    graph.remove_temporary(to);
    graph.remove_temporary(from);

    if let Err(e) = &result {
        debug!(%start, %end, error = %e, "path planning failed");
    }
    result
}

fn classify(
    graph: &NavigationGraph,
    nodes: &[WaypointId],
    start: Vec2,
    end: Vec2,
    radius: f64,
) -> PathResult<Path> {
    match nodes.len() {
        0 => Err(PathError::BadPathDestination { to: end }),
        1 => Err(PathError::NoPathFound { from: start, to: end }),
        _ => {
            let points = nodes.iter().filter_map(|&n| graph.position(n)).collect();
            Ok(Path::new(points, radius))
        }
    }
}
