//! Visibility graph over floor waypoints.
//!
//! Edges are implicit: [`NavigationGraph::neighbors`] tests the straight
//! segment to every other live waypoint against the obstacle set.  This keeps
//! the graph valid after `set_obstacles` without any rebuild step.
//!
//! Temporary waypoints (the start and end of a planning call) may carry a
//! list of obstacles whose buffers they ignore when connecting.  They are
//! removed again by the planner before it returns.

use cafe_core::{ObstacleId, Vec2, WaypointId};

use crate::obstacle::{Obstacle, ObstacleSet};

#[derive(Clone, Debug)]
struct Waypoint {
    position:  Vec2,
    temporary: bool,
    ignore:    Vec<ObstacleId>,
}

/// Waypoints plus the obstacles that decide which of them see each other.
#[derive(Debug, Default)]
pub struct NavigationGraph {
    nodes:     Vec<Option<Waypoint>>,
    obstacles: ObstacleSet,
    live:      usize,
}

impl NavigationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_waypoints(points: impl IntoIterator<Item = Vec2>) -> Self {
        let mut graph = Self::new();
        for p in points {
            graph.add_waypoint(p);
        }
        graph
    }

    pub fn add_waypoint(&mut self, position: Vec2) -> WaypointId {
        self.push(Waypoint { position, temporary: false, ignore: Vec::new() })
    }

    /// Number of live waypoints, temporary ones included.
    pub fn node_count(&self) -> usize {
        self.live
    }

    /// Upper bound on `WaypointId::index()` for the current graph.
    pub fn id_bound(&self) -> usize {
        self.nodes.len()
    }

    pub fn position(&self, id: WaypointId) -> Option<Vec2> {
        self.waypoint(id).map(|w| w.position)
    }

    pub fn waypoint_ids(&self) -> impl Iterator<Item = WaypointId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.is_some())
            .map(|(i, _)| WaypointId(i as u32))
    }

    // ── Obstacles ─────────────────────────────────────────────────────────

    pub fn obstacles(&self) -> &ObstacleSet {
        &self.obstacles
    }

    /// Drop every obstacle and replace them with `obstacles`.
    pub fn set_obstacles(&mut self, obstacles: Vec<Obstacle>) {
        self.obstacles = ObstacleSet::from_obstacles(obstacles);
    }

    // ── Temporary nodes ───────────────────────────────────────────────────

    pub fn insert_temporary(&mut self, position: Vec2, ignore: &[ObstacleId]) -> WaypointId {
        self.push(Waypoint { position, temporary: true, ignore: ignore.to_vec() })
    }

    /// Remove a node added with [`insert_temporary`](Self::insert_temporary).
    /// Permanent waypoints are left untouched; returns whether a node went.
    pub fn remove_temporary(&mut self, id: WaypointId) -> bool {
        let Some(slot) = self.nodes.get_mut(id.index()) else {
            return false;
        };
        if !slot.as_ref().is_some_and(|w| w.temporary) {
            return false;
        }
        *slot = None;
        self.live -= 1;
        while matches!(self.nodes.last(), Some(None)) {
            self.nodes.pop();
        }
        true
    }

    // ── Visibility ────────────────────────────────────────────────────────

    /// Whether the straight segment between two live waypoints is clear.
    pub fn visible(&self, a: WaypointId, b: WaypointId) -> bool {
        let (Some(wa), Some(wb)) = (self.waypoint(a), self.waypoint(b)) else {
            return false;
        };
        let ignore: Vec<ObstacleId> = wa.ignore.iter().chain(&wb.ignore).copied().collect();
        !self.obstacles.segment_blocked(wa.position, wb.position, &ignore)
    }

    /// Every waypoint visible from `id`, with the straight-line distance.
    pub fn neighbors(&self, id: WaypointId) -> Vec<(WaypointId, f64)> {
        let Some(from) = self.position(id) else {
            return Vec::new();
        };
        self.waypoint_ids()
            .filter(|&other| other != id && self.visible(id, other))
            .filter_map(|other| self.position(other).map(|p| (other, from.distance(p))))
            .collect()
    }

    fn waypoint(&self, id: WaypointId) -> Option<&Waypoint> {
        self.nodes.get(id.index()).and_then(Option::as_ref)
    }

    fn push(&mut self, waypoint: Waypoint) -> WaypointId {
        let id = WaypointId(self.nodes.len() as u32);
        self.nodes.push(Some(waypoint));
        self.live += 1;
        id
    }
}
