//! `FloorPlan`: a static, in-memory scene.
//!
//! Holds named nodes (entry points, counters, seats, exits), furniture and
//! the waypoints agents may walk between.  Hosts with a live scene graph
//! implement [`WorldQuery`] themselves; this one is what the demo and the
//! tests drive.

use cafe_behavior::{NodeRef, WorldQuery};
use cafe_core::{AgentId, CafeError, CafeResult, NodeId, ObstacleId, Polygon, Vec2};
use cafe_nav::{NavigationGraph, Obstacle};

/// Agents closer than this to a piece of furniture count as touching it.
pub const DEFAULT_CONTACT_RADIUS: f64 = 12.0;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FloorNode {
    pub id:        NodeId,
    pub path:      String,
    pub position:  Vec2,
    pub available: bool,
}

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FloorPlan {
    nodes:          Vec<FloorNode>,
    obstacles:      Vec<Obstacle>,
    waypoints:      Vec<Vec2>,
    contact_radius: f64,
}

impl Default for FloorPlan {
    fn default() -> Self {
        Self::new()
    }
}

impl FloorPlan {
    pub fn new() -> Self {
        Self {
            nodes:          Vec::new(),
            obstacles:      Vec::new(),
            waypoints:      Vec::new(),
            contact_radius: DEFAULT_CONTACT_RADIUS,
        }
    }

    pub fn with_contact_radius(mut self, radius: f64) -> Self {
        self.contact_radius = radius;
        self
    }

    // ── Building ──────────────────────────────────────────────────────────

    /// Register a node under `path` (e.g. `floor/seat`).  Nodes sharing a
    /// path are returned in insertion order.
    pub fn add_node(&mut self, path: &str, position: Vec2) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(FloorNode { id, path: path.to_owned(), position, available: true });
        id
    }

    /// Place a piece of furniture.  `owner` ties it to the node it serves
    /// (the chair of a seat, the till of a counter).
    pub fn add_obstacle(&mut self, shape: Polygon, buffer: f64, owner: Option<NodeId>) -> ObstacleId {
        let id = ObstacleId(self.obstacles.len() as u32);
        let obstacle = Obstacle::new(id, shape, buffer);
        self.obstacles.push(match owner {
            Some(node) => obstacle.owned_by(node),
            None => obstacle,
        });
        id
    }

    pub fn add_waypoint(&mut self, position: Vec2) {
        self.waypoints.push(position);
    }

    pub fn set_available(&mut self, node: NodeId, available: bool) -> CafeResult<()> {
        let entry = self.nodes.get_mut(node.index()).ok_or(CafeError::NodeNotFound(node))?;
        entry.available = available;
        Ok(())
    }

    /// Shift a piece of furniture.  The next planning call sees the new
    /// layout.
    pub fn move_obstacle(&mut self, id: ObstacleId, offset: Vec2) -> bool {
        match self.obstacles.iter_mut().find(|o| o.id == id) {
            Some(o) => {
                o.shape = o.shape.translated(offset);
                true
            }
            None => false,
        }
    }

    // ── Reading ───────────────────────────────────────────────────────────

    pub fn nodes(&self) -> &[FloorNode] {
        &self.nodes
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn waypoints(&self) -> &[Vec2] {
        &self.waypoints
    }

    /// Positions of every node under `path`, in insertion order.
    pub fn positions(&self, path: &str) -> Vec<Vec2> {
        self.nodes.iter().filter(|n| n.path == path).map(|n| n.position).collect()
    }

    fn node_ref(node: &FloorNode) -> NodeRef {
        NodeRef { id: node.id, position: node.position, path: node.path.clone() }
    }
}

impl WorldQuery for FloorPlan {
    fn find_nodes(&self, path: &str) -> Vec<NodeRef> {
        self.nodes.iter().filter(|n| n.path == path).map(Self::node_ref).collect()
    }

    fn node(&self, id: NodeId) -> Option<NodeRef> {
        self.nodes.get(id.index()).map(Self::node_ref)
    }

    fn is_available(&self, node: NodeId) -> bool {
        self.nodes.get(node.index()).is_some_and(|n| n.available)
    }

    fn obstacles_near(&self, node: NodeId) -> Option<Vec<Obstacle>> {
        self.nodes.get(node.index())?;
        Some(self.obstacles.iter().filter(|o| o.owner == Some(node)).cloned().collect())
    }

    /// A floor without waypoints is not walkable.
    fn navigation_graph(&self) -> Option<NavigationGraph> {
        if self.waypoints.is_empty() {
            return None;
        }
        let mut graph = NavigationGraph::with_waypoints(self.waypoints.iter().copied());
        graph.set_obstacles(self.obstacles.clone());
        Some(graph)
    }

    /// Only furniture is considered; agent-agent contact is left to the
    /// host's collision layer.
    fn in_contact(&self, _agent: AgentId, position: Vec2) -> bool {
        self.obstacles.iter().any(|o| o.shape.distance_to_point(position) < self.contact_radius)
    }
}
