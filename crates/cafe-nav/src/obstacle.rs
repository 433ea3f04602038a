//! Polygonal obstacles and their spatial index.
//!
//! Each obstacle is a convex polygon plus a buffer radius (the clearance an
//! agent needs around it) and, optionally, the floor node that owns it: a
//! counter's obstacles belong to the counter node, a seat's to the seat.
//!
//! The index is an R-tree over each obstacle's *buffered* bounding box.
//! Queries walk it nearest-first and stop as soon as the box distance exceeds
//! the query radius, then refine against the exact polygon.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use cafe_core::geom::EPSILON;
use cafe_core::{NodeId, ObstacleId, Polygon, Rect, Vec2};

// ── Obstacle ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Obstacle {
    pub id:     ObstacleId,
    pub owner:  Option<NodeId>,
    pub shape:  Polygon,
    pub buffer: f64,
}

impl Obstacle {
    pub fn new(id: ObstacleId, shape: Polygon, buffer: f64) -> Self {
        Self { id, owner: None, shape, buffer }
    }

    pub fn owned_by(mut self, node: NodeId) -> Self {
        self.owner = Some(node);
        self
    }

    /// Bounding box of the shape grown by the buffer.
    pub fn buffered_bounds(&self) -> Rect {
        self.shape.bounds().expanded(self.buffer)
    }

    /// Whether the segment `a → b` is blocked by this obstacle.
    ///
    /// A blocking obstacle stops any segment that passes within its buffer.
    /// An ignored obstacle loses its buffer: it only stops segments that cut
    /// through the bare shape, and never a segment starting or ending inside
    /// it (an agent standing at a table must be able to walk away from it).
    pub fn blocks_segment(&self, a: Vec2, b: Vec2, ignored: bool) -> bool {
        if !ignored {
            return self.shape.distance_to_segment(a, b) < self.buffer.max(EPSILON);
        }
        if self.shape.contains_point(a) || self.shape.contains_point(b) {
            return false;
        }
        self.shape.distance_to_segment(a, b) < EPSILON
    }

    /// Distance from `p` to the buffered shape; `0.0` inside the buffer.
    pub fn clearance(&self, p: Vec2) -> f64 {
        (self.shape.distance_to_point(p) - self.buffer).max(0.0)
    }
}

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Buffered bounds of one obstacle, keyed by its slot in `ObstacleSet::items`.
#[derive(Clone)]
struct BoundsEntry {
    min:  [f64; 2],
    max:  [f64; 2],
    slot: usize,
}

impl RTreeObject for BoundsEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.min, self.max)
    }
}

impl PointDistance for BoundsEntry {
    /// Squared distance from the query point to the box; zero inside.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = (self.min[0] - point[0]).max(0.0).max(point[0] - self.max[0]);
        let dy = (self.min[1] - point[1]).max(0.0).max(point[1] - self.max[1]);
        dx * dx + dy * dy
    }
}

// ── ObstacleSet ───────────────────────────────────────────────────────────────

/// Every obstacle on the floor, with a spatial index over buffered bounds.
pub struct ObstacleSet {
    items: Vec<Obstacle>,
    index: RTree<BoundsEntry>,
}

impl ObstacleSet {
    pub fn new() -> Self {
        Self { items: Vec::new(), index: RTree::new() }
    }

    /// Bulk-build from a list of obstacles.
    pub fn from_obstacles(items: Vec<Obstacle>) -> Self {
        let entries = items.iter().enumerate().map(|(slot, o)| entry(slot, o)).collect();
        Self { index: RTree::bulk_load(entries), items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ObstacleId) -> Option<&Obstacle> {
        self.items.iter().find(|o| o.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.items.iter()
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Obstacles whose buffered bounds come within `radius` of `p`, nearest
    /// first.  A coarse candidate set; callers refine against the polygon.
    fn candidates(&self, p: Vec2, radius: f64) -> impl Iterator<Item = &Obstacle> {
        let limit = radius.max(0.0).powi(2);
        self.index
            .nearest_neighbor_iter(&[p.x, p.y])
            .take_while(move |e| e.distance_2(&[p.x, p.y]) <= limit)
            .map(move |e| &self.items[e.slot])
    }

    /// Candidates for anything touching segment `a → b` grown by `margin`.
    fn segment_candidates(&self, a: Vec2, b: Vec2, margin: f64) -> impl Iterator<Item = &Obstacle> {
        let mid = (a + b) * 0.5;
        self.candidates(mid, a.distance(b) * 0.5 + margin)
    }

    /// Whether `a → b` is blocked by any obstacle, honoring `ignore`.
    pub fn segment_blocked(&self, a: Vec2, b: Vec2, ignore: &[ObstacleId]) -> bool {
        self.segment_candidates(a, b, EPSILON)
            .any(|o| o.blocks_segment(a, b, ignore.contains(&o.id)))
    }

    /// `true` when no obstacle outside `ignore` overlaps `cell` (strictly;
    /// sharing an edge is fine).
    pub fn cell_clear(&self, cell: &Rect, ignore: &[ObstacleId]) -> bool {
        let reach = cell.width().hypot(cell.height()) * 0.5;
        !self
            .candidates(cell.center(), reach)
            .any(|o| !ignore.contains(&o.id) && o.shape.overlaps_rect(cell))
    }

    /// Obstacles whose buffered shape lies within `radius` of `p`.
    pub fn near_point(&self, p: Vec2, radius: f64) -> Vec<ObstacleId> {
        self.candidates(p, radius)
            .filter(|o| o.clearance(p) <= radius)
            .map(|o| o.id)
            .collect()
    }

    /// Obstacles whose buffered shape comes within `half_width` of the
    /// straight segment `a → b`.
    pub fn along_segment(&self, a: Vec2, b: Vec2, half_width: f64) -> Vec<ObstacleId> {
        self.segment_candidates(a, b, half_width)
            .filter(|o| o.shape.distance_to_segment(a, b) - o.buffer <= half_width)
            .map(|o| o.id)
            .collect()
    }

    /// Obstacles owned by `node`.
    pub fn owned_by(&self, node: NodeId) -> Vec<ObstacleId> {
        self.items
            .iter()
            .filter(|o| o.owner == Some(node))
            .map(|o| o.id)
            .collect()
    }
}

impl Default for ObstacleSet {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ObstacleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObstacleSet").field("items", &self.items).finish()
    }
}

fn entry(slot: usize, obstacle: &Obstacle) -> BoundsEntry {
    let b = obstacle.buffered_bounds();
    BoundsEntry { min: [b.min.x, b.min.y], max: [b.max.x, b.max.y], slot }
}
