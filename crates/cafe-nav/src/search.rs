//! Shortest-path search over a [`NavigationGraph`].
//!
//! # Pluggability
//!
//! The planner calls search through the [`GraphSearch`] trait so a caller can
//! swap in A* or a precomputed table without touching `plot_path`.
//!
//! # Result shape
//!
//! Search returns a node list rather than a `Result`; the planner classifies
//! it by length:
//!
//! | Nodes | Meaning                                              |
//! |-------|------------------------------------------------------|
//! | 0     | `to` has no visible neighbour at all                 |
//! | 1     | `[from]`: endpoints coincide, or `to` is unreachable |
//! | ≥ 2   | full path `from ..= to`                              |
//!
//! # Cost units
//!
//! Edge costs are straight-line distances rounded to thousandths of a floor
//! unit (u64), which gives exact, deterministic heap ordering.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use cafe_core::WaypointId;

use crate::graph::NavigationGraph;

/// Two endpoints closer than this are treated as the same point.
pub const COINCIDENT_DISTANCE: f64 = 1e-6;

// ── GraphSearch trait ─────────────────────────────────────────────────────────

pub trait GraphSearch {
    /// Node list from `from` to `to`, classified as described in the module
    /// docs.
    fn shortest(&self, graph: &NavigationGraph, from: WaypointId, to: WaypointId) -> Vec<WaypointId>;
}

// ── DijkstraSearch ────────────────────────────────────────────────────────────

/// Plain Dijkstra over the implicit visibility edges.
#[derive(Copy, Clone, Debug, Default)]
pub struct DijkstraSearch;

impl GraphSearch for DijkstraSearch {
    fn shortest(&self, graph: &NavigationGraph, from: WaypointId, to: WaypointId) -> Vec<WaypointId> {
        let (Some(a), Some(b)) = (graph.position(from), graph.position(to)) else {
            return Vec::new();
        };
        if from == to || a.distance(b) < COINCIDENT_DISTANCE {
            return vec![from];
        }
        if graph.neighbors(to).is_empty() {
            return Vec::new();
        }
        dijkstra(graph, from, to)
    }
}

#[inline]
fn cost_milli(distance: f64) -> u64 {
    (distance * 1000.0).round() as u64
}

fn dijkstra(graph: &NavigationGraph, from: WaypointId, to: WaypointId) -> Vec<WaypointId> {
    let n = graph.id_bound();
    let mut dist = vec![u64::MAX; n];
    let mut prev = vec![WaypointId::INVALID; n];

    dist[from.index()] = 0;

    // Reverse turns the max-heap into a min-heap; the id breaks cost ties.
    let mut heap: BinaryHeap<Reverse<(u64, WaypointId)>> = BinaryHeap::new();
    heap.push(Reverse((0, from)));

    while let Some(Reverse((cost, node))) = heap.pop() {
        if node == to {
            return reconstruct(&prev, from, to);
        }
        if cost > dist[node.index()] {
            continue;
        }
        for (next, d) in graph.neighbors(node) {
            let new_cost = cost.saturating_add(cost_milli(d));
            if new_cost < dist[next.index()] {
                dist[next.index()] = new_cost;
                prev[next.index()] = node;
                heap.push(Reverse((new_cost, next)));
            }
        }
    }

    vec![from]
}

fn reconstruct(prev: &[WaypointId], from: WaypointId, to: WaypointId) -> Vec<WaypointId> {
    let mut nodes = vec![to];
    let mut cur = to;
    while cur != from {
        cur = prev[cur.index()];
        if cur == WaypointId::INVALID {
            break;
        }
        nodes.push(cur);
    }
    nodes.reverse();
    nodes
}
