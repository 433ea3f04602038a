//! The stock café floor used by the demo.
//!
//! ```text
//!   (0,0) ─────────────────────────────────────────── (800,0)
//!     │  entry ─►      till  [counter]                  │
//!     │                                                 │
//!     │           [table]         [table]     seat seat │
//!     │                                                 │
//!     │  exit                                 seat seat │
//!   (0,600) ───────────────────────────────────────── (800,600)
//! ```

use cafe_core::{NodeId, Polygon, Rect, Vec2};
use cafe_sim::FloorPlan;

fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Polygon {
    Polygon::from_rect(Rect::new(Vec2::new(x0, y0), Vec2::new(x1, y1)))
}

/// Build the floor.  Returns `(floor, counter, seats)`.
pub fn build_floor() -> (FloorPlan, NodeId, Vec<NodeId>) {
    let mut f = FloorPlan::new();

    f.add_node("floor/entry", Vec2::new(20.0, 80.0));
    f.add_node("floor/entry", Vec2::new(90.0, 80.0));

    let counter = f.add_node("floor/counter", Vec2::new(300.0, 80.0));
    f.add_obstacle(rect(270.0, 10.0, 330.0, 40.0), 5.0, Some(counter));

    let seats = [(620.0, 260.0), (720.0, 260.0), (620.0, 460.0), (720.0, 460.0)]
        .into_iter()
        .map(|(x, y)| {
            let seat = f.add_node("floor/seat", Vec2::new(x, y));
            f.add_obstacle(rect(x - 15.0, y + 15.0, x + 15.0, y + 35.0), 5.0, Some(seat));
            seat
        })
        .collect();

    f.add_node("floor/exit", Vec2::new(30.0, 540.0));

    // Free-standing tables.
    f.add_obstacle(rect(220.0, 260.0, 300.0, 320.0), 15.0, None);
    f.add_obstacle(rect(420.0, 260.0, 500.0, 320.0), 15.0, None);

    for p in [
        (0.0, 0.0), (800.0, 0.0), (0.0, 600.0), (800.0, 600.0),
        (360.0, 180.0), (360.0, 400.0), (180.0, 400.0), (560.0, 180.0),
    ] {
        f.add_waypoint(Vec2::new(p.0, p.1));
    }

    (f, counter, seats)
}
