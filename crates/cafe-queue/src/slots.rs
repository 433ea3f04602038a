//! Slot probing.
//!
//! A queue lines up along one of the four cardinal directions from its
//! destination.  For each direction the probe lays square cells of side `s`
//! end to end, cell `i` covering `[i·s, (i+1)·s]` along the direction and
//! `s` wide across it, centred on the destination.  Cells are accepted until
//! one overlaps an obstacle, leaves the floor, or the per-direction cap is
//! hit.  The longest run wins; on a tie the earlier direction in
//! [`Direction::PROBE_ORDER`] is kept.

use cafe_core::{ObstacleId, Rect, Vec2};
use cafe_nav::ObstacleSet;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Right,
    Left,
    Up,
    Down,
}

impl Direction {
    pub const PROBE_ORDER: [Direction; 4] =
        [Direction::Right, Direction::Left, Direction::Up, Direction::Down];

    /// Unit vector.  `Up` is -Y (screen coordinates).
    pub fn unit(self) -> Vec2 {
        match self {
            Direction::Right => Vec2::new(1.0, 0.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Down => Vec2::new(0.0, 1.0),
        }
    }
}

/// Everything the probe needs to judge a cell.
#[derive(Clone, Copy, Debug)]
pub struct SlotProbe<'a> {
    pub obstacles: &'a ObstacleSet,
    pub ignore:    &'a [ObstacleId],
    pub slot_size: f64,
    pub max_slots: usize,
    pub bounds:    Option<Rect>,
}

impl<'a> SlotProbe<'a> {
    pub fn new(obstacles: &'a ObstacleSet, slot_size: f64, max_slots: usize) -> Self {
        Self { obstacles, ignore: &[], slot_size, max_slots, bounds: None }
    }

    pub fn ignoring(mut self, ignore: &'a [ObstacleId]) -> Self {
        self.ignore = ignore;
        self
    }

    pub fn within(mut self, bounds: Option<Rect>) -> Self {
        self.bounds = bounds;
        self
    }

    /// Cell `i` in direction `dir` from `center`.
    pub fn cell(&self, center: Vec2, dir: Direction, i: usize) -> Rect {
        let s = self.slot_size;
        let u = dir.unit();
        let side = u.perp() * (s * 0.5);
        let near = center + u * (i as f64 * s);
        let far = center + u * ((i + 1) as f64 * s);
        Rect::new(near + side, far - side)
    }

    fn accepts(&self, cell: &Rect) -> bool {
        if let Some(bounds) = &self.bounds {
            if !bounds.contains_rect(cell) {
                return false;
            }
        }
        self.obstacles.cell_clear(cell, self.ignore)
    }

    /// Slot centres for one direction, nearest first.
    pub fn run(&self, center: Vec2, dir: Direction) -> Vec<Vec2> {
        (0..self.max_slots)
            .map(|i| self.cell(center, dir, i))
            .take_while(|cell| self.accepts(cell))
            .map(|cell| cell.center())
            .collect()
    }

    /// The longest run over all four directions.  Empty when every direction
    /// is blocked right at the destination.
    pub fn probe(&self, center: Vec2) -> (Option<Direction>, Vec<Vec2>) {
        let mut best: (Option<Direction>, Vec<Vec2>) = (None, Vec::new());
        for dir in Direction::PROBE_ORDER {
            let run = self.run(center, dir);
            if run.len() > best.1.len() {
                best = (Some(dir), run);
            }
        }
        best
    }
}
