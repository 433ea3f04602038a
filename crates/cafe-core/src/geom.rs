//! Planar floor-plan geometry.
//!
//! Floor coordinates are `f64` scene units (the café art uses roughly one
//! unit per pixel).  Obstacles are convex polygons; every predicate here is
//! written for the convex case and says so where it matters.

use std::ops::{Add, Mul, Neg, Sub};

/// Tolerance used by the overlap and containment predicates.
pub const EPSILON: f64 = 1e-9;

// ── Vec2 ──────────────────────────────────────────────────────────────────────

/// A point or direction on the floor plane.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn dot(self, other: Vec2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the 3-D cross product.
    #[inline]
    pub fn cross(self, other: Vec2) -> f64 {
        self.x * other.y - self.y * other.x
    }

    #[inline]
    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    #[inline]
    pub fn distance(self, other: Vec2) -> f64 {
        (other - self).length()
    }

    /// Unit vector in the same direction, or `ZERO` for a zero-length input.
    pub fn normalized(self) -> Vec2 {
        let len = self.length();
        if len <= EPSILON {
            Vec2::ZERO
        } else {
            self * (1.0 / len)
        }
    }

    /// Left-hand perpendicular.
    #[inline]
    pub fn perp(self) -> Vec2 {
        Vec2::new(-self.y, self.x)
    }

    #[inline]
    pub fn component(self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    /// Move from `self` toward `target` by at most `max_step`.
    pub fn step_toward(self, target: Vec2, max_step: f64) -> Vec2 {
        let delta = target - self;
        let len = delta.length();
        if len <= max_step || len <= EPSILON {
            target
        } else {
            self + delta * (max_step / len)
        }
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    #[inline]
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

impl std::fmt::Display for Vec2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

// ── Axis ──────────────────────────────────────────────────────────────────────

/// One of the two floor axes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// The axis along which `delta` has the larger magnitude.  Ties go to `X`.
    pub fn dominant(delta: Vec2) -> Axis {
        if delta.x.abs() >= delta.y.abs() {
            Axis::X
        } else {
            Axis::Y
        }
    }
}

// ── Rect ──────────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle.  `min` is always component-wise `<= max`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// Build from two opposite corners in any order.
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self {
            min: Vec2::new(a.x.min(b.x), a.y.min(b.y)),
            max: Vec2::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    pub fn from_center(center: Vec2, half_width: f64, half_height: f64) -> Self {
        Self::new(
            Vec2::new(center.x - half_width, center.y - half_height),
            Vec2::new(center.x + half_width, center.y + half_height),
        )
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Grow every side by `margin`.
    pub fn expanded(&self, margin: f64) -> Rect {
        Rect {
            min: Vec2::new(self.min.x - margin, self.min.y - margin),
            max: Vec2::new(self.max.x + margin, self.max.y + margin),
        }
    }

    /// Inclusive containment.
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.min.x - EPSILON
            && p.x <= self.max.x + EPSILON
            && p.y >= self.min.y - EPSILON
            && p.y <= self.max.y + EPSILON
    }

    /// `true` if `other` lies entirely inside `self` (edges may coincide).
    pub fn contains_rect(&self, other: &Rect) -> bool {
        self.contains_point(other.min) && self.contains_point(other.max)
    }

    /// Strict overlap: rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.min.x < other.max.x - EPSILON
            && other.min.x < self.max.x - EPSILON
            && self.min.y < other.max.y - EPSILON
            && other.min.y < self.max.y - EPSILON
    }

    /// Counter-clockwise corners starting at `min`.
    pub fn corners(&self) -> [Vec2; 4] {
        [
            self.min,
            Vec2::new(self.max.x, self.min.y),
            self.max,
            Vec2::new(self.min.x, self.max.y),
        ]
    }
}

// ── Polygon ───────────────────────────────────────────────────────────────────

/// A convex polygon given by its vertices in either winding order.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polygon {
    vertices: Vec<Vec2>,
}

impl Polygon {
    pub fn new(vertices: Vec<Vec2>) -> Self {
        Self { vertices }
    }

    pub fn from_rect(rect: Rect) -> Self {
        Self::new(rect.corners().to_vec())
    }

    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    /// Closed edge loop `(v[i], v[i+1])`, wrapping at the end.
    pub fn edges(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Tight axis-aligned bounds.  An empty polygon yields a zero rect.
    pub fn bounds(&self) -> Rect {
        let Some(&first) = self.vertices.first() else {
            return Rect::new(Vec2::ZERO, Vec2::ZERO);
        };
        let mut min = first;
        let mut max = first;
        for v in &self.vertices[1..] {
            min = Vec2::new(min.x.min(v.x), min.y.min(v.y));
            max = Vec2::new(max.x.max(v.x), max.y.max(v.y));
        }
        Rect { min, max }
    }

    pub fn centroid(&self) -> Vec2 {
        if self.vertices.is_empty() {
            return Vec2::ZERO;
        }
        let sum = self.vertices.iter().fold(Vec2::ZERO, |acc, &v| acc + v);
        sum * (1.0 / self.vertices.len() as f64)
    }

    /// Inclusive point-in-convex-polygon test.
    pub fn contains_point(&self, p: Vec2) -> bool {
        if self.vertices.len() < 3 {
            return false;
        }
        let mut has_pos = false;
        let mut has_neg = false;
        for (a, b) in self.edges() {
            let c = (b - a).cross(p - a);
            if c > EPSILON {
                has_pos = true;
            } else if c < -EPSILON {
                has_neg = true;
            }
            if has_pos && has_neg {
                return false;
            }
        }
        true
    }

    /// Distance from `p` to the polygon; `0.0` when `p` is inside.
    pub fn distance_to_point(&self, p: Vec2) -> f64 {
        if self.contains_point(p) {
            return 0.0;
        }
        self.edges()
            .map(|(a, b)| point_segment_distance(p, a, b))
            .fold(f64::INFINITY, f64::min)
    }

    /// Distance from segment `a → b` to the polygon; `0.0` when they touch.
    pub fn distance_to_segment(&self, a: Vec2, b: Vec2) -> f64 {
        if self.contains_point(a) || self.contains_point(b) {
            return 0.0;
        }
        self.edges()
            .map(|(c, d)| segment_distance(a, b, c, d))
            .fold(f64::INFINITY, f64::min)
    }

    /// Strict separating-axis overlap test against a rectangle.
    ///
    /// Shapes that only share an edge or a corner do not overlap.
    pub fn overlaps_rect(&self, rect: &Rect) -> bool {
        if self.vertices.is_empty() {
            return false;
        }
        let corners = rect.corners();
        let mut axes = vec![Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)];
        axes.extend(self.edges().map(|(a, b)| (b - a).perp()));

        for axis in axes {
            if axis.length() <= EPSILON {
                continue;
            }
            let (pmin, pmax) = project(&self.vertices, axis);
            let (rmin, rmax) = project(&corners, axis);
            if pmax <= rmin + EPSILON || rmax <= pmin + EPSILON {
                return false;
            }
        }
        true
    }

    pub fn translated(&self, offset: Vec2) -> Polygon {
        Polygon::new(self.vertices.iter().map(|&v| v + offset).collect())
    }
}

fn project(points: &[Vec2], axis: Vec2) -> (f64, f64) {
    points.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &p| {
        let d = p.dot(axis);
        (lo.min(d), hi.max(d))
    })
}

// ── Segment helpers ───────────────────────────────────────────────────────────

/// Shortest distance from `p` to segment `a → b`.
pub fn point_segment_distance(p: Vec2, a: Vec2, b: Vec2) -> f64 {
    let ab = b - a;
    let len2 = ab.dot(ab);
    if len2 <= EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len2).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Inclusive segment intersection, collinear overlaps included.
pub fn segments_intersect(a: Vec2, b: Vec2, c: Vec2, d: Vec2) -> bool {
    let d1 = orientation(c, d, a);
    let d2 = orientation(c, d, b);
    let d3 = orientation(a, b, c);
    let d4 = orientation(a, b, d);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    (d1 == 0.0 && on_segment(c, d, a))
        || (d2 == 0.0 && on_segment(c, d, b))
        || (d3 == 0.0 && on_segment(a, b, c))
        || (d4 == 0.0 && on_segment(a, b, d))
}

/// Shortest distance between segments `a → b` and `c → d`.
pub fn segment_distance(a: Vec2, b: Vec2, c: Vec2, d: Vec2) -> f64 {
    if segments_intersect(a, b, c, d) {
        return 0.0;
    }
    point_segment_distance(a, c, d)
        .min(point_segment_distance(b, c, d))
        .min(point_segment_distance(c, a, b))
        .min(point_segment_distance(d, a, b))
}

/// Signed area sign of the triangle `p q r`, snapped to zero near collinear.
fn orientation(p: Vec2, q: Vec2, r: Vec2) -> f64 {
    let v = (q - p).cross(r - p);
    if v.abs() <= EPSILON { 0.0 } else { v }
}

fn on_segment(p: Vec2, q: Vec2, r: Vec2) -> bool {
    r.x >= p.x.min(q.x) - EPSILON
        && r.x <= p.x.max(q.x) + EPSILON
        && r.y >= p.y.min(q.y) - EPSILON
        && r.y <= p.y.max(q.y) + EPSILON
}
