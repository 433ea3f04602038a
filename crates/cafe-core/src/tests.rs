//! Unit tests for cafe-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, NodeId, ObstacleId};

    #[test]
    fn index_roundtrip() {
        let id = AgentId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(AgentId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(NodeId::INVALID.0, u32::MAX);
        assert_eq!(ObstacleId::INVALID.0, u32::MAX);
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "AgentId(7)");
    }
}

#[cfg(test)]
mod geom {
    use crate::geom::{point_segment_distance, segments_intersect};
    use crate::{Axis, Polygon, Rect, Vec2};

    fn unit_square_at(x: f64, y: f64) -> Polygon {
        Polygon::from_rect(Rect::new(Vec2::new(x, y), Vec2::new(x + 1.0, y + 1.0)))
    }

    #[test]
    fn vector_basics() {
        let a = Vec2::new(3.0, 4.0);
        assert_eq!(a.length(), 5.0);
        assert_eq!(Vec2::ZERO.distance(a), 5.0);
        assert!((a.normalized().length() - 1.0).abs() < 1e-12);
        assert_eq!(Vec2::ZERO.normalized(), Vec2::ZERO);
    }

    #[test]
    fn step_toward_clamps_to_target() {
        let a = Vec2::ZERO;
        let b = Vec2::new(10.0, 0.0);
        assert_eq!(a.step_toward(b, 4.0), Vec2::new(4.0, 0.0));
        assert_eq!(a.step_toward(b, 40.0), b);
    }

    #[test]
    fn dominant_axis() {
        assert_eq!(Axis::dominant(Vec2::new(10.0, 2.0)), Axis::X);
        assert_eq!(Axis::dominant(Vec2::new(-1.0, -20.0)), Axis::Y);
    }

    #[test]
    fn rect_overlap_is_strict() {
        let a = Rect::new(Vec2::ZERO, Vec2::new(1.0, 1.0));
        let touching = Rect::new(Vec2::new(1.0, 0.0), Vec2::new(2.0, 1.0));
        let inside = Rect::new(Vec2::new(0.5, 0.5), Vec2::new(2.0, 2.0));
        assert!(!a.overlaps(&touching));
        assert!(a.overlaps(&inside));
    }

    #[test]
    fn polygon_contains_and_distance() {
        let sq = unit_square_at(0.0, 0.0);
        assert!(sq.contains_point(Vec2::new(0.5, 0.5)));
        assert!(sq.contains_point(Vec2::new(1.0, 0.5))); // boundary
        assert!(!sq.contains_point(Vec2::new(2.0, 0.5)));
        assert!((sq.distance_to_point(Vec2::new(3.0, 0.5)) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn polygon_rect_overlap_touching_edge_is_clear() {
        let sq = unit_square_at(2.0, 0.0);
        let left = Rect::new(Vec2::new(1.0, 0.0), Vec2::new(2.0, 1.0));
        let over = Rect::new(Vec2::new(1.5, 0.0), Vec2::new(2.5, 1.0));
        assert!(!sq.overlaps_rect(&left));
        assert!(sq.overlaps_rect(&over));
    }

    #[test]
    fn segment_distance_to_polygon() {
        let sq = unit_square_at(0.0, 0.0);
        // Horizontal line passing 1 unit above the square.
        let d = sq.distance_to_segment(Vec2::new(-5.0, 2.0), Vec2::new(5.0, 2.0));
        assert!((d - 1.0).abs() < 1e-9);
        // Line cutting straight through.
        assert_eq!(sq.distance_to_segment(Vec2::new(-5.0, 0.5), Vec2::new(5.0, 0.5)), 0.0);
    }

    #[test]
    fn segment_helpers() {
        assert!(segments_intersect(
            Vec2::new(0.0, 0.0),
            Vec2::new(2.0, 2.0),
            Vec2::new(0.0, 2.0),
            Vec2::new(2.0, 0.0),
        ));
        assert!(!segments_intersect(
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, 1.0),
        ));
        let d = point_segment_distance(Vec2::new(0.5, 3.0), Vec2::ZERO, Vec2::new(1.0, 0.0));
        assert!((d - 3.0).abs() < 1e-9);
    }
}

#[cfg(test)]
mod time {
    use crate::{Clock, ManualClock, Tick, TickClock};

    #[test]
    fn frozen_clock_ignores_ticks() {
        let mut clock = ManualClock::frozen(10.0);
        clock.advance(1.0);
        assert_eq!(clock.now(), 10.0);
        clock.skip(2.5);
        assert_eq!(clock.now(), 12.5);
    }

    #[test]
    fn ticking_clock_follows_driver() {
        let mut clock = ManualClock::ticking(0.0);
        clock.advance(0.5);
        clock.advance(0.5);
        assert_eq!(clock.now(), 1.0);
    }

    #[test]
    fn tick_clock_counts_frames() {
        let mut clock = TickClock::new(0.25);
        for _ in 0..8 {
            clock.advance(0.25);
        }
        assert_eq!(clock.tick, Tick(8));
        assert_eq!(clock.now(), 2.0);
    }
}

#[cfg(test)]
mod rng {
    use crate::{AgentId, AgentRng, SimRng};

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = AgentRng::new(12345, AgentId(3));
        let mut r2 = AgentRng::new(12345, AgentId(3));
        for _ in 0..50 {
            assert_eq!(r1.gen_range(0..1000u32), r2.gen_range(0..1000u32));
        }
    }

    #[test]
    fn choose_empty_is_none() {
        let mut rng = AgentRng::new(0, AgentId(0));
        let empty: [u8; 0] = [];
        assert!(rng.choose(&empty).is_none());
        assert_eq!(rng.choose(&[9]), Some(&9));
    }

    #[test]
    fn jitter_stays_in_bounds() {
        let mut rng = SimRng::new(7);
        for _ in 0..200 {
            let v = rng.jitter(5.0, 2.0);
            assert!((3.0..=7.0).contains(&v));
        }
        assert_eq!(rng.jitter(5.0, 0.0), 5.0);
    }
}

#[cfg(test)]
mod config {
    use crate::{BehaviorConfig, SimConfig};

    #[test]
    fn defaults_validate() {
        assert!(SimConfig::default().validate().is_ok());
        assert!(BehaviorConfig::default().validate().is_ok());
    }

    #[test]
    fn waits_must_fit_the_elapsed_window() {
        let cfg = BehaviorConfig { queue_wait_secs: 60.0, ..BehaviorConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn zero_tick_rejected() {
        let cfg = SimConfig { tick_secs: 0.0, ..SimConfig::default() };
        assert!(cfg.validate().is_err());
    }
}
