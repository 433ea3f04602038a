//! Unit tests for cafe-rules.

use cafe_core::{Axis, Vec2};

use crate::rules::*;
use crate::{FactKey, Rule, RuleEngine, RuleOutcome, StateBag};

// ── Helpers ───────────────────────────────────────────────────────────────────

const FLAG_KEYS: [&str; 4] = ["a", "b", "c", "d"];

fn flag_a(bag: &StateBag) -> bool {
    bag.flag(FactKey::Named("a"))
}
fn flag_b(bag: &StateBag) -> bool {
    bag.flag(FactKey::Named("b"))
}
fn flag_c(bag: &StateBag) -> bool {
    bag.flag(FactKey::Named("c"))
}
fn flag_d(bag: &StateBag) -> bool {
    bag.flag(FactKey::Named("d"))
}

const FLAG_RULES: [Rule; 4] = [
    Rule::new("a", flag_a),
    Rule::new("b", flag_b),
    Rule::new("c", flag_c),
    Rule::new("d", flag_d),
];

fn arrival_bag(distance: f64) -> StateBag {
    StateBag::new()
        .with(FactKey::Position, Vec2::new(100.0 + distance, 200.0))
        .with(FactKey::Target, Vec2::new(100.0, 200.0))
        .with(FactKey::ArrivalRadius, 60.0)
}

// ── Engine ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod conjunction {
    use super::*;

    /// Every assignment of 2–4 flags: the batch proceeds iff all are true,
    /// and flipping any single true flag to false fails the batch.
    #[test]
    fn exhaustive_two_to_four_rules() {
        let mut engine = RuleEngine::new();
        for n in 2..=4usize {
            let rules = &FLAG_RULES[..n];
            for mask in 0u32..(1 << n) {
                let mut bag = StateBag::new();
                for (i, key) in FLAG_KEYS.iter().take(n).enumerate() {
                    bag.set(FactKey::Named(*key), mask & (1 << i) != 0);
                }
                let all = mask == (1 << n) - 1;
                let expected = if all { RuleOutcome::Proceed } else { RuleOutcome::Fail };
                assert_eq!(engine.evaluate(&bag, rules), expected, "n={n} mask={mask:b}");
                assert_eq!(engine.failed().len(), n - mask.count_ones() as usize);

                if all {
                    for (i, key) in FLAG_KEYS.iter().take(n).enumerate() {
                        let mut flipped = bag.clone();
                        flipped.set(FactKey::Named(*key), false);
                        assert_eq!(
                            engine.evaluate(&flipped, rules),
                            RuleOutcome::Fail,
                            "flipping rule {i} of {n} must fail the batch"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn empty_batch_proceeds() {
        let mut engine = RuleEngine::new();
        assert_eq!(engine.evaluate(&StateBag::new(), &[]), RuleOutcome::Proceed);
    }

    #[test]
    fn diagnostics_reset_between_calls() {
        let mut engine = RuleEngine::new();
        let failing = StateBag::new();
        engine.evaluate(&failing, &FLAG_RULES[..2]);
        assert_eq!(engine.failed(), &["a", "b"]);

        let passing = StateBag::new()
            .with(FactKey::Named("a"), true)
            .with(FactKey::Named("b"), true);
        assert!(engine.evaluate(&passing, &FLAG_RULES[..2]).is_proceed());
        assert!(engine.failed().is_empty());
        assert_eq!(engine.satisfied(), &["a", "b"]);
    }
}

// ── Named rules ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod named {
    use super::*;

    #[test]
    fn arrival_boundary_at_sixty() {
        assert!(ARRIVED_AT_DESTINATION.holds(&arrival_bag(59.0)));
        assert!(!ARRIVED_AT_DESTINATION.holds(&arrival_bag(61.0)));
        assert!(!ARRIVED_AT_DESTINATION.holds(&arrival_bag(60.0)));
    }

    #[test]
    fn arrival_without_target_fails() {
        let bag = StateBag::new()
            .with(FactKey::Position, Vec2::ZERO)
            .with(FactKey::ArrivalRadius, 60.0);
        assert!(!ARRIVED_AT_DESTINATION.holds(&bag));
    }

    #[test]
    fn enter_scene_uses_dominant_axis_only() {
        let bag = |pos: Vec2| {
            StateBag::new()
                .with(FactKey::Position, pos)
                .with(FactKey::EntryThreshold, Vec2::new(100.0, 0.0))
                .with(FactKey::EntryAxis, Axis::X)
                .with(FactKey::EntryTolerance, 5.0)
        };
        // Far off on Y, but within 5 units along X.
        assert!(ENTER_SCENE.holds(&bag(Vec2::new(97.0, 80.0))));
        assert!(!ENTER_SCENE.holds(&bag(Vec2::new(94.0, 0.0))));
    }

    #[test]
    fn time_elapsed_needs_a_timestamp() {
        let bag = StateBag::new()
            .with(FactKey::Now, 10.0)
            .with(FactKey::Threshold, 3.0);
        assert!(!TIME_HAS_ELAPSED.holds(&bag));
        assert!(TIME_HAS_ELAPSED.holds(&bag.clone().with(FactKey::Since, 5.0)));
        assert!(!TIME_HAS_ELAPSED.holds(&bag.with(FactKey::Since, 8.0)));
    }

    #[test]
    fn time_elapsed_wraps_at_sixty_seconds() {
        assert_eq!(elapsed_in_window(65.0, 0.0), 5.0);
        let bag = StateBag::new()
            .with(FactKey::Now, 62.0)
            .with(FactKey::Since, 0.0)
            .with(FactKey::Threshold, 3.0);
        assert!(!TIME_HAS_ELAPSED.holds(&bag));
    }

    #[test]
    fn queue_rules() {
        let head = StateBag::new().with(FactKey::QueueIndex, 0usize);
        let second = StateBag::new().with(FactKey::QueueIndex, 1usize);
        assert!(FIRST_IN_QUEUE.holds(&head));
        assert!(!FIRST_IN_QUEUE.holds(&second));
        assert!(!FIRST_IN_QUEUE.holds(&StateBag::new()));

        assert!(DESTINATION_HAS_QUEUE.holds(&StateBag::new().with(FactKey::QueueExists, true)));
        assert!(!DESTINATION_HAS_QUEUE.holds(&StateBag::new()));
    }

    #[test]
    fn pathway_requires_points() {
        assert!(PATHWAY_DISCOVERED.holds(&StateBag::new().with(FactKey::PathLength, 3usize)));
        assert!(!PATHWAY_DISCOVERED.holds(&StateBag::new().with(FactKey::PathLength, 0usize)));
    }

    #[test]
    fn stuck_after_grace() {
        let bag = StateBag::new()
            .with(FactKey::Now, 20.0)
            .with(FactKey::StuckGrace, 6.0);
        assert!(!STUCK_IN_CONTACT.holds(&bag));
        assert!(STUCK_IN_CONTACT.holds(&bag.clone().with(FactKey::ContactSince, 10.0)));
        assert!(!STUCK_IN_CONTACT.holds(&bag.with(FactKey::ContactSince, 16.0)));
    }

    #[test]
    fn exit_radius_is_independent_of_arrival_radius() {
        let bag = StateBag::new()
            .with(FactKey::Position, Vec2::new(40.0, 0.0))
            .with(FactKey::Target, Vec2::ZERO)
            .with(FactKey::ArrivalRadius, 60.0)
            .with(FactKey::ExitRadius, 30.0);
        assert!(ARRIVED_AT_DESTINATION.holds(&bag));
        assert!(!EXIT_REACHED.holds(&bag));
    }
}
