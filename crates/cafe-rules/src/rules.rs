//! Named rules used by the mandate handlers.
//!
//! Every threshold is read from the bag; the defaults live in
//! `BehaviorConfig`.  A rule whose inputs are missing does not hold.

use cafe_core::config::ELAPSED_WINDOW_SECS;

use crate::{FactKey, Rule, StateBag};

/// Agent has reached the entry threshold along the route's dominant axis.
///
/// Reads `Position`, `EntryThreshold`, `EntryAxis`, `EntryTolerance`.
pub const ENTER_SCENE: Rule = Rule::new("enter_scene", enter_scene);

/// A planned path exists and is non-empty.  Reads `PathLength`.
pub const PATHWAY_DISCOVERED: Rule = Rule::new("pathway_discovered", pathway_discovered);

/// Straight-line distance to `Target` is below `ArrivalRadius`.
pub const ARRIVED_AT_DESTINATION: Rule = Rule::new("arrived_at_destination", arrived_at_destination);

/// More than `Threshold` seconds have passed since `Since`.
pub const TIME_HAS_ELAPSED: Rule = Rule::new("time_has_elapsed", time_has_elapsed);

/// Agent is at index 0 of its queue.  Reads `QueueIndex`.
pub const FIRST_IN_QUEUE: Rule = Rule::new("first_in_queue", first_in_queue);

/// A queue already exists for the destination.  Reads `QueueExists`.
pub const DESTINATION_HAS_QUEUE: Rule = Rule::new("destination_has_queue", destination_has_queue);

/// The destination node resolves and is available.  Reads
/// `DestinationAvailable`.
pub const FIND_DESTINATION: Rule = Rule::new("find_destination", find_destination);

/// Physical contact has lasted longer than `StuckGrace`.
pub const STUCK_IN_CONTACT: Rule = Rule::new("stuck_in_contact", stuck_in_contact);

/// Agent is within `ExitRadius` of `Target`.
pub const EXIT_REACHED: Rule = Rule::new("exit_reached", exit_reached);

// ── Predicates ────────────────────────────────────────────────────────────────

fn enter_scene(bag: &StateBag) -> bool {
    let (Some(pos), Some(threshold), Some(axis), Some(tolerance)) = (
        bag.point(FactKey::Position),
        bag.point(FactKey::EntryThreshold),
        bag.axis(FactKey::EntryAxis),
        bag.number(FactKey::EntryTolerance),
    ) else {
        return false;
    };
    (pos.component(axis) - threshold.component(axis)).abs() < tolerance
}

fn pathway_discovered(bag: &StateBag) -> bool {
    bag.count(FactKey::PathLength).is_some_and(|n| n > 0)
}

fn arrived_at_destination(bag: &StateBag) -> bool {
    within(bag, FactKey::ArrivalRadius)
}

fn exit_reached(bag: &StateBag) -> bool {
    within(bag, FactKey::ExitRadius)
}

fn within(bag: &StateBag, radius_key: FactKey) -> bool {
    let (Some(pos), Some(target), Some(radius)) = (
        bag.point(FactKey::Position),
        bag.point(FactKey::Target),
        bag.number(radius_key),
    ) else {
        return false;
    };
    pos.distance(target) < radius
}

fn time_has_elapsed(bag: &StateBag) -> bool {
    let (Some(now), Some(since), Some(threshold)) = (
        bag.number(FactKey::Now),
        bag.number(FactKey::Since),
        bag.number(FactKey::Threshold),
    ) else {
        return false;
    };
    elapsed_in_window(now, since) > threshold
}

fn first_in_queue(bag: &StateBag) -> bool {
    bag.count(FactKey::QueueIndex) == Some(0)
}

fn destination_has_queue(bag: &StateBag) -> bool {
    bag.flag(FactKey::QueueExists)
}

fn find_destination(bag: &StateBag) -> bool {
    bag.flag(FactKey::DestinationAvailable)
}

fn stuck_in_contact(bag: &StateBag) -> bool {
    let (Some(now), Some(since), Some(grace)) = (
        bag.number(FactKey::Now),
        bag.number(FactKey::ContactSince),
        bag.number(FactKey::StuckGrace),
    ) else {
        return false;
    };
    elapsed_in_window(now, since) > grace
}

/// Seconds from `since` to `now`, wrapped into the 60 s window.
pub fn elapsed_in_window(now: f64, since: f64) -> f64 {
    (now - since).rem_euclid(ELAPSED_WINDOW_SECS)
}
