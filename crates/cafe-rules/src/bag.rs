//! The short-lived fact bag rules are evaluated against.

use std::collections::HashMap;

use cafe_core::{Axis, Vec2};

/// Keys understood by the built-in rules.  `Named` lets callers add facts
/// for their own rules without touching this enum.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FactKey {
    /// Agent's current floor position.
    Position,
    /// Center of whatever the agent is heading for.
    Target,
    /// Last point of the entry route.
    EntryThreshold,
    /// Dominant axis of the entry route.
    EntryAxis,
    EntryTolerance,
    ArrivalRadius,
    ExitRadius,
    /// Current clock reading.
    Now,
    /// Timestamp the elapsed-time rule measures from.  Absent means "not
    /// started yet".
    Since,
    /// Seconds that must pass after `Since`.
    Threshold,
    /// First tick of the current physical contact, if any.
    ContactSince,
    StuckGrace,
    /// Agent's index in its queue's waiting list.
    QueueIndex,
    QueueExists,
    DestinationAvailable,
    /// Number of points in the planned path.
    PathLength,
    Named(&'static str),
}

/// A single typed fact value.
#[derive(Clone, Debug, PartialEq)]
pub enum Fact {
    Flag(bool),
    Number(f64),
    Count(usize),
    Point(Vec2),
    Axis(Axis),
}

impl From<bool> for Fact {
    fn from(v: bool) -> Self {
        Fact::Flag(v)
    }
}

impl From<f64> for Fact {
    fn from(v: f64) -> Self {
        Fact::Number(v)
    }
}

impl From<usize> for Fact {
    fn from(v: usize) -> Self {
        Fact::Count(v)
    }
}

impl From<Vec2> for Fact {
    fn from(v: Vec2) -> Self {
        Fact::Point(v)
    }
}

impl From<Axis> for Fact {
    fn from(v: Axis) -> Self {
        Fact::Axis(v)
    }
}

/// Key/value snapshot built fresh for every evaluation.
///
/// Typed getters return `None` for a missing key *or* a value of the wrong
/// type; rules treat both as "not satisfied".
#[derive(Clone, Debug, Default)]
pub struct StateBag {
    facts: HashMap<FactKey, Fact>,
}

impl StateBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: FactKey, value: impl Into<Fact>) -> Self {
        self.facts.insert(key, value.into());
        self
    }

    pub fn set(&mut self, key: FactKey, value: impl Into<Fact>) -> &mut Self {
        self.facts.insert(key, value.into());
        self
    }

    /// Insert only when `value` is `Some`; used for optional timestamps.
    pub fn with_opt(self, key: FactKey, value: Option<impl Into<Fact>>) -> Self {
        match value {
            Some(v) => self.with(key, v),
            None => self,
        }
    }

    pub fn get(&self, key: FactKey) -> Option<&Fact> {
        self.facts.get(&key)
    }

    pub fn contains(&self, key: FactKey) -> bool {
        self.facts.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    /// Missing flags read as `false`.
    pub fn flag(&self, key: FactKey) -> bool {
        matches!(self.facts.get(&key), Some(Fact::Flag(true)))
    }

    pub fn number(&self, key: FactKey) -> Option<f64> {
        match self.facts.get(&key) {
            Some(Fact::Number(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn count(&self, key: FactKey) -> Option<usize> {
        match self.facts.get(&key) {
            Some(Fact::Count(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn point(&self, key: FactKey) -> Option<Vec2> {
        match self.facts.get(&key) {
            Some(Fact::Point(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn axis(&self, key: FactKey) -> Option<Axis> {
        match self.facts.get(&key) {
            Some(Fact::Axis(v)) => Some(*v),
            _ => None,
        }
    }
}
