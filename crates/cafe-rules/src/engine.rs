//! Batch evaluation of rules.

use tracing::trace;

use crate::StateBag;

/// A named pure predicate over a [`StateBag`].
#[derive(Copy, Clone)]
pub struct Rule {
    pub name:      &'static str,
    pub predicate: fn(&StateBag) -> bool,
}

impl Rule {
    pub const fn new(name: &'static str, predicate: fn(&StateBag) -> bool) -> Self {
        Self { name, predicate }
    }

    #[inline]
    pub fn holds(&self, bag: &StateBag) -> bool {
        (self.predicate)(bag)
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Rule").field(&self.name).finish()
    }
}

/// Result of evaluating a batch.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RuleOutcome {
    Proceed,
    Fail,
}

impl RuleOutcome {
    #[inline]
    pub fn is_proceed(self) -> bool {
        self == RuleOutcome::Proceed
    }
}

/// Evaluates rule batches and remembers which rules held in the most recent
/// call, for diagnostics only.
///
/// The record is wiped at the start of every [`evaluate`](Self::evaluate);
/// nothing observed in one call can influence the next.
#[derive(Debug, Default)]
pub struct RuleEngine {
    satisfied: Vec<&'static str>,
    failed:    Vec<&'static str>,
}

impl RuleEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// `Proceed` iff every rule holds for `bag`.  An empty batch proceeds.
    ///
    /// All rules are evaluated (no short-circuit) so `failed()` lists every
    /// unmet condition.
    pub fn evaluate(&mut self, bag: &StateBag, rules: &[Rule]) -> RuleOutcome {
        self.satisfied.clear();
        self.failed.clear();

        for rule in rules {
            if rule.holds(bag) {
                self.satisfied.push(rule.name);
            } else {
                self.failed.push(rule.name);
            }
        }

        trace!(satisfied = ?self.satisfied, failed = ?self.failed, "rule batch evaluated");

        if self.failed.is_empty() {
            RuleOutcome::Proceed
        } else {
            RuleOutcome::Fail
        }
    }

    /// Rules that held during the last evaluation.
    pub fn satisfied(&self) -> &[&'static str] {
        &self.satisfied
    }

    /// Rules that did not hold during the last evaluation.
    pub fn failed(&self) -> &[&'static str] {
        &self.failed
    }
}
