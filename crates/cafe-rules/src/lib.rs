//! `cafe-rules`: the rule layer that gates mandate transitions.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                     |
//! |------------|--------------------------------------------------------------|
//! | [`bag`]    | `StateBag`, `FactKey`, `Fact`: per-call key/value snapshot  |
//! | [`engine`] | `Rule`, `RuleEngine`, `RuleOutcome`                          |
//! | [`rules`]  | The named rules used by the mandate handlers                 |
//!
//! # Design notes
//!
//! A rule is a `fn(&StateBag) -> bool`.  It cannot capture anything, so the
//! only way for a rule to learn about the world (queue membership, the
//! clock, thresholds) is through facts the caller wrote into the bag.  This
//! keeps every rule independently testable and makes batch evaluation order
//! irrelevant.
//!
//! A batch is a conjunctive gate: [`RuleOutcome::Proceed`] only when every
//! rule holds.

pub mod bag;
pub mod engine;
pub mod rules;

#[cfg(test)]
mod tests;

pub use bag::{Fact, FactKey, StateBag};
pub use engine::{Rule, RuleEngine, RuleOutcome};
