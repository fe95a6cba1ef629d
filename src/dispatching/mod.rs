//! Selection rules and rule engine for duty allocation.
//!
//! When several faculty members are eligible for a duty unit, a
//! [`RuleEngine`] ranks them with a chain of rules and picks the first.
//! Rules are applied in sequence; the next rule is consulted only on ties,
//! and the faculty ID breaks whatever remains, so selection is fully
//! deterministic.
//!
//! # Usage
//!
//! ```
//! use duty_allocator::dispatching::{RuleEngine, SelectionContext, TieBreaker};
//! use duty_allocator::dispatching::rules;
//! use duty_allocator::models::DutyRole;
//!
//! let engine = RuleEngine::new()
//!     .with_rule(rules::RoleDeficit)
//!     .with_rule(rules::LeastTargetLoad)
//!     .with_final_tie_breaker(TieBreaker::ById);
//!
//! let context = SelectionContext::for_role(DutyRole::Regular);
//! // let best = engine.select_best(&candidates, &context);
//! ```

mod context;
mod engine;
pub mod rules;

pub use context::SelectionContext;
pub use engine::{RuleEngine, TieBreaker};

use crate::scheduler::DutyCounter;
use std::fmt::Debug;

/// Score returned by a selection rule.
///
/// Lower scores = higher priority (selected first).
pub type RuleScore = f64;

/// A rule that scores one candidate for the duty being filled.
///
/// # Score Convention
/// **Lower score = higher priority.** Rules that prefer larger values
/// (e.g. a larger deficit) negate them.
pub trait DispatchingRule: Send + Sync + Debug {
    /// Rule name (e.g., "DEFICIT").
    fn name(&self) -> &'static str;

    /// Scores a candidate given the selection context.
    fn evaluate(&self, candidate: &DutyCounter, context: &SelectionContext<'_>) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
