//! Rule engine for multi-key candidate selection.
//!
//! Composes selection rules into a lexicographic ranking: the first rule
//! decides, later rules are consulted only on ties, and a final
//! tie-breaker settles the rest.

use std::cmp::Ordering;
use std::sync::Arc;

use super::{rules, DispatchingRule, RuleScore, SelectionContext};
use crate::models::DutyRole;
use crate::scheduler::DutyCounter;

/// How ties are broken after all rules are exhausted.
#[derive(Debug, Clone, Default)]
pub enum TieBreaker {
    /// Leave tied candidates in input order.
    #[default]
    InputOrder,
    /// Deterministic by faculty ID (lexicographic).
    ById,
}

/// A composable rule engine for candidate ranking.
///
/// # Example
/// ```
/// use duty_allocator::dispatching::{RuleEngine, rules};
///
/// let engine = RuleEngine::new()
///     .with_rule(rules::LeastBufferLoad)
///     .with_rule(rules::LeastTargetLoad);
/// ```
#[derive(Clone)]
pub struct RuleEngine {
    rules: Vec<Arc<dyn DispatchingRule>>,
    tie_breaker: TieBreaker,
    epsilon: f64,
}

impl RuleEngine {
    /// Creates an empty rule engine.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            tie_breaker: TieBreaker::InputOrder,
            epsilon: 1e-9,
        }
    }

    /// Ranking for target-bearing roles: deficit desc, unavailable days desc,
    /// target-based load asc, faculty ID asc.
    pub fn deficit_first() -> Self {
        Self::new()
            .with_rule(rules::RoleDeficit)
            .with_rule(rules::MostUnavailable)
            .with_rule(rules::LeastTargetLoad)
            .with_final_tie_breaker(TieBreaker::ById)
    }

    /// Ranking for buffer duty: buffer load asc, target-based load asc,
    /// unavailable days desc, faculty ID asc.
    pub fn buffer_rotation() -> Self {
        Self::new()
            .with_rule(rules::LeastBufferLoad)
            .with_rule(rules::LeastTargetLoad)
            .with_rule(rules::MostUnavailable)
            .with_final_tie_breaker(TieBreaker::ById)
    }

    /// The standard ranking for a role.
    pub fn for_role(role: DutyRole) -> Self {
        if role.has_target() {
            Self::deficit_first()
        } else {
            Self::buffer_rotation()
        }
    }

    /// Appends a rule.
    pub fn with_rule<R: DispatchingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Sets the final tie-breaking strategy.
    pub fn with_final_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// Sorts candidates by priority (highest priority first).
    ///
    /// Returns indices into the candidate slice.
    pub fn sort_indices(
        &self,
        candidates: &[&DutyCounter],
        context: &SelectionContext<'_>,
    ) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..candidates.len()).collect();
        indices.sort_by(|&a, &b| self.compare(candidates[a], candidates[b], context));
        indices
    }

    /// Returns the index of the highest-priority candidate.
    pub fn select_best(
        &self,
        candidates: &[&DutyCounter],
        context: &SelectionContext<'_>,
    ) -> Option<usize> {
        self.sort_indices(candidates, context).first().copied()
    }

    /// Evaluates a single candidate and returns scores from each rule.
    pub fn evaluate(&self, candidate: &DutyCounter, context: &SelectionContext<'_>) -> Vec<RuleScore> {
        self.rules
            .iter()
            .map(|rule| rule.evaluate(candidate, context))
            .collect()
    }

    fn compare(&self, a: &DutyCounter, b: &DutyCounter, context: &SelectionContext<'_>) -> Ordering {
        for rule in &self.rules {
            let score_a = rule.evaluate(a, context);
            let score_b = rule.evaluate(b, context);

            if (score_a - score_b).abs() > self.epsilon {
                return score_a.partial_cmp(&score_b).unwrap_or(Ordering::Equal);
            }
        }

        match &self.tie_breaker {
            TieBreaker::InputOrder => Ordering::Equal,
            TieBreaker::ById => a.faculty_id.cmp(&b.faculty_id),
        }
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field(
                "rules",
                &self.rules.iter().map(|r| r.name()).collect::<Vec<_>>(),
            )
            .field("tie_breaker", &self.tie_breaker)
            .finish()
    }
}
