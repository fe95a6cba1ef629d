//! Built-in selection rules.
//!
//! # Categories
//!
//! - **Quota**: DEFICIT
//! - **Load**: TARGET_LOAD, BUFFER_LOAD
//! - **Availability**: UNAVAILABLE
//!
//! # Score Convention
//! All rules return lower scores for higher priority candidates.

use super::{DispatchingRule, RuleScore, SelectionContext};
use crate::scheduler::DutyCounter;

// ======================== Quota rules ========================

/// Largest role deficit first.
///
/// Deficit is `target - count` for the role in the context. Faculty
/// furthest behind their quota are preferred. Always 0 for buffer.
#[derive(Debug, Clone, Copy)]
pub struct RoleDeficit;

impl DispatchingRule for RoleDeficit {
    fn name(&self) -> &'static str {
        "DEFICIT"
    }

    fn evaluate(&self, candidate: &DutyCounter, context: &SelectionContext<'_>) -> RuleScore {
        -(candidate.deficit(context.role) as f64)
    }

    fn description(&self) -> &'static str {
        "Largest Role Deficit"
    }
}

// ======================== Load rules ========================

/// Fewest regular + reliever + squad duties first.
#[derive(Debug, Clone, Copy)]
pub struct LeastTargetLoad;

impl DispatchingRule for LeastTargetLoad {
    fn name(&self) -> &'static str {
        "TARGET_LOAD"
    }

    fn evaluate(&self, candidate: &DutyCounter, _context: &SelectionContext<'_>) -> RuleScore {
        f64::from(candidate.target_based_total())
    }

    fn description(&self) -> &'static str {
        "Least Target-Based Load"
    }
}

/// Fewest buffer duties first. Rotates on-call duty evenly.
#[derive(Debug, Clone, Copy)]
pub struct LeastBufferLoad;

impl DispatchingRule for LeastBufferLoad {
    fn name(&self) -> &'static str {
        "BUFFER_LOAD"
    }

    fn evaluate(&self, candidate: &DutyCounter, _context: &SelectionContext<'_>) -> RuleScore {
        f64::from(candidate.buffer)
    }

    fn description(&self) -> &'static str {
        "Least Buffer Load"
    }
}

// ======================== Availability rules ========================

/// Most unavailable days first.
///
/// Faculty who are away often get priority on the days they are present,
/// so they can still reach their quota.
#[derive(Debug, Clone, Copy)]
pub struct MostUnavailable;

impl DispatchingRule for MostUnavailable {
    fn name(&self) -> &'static str {
        "UNAVAILABLE"
    }

    fn evaluate(&self, candidate: &DutyCounter, context: &SelectionContext<'_>) -> RuleScore {
        -(context.unavailable_days_of(&candidate.faculty_id) as f64)
    }

    fn description(&self) -> &'static str {
        "Most Unavailable Days"
    }
}
