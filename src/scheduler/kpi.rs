//! Allocation quality metrics (KPIs).
//!
//! Computes coverage and fairness indicators from a finished allocation
//! and its inputs.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Needed / Assigned | Duty units required vs. filled, per role |
//! | Fill Rate | assigned / needed over all roles |
//! | Unfilled Units | Sum of max(0, needed - assigned) per role |
//! | Below / Over Target | Faculty short of or beyond their role target |
//! | Load Spread | max - min target-based load across the roster |

use crate::models::{AssignmentResult, DutyRole, ExamStructure, Faculty, RoleCounts};

/// Allocation performance indicators.
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationKpi {
    /// Duty units required, per role.
    pub needed: RoleCounts,
    /// Duty units filled, per role.
    pub assigned: RoleCounts,
    /// Fraction of required units filled (0.0..1.0).
    pub fill_rate: f64,
    /// Units left unfilled.
    pub unfilled_units: usize,
    /// Faculty whose count is below their role target (buffer always 0).
    pub below_target: RoleCounts,
    /// Faculty whose count exceeds their role target (buffer always 0).
    pub over_target: RoleCounts,
    /// Largest regular + reliever + squad load held by one faculty member.
    pub max_load: usize,
    /// Smallest regular + reliever + squad load held by one faculty member.
    pub min_load: usize,
}

impl AllocationKpi {
    /// Computes KPIs from a result and its inputs.
    ///
    /// # Arguments
    /// * `result` - The finished allocation.
    /// * `faculty` - The roster (for designation targets).
    /// * `exam` - The exam structure (for required duty counts).
    pub fn calculate(result: &AssignmentResult, faculty: &[Faculty], exam: &ExamStructure) -> Self {
        let mut needed = RoleCounts::default();
        for slot in &exam.duty_slots {
            for role in DutyRole::ALL {
                *needed.get_mut(role) += slot.required(role);
            }
        }

        let mut assigned = RoleCounts::default();
        for a in &result.assignments {
            *assigned.get_mut(a.role) += 1;
        }

        let unfilled_units = DutyRole::ALL
            .iter()
            .map(|&r| needed.get(r).saturating_sub(assigned.get(r)))
            .sum();

        let fill_rate = if needed.total() == 0 {
            1.0
        } else {
            (needed.total() - unfilled_units) as f64 / needed.total() as f64
        };

        let mut below_target = RoleCounts::default();
        let mut over_target = RoleCounts::default();
        let mut max_load = 0;
        let mut min_load = usize::MAX;

        for member in faculty {
            let counts = result
                .overview_for(&member.faculty_id)
                .map(|o| o.counts)
                .unwrap_or_default();

            for role in DutyRole::ALL.into_iter().filter(|r| r.has_target()) {
                let target = exam.target(&member.designation, role).unwrap_or(0) as usize;
                let count = counts.get(role);
                if count < target {
                    *below_target.get_mut(role) += 1;
                } else if count > target {
                    *over_target.get_mut(role) += 1;
                }
            }

            let load = counts.regular + counts.reliever + counts.squad;
            max_load = max_load.max(load);
            min_load = min_load.min(load);
        }

        if faculty.is_empty() {
            min_load = 0;
        }

        Self {
            needed,
            assigned,
            fill_rate,
            unfilled_units,
            below_target,
            over_target,
            max_load,
            min_load,
        }
    }

    /// Difference between the heaviest and lightest target-based load.
    pub fn load_spread(&self) -> usize {
        self.max_load - self.min_load
    }

    /// Whether the allocation meets the given quality thresholds.
    pub fn meets_thresholds(&self, min_fill_rate: f64, max_spread: usize) -> bool {
        self.fill_rate >= min_fill_rate && self.load_spread() <= max_spread
    }
}
