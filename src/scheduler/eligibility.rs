//! Eligibility filtering and relaxation ladders.
//!
//! Each duty unit is filled from the first ladder step that yields a
//! non-empty eligible set. Steps loosen three soft rules:
//!
//! | Role | Step | consecutive | overflow | multiple/day | warns |
//! |------|------|-------------|----------|--------------|-------|
//! | Regular | 1 | – | – | – | |
//! | Regular | 2 | – | – | ✓ | |
//! | Regular | 3 | – | ✓ | ✓ | |
//! | Regular | 4 | ✓ | ✓ | ✓ | ✓ |
//! | Reliever, Squad | 1 | – | – | ✓ | |
//! | Reliever, Squad | 2 | – | ✓ | ✓ | |
//! | Reliever, Squad | 3 | ✓ | ✓ | ✓ | ✓ |
//! | Buffer | 1 | – | ✓ | ✓ | |
//! | Buffer | 2 | ✓ | ✓ | ✓ | ✓ |
//!
//! The consecutive and once-per-day rules only constrain regular duty.
//! Target blocking and the once-per-day rule are lifted automatically when
//! no remaining candidate is below target, so they never empty the pool on
//! their own.

use std::collections::{HashMap, HashSet};

use super::counters::CounterTable;
use crate::models::DutyRole;

/// Which soft rules a ladder step lifts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Relaxation {
    /// Allow regular duty in a slot adjacent to another regular duty.
    pub allow_consecutive: bool,
    /// Allow faculty at or above target.
    pub allow_target_overflow: bool,
    /// Allow more than one regular duty per day.
    pub allow_multiple_per_day: bool,
}

/// One rung of a relaxation ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelaxationStep {
    pub relaxation: Relaxation,
    /// Filling a duty at this step is reported as a warning.
    pub warn_on_success: bool,
}

const fn step(consecutive: bool, overflow: bool, multiple: bool, warn: bool) -> RelaxationStep {
    RelaxationStep {
        relaxation: Relaxation {
            allow_consecutive: consecutive,
            allow_target_overflow: overflow,
            allow_multiple_per_day: multiple,
        },
        warn_on_success: warn,
    }
}

pub const REGULAR_LADDER: [RelaxationStep; 4] = [
    step(false, false, false, false),
    step(false, false, true, false),
    step(false, true, true, false),
    step(true, true, true, true),
];

pub const COVERAGE_LADDER: [RelaxationStep; 3] = [
    step(false, false, true, false),
    step(false, true, true, false),
    step(true, true, true, true),
];

pub const BUFFER_LADDER: [RelaxationStep; 2] = [
    step(false, true, true, false),
    step(true, true, true, true),
];

/// The ladder for a role.
pub fn ladder(role: DutyRole) -> &'static [RelaxationStep] {
    match role {
        DutyRole::Regular => &REGULAR_LADDER,
        DutyRole::Reliever | DutyRole::Squad => &COVERAGE_LADDER,
        DutyRole::Buffer => &BUFFER_LADDER,
    }
}

/// Regular duties already given, by (counter position, day).
#[derive(Debug, Clone, Default)]
pub struct RegularHistory {
    slots: HashMap<(usize, usize), Vec<usize>>,
}

impl RegularHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a regular duty.
    pub fn record(&mut self, idx: usize, day: usize, slot: usize) {
        self.slots.entry((idx, day)).or_default().push(slot);
    }

    /// Whether the faculty member has a regular duty in `slot ± 1` that day.
    pub fn has_adjacent(&self, idx: usize, day: usize, slot: usize) -> bool {
        self.slots
            .get(&(idx, day))
            .is_some_and(|taken| taken.iter().any(|&s| s.abs_diff(slot) == 1))
    }

    /// Regular duties held that day.
    pub fn count_on_day(&self, idx: usize, day: usize) -> usize {
        self.slots.get(&(idx, day)).map_or(0, Vec::len)
    }
}

/// The duty unit being filled.
#[derive(Debug, Clone, Copy)]
pub struct EligibilityQuery<'a> {
    pub day: usize,
    pub slot: usize,
    pub role: DutyRole,
    /// Counter positions of faculty available on the slot date.
    pub pool: &'a [usize],
    /// Counter positions already assigned in this slot.
    pub in_slot: &'a HashSet<usize>,
}

/// A successful ladder lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LadderMatch {
    /// Eligible counter positions, in pool order.
    pub candidates: Vec<usize>,
    /// One-based ladder step that produced them.
    pub pass: usize,
    pub step: RelaxationStep,
}

/// Eligible candidates under one relaxation level.
pub fn filter_eligible(
    table: &CounterTable,
    history: &RegularHistory,
    query: &EligibilityQuery<'_>,
    relaxation: Relaxation,
) -> Vec<usize> {
    let role = query.role;
    let remaining_pool = if role.has_target() {
        table.remaining_below_target(query.pool, query.in_slot, role)
    } else {
        0
    };

    query
        .pool
        .iter()
        .copied()
        .filter(|idx| !query.in_slot.contains(idx))
        .filter(|&idx| {
            let counter = table.get(idx);

            if role == DutyRole::Buffer && !counter.buffer_eligible {
                return false;
            }
            if !relaxation.allow_target_overflow
                && remaining_pool > 0
                && !counter.below_target(role)
            {
                return false;
            }
            if role == DutyRole::Regular {
                if !relaxation.allow_consecutive
                    && history.has_adjacent(idx, query.day, query.slot)
                {
                    return false;
                }
                if !relaxation.allow_multiple_per_day
                    && remaining_pool > 0
                    && history.count_on_day(idx, query.day) > 0
                {
                    return false;
                }
            }
            true
        })
        .collect()
}

/// Walks the role's ladder until a step yields candidates.
///
/// Returns `None` when every step is empty.
pub fn find_eligible(
    table: &CounterTable,
    history: &RegularHistory,
    query: &EligibilityQuery<'_>,
) -> Option<LadderMatch> {
    ladder(query.role)
        .iter()
        .enumerate()
        .find_map(|(i, step)| {
            let candidates = filter_eligible(table, history, query, step.relaxation);
            (!candidates.is_empty()).then(|| LadderMatch {
                candidates,
                pass: i + 1,
                step: *step,
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExamStructure, Faculty};

    fn table(roster: &[Faculty]) -> CounterTable {
        let exam = ExamStructure::new()
            .with_targets("Professor", 2, 1, 1)
            .with_targets("Assistant", 1, 0, 0)
            .with_buffer_eligibility("Assistant", true);
        CounterTable::new(roster, &exam)
    }

    fn roster() -> Vec<Faculty> {
        vec![
            Faculty::new("A", "Professor"),
            Faculty::new("B", "Professor"),
            Faculty::new("C", "Assistant"),
        ]
    }

    fn query<'a>(
        role: DutyRole,
        slot: usize,
        pool: &'a [usize],
        in_slot: &'a HashSet<usize>,
    ) -> EligibilityQuery<'a> {
        EligibilityQuery {
            day: 0,
            slot,
            role,
            pool,
            in_slot,
        }
    }

    #[test]
    fn test_ladder_shapes() {
        assert_eq!(ladder(DutyRole::Regular).len(), 4);
        assert_eq!(ladder(DutyRole::Squad).len(), 3);
        assert_eq!(ladder(DutyRole::Buffer).len(), 2);
        assert!(ladder(DutyRole::Regular)[3].warn_on_success);
        assert!(!ladder(DutyRole::Reliever)[1].warn_on_success);
        assert!(ladder(DutyRole::Reliever)[0].relaxation.allow_multiple_per_day);
        assert!(ladder(DutyRole::Buffer)[0].relaxation.allow_target_overflow);
    }

    #[test]
    fn test_excludes_already_in_slot() {
        let t = table(&roster());
        let h = RegularHistory::new();
        let pool = [0, 1, 2];
        let in_slot: HashSet<usize> = [0].into_iter().collect();

        let got = filter_eligible(&t, &h, &query(DutyRole::Regular, 0, &pool, &in_slot), Relaxation::default());
        assert_eq!(got, vec![1, 2]);
    }

    #[test]
    fn test_target_blocking_with_remaining_pool() {
        let mut t = table(&roster());
        t.record(0, DutyRole::Squad); // A met squad target
        let h = RegularHistory::new();
        let pool = [0, 1, 2];
        let in_slot = HashSet::new();
        let q = query(DutyRole::Squad, 0, &pool, &in_slot);

        // Only B is below squad target
        assert_eq!(filter_eligible(&t, &h, &q, Relaxation::default()), vec![1]);

        let overflow = Relaxation {
            allow_target_overflow: true,
            ..Relaxation::default()
        };
        assert_eq!(filter_eligible(&t, &h, &q, overflow), vec![0, 1, 2]);
    }

    #[test]
    fn test_overflow_implicit_when_everyone_at_target() {
        let mut t = table(&roster());
        t.record(0, DutyRole::Reliever);
        t.record(1, DutyRole::Reliever);
        let h = RegularHistory::new();
        let pool = [0, 1, 2];
        let in_slot = HashSet::new();

        // Nobody is below reliever target, so nothing is blocked
        let got = filter_eligible(&t, &h, &query(DutyRole::Reliever, 0, &pool, &in_slot), Relaxation::default());
        assert_eq!(got, vec![0, 1, 2]);
    }

    #[test]
    fn test_consecutive_regular_blocked() {
        let t = table(&roster());
        let mut h = RegularHistory::new();
        h.record(0, 0, 1);
        let pool = [0, 1];
        let in_slot = HashSet::new();
        let multiple = Relaxation {
            allow_multiple_per_day: true,
            ..Relaxation::default()
        };

        let next = filter_eligible(&t, &h, &query(DutyRole::Regular, 2, &pool, &in_slot), multiple);
        assert_eq!(next, vec![1]);

        // Two slots away is not adjacent
        let later = filter_eligible(&t, &h, &query(DutyRole::Regular, 3, &pool, &in_slot), multiple);
        assert_eq!(later, vec![0, 1]);

        // Coverage roles ignore the consecutive rule
        let squad = filter_eligible(&t, &h, &query(DutyRole::Squad, 2, &pool, &in_slot), multiple);
        assert_eq!(squad, vec![0, 1]);
    }

    #[test]
    fn test_one_regular_per_day() {
        let t = table(&roster());
        let mut h = RegularHistory::new();
        h.record(0, 0, 0);
        let pool = [0, 1];
        let in_slot = HashSet::new();
        let q = query(DutyRole::Regular, 3, &pool, &in_slot);

        assert_eq!(filter_eligible(&t, &h, &q, Relaxation::default()), vec![1]);
        assert!(h.has_adjacent(0, 0, 1));
        assert_eq!(h.count_on_day(0, 0), 1);
        assert_eq!(h.count_on_day(0, 1), 0);
    }

    #[test]
    fn test_second_regular_allowed_when_nobody_below_target() {
        let mut t = table(&roster());
        for idx in [0, 1] {
            t.record(idx, DutyRole::Regular);
            t.record(idx, DutyRole::Regular);
        }
        let mut h = RegularHistory::new();
        h.record(0, 0, 0);
        let pool = [0, 1];
        let in_slot = HashSet::new();

        // A and B are at target, so A's earlier duty today does not block it
        let q = query(DutyRole::Regular, 2, &pool, &in_slot);
        assert_eq!(filter_eligible(&t, &h, &q, Relaxation::default()), vec![0, 1]);
        assert_eq!(find_eligible(&t, &h, &q).map(|m| m.pass), Some(1));
    }

    #[test]
    fn test_buffer_requires_eligibility() {
        let t = table(&roster());
        let h = RegularHistory::new();
        let pool = [0, 1, 2];
        let in_slot = HashSet::new();

        let m = find_eligible(&t, &h, &query(DutyRole::Buffer, 0, &pool, &in_slot)).unwrap();
        assert_eq!(m.candidates, vec![2]);
        assert_eq!(m.pass, 1);
    }

    #[test]
    fn test_ladder_escalates_to_last_resort() {
        // A alone, already holding the adjacent regular duty
        let roster = vec![Faculty::new("A", "Professor")];
        let t = table(&roster);
        let mut h = RegularHistory::new();
        h.record(0, 0, 0);
        let pool = [0];
        let in_slot = HashSet::new();

        let m = find_eligible(&t, &h, &query(DutyRole::Regular, 1, &pool, &in_slot)).unwrap();
        assert_eq!(m.pass, 4);
        assert!(m.step.warn_on_success);
        assert_eq!(m.candidates, vec![0]);
    }

    #[test]
    fn test_ladder_exhausted() {
        let t = table(&roster());
        let h = RegularHistory::new();
        let pool = [0, 1];
        let in_slot = HashSet::new();
        // No buffer-eligible faculty in the pool
        assert!(find_eligible(&t, &h, &query(DutyRole::Buffer, 0, &pool, &in_slot)).is_none());
    }
}
