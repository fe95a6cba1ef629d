//! Per-faculty duty counters and targets.
//!
//! A fresh [`CounterTable`] is built for every allocation run and dropped
//! when it ends. Only the slot processor mutates it, immediately after a
//! selection.

use std::collections::{HashMap, HashSet};

use crate::models::{DutyRole, ExamStructure, Faculty};

/// Running duty tally for one faculty member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DutyCounter {
    pub faculty_id: String,
    pub designation: String,
    /// Designation may take buffer duty.
    pub buffer_eligible: bool,
    pub regular: u32,
    pub reliever: u32,
    pub squad: u32,
    /// Buffer duties taken; buffer has no target.
    pub buffer: u32,
    pub regular_target: u32,
    pub reliever_target: u32,
    pub squad_target: u32,
}

impl DutyCounter {
    /// Zeroed counter with targets looked up from the designation maps.
    pub fn for_faculty(faculty: &Faculty, exam: &ExamStructure) -> Self {
        let target = |role| exam.target(&faculty.designation, role).unwrap_or(0);
        Self {
            faculty_id: faculty.faculty_id.clone(),
            designation: faculty.designation.clone(),
            buffer_eligible: exam.is_buffer_eligible(&faculty.designation),
            regular: 0,
            reliever: 0,
            squad: 0,
            buffer: 0,
            regular_target: target(DutyRole::Regular),
            reliever_target: target(DutyRole::Reliever),
            squad_target: target(DutyRole::Squad),
        }
    }

    /// Duties taken in a role.
    pub fn count(&self, role: DutyRole) -> u32 {
        match role {
            DutyRole::Regular => self.regular,
            DutyRole::Reliever => self.reliever,
            DutyRole::Squad => self.squad,
            DutyRole::Buffer => self.buffer,
        }
    }

    /// Target for a role; `None` for buffer.
    pub fn target(&self, role: DutyRole) -> Option<u32> {
        match role {
            DutyRole::Regular => Some(self.regular_target),
            DutyRole::Reliever => Some(self.reliever_target),
            DutyRole::Squad => Some(self.squad_target),
            DutyRole::Buffer => None,
        }
    }

    /// `target - count`; negative once over target. Zero for buffer.
    pub fn deficit(&self, role: DutyRole) -> i64 {
        self.target(role)
            .map(|t| i64::from(t) - i64::from(self.count(role)))
            .unwrap_or(0)
    }

    /// Whether the count is still below target. Always `false` for buffer.
    pub fn below_target(&self, role: DutyRole) -> bool {
        self.target(role).is_some_and(|t| self.count(role) < t)
    }

    /// Regular + reliever + squad duties taken.
    pub fn target_based_total(&self) -> u32 {
        self.regular + self.reliever + self.squad
    }

    /// Records one more duty in a role.
    pub fn increment(&mut self, role: DutyRole) {
        match role {
            DutyRole::Regular => self.regular += 1,
            DutyRole::Reliever => self.reliever += 1,
            DutyRole::Squad => self.squad += 1,
            DutyRole::Buffer => self.buffer += 1,
        }
    }
}

/// All counters for a run, sorted by faculty ID.
#[derive(Debug, Clone, Default)]
pub struct CounterTable {
    counters: Vec<DutyCounter>,
    index: HashMap<String, usize>,
}

impl CounterTable {
    /// Builds zeroed counters for the roster, sorted by `faculty_id`.
    pub fn new(faculty: &[Faculty], exam: &ExamStructure) -> Self {
        let mut counters: Vec<DutyCounter> = faculty
            .iter()
            .map(|f| DutyCounter::for_faculty(f, exam))
            .collect();
        counters.sort_by(|a, b| a.faculty_id.cmp(&b.faculty_id));

        let index = counters
            .iter()
            .enumerate()
            .map(|(i, c)| (c.faculty_id.clone(), i))
            .collect();

        Self { counters, index }
    }

    /// Position of a faculty member in the table.
    pub fn position(&self, faculty_id: &str) -> Option<usize> {
        self.index.get(faculty_id).copied()
    }

    /// Counter at a position.
    ///
    /// # Panics
    /// Panics if `idx` is out of range.
    pub fn get(&self, idx: usize) -> &DutyCounter {
        &self.counters[idx]
    }

    /// Records a duty for the counter at `idx`.
    pub fn record(&mut self, idx: usize, role: DutyRole) {
        self.counters[idx].increment(role);
    }

    /// All counters.
    pub fn counters(&self) -> &[DutyCounter] {
        &self.counters
    }

    /// Number of candidates in `pool` (excluding `exclude`) still below target.
    pub fn remaining_below_target(
        &self,
        pool: &[usize],
        exclude: &HashSet<usize>,
        role: DutyRole,
    ) -> usize {
        pool.iter()
            .filter(|&&idx| !exclude.contains(&idx) && self.counters[idx].below_target(role))
            .count()
    }

    pub fn len(&self) -> usize {
        self.counters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exam() -> ExamStructure {
        ExamStructure::new()
            .with_targets("Professor", 2, 1, 1)
            .with_buffer_eligibility("Assistant", true)
    }

    #[test]
    fn test_counter_targets() {
        let c = DutyCounter::for_faculty(&Faculty::new("F1", "Professor"), &exam());
        assert_eq!(c.target(DutyRole::Regular), Some(2));
        assert_eq!(c.target(DutyRole::Buffer), None);
        assert_eq!(c.deficit(DutyRole::Reliever), 1);
        assert!(!c.buffer_eligible);
        assert_eq!(c.target_based_total(), 0);
    }

    #[test]
    fn test_unknown_designation_zero_targets() {
        let c = DutyCounter::for_faculty(&Faculty::new("F2", "Assistant"), &exam());
        assert_eq!(c.regular_target, 0);
        assert!(c.buffer_eligible);
        assert!(!c.below_target(DutyRole::Regular));
    }

    #[test]
    fn test_deficit_goes_negative() {
        let mut c = DutyCounter::for_faculty(&Faculty::new("F1", "Professor"), &exam());
        c.increment(DutyRole::Squad);
        c.increment(DutyRole::Squad);
        c.increment(DutyRole::Buffer);
        assert_eq!(c.deficit(DutyRole::Squad), -1);
        assert_eq!(c.target_based_total(), 2);
        assert_eq!(c.buffer, 1);
        assert_eq!(c.deficit(DutyRole::Buffer), 0);
    }

    #[test]
    fn test_table_sorted_by_id() {
        let roster = vec![
            Faculty::new("F3", "Professor"),
            Faculty::new("F1", "Assistant"),
            Faculty::new("F2", "Professor"),
        ];
        let table = CounterTable::new(&roster, &exam());

        let ids: Vec<&str> = table.counters().iter().map(|c| c.faculty_id.as_str()).collect();
        assert_eq!(ids, vec!["F1", "F2", "F3"]);
        assert_eq!(table.position("F2"), Some(1));
        assert_eq!(table.position("F9"), None);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_remaining_below_target() {
        let roster = vec![
            Faculty::new("F1", "Professor"),
            Faculty::new("F2", "Professor"),
            Faculty::new("F3", "Assistant"),
        ];
        let mut table = CounterTable::new(&roster, &exam());
        table.record(0, DutyRole::Reliever);

        let pool = vec![0, 1, 2];
        let none = HashSet::new();
        // F1 met its reliever target, F3 has none
        assert_eq!(table.remaining_below_target(&pool, &none, DutyRole::Reliever), 1);

        let exclude: HashSet<usize> = [1].into_iter().collect();
        assert_eq!(table.remaining_below_target(&pool, &exclude, DutyRole::Reliever), 0);
    }
}
