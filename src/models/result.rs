//! Allocation result model.
//!
//! The result of one allocation run: the assignments that could be made,
//! structured records of what could not, advisory warnings, and a
//! per-faculty duty overview.
//!
//! Violations and warnings carry explicit `day`/`slot`/`role`/`faculty_id`
//! fields so consumers never need to parse the human-readable message.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Assignment, DutyRole};

/// One count per duty role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleCounts {
    pub regular: usize,
    pub reliever: usize,
    pub squad: usize,
    pub buffer: usize,
}

impl RoleCounts {
    /// Count for a role.
    pub fn get(&self, role: DutyRole) -> usize {
        match role {
            DutyRole::Regular => self.regular,
            DutyRole::Reliever => self.reliever,
            DutyRole::Squad => self.squad,
            DutyRole::Buffer => self.buffer,
        }
    }

    /// Mutable count for a role.
    pub fn get_mut(&mut self, role: DutyRole) -> &mut usize {
        match role {
            DutyRole::Regular => &mut self.regular,
            DutyRole::Reliever => &mut self.reliever,
            DutyRole::Squad => &mut self.squad,
            DutyRole::Buffer => &mut self.buffer,
        }
    }

    /// Sum over all roles.
    pub fn total(&self) -> usize {
        self.regular + self.reliever + self.squad + self.buffer
    }
}

/// A duty unit that could not be filled, or a slot that could not be processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    /// Unique identifier within a run.
    pub id: String,
    /// Category.
    pub kind: ViolationKind,
    /// Human-readable description.
    pub message: String,
    /// Day index.
    pub day: usize,
    /// Slot index.
    pub slot: usize,
    /// Affected role, if the violation concerns one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<DutyRole>,
}

/// Classification of violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViolationKind {
    /// Room count differs from the regular duty count; slot skipped.
    RoomMismatch,
    /// No eligible faculty even after full relaxation.
    NoEligible,
}

impl Violation {
    /// Creates a room mismatch violation.
    pub fn room_mismatch(day: usize, slot: usize, message: impl Into<String>) -> Self {
        Self {
            id: format!("ROOM_MISMATCH-d{day}-s{slot}"),
            kind: ViolationKind::RoomMismatch,
            message: message.into(),
            day,
            slot,
            role: None,
        }
    }

    /// Creates a no-eligible-faculty violation for one duty unit.
    pub fn no_eligible(
        day: usize,
        slot: usize,
        role: DutyRole,
        unit: usize,
        message: impl Into<String>,
    ) -> Self {
        let code = no_eligible_code(role);
        Self {
            id: format!("{code}-d{day}-s{slot}-u{unit}"),
            kind: ViolationKind::NoEligible,
            message: message.into(),
            day,
            slot,
            role: Some(role),
        }
    }

    /// Violation code, e.g. `ROOM_MISMATCH` or `NO_ELIGIBLE_SQUAD`.
    pub fn code(&self) -> String {
        match (self.kind, self.role) {
            (ViolationKind::RoomMismatch, _) => "ROOM_MISMATCH".to_string(),
            (ViolationKind::NoEligible, Some(role)) => no_eligible_code(role),
            (ViolationKind::NoEligible, None) => "NO_ELIGIBLE".to_string(),
        }
    }
}

fn no_eligible_code(role: DutyRole) -> String {
    format!("NO_ELIGIBLE_{}", role.as_str().to_uppercase())
}

/// An advisory finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Warning {
    /// Category.
    pub kind: WarningKind,
    /// Human-readable description.
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<DutyRole>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faculty_id: Option<String>,
}

/// Classification of warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WarningKind {
    /// A duty was only filled by the last-resort relaxation pass.
    RelaxedConstraint,
    /// Post-verification found an assignment on an unavailable date.
    UnavailabilityBreach,
    /// Post-verification found regular duties in adjacent slots.
    ConsecutiveRegular,
    /// A roster designation has no regular target configured.
    UnknownDesignation,
}

impl Warning {
    /// Creates a warning with no location.
    pub fn new(kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            day: None,
            slot: None,
            role: None,
            faculty_id: None,
        }
    }

    /// Sets the slot coordinate.
    pub fn at(mut self, day: usize, slot: usize) -> Self {
        self.day = Some(day);
        self.slot = Some(slot);
        self
    }

    /// Sets the role.
    pub fn for_role(mut self, role: DutyRole) -> Self {
        self.role = Some(role);
        self
    }

    /// Sets the faculty member.
    pub fn for_faculty(mut self, faculty_id: impl Into<String>) -> Self {
        self.faculty_id = Some(faculty_id.into());
        self
    }

    /// Whether this signals an allocator defect rather than a soft issue.
    pub fn is_critical(&self) -> bool {
        self.kind == WarningKind::UnavailabilityBreach
    }
}

/// A slot whose duties were not all filled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncompleteSlot {
    pub day: usize,
    pub slot: usize,
    /// Required duties per role.
    pub needed: RoleCounts,
    /// Filled duties per role.
    pub assigned: RoleCounts,
}

impl IncompleteSlot {
    /// Unfilled units summed over roles.
    pub fn shortfall(&self) -> usize {
        DutyRole::ALL
            .iter()
            .map(|&r| self.needed.get(r).saturating_sub(self.assigned.get(r)))
            .sum()
    }
}

/// Per-faculty duty summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacultyDutyOverview {
    pub faculty_id: String,
    pub name: String,
    pub designation: String,
    pub counts: RoleCounts,
    pub total: usize,
    /// Reliever/squad room chunks keyed by `d{day}-s{slot}`.
    pub coverage: BTreeMap<String, Vec<String>>,
}

/// Output of an allocation run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentResult {
    /// `false` only when allocation was refused before it started.
    pub success: bool,
    pub assignments: Vec<Assignment>,
    /// Fatal, pre-allocation errors.
    pub errors: Vec<String>,
    pub warnings: Vec<Warning>,
    pub violations: Vec<Violation>,
    pub incomplete_slots: Vec<IncompleteSlot>,
    pub duty_overview: Vec<FacultyDutyOverview>,
}

impl AssignmentResult {
    /// A failed result carrying only errors.
    pub fn failure(errors: Vec<String>) -> Self {
        Self {
            success: false,
            errors,
            ..Default::default()
        }
    }

    /// Assignments in one slot.
    pub fn assignments_for_slot(&self, day: usize, slot: usize) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.day == day && a.slot == slot)
            .collect()
    }

    /// Assignments held by one faculty member.
    pub fn assignments_for_faculty(&self, faculty_id: &str) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.faculty_id == faculty_id)
            .collect()
    }

    /// Violations with the given code (e.g. `NO_ELIGIBLE_REGULAR`).
    pub fn violations_of(&self, code: &str) -> Vec<&Violation> {
        self.violations.iter().filter(|v| v.code() == code).collect()
    }

    /// Warning messages in order.
    pub fn warning_messages(&self) -> Vec<&str> {
        self.warnings.iter().map(|w| w.message.as_str()).collect()
    }

    /// Whether every required duty was filled.
    pub fn is_complete(&self) -> bool {
        self.success && self.violations.is_empty()
    }

    /// Overview entry for one faculty member.
    pub fn overview_for(&self, faculty_id: &str) -> Option<&FacultyDutyOverview> {
        self.duty_overview
            .iter()
            .find(|o| o.faculty_id == faculty_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> AssignmentResult {
        AssignmentResult {
            success: true,
            assignments: vec![
                Assignment::regular(0, 0, "F1", "R1"),
                Assignment::buffer(0, 0, "F2"),
                Assignment::regular(0, 1, "F1", "R1"),
            ],
            violations: vec![
                Violation::no_eligible(0, 1, DutyRole::Squad, 0, "none left"),
                Violation::room_mismatch(1, 0, "2 rooms, 3 duties"),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_violation_codes() {
        let r = sample_result();
        assert_eq!(r.violations[0].code(), "NO_ELIGIBLE_SQUAD");
        assert_eq!(r.violations[0].id, "NO_ELIGIBLE_SQUAD-d0-s1-u0");
        assert_eq!(r.violations[1].code(), "ROOM_MISMATCH");
        assert_eq!(r.violations_of("ROOM_MISMATCH").len(), 1);
        assert!(!r.is_complete());
    }

    #[test]
    fn test_result_queries() {
        let r = sample_result();
        assert_eq!(r.assignments_for_slot(0, 0).len(), 2);
        assert_eq!(r.assignments_for_faculty("F1").len(), 2);
        assert!(r.assignments_for_slot(5, 5).is_empty());
    }

    #[test]
    fn test_role_counts() {
        let mut c = RoleCounts::default();
        *c.get_mut(DutyRole::Squad) += 2;
        *c.get_mut(DutyRole::Buffer) += 1;
        assert_eq!(c.get(DutyRole::Squad), 2);
        assert_eq!(c.total(), 3);
    }

    #[test]
    fn test_incomplete_shortfall() {
        let s = IncompleteSlot {
            day: 0,
            slot: 0,
            needed: RoleCounts { regular: 3, reliever: 1, squad: 1, buffer: 2 },
            assigned: RoleCounts { regular: 3, reliever: 0, squad: 1, buffer: 1 },
        };
        assert_eq!(s.shortfall(), 2);
    }

    #[test]
    fn test_warning_builder() {
        let w = Warning::new(WarningKind::UnavailabilityBreach, "CRITICAL: F1 on leave")
            .at(0, 2)
            .for_role(DutyRole::Regular)
            .for_faculty("F1");
        assert!(w.is_critical());
        assert_eq!(w.day, Some(0));
        assert_eq!(w.faculty_id.as_deref(), Some("F1"));
    }

    #[test]
    fn test_warning_messages_in_order() {
        let r = AssignmentResult {
            success: true,
            warnings: vec![
                Warning::new(WarningKind::UnknownDesignation, "Designation 'Visiting' has no targets"),
                Warning::new(WarningKind::ConsecutiveRegular, "F1 back to back").at(0, 1),
            ],
            ..Default::default()
        };
        assert_eq!(
            r.warning_messages(),
            vec!["Designation 'Visiting' has no targets", "F1 back to back"]
        );
        assert!(AssignmentResult::default().warning_messages().is_empty());
    }

    #[test]
    fn test_failure_result() {
        let r = AssignmentResult::failure(vec!["No faculty available".into()]);
        assert!(!r.success);
        assert!(r.assignments.is_empty());
        assert_eq!(r.errors, vec!["No faculty available"]);
    }
}
