//! Input validation for duty allocation.
//!
//! Checks that an allocation run can start at all. Detects:
//! - An empty roster
//! - An exam structure with no duty slots
//! - Duplicate `(day, slot)` coordinates
//! - Mandatory demand exceeding the roster's combined targets
//!
//! Buffer duties are excluded from the capacity check because they carry
//! no target.

use std::collections::{BTreeSet, HashSet};
use thiserror::Error;

use crate::models::{DutyRole, ExamStructure, Faculty, Warning, WarningKind};

/// Validation result: advisory warnings on success, every error on failure.
pub type ValidationResult = Result<Vec<Warning>, Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The roster is empty.
    EmptyRoster,
    /// The exam structure has no slots.
    NoDutySlots,
    /// Two slots share a `(day, slot)` coordinate.
    DuplicateSlot,
    /// Mandatory demand exceeds total targets.
    InsufficientCapacity,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Total regular + reliever + squad targets over the roster.
pub fn mandatory_capacity(faculty: &[Faculty], exam: &ExamStructure) -> u64 {
    faculty
        .iter()
        .map(|f| {
            [DutyRole::Regular, DutyRole::Reliever, DutyRole::Squad]
                .iter()
                .map(|&role| u64::from(exam.target(&f.designation, role).unwrap_or(0)))
                .sum::<u64>()
        })
        .sum()
}

/// Validates the inputs of an allocation run.
///
/// An empty roster or an empty slot list fails immediately with that single
/// error. Otherwise all remaining checks run and every error is reported.
///
/// # Returns
/// `Ok(warnings)` if allocation may proceed, `Err(errors)` otherwise.
pub fn validate_input(faculty: &[Faculty], exam: &ExamStructure) -> ValidationResult {
    if faculty.is_empty() {
        return Err(vec![ValidationError::new(
            ValidationErrorKind::EmptyRoster,
            "No faculty available",
        )]);
    }
    if exam.duty_slots.is_empty() {
        return Err(vec![ValidationError::new(
            ValidationErrorKind::NoDutySlots,
            "No duty slots configured",
        )]);
    }

    let mut errors = Vec::new();

    let mut seen = HashSet::new();
    for slot in &exam.duty_slots {
        if !seen.insert((slot.day, slot.slot)) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateSlot,
                format!("Duplicate duty slot: {}", slot.label()),
            ));
        }
    }

    let demand = exam.mandatory_demand() as u64;
    let capacity = mandatory_capacity(faculty, exam);
    if demand > capacity {
        errors.push(ValidationError::new(
            ValidationErrorKind::InsufficientCapacity,
            format!(
                "Insufficient faculty capacity: {demand} mandatory duties required but only {capacity} available"
            ),
        ));
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    let unknown: BTreeSet<&str> = faculty
        .iter()
        .map(|f| f.designation.as_str())
        .filter(|d| !exam.designation_duty_counts.contains_key(*d))
        .collect();
    let warnings = unknown
        .into_iter()
        .map(|d| {
            Warning::new(
                WarningKind::UnknownDesignation,
                format!("Designation '{d}' has no duty targets configured; targets default to 0"),
            )
        })
        .collect();

    Ok(warnings)
}
