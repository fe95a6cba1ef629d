//! Post-allocation verification.
//!
//! Re-checks the final assignments independently of the allocator:
//!
//! - an assignment on a date the faculty member declared unavailable is
//!   reported as a `CRITICAL` warning (it means the allocator is broken);
//! - regular duties in adjacent slots of the same day are reported as
//!   ordinary warnings.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use tracing::error;

use crate::models::{
    Assignment, DutyRole, ExamStructure, UnavailabilityIndex, Warning, WarningKind,
};

/// Verifies assignments against unavailability and the consecutive-duty rule.
pub fn verify_assignments(
    assignments: &[Assignment],
    exam: &ExamStructure,
    unavailability: &UnavailabilityIndex,
) -> Vec<Warning> {
    let mut warnings = unavailability_breaches(assignments, exam, unavailability);
    warnings.extend(consecutive_regular(assignments));
    warnings
}

fn unavailability_breaches(
    assignments: &[Assignment],
    exam: &ExamStructure,
    unavailability: &UnavailabilityIndex,
) -> Vec<Warning> {
    if unavailability.is_empty() {
        return Vec::new();
    }

    let dates: HashMap<(usize, usize), NaiveDate> = exam
        .duty_slots
        .iter()
        .map(|s| ((s.day, s.slot), s.date))
        .collect();

    assignments
        .iter()
        .filter_map(|a| {
            let date = *dates.get(&a.coordinate())?;
            if !unavailability.is_unavailable(&a.faculty_id, date) {
                return None;
            }
            let message = format!(
                "CRITICAL: {} assigned {} duty on Day {}, Slot {} ({}) despite being unavailable",
                a.faculty_id,
                a.role,
                a.day.saturating_add(1),
                a.slot.saturating_add(1),
                date.format("%Y-%m-%d")
            );
            error!(faculty = %a.faculty_id, day = a.day, slot = a.slot, "{message}");
            Some(
                Warning::new(WarningKind::UnavailabilityBreach, message)
                    .at(a.day, a.slot)
                    .for_role(a.role)
                    .for_faculty(a.faculty_id.clone()),
            )
        })
        .collect()
}

fn consecutive_regular(assignments: &[Assignment]) -> Vec<Warning> {
    let mut by_day: BTreeMap<(&str, usize), Vec<usize>> = BTreeMap::new();
    for a in assignments.iter().filter(|a| a.role == DutyRole::Regular) {
        by_day
            .entry((a.faculty_id.as_str(), a.day))
            .or_default()
            .push(a.slot);
    }

    let mut warnings = Vec::new();
    for ((faculty_id, day), mut slots) in by_day {
        slots.sort_unstable();
        slots.dedup();
        for pair in slots.windows(2) {
            if pair[1] - pair[0] != 1 {
                continue;
            }
            warnings.push(
                Warning::new(
                    WarningKind::ConsecutiveRegular,
                    format!(
                        "{faculty_id} has consecutive regular duties on Day {} in slots {} and {}",
                        day.saturating_add(1),
                        pair[0].saturating_add(1),
                        pair[1].saturating_add(1)
                    ),
                )
                .at(day, pair[1])
                .for_role(DutyRole::Regular)
                .for_faculty(faculty_id),
            );
        }
    }
    warnings
}
