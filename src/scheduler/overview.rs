//! Per-faculty duty overview.

use std::collections::BTreeMap;

use crate::models::{Assignment, Faculty, FacultyDutyOverview};

/// Summarises assignments per faculty member.
///
/// Every roster member gets an entry, including those with no duties.
/// Entries are sorted by faculty ID. Reliever and squad room chunks are
/// collected under their `d{day}-s{slot}` key.
pub fn build_overview(roster: &[Faculty], assignments: &[Assignment]) -> Vec<FacultyDutyOverview> {
    let mut entries: BTreeMap<&str, FacultyDutyOverview> = roster
        .iter()
        .map(|f| {
            (
                f.faculty_id.as_str(),
                FacultyDutyOverview {
                    faculty_id: f.faculty_id.clone(),
                    name: f.name.clone(),
                    designation: f.designation.clone(),
                    ..Default::default()
                },
            )
        })
        .collect();

    for a in assignments {
        let Some(entry) = entries.get_mut(a.faculty_id.as_str()) else {
            continue;
        };
        *entry.counts.get_mut(a.role) += 1;
        entry.total += 1;
        if let Some(rooms) = &a.rooms {
            entry.coverage.insert(a.slot_key(), rooms.clone());
        }
    }

    entries.into_values().collect()
}
