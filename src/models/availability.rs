//! Faculty unavailability.
//!
//! Unavailability is recorded per calendar date. An entry bars the faculty
//! member from every slot held on that date; the number of distinct dates
//! a member is unavailable is also used as a tie-break signal when picking
//! between equally deserving candidates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// A faculty member who cannot invigilate on a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnavailableFaculty {
    /// Faculty identifier.
    pub faculty_id: String,
    /// The blocked date.
    pub date: NaiveDate,
}

impl UnavailableFaculty {
    /// Creates an unavailability entry.
    pub fn new(faculty_id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            faculty_id: faculty_id.into(),
            date,
        }
    }
}

/// Date-keyed lookup built from raw unavailability entries.
///
/// Duplicate entries collapse into one.
#[derive(Debug, Clone, Default)]
pub struct UnavailabilityIndex {
    by_date: BTreeMap<NaiveDate, BTreeSet<String>>,
    days_by_faculty: HashMap<String, usize>,
}

impl UnavailabilityIndex {
    /// Builds the index.
    pub fn from_entries(entries: &[UnavailableFaculty]) -> Self {
        let mut by_date: BTreeMap<NaiveDate, BTreeSet<String>> = BTreeMap::new();
        let mut days_by_faculty: HashMap<String, usize> = HashMap::new();

        for entry in entries {
            let inserted = by_date
                .entry(entry.date)
                .or_default()
                .insert(entry.faculty_id.clone());
            if inserted {
                *days_by_faculty.entry(entry.faculty_id.clone()).or_insert(0) += 1;
            }
        }

        Self {
            by_date,
            days_by_faculty,
        }
    }

    /// Faculty unavailable on a date.
    pub fn unavailable_on(&self, date: NaiveDate) -> Option<&BTreeSet<String>> {
        self.by_date.get(&date)
    }

    /// Whether a faculty member is unavailable on a date.
    pub fn is_unavailable(&self, faculty_id: &str, date: NaiveDate) -> bool {
        self.by_date
            .get(&date)
            .is_some_and(|ids| ids.contains(faculty_id))
    }

    /// Number of distinct dates a faculty member is unavailable.
    pub fn unavailable_days(&self, faculty_id: &str) -> usize {
        self.days_by_faculty.get(faculty_id).copied().unwrap_or(0)
    }

    /// Per-faculty unavailable day counts.
    pub fn day_counts(&self) -> &HashMap<String, usize> {
        &self.days_by_faculty
    }

    /// Whether no entries were recorded.
    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }
}
