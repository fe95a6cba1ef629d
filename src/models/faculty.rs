//! Faculty model.
//!
//! Faculty members are the people who take invigilation duties. Each one
//! carries a designation, which is the key used to look up per-role
//! duty targets in the [`ExamStructure`](super::ExamStructure).

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A faculty member available for examination duties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Faculty {
    /// Unique faculty identifier.
    pub faculty_id: String,
    /// Display name.
    pub name: String,
    /// Designation (e.g. "Professor"); keys the target maps.
    pub designation: String,
    /// Department.
    #[serde(default)]
    pub department: String,
    /// Contact phone number.
    #[serde(default)]
    pub phone: String,
}

impl Faculty {
    /// Creates a faculty member with the given ID and designation.
    pub fn new(faculty_id: impl Into<String>, designation: impl Into<String>) -> Self {
        Self {
            faculty_id: faculty_id.into(),
            name: String::new(),
            designation: designation.into(),
            department: String::new(),
            phone: String::new(),
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the department.
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    /// Sets the phone number.
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    /// Canonical intake ordering: designation, then name, then ID.
    pub fn canonical_cmp(&self, other: &Self) -> Ordering {
        self.designation
            .cmp(&other.designation)
            .then_with(|| self.name.cmp(&other.name))
            .then_with(|| self.faculty_id.cmp(&other.faculty_id))
    }
}

/// Sorts a roster into canonical order (designation → name → id).
pub fn sort_canonical(faculty: &mut [Faculty]) {
    faculty.sort_by(Faculty::canonical_cmp);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_faculty_builder() {
        let f = Faculty::new("F001", "Professor")
            .with_name("Asha Rao")
            .with_department("Physics")
            .with_phone("555-0101");

        assert_eq!(f.faculty_id, "F001");
        assert_eq!(f.designation, "Professor");
        assert_eq!(f.name, "Asha Rao");
        assert_eq!(f.department, "Physics");
        assert_eq!(f.phone, "555-0101");
    }

    #[test]
    fn test_canonical_order() {
        let mut roster = vec![
            Faculty::new("F3", "Professor").with_name("Zed"),
            Faculty::new("F2", "Assistant").with_name("Bea"),
            Faculty::new("F1", "Professor").with_name("Amy"),
            Faculty::new("F0", "Assistant").with_name("Bea"),
        ];
        sort_canonical(&mut roster);

        let ids: Vec<&str> = roster.iter().map(|f| f.faculty_id.as_str()).collect();
        assert_eq!(ids, vec!["F0", "F2", "F1", "F3"]);
    }

    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{"facultyId":"F9","name":"Kim","designation":"Lecturer"}"#;
        let f: Faculty = serde_json::from_str(json).unwrap();
        assert_eq!(f.faculty_id, "F9");
        assert_eq!(f.designation, "Lecturer");
        assert!(f.department.is_empty());
    }
}
