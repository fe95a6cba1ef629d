//! Selection context for rule evaluation.

use std::collections::HashMap;

use crate::models::DutyRole;

/// State passed to selection rules.
///
/// Holds the role being filled and, optionally, the number of distinct
/// dates each faculty member is unavailable.
#[derive(Debug, Clone, Copy)]
pub struct SelectionContext<'a> {
    /// Role being filled.
    pub role: DutyRole,
    /// Unavailable day count per faculty ID.
    pub unavailable_days: Option<&'a HashMap<String, usize>>,
}

impl<'a> SelectionContext<'a> {
    /// Creates a context for a role with no unavailability data.
    pub fn for_role(role: DutyRole) -> Self {
        Self {
            role,
            unavailable_days: None,
        }
    }

    /// Attaches per-faculty unavailable day counts.
    pub fn with_unavailable_days(mut self, days: &'a HashMap<String, usize>) -> Self {
        self.unavailable_days = Some(days);
        self
    }

    /// Unavailable day count for a faculty member (0 if unknown).
    pub fn unavailable_days_of(&self, faculty_id: &str) -> usize {
        self.unavailable_days
            .and_then(|days| days.get(faculty_id).copied())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_days_lookup() {
        let days: HashMap<String, usize> = [("F1".to_string(), 3)].into_iter().collect();
        let ctx = SelectionContext::for_role(DutyRole::Squad).with_unavailable_days(&days);
        assert_eq!(ctx.unavailable_days_of("F1"), 3);
        assert_eq!(ctx.unavailable_days_of("F2"), 0);
        assert_eq!(ctx.role, DutyRole::Squad);
    }

    #[test]
    fn test_no_unavailability_data() {
        let ctx = SelectionContext::for_role(DutyRole::Regular);
        assert_eq!(ctx.unavailable_days_of("F1"), 0);
    }
}
