//! Allocator configuration.
//!
//! Every field has a default, so an empty JSON object is a valid config.

use serde::{Deserialize, Serialize};

use crate::error::AllocationError;

/// Tunables for one allocation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AllocationConfig {
    /// Skip every role of a slot whose room count differs from its regular
    /// duty count. When `false`, only the regular phase is skipped.
    pub skip_mismatched_slots: bool,
    /// Re-check the final assignments for unavailability breaches and
    /// consecutive regular duties.
    pub verify_assignments: bool,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            skip_mismatched_slots: true,
            verify_assignments: true,
        }
    }
}

impl AllocationConfig {
    /// Parses a JSON config.
    pub fn from_json(json: &str) -> Result<Self, AllocationError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sets `skip_mismatched_slots`.
    pub fn with_skip_mismatched_slots(mut self, skip: bool) -> Self {
        self.skip_mismatched_slots = skip;
        self
    }

    /// Sets `verify_assignments`.
    pub fn with_verification(mut self, verify: bool) -> Self {
        self.verify_assignments = verify;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_uses_defaults() {
        let cfg = AllocationConfig::from_json("{}").unwrap();
        assert_eq!(cfg, AllocationConfig::default());
        assert!(cfg.skip_mismatched_slots);
        assert!(cfg.verify_assignments);
    }

    #[test]
    fn test_partial_override() {
        let cfg = AllocationConfig::from_json(r#"{"skipMismatchedSlots": false}"#).unwrap();
        assert!(!cfg.skip_mismatched_slots);
        assert!(cfg.verify_assignments);
    }

    #[test]
    fn test_malformed_json() {
        let err = AllocationConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, AllocationError::Config(_)));
    }
}
