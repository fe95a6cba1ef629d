//! Duty roles and assignments.
//!
//! An assignment binds one faculty member to one duty in one slot. The
//! shape of its room data depends on the role:
//!
//! | Role | Room data |
//! |------|-----------|
//! | Regular | exactly one `room_number` |
//! | Reliever / Squad | a `rooms` chunk to cover |
//! | Buffer | none (on call) |

use serde::{Deserialize, Serialize};
use std::fmt;

/// The four duty roles. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DutyRole {
    /// One faculty member per room.
    Regular,
    /// Covers a chunk of rooms to relieve regular invigilators.
    Reliever,
    /// Roaming inspection over a chunk of rooms.
    Squad,
    /// On-call standby; no rooms and no target.
    Buffer,
}

impl DutyRole {
    /// All roles in phase order.
    pub const ALL: [DutyRole; 4] = [
        DutyRole::Regular,
        DutyRole::Reliever,
        DutyRole::Squad,
        DutyRole::Buffer,
    ];

    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            DutyRole::Regular => "regular",
            DutyRole::Reliever => "reliever",
            DutyRole::Squad => "squad",
            DutyRole::Buffer => "buffer",
        }
    }

    /// Whether the role is counted against a designation target.
    #[inline]
    pub fn has_target(self) -> bool {
        !matches!(self, DutyRole::Buffer)
    }

    /// Whether the role covers a chunk of rooms.
    #[inline]
    pub fn is_coverage(self) -> bool {
        matches!(self, DutyRole::Reliever | DutyRole::Squad)
    }
}

impl fmt::Display for DutyRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A faculty-to-duty assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    /// Day index.
    pub day: usize,
    /// Slot index.
    pub slot: usize,
    /// Assigned faculty.
    pub faculty_id: String,
    /// Duty role.
    pub role: DutyRole,
    /// Room for a regular duty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_number: Option<String>,
    /// Room chunk for a reliever or squad duty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rooms: Option<Vec<String>>,
}

impl Assignment {
    /// A regular duty in one room.
    pub fn regular(
        day: usize,
        slot: usize,
        faculty_id: impl Into<String>,
        room: impl Into<String>,
    ) -> Self {
        Self {
            day,
            slot,
            faculty_id: faculty_id.into(),
            role: DutyRole::Regular,
            room_number: Some(room.into()),
            rooms: None,
        }
    }

    /// A reliever or squad duty over a room chunk.
    pub fn coverage(
        day: usize,
        slot: usize,
        faculty_id: impl Into<String>,
        role: DutyRole,
        rooms: Vec<String>,
    ) -> Self {
        debug_assert!(role.is_coverage());
        Self {
            day,
            slot,
            faculty_id: faculty_id.into(),
            role,
            room_number: None,
            rooms: Some(rooms),
        }
    }

    /// A buffer duty.
    pub fn buffer(day: usize, slot: usize, faculty_id: impl Into<String>) -> Self {
        Self {
            day,
            slot,
            faculty_id: faculty_id.into(),
            role: DutyRole::Buffer,
            room_number: None,
            rooms: None,
        }
    }

    /// `(day, slot)` coordinate.
    #[inline]
    pub fn coordinate(&self) -> (usize, usize) {
        (self.day, self.slot)
    }

    /// Coverage map key, `d{day}-s{slot}`.
    pub fn slot_key(&self) -> String {
        format!("d{}-s{}", self.day, self.slot)
    }
}
