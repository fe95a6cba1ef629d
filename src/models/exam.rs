//! Exam structure model.
//!
//! An exam structure is the set of duty slots (one per examination sitting)
//! plus the per-designation targets that drive fairness during allocation.
//!
//! # Slot invariant
//! Each slot is expected to hold exactly one room per regular duty
//! (`rooms.len() == regular_duties`). A slot that breaks this is reported
//! as a room mismatch by the allocator rather than rejected up front.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::DutyRole;

/// One examination sitting identified by `(day, slot)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DutySlot {
    /// Zero-based day index.
    pub day: usize,
    /// Zero-based slot index within the day.
    pub slot: usize,
    /// Calendar date of the sitting.
    pub date: NaiveDate,
    /// Start time label (e.g. "09:30").
    #[serde(default)]
    pub start_time: String,
    /// End time label.
    #[serde(default)]
    pub end_time: String,
    /// Room identifiers, one per regular duty.
    #[serde(default)]
    pub rooms: Vec<String>,
    /// Required regular duties.
    #[serde(default)]
    pub regular_duties: usize,
    /// Required reliever duties.
    #[serde(default)]
    pub reliever_duties: usize,
    /// Required squad duties.
    #[serde(default)]
    pub squad_duties: usize,
    /// Required buffer duties.
    #[serde(default)]
    pub buffer_duties: usize,
}

impl DutySlot {
    /// Creates a slot with no rooms and no duty requirements.
    pub fn new(day: usize, slot: usize, date: NaiveDate) -> Self {
        Self {
            day,
            slot,
            date,
            start_time: String::new(),
            end_time: String::new(),
            rooms: Vec::new(),
            regular_duties: 0,
            reliever_duties: 0,
            squad_duties: 0,
            buffer_duties: 0,
        }
    }

    /// Sets the timing labels.
    pub fn with_times(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start_time = start.into();
        self.end_time = end.into();
        self
    }

    /// Sets the rooms and the matching number of regular duties.
    pub fn with_rooms<I, S>(mut self, rooms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rooms = rooms.into_iter().map(Into::into).collect();
        self.regular_duties = self.rooms.len();
        self
    }

    /// Overrides the regular duty count without touching rooms.
    pub fn with_regular(mut self, count: usize) -> Self {
        self.regular_duties = count;
        self
    }

    /// Sets the reliever duty count.
    pub fn with_relievers(mut self, count: usize) -> Self {
        self.reliever_duties = count;
        self
    }

    /// Sets the squad duty count.
    pub fn with_squads(mut self, count: usize) -> Self {
        self.squad_duties = count;
        self
    }

    /// Sets the buffer duty count.
    pub fn with_buffers(mut self, count: usize) -> Self {
        self.buffer_duties = count;
        self
    }

    /// Required duties for a role.
    pub fn required(&self, role: DutyRole) -> usize {
        match role {
            DutyRole::Regular => self.regular_duties,
            DutyRole::Reliever => self.reliever_duties,
            DutyRole::Squad => self.squad_duties,
            DutyRole::Buffer => self.buffer_duties,
        }
    }

    /// Regular + reliever + squad demand (buffer excluded).
    pub fn mandatory_demand(&self) -> usize {
        self.regular_duties + self.reliever_duties + self.squad_duties
    }

    /// Whether the room list matches the regular duty count.
    #[inline]
    pub fn rooms_match(&self) -> bool {
        self.rooms.len() == self.regular_duties
    }

    /// ISO `YYYY-MM-DD` rendering of the slot date.
    pub fn iso_date(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// Rooms in ascending name order (used for regular duties).
    pub fn sorted_rooms(&self) -> Vec<String> {
        let mut rooms = self.rooms.clone();
        rooms.sort();
        rooms
    }

    /// Human-readable label, one-based (e.g. "Day 1, Slot 2").
    pub fn label(&self) -> String {
        format!(
            "Day {}, Slot {}",
            self.day.saturating_add(1),
            self.slot.saturating_add(1)
        )
    }
}

/// The complete examination layout plus designation targets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamStructure {
    /// All duty slots.
    pub duty_slots: Vec<DutySlot>,
    /// Regular duty target per designation.
    #[serde(default)]
    pub designation_duty_counts: HashMap<String, u32>,
    /// Reliever duty target per designation.
    #[serde(default)]
    pub designation_reliever_counts: HashMap<String, u32>,
    /// Squad duty target per designation.
    #[serde(default)]
    pub designation_squad_counts: HashMap<String, u32>,
    /// Whether a designation may take buffer duty.
    #[serde(default)]
    pub designation_buffer_eligibility: HashMap<String, bool>,
}

impl ExamStructure {
    /// Creates an empty structure.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a duty slot.
    pub fn with_slot(mut self, slot: DutySlot) -> Self {
        self.duty_slots.push(slot);
        self
    }

    /// Sets the three targets for a designation.
    pub fn with_targets(
        mut self,
        designation: impl Into<String>,
        regular: u32,
        reliever: u32,
        squad: u32,
    ) -> Self {
        let designation = designation.into();
        self.designation_duty_counts
            .insert(designation.clone(), regular);
        self.designation_reliever_counts
            .insert(designation.clone(), reliever);
        self.designation_squad_counts.insert(designation, squad);
        self
    }

    /// Flags a designation as buffer eligible (or not).
    pub fn with_buffer_eligibility(mut self, designation: impl Into<String>, eligible: bool) -> Self {
        self.designation_buffer_eligibility
            .insert(designation.into(), eligible);
        self
    }

    /// Target for a designation and role. Buffer has no target.
    ///
    /// Designations missing from a map default to 0.
    pub fn target(&self, designation: &str, role: DutyRole) -> Option<u32> {
        let map = match role {
            DutyRole::Regular => &self.designation_duty_counts,
            DutyRole::Reliever => &self.designation_reliever_counts,
            DutyRole::Squad => &self.designation_squad_counts,
            DutyRole::Buffer => return None,
        };
        Some(map.get(designation).copied().unwrap_or(0))
    }

    /// Whether a designation may take buffer duty (default `false`).
    pub fn is_buffer_eligible(&self, designation: &str) -> bool {
        self.designation_buffer_eligibility
            .get(designation)
            .copied()
            .unwrap_or(false)
    }

    /// Total regular + reliever + squad demand across all slots.
    pub fn mandatory_demand(&self) -> usize {
        self.duty_slots.iter().map(DutySlot::mandatory_demand).sum()
    }

    /// Slots sorted by `(day, slot)`.
    pub fn ordered_slots(&self) -> Vec<&DutySlot> {
        let mut slots: Vec<&DutySlot> = self.duty_slots.iter().collect();
        slots.sort_by_key(|s| (s.day, s.slot));
        slots
    }

    /// Finds the slot at `(day, slot)`.
    pub fn slot_at(&self, day: usize, slot: usize) -> Option<&DutySlot> {
        self.duty_slots
            .iter()
            .find(|s| s.day == day && s.slot == slot)
    }
}
