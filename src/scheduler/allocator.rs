//! Slot-by-slot duty allocator.
//!
//! # Algorithm
//!
//! 1. Validate the roster and exam structure; refuse to start on errors.
//! 2. Build zeroed counters with designation targets.
//! 3. Visit slots in `(day, slot)` order. Skip a slot whose room count
//!    differs from its regular duty count.
//! 4. Fill regular → reliever → squad → buffer duties one unit at a time:
//!    walk the role's relaxation ladder to get an eligible set, rank it with
//!    the role's rule engine, take the first candidate.
//! 5. Record a violation for any unit no ladder step could fill.
//! 6. Post-verify the final assignments and build the duty overview.
//!
//! # Complexity
//! O(u * f * log f) where u = duty units and f = faculty.

use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};

use chrono::NaiveDate;
use tracing::{debug, error, info, instrument, warn};

use super::chunking::chunk_rooms;
use super::counters::{CounterTable, DutyCounter};
use super::eligibility::{find_eligible, EligibilityQuery, RegularHistory};
use super::overview::build_overview;
use super::verify::verify_assignments;
use crate::config::AllocationConfig;
use crate::dispatching::{RuleEngine, SelectionContext};
use crate::error::AllocationError;
use crate::models::{
    sort_canonical, Assignment, AssignmentResult, DutyRole, DutySlot, ExamStructure, Faculty,
    IncompleteSlot, RoleCounts, UnavailabilityIndex, UnavailableFaculty, Violation, Warning,
    WarningKind,
};
use crate::validation::validate_input;

/// Allocates duties with the default configuration.
///
/// Never fails: validation errors and unexpected failures come back as a
/// result with `success == false`.
pub fn allocate(
    faculty: &[Faculty],
    exam: &ExamStructure,
    unavailability: &[UnavailableFaculty],
) -> AssignmentResult {
    DutyAllocator::new().allocate(faculty, exam, unavailability)
}

/// Deterministic exam duty allocator.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use duty_allocator::models::{DutySlot, ExamStructure, Faculty};
/// use duty_allocator::scheduler::DutyAllocator;
///
/// let faculty = vec![
///     Faculty::new("F1", "Professor"),
///     Faculty::new("F2", "Professor"),
/// ];
/// let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
/// let exam = ExamStructure::new()
///     .with_targets("Professor", 1, 0, 0)
///     .with_slot(DutySlot::new(0, 0, date).with_rooms(["R1"]));
///
/// let result = DutyAllocator::new().allocate(&faculty, &exam, &[]);
/// assert!(result.success);
/// assert_eq!(result.assignments.len(), 1);
/// assert_eq!(result.assignments[0].faculty_id, "F1");
/// ```
#[derive(Debug, Clone, Default)]
pub struct DutyAllocator {
    config: AllocationConfig,
}

impl DutyAllocator {
    /// Creates an allocator with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an allocator with a custom configuration.
    pub fn with_config(config: AllocationConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    pub fn config(&self) -> &AllocationConfig {
        &self.config
    }

    /// Allocates duties, converting every failure into a failed result.
    pub fn allocate(
        &self,
        faculty: &[Faculty],
        exam: &ExamStructure,
        unavailability: &[UnavailableFaculty],
    ) -> AssignmentResult {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            self.try_allocate(faculty, exam, unavailability)
        }));

        match outcome {
            Ok(Ok(result)) => result,
            Ok(Err(err)) => {
                warn!(error = %err, "allocation refused");
                AssignmentResult::failure(err.messages())
            }
            Err(payload) => {
                let err = AllocationError::Internal(panic_message(payload.as_ref()));
                error!(error = %err, "allocation aborted");
                AssignmentResult::failure(err.messages())
            }
        }
    }

    /// Allocates duties, returning validation failures as errors.
    #[instrument(skip_all, fields(faculty = faculty.len(), slots = exam.duty_slots.len()))]
    pub fn try_allocate(
        &self,
        faculty: &[Faculty],
        exam: &ExamStructure,
        unavailability: &[UnavailableFaculty],
    ) -> Result<AssignmentResult, AllocationError> {
        let mut warnings = validate_input(faculty, exam).map_err(AllocationError::Validation)?;

        let mut roster = faculty.to_vec();
        sort_canonical(&mut roster);
        let index = UnavailabilityIndex::from_entries(unavailability);

        info!(
            demand = exam.mandatory_demand(),
            unavailable_entries = unavailability.len(),
            "allocation started"
        );

        let mut run = AllocationRun::new(&roster, exam, &index);
        for slot in exam.ordered_slots() {
            run.process_slot(slot, &self.config);
        }

        warnings.append(&mut run.warnings);
        if self.config.verify_assignments {
            warnings.extend(verify_assignments(&run.assignments, exam, &index));
        }
        let duty_overview = build_overview(&roster, &run.assignments);

        info!(
            assignments = run.assignments.len(),
            violations = run.violations.len(),
            warnings = warnings.len(),
            incomplete_slots = run.incomplete_slots.len(),
            "allocation finished"
        );

        Ok(AssignmentResult {
            success: true,
            assignments: run.assignments,
            errors: Vec::new(),
            warnings,
            violations: run.violations,
            incomplete_slots: run.incomplete_slots,
            duty_overview,
        })
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Where a duty unit sits within its slot.
#[derive(Debug, Clone)]
enum Placement {
    Room(String),
    Rooms(Vec<String>),
    OnCall,
}

impl Placement {
    /// Units to fill for a role: one room each for regular (alphabetical),
    /// a room chunk each for reliever/squad, nothing for buffer.
    fn for_role(slot: &DutySlot, role: DutyRole) -> Vec<Placement> {
        match role {
            DutyRole::Regular => slot
                .sorted_rooms()
                .into_iter()
                .take(slot.regular_duties)
                .map(Placement::Room)
                .collect(),
            DutyRole::Reliever | DutyRole::Squad => chunk_rooms(&slot.rooms, slot.required(role))
                .into_iter()
                .map(Placement::Rooms)
                .collect(),
            DutyRole::Buffer => vec![Placement::OnCall; slot.buffer_duties],
        }
    }

    fn into_assignment(self, slot: &DutySlot, faculty_id: String, role: DutyRole) -> Assignment {
        match self {
            Placement::Room(room) => Assignment::regular(slot.day, slot.slot, faculty_id, room),
            Placement::Rooms(rooms) => {
                Assignment::coverage(slot.day, slot.slot, faculty_id, role, rooms)
            }
            Placement::OnCall => Assignment::buffer(slot.day, slot.slot, faculty_id),
        }
    }
}

/// Mutable state of one allocation run.
struct AllocationRun<'a> {
    roster: &'a [Faculty],
    unavailability: &'a UnavailabilityIndex,
    table: CounterTable,
    history: RegularHistory,
    assignments: Vec<Assignment>,
    violations: Vec<Violation>,
    warnings: Vec<Warning>,
    incomplete_slots: Vec<IncompleteSlot>,
}

impl<'a> AllocationRun<'a> {
    fn new(
        roster: &'a [Faculty],
        exam: &ExamStructure,
        unavailability: &'a UnavailabilityIndex,
    ) -> Self {
        Self {
            roster,
            unavailability,
            table: CounterTable::new(roster, exam),
            history: RegularHistory::new(),
            assignments: Vec::new(),
            violations: Vec::new(),
            warnings: Vec::new(),
            incomplete_slots: Vec::new(),
        }
    }

    /// Counter positions of faculty available on `date`, in roster order.
    fn available_pool(&self, date: NaiveDate) -> Vec<usize> {
        let unavailable = self.unavailability.unavailable_on(date);
        self.roster
            .iter()
            .filter(|f| unavailable.map_or(true, |ids| !ids.contains(&f.faculty_id)))
            .filter_map(|f| self.table.position(&f.faculty_id))
            .collect()
    }

    fn process_slot(&mut self, slot: &DutySlot, config: &AllocationConfig) {
        let needed = RoleCounts {
            regular: slot.regular_duties,
            reliever: slot.reliever_duties,
            squad: slot.squad_duties,
            buffer: slot.buffer_duties,
        };
        let mut assigned = RoleCounts::default();

        let rooms_match = slot.rooms_match();
        if !rooms_match {
            let message = format!(
                "{}: {} rooms configured for {} regular duties",
                slot.label(),
                slot.rooms.len(),
                slot.regular_duties
            );
            warn!(day = slot.day, slot = slot.slot, "{message}");
            self.violations
                .push(Violation::room_mismatch(slot.day, slot.slot, message));

            if config.skip_mismatched_slots {
                self.incomplete_slots.push(IncompleteSlot {
                    day: slot.day,
                    slot: slot.slot,
                    needed,
                    assigned,
                });
                return;
            }
        }

        let pool = self.available_pool(slot.date);
        debug!(
            day = slot.day,
            slot = slot.slot,
            date = %slot.iso_date(),
            available = pool.len(),
            "processing slot"
        );

        let mut in_slot = HashSet::new();
        for role in DutyRole::ALL {
            if role == DutyRole::Regular && !rooms_match {
                continue;
            }
            let placements = Placement::for_role(slot, role);
            *assigned.get_mut(role) = self.fill_role(slot, role, placements, &pool, &mut in_slot);
        }

        if DutyRole::ALL
            .iter()
            .any(|&role| assigned.get(role) < needed.get(role))
        {
            self.incomplete_slots.push(IncompleteSlot {
                day: slot.day,
                slot: slot.slot,
                needed,
                assigned,
            });
        }
    }

    /// Records a `NO_ELIGIBLE_<ROLE>` violation for one unit.
    fn record_unfilled(&mut self, slot: &DutySlot, role: DutyRole, unit: usize) {
        let message = format!(
            "{}: no eligible faculty for {} duty {}",
            slot.label(),
            role,
            unit + 1
        );
        warn!(day = slot.day, slot = slot.slot, %role, unit, "{message}");
        self.violations
            .push(Violation::no_eligible(slot.day, slot.slot, role, unit, message));
    }

    /// Fills one role's units; returns how many were filled.
    fn fill_role(
        &mut self,
        slot: &DutySlot,
        role: DutyRole,
        placements: Vec<Placement>,
        pool: &[usize],
        in_slot: &mut HashSet<usize>,
    ) -> usize {
        let engine = RuleEngine::for_role(role);
        let unavailability = self.unavailability;
        let context =
            SelectionContext::for_role(role).with_unavailable_days(unavailability.day_counts());
        let mut filled = 0;

        for (unit, placement) in placements.into_iter().enumerate() {
            let query = EligibilityQuery {
                day: slot.day,
                slot: slot.slot,
                role,
                pool,
                in_slot: &*in_slot,
            };
            let Some(found) = find_eligible(&self.table, &self.history, &query) else {
                self.record_unfilled(slot, role, unit);
                continue;
            };

            let chosen = {
                let candidates: Vec<&DutyCounter> =
                    found.candidates.iter().map(|&i| self.table.get(i)).collect();
                engine
                    .select_best(&candidates, &context)
                    .map(|best| found.candidates[best])
            };
            debug_assert!(chosen.is_some(), "ladder returned an empty candidate set");
            let Some(idx) = chosen else {
                self.record_unfilled(slot, role, unit);
                continue;
            };

            self.table.record(idx, role);
            if role == DutyRole::Regular {
                self.history.record(idx, slot.day, slot.slot);
            }
            in_slot.insert(idx);

            let faculty_id = self.table.get(idx).faculty_id.clone();
            debug!(
                day = slot.day,
                slot = slot.slot,
                %role,
                unit,
                pass = found.pass,
                faculty = %faculty_id,
                "duty assigned"
            );

            if found.step.warn_on_success {
                let message = format!(
                    "{}: {} duty {} assigned to {} only by allowing back-to-back duties",
                    slot.label(),
                    role,
                    unit + 1,
                    faculty_id
                );
                warn!(day = slot.day, slot = slot.slot, %role, "{message}");
                self.warnings.push(
                    Warning::new(WarningKind::RelaxedConstraint, message)
                        .at(slot.day, slot.slot)
                        .for_role(role)
                        .for_faculty(faculty_id.clone()),
                );
            }

            self.assignments
                .push(placement.into_assignment(slot, faculty_id, role));
            filled += 1;
        }

        filled
    }
}
