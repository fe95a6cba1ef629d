//! Exam duty domain models.
//!
//! Provides the data handed to the allocator (roster, exam structure,
//! unavailability) and the data it hands back (assignments, violations,
//! warnings, overview).
//!
//! # Domain Mappings
//!
//! | duty-allocator | Meaning |
//! |----------------|---------|
//! | Faculty | Invigilator |
//! | DutySlot | One examination sitting (day × slot) |
//! | DutyRole | Regular / reliever / squad / buffer duty |
//! | Assignment | Faculty bound to one duty in one slot |

mod assignment;
mod availability;
mod exam;
mod faculty;
mod result;

pub use assignment::{Assignment, DutyRole};
pub use availability::{UnavailabilityIndex, UnavailableFaculty};
pub use exam::{DutySlot, ExamStructure};
pub use faculty::{sort_canonical, Faculty};
pub use result::{
    AssignmentResult, FacultyDutyOverview, IncompleteSlot, RoleCounts, Violation, ViolationKind,
    Warning, WarningKind,
};
