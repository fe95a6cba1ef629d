//! Exam invigilation duty allocation.
//!
//! Assigns faculty members to regular, reliever, squad and buffer duties
//! across the slots of an examination period. Allocation is deterministic:
//! the same inputs always produce the same assignments.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Faculty`, `DutySlot`, `ExamStructure`,
//!   `UnavailableFaculty`, `Assignment`, `AssignmentResult`
//! - **`validation`**: Pre-allocation checks (empty inputs, duplicate slots,
//!   target capacity)
//! - **`dispatching`**: Selection rules and the rule engine that ranks
//!   eligible candidates
//! - **`scheduler`**: The slot-by-slot allocator, post-verification, duty
//!   overview and KPIs
//! - **`config`**, **`error`**, **`logging`**: Ambient plumbing
//!
//! # Quick Start
//!
//! ```
//! use chrono::NaiveDate;
//! use duty_allocator::allocate;
//! use duty_allocator::models::{DutySlot, ExamStructure, Faculty, UnavailableFaculty};
//!
//! let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
//! let faculty = vec![
//!     Faculty::new("F1", "Professor").with_name("Asha"),
//!     Faculty::new("F2", "Professor").with_name("Ben"),
//!     Faculty::new("F3", "Assistant").with_name("Chen"),
//! ];
//! let exam = ExamStructure::new()
//!     .with_targets("Professor", 2, 1, 0)
//!     .with_targets("Assistant", 1, 0, 0)
//!     .with_buffer_eligibility("Assistant", true)
//!     .with_slot(DutySlot::new(0, 0, date).with_rooms(["R101", "R102"]).with_buffers(1));
//! let unavailable = vec![UnavailableFaculty::new("F2", date)];
//!
//! let result = allocate(&faculty, &exam, &unavailable);
//! assert!(result.success);
//! assert!(result.assignments.iter().all(|a| a.faculty_id != "F2"));
//! ```

pub mod config;
pub mod dispatching;
pub mod error;
pub mod logging;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use config::AllocationConfig;
pub use error::AllocationError;
pub use scheduler::{allocate, AllocationKpi, DutyAllocator};
