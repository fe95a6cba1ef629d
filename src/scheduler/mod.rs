//! Duty allocation and KPI evaluation.
//!
//! Provides the deterministic slot-by-slot allocator and allocation
//! quality metrics.
//!
//! # Algorithm
//!
//! `DutyAllocator` is a greedy, deficit-driven heuristic. Slots are filled
//! in chronological order; each duty unit goes to the eligible faculty
//! member furthest behind their target for that role. Soft rules are
//! relaxed step by step when nobody qualifies. It is not optimal, but it
//! is fast, fair in aggregate, and reproducible.
//!
//! # KPI
//!
//! `AllocationKpi` computes coverage and fairness metrics: fill rate,
//! unfilled units, faculty below/over target, and load spread.

mod allocator;
mod chunking;
mod counters;
mod eligibility;
mod kpi;
mod overview;
mod verify;

pub use allocator::{allocate, DutyAllocator};
pub use chunking::chunk_rooms;
pub use counters::{CounterTable, DutyCounter};
pub use eligibility::{
    filter_eligible, find_eligible, ladder, EligibilityQuery, LadderMatch, Relaxation,
    RelaxationStep, RegularHistory,
};
pub use kpi::AllocationKpi;
pub use overview::build_overview;
pub use verify::verify_assignments;
