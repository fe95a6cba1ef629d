use std::io::Read;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use duty_allocator::models::{AssignmentResult, ExamStructure, Faculty, UnavailableFaculty};
use duty_allocator::{logging, AllocationConfig, AllocationKpi, DutyAllocator};

const USAGE: &str = "usage: duty-allocator [REQUEST.json | -] [--kpi]";

/// Allocation request read from a file or stdin.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AllocationRequest {
    faculty: Vec<Faculty>,
    exam_structure: ExamStructure,
    #[serde(default)]
    unavailability: Vec<UnavailableFaculty>,
    #[serde(default)]
    config: AllocationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Report<'a> {
    result: &'a AssignmentResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    kpi: Option<KpiReport>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct KpiReport {
    fill_rate: f64,
    unfilled_units: usize,
    faculty_below_target: usize,
    faculty_over_target: usize,
    load_spread: usize,
}

impl From<&AllocationKpi> for KpiReport {
    fn from(kpi: &AllocationKpi) -> Self {
        Self {
            fill_rate: kpi.fill_rate,
            unfilled_units: kpi.unfilled_units,
            faculty_below_target: kpi.below_target.total(),
            faculty_over_target: kpi.over_target.total(),
            load_spread: kpi.load_spread(),
        }
    }
}

fn main() -> Result<()> {
    logging::init();

    let mut path: Option<String> = None;
    let mut with_kpi = false;
    for arg in std::env::args().skip(1) {
        if arg == "--kpi" {
            with_kpi = true;
        } else if arg == "-h" || arg == "--help" {
            println!("{USAGE}");
            return Ok(());
        } else if path.is_none() {
            path = Some(arg);
        } else {
            bail!("unexpected argument '{arg}'\n{USAGE}");
        }
    }

    let raw = match path.as_deref() {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read request from stdin")?;
            buf
        }
        Some(file) => std::fs::read_to_string(file)
            .with_context(|| format!("failed to read request file {file}"))?,
    };

    let request: AllocationRequest =
        serde_json::from_str(&raw).context("failed to parse allocation request")?;
    info!(
        faculty = request.faculty.len(),
        slots = request.exam_structure.duty_slots.len(),
        "request loaded"
    );

    let allocator = DutyAllocator::with_config(request.config);
    let result = allocator.allocate(
        &request.faculty,
        &request.exam_structure,
        &request.unavailability,
    );

    let kpi = with_kpi.then(|| {
        KpiReport::from(&AllocationKpi::calculate(
            &result,
            &request.faculty,
            &request.exam_structure,
        ))
    });

    let report = Report {
        result: &result,
        kpi,
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("failed to serialise result")?
    );

    if !result.success {
        bail!("allocation refused: {}", result.errors.join("; "));
    }
    Ok(())
}
