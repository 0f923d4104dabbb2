#![warn(missing_docs)]
//! ScaleBench Report - Result Records
//!
//! Defines the records the orchestrator emits and the report envelope
//! around them:
//! - `SampleSet`: ordered (size, outcome) points for one task/implementation
//! - `SampleOutcome`: averaged latency, or a gap when every trial failed
//! - `Report`: sample sets plus run metadata and a summary
//! - JSON output (machine-readable)

mod json;
mod report;

pub use json::{generate_json_report, parse_json_report};
pub use report::{
    FailureInfo, OutOfOrder, Report, ReportConfig, ReportMeta, ReportSummary, SampleMetrics,
    SampleOutcome, SamplePoint, SampleSet, SampleSetBuilder, SystemInfo,
};

/// Version of the JSON report layout
pub const SCHEMA_VERSION: u32 = 1;
