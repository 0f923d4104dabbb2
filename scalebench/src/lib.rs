#![warn(missing_docs)]
//! # ScaleBench
//!
//! Measures how the per-operation latency of competing container
//! implementations changes as the container grows.
//!
//! ScaleBench provides:
//! - **Size Sequencing**: linear or geometric sampling across a size range or named tier
//! - **Isolated Trials**: setup and teardown run outside the timer, teardown on every exit path
//! - **Fault Tolerance**: failing trials are excluded from the mean; fully failed sizes become gaps
//! - **Streaming Results**: one `SampleSet` per (task, implementation) handed to a `ResultSink`
//! - **High-Precision Timing**: RDTSCP/CNTVCT cycle counting with Instant fallback
//!
//! ## Quick Start
//!
//! ```no_run
//! use scalebench::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     scalebench::init_logging(false);
//!
//!     let mut catalog = Catalog::new().task(
//!         Task::new("Sequence::push", Strategy::Exponential, SizeTier::Small)
//!             .implementation(
//!                 "vec",
//!                 fixture(|n| Vec::with_capacity(n), |v: &mut Vec<usize>, i| v.push(i), drop),
//!             ),
//!     );
//!
//!     let report = scalebench::run(&mut catalog)?;
//!     for set in &report.sample_sets {
//!         for (size, metrics) in set.measured() {
//!             println!("{} {} {size} {:.1}ns", set.task(), set.implementation(), metrics.mean_ns);
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Custom Sinks
//!
//! ```ignore
//! let orchestrator = BenchmarkOrchestrator::new(ExecutionConfig::default());
//! orchestrator.run(&mut catalog, &mut FnSink(|set: SampleSet| plot(set)))?;
//! ```

// Re-export core types
pub use scalebench_core::{
    Catalog, ConfigError, Elapsed, Fixture, HAS_CYCLE_COUNTER, HookError, Hooks, Implementation,
    Measurement, RangeSpec, SizeRange, SizeTier, Strategy, Task, TierTable, Timer, TrialError,
    TrialOutcome, fixture, pin_to_cpu, run_trial, sequence, try_fixture,
};

// Re-export stats
pub use scalebench_stats::{SummaryStatistics, compute_percentile, compute_summary};

// Re-export report types
pub use scalebench_report::{
    FailureInfo, Report, ReportMeta, ReportSummary, SampleMetrics, SampleOutcome, SamplePoint,
    SampleSet, SampleSetBuilder, generate_json_report, parse_json_report,
};

// Re-export runner
pub use scalebench_runner::{
    AggregateFailure, AggregatedSample, BenchmarkOrchestrator, ExecutionConfig, FnSink,
    ResultSink, RunSummary, SampleAggregator, ScaleConfig, build_plan, init_logging, run,
    run_catalog, write_report,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        BenchmarkOrchestrator, Catalog, ExecutionConfig, FnSink, HookError, Hooks, Measurement,
        ResultSink, SampleSet, SizeRange, SizeTier, Strategy, Task, fixture, try_fixture,
    };
}
