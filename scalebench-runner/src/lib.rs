#![warn(missing_docs)]
//! ScaleBench Runner Library
//!
//! Configuration, planning and orchestration for ScaleBench runs.
//! Use [`run`] to measure a catalog with the settings discovered from
//! `scale.toml`, or drive a [`BenchmarkOrchestrator`] directly with your
//! own [`ResultSink`].
//!
//! # Example
//!
//! ```ignore
//! use scalebench::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     scalebench::init_logging(false);
//!     let mut catalog = Catalog::new().task(
//!         Task::new("Sequence::push", Strategy::Exponential, SizeTier::Small)
//!             .implementation("vec", fixture(Vec::with_capacity, |v: &mut Vec<usize>, i| v.push(i), drop)),
//!     );
//!     let report = scalebench::run(&mut catalog)?;
//!     println!("{} sample sets", report.sample_sets.len());
//!     Ok(())
//! }
//! ```

mod config;
mod executor;
mod planner;

pub use config::*;
pub use executor::{
    AggregateFailure, AggregatedSample, BenchmarkOrchestrator, ExecutionConfig, FnSink,
    ResultSink, RunSummary, SampleAggregator, build_report_meta, reduce_trials,
};
pub use planner::{ExecutionPlan, PlannedTask, build_plan};

use anyhow::Context;
use scalebench_core::Catalog;
use scalebench_report::{Report, SampleSet, generate_json_report};
use std::path::Path;

/// Initialize `tracing` output for a run.
///
/// `RUST_LOG` takes precedence when set. Calling this more than once is
/// harmless; only the first subscriber is installed.
pub fn init_logging(verbose: bool) {
    let default = if verbose {
        "scalebench=debug"
    } else {
        "scalebench=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Run `catalog` with `config` and collect the sample sets into a report.
pub fn run_catalog(catalog: &mut Catalog, config: &ExecutionConfig) -> anyhow::Result<Report> {
    let orchestrator = BenchmarkOrchestrator::new(config.clone());
    let mut sets: Vec<SampleSet> = Vec::new();

    let summary = orchestrator
        .run(catalog, &mut sets)
        .context("invalid benchmark catalog")?;

    let meta = build_report_meta(config);
    Ok(Report::new(
        meta,
        sets,
        summary.duration.as_secs_f64() * 1000.0,
    ))
}

/// Write `report` as JSON to `path`, creating parent directories.
pub fn write_report(report: &Report, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    let json = generate_json_report(report)?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(path = %path.display(), "report written");
    Ok(())
}

/// Run `catalog` with the discovered `scale.toml` (or defaults).
///
/// The JSON report is also written to disk when `[output] save_json` is set.
pub fn run(catalog: &mut Catalog) -> anyhow::Result<Report> {
    let file_config = ScaleConfig::discover().unwrap_or_default();
    let config = ExecutionConfig::from_config(&file_config);

    let report = run_catalog(catalog, &config)?;

    if file_config.output.save_json {
        write_report(&report, &file_config.output.report_path())?;
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scalebench_core::{SizeRange, Strategy, Task, fixture};
    use scalebench_report::parse_json_report;

    fn catalog() -> Catalog {
        Catalog::new().task(
            Task::new("Sequence::push", Strategy::Incremental, SizeRange::new(1, 8).unwrap())
                .implementation(
                    "vec",
                    fixture(
                        |n| Vec::<usize>::with_capacity(n),
                        |v: &mut Vec<usize>, i| v.push(i),
                        drop,
                    ),
                ),
        )
    }

    fn quiet() -> ExecutionConfig {
        ExecutionConfig {
            trials: 2,
            samples: 4,
            progress: false,
            ..ExecutionConfig::default()
        }
    }

    #[test]
    fn test_run_catalog_builds_report() {
        let report = run_catalog(&mut catalog(), &quiet()).unwrap();

        assert_eq!(report.sample_sets.len(), 1);
        assert_eq!(report.summary.tasks, 1);
        assert_eq!(report.summary.failed_points, 0);
        assert_eq!(report.meta.config.trials, 2);
        assert_eq!(report.sample_sets[0].points().len(), 4);
    }

    #[test]
    fn test_run_catalog_rejects_invalid() {
        let mut catalog = Catalog::new().task(Task::new(
            "empty",
            Strategy::Incremental,
            SizeRange::new(1, 2).unwrap(),
        ));
        let err = run_catalog(&mut catalog, &quiet()).unwrap_err();
        assert!(format!("{err:#}").contains("no implementations"));
    }

    #[test]
    fn test_write_report_roundtrip() {
        let report = run_catalog(&mut catalog(), &quiet()).unwrap();
        let dir = std::env::temp_dir().join(format!("scalebench-test-{}", std::process::id()));
        let path = dir.join("nested").join("report.json");

        write_report(&report, &path).unwrap();
        let parsed = parse_json_report(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed.sample_sets, report.sample_sets);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_init_logging_twice() {
        init_logging(true);
        init_logging(false);
    }
}
