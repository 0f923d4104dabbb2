//! Benchmark Orchestration
//!
//! Walks the catalog task by task, implementation by implementation and
//! size by size, and emits one [`SampleSet`] per (task, implementation).
//!
//! ## Data Flow
//!
//! ```text
//! Catalog + ExecutionConfig
//!        │
//!        ▼
//!   build_plan  (fails before any measurement)
//!        │
//!        ▼
//! ┌──────────────────┐
//! │ for task         │
//! │  for impl        │  SampleAggregator per size
//! │   for size       │
//! └────────┬─────────┘
//!          │
//!          ▼
//!   ResultSink::accept(SampleSet)
//! ```
//!
//! [`SampleSet`]: scalebench_report::SampleSet

use super::aggregation::SampleAggregator;
use super::sink::ResultSink;
use crate::config::ScaleConfig;
use crate::planner::{PlannedTask, build_plan};
use indicatif::{ProgressBar, ProgressStyle};
use scalebench_core::{Catalog, ConfigError, Task, TierTable, pin_to_cpu};
use scalebench_report::{SampleOutcome, SampleSetBuilder};
use std::time::{Duration, Instant};

/// Configuration for a run
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionConfig {
    /// Trials averaged per size
    pub trials: usize,
    /// Maximum sizes sampled per task
    pub samples: usize,
    /// Untimed trials before each size
    pub warmup_trials: usize,
    /// Ranges for tier-based tasks
    pub tiers: TierTable,
    /// Core to pin the measuring thread to
    pub pin_cpu: Option<usize>,
    /// Show a progress bar
    pub progress: bool,
    /// Only run tasks whose name matches this regex
    pub filter: Option<String>,
}

impl ExecutionConfig {
    /// Layer file configuration over the defaults.
    pub fn from_config(config: &ScaleConfig) -> Self {
        Self {
            trials: config.runner.trials,
            samples: config.runner.samples,
            warmup_trials: config.runner.warmup_trials,
            tiers: config.tiers,
            pin_cpu: config.runner.pin_cpu,
            progress: config.runner.progress,
            filter: config.runner.filter.clone(),
        }
    }

    /// Trials and samples for `task`, per-task overrides first.
    pub fn resolve_for_task(&self, task: &Task) -> (usize, usize) {
        (
            task.trials.unwrap_or(self.trials),
            task.samples.unwrap_or(self.samples),
        )
    }
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self::from_config(&ScaleConfig::default())
    }
}

/// Totals for a finished run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    /// Tasks measured
    pub tasks: usize,
    /// Sample sets emitted
    pub sample_sets: usize,
    /// Sizes measured successfully
    pub measured_points: usize,
    /// Sizes where every trial failed
    pub failed_points: usize,
    /// Wall-clock duration of the run
    pub duration: Duration,
}

/// Runs a catalog and streams sample sets to a sink
#[derive(Debug, Clone, Default)]
pub struct BenchmarkOrchestrator {
    config: ExecutionConfig,
}

impl BenchmarkOrchestrator {
    /// Create an orchestrator with `config`.
    pub fn new(config: ExecutionConfig) -> Self {
        Self { config }
    }

    /// Configuration in use
    pub fn config(&self) -> &ExecutionConfig {
        &self.config
    }

    /// Measure every selected task of `catalog`.
    ///
    /// The catalog is validated as a whole before the first trial. Sizes
    /// that fail entirely become gaps and the run continues.
    pub fn run<S>(&self, catalog: &mut Catalog, sink: &mut S) -> Result<RunSummary, ConfigError>
    where
        S: ResultSink + ?Sized,
    {
        let start = Instant::now();
        let plan = build_plan(catalog, &self.config)?;

        if let Some(cpu) = self.config.pin_cpu {
            match pin_to_cpu(cpu) {
                Ok(()) => tracing::debug!(cpu, "pinned measuring thread"),
                Err(e) => tracing::warn!(cpu, error = %e, "failed to pin measuring thread"),
            }
        }

        let pb = self.progress_bar(plan.total_points() as u64);
        let mut summary = RunSummary::default();

        for planned in &plan.tasks {
            let Some(task) = catalog.tasks_mut().get_mut(planned.index) else {
                continue;
            };
            self.run_task(task, planned, &pb, sink, &mut summary);
        }

        pb.finish_with_message("Complete");
        summary.duration = start.elapsed();

        tracing::info!(
            tasks = summary.tasks,
            sample_sets = summary.sample_sets,
            failed_points = summary.failed_points,
            duration_ms = summary.duration.as_millis() as u64,
            "run complete"
        );
        Ok(summary)
    }

    fn run_task<S>(
        &self,
        task: &mut Task,
        planned: &PlannedTask,
        pb: &ProgressBar,
        sink: &mut S,
        summary: &mut RunSummary,
    ) where
        S: ResultSink + ?Sized,
    {
        tracing::info!(
            task = %task.name,
            lower = planned.range.lower(),
            upper = planned.range.upper(),
            sizes = planned.sizes.len(),
            implementations = planned.implementations,
            "running task"
        );

        let aggregator = SampleAggregator::new(planned.trials, self.config.warmup_trials);
        summary.tasks += 1;

        for implementation in &mut task.implementations {
            pb.set_message(format!("{} [{}]", task.name, implementation.label));

            let mut builder = SampleSetBuilder::new(
                task.name.as_str(),
                implementation.label.as_str(),
                task.strategy,
                task.measurement,
                planned.range,
            );

            for &size in &planned.sizes {
                let outcome: SampleOutcome =
                    match aggregator.aggregate(implementation.hooks.as_mut(), size, task.measurement)
                    {
                        Ok(sample) => {
                            tracing::debug!(
                                task = %task.name,
                                implementation = %implementation.label,
                                size,
                                mean_ns = sample.mean_ns(),
                                failures = sample.failures,
                                "sampled"
                            );
                            summary.measured_points += 1;
                            sample.into()
                        }
                        Err(failure) => {
                            tracing::warn!(
                                task = %task.name,
                                implementation = %implementation.label,
                                size,
                                error = %failure.last_error,
                                "every trial failed, recording gap"
                            );
                            summary.failed_points += 1;
                            failure.into()
                        }
                    };

                let recorded = builder.record(size, outcome);
                debug_assert!(recorded.is_ok(), "planned sizes must ascend");
                pb.inc(1);
            }

            sink.accept(builder.finish());
            summary.sample_sets += 1;
        }
    }

    fn progress_bar(&self, len: u64) -> ProgressBar {
        if !self.config.progress {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(len);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb
    }
}
