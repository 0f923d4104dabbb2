//! Report Data Structures

use chrono::{DateTime, Utc};
use scalebench_core::{Measurement, SizeRange, Strategy};
use scalebench_stats::SummaryStatistics;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Complete run report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub meta: ReportMeta,
    pub sample_sets: Vec<SampleSet>,
    pub summary: ReportSummary,
}

impl Report {
    /// Assemble a report and derive its summary from the sample sets.
    pub fn new(meta: ReportMeta, sample_sets: Vec<SampleSet>, total_duration_ms: f64) -> Self {
        let summary = ReportSummary::from_sample_sets(&sample_sets, total_duration_ms);
        Self {
            meta,
            sample_sets,
            summary,
        }
    }

    /// Sample sets belonging to one task, in implementation order.
    pub fn task<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a SampleSet> + 'a {
        self.sample_sets.iter().filter(move |s| s.task() == name)
    }
}

/// Report metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMeta {
    pub schema_version: u32,
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub system: SystemInfo,
    pub config: ReportConfig,
}

/// Execution parameters captured in report metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    pub trials: usize,
    pub samples: usize,
    pub warmup_trials: usize,
    pub pinned_cpu: Option<usize>,
}

/// System information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemInfo {
    pub os: String,
    pub arch: String,
    pub cpu: String,
    pub cpu_cores: u32,
    pub memory_gb: f64,
}

/// Measurements of one implementation under one task.
///
/// Points are in strictly ascending size order, matching the order the
/// sizes were sampled in. Failed sizes stay in the sequence as gaps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSampleSet")]
pub struct SampleSet {
    task: String,
    implementation: String,
    strategy: Strategy,
    measurement: Measurement,
    range: SizeRange,
    points: Vec<SamplePoint>,
}

impl SampleSet {
    /// Task name
    pub fn task(&self) -> &str {
        &self.task
    }

    /// Implementation label
    pub fn implementation(&self) -> &str {
        &self.implementation
    }

    /// Size spacing used
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Point or amortized measurement
    pub fn measurement(&self) -> Measurement {
        self.measurement
    }

    /// Resolved size range
    pub fn range(&self) -> SizeRange {
        self.range
    }

    /// All points, gaps included
    pub fn points(&self) -> &[SamplePoint] {
        &self.points
    }

    /// Sizes in sample order
    pub fn sizes(&self) -> impl Iterator<Item = usize> + '_ {
        self.points.iter().map(|p| p.size)
    }

    /// Successfully measured points as `(size, metrics)`
    pub fn measured(&self) -> impl Iterator<Item = (usize, &SampleMetrics)> + '_ {
        self.points.iter().filter_map(|p| match &p.outcome {
            SampleOutcome::Measured(m) => Some((p.size, m)),
            SampleOutcome::Failed(_) => None,
        })
    }

    /// Sizes that could not be measured
    pub fn gaps(&self) -> impl Iterator<Item = (usize, &FailureInfo)> + '_ {
        self.points.iter().filter_map(|p| match &p.outcome {
            SampleOutcome::Failed(f) => Some((p.size, f)),
            SampleOutcome::Measured(_) => None,
        })
    }

    /// Number of gaps
    pub fn gap_count(&self) -> usize {
        self.gaps().count()
    }

    /// Failed trials across every point, measured or not
    pub fn failed_trials(&self) -> usize {
        self.points.iter().map(|p| p.outcome.failures()).sum()
    }
}

/// Unchecked wire form of a [`SampleSet`]
#[derive(Deserialize)]
struct RawSampleSet {
    task: String,
    implementation: String,
    strategy: Strategy,
    measurement: Measurement,
    range: SizeRange,
    points: Vec<SamplePoint>,
}

impl TryFrom<RawSampleSet> for SampleSet {
    type Error = OutOfOrder;

    fn try_from(raw: RawSampleSet) -> Result<Self, Self::Error> {
        let mut builder = SampleSetBuilder::new(
            raw.task,
            raw.implementation,
            raw.strategy,
            raw.measurement,
            raw.range,
        );
        for point in raw.points {
            builder.record(point.size, point.outcome)?;
        }
        Ok(builder.finish())
    }
}

/// Incremental construction of a [`SampleSet`].
#[derive(Debug)]
pub struct SampleSetBuilder {
    set: SampleSet,
}

/// Point appended out of size order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("size {size} recorded after size {previous}; points must be strictly ascending")]
pub struct OutOfOrder {
    pub size: usize,
    pub previous: usize,
}

impl SampleSetBuilder {
    /// Start an empty set.
    pub fn new(
        task: impl Into<String>,
        implementation: impl Into<String>,
        strategy: Strategy,
        measurement: Measurement,
        range: SizeRange,
    ) -> Self {
        Self {
            set: SampleSet {
                task: task.into(),
                implementation: implementation.into(),
                strategy,
                measurement,
                range,
                points: Vec::new(),
            },
        }
    }

    /// Append the outcome at `size`.
    pub fn record(&mut self, size: usize, outcome: SampleOutcome) -> Result<(), OutOfOrder> {
        if let Some(last) = self.set.points.last() {
            if size <= last.size {
                return Err(OutOfOrder {
                    size,
                    previous: last.size,
                });
            }
        }
        self.set.points.push(SamplePoint { size, outcome });
        Ok(())
    }

    /// Number of points recorded so far
    pub fn len(&self) -> usize {
        self.set.points.len()
    }

    /// Whether no point has been recorded
    pub fn is_empty(&self) -> bool {
        self.set.points.is_empty()
    }

    /// Seal the set.
    pub fn finish(self) -> SampleSet {
        self.set
    }
}

/// One sampled size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplePoint {
    pub size: usize,
    pub outcome: SampleOutcome,
}

/// Result at one size: a measurement, or a gap when every trial failed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SampleOutcome {
    Measured(SampleMetrics),
    Failed(FailureInfo),
}

impl SampleOutcome {
    /// Failed trials at this size
    pub fn failures(&self) -> usize {
        match self {
            SampleOutcome::Measured(m) => m.failures,
            SampleOutcome::Failed(f) => f.failures,
        }
    }

    /// Whether this point holds a measurement
    pub fn is_measured(&self) -> bool {
        matches!(self, SampleOutcome::Measured(_))
    }
}

/// Per-operation latency at one size, averaged over successful trials
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleMetrics {
    pub mean_ns: f64,
    pub median_ns: f64,
    pub std_dev_ns: f64,
    pub min_ns: f64,
    pub max_ns: f64,
    /// 0 on platforms without a cycle counter
    pub mean_cycles: f64,
    /// Successful trials contributing to the mean
    pub trials: usize,
    /// Trials that failed and were left out of the mean
    pub failures: usize,
}

impl SampleMetrics {
    /// Build metrics from latency statistics.
    pub fn from_summary(latency: &SummaryStatistics, mean_cycles: f64, failures: usize) -> Self {
        Self {
            mean_ns: latency.mean,
            median_ns: latency.median,
            std_dev_ns: latency.std_dev,
            min_ns: latency.min,
            max_ns: latency.max,
            mean_cycles,
            trials: latency.sample_count,
            failures,
        }
    }
}

/// Failure information for a gap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureInfo {
    /// Trials attempted at this size
    pub trials: usize,
    /// Trials that failed (equals `trials` for a gap)
    pub failures: usize,
    /// Message of the last failing trial
    pub message: String,
}

/// Report summary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub tasks: usize,
    pub sample_sets: usize,
    pub measured_points: usize,
    pub failed_points: usize,
    pub failed_trials: usize,
    pub total_duration_ms: f64,
}

impl ReportSummary {
    /// Tally sample sets.
    pub fn from_sample_sets(sets: &[SampleSet], total_duration_ms: f64) -> Self {
        let mut tasks: Vec<&str> = sets.iter().map(|s| s.task()).collect();
        tasks.dedup();

        let failed_points: usize = sets.iter().map(SampleSet::gap_count).sum();
        let total_points: usize = sets.iter().map(|s| s.points().len()).sum();

        Self {
            tasks: tasks.len(),
            sample_sets: sets.len(),
            measured_points: total_points - failed_points,
            failed_points,
            failed_trials: sets.iter().map(SampleSet::failed_trials).sum(),
            total_duration_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(mean: f64, failures: usize) -> SampleOutcome {
        SampleOutcome::Measured(SampleMetrics {
            mean_ns: mean,
            median_ns: mean,
            std_dev_ns: 0.0,
            min_ns: mean,
            max_ns: mean,
            mean_cycles: 0.0,
            trials: 3 - failures,
            failures,
        })
    }

    fn gap(trials: usize) -> SampleOutcome {
        SampleOutcome::Failed(FailureInfo {
            trials,
            failures: trials,
            message: "operation failed at index 0: empty".to_string(),
        })
    }

    fn builder(task: &str, label: &str) -> SampleSetBuilder {
        SampleSetBuilder::new(
            task,
            label,
            Strategy::Incremental,
            Measurement::Amortized,
            SizeRange::new(1, 5).unwrap(),
        )
    }

    #[test]
    fn test_builder_enforces_ascending_sizes() {
        let mut b = builder("Stack::pop", "vec");
        b.record(1, metrics(10.0, 0)).unwrap();
        b.record(3, metrics(12.0, 0)).unwrap();

        assert_eq!(
            b.record(3, metrics(12.0, 0)),
            Err(OutOfOrder {
                size: 3,
                previous: 3
            })
        );
        assert!(b.record(2, metrics(11.0, 0)).is_err());
        assert_eq!(b.len(), 2);
    }

    #[test]
    fn test_gaps_are_distinct_from_zero() {
        let mut b = builder("Stack::pop", "vec");
        b.record(1, metrics(0.0, 0)).unwrap();
        b.record(2, gap(3)).unwrap();
        b.record(3, metrics(5.0, 1)).unwrap();
        let set = b.finish();

        assert_eq!(set.sizes().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(set.measured().map(|(s, _)| s).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(set.gaps().map(|(s, _)| s).collect::<Vec<_>>(), vec![2]);
        assert_eq!(set.failed_trials(), 4);
    }

    #[test]
    fn test_summary_tallies() {
        let mut a = builder("Stack::pop", "vec");
        a.record(1, metrics(1.0, 0)).unwrap();
        a.record(2, gap(3)).unwrap();

        let mut b = builder("Stack::pop", "deque");
        b.record(1, metrics(1.0, 2)).unwrap();

        let mut c = builder("Map::put", "btree");
        c.record(1, metrics(1.0, 0)).unwrap();

        let sets = vec![a.finish(), b.finish(), c.finish()];
        let summary = ReportSummary::from_sample_sets(&sets, 12.5);

        assert_eq!(summary.tasks, 2);
        assert_eq!(summary.sample_sets, 3);
        assert_eq!(summary.measured_points, 3);
        assert_eq!(summary.failed_points, 1);
        assert_eq!(summary.failed_trials, 5);
    }
}
