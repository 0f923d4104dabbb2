//! Sample Aggregation
//!
//! Repeats the trial at one size and reduces the successful trials to the
//! mean per-operation latency. Failed trials are left out of the mean and
//! counted; a size where every trial failed becomes an [`AggregateFailure`]
//! rather than a zero.

use scalebench_core::{Hooks, Measurement, TrialError, TrialOutcome, run_trial};
use scalebench_report::{FailureInfo, SampleMetrics, SampleOutcome};
use scalebench_stats::{SummaryStatistics, compute_summary};
use thiserror::Error;

/// Result of aggregating the trials at one size
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedSample {
    /// Size the trials ran at
    pub size: usize,
    /// Per-operation latency across successful trials (ns)
    pub latency: SummaryStatistics,
    /// Mean per-operation cycles (0 without a cycle counter)
    pub mean_cycles: f64,
    /// Trials that failed
    pub failures: usize,
}

impl AggregatedSample {
    /// Representative per-operation latency in nanoseconds
    pub fn mean_ns(&self) -> f64 {
        self.latency.mean
    }
}

/// Every trial at one size failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("all {trials} trials failed at size {size}: {last_error}")]
pub struct AggregateFailure {
    /// Size the trials ran at
    pub size: usize,
    /// Trials attempted
    pub trials: usize,
    /// Error from the last trial
    pub last_error: TrialError,
}

impl From<AggregatedSample> for SampleOutcome {
    fn from(sample: AggregatedSample) -> Self {
        SampleOutcome::Measured(SampleMetrics::from_summary(
            &sample.latency,
            sample.mean_cycles,
            sample.failures,
        ))
    }
}

impl From<AggregateFailure> for SampleOutcome {
    fn from(failure: AggregateFailure) -> Self {
        SampleOutcome::Failed(FailureInfo {
            trials: failure.trials,
            failures: failure.trials,
            message: failure.last_error.to_string(),
        })
    }
}

/// Runs the configured number of trials at a size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleAggregator {
    trials: usize,
    warmup_trials: usize,
}

impl SampleAggregator {
    /// Create an aggregator. A trial count of zero is raised to one.
    pub fn new(trials: usize, warmup_trials: usize) -> Self {
        Self {
            trials: trials.max(1),
            warmup_trials,
        }
    }

    /// Measured trials per size
    pub fn trials(&self) -> usize {
        self.trials
    }

    /// Run the trials for `hooks` at `size` and reduce them.
    pub fn aggregate<H>(
        &self,
        hooks: &mut H,
        size: usize,
        measurement: Measurement,
    ) -> Result<AggregatedSample, AggregateFailure>
    where
        H: Hooks + ?Sized,
    {
        for _ in 0..self.warmup_trials {
            if let Err(e) = run_trial(hooks, size, measurement) {
                tracing::debug!(size, error = %e, "warmup trial failed");
            }
        }

        let outcomes: Vec<_> = (0..self.trials)
            .map(|_| run_trial(hooks, size, measurement))
            .collect();
        reduce_trials(size, outcomes)
    }
}

/// Reduce trial results at one size to a sample.
///
/// The latency is the mean per-operation time over the successful trials.
pub fn reduce_trials<I>(size: usize, results: I) -> Result<AggregatedSample, AggregateFailure>
where
    I: IntoIterator<Item = Result<TrialOutcome, TrialError>>,
{
    let mut latencies = Vec::new();
    let mut cycles = 0.0;
    let mut trials = 0usize;
    let mut last_error = None;

    for result in results {
        trials += 1;
        match result {
            Ok(outcome) => {
                latencies.push(outcome.per_operation_ns());
                cycles += outcome.per_operation_cycles();
            }
            Err(e) => {
                tracing::debug!(size, error = %e, "trial failed");
                last_error = Some(e);
            }
        }
    }

    match compute_summary(&latencies) {
        Some(latency) => Ok(AggregatedSample {
            size,
            mean_cycles: cycles / latencies.len() as f64,
            failures: trials - latencies.len(),
            latency,
        }),
        None => Err(AggregateFailure {
            size,
            trials,
            last_error: last_error.unwrap_or(TrialError::Operation {
                index: 0,
                message: "no trials were run".to_string(),
            }),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scalebench_core::{Elapsed, HookError, fixture, try_fixture};
    use std::cell::Cell;
    use std::rc::Rc;

    fn outcome(nanos: u64, operations: usize) -> Result<TrialOutcome, TrialError> {
        Ok(TrialOutcome {
            size: operations,
            operations,
            elapsed: Elapsed { nanos, cycles: 0 },
        })
    }

    fn failed(index: usize) -> Result<TrialOutcome, TrialError> {
        Err(TrialError::Operation {
            index,
            message: "boom".to_string(),
        })
    }

    #[test]
    fn test_mean_over_successful_trials() {
        let sample = reduce_trials(10, vec![outcome(100, 10), outcome(300, 10), failed(2)]).unwrap();

        assert_eq!(sample.size, 10);
        assert!((sample.mean_ns() - 20.0).abs() < f64::EPSILON);
        assert_eq!(sample.latency.sample_count, 2);
        assert_eq!(sample.failures, 1);
    }

    #[test]
    fn test_all_failed_is_not_zero() {
        let err = reduce_trials(8, vec![failed(0), failed(5)]).unwrap_err();
        assert_eq!(err.size, 8);
        assert_eq!(err.trials, 2);
        assert_eq!(
            err.last_error,
            TrialError::Operation {
                index: 5,
                message: "boom".to_string()
            }
        );

        match SampleOutcome::from(err) {
            SampleOutcome::Failed(info) => {
                assert_eq!(info.failures, 2);
                assert!(info.message.contains("index 5"));
            }
            other => panic!("expected a gap, got {other:?}"),
        }
    }

    #[test]
    fn test_no_trials_is_a_failure() {
        assert!(reduce_trials(4, Vec::new()).is_err());
    }

    #[test]
    fn test_aggregate_runs_each_trial() {
        let setups = Rc::new(Cell::new(0usize));
        let seen = setups.clone();

        let mut hooks = fixture(
            move |n| {
                seen.set(seen.get() + 1);
                Vec::<usize>::with_capacity(n)
            },
            |v: &mut Vec<usize>, i| v.push(i),
            drop,
        );

        let aggregator = SampleAggregator::new(7, 2);
        let sample = aggregator
            .aggregate(&mut hooks, 16, Measurement::Amortized)
            .unwrap();

        assert_eq!(setups.get(), 9);
        assert_eq!(sample.latency.sample_count, 7);
        assert_eq!(sample.failures, 0);
        assert!(sample.mean_ns() >= 0.0);
    }

    #[test]
    fn test_partial_failures_are_excluded() {
        // Every fourth trial fails
        let trial = Rc::new(Cell::new(0usize));
        let counter = trial.clone();

        let mut hooks = try_fixture(
            move |_| {
                counter.set(counter.get() + 1);
                Ok(counter.get())
            },
            |n: &mut usize, _| {
                if *n % 4 == 0 {
                    Err(HookError::msg("flaky"))
                } else {
                    Ok(())
                }
            },
            drop,
        );

        let sample = SampleAggregator::new(20, 0)
            .aggregate(&mut hooks, 3, Measurement::Amortized)
            .unwrap();

        assert_eq!(sample.failures, 5);
        assert_eq!(sample.latency.sample_count, 15);
        assert!(matches!(SampleOutcome::from(sample), SampleOutcome::Measured(m) if m.failures == 5));
    }

    #[test]
    fn test_zero_trials_raised_to_one() {
        assert_eq!(SampleAggregator::new(0, 0).trials(), 1);
    }
}
