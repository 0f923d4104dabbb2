//! Benchmark Planner
//!
//! Validates the catalog and builds the execution plan before any
//! measurement starts. Every configuration problem in the catalog is a
//! hard error here, so a run never stops halfway on a typo.
//!
//! Filtering options:
//! - Regex pattern matching on task name
//!
//! Ordering: tasks keep catalog order and implementations keep registration
//! order, so repeated runs enumerate identically.

use crate::executor::ExecutionConfig;
use fxhash::FxHashSet;
use regex::Regex;
use scalebench_core::{Catalog, ConfigError, SizeRange, Task, sequence};

/// Wildcard task name used for run-wide settings in errors
const GLOBAL: &str = "*";

/// Execution plan for one catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionPlan {
    /// Selected tasks in catalog order
    pub tasks: Vec<PlannedTask>,
}

impl ExecutionPlan {
    /// Number of (implementation, size) points the plan will measure
    pub fn total_points(&self) -> usize {
        self.tasks
            .iter()
            .map(|t| t.sizes.len() * t.implementations)
            .sum()
    }

    /// Whether nothing will be measured
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// Resolved settings for one task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedTask {
    /// Position of the task in the catalog
    pub index: usize,
    /// Task name
    pub name: String,
    /// Range after tier resolution
    pub range: SizeRange,
    /// Sizes to measure, ascending
    pub sizes: Vec<usize>,
    /// Trials per size
    pub trials: usize,
    /// Number of implementations
    pub implementations: usize,
}

/// Validate `catalog` and build its execution plan.
pub fn build_plan(catalog: &Catalog, config: &ExecutionConfig) -> Result<ExecutionPlan, ConfigError> {
    if config.trials == 0 {
        return Err(ConfigError::ZeroTrials {
            task: GLOBAL.to_string(),
        });
    }
    if config.samples == 0 {
        return Err(ConfigError::ZeroSamples {
            task: GLOBAL.to_string(),
        });
    }

    let filter = config
        .filter
        .as_deref()
        .map(|pattern| {
            Regex::new(pattern).map_err(|e| ConfigError::InvalidFilter {
                pattern: pattern.to_string(),
                message: e.to_string(),
            })
        })
        .transpose()?;

    let mut names = FxHashSet::default();
    let mut tasks = Vec::new();

    for (index, task) in catalog.tasks().iter().enumerate() {
        if !names.insert(task.name.as_str()) {
            return Err(ConfigError::DuplicateTask {
                task: task.name.clone(),
            });
        }
        validate_task(task)?;

        // Validate everything, measure only what matches
        if let Some(re) = &filter {
            if !re.is_match(&task.name) {
                continue;
            }
        }

        let (trials, samples) = config.resolve_for_task(task);
        let range = task.range.resolve(&config.tiers);

        tasks.push(PlannedTask {
            index,
            name: task.name.clone(),
            range,
            sizes: sequence(range, task.strategy, samples),
            trials,
            implementations: task.implementations.len(),
        });
    }

    Ok(ExecutionPlan { tasks })
}

fn validate_task(task: &Task) -> Result<(), ConfigError> {
    if task.implementations.is_empty() {
        return Err(ConfigError::EmptyTask {
            task: task.name.clone(),
        });
    }
    if task.trials == Some(0) {
        return Err(ConfigError::ZeroTrials {
            task: task.name.clone(),
        });
    }
    if task.samples == Some(0) {
        return Err(ConfigError::ZeroSamples {
            task: task.name.clone(),
        });
    }

    let mut labels = FxHashSet::default();
    for label in task.labels() {
        if !labels.insert(label) {
            return Err(ConfigError::DuplicateImplementation {
                task: task.name.clone(),
                label: label.to_string(),
            });
        }
    }

    Ok(())
}
