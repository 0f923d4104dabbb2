//! Error Taxonomy
//!
//! Configuration problems are fatal and reported before any measurement.
//! Trial problems are local: the trial is counted as failed and the run
//! continues with the next trial.

use thiserror::Error;

/// Error raised by an implementation's hooks.
///
/// Hooks surface failures as plain messages; the executor attaches the
/// phase and index that produced them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct HookError {
    message: String,
}

impl HookError {
    /// Create a hook error from any displayable message.
    pub fn msg(message: impl std::fmt::Display) -> Self {
        Self {
            message: message.to_string(),
        }
    }

    /// The failure message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<&str> for HookError {
    fn from(message: &str) -> Self {
        Self::msg(message)
    }
}

impl From<String> for HookError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

/// Failure of a single trial.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrialError {
    /// `initialize` returned an error or panicked
    #[error("setup failed at size {size}: {message}")]
    Setup {
        /// Size the structure was being prepared for
        size: usize,
        /// Failure message
        message: String,
    },
    /// `step` returned an error or panicked mid-measurement
    #[error("operation failed at index {index}: {message}")]
    Operation {
        /// Iteration index passed to the failing step
        index: usize,
        /// Failure message
        message: String,
    },
    /// `dispose` panicked
    #[error("teardown failed: {message}")]
    Teardown {
        /// Failure message
        message: String,
    },
}

/// Malformed catalog or execution parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Range with `lower > upper`
    #[error("invalid size range [{lower}, {upper}]: lower bound exceeds upper bound")]
    InvertedRange {
        /// Lower bound
        lower: usize,
        /// Upper bound
        upper: usize,
    },
    /// Range starting at zero
    #[error("invalid size range [{lower}, {upper}]: sizes must be positive")]
    ZeroSize {
        /// Lower bound
        lower: usize,
        /// Upper bound
        upper: usize,
    },
    /// Task with no implementations to compare
    #[error("task '{task}' has no implementations")]
    EmptyTask {
        /// Task name
        task: String,
    },
    /// Two tasks share a name
    #[error("duplicate task name '{task}'")]
    DuplicateTask {
        /// Task name
        task: String,
    },
    /// Two implementations of one task share a label
    #[error("task '{task}' registers implementation '{label}' more than once")]
    DuplicateImplementation {
        /// Task name
        task: String,
        /// Implementation label
        label: String,
    },
    /// TRIALS must be at least one
    #[error("trial count must be positive (task '{task}')")]
    ZeroTrials {
        /// Task name, or `*` for the global setting
        task: String,
    },
    /// SAMPLES must be at least one
    #[error("sample count must be positive (task '{task}')")]
    ZeroSamples {
        /// Task name, or `*` for the global setting
        task: String,
    },
    /// Task filter is not a valid regular expression
    #[error("invalid task filter '{pattern}': {message}")]
    InvalidFilter {
        /// The rejected pattern
        pattern: String,
        /// Parser message
        message: String,
    },
}

/// Extract a readable message from a caught panic payload.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
