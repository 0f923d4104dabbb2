#![warn(missing_docs)]
//! ScaleBench Core - Trial Runtime
//!
//! This crate provides the leaf components of the measurement engine:
//! - `Hooks` capability trait and closure-backed `Fixture`s
//! - Task catalog data model (`Task`, `Strategy`, `SizeRange`, tiers)
//! - Size sequencing across a range (linear or geometric)
//! - Trial execution with setup/teardown kept outside the timer
//! - High-precision timing (RDTSCP/CNTVCT with Instant) and CPU pinning

mod error;
mod hooks;
mod measure;
mod sequence;
mod task;
mod trial;

pub use error::{ConfigError, HookError, TrialError};
pub use hooks::{Fixture, Hooks, fixture, try_fixture};
/// Whether this platform provides hardware cycle counters (x86_64 RDTSCP or AArch64 CNTVCT_EL0).
/// When `false`, cycle counts are reported as 0 and only wall-clock nanoseconds are available.
pub use measure::HAS_CYCLE_COUNTER;
pub use measure::{Elapsed, Timer, pin_to_cpu};
pub use sequence::sequence;
pub use task::{
    Catalog, Implementation, Measurement, RangeSpec, SizeRange, SizeTier, Strategy, Task,
    TierTable,
};
pub use trial::{TrialOutcome, run_trial};

/// Default number of trials averaged per sampled size
pub const DEFAULT_TRIALS: usize = 20;

/// Default maximum number of sizes sampled per task
pub const DEFAULT_SAMPLES: usize = 1000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(DEFAULT_TRIALS, 20);
        assert_eq!(DEFAULT_SAMPLES, 1000);
    }
}
