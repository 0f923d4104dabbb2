//! Task Catalog Data Model
//!
//! A catalog is an ordered list of tasks. Each task names the operation
//! under test, how sampled sizes are spaced, which size range to cover and
//! the competing implementations, in the order they were registered.

use crate::error::ConfigError;
use crate::hooks::Hooks;
use serde::{Deserialize, Serialize};

/// Spacing of sampled sizes between the range bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Evenly spaced sizes
    Incremental,
    /// Geometrically spaced sizes
    Exponential,
}

/// How many times `step` runs per trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Measurement {
    /// One call with `index = size`; latency is the time of that call
    Point,
    /// One call per index in `0..size`; latency is the per-call average
    #[default]
    Amortized,
}

impl Measurement {
    /// Number of `step` calls made in a trial at `size`.
    pub fn operations(self, size: usize) -> usize {
        match self {
            Measurement::Point => 1,
            Measurement::Amortized => size,
        }
    }
}

/// Inclusive range of collection sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[usize; 2]", into = "[usize; 2]")]
pub struct SizeRange {
    lower: usize,
    upper: usize,
}

impl SizeRange {
    /// Create a validated range. Sizes start at 1.
    pub fn new(lower: usize, upper: usize) -> Result<Self, ConfigError> {
        if lower > upper {
            return Err(ConfigError::InvertedRange { lower, upper });
        }
        if lower == 0 {
            return Err(ConfigError::ZeroSize { lower, upper });
        }
        Ok(Self { lower, upper })
    }

    /// Smallest size
    pub fn lower(&self) -> usize {
        self.lower
    }

    /// Largest size
    pub fn upper(&self) -> usize {
        self.upper
    }

    /// Number of integer sizes in the range
    pub fn len(&self) -> usize {
        self.upper - self.lower + 1
    }

    /// Always false; a valid range holds at least one size
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl TryFrom<[usize; 2]> for SizeRange {
    type Error = ConfigError;

    fn try_from([lower, upper]: [usize; 2]) -> Result<Self, Self::Error> {
        Self::new(lower, upper)
    }
}

impl From<SizeRange> for [usize; 2] {
    fn from(range: SizeRange) -> Self {
        [range.lower, range.upper]
    }
}

/// Named size ranges shared across tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeTier {
    /// 2^9 ..= 2^14 by default
    Small,
    /// 2^15 ..= 2^20 by default
    Medium,
    /// 2^19 ..= 2^24 by default
    Large,
}

impl SizeTier {
    /// Built-in range for this tier.
    pub fn default_range(self) -> SizeRange {
        let (lower, upper) = match self {
            SizeTier::Small => (1 << 9, 1 << 14),
            SizeTier::Medium => (1 << 15, 1 << 20),
            SizeTier::Large => (1 << 19, 1 << 24),
        };
        SizeRange { lower, upper }
    }
}

/// Tier → range lookup; defaults to the built-in tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierTable {
    /// Range used for [`SizeTier::Small`]
    pub small: SizeRange,
    /// Range used for [`SizeTier::Medium`]
    pub medium: SizeRange,
    /// Range used for [`SizeTier::Large`]
    pub large: SizeRange,
}

impl TierTable {
    /// Resolve a tier to its configured range.
    pub fn range(&self, tier: SizeTier) -> SizeRange {
        match tier {
            SizeTier::Small => self.small,
            SizeTier::Medium => self.medium,
            SizeTier::Large => self.large,
        }
    }
}

impl Default for TierTable {
    fn default() -> Self {
        Self {
            small: SizeTier::Small.default_range(),
            medium: SizeTier::Medium.default_range(),
            large: SizeTier::Large.default_range(),
        }
    }
}

/// A task's size range, either explicit or a tier resolved at plan time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeSpec {
    /// Fixed bounds
    Explicit(SizeRange),
    /// Bounds looked up in the run's [`TierTable`]
    Tier(SizeTier),
}

impl RangeSpec {
    /// Resolve against a tier table.
    pub fn resolve(&self, tiers: &TierTable) -> SizeRange {
        match *self {
            RangeSpec::Explicit(range) => range,
            RangeSpec::Tier(tier) => tiers.range(tier),
        }
    }
}

impl From<SizeRange> for RangeSpec {
    fn from(range: SizeRange) -> Self {
        RangeSpec::Explicit(range)
    }
}

impl From<SizeTier> for RangeSpec {
    fn from(tier: SizeTier) -> Self {
        RangeSpec::Tier(tier)
    }
}

/// One competing implementation of a task.
pub struct Implementation {
    /// Free-form label, unique within the task
    pub label: String,
    /// Lifecycle hooks
    pub hooks: Box<dyn Hooks>,
}

impl std::fmt::Debug for Implementation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Implementation")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// A named benchmark task.
#[derive(Debug)]
pub struct Task {
    /// Task name, unique within the catalog
    pub name: String,
    /// Size spacing
    pub strategy: Strategy,
    /// Size range
    pub range: RangeSpec,
    /// Point or amortized measurement
    pub measurement: Measurement,
    /// Per-task trial count override
    pub trials: Option<usize>,
    /// Per-task sample count override
    pub samples: Option<usize>,
    /// Implementations in registration order
    pub implementations: Vec<Implementation>,
}

impl Task {
    /// Create a task with amortized measurement and no implementations.
    pub fn new(name: impl Into<String>, strategy: Strategy, range: impl Into<RangeSpec>) -> Self {
        Self {
            name: name.into(),
            strategy,
            range: range.into(),
            measurement: Measurement::default(),
            trials: None,
            samples: None,
            implementations: Vec::new(),
        }
    }

    /// Set the measurement mode.
    pub fn measurement(mut self, measurement: Measurement) -> Self {
        self.measurement = measurement;
        self
    }

    /// Override the run-wide trial count for this task.
    pub fn trials(mut self, trials: usize) -> Self {
        self.trials = Some(trials);
        self
    }

    /// Override the run-wide sample count for this task.
    pub fn samples(mut self, samples: usize) -> Self {
        self.samples = Some(samples);
        self
    }

    /// Register an implementation.
    pub fn implementation(
        mut self,
        label: impl Into<String>,
        hooks: impl Hooks + 'static,
    ) -> Self {
        self.implementations.push(Implementation {
            label: label.into(),
            hooks: Box::new(hooks),
        });
        self
    }

    /// Implementation labels in registration order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.implementations.iter().map(|i| i.label.as_str())
    }
}

/// Ordered collection of tasks.
#[derive(Debug, Default)]
pub struct Catalog {
    tasks: Vec<Task>,
}

impl Catalog {
    /// Empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a task.
    pub fn task(mut self, task: Task) -> Self {
        self.tasks.push(task);
        self
    }

    /// Append a task in place.
    pub fn push(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Tasks in insertion order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Mutable tasks in insertion order
    pub fn tasks_mut(&mut self) -> &mut [Task] {
        &mut self.tasks
    }

    /// Number of tasks
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the catalog holds no tasks
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl FromIterator<Task> for Catalog {
    fn from_iter<I: IntoIterator<Item = Task>>(iter: I) -> Self {
        Self {
            tasks: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::fixture;
    use std::collections::VecDeque;

    #[test]
    fn test_size_range_validation() {
        assert!(SizeRange::new(1, 1).is_ok());
        assert_eq!(
            SizeRange::new(10, 5),
            Err(ConfigError::InvertedRange {
                lower: 10,
                upper: 5
            })
        );
        assert!(matches!(
            SizeRange::new(0, 5),
            Err(ConfigError::ZeroSize { .. })
        ));
        assert_eq!(SizeRange::new(3, 7).unwrap().len(), 5);
    }

    #[test]
    fn test_default_tiers() {
        let tiers = TierTable::default();
        assert_eq!(tiers.range(SizeTier::Small).lower(), 512);
        assert_eq!(tiers.range(SizeTier::Small).upper(), 16_384);
        assert_eq!(tiers.range(SizeTier::Medium).upper(), 1 << 20);
        assert_eq!(tiers.range(SizeTier::Large).lower(), 1 << 19);
        assert_eq!(tiers.range(SizeTier::Large).upper(), 1 << 24);
    }

    #[test]
    fn test_range_spec_resolution() {
        let mut tiers = TierTable::default();
        tiers.small = SizeRange::new(4, 64).unwrap();

        let spec: RangeSpec = SizeTier::Small.into();
        assert_eq!(spec.resolve(&tiers), SizeRange::new(4, 64).unwrap());

        let explicit: RangeSpec = SizeRange::new(1, 5).unwrap().into();
        assert_eq!(explicit.resolve(&tiers).upper(), 5);
    }

    #[test]
    fn test_size_range_from_pair() {
        let range = SizeRange::try_from([1, 8]).unwrap();
        assert_eq!(<[usize; 2]>::from(range), [1, 8]);
        assert!(SizeRange::try_from([8, 1]).is_err());
    }

    #[test]
    fn test_measurement_operations() {
        assert_eq!(Measurement::Point.operations(1000), 1);
        assert_eq!(Measurement::Amortized.operations(1000), 1000);
        assert_eq!(Measurement::default(), Measurement::Amortized);
    }

    #[test]
    fn test_task_builder_preserves_order() {
        let task = Task::new("Sequence::push", Strategy::Incremental, SizeTier::Small)
            .measurement(Measurement::Amortized)
            .trials(5)
            .implementation(
                "vec",
                fixture(|_| Vec::<u64>::new(), |v: &mut Vec<u64>, i| v.push(i as u64), drop),
            )
            .implementation(
                "deque",
                fixture(
                    |_| VecDeque::<u64>::new(),
                    |v: &mut VecDeque<u64>, i| v.push_back(i as u64),
                    drop,
                ),
            );

        assert_eq!(task.labels().collect::<Vec<_>>(), vec!["vec", "deque"]);
        assert_eq!(task.trials, Some(5));
        assert_eq!(task.samples, None);
    }

    #[test]
    fn test_catalog_order() {
        let catalog: Catalog = ["b", "a", "c"]
            .into_iter()
            .map(|name| Task::new(name, Strategy::Exponential, SizeTier::Medium))
            .collect();

        let names: Vec<_> = catalog.tasks().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }
}
