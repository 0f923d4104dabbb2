//! Benchmark Executor
//!
//! Drives every task of a catalog across its size range and hands the
//! results to a sink.
//!
//! ## Pipeline Overview
//!
//! ```text
//! Catalog (caller supplied)
//!       │
//!       ▼
//! ┌─────────────┐
//! │   planner   │  Validate, filter, resolve tiers and sizes
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │orchestration│  For each task, implementation and size
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │ aggregation │  N trials → mean per-operation latency
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │    sink     │  One SampleSet per (task, implementation)
//! └─────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`aggregation`] - Trial repetition and reduction to a sample
//! - [`orchestration`] - Task/implementation/size iteration
//! - [`sink`] - Destinations for finished sample sets
//! - [`metadata`] - System metadata collection

mod aggregation;
mod metadata;
mod orchestration;
mod sink;

pub use aggregation::{AggregateFailure, AggregatedSample, SampleAggregator, reduce_trials};
pub use metadata::build_report_meta;
pub use orchestration::{BenchmarkOrchestrator, ExecutionConfig, RunSummary};
pub use sink::{FnSink, ResultSink};
