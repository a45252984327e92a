//! # aggwatch-core
//!
//! **Sanity-check an aggregation estimator against ground truth, epoch by epoch.**
//!
//! An external replayer dumps a per-epoch summary of six running statistics
//! (average, standard deviation, count, sum, min, max), each with an
//! estimated and an actual value. This crate regenerates that summary on
//! demand, parses it, and turns every epoch into the percentage deviation of
//! the estimate from ground truth — one series per metric, ready to chart.
//!
//! ## Quick Start
//!
//! ```no_run
//! use aggwatch_core::{MetricSet, SummaryTable};
//!
//! let metrics = MetricSet::full();
//! let table = SummaryTable::load("summaries/exp7.dat", &metrics)?;
//! let deviations = table.deviations();
//!
//! for (metric, series) in deviations.iter() {
//!     println!("{metric}: {} epochs", series.len());
//! }
//! # Ok::<(), aggwatch_core::ParseError>(())
//! ```
//!
//! ## Architecture
//!
//! RefreshTrigger (external dump) → SummaryTable (parse) → DeviationSet (chart input)
//!
//! Each monitoring cycle owns its table outright: the summary file is fully
//! overwritten by the trigger and fully re-read by the parser, never patched
//! in place. The chart sink in `aggwatch-cli` consumes the resulting
//! [`DeviationSet`] wholesale every cycle.

pub mod metric;
pub mod refresh;
pub mod summary;

pub use metric::{Metric, MetricSet};
pub use refresh::{DEFAULT_DUMP_CMD, DUMP_HEADER_LINES, RefreshError, RefreshTrigger};
pub use summary::{DeviationSet, EpochRecord, ParseError, SummaryTable, deviation};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
