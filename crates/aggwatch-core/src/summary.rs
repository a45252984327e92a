//! Summary-table parsing and deviation extraction.
//!
//! A summary file is header-labeled comma-separated text, one row per epoch,
//! regenerated wholesale by the replayer each cycle. For every tracked metric
//! the header carries an `… (Estimated)` and an `… (Actual)` column; the
//! extractor turns each row into the percentage deviation of actual vs
//! estimated and returns one series per metric, in epoch order.
//!
//! Parsing is strict: a missing column or a non-numeric field fails the whole
//! parse. A half-written file from a racing replayer shows up here, not in
//! the refresh trigger.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::metric::{Metric, MetricSet};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a summary file could not be parsed.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("cannot read summary file: {0}")]
    Io(#[from] std::io::Error),

    #[error("summary file has no header row")]
    EmptyFile,

    #[error("summary header is missing column '{column}'")]
    MissingColumn { column: String },

    #[error("line {line}: expected at least {expected} fields, got {got}")]
    ShortRow {
        line: usize,
        expected: usize,
        got: usize,
    },

    #[error("line {line}: column '{column}' is not numeric: '{value}'")]
    BadNumber {
        line: usize,
        column: String,
        value: String,
    },
}

// ---------------------------------------------------------------------------
// Deviation formula
// ---------------------------------------------------------------------------

/// Percentage deviation of `actual` from `estimated`.
///
/// `|actual − estimated| / actual × 100`, with an exact-zero actual defined
/// as zero deviation. The zero rule is how division by zero is avoided —
/// there is no epsilon.
pub fn deviation(estimated: f64, actual: f64) -> f64 {
    if actual == 0.0 {
        0.0
    } else {
        (actual - estimated).abs() / actual * 100.0
    }
}

// ---------------------------------------------------------------------------
// EpochRecord / SummaryTable
// ---------------------------------------------------------------------------

/// One parsed row: an (estimated, actual) pair per tracked metric, in the
/// metric set's order. The epoch index is the record's position in the table.
#[derive(Debug, Clone, PartialEq)]
pub struct EpochRecord {
    pairs: Vec<(f64, f64)>,
}

impl EpochRecord {
    /// (estimated, actual) for the i-th tracked metric.
    pub fn pair(&self, idx: usize) -> (f64, f64) {
        self.pairs[idx]
    }
}

/// The complete ordered sequence of epoch records parsed from one summary
/// file at one point in time. Rebuilt from scratch every cycle, never
/// mutated incrementally.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryTable {
    metrics: MetricSet,
    records: Vec<EpochRecord>,
}

impl SummaryTable {
    /// Read and parse a summary file for the given metric set.
    pub fn load(path: impl AsRef<Path>, metrics: &MetricSet) -> Result<Self, ParseError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content, metrics)
    }

    /// Parse summary text. Pure: the same input always yields the same table.
    pub fn parse(content: &str, metrics: &MetricSet) -> Result<Self, ParseError> {
        let mut lines = content.lines();
        let header = lines.next().ok_or(ParseError::EmptyFile)?;

        // Header name -> field position. The format has no quoting, so a
        // plain split is the whole grammar.
        let positions: HashMap<&str, usize> = header
            .split(',')
            .map(str::trim)
            .enumerate()
            .map(|(i, name)| (name, i))
            .collect();

        // Resolve every tracked column up front so a missing column fails
        // before any row is touched.
        let mut columns = Vec::with_capacity(metrics.len());
        for metric in metrics.iter() {
            let est = metric.estimated_column();
            let act = metric.actual_column();
            let est_idx = *positions
                .get(est.as_str())
                .ok_or(ParseError::MissingColumn { column: est })?;
            let act_idx = *positions
                .get(act.as_str())
                .ok_or(ParseError::MissingColumn { column: act })?;
            columns.push((metric, est_idx, act_idx));
        }
        let min_fields = columns
            .iter()
            .flat_map(|&(_, e, a)| [e, a])
            .max()
            .map_or(0, |m| m + 1);

        let mut records = Vec::new();
        for (i, row) in lines.enumerate() {
            if row.trim().is_empty() {
                continue;
            }
            let line = i + 2; // 1-based, after the header
            let fields: Vec<&str> = row.split(',').map(str::trim).collect();
            if fields.len() < min_fields {
                return Err(ParseError::ShortRow {
                    line,
                    expected: min_fields,
                    got: fields.len(),
                });
            }

            let mut pairs = Vec::with_capacity(columns.len());
            for &(metric, est_idx, act_idx) in &columns {
                let est = parse_field(fields[est_idx], line, metric.estimated_column())?;
                let act = parse_field(fields[act_idx], line, metric.actual_column())?;
                pairs.push((est, act));
            }
            records.push(EpochRecord { pairs });
        }

        Ok(Self {
            metrics: metrics.clone(),
            records,
        })
    }

    pub fn metrics(&self) -> &MetricSet {
        &self.metrics
    }

    /// Number of epochs (rows) in the table.
    pub fn epochs(&self) -> usize {
        self.records.len()
    }

    pub fn records(&self) -> &[EpochRecord] {
        &self.records
    }

    /// Compute one deviation series per tracked metric, in epoch order.
    ///
    /// Every series has exactly `epochs()` entries; the set is always
    /// complete — there is no partial output.
    pub fn deviations(&self) -> DeviationSet {
        let series = self
            .metrics
            .iter()
            .enumerate()
            .map(|(idx, metric)| {
                let values = self
                    .records
                    .iter()
                    .map(|r| {
                        let (est, act) = r.pair(idx);
                        deviation(est, act)
                    })
                    .collect();
                (metric, values)
            })
            .collect();
        DeviationSet { series }
    }
}

fn parse_field(raw: &str, line: usize, column: String) -> Result<f64, ParseError> {
    raw.parse::<f64>().map_err(|_| ParseError::BadNumber {
        line,
        column,
        value: raw.to_string(),
    })
}

// ---------------------------------------------------------------------------
// DeviationSet
// ---------------------------------------------------------------------------

/// Per-metric deviation series for one parsed summary table.
///
/// Derived data with the same per-cycle lifetime as the table; the chart
/// replaces its datasets with these wholesale each cycle.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeviationSet {
    series: Vec<(Metric, Vec<f64>)>,
}

impl DeviationSet {
    /// Series in metric-set order.
    pub fn iter(&self) -> impl Iterator<Item = (Metric, &[f64])> + '_ {
        self.series.iter().map(|(m, v)| (*m, v.as_slice()))
    }

    pub fn get(&self, metric: Metric) -> Option<&[f64]> {
        self.series
            .iter()
            .find(|(m, _)| *m == metric)
            .map(|(_, v)| v.as_slice())
    }

    /// Number of tracked metrics.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Number of epochs covered (length of every series).
    pub fn epochs(&self) -> usize {
        self.series.first().map_or(0, |(_, v)| v.len())
    }
}
