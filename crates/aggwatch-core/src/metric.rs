//! The six running statistics tracked per epoch, and which of them a given
//! run actually follows.
//!
//! The upstream log replayer labels its CSV columns with fixed header
//! fragments — including the long-standing "Avegare" misspelling. Those
//! fragments are data, not something to correct: the extractor must match
//! the header text exactly as the replayer emits it.

use std::fmt;

// ---------------------------------------------------------------------------
// Metric
// ---------------------------------------------------------------------------

/// One of the running statistics reported by the estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Metric {
    Average,
    StdDev,
    Count,
    Sum,
    Min,
    Max,
}

impl Metric {
    /// All six metrics, in upstream column order.
    pub const ALL: [Metric; 6] = [
        Metric::Average,
        Metric::StdDev,
        Metric::Count,
        Metric::Sum,
        Metric::Min,
        Metric::Max,
    ];

    /// Header fragment as emitted by the upstream replayer, verbatim.
    pub fn header_fragment(self) -> &'static str {
        match self {
            // sic — the replayer has always spelled it this way
            Metric::Average => "Avegare",
            Metric::StdDev => "Stand. Deviation",
            Metric::Count => "Count",
            Metric::Sum => "Sum",
            Metric::Min => "Min",
            Metric::Max => "Max",
        }
    }

    /// Full header name of the estimated-value column.
    pub fn estimated_column(self) -> String {
        format!("{} (Estimated)", self.header_fragment())
    }

    /// Full header name of the actual-value column.
    pub fn actual_column(self) -> String {
        format!("{} (Actual)", self.header_fragment())
    }

    /// Short name used for chart legends and series lookup.
    pub fn series_name(self) -> &'static str {
        match self {
            Metric::Average => "average",
            Metric::StdDev => "stddev",
            Metric::Count => "count",
            Metric::Sum => "sum",
            Metric::Min => "min",
            Metric::Max => "max",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.series_name())
    }
}

// ---------------------------------------------------------------------------
// MetricSet
// ---------------------------------------------------------------------------

/// Ordered selection of metrics a run tracks.
///
/// Two configurations exist in practice: the full six-metric set and a
/// three-metric subset (average, stddev, count) written by older replayer
/// builds that never learned sum/min/max. The subset is configuration, not
/// a different algorithm — an absent column is only an error when the set
/// actually tracks it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSet {
    metrics: Vec<Metric>,
}

impl MetricSet {
    /// All six metrics.
    pub fn full() -> Self {
        Self {
            metrics: Metric::ALL.to_vec(),
        }
    }

    /// The degenerate three-metric subset: average, stddev, count.
    pub fn basic() -> Self {
        Self {
            metrics: vec![Metric::Average, Metric::StdDev, Metric::Count],
        }
    }

    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    pub fn contains(&self, metric: Metric) -> bool {
        self.metrics.contains(&metric)
    }

    pub fn iter(&self) -> impl Iterator<Item = Metric> + '_ {
        self.metrics.iter().copied()
    }
}

impl Default for MetricSet {
    fn default() -> Self {
        Self::full()
    }
}
