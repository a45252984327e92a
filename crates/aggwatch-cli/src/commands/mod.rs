pub mod monitor;
pub mod plot;

use aggwatch_core::MetricSet;

/// Parse a metric set name into the configuration it stands for.
pub fn parse_metrics(s: &str) -> MetricSet {
    match s {
        "full" | "all" | "six" => MetricSet::full(),
        "basic" | "three" => MetricSet::basic(),
        _ => {
            eprintln!("Unknown metric set '{s}', using full");
            MetricSet::full()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // parse_metrics tests
    // -----------------------------------------------------------------------

    #[test]
    fn test_parse_full_variants() {
        assert_eq!(parse_metrics("full"), MetricSet::full());
        assert_eq!(parse_metrics("all"), MetricSet::full());
        assert_eq!(parse_metrics("six"), MetricSet::full());
    }

    #[test]
    fn test_parse_basic_variants() {
        assert_eq!(parse_metrics("basic"), MetricSet::basic());
        assert_eq!(parse_metrics("three"), MetricSet::basic());
    }

    #[test]
    fn test_parse_unknown_defaults_full() {
        assert_eq!(parse_metrics("unknown"), MetricSet::full());
        assert_eq!(parse_metrics(""), MetricSet::full());
        assert_eq!(parse_metrics("FULL"), MetricSet::full()); // case-sensitive
    }
}
