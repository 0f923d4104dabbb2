//! JSON Output

use crate::report::Report;

/// Generate a prettified JSON report.
///
/// Serializes the run report into machine-readable JSON format.
pub fn generate_json_report(report: &Report) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

/// Parse a report previously written by [`generate_json_report`].
pub fn parse_json_report(json: &str) -> Result<Report, serde_json::Error> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{
        FailureInfo, ReportConfig, ReportMeta, SampleMetrics, SampleOutcome, SampleSetBuilder,
        SystemInfo,
    };
    use chrono::Utc;
    use scalebench_core::{Measurement, SizeRange, Strategy};

    fn sample_report() -> Report {
        let mut set = SampleSetBuilder::new(
            "Sequence::unshift",
            "deque",
            Strategy::Exponential,
            Measurement::Point,
            SizeRange::new(512, 16_384).unwrap(),
        );
        set.record(
            512,
            SampleOutcome::Measured(SampleMetrics {
                mean_ns: 41.5,
                median_ns: 40.0,
                std_dev_ns: 3.2,
                min_ns: 38.0,
                max_ns: 49.0,
                mean_cycles: 120.0,
                trials: 20,
                failures: 0,
            }),
        )
        .unwrap();
        set.record(
            1218,
            SampleOutcome::Failed(FailureInfo {
                trials: 20,
                failures: 20,
                message: "setup failed at size 1218: out of memory".to_string(),
            }),
        )
        .unwrap();

        let meta = ReportMeta {
            schema_version: 1,
            version: "0.1.0".to_string(),
            timestamp: Utc::now(),
            system: SystemInfo {
                os: "linux".to_string(),
                arch: "x86_64".to_string(),
                cpu: "Unknown".to_string(),
                cpu_cores: 8,
                memory_gb: 16.0,
            },
            config: ReportConfig {
                trials: 20,
                samples: 1000,
                warmup_trials: 0,
                pinned_cpu: None,
            },
        };

        Report::new(meta, vec![set.finish()], 3.5)
    }

    #[test]
    fn test_gap_is_tagged_in_json() {
        let json = generate_json_report(&sample_report()).unwrap();
        assert!(json.contains("\"status\": \"measured\""));
        assert!(json.contains("\"status\": \"failed\""));
        assert!(json.contains("\"strategy\": \"exponential\""));
        assert!(json.contains("\"range\": [\n"));
    }

    #[test]
    fn test_report_parses_back() {
        let report = sample_report();
        let json = generate_json_report(&report).unwrap();
        let parsed = parse_json_report(&json).unwrap();

        assert_eq!(parsed.sample_sets, report.sample_sets);
        assert_eq!(parsed.summary.failed_points, 1);
        assert_eq!(parsed.meta.config.trials, 20);
    }

    #[test]
    fn test_inverted_range_rejected_on_parse() {
        let json = generate_json_report(&sample_report()).unwrap();
        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        value["sample_sets"][0]["range"] = serde_json::json!([16_384, 512]);

        assert!(parse_json_report(&value.to_string()).is_err());
    }

    #[test]
    fn test_descending_points_rejected_on_parse() {
        let json = generate_json_report(&sample_report()).unwrap();
        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let points = value["sample_sets"][0]["points"].as_array_mut().unwrap();
        points.reverse();

        let err = parse_json_report(&value.to_string()).unwrap_err();
        assert!(err.to_string().contains("strictly ascending"));
    }
}
