//! # Models Module Unit Tests / Models 模块单元测试
//!
//! Tests the outcome vocabulary, result record constructors and the summary
//! aggregation rules.
//!
//! 测试结果词汇、结果记录构造函数以及摘要的聚合规则。

use solver_bench::models::{Outcome, ResultRecord, RunSummary, TestEvent};
use std::path::PathBuf;
use std::time::Duration;

fn verdict(outcome: Outcome, seconds: f64) -> ResultRecord {
    ResultRecord {
        outcome,
        elapsed_seconds: seconds,
        decisions: Some(1),
        conflicts: Some(1),
    }
}

#[cfg(test)]
mod outcome_tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Outcome::Sat.to_string(), "SAT");
        assert_eq!(Outcome::Unsat.to_string(), "UNSAT");
        assert_eq!(Outcome::Error.to_string(), "ERROR");
        assert_eq!(Outcome::Timeout.to_string(), "TIMEOUT");
    }

    #[test]
    fn test_is_verdict() {
        assert!(Outcome::Sat.is_verdict());
        assert!(Outcome::Unsat.is_verdict());
        assert!(!Outcome::Error.is_verdict());
        assert!(!Outcome::Timeout.is_verdict());
    }

    #[test]
    fn test_serde_matches_display() {
        for outcome in [Outcome::Sat, Outcome::Unsat, Outcome::Error, Outcome::Timeout] {
            let json = serde_json::to_string(&outcome).unwrap();
            assert_eq!(json, format!("\"{outcome}\""));
            let back: Outcome = serde_json::from_str(&json).unwrap();
            assert_eq!(back, outcome);
        }
    }
}

#[cfg(test)]
mod result_record_tests {
    use super::*;

    #[test]
    fn test_timeout_record_uses_configured_budget() {
        let record = ResultRecord::timeout(Duration::from_secs(60));

        assert!(record.is_timeout());
        assert!(!record.is_error());
        assert_eq!(record.elapsed_seconds, 60.0);
        assert_eq!(record.decisions, None);
        assert_eq!(record.conflicts, None);
    }

    #[test]
    fn test_error_record_has_zero_time() {
        let record = ResultRecord::error();

        assert!(record.is_error());
        assert_eq!(record.elapsed_seconds, 0.0);
        assert_eq!(record.decisions, None);
    }

    #[test]
    fn test_event_without_secondary_omits_field() {
        let event = TestEvent {
            test: PathBuf::from("corpus/a.cnf"),
            primary: ResultRecord::error(),
            secondary: None,
        };

        let json = serde_json::to_value(&event).unwrap();
        assert!(json.get("secondary").is_none());
        assert_eq!(json["primary"]["outcome"], "ERROR");

        let back: TestEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }
}

#[cfg(test)]
mod run_summary_tests {
    use super::*;

    #[test]
    fn test_empty_summary() {
        let summary = RunSummary::new();
        assert_eq!(summary, RunSummary::default());
        assert_eq!(summary.solved(), 0);
        assert_eq!(summary.total_seconds, 0.0);
    }

    #[test]
    fn test_record_counts_each_outcome() {
        let mut summary = RunSummary::new();
        summary.record(&verdict(Outcome::Sat, 1.25));
        summary.record(&verdict(Outcome::Unsat, 0.75));
        summary.record(&ResultRecord::timeout(Duration::from_secs(10)));
        summary.record(&ResultRecord::error());

        assert_eq!(summary.total, 4);
        assert_eq!(summary.timeouts, 1);
        assert_eq!(summary.errors, 1);
        assert_eq!(summary.solved(), 2);
        assert!((summary.total_seconds - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_counts_never_exceed_total() {
        let mut summary = RunSummary::new();
        for _ in 0..5 {
            summary.record(&ResultRecord::timeout(Duration::from_secs(1)));
        }
        summary.record(&ResultRecord::error());

        assert_eq!(summary.total, 6);
        assert!(summary.timeouts + summary.errors <= summary.total);
        assert_eq!(summary.solved(), 0);
    }
}
