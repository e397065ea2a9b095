//! # Data Models Module / 数据模型模块
//!
//! This module defines the core data structures shared by the benchmark engine:
//! solver outcomes, per-execution result records, per-test reporting events and
//! the run-wide summary.
//!
//! 此模块定义了基准测试引擎共享的核心数据结构：
//! 求解器结果、单次执行的结果记录、每个测试的报告事件以及整次运行的摘要。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// The classification of a single solver execution.
/// 单次求解器执行的分类结果。
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    /// The solver reported the problem as satisfiable.
    /// 求解器报告问题可满足。
    Sat,
    /// The solver reported the problem as unsatisfiable.
    /// 求解器报告问题不可满足。
    Unsat,
    /// The solver terminated but its output could not be classified, or the
    /// invocation itself failed.
    /// 求解器已终止但输出无法分类，或调用本身失败。
    Error,
    /// The solver did not terminate within the configured timeout.
    /// 求解器未在配置的超时时间内终止。
    Timeout,
}

impl Outcome {
    /// Returns `true` for `Sat` and `Unsat`.
    pub fn is_verdict(&self) -> bool {
        matches!(self, Outcome::Sat | Outcome::Unsat)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Sat => "SAT",
            Outcome::Unsat => "UNSAT",
            Outcome::Error => "ERROR",
            Outcome::Timeout => "TIMEOUT",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The result of running one solver on one test file.
///
/// `elapsed_seconds` equals the configured timeout for `Timeout` and `0` for
/// `Error`. Counters are only ever present alongside a `Sat`/`Unsat` verdict.
///
/// 在一个测试文件上运行一个求解器的结果。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub outcome: Outcome,
    pub elapsed_seconds: f64,
    pub decisions: Option<u64>,
    pub conflicts: Option<u64>,
}

impl ResultRecord {
    /// A record for an execution that was abandoned after `timeout`.
    pub fn timeout(timeout: Duration) -> Self {
        Self {
            outcome: Outcome::Timeout,
            elapsed_seconds: timeout.as_secs_f64(),
            decisions: None,
            conflicts: None,
        }
    }

    /// A record for an execution whose output or invocation failed.
    pub fn error() -> Self {
        Self {
            outcome: Outcome::Error,
            elapsed_seconds: 0.0,
            decisions: None,
            conflicts: None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        self.outcome == Outcome::Timeout
    }

    pub fn is_error(&self) -> bool {
        self.outcome == Outcome::Error
    }
}

/// One reporting event, emitted after a test file has been fully processed.
/// 一个报告事件，在测试文件被完整处理后发出。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestEvent {
    /// The test file, as discovered under the corpus root.
    /// 在语料库根目录下发现的测试文件。
    pub test: PathBuf,
    /// The result of the primary solver / 主求解器的结果
    pub primary: ResultRecord,
    /// The result of the reference solver, if one is configured.
    /// 参考求解器的结果（如果已配置）。
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub secondary: Option<ResultRecord>,
}

/// Aggregate statistics for one benchmark run.
///
/// Only primary-solver results are folded in; secondary results are reported
/// but never counted here.
///
/// 一次基准测试运行的聚合统计。仅统计主求解器的结果。
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub total: usize,
    pub timeouts: usize,
    pub errors: usize,
    pub total_seconds: f64,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one primary result into the running totals.
    /// 将一个主求解器结果累加到统计中。
    pub fn record(&mut self, primary: &ResultRecord) {
        self.total += 1;
        match primary.outcome {
            Outcome::Timeout => self.timeouts += 1,
            Outcome::Error => self.errors += 1,
            Outcome::Sat | Outcome::Unsat => {}
        }
        self.total_seconds += primary.elapsed_seconds;
    }

    /// Number of tests that finished with a `Sat` or `Unsat` verdict.
    pub fn solved(&self) -> usize {
        self.total - self.timeouts - self.errors
    }
}
