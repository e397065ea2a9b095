//! # Outcome Classifier Module / 结果分类模块
//!
//! Turns the raw standard output of a solver into a [`ResultRecord`].
//! Every solver speaks its own dialect, so classification is driven by an
//! [`OutputAdapter`]: the verdict tokens the solver prints on its last line and
//! the labels of the counters it reports in its body.
//!
//! 将求解器的原始标准输出转换为 [`ResultRecord`]。
//! 每个求解器都有自己的输出格式，因此分类由 [`OutputAdapter`] 驱动：
//! 即求解器在最后一行打印的判定标记，以及其输出中计数器的标签。

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::core::models::{Outcome, ResultRecord};

/// The serializable description of a solver's output vocabulary.
/// 求解器输出词汇的可序列化描述。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdapterSpec {
    /// Exact content of the last line for a satisfiable result.
    /// 可满足结果时最后一行的精确内容。
    pub sat_token: String,
    /// Exact content of the last line for an unsatisfiable result.
    /// 不可满足结果时最后一行的精确内容。
    pub unsat_token: String,
    /// Label preceding the decision count, e.g. `Decisions` in `Decisions: 42`.
    /// 决策计数之前的标签。
    pub decisions_label: String,
    /// Label preceding the conflict count.
    /// 冲突计数之前的标签。
    pub conflicts_label: String,
}

impl AdapterSpec {
    /// The vocabulary of the in-tree `ivasat` solver.
    pub fn ivasat() -> Self {
        Self {
            sat_token: "Sat".to_string(),
            unsat_token: "Unsat".to_string(),
            decisions_label: "Decisions".to_string(),
            conflicts_label: "Conflicts".to_string(),
        }
    }

    /// The vocabulary of MiniSat 2.x, which prints e.g.
    /// `conflicts             : 12  (3000 /sec)` and ends with `SATISFIABLE`.
    pub fn minisat() -> Self {
        Self {
            sat_token: "SATISFIABLE".to_string(),
            unsat_token: "UNSATISFIABLE".to_string(),
            decisions_label: "decisions".to_string(),
            conflicts_label: "conflicts".to_string(),
        }
    }

    /// Looks up an adapter shipped with the tool by name.
    pub fn builtin(name: &str) -> Option<Self> {
        match name {
            "ivasat" => Some(Self::ivasat()),
            "minisat" => Some(Self::minisat()),
            _ => None,
        }
    }

    /// Names accepted by [`AdapterSpec::builtin`].
    pub const BUILTIN_NAMES: &'static [&'static str] = &["ivasat", "minisat"];
}

/// A compiled [`AdapterSpec`], ready to classify output.
/// 已编译的 [`AdapterSpec`]，可直接用于分类输出。
#[derive(Debug, Clone)]
pub struct OutputAdapter {
    spec: AdapterSpec,
    decisions: Regex,
    conflicts: Regex,
}

impl OutputAdapter {
    pub fn new(spec: AdapterSpec) -> Result<Self, regex::Error> {
        let decisions = counter_pattern(&spec.decisions_label)?;
        let conflicts = counter_pattern(&spec.conflicts_label)?;
        Ok(Self {
            spec,
            decisions,
            conflicts,
        })
    }

    pub fn spec(&self) -> &AdapterSpec {
        &self.spec
    }

    /// Determines the verdict from the last non-empty line of `output`.
    pub fn verdict(&self, output: &str) -> Outcome {
        let last_line = output
            .lines()
            .map(str::trim)
            .rfind(|line| !line.is_empty());

        match last_line {
            Some(line) if line == self.spec.sat_token => Outcome::Sat,
            Some(line) if line == self.spec.unsat_token => Outcome::Unsat,
            _ => Outcome::Error,
        }
    }

    /// Classifies the output of an invocation that finished after `elapsed`.
    ///
    /// A recognised verdict with a missing or unparsable counter keeps its
    /// verdict; the counter is simply absent.
    ///
    /// 对在 `elapsed` 时间后结束的调用输出进行分类。
    /// 判定已识别但计数器缺失时，保留判定结果，计数器为空。
    pub fn classify(&self, output: &str, elapsed: Duration) -> ResultRecord {
        let outcome = self.verdict(output);
        if !outcome.is_verdict() {
            return ResultRecord::error();
        }

        ResultRecord {
            outcome,
            elapsed_seconds: elapsed.as_secs_f64(),
            decisions: extract_counter(&self.decisions, output),
            conflicts: extract_counter(&self.conflicts, output),
        }
    }
}

/// Builds `<label> : <integer>` with tolerant whitespace around the colon.
/// The label must start its line, so `Restart Conflicts: 9` is not `Conflicts`.
fn counter_pattern(label: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(
        r"(?m)^[ \t]*{}[ \t]*:[ \t]*(\d+)",
        regex::escape(label)
    ))
}

fn extract_counter(pattern: &Regex, output: &str) -> Option<u64> {
    pattern
        .captures(output)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
