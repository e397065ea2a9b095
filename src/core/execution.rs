//! # Benchmark Execution Engine Module / 基准测试执行引擎模块
//!
//! Drives a corpus through the solvers one test file at a time: invoke,
//! classify, fold into the summary, report. A failing or hanging solver only
//! ever costs the test it was running on.
//!
//! 逐个测试文件地驱动语料库通过求解器：调用、分类、累计到摘要、报告。
//! 失败或挂起的求解器只会影响它当前运行的测试。

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use crate::{
    core::{
        config::{RunConfig, SolverConfig},
        models::{ResultRecord, RunSummary, TestEvent},
    },
    infra::command::run_solver,
    reporting::Reporter,
};

/// Runs one solver on one test file and classifies what it printed.
///
/// Never fails: spawn errors, undecodable output and unknown verdicts all
/// become an `Error` record, an expired budget becomes a `Timeout` record.
///
/// # Arguments
/// * `solver` - The solver to invoke
/// * `test` - Path of the problem file
/// * `timeout` - Wall-clock budget for this single invocation
///
/// # Returns
/// The `ResultRecord` for this (solver, test) pair
pub async fn run_test_case(solver: &SolverConfig, test: &Path, timeout: Duration) -> ResultRecord {
    let output = match run_solver(&solver.program, &solver.args, test, timeout).await {
        Ok(output) => output,
        Err(e) if e.is_timeout() => return ResultRecord::timeout(timeout),
        Err(e) => {
            warn!(solver = %solver.name, test = %test.display(), error = %e, "Solver invocation failed");
            return ResultRecord::error();
        }
    };

    let record = solver.adapter.classify(&output.stdout, output.elapsed);
    if record.is_error() {
        let last_line = output
            .stdout
            .lines()
            .map(str::trim)
            .rfind(|line| !line.is_empty())
            .unwrap_or("");
        warn!(
            solver = %solver.name,
            test = %test.display(),
            status = %output.status,
            last_line = %last_line,
            "Unrecognized solver verdict"
        );
    }
    record
}

/// Benchmarks every test file of `corpus`, strictly in order.
///
/// The secondary solver, if configured, runs on each file right after the
/// primary one. Only primary results enter the summary.
///
/// 严格按顺序对 `corpus` 中的每个测试文件进行基准测试。
/// 如果配置了次要求解器，它会在主求解器之后立即在同一文件上运行。
/// 只有主求解器的结果计入摘要。
///
/// # Returns
/// The final `RunSummary`, after it has been handed to the reporter. Errors
/// only come from the reporter failing to write.
pub async fn run_benchmark(
    corpus: &[PathBuf],
    config: &RunConfig,
    reporter: &mut dyn Reporter,
) -> Result<RunSummary> {
    let mut summary = RunSummary::new();

    for (index, test) in corpus.iter().enumerate() {
        let primary = run_test_case(&config.primary, test, config.timeout).await;
        let secondary = match &config.secondary {
            Some(solver) => Some(run_test_case(solver, test, config.timeout).await),
            None => None,
        };

        summary.record(&primary);

        info!(
            index = index + 1,
            total = corpus.len(),
            test = %test.display(),
            outcome = %primary.outcome,
            elapsed_secs = primary.elapsed_seconds,
            secondary = secondary.map(|r| r.outcome.as_str()).unwrap_or("-"),
            "Test finished"
        );

        let event = TestEvent {
            test: test.clone(),
            primary,
            secondary,
        };
        reporter
            .on_test(&event)
            .with_context(|| format!("Failed to report result for {}", test.display()))?;
    }

    reporter
        .on_summary(&summary)
        .context("Failed to report run summary")?;

    Ok(summary)
}
