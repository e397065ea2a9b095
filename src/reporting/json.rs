//! # JSON Reporting Module / JSON 报告模块
//!
//! Collects every event of a run and writes them, together with the run
//! settings and summary, to a single JSON document when the run completes.
//!
//! 收集一次运行中的所有事件，并在运行结束时将其与运行设置和摘要一起写入一个 JSON 文档。

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::core::config::{RunConfig, SolverConfig};
use crate::core::models::{RunSummary, TestEvent};
use crate::infra::fs::display_location;
use crate::reporting::Reporter;

/// Description of a solver as recorded in the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverInfo {
    pub name: String,
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl From<&SolverConfig> for SolverInfo {
    fn from(solver: &SolverConfig) -> Self {
        Self {
            name: solver.name.clone(),
            program: display_location(&solver.program),
            args: solver.args.clone(),
        }
    }
}

/// The document written to disk.
/// 写入磁盘的文档。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchReport {
    pub generated_at: DateTime<Local>,
    pub timeout_secs: u64,
    pub primary: SolverInfo,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub secondary: Option<SolverInfo>,
    pub tests: Vec<TestEvent>,
    pub summary: RunSummary,
}

/// Reporter that buffers events and writes a [`BenchReport`] on summary.
///
/// The file is created up front so an unwritable path fails before any solver
/// runs.
pub struct JsonReport {
    path: PathBuf,
    writer: BufWriter<File>,
    timeout_secs: u64,
    primary: SolverInfo,
    secondary: Option<SolverInfo>,
    tests: Vec<TestEvent>,
}

impl JsonReport {
    /// Creates (or truncates) the report file at `path`.
    pub fn create(path: impl Into<PathBuf>, config: &RunConfig) -> io::Result<Self> {
        let path = path.into();
        let file = File::create(&path).map_err(|e| {
            io::Error::new(
                e.kind(),
                format!("cannot create report '{}': {}", path.display(), e),
            )
        })?;

        Ok(Self {
            path,
            writer: BufWriter::new(file),
            timeout_secs: config.timeout.as_secs(),
            primary: SolverInfo::from(&config.primary),
            secondary: config.secondary.as_ref().map(SolverInfo::from),
            tests: Vec::new(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Reporter for JsonReport {
    fn on_test(&mut self, event: &TestEvent) -> io::Result<()> {
        self.tests.push(event.clone());
        Ok(())
    }

    fn on_summary(&mut self, summary: &RunSummary) -> io::Result<()> {
        let report = BenchReport {
            generated_at: Local::now(),
            timeout_secs: self.timeout_secs,
            primary: self.primary.clone(),
            secondary: self.secondary.clone(),
            tests: std::mem::take(&mut self.tests),
            summary: *summary,
        };

        serde_json::to_writer_pretty(&mut self.writer, &report)?;
        writeln!(self.writer)?;
        self.writer.flush()
    }
}
