//! # Line Reporting Module / 行格式报告模块
//!
//! The machine-parsable report: one `;`-separated line per test, then a fixed
//! summary block. Downstream scripts depend on the field order, so it only
//! varies with the presence of a secondary solver.
//!
//! 可供机器解析的报告：每个测试一行以 `;` 分隔的记录，最后是固定格式的摘要块。
//!
//! ```text
//! corpus/a.cnf;SAT;0.12;42;7
//! corpus/b.cnf;TIMEOUT;60.00;;
//! Total: 2
//! Timeouts: 1
//! Errors: 0
//! Time: 60.12
//! ```

use std::io::{self, Write};

use crate::core::models::{ResultRecord, RunSummary, TestEvent};
use crate::reporting::Reporter;

pub const FIELD_SEPARATOR: char = ';';

/// Writes the line format to `W`, flushing after every line so an interrupted
/// run still leaves a usable partial report.
pub struct LineReporter<W: Write> {
    out: W,
}

impl<W: Write> LineReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl LineReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Reporter for LineReporter<W> {
    fn on_test(&mut self, event: &TestEvent) -> io::Result<()> {
        writeln!(self.out, "{}", format_event(event))?;
        self.out.flush()
    }

    fn on_summary(&mut self, summary: &RunSummary) -> io::Result<()> {
        write!(self.out, "{}", format_summary(summary))?;
        self.out.flush()
    }
}

/// Renders one test as `test;outcome;elapsed;decisions;conflicts`, followed by
/// `;outcome;elapsed;decisions;conflicts` of the secondary solver if it ran.
pub fn format_event(event: &TestEvent) -> String {
    let mut line = event.test.display().to_string();
    push_record(&mut line, &event.primary);
    if let Some(secondary) = &event.secondary {
        push_record(&mut line, secondary);
    }
    line
}

fn push_record(line: &mut String, record: &ResultRecord) {
    let fields = [
        record.outcome.to_string(),
        format!("{:.2}", record.elapsed_seconds),
        record.decisions.map(|d| d.to_string()).unwrap_or_default(),
        record.conflicts.map(|c| c.to_string()).unwrap_or_default(),
    ];
    for field in fields {
        line.push(FIELD_SEPARATOR);
        line.push_str(&field);
    }
}

/// Renders the summary block, newline-terminated.
pub fn format_summary(summary: &RunSummary) -> String {
    format!(
        "Total: {}\nTimeouts: {}\nErrors: {}\nTime: {:.2}\n",
        summary.total, summary.timeouts, summary.errors, summary.total_seconds
    )
}
