//! # Console Reporting Module / 控制台报告模块
//!
//! Prints a colored, human-readable summary to stderr once the run is over.
//! stdout is left untouched for the line report.
//!
//! 运行结束后在标准错误输出打印彩色的、便于阅读的摘要。
//! 标准输出保留给行格式报告。

use colored::*;
use std::env;
use std::io::{self, IsTerminal, Write};

use crate::core::models::{Outcome, ResultRecord, RunSummary, TestEvent};
use crate::reporting::Reporter;

/// Outcome tally for one solver.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Tally {
    pub sat: usize,
    pub unsat: usize,
    pub errors: usize,
    pub timeouts: usize,
    pub seconds: f64,
}

impl Tally {
    pub fn add(&mut self, record: &ResultRecord) {
        match record.outcome {
            Outcome::Sat => self.sat += 1,
            Outcome::Unsat => self.unsat += 1,
            Outcome::Error => self.errors += 1,
            Outcome::Timeout => self.timeouts += 1,
        }
        self.seconds += record.elapsed_seconds;
    }
}

/// Collects per-solver tallies and prints them when the summary arrives.
///
/// The secondary tally is display-only; the authoritative counters are the
/// ones in [`RunSummary`].
pub struct ConsoleSummary<W: Write> {
    out: W,
    primary_name: String,
    secondary_name: Option<String>,
    primary: Tally,
    secondary: Tally,
    /// Tests where both solvers gave a verdict and the verdicts differ.
    disagreements: Vec<String>,
}

impl ConsoleSummary<io::Stderr> {
    /// A summary on stderr, colored only when stderr is a terminal.
    pub fn stderr(primary_name: impl Into<String>, secondary_name: Option<String>) -> Self {
        // `colored` looks at stdout, which is usually redirected to a file here.
        let colorize = use_color(
            io::stderr().is_terminal(),
            env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()),
            env::var_os("CLICOLOR_FORCE").is_some_and(|v| v != "0"),
        );
        colored::control::set_override(colorize);
        Self::new(io::stderr(), primary_name, secondary_name)
    }
}

/// `NO_COLOR` wins over `CLICOLOR_FORCE`, which wins over terminal detection.
pub fn use_color(is_terminal: bool, no_color: bool, force: bool) -> bool {
    !no_color && (force || is_terminal)
}

impl<W: Write> ConsoleSummary<W> {
    pub fn new(out: W, primary_name: impl Into<String>, secondary_name: Option<String>) -> Self {
        Self {
            out,
            primary_name: primary_name.into(),
            secondary_name,
            primary: Tally::default(),
            secondary: Tally::default(),
            disagreements: Vec::new(),
        }
    }

    pub fn primary_tally(&self) -> Tally {
        self.primary
    }

    pub fn disagreements(&self) -> &[String] {
        &self.disagreements
    }

    fn print_tally(&mut self, name: &str, tally: Tally) -> io::Result<()> {
        writeln!(
            self.out,
            "  - {:<20} | {} {:>4} | {} {:>4} | {} {:>4} | {} {:>4} | {:>10.2}s",
            name.cyan(),
            "SAT".green(),
            tally.sat,
            "UNSAT".green(),
            tally.unsat,
            "TIMEOUT".yellow(),
            tally.timeouts,
            "ERROR".red(),
            tally.errors,
            tally.seconds
        )
    }
}

impl<W: Write> Reporter for ConsoleSummary<W> {
    fn on_test(&mut self, event: &TestEvent) -> io::Result<()> {
        self.primary.add(&event.primary);
        if let Some(secondary) = &event.secondary {
            self.secondary.add(secondary);
            if event.primary.outcome.is_verdict()
                && secondary.outcome.is_verdict()
                && event.primary.outcome != secondary.outcome
            {
                self.disagreements.push(event.test.display().to_string());
            }
        }
        Ok(())
    }

    fn on_summary(&mut self, summary: &RunSummary) -> io::Result<()> {
        writeln!(self.out, "\n{}", "--- Benchmark Summary ---".bold())?;

        let primary_name = self.primary_name.clone();
        self.print_tally(&primary_name, self.primary)?;
        if let Some(secondary_name) = self.secondary_name.clone() {
            self.print_tally(&secondary_name, self.secondary)?;
        }

        if !self.disagreements.is_empty() {
            writeln!(
                self.out,
                "\n{}",
                format!("Verdicts differ on {} test(s):", self.disagreements.len())
                    .red()
                    .bold()
            )?;
            for test in &self.disagreements {
                writeln!(self.out, "  - {}", test)?;
            }
        }

        let status = format!(
            "{} tests, {} solved, {} timeouts, {} errors in {:.2}s",
            summary.total,
            summary.solved(),
            summary.timeouts,
            summary.errors,
            summary.total_seconds
        );
        let status = if summary.errors > 0 {
            status.red()
        } else if summary.timeouts > 0 {
            status.yellow()
        } else {
            status.green()
        };
        writeln!(self.out, "\n{}", status.bold())?;
        self.out.flush()
    }
}
