//! # Reporting Module / 报告模块
//!
//! This module turns benchmark events into output. The semicolon-separated
//! line stream on stdout is the primary artifact; a colored console summary
//! and a JSON document are available alongside it.
//!
//! 此模块将基准测试事件转换为输出。标准输出上以分号分隔的行流是主要产物；
//! 另外还提供彩色控制台摘要和 JSON 文档。

use std::io;

use crate::core::models::{RunSummary, TestEvent};

pub mod console;
pub mod json;
pub mod lines;

// Re-export common reporters
pub use console::ConsoleSummary;
pub use json::JsonReport;
pub use lines::LineReporter;

/// A sink for benchmark events.
///
/// `on_test` is called once per test file in corpus order, `on_summary` exactly
/// once after the last test.
///
/// 基准测试事件的接收者。每个测试文件按顺序调用一次 `on_test`，
/// 最后一个测试之后调用一次 `on_summary`。
pub trait Reporter {
    fn on_test(&mut self, event: &TestEvent) -> io::Result<()>;
    fn on_summary(&mut self, summary: &RunSummary) -> io::Result<()>;
}

/// Forwards every event to each contained reporter, in insertion order.
#[derive(Default)]
pub struct ReporterSet {
    reporters: Vec<Box<dyn Reporter>>,
}

impl ReporterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, reporter: impl Reporter + 'static) {
        self.reporters.push(Box::new(reporter));
    }
}

impl Reporter for ReporterSet {
    fn on_test(&mut self, event: &TestEvent) -> io::Result<()> {
        self.reporters.iter_mut().try_for_each(|r| r.on_test(event))
    }

    fn on_summary(&mut self, summary: &RunSummary) -> io::Result<()> {
        self.reporters.iter_mut().try_for_each(|r| r.on_summary(summary))
    }
}
