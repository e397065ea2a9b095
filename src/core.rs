//! # Core Module / 核心模块
//!
//! This module contains the benchmark engine: data models, configuration,
//! test discovery, output classification and the execution loop.
//!
//! 此模块包含基准测试引擎：数据模型、配置、测试发现、输出分类和执行循环。

pub mod classifier;
pub mod config;
pub mod discovery;
pub mod execution;
pub mod models;

// Re-exports
pub use classifier::{AdapterSpec, OutputAdapter};
pub use config::{RunConfig, SolverConfig};
pub use discovery::{discover_tests, DiscoveryError, FileFilter};
pub use execution::run_benchmark;
pub use models::{Outcome, ResultRecord, RunSummary, TestEvent};
