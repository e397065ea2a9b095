//! # Solver Bench Library / Solver Bench 库
//!
//! This library provides the core functionality of the `solver-bench` tool,
//! a harness that runs SAT solver executables over a corpus of problem files,
//! classifies what they print and reports outcomes, run times and solver
//! statistics in a stable line format.
//!
//! 此库为 `solver-bench` 工具提供核心功能。
//! 这是一个在问题文件语料库上运行 SAT 求解器可执行文件、对其输出进行分类，
//! 并以稳定的行格式报告结果、运行时间和求解器统计信息的工具。
//!
//! ## Modules / 模块
//!
//! - `core` - Data models, configuration, discovery, classification and the execution loop
//! - `infra` - Process invocation, path helpers and logging setup
//! - `reporting` - Line, console and JSON reporters
//! - `cli` / `commands` - Command-line interface
//!
//! - `core` - 数据模型、配置、测试发现、输出分类和执行循环
//! - `infra` - 进程调用、路径辅助和日志设置
//! - `reporting` - 行格式、控制台和 JSON 报告
//! - `cli` / `commands` - 命令行接口

pub mod cli;
pub mod commands;
pub mod core;
pub mod infra;
pub mod reporting;

// Re-export commonly used items
pub use core::classifier;
pub use core::config;
pub use core::execution;
pub use core::models;
