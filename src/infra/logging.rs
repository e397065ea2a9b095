//! # Logging Module / 日志模块
//!
//! Installs the `tracing` subscriber. Diagnostics always go to stderr so that
//! stdout carries nothing but the report.
//!
//! 安装 `tracing` 订阅器。诊断信息始终写入标准错误输出，标准输出只包含报告。

use std::io::{self, IsTerminal};
use tracing::Level;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

/// Maps the number of `-v` flags to a default level; `RUST_LOG` wins if set.
pub fn level_for(verbosity: u8, quiet: bool) -> Level {
    if quiet {
        return Level::ERROR;
    }
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Initializes the global subscriber. Calling it twice is harmless.
pub fn init(verbosity: u8, quiet: bool) {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level_for(verbosity, quiet)).into())
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}
