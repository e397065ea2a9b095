//! # Infrastructure Module / 基础设施模块
//!
//! This module provides infrastructure services for the benchmark harness:
//! running solver processes under a timeout, resolving file system paths and
//! setting up logging.
//!
//! 此模块为基准测试工具提供基础设施服务：
//! 在超时限制下运行求解器进程、解析文件系统路径以及设置日志。

pub mod command;
pub mod fs;
pub mod logging;
