//! # Commands Module / 命令模块
//!
//! Entry points wired to the command line.
//!
//! 与命令行连接的入口点。

pub mod run;
