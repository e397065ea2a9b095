//! # File System Helpers Module / 文件系统辅助模块
//!
//! Path expansion and resolution used when turning user input into solver
//! locations.
//!
//! 将用户输入转换为求解器位置时使用的路径展开与解析功能。

use std::env::VarError;
use std::fs;
use std::path::{Path, PathBuf};

/// Expands `~` and environment variables in a user-supplied path.
///
/// # Arguments
/// * `raw` - The path as written on the command line or in the config file
///
/// # Returns
/// The expanded path, or an error naming the variable that could not be resolved
pub fn expand_path(raw: &str) -> Result<PathBuf, shellexpand::LookupError<VarError>> {
    let expanded = shellexpand::full(raw)?;
    Ok(PathBuf::from(expanded.as_ref()))
}

/// Resolves `path` to an absolute path if it exists, otherwise returns it unchanged.
///
/// Bare executable names such as `minisat` are left alone so the OS can look
/// them up in `PATH`.
pub fn display_location(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
