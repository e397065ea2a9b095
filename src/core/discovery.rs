//! # Test Discovery Module / 测试发现模块
//!
//! Walks a corpus directory and produces the sorted list of problem files to
//! benchmark. Sorting makes runs reproducible and their reports diffable.
//!
//! 遍历语料库目录并生成需要基准测试的问题文件的有序列表。
//! 排序使运行可复现，报告可比较。

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that prevent a corpus from being discovered at all.
/// 导致完全无法发现语料库的错误。
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("corpus directory '{0}' does not exist")]
    NotFound(PathBuf),

    #[error("corpus path '{0}' is not a directory")]
    NotADirectory(PathBuf),

    #[error("cannot read corpus directory '{path}': {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Inclusion predicate applied to every file name found during the walk.
/// 遍历过程中应用于每个文件名的包含条件。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FileFilter {
    /// Every regular file is a test case.
    #[default]
    All,
    /// Only files whose name ends in `.<ext>`.
    Extension(String),
}

impl FileFilter {
    /// Builds a filter from an optional extension; a leading dot is ignored.
    pub fn from_extension(ext: Option<&str>) -> Self {
        match ext.map(|e| e.trim_start_matches('.')) {
            Some(e) if !e.is_empty() => FileFilter::Extension(e.to_string()),
            _ => FileFilter::All,
        }
    }

    pub fn matches(&self, path: &Path) -> bool {
        match self {
            FileFilter::All => true,
            FileFilter::Extension(ext) => path
                .file_name()
                .and_then(|name| name.to_str())
                .and_then(|name| name.strip_suffix(ext.as_str()))
                .and_then(|stem| stem.strip_suffix('.'))
                .is_some_and(|stem| !stem.is_empty()),
        }
    }
}

/// Recursively collects every file under `root` accepted by `filter`.
///
/// The result is sorted by path. An empty corpus is not an error; a missing or
/// unreadable root is. Nested directories that cannot be read are skipped.
///
/// 递归收集 `root` 下所有被 `filter` 接受的文件，并按路径排序。
pub fn discover_tests(root: &Path, filter: &FileFilter) -> Result<Vec<PathBuf>, DiscoveryError> {
    let metadata = fs::metadata(root).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => DiscoveryError::NotFound(root.to_path_buf()),
        _ => DiscoveryError::Unreadable {
            path: root.to_path_buf(),
            source: e,
        },
    })?;
    if !metadata.is_dir() {
        return Err(DiscoveryError::NotADirectory(root.to_path_buf()));
    }

    let entries = fs::read_dir(root).map_err(|e| DiscoveryError::Unreadable {
        path: root.to_path_buf(),
        source: e,
    })?;

    let mut tests = Vec::new();
    collect_files(entries, filter, &mut tests);
    tests.sort();

    debug!(root = %root.display(), count = tests.len(), "Discovered test files");
    Ok(tests)
}

fn collect_files(entries: fs::ReadDir, filter: &FileFilter, out: &mut Vec<PathBuf>) {
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "Skipping unreadable directory entry");
                continue;
            }
        };
        let path = entry.path();
        let file_type = match entry.file_type() {
            Ok(file_type) => file_type,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Skipping entry of unknown type");
                continue;
            }
        };

        if file_type.is_dir() {
            match fs::read_dir(&path) {
                Ok(nested) => collect_files(nested, filter, out),
                Err(e) => warn!(path = %path.display(), error = %e, "Skipping unreadable directory"),
            }
            continue;
        }

        // Symlinks count only when they resolve to a file; linked directories are not followed.
        let is_file = file_type.is_file()
            || (file_type.is_symlink() && fs::metadata(&path).is_ok_and(|m| m.is_file()));

        if is_file && filter.matches(&path) {
            out.push(path);
        }
    }
}
