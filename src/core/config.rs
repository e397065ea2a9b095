//! # Configuration Module / 配置模块
//!
//! Resolves the settings of one benchmark run from three layers, highest
//! precedence first: command line flags, an optional TOML configuration file,
//! and built-in defaults.
//!
//! 从三个层次解析一次基准测试运行的设置（优先级从高到低）：
//! 命令行参数、可选的 TOML 配置文件以及内置默认值。

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::core::classifier::{AdapterSpec, OutputAdapter};
use crate::core::discovery::FileFilter;
use crate::infra::fs::expand_path;

/// Where the primary solver is expected after a release CMake build.
pub const DEFAULT_TOOL_PATH: &str = "cmake-build-release/src/ivasat";
/// The reference solver, looked up in `PATH`.
pub const DEFAULT_MINISAT_PATH: &str = "minisat";
pub const DEFAULT_TOOL_ADAPTER: &str = "ivasat";
pub const DEFAULT_MINISAT_ADAPTER: &str = "minisat";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Errors raised while loading or resolving the run configuration.
/// 加载或解析运行配置时产生的错误。
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("unknown output adapter '{name}' (built-in adapters: {})", AdapterSpec::BUILTIN_NAMES.join(", "))]
    UnknownAdapter { name: String },

    #[error("output adapter '{name}' has an invalid counter label: {source}")]
    InvalidAdapter {
        name: String,
        #[source]
        source: regex::Error,
    },

    #[error("output adapter '{name}' must define non-empty verdict tokens and counter labels")]
    EmptyAdapterField { name: String },

    #[error("cannot split solver arguments: {0}")]
    InvalidArgs(String),

    #[error("cannot expand path '{raw}': {message}")]
    InvalidPath { raw: String, message: String },

    #[error("timeout must be at least 1 second")]
    ZeroTimeout,
}

/// The on-disk configuration file.
/// 磁盘上的配置文件。
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BenchConfig {
    /// Per-invocation timeout in seconds / 每次调用的超时时间（秒）
    pub timeout_secs: Option<u64>,
    /// Only files with this extension are benchmarked / 仅对该扩展名的文件进行测试
    pub extension: Option<String>,
    /// The solver under test / 被测求解器
    pub primary: Option<SolverSection>,
    /// The reference solver; its presence enables the comparison.
    /// 参考求解器；存在时启用对比。
    pub secondary: Option<SolverSection>,
    /// Additional output adapters, keyed by name / 额外的输出适配器，按名称索引
    #[serde(default)]
    pub adapters: BTreeMap<String, AdapterSpec>,
}

impl BenchConfig {
    /// Reads and parses a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Finds an adapter by name, preferring the ones defined in this file.
    pub fn adapter(&self, name: &str) -> Result<OutputAdapter, ConfigError> {
        let spec = self
            .adapters
            .get(name)
            .cloned()
            .or_else(|| AdapterSpec::builtin(name))
            .ok_or_else(|| ConfigError::UnknownAdapter {
                name: name.to_string(),
            })?;

        let fields = [
            &spec.sat_token,
            &spec.unsat_token,
            &spec.decisions_label,
            &spec.conflicts_label,
        ];
        if fields.iter().any(|f| f.trim().is_empty()) {
            return Err(ConfigError::EmptyAdapterField {
                name: name.to_string(),
            });
        }

        OutputAdapter::new(spec).map_err(|source| ConfigError::InvalidAdapter {
            name: name.to_string(),
            source,
        })
    }
}

/// One `[primary]` or `[secondary]` table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SolverSection {
    pub name: Option<String>,
    pub path: Option<String>,
    #[serde(default)]
    pub args: Vec<String>,
    pub adapter: Option<String>,
}

/// Values given on the command line. `None` means "not given".
/// 命令行给出的值。`None` 表示未指定。
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub tool_path: Option<String>,
    /// Raw argument string, split with shell quoting rules.
    pub tool_args: Option<String>,
    pub tool_adapter: Option<String>,
    pub minisat: bool,
    pub minisat_path: Option<String>,
    pub minisat_args: Option<String>,
    pub minisat_adapter: Option<String>,
    pub timeout_secs: Option<u64>,
    pub extension: Option<String>,
}

/// A solver ready to be invoked.
/// 一个可以被调用的求解器。
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Display name used in logs and reports / 日志和报告中使用的名称
    pub name: String,
    /// The executable / 可执行文件
    pub program: PathBuf,
    /// Extra arguments placed before the input file / 放在输入文件之前的额外参数
    pub args: Vec<String>,
    /// How this solver's output is read / 如何解析该求解器的输出
    pub adapter: OutputAdapter,
}

/// Fully resolved settings of one benchmark run.
/// 一次基准测试运行的完整解析设置。
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub primary: SolverConfig,
    pub secondary: Option<SolverConfig>,
    pub timeout: Duration,
    pub filter: FileFilter,
}

impl RunConfig {
    /// Merges command line overrides over the file configuration and defaults.
    pub fn resolve(cli: &CliOverrides, file: &BenchConfig) -> Result<Self, ConfigError> {
        let timeout_secs = cli
            .timeout_secs
            .or(file.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        let extension = cli.extension.as_deref().or(file.extension.as_deref());

        let primary_section = file.primary.clone().unwrap_or_default();
        let primary = resolve_solver(
            &primary_section,
            SolverFlags {
                path: cli.tool_path.as_deref(),
                args: cli.tool_args.as_deref(),
                adapter: cli.tool_adapter.as_deref(),
            },
            DEFAULT_TOOL_PATH,
            DEFAULT_TOOL_ADAPTER,
            file,
        )?;

        let secondary = if cli.minisat || file.secondary.is_some() {
            let section = file.secondary.clone().unwrap_or_default();
            Some(resolve_solver(
                &section,
                SolverFlags {
                    path: cli.minisat_path.as_deref(),
                    args: cli.minisat_args.as_deref(),
                    adapter: cli.minisat_adapter.as_deref(),
                },
                DEFAULT_MINISAT_PATH,
                DEFAULT_MINISAT_ADAPTER,
                file,
            )?)
        } else {
            None
        };

        Ok(Self {
            primary,
            secondary,
            timeout: Duration::from_secs(timeout_secs),
            filter: FileFilter::from_extension(extension),
        })
    }
}

struct SolverFlags<'a> {
    path: Option<&'a str>,
    args: Option<&'a str>,
    adapter: Option<&'a str>,
}

fn resolve_solver(
    section: &SolverSection,
    flags: SolverFlags<'_>,
    default_path: &str,
    default_adapter: &str,
    file: &BenchConfig,
) -> Result<SolverConfig, ConfigError> {
    let raw_path = flags
        .path
        .or(section.path.as_deref())
        .unwrap_or(default_path);
    let program = expand_path(raw_path).map_err(|e| ConfigError::InvalidPath {
        raw: raw_path.to_string(),
        message: e.to_string(),
    })?;

    let args = match flags.args {
        Some(raw) => split_args(raw)?,
        None => section.args.clone(),
    };

    let adapter_name = flags
        .adapter
        .or(section.adapter.as_deref())
        .unwrap_or(default_adapter);
    let adapter = file.adapter(adapter_name)?;

    let name = section.name.clone().unwrap_or_else(|| {
        program
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| adapter_name.to_string())
    });

    Ok(SolverConfig {
        name,
        program,
        args,
        adapter,
    })
}

/// Splits an argument string the way a POSIX shell would.
///
/// ```
/// use solver_bench::core::config::split_args;
/// assert_eq!(split_args("-verb=0 'a b'").unwrap(), vec!["-verb=0", "a b"]);
/// ```
pub fn split_args(raw: &str) -> Result<Vec<String>, ConfigError> {
    shlex::split(raw).ok_or_else(|| ConfigError::InvalidArgs(raw.to_string()))
}
