//! # Solver Invocation Module / 求解器调用模块
//!
//! Runs one solver executable on one input file under a timeout and captures
//! what it prints. The child process is always reaped before [`run_solver`]
//! returns, whether it exited on its own, timed out or failed midway.
//!
//! 在超时限制下对一个输入文件运行一个求解器可执行文件，并捕获其输出。
//! 无论子进程是正常退出、超时还是中途失败，[`run_solver`] 返回前都会回收子进程。

use std::io;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::string::FromUtf8Error;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// How long output readers may keep running after the child has exited.
/// A grandchild that inherited the pipes can otherwise hold them open forever.
const STREAM_FLUSH_TIMEOUT: Duration = Duration::from_secs(2);

/// Everything observed from a solver that exited within its time budget.
/// 在时间预算内退出的求解器的全部观测结果。
#[derive(Debug, Clone)]
pub struct CapturedOutput {
    pub stdout: String,
    pub stderr: String,
    pub status: ExitStatus,
    pub elapsed: Duration,
}

/// Why an invocation did not produce a [`CapturedOutput`].
/// 调用未能产生 [`CapturedOutput`] 的原因。
#[derive(Debug, Error)]
pub enum InvocationError {
    #[error("failed to spawn '{program}': {source}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed waiting for '{program}': {source}")]
    Wait {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to capture {stream} of '{program}': {source}")]
    Capture {
        program: PathBuf,
        stream: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("stdout of '{program}' is not valid UTF-8: {source}")]
    Decode {
        program: PathBuf,
        #[source]
        source: FromUtf8Error,
    },

    #[error("'{program}' did not finish within {}s", .timeout.as_secs_f64())]
    Timeout { program: PathBuf, timeout: Duration },
}

impl InvocationError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, InvocationError::Timeout { .. })
    }
}

/// Runs `program args... input` and waits at most `timeout` for it to exit.
///
/// # Arguments
/// * `program` - Solver executable; a bare name is resolved through `PATH`
/// * `args` - Extra arguments, placed before the input file
/// * `input` - The problem file passed as the last argument
/// * `timeout` - Wall-clock budget for the process
///
/// # Returns
/// The captured output on any exit code, or an [`InvocationError`]. On
/// timeout the child is killed and reaped first.
///
/// 运行 `program args... input` 并最多等待 `timeout`。
/// 任何退出码都返回捕获的输出；超时时会先终止并回收子进程。
pub async fn run_solver(
    program: &Path,
    args: &[String],
    input: &Path,
    timeout: Duration,
) -> Result<CapturedOutput, InvocationError> {
    let mut cmd = Command::new(program);
    cmd.args(args)
        .arg(input)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    debug!(program = %program.display(), args = ?args, input = %input.display(), "Spawning solver");

    let start = Instant::now();
    let mut child = cmd.spawn().map_err(|source| InvocationError::Spawn {
        program: program.to_path_buf(),
        source,
    })?;

    let (stdout, stderr) = match (child.stdout.take(), child.stderr.take()) {
        (Some(stdout), Some(stderr)) => (stdout, stderr),
        (stdout, _) => {
            terminate(&mut child, program).await;
            let stream = if stdout.is_none() { "stdout" } else { "stderr" };
            return Err(InvocationError::Capture {
                program: program.to_path_buf(),
                stream,
                source: io::Error::other("pipe was not opened"),
            });
        }
    };

    // Drain both pipes while waiting so a verbose solver cannot block on a full pipe.
    let stdout_task = tokio::spawn(read_stream(stdout));
    let stderr_task = tokio::spawn(read_stream(stderr));

    let status = match tokio::time::timeout(timeout, child.wait()).await {
        Ok(Ok(status)) => status,
        Ok(Err(source)) => {
            terminate(&mut child, program).await;
            stdout_task.abort();
            stderr_task.abort();
            return Err(InvocationError::Wait {
                program: program.to_path_buf(),
                source,
            });
        }
        Err(_) => {
            debug!(
                program = %program.display(),
                timeout_secs = timeout.as_secs_f64(),
                "Solver timed out, killing process"
            );
            terminate(&mut child, program).await;
            stdout_task.abort();
            stderr_task.abort();
            return Err(InvocationError::Timeout {
                program: program.to_path_buf(),
                timeout,
            });
        }
    };
    let elapsed = start.elapsed();

    let stdout = join_stream(stdout_task)
        .await
        .map_err(|source| InvocationError::Capture {
            program: program.to_path_buf(),
            stream: "stdout",
            source,
        })?;
    let stderr = join_stream(stderr_task).await.unwrap_or_else(|e| {
        warn!(program = %program.display(), error = %e, "Failed to capture solver stderr");
        Vec::new()
    });

    let stdout = String::from_utf8(stdout).map_err(|source| InvocationError::Decode {
        program: program.to_path_buf(),
        source,
    })?;
    let stderr = String::from_utf8_lossy(&stderr).into_owned();

    debug!(
        program = %program.display(),
        status = %status,
        elapsed_secs = elapsed.as_secs_f64(),
        "Solver exited"
    );
    if !stderr.trim().is_empty() {
        debug!(program = %program.display(), stderr = %stderr.trim(), "Solver wrote to stderr");
    }

    Ok(CapturedOutput {
        stdout,
        stderr,
        status,
        elapsed,
    })
}

/// Kills the child and waits for it, so no process outlives the invocation.
async fn terminate(child: &mut Child, program: &Path) {
    if let Err(e) = child.kill().await {
        // The child may already have exited; make sure it is reaped either way.
        warn!(program = %program.display(), error = %e, "Failed to kill solver process");
        if let Err(e) = child.wait().await {
            warn!(program = %program.display(), error = %e, "Failed to reap solver process");
        }
    }
}

async fn read_stream<R: AsyncRead + Unpin>(mut stream: R) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    stream.read_to_end(&mut buf).await?;
    Ok(buf)
}

async fn join_stream(handle: JoinHandle<io::Result<Vec<u8>>>) -> io::Result<Vec<u8>> {
    let abort = handle.abort_handle();
    match tokio::time::timeout(STREAM_FLUSH_TIMEOUT, handle).await {
        Ok(Ok(result)) => result,
        Ok(Err(join_error)) => Err(io::Error::other(join_error)),
        Err(_) => {
            abort.abort();
            Err(io::Error::new(
                io::ErrorKind::TimedOut,
                "output pipe stayed open after the solver exited",
            ))
        }
    }
}
