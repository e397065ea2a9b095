//! # Command Module Unit Tests / Command 模块单元测试
//!
//! Tests `run_solver`: output capture, timeouts, spawn failures and the
//! guarantee that no solver process outlives the call.
//!
//! 测试 `run_solver`：输出捕获、超时、启动失败，以及求解器进程不会在调用结束后残留。
#![cfg(unix)]

mod common;

use common::{create_corpus, write_script, IVASAT_LIKE_SCRIPT};
use solver_bench::infra::command::{run_solver, InvocationError};
use std::path::Path;
use std::time::{Duration, Instant};
use tempfile::tempdir;

#[tokio::test]
async fn test_captures_stdout_and_elapsed_time() {
    let bin = tempdir().unwrap();
    let solver = write_script(bin.path(), "ivasat", IVASAT_LIKE_SCRIPT);
    let corpus = create_corpus(&[("a.cnf", "sat")]);

    let output = run_solver(&solver, &[], &corpus.path().join("a.cnf"), Duration::from_secs(10))
        .await
        .unwrap();

    assert_eq!(output.stdout, "Decisions: 42\nConflicts: 7\nSat\n");
    assert!(output.status.success());
    assert!(output.elapsed < Duration::from_secs(10));
}

#[tokio::test]
async fn test_nonzero_exit_is_not_an_invocation_error() {
    let bin = tempdir().unwrap();
    let solver = write_script(bin.path(), "ivasat", IVASAT_LIKE_SCRIPT);
    let corpus = create_corpus(&[("c.cnf", "crash")]);

    let output = run_solver(&solver, &[], &corpus.path().join("c.cnf"), Duration::from_secs(10))
        .await
        .unwrap();

    assert_eq!(output.status.code(), Some(3));
    assert!(output.stdout.is_empty());
}

#[tokio::test]
async fn test_extra_args_come_before_input() {
    let bin = tempdir().unwrap();
    let solver = write_script(bin.path(), "echo_args", "#!/bin/sh\necho \"$@\"\necho oops >&2\n");
    let input = Path::new("problem.cnf");

    let args = vec!["-verb=0".to_string(), "--seed".to_string(), "7".to_string()];
    let output = run_solver(&solver, &args, input, Duration::from_secs(10))
        .await
        .unwrap();

    assert_eq!(output.stdout.trim(), "-verb=0 --seed 7 problem.cnf");
    assert_eq!(output.stderr.trim(), "oops");
}

#[tokio::test]
async fn test_missing_executable_is_spawn_error() {
    let bin = tempdir().unwrap();
    let missing = bin.path().join("no_such_solver");

    let err = run_solver(&missing, &[], Path::new("x.cnf"), Duration::from_secs(1))
        .await
        .unwrap_err();

    assert!(matches!(err, InvocationError::Spawn { .. }));
    assert!(!err.is_timeout());
}

#[tokio::test]
async fn test_non_executable_file_is_spawn_error() {
    let bin = tempdir().unwrap();
    let not_executable = bin.path().join("solver.txt");
    std::fs::write(&not_executable, "#!/bin/sh\necho Sat\n").unwrap();

    let err = run_solver(&not_executable, &[], Path::new("x.cnf"), Duration::from_secs(1))
        .await
        .unwrap_err();

    assert!(matches!(err, InvocationError::Spawn { .. }));
}

#[tokio::test]
async fn test_invalid_utf8_is_decode_error() {
    let bin = tempdir().unwrap();
    let solver = write_script(bin.path(), "binary", "#!/bin/sh\nprintf '\\377\\376Sat\\n'\n");

    let err = run_solver(&solver, &[], Path::new("x.cnf"), Duration::from_secs(10))
        .await
        .unwrap_err();

    assert!(matches!(err, InvocationError::Decode { .. }));
}

#[tokio::test]
async fn test_large_output_does_not_deadlock() {
    let bin = tempdir().unwrap();
    // Far more than a pipe buffer on both streams before exiting.
    let solver = write_script(
        bin.path(),
        "chatty",
        "#!/bin/sh\ni=0\nwhile [ $i -lt 20000 ]; do echo \"c line $i\"; echo \"c err $i\" >&2; i=$((i+1)); done\necho Sat\n",
    );

    let output = run_solver(&solver, &[], Path::new("x.cnf"), Duration::from_secs(30))
        .await
        .unwrap();

    assert_eq!(output.stdout.lines().count(), 20001);
    assert_eq!(output.stdout.lines().last(), Some("Sat"));
}

#[tokio::test]
async fn test_timeout_reports_configured_budget() {
    let bin = tempdir().unwrap();
    let solver = write_script(bin.path(), "ivasat", IVASAT_LIKE_SCRIPT);
    let corpus = create_corpus(&[("slow.cnf", "slow")]);

    let started = Instant::now();
    let err = run_solver(&solver, &[], &corpus.path().join("slow.cnf"), Duration::from_secs(1))
        .await
        .unwrap_err();
    let wall = started.elapsed();

    match err {
        InvocationError::Timeout { timeout, .. } => assert_eq!(timeout, Duration::from_secs(1)),
        other => panic!("Expected a timeout, got {other:?}"),
    }
    assert!(wall < Duration::from_secs(10), "Took {wall:?}, the 30s sleep was not cut short");
}

#[cfg(target_os = "linux")]
mod reaping_tests {
    use super::*;
    use common::{process_exists, read_pid};

    #[tokio::test]
    async fn test_no_process_left_after_normal_exit() {
        let bin = tempdir().unwrap();
        let solver = write_script(bin.path(), "ivasat", IVASAT_LIKE_SCRIPT);
        let corpus = create_corpus(&[("a.cnf", "sat")]);
        let input = corpus.path().join("a.cnf");

        run_solver(&solver, &[], &input, Duration::from_secs(10))
            .await
            .unwrap();

        assert!(!process_exists(read_pid(&input)));
    }

    #[tokio::test]
    async fn test_no_process_left_after_timeout() {
        let bin = tempdir().unwrap();
        let solver = write_script(bin.path(), "ivasat", IVASAT_LIKE_SCRIPT);
        let corpus = create_corpus(&[("slow.cnf", "slow")]);
        let input = corpus.path().join("slow.cnf");

        let err = run_solver(&solver, &[], &input, Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(err.is_timeout());

        assert!(!process_exists(read_pid(&input)));
    }
}
