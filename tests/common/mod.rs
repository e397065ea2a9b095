// Shared test helpers for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

use solver_bench::classifier::{AdapterSpec, OutputAdapter};
use solver_bench::config::SolverConfig;

/// A fake solver in the style of `ivasat`: the content of the input file
/// decides how it behaves.
///
/// - `sat`     prints counters and `Sat`
/// - `unsat`   prints `Unsat`
/// - `bare`    prints `Sat` without counters
/// - `garbage` prints something unrecognizable
/// - `crash`   prints nothing and exits with status 3
/// - `slow`    sleeps for 30 seconds (the PID stays the same thanks to `exec`)
///
/// Every invocation writes its PID next to the input file as `<input>.pid`.
pub const IVASAT_LIKE_SCRIPT: &str = r#"#!/bin/sh
echo $$ > "$1.pid"
case "$(cat "$1")" in
  sat)
    echo "Decisions: 42"
    echo "Conflicts: 7"
    echo "Sat"
    ;;
  unsat)
    echo "Decisions: 10"
    echo "Conflicts: 3"
    echo "Unsat"
    ;;
  bare)
    echo "Sat"
    ;;
  garbage)
    echo "Segmentation fault?"
    ;;
  crash)
    exit 3
    ;;
  slow)
    exec sleep 30
    ;;
esac
"#;

/// A fake MiniSat: always answers `SATISFIABLE` with MiniSat-style statistics
/// and exits with status 10, like the real one.
pub const MINISAT_LIKE_SCRIPT: &str = r#"#!/bin/sh
echo "============================[ Problem Statistics ]============================="
echo "restarts              : 1"
echo "conflicts             : 12             (6000 /sec)"
echo "decisions             : 34             (0.00 % random) (17000 /sec)"
echo "propagations          : 120            (60000 /sec)"
echo ""
echo "SATISFIABLE"
exit 10
"#;

/// Writes an executable shell script into `dir`.
pub fn write_script(dir: &Path, name: &str, content: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to write script");
    let mut perms = fs::metadata(&path).expect("Failed to stat script").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).expect("Failed to make script executable");
    path
}

/// Creates a corpus directory whose files contain the given behaviour keywords.
pub fn create_corpus(files: &[(&str, &str)]) -> TempDir {
    let dir = tempdir().expect("Failed to create temporary directory");
    for (name, content) in files {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create corpus subdirectory");
        }
        fs::write(&path, content).expect("Failed to write corpus file");
    }
    dir
}

pub fn solver(name: &str, program: PathBuf, adapter: AdapterSpec) -> SolverConfig {
    SolverConfig {
        name: name.to_string(),
        program,
        args: vec![],
        adapter: OutputAdapter::new(adapter).expect("Built-in adapters compile"),
    }
}

/// Returns `true` while a process with this PID exists (zombies included).
pub fn process_exists(pid: u32) -> bool {
    Path::new(&format!("/proc/{pid}")).exists()
}

pub fn read_pid(input: &Path) -> u32 {
    let pid_file = PathBuf::from(format!("{}.pid", input.display()));
    fs::read_to_string(&pid_file)
        .expect("Script should have written its PID")
        .trim()
        .parse()
        .expect("PID file should contain a number")
}
