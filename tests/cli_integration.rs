// CLI integration tests for board input, artifact resolution, and error exit codes.
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde_json::Value;

const PUZZLE: &str =
    "53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79";

const SOLUTION: &str =
    "534678912672195348198342567859761423426853791713924856961537284287419635345286179";

const GRID: &str = "\
5 3 0 0 7 0 0 0 0
6 0 0 1 9 5 0 0 0
0 9 8 0 0 0 0 6 0
8 0 0 0 6 0 0 0 3
4 0 0 8 0 3 0 0 1
7 0 0 0 2 0 0 0 6
0 6 0 0 0 0 2 8 0
0 0 0 4 1 9 0 0 5
0 0 0 0 8 0 0 7 9
";

fn cmd() -> Command {
    let exe = env!("CARGO_BIN_EXE_sudoku-bridge");
    let mut command = Command::new(exe);
    command
        .env_remove("SUDOKU_SOLVER_LIB")
        .env_remove("SUDOKU_SOLVER_ROOT")
        .env_remove("RUST_LOG")
        .env_remove("SUDOKU_STUB_MODE")
        .env_remove("SUDOKU_STUB_LOG");
    command
}

// Install root holding the stub solver compiled by build.rs.
fn stub_root() -> PathBuf {
    let root = option_env!("SUDOKU_STUB_ROOT")
        .expect("stub solver was not built; check the build script warnings");
    PathBuf::from(root)
}

fn stub_solve(mode: &str, log: &Path) -> std::process::Output {
    cmd()
        .env("SUDOKU_STUB_MODE", mode)
        .env("SUDOKU_STUB_LOG", log)
        .args(["--root", stub_root().to_str().unwrap()])
        .args(["solve", PUZZLE, "--format", "json"])
        .output()
        .expect("solve")
}

// (solve calls, free calls) recorded by the stub solver.
fn stub_events(log: &Path) -> (usize, usize) {
    let text = std::fs::read_to_string(log).unwrap_or_default();
    let solves = text.lines().filter(|line| *line == "solve").count();
    let frees = text.lines().filter(|line| *line == "free").count();
    (solves, frees)
}

fn parse_json(output: &[u8]) -> Value {
    let text = String::from_utf8_lossy(output);
    // Warnings from the tracing layer may precede the JSON error line.
    let line = text
        .lines()
        .find(|line| line.starts_with('{'))
        .expect("json line");
    serde_json::from_str(line).expect("valid json")
}

#[test]
fn check_echoes_encoded_line() {
    let check = cmd()
        .args(["check", PUZZLE, "--format", "line"])
        .output()
        .expect("check");
    assert!(check.status.success());
    assert_eq!(String::from_utf8_lossy(&check.stdout).trim(), PUZZLE);
}

#[test]
fn check_reads_grid_file_as_json() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("puzzle.txt");
    std::fs::write(&path, GRID).expect("write");

    let check = cmd()
        .args(["check", "-f", path.to_str().unwrap(), "--format", "json"])
        .output()
        .expect("check");
    assert!(check.status.success());
    let value = parse_json(&check.stdout);
    assert_eq!(value["board"], PUZZLE);
    assert_eq!(value["filled"], 30);
    assert_eq!(value["complete"], false);
    assert_eq!(value["rows"][0][0], 5);
    assert!(value.get("puzzle").is_none());
}

#[test]
fn check_reads_stdin() {
    let mut child = cmd()
        .args(["check", "--format", "line"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("spawn");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(GRID.as_bytes())
        .expect("write");
    let output = child.wait_with_output().expect("wait");
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), PUZZLE);
}

#[test]
fn check_pretty_prints_grid() {
    let check = cmd().args(["check", PUZZLE]).output().expect("check");
    assert!(check.status.success());
    let text = String::from_utf8_lossy(&check.stdout);
    let first = text.lines().next().expect("first row");
    assert_eq!(first, "5 3 . | . 7 . | . . .");
    assert_eq!(text.lines().count(), 11);
}

#[test]
fn malformed_board_exits_with_format_code() {
    let check = cmd()
        .args(["check", &PUZZLE[..80]])
        .output()
        .expect("check");
    assert_eq!(check.status.code().unwrap(), 7);
    assert!(check.stdout.is_empty());
    let err = parse_json(&check.stderr);
    assert_eq!(err["error"]["kind"], "Format");

    let bad = PUZZLE.replacen('.', "x", 1);
    let check = cmd().args(["check", &bad]).output().expect("check");
    assert_eq!(check.status.code().unwrap(), 7);
    let err = parse_json(&check.stderr);
    assert_eq!(err["error"]["offset"], 2);
}

#[test]
fn missing_library_exits_with_load_code() {
    let temp = tempfile::tempdir().expect("tempdir");
    let lib = temp.path().join("libSudokuPy.so");

    let solve = cmd()
        .args(["--lib", lib.to_str().unwrap(), "solve", PUZZLE])
        .output()
        .expect("solve");
    assert_eq!(solve.status.code().unwrap(), 4);
    assert!(solve.stdout.is_empty());
    let err = parse_json(&solve.stderr);
    assert_eq!(err["error"]["kind"], "LibraryLoad");
    assert_eq!(err["error"]["path"], lib.to_str().unwrap());
}

#[test]
fn unloadable_library_exits_with_load_code() {
    let temp = tempfile::tempdir().expect("tempdir");
    let lib = temp.path().join("libSudokuPy.so");
    std::fs::write(&lib, b"definitely not ELF").expect("write");

    let solve = cmd()
        .args(["--lib", lib.to_str().unwrap(), "solve", PUZZLE])
        .output()
        .expect("solve");
    assert_eq!(solve.status.code().unwrap(), 4);
    let err = parse_json(&solve.stderr);
    assert!(err["error"]["causes"].as_array().is_some_and(|c| !c.is_empty()));
}

#[test]
fn env_library_path_is_honored() {
    let temp = tempfile::tempdir().expect("tempdir");
    let lib = temp.path().join("from-env.so");

    let solve = cmd()
        .env("SUDOKU_SOLVER_LIB", &lib)
        .args(["solve", PUZZLE])
        .output()
        .expect("solve");
    assert_eq!(solve.status.code().unwrap(), 4);
    let err = parse_json(&solve.stderr);
    assert_eq!(err["error"]["path"], lib.to_str().unwrap());
}

#[test]
fn board_is_validated_before_library_load() {
    let solve = cmd()
        .args(["--lib", "/nonexistent/libSudokuPy.so", "solve", "123"])
        .output()
        .expect("solve");
    assert_eq!(solve.status.code().unwrap(), 7);
}

#[cfg(any(target_os = "linux", target_os = "macos", target_os = "windows"))]
#[test]
fn locate_reports_platform_artifact() {
    let temp = tempfile::tempdir().expect("tempdir");
    let expected_suffix = if cfg!(target_os = "linux") {
        ".so"
    } else if cfg!(target_os = "macos") {
        ".dylib"
    } else {
        ".dll"
    };

    let locate = cmd()
        .args(["--root", temp.path().to_str().unwrap(), "locate"])
        .output()
        .expect("locate");
    assert!(locate.status.success());
    let value = parse_json(&locate.stdout);
    assert_eq!(value["suffix"], expected_suffix);
    assert_eq!(value["exists"], false);
    let expected = temp
        .path()
        .join("bin")
        .join(format!("libSudokuPy{expected_suffix}"));
    assert_eq!(value["path"], expected.to_str().unwrap());

    std::fs::create_dir_all(temp.path().join("bin")).expect("mkdir");
    std::fs::write(&expected, b"").expect("touch");
    let locate = cmd()
        .args(["--root", temp.path().to_str().unwrap(), "locate"])
        .output()
        .expect("locate");
    assert_eq!(parse_json(&locate.stdout)["exists"], true);
}

#[test]
fn unknown_flag_is_usage_error() {
    let output = cmd()
        .args(["check", "--bogus"])
        .output()
        .expect("check");
    assert_eq!(output.status.code().unwrap(), 2);
    let err = parse_json(&output.stderr);
    assert_eq!(err["error"]["kind"], "Usage");
}

#[test]
fn completion_emits_script() {
    let output = cmd()
        .args(["completion", "bash"])
        .output()
        .expect("completion");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("sudoku-bridge"));
}

#[test]
fn solve_through_native_library_reports_solved_board() {
    let temp = tempfile::tempdir().expect("tempdir");
    let log = temp.path().join("stub.log");

    let solve = stub_solve("solved", &log);
    assert!(solve.status.success(), "stderr: {}", String::from_utf8_lossy(&solve.stderr));
    let value = parse_json(&solve.stdout);
    assert_eq!(value["puzzle"], PUZZLE);
    assert_eq!(value["board"], SOLUTION);
    assert_eq!(value["solved"], true);
    assert_eq!(value["filled"], 81);
    assert!(solve.stderr.is_empty());
    assert_eq!(stub_events(&log), (1, 1));
}

#[test]
fn null_native_result_exits_with_native_call_code() {
    let temp = tempfile::tempdir().expect("tempdir");
    let log = temp.path().join("stub.log");

    let solve = stub_solve("null", &log);
    assert_eq!(solve.status.code().unwrap(), 6);
    assert!(solve.stdout.is_empty());
    let err = parse_json(&solve.stderr);
    assert_eq!(err["error"]["kind"], "NativeCall");
    assert_eq!(stub_events(&log), (1, 0));
}

#[test]
fn short_native_result_is_format_error_and_freed() {
    let temp = tempfile::tempdir().expect("tempdir");
    let log = temp.path().join("stub.log");

    let solve = stub_solve("short", &log);
    assert_eq!(solve.status.code().unwrap(), 7);
    assert!(solve.stdout.is_empty());
    let err = parse_json(&solve.stderr);
    assert_eq!(err["error"]["kind"], "Format");
    assert_eq!(stub_events(&log), (1, 1));
}

#[test]
fn unterminated_native_result_is_format_error_and_freed() {
    let temp = tempfile::tempdir().expect("tempdir");
    let log = temp.path().join("stub.log");

    let solve = stub_solve("long", &log);
    assert_eq!(solve.status.code().unwrap(), 7);
    assert!(solve.stdout.is_empty());
    assert_eq!(parse_json(&solve.stderr)["error"]["kind"], "Format");
    assert_eq!(stub_events(&log), (1, 1));
}
