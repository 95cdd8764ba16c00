//! Purpose: `sudoku-bridge` CLI entry point.
//! Role: Binary crate root; parses args, reads boards, drives the native solver, prints results.
//! Invariants: stdout carries only the requested board/report; diagnostics go to stderr.
//! Invariants: Non-interactive errors are emitted as JSON on stderr.
//! Invariants: Process exit code is derived from `api::to_exit_code`.
use std::error::Error as StdError;
use std::ffi::OsString;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::error::ErrorKind as ClapErrorKind;
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum, ValueHint};
use clap_complete::aot::Shell;
use serde_json::{Map, Value, json};
use tracing_subscriber::EnvFilter;

mod board_json;
mod command_dispatch;
mod solver_paths;

use sudoku_bridge::api::{Board, EncodedBuffer, Error, ErrorKind, parse_board_text, to_exit_code};

#[derive(Copy, Clone, Debug)]
struct RunOutcome {
    exit_code: i32,
}

impl RunOutcome {
    fn ok() -> Self {
        Self { exit_code: 0 }
    }

    fn with_code(exit_code: i32) -> Self {
        Self { exit_code }
    }
}

fn main() {
    let exit_code = match run(std::env::args_os()) {
        Ok(outcome) => outcome.exit_code,
        Err(err) => {
            emit_error(&err);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run<I>(args: I) -> Result<RunOutcome, Error>
where
    I: IntoIterator<Item = OsString>,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp
            | ClapErrorKind::DisplayVersion
            | ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                err.print().map_err(|io_err| {
                    Error::new(ErrorKind::Io)
                        .with_message("failed to write help")
                        .with_source(io_err)
                })?;
                let exit_code = if matches!(
                    err.kind(),
                    ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) {
                    2
                } else {
                    0
                };
                return Ok(RunOutcome::with_code(exit_code));
            }
            _ => {
                return Err(Error::new(ErrorKind::Usage)
                    .with_message(clap_error_summary(&err))
                    .with_hint("Run `sudoku-bridge --help` for usage."));
            }
        },
    };

    init_tracing();
    command_dispatch::dispatch_command(cli.command, cli.lib, cli.root)
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

#[derive(Parser)]
#[command(
    name = "sudoku-bridge",
    version,
    about = "Solve Sudoku boards with the native libSudokuPy solver",
    long_about = None,
    after_help = r#"EXAMPLES
  $ sudoku-bridge solve 53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79
  $ sudoku-bridge solve -f puzzle.txt --format json
  $ sudoku-bridge check -f puzzle.txt
  $ sudoku-bridge locate

NOTES
  - Boards are 81 characters row-major ('.' for empty), or 9 lines of 9 tokens (0 or '.' for empty)
  - Library: --lib or SUDOKU_SOLVER_LIB, else <root>/bin/libSudokuPy.{so,dylib,dll}
  - Root: --root or SUDOKU_SOLVER_ROOT, else the parent of the executable's directory
  - Logging: RUST_LOG=debug traces native load/solve/release on stderr"#,
    arg_required_else_help = true
)]
struct Cli {
    #[arg(
        long,
        global = true,
        help = "Explicit native solver library path (overrides --root)",
        value_hint = ValueHint::FilePath
    )]
    lib: Option<PathBuf>,
    #[arg(
        long,
        global = true,
        help = "Install root containing bin/libSudokuPy.<ext>",
        value_hint = ValueHint::DirPath
    )]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum BoardFormat {
    Pretty,
    Line,
    Json,
}

#[derive(Args)]
struct BoardInput {
    #[arg(help = "Board as 81 characters ('.' for empty); omit to read stdin")]
    puzzle: Option<String>,
    #[arg(
        short = 'f',
        long = "file",
        help = "Read the board from a file (use - for stdin)",
        conflicts_with = "puzzle",
        value_hint = ValueHint::FilePath
    )]
    file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    #[command(
        about = "Solve a board with the native solver",
        after_help = r#"EXAMPLES
  $ sudoku-bridge solve 53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79
  $ sudoku-bridge --lib ./bin/libSudokuPy.so solve -f puzzle.txt --format line"#
    )]
    Solve {
        #[command(flatten)]
        input: BoardInput,
        #[arg(long, value_enum, default_value = "pretty", help = "Output format")]
        format: BoardFormat,
    },
    #[command(about = "Validate and print a board without calling native code")]
    Check {
        #[command(flatten)]
        input: BoardInput,
        #[arg(long, value_enum, default_value = "pretty", help = "Output format")]
        format: BoardFormat,
    },
    #[command(about = "Show which native solver library would be loaded")]
    Locate,
    #[command(about = "Generate shell completion scripts")]
    Completion {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn read_board(input: &BoardInput) -> Result<Board, Error> {
    if let Some(puzzle) = &input.puzzle {
        return parse_board_text(puzzle);
    }
    match &input.file {
        Some(path) if path.as_os_str() != "-" => {
            let text = std::fs::read_to_string(path).map_err(|err| {
                Error::new(ErrorKind::Io)
                    .with_message("failed to read board file")
                    .with_path(path)
                    .with_source(err)
            })?;
            parse_board_text(&text).map_err(|err| err.with_path(path))
        }
        _ => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text).map_err(|err| {
                Error::new(ErrorKind::Io)
                    .with_message("failed to read board from stdin")
                    .with_source(err)
            })?;
            parse_board_text(&text)
        }
    }
}

fn emit_board(board: &Board, puzzle: Option<&EncodedBuffer>, format: BoardFormat) {
    match format {
        BoardFormat::Pretty => print!("{board}"),
        BoardFormat::Line => println!("{}", board.encode()),
        BoardFormat::Json => emit_json(board_json::board_json(board, puzzle)),
    }
}

fn emit_json(value: Value) {
    let json = if io::stdout().is_terminal() {
        serde_json::to_string_pretty(&value)
    } else {
        serde_json::to_string(&value)
    }
    .unwrap_or_else(|_| "{\"error\":\"json encode failed\"}".to_string());
    println!("{json}");
}

fn emit_error(err: &Error) {
    if io::stderr().is_terminal() {
        eprintln!("{}", error_text(err));
        return;
    }

    let json = serde_json::to_string(&error_json(err)).unwrap_or_else(|_| {
        "{\"error\":{\"kind\":\"Internal\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn error_message(err: &Error) -> String {
    if let Some(message) = err.message() {
        return message.to_string();
    }
    match err.kind() {
        ErrorKind::Internal => "internal error".to_string(),
        ErrorKind::Usage => "usage error".to_string(),
        ErrorKind::UnsupportedPlatform => "unsupported platform".to_string(),
        ErrorKind::LibraryLoad => "native solver library could not be loaded".to_string(),
        ErrorKind::InvalidArgument => "invalid argument".to_string(),
        ErrorKind::NativeCall => "native solver failed".to_string(),
        ErrorKind::Format => "malformed board".to_string(),
        ErrorKind::Io => "i/o error".to_string(),
    }
}

fn error_causes(err: &Error) -> Vec<String> {
    let mut causes = Vec::new();
    let mut cur = err.source();
    while let Some(source) = cur {
        causes.push(source.to_string());
        cur = source.source();
    }
    causes
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    inner.insert("message".to_string(), json!(error_message(err)));
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }
    if let Some(path) = err.path() {
        inner.insert("path".to_string(), json!(path.display().to_string()));
    }
    if let Some(offset) = err.offset() {
        inner.insert("offset".to_string(), json!(offset));
    }
    let causes = error_causes(err);
    if !causes.is_empty() {
        inner.insert("causes".to_string(), json!(causes));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
}

fn error_text(err: &Error) -> String {
    let mut lines = vec![format!("error: {}", error_message(err))];
    if let Some(hint) = err.hint() {
        lines.push(format!("hint: {hint}"));
    }
    if let Some(path) = err.path() {
        lines.push(format!("path: {}", path.display()));
    }
    if let Some(offset) = err.offset() {
        lines.push(format!("offset: {offset}"));
    }
    for cause in error_causes(err) {
        lines.push(format!("caused by: {cause}"));
    }
    lines.join("\n")
}

fn clap_error_summary(err: &clap::Error) -> String {
    err.to_string()
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(|line| line.trim_start_matches("error: ").to_string())
        .unwrap_or_else(|| "invalid arguments".to_string())
}
