//! Purpose: Hold top-level CLI command dispatch for `sudoku-bridge`.
//! Exports: `dispatch_command`.
//! Role: Keep `main.rs` focused on parse/bootstrap and delegate command execution.
//! Invariants: Input is parsed before the native library is loaded.
//! Invariants: A failed solve prints nothing on stdout.

use super::*;
use super::solver_paths::{LIB_ENV, ROOT_ENV, env_path, resolve_library_source};
use sudoku_bridge::api::Platform;

pub(super) fn dispatch_command(
    command: Command,
    lib: Option<PathBuf>,
    root: Option<PathBuf>,
) -> Result<RunOutcome, Error> {
    let source = resolve_library_source(
        lib.or_else(|| env_path(LIB_ENV)),
        root.or_else(|| env_path(ROOT_ENV)),
        Platform::host(),
    );

    match command {
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::aot::generate(shell, &mut cmd, "sudoku-bridge", &mut io::stdout());
            Ok(RunOutcome::ok())
        }
        Command::Locate => {
            let platform = source.platform();
            let suffix = platform.library_suffix().ok();
            let path = source.path().ok();
            emit_json(board_json::artifact_json(
                platform.name(),
                suffix,
                path.as_deref(),
            ));
            Ok(RunOutcome::ok())
        }
        Command::Check { input, format } => {
            let board = read_board(&input)?;
            emit_board(&board, None, format);
            Ok(RunOutcome::ok())
        }
        Command::Solve { input, format } => {
            let mut board = read_board(&input)?;
            let puzzle = board.encode();
            let binding = source.load()?;
            binding.solve_board(&mut board)?;
            tracing::debug!(library = %binding.native().path().display(), "board solved");
            emit_board(&board, Some(&puzzle), format);
            // The answer is already out; an unload failure only merits a warning.
            if let Err(err) = binding.close() {
                tracing::warn!(error = %err, "failed to unload native solver");
            }
            Ok(RunOutcome::ok())
        }
    }
}
