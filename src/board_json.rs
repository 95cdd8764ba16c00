//! Purpose: JSON views of boards and artifact resolution for CLI output.
//! Exports: `board_json`, `artifact_json`.
//! Role: Stable stdout schema for `solve`, `check`, and `locate`.
//! Invariants: Fields are additive-only; `rows` holds numbers or null.
use serde::Serialize;
use serde_json::Value;
use std::path::Path;

use sudoku_bridge::api::{Board, EncodedBuffer};

#[derive(Serialize)]
struct BoardReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    puzzle: Option<&'a str>,
    board: String,
    rows: Vec<Vec<Option<u8>>>,
    filled: usize,
    complete: bool,
    solved: bool,
}

#[derive(Serialize)]
struct ArtifactReport<'a> {
    platform: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    suffix: Option<&'a str>,
    path: Option<String>,
    exists: bool,
}

pub(crate) fn board_json(board: &Board, puzzle: Option<&EncodedBuffer>) -> Value {
    let rows: Vec<Vec<Option<u8>>> = board
        .rows()
        .map(|row| {
            row.iter()
                .map(|cell| cell.map(|digit| digit.get()))
                .collect::<Vec<_>>()
        })
        .collect();
    let report = BoardReport {
        puzzle: puzzle.map(EncodedBuffer::as_str),
        board: board.encode().to_string(),
        rows,
        filled: board.filled(),
        complete: board.is_complete(),
        solved: board.is_solved(),
    };
    serde_json::to_value(report).unwrap_or(Value::Null)
}

pub(crate) fn artifact_json(platform: &str, suffix: Option<&str>, path: Option<&Path>) -> Value {
    let report = ArtifactReport {
        platform,
        suffix,
        path: path.map(|path| path.display().to_string()),
        exists: path.is_some_and(Path::is_file),
    };
    serde_json::to_value(report).unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::{artifact_json, board_json};
    use sudoku_bridge::api::Board;

    #[test]
    fn board_json_has_required_fields() {
        let mut board = Board::empty();
        board.set_number(0, 0, 5).expect("set");
        let puzzle = board.encode();

        let value = board_json(&board, Some(&puzzle));
        assert_eq!(value["puzzle"].as_str().map(str::len), Some(81));
        assert_eq!(value["board"], value["puzzle"]);
        assert_eq!(value["rows"][0][0], 5);
        assert!(value["rows"][0][1].is_null());
        assert_eq!(value["rows"].as_array().map(Vec::len), Some(9));
        assert_eq!(value["filled"], 1);
        assert_eq!(value["complete"], false);
        assert_eq!(value["solved"], false);
    }

    #[test]
    fn board_json_omits_missing_puzzle() {
        let value = board_json(&Board::empty(), None);
        assert!(value.get("puzzle").is_none());
    }

    #[test]
    fn artifact_json_reports_missing_file() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("bin").join("libSudokuPy.so");
        let value = artifact_json("linux", Some(".so"), Some(&path));
        assert_eq!(value["platform"], "linux");
        assert_eq!(value["suffix"], ".so");
        assert_eq!(value["exists"], false);
    }
}
