//! Plain-text board descriptions.
//!
//! ```text
//! # rows columns
//! 10 10
//! L 4 14
//! S 17 7
//! ```
//!
//! Squares in the file are numbered from 1 and converted to the 0-based
//! indices used everywhere else. Blank lines and `#` comments are skipped.
//! Whether a jump actually fits on the board is checked when the board graph
//! is built, not here.

use super::types::{BoardTopology, Jump};
use crate::error::BoardFileError;
use std::fs;
use std::path::Path;

/// Read and parse a board file.
pub fn load_board(path: impl AsRef<Path>) -> Result<BoardTopology, BoardFileError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| BoardFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_board(&text)
}

/// Parse a board description.
pub fn parse_board(text: &str) -> Result<BoardTopology, BoardFileError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, strip_comment(line).trim()))
        .filter(|(_, line)| !line.is_empty());

    let (header_line, header) = lines.next().ok_or(BoardFileError::MissingHeader)?;
    let (rows, columns) = parse_header(header_line, header)?;

    let mut jumps = Vec::new();
    for (line, text) in lines {
        jumps.push(parse_jump(line, text)?);
    }

    Ok(BoardTopology::new(rows, columns, jumps))
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(i) => &line[..i],
        None => line,
    }
}

fn parse_header(line: usize, text: &str) -> Result<(usize, usize), BoardFileError> {
    let invalid = || BoardFileError::InvalidHeader {
        line,
        text: text.to_string(),
    };
    let fields: Vec<&str> = text.split_whitespace().collect();
    let [rows, columns] = fields.as_slice() else {
        return Err(invalid());
    };
    let rows: usize = rows.parse().map_err(|_| invalid())?;
    let columns: usize = columns.parse().map_err(|_| invalid())?;
    if rows == 0 || columns == 0 {
        return Err(invalid());
    }
    if rows.checked_mul(columns).is_none() {
        return Err(BoardFileError::BoardTooLarge {
            line,
            rows,
            columns,
        });
    }
    Ok((rows, columns))
}

fn parse_jump(line: usize, text: &str) -> Result<Jump, BoardFileError> {
    let invalid = || BoardFileError::InvalidJump {
        line,
        text: text.to_string(),
    };
    let fields: Vec<&str> = text.split_whitespace().collect();
    let [kind, start, end] = fields.as_slice() else {
        return Err(invalid());
    };
    if !matches!(*kind, "S" | "s" | "L" | "l") {
        return Err(BoardFileError::UnknownJumpKind {
            line,
            kind: kind.to_string(),
        });
    }
    let start: usize = start.parse().map_err(|_| invalid())?;
    let end: usize = end.parse().map_err(|_| invalid())?;
    if start == 0 || end == 0 {
        return Err(BoardFileError::ZeroIndex { line });
    }
    Ok(Jump::new(start - 1, end - 1))
}
