use std::fs;
use std::path::Path;

use thiserror::Error;

/// Why an input file could not be turned into simulator input.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid page number: {0}")]
    InvalidPage(String),

    #[error("line {line}: unknown command {command:?} (expected `alloc` or `free`)")]
    UnknownCommand { line: usize, command: String },

    #[error("line {line}: expected `{expected}`")]
    MalformedCommand { line: usize, expected: &'static str },

    #[error("line {line}: invalid number: {token}")]
    InvalidNumber { line: usize, token: String },
}

/// One operation in an allocator script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitOp {
    Alloc { id: u32, size: u32 },
    Free { id: u32 },
}

/// Parse a whitespace-separated reference string, e.g. `1 2 3 4 1 2 5`.
pub fn parse_reference_string(content: &str) -> Result<Vec<u32>, ParseError> {
    content
        .split_whitespace()
        .map(|token| {
            token
                .parse()
                .map_err(|_| ParseError::InvalidPage(token.to_string()))
        })
        .collect()
}

/// Read a reference string from a file.
pub fn read_reference_string<P: AsRef<Path>>(path: P) -> Result<Vec<u32>, ParseError> {
    let content = fs::read_to_string(path.as_ref()).map_err(|source| ParseError::Read {
        path: path.as_ref().display().to_string(),
        source,
    })?;
    parse_reference_string(&content)
}

/// Parse an allocator script. One operation per line:
///
/// ```text
/// alloc <id> <size>
/// free <id>
/// ```
///
/// Blank lines and lines starting with `#` are skipped.
pub fn parse_fit_script(content: &str) -> Result<Vec<FitOp>, ParseError> {
    let mut ops = Vec::new();

    for (index, raw) in content.lines().enumerate() {
        let line = index + 1;
        let text = raw.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }

        let tokens: Vec<&str> = text.split_whitespace().collect();
        match tokens[0] {
            "alloc" => {
                if tokens.len() != 3 {
                    return Err(ParseError::MalformedCommand {
                        line,
                        expected: "alloc <id> <size>",
                    });
                }
                let id = parse_number(tokens[1], line)?;
                let size = parse_number(tokens[2], line)?;
                ops.push(FitOp::Alloc { id, size });
            }
            "free" => {
                if tokens.len() != 2 {
                    return Err(ParseError::MalformedCommand {
                        line,
                        expected: "free <id>",
                    });
                }
                let id = parse_number(tokens[1], line)?;
                ops.push(FitOp::Free { id });
            }
            other => {
                return Err(ParseError::UnknownCommand {
                    line,
                    command: other.to_string(),
                });
            }
        }
    }

    Ok(ops)
}

/// Read an allocator script from a file.
pub fn read_fit_script<P: AsRef<Path>>(path: P) -> Result<Vec<FitOp>, ParseError> {
    let content = fs::read_to_string(path.as_ref()).map_err(|source| ParseError::Read {
        path: path.as_ref().display().to_string(),
        source,
    })?;
    parse_fit_script(&content)
}

fn parse_number(token: &str, line: usize) -> Result<u32, ParseError> {
    token.parse().map_err(|_| ParseError::InvalidNumber {
        line,
        token: token.to_string(),
    })
}
