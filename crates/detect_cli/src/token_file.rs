//! Reads a token stream for `scan` from a file or stdin.
//!
//! Two shapes are accepted: a JSON array of `{"type": ..., "value": ...}`
//! objects, or newline-delimited `type\tvalue` pairs (tab- or
//! whitespace-separated). The shape is picked by sniffing the first
//! non-whitespace byte — the CLI is a convenience wrapper, not a tokenizer,
//! so this sniff is deliberately simple.

use std::io::Read;

use detect_core::Token;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokenFileError {
    #[error("could not read token input: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid token JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("line {line}: expected \"type\\tvalue\", got {content:?}")]
    MalformedLine { line: usize, content: String },
}

#[derive(serde::Deserialize)]
struct TokenWire {
    r#type: String,
    #[serde(default)]
    value: String,
}

/// Parses the full contents of a token file (or stdin) into an ordered list
/// of tokens.
pub fn parse_tokens(data: &str) -> Result<Vec<Token>, TokenFileError> {
    let trimmed = data.trim_start();
    if trimmed.starts_with('[') {
        let wire: Vec<TokenWire> = serde_json::from_str(trimmed)?;
        return Ok(wire.into_iter().map(|t| Token::new(t.r#type, t.value)).collect());
    }

    let mut tokens = Vec::new();
    for (i, line) in data.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let mut parts = line.splitn(2, '\t');
        let r#type = parts.next().unwrap_or_default();
        if r#type.is_empty() {
            return Err(TokenFileError::MalformedLine {
                line: i + 1,
                content: line.to_string(),
            });
        }
        let value = parts.next().unwrap_or("").trim();
        tokens.push(Token::new(r#type, value));
    }
    Ok(tokens)
}

/// Reads and parses tokens from a file path, or from stdin if `path` is `None`.
pub fn read_tokens(path: Option<&std::path::Path>) -> Result<Vec<Token>, TokenFileError> {
    let data = match path {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    parse_tokens(&data)
}
