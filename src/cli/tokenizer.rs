//! Splits a raw command line into whitespace-delimited tokens.

use super::CliError;

/// Maximum tokens per line: the command keyword plus 31 arguments.
pub const MAX_TOKENS: usize = 32;

/// Maximum line length in bytes.
pub const MAX_LINE_LEN: usize = 255;

/// Tokenizes `line`.
///
/// Blank lines and lines whose first non-blank character is `#` produce no
/// tokens.
pub fn tokenize(line: &str) -> Result<Vec<&str>, CliError> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.len() > MAX_LINE_LEN {
        return Err(CliError::LineTooLong { len: line.len() });
    }
    if line.trim_start().starts_with('#') {
        return Ok(Vec::new());
    }
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() > MAX_TOKENS {
        return Err(CliError::TooManyTokens {
            count: tokens.len(),
        });
    }
    Ok(tokens)
}
