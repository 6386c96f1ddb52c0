use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::tokenizer::{MAX_LINE_LEN, MAX_TOKENS};
use crate::types::GraphError;

/// Failures raised while turning a line into an executed command.
#[derive(Debug, Error)]
pub enum CliError {
    /// The storage engine rejected the operation.
    #[error(transparent)]
    Graph(#[from] GraphError),
    /// The input line is longer than the line buffer allows.
    #[error("line is {len} bytes long, at most {MAX_LINE_LEN} allowed")]
    LineTooLong {
        /// Length of the rejected line in bytes.
        len: usize,
    },
    /// The line splits into more tokens than a command accepts.
    #[error("line has {count} tokens, at most {MAX_TOKENS} allowed")]
    TooManyTokens {
        /// Number of tokens found.
        count: usize,
    },
    /// The first token is not a known command keyword.
    #[error("unknown command \"{0}\" (try HELP)")]
    UnknownCommand(String),
    /// A known command was given the wrong number of arguments.
    #[error("usage: {0}")]
    Usage(&'static str),
    /// An edge weight did not parse as a signed 32-bit integer.
    #[error("invalid weight \"{raw}\": expected a signed 32-bit integer")]
    InvalidWeight {
        /// Weight token as typed.
        raw: String,
    },
    /// A script file could not be read.
    #[error("failed to read script {path}: {source}")]
    Script {
        /// Resolved script path.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },
    /// EXEC was nested too deeply, most likely a script including itself.
    #[error("EXEC nested deeper than {0} levels")]
    ExecDepth(usize),
}
