#![forbid(unsafe_code)]

//! Command front end for the interactive shell.
//!
//! Raw lines are split by [`tokenizer`], turned into a [`Command`] by
//! [`command`], and executed against a [`crate::storage::Graph`] by a
//! [`Session`], which reports every outcome to a [`Reporter`].

/// Whitespace tokenizer with line and token limits.
pub mod tokenizer;

/// Command keywords and argument parsing.
pub mod command;

/// Text views of the graph (matrix, adjacency list, edge list).
pub mod render;

mod error;
mod session;

pub use command::{Command, HELP_TEXT};
pub use error::CliError;
pub use session::{
    Flow, Location, Reporter, Response, Session, SessionCounters, MAX_EXEC_DEPTH,
};
