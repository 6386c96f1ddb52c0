//! Command keywords and argument parsing.
//!
//! Keywords are case-insensitive. Arguments are passed through untouched;
//! label normalization happens in the storage engine.

use std::path::PathBuf;

use super::CliError;

/// Summary printed by `HELP`.
pub const HELP_TEXT: &str = "\
                      HELP - this.
            VERTEX [label] - add a vertex with label.
EDGE [weight] [src] [dest] - add an edge.
       RMEDGE [src] [dest] - remove an edge.
          RMVERTEX [label] - remove a vertex and every edge touching it.
                     RMALL - remove entire graph.
                    MATRIX - print the weight matrix.
               ADJ [label] - print outgoing adjacency lists.
                     EDGES - print every edge.
                     STATS - print pool capacity and usage.
                    VERIFY - check graph integrity.
         PATH [src] [dest] - calculate efficient path between two vertices.
           EXEC [filename] - run a list of commands from a file.
                      QUIT - exit program.";

const USAGE_VERTEX: &str = "VERTEX <label>";
const USAGE_EDGE: &str = "EDGE <weight> <src> <dest>";
const USAGE_RMEDGE: &str = "RMEDGE <src> <dest>";
const USAGE_RMVERTEX: &str = "RMVERTEX <label>";
const USAGE_PATH: &str = "PATH <src> <dest>";
const USAGE_EXEC: &str = "EXEC <filename>";
const USAGE_ADJ: &str = "ADJ [label]";

/// A parsed command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Print the command summary.
    Help,
    /// Create a vertex.
    Vertex {
        /// Raw label.
        label: String,
    },
    /// Create a directed edge.
    Edge {
        /// Edge weight.
        weight: i32,
        /// Raw origin label.
        origin: String,
        /// Raw endpoint label.
        endpoint: String,
    },
    /// Delete a vertex and its edges.
    RmVertex {
        /// Raw label.
        label: String,
    },
    /// Delete a directed edge.
    RmEdge {
        /// Raw origin label.
        origin: String,
        /// Raw endpoint label.
        endpoint: String,
    },
    /// Clear both pools.
    RmAll,
    /// Render the weight matrix.
    Matrix,
    /// Render outgoing adjacency lists, for one vertex or all.
    Adjacency {
        /// Raw label restricting the listing to one vertex.
        label: Option<String>,
    },
    /// Render the edge list.
    Edges,
    /// Report pool usage.
    Stats,
    /// Run the integrity scan.
    Verify,
    /// Shortest path between two vertices (not implemented).
    Path {
        /// Raw origin label.
        origin: String,
        /// Raw endpoint label.
        endpoint: String,
    },
    /// Run commands from a file.
    Exec {
        /// Script path as typed.
        path: PathBuf,
    },
    /// End the session.
    Quit,
}

impl Command {
    /// Parses a tokenized line. Returns `Ok(None)` for an empty token list.
    pub fn parse(tokens: &[&str]) -> Result<Option<Command>, CliError> {
        let Some((keyword, args)) = tokens.split_first() else {
            return Ok(None);
        };
        let command = match keyword.to_ascii_uppercase().as_str() {
            "HELP" => {
                no_args(args, "HELP")?;
                Command::Help
            }
            "VERTEX" => {
                let [label]: [&str; 1] = exact(args, USAGE_VERTEX)?;
                Command::Vertex {
                    label: label.to_string(),
                }
            }
            "EDGE" => {
                let [weight, origin, endpoint]: [&str; 3] = exact(args, USAGE_EDGE)?;
                Command::Edge {
                    weight: parse_weight(weight)?,
                    origin: origin.to_string(),
                    endpoint: endpoint.to_string(),
                }
            }
            "RMVERTEX" => {
                let [label]: [&str; 1] = exact(args, USAGE_RMVERTEX)?;
                Command::RmVertex {
                    label: label.to_string(),
                }
            }
            "RMEDGE" => {
                let [origin, endpoint]: [&str; 2] = exact(args, USAGE_RMEDGE)?;
                Command::RmEdge {
                    origin: origin.to_string(),
                    endpoint: endpoint.to_string(),
                }
            }
            "RMALL" => {
                no_args(args, "RMALL")?;
                Command::RmAll
            }
            "MATRIX" => {
                no_args(args, "MATRIX")?;
                Command::Matrix
            }
            "ADJ" => match args {
                [] => Command::Adjacency { label: None },
                [label] => Command::Adjacency {
                    label: Some(label.to_string()),
                },
                _ => return Err(CliError::Usage(USAGE_ADJ)),
            },
            "EDGES" => {
                no_args(args, "EDGES")?;
                Command::Edges
            }
            "STATS" => {
                no_args(args, "STATS")?;
                Command::Stats
            }
            "VERIFY" => {
                no_args(args, "VERIFY")?;
                Command::Verify
            }
            "PATH" => {
                let [origin, endpoint]: [&str; 2] = exact(args, USAGE_PATH)?;
                Command::Path {
                    origin: origin.to_string(),
                    endpoint: endpoint.to_string(),
                }
            }
            "EXEC" => {
                let [path]: [&str; 1] = exact(args, USAGE_EXEC)?;
                Command::Exec {
                    path: PathBuf::from(path),
                }
            }
            "QUIT" | "EXIT" => {
                no_args(args, "QUIT")?;
                Command::Quit
            }
            _ => return Err(CliError::UnknownCommand(keyword.to_string())),
        };
        Ok(Some(command))
    }

    /// Uppercase keyword, as used in logs.
    pub fn keyword(&self) -> &'static str {
        match self {
            Command::Help => "HELP",
            Command::Vertex { .. } => "VERTEX",
            Command::Edge { .. } => "EDGE",
            Command::RmVertex { .. } => "RMVERTEX",
            Command::RmEdge { .. } => "RMEDGE",
            Command::RmAll => "RMALL",
            Command::Matrix => "MATRIX",
            Command::Adjacency { .. } => "ADJ",
            Command::Edges => "EDGES",
            Command::Stats => "STATS",
            Command::Verify => "VERIFY",
            Command::Path { .. } => "PATH",
            Command::Exec { .. } => "EXEC",
            Command::Quit => "QUIT",
        }
    }
}

fn exact<'a, const N: usize>(
    args: &[&'a str],
    usage: &'static str,
) -> Result<[&'a str; N], CliError> {
    <[&str; N]>::try_from(args).map_err(|_| CliError::Usage(usage))
}

fn no_args(args: &[&str], usage: &'static str) -> Result<(), CliError> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(CliError::Usage(usage))
    }
}

fn parse_weight(raw: &str) -> Result<i32, CliError> {
    raw.parse().map_err(|_| CliError::InvalidWeight {
        raw: raw.to_string(),
    })
}
