use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::command::Command;
use super::render::{render_adjacency, render_adjacency_of, render_edge_list, render_matrix};
use super::tokenizer::tokenize;
use super::CliError;
use crate::admin::{self, StatsReport, VerifyReport};
use crate::storage::{Graph, Label};
use crate::types::{EdgeId, GraphError, VertexId};

/// Maximum number of nested EXEC scripts.
pub const MAX_EXEC_DEPTH: usize = 8;

/// Whether the session should keep reading commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    /// Read the next command.
    Continue,
    /// QUIT was requested.
    Quit,
}

/// Script position a command was read from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Location {
    /// Script path as resolved by EXEC.
    pub path: PathBuf,
    /// One-based line number.
    pub line: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.path.display(), self.line)
    }
}

/// Successful outcome of one command.
#[derive(Clone, Debug)]
pub enum Response {
    /// The command summary was requested.
    Help,
    /// A vertex was created.
    VertexCreated {
        /// New handle.
        id: VertexId,
        /// Normalized label.
        label: Label,
    },
    /// A vertex and the edges touching it were removed.
    VertexRemoved {
        /// Label of the removed vertex.
        label: Label,
        /// Number of edges removed with it.
        edges_removed: usize,
    },
    /// An edge was created.
    EdgeCreated {
        /// New handle.
        id: EdgeId,
        /// Origin label.
        origin: Label,
        /// Endpoint label.
        endpoint: Label,
        /// Edge weight.
        weight: i32,
    },
    /// An edge was removed.
    EdgeRemoved {
        /// Origin label.
        origin: Label,
        /// Endpoint label.
        endpoint: Label,
        /// Weight the edge carried.
        weight: i32,
    },
    /// Both pools were cleared.
    Cleared {
        /// Vertices that were occupied.
        vertices: usize,
        /// Edges that were occupied.
        edges: usize,
    },
    /// A text view of the graph.
    Rendered(String),
    /// Pool usage report.
    Stats(StatsReport),
    /// Integrity report.
    Verify(VerifyReport),
    /// An EXEC script ran to completion or QUIT.
    ScriptFinished {
        /// Resolved script path.
        path: PathBuf,
        /// Commands executed, including nested scripts.
        commands: usize,
        /// Commands that failed, including nested scripts.
        failures: usize,
    },
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Help => f.write_str(super::HELP_TEXT),
            Response::VertexCreated { label, .. } => write!(f, "New vertex: {label}"),
            Response::VertexRemoved {
                label,
                edges_removed,
            } => match edges_removed {
                0 => write!(f, "Removed vertex: {label}"),
                1 => write!(f, "Removed vertex: {label} (and 1 edge)"),
                n => write!(f, "Removed vertex: {label} (and {n} edges)"),
            },
            Response::EdgeCreated {
                origin,
                endpoint,
                weight,
                ..
            } => write!(f, "New edge: {origin} -> {endpoint} [{weight}]"),
            Response::EdgeRemoved {
                origin,
                endpoint,
                weight,
            } => write!(f, "Removed edge: {origin} -> {endpoint} [{weight}]"),
            Response::Cleared { vertices, edges } => {
                write!(f, "Removed {vertices} vertices and {edges} edges")
            }
            Response::Rendered(text) => f.write_str(text),
            Response::Stats(report) => write!(
                f,
                "Vertices: {}/{} used, {} free\nEdges: {}/{} used, {} free",
                report.vertices.occupied,
                report.vertices.capacity,
                report.vertices.free,
                report.edges.occupied,
                report.edges.capacity,
                report.edges.free
            ),
            Response::Verify(report) => {
                write!(
                    f,
                    "Verify => success={} vertices={} edges={}",
                    report.success, report.counts.vertices_found, report.counts.edges_found
                )?;
                for finding in &report.findings {
                    write!(f, "\n- {:?}: {}", finding.severity, finding.message)?;
                }
                Ok(())
            }
            Response::ScriptFinished {
                path,
                commands,
                failures,
            } => write!(
                f,
                "Finished {}: {commands} commands, {failures} failed",
                path.display()
            ),
        }
    }
}

/// Receives the outcome of every executed command.
pub trait Reporter {
    /// Called after a command succeeds.
    fn response(&mut self, response: &Response);

    /// Called when a line fails. `location` is set for lines read from a script.
    fn failure(&mut self, location: Option<&Location>, error: &CliError);
}

/// Running totals for a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionCounters {
    /// Commands dispatched, successful or not.
    pub executed: usize,
    /// Lines that failed to tokenize, parse or execute.
    pub failed: usize,
}

/// Executes commands against one graph.
#[derive(Debug)]
pub struct Session {
    graph: Graph,
    scripts: Vec<PathBuf>,
    counters: SessionCounters,
}

impl Session {
    /// Creates a session owning `graph`.
    pub fn new(graph: Graph) -> Self {
        Self {
            graph,
            scripts: Vec::new(),
            counters: SessionCounters::default(),
        }
    }

    /// The graph being edited.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Consumes the session and returns its graph.
    pub fn into_graph(self) -> Graph {
        self.graph
    }

    /// Totals since the session started.
    pub fn counters(&self) -> SessionCounters {
        self.counters
    }

    /// Tokenizes, parses and executes one line, reporting the outcome.
    pub fn execute_line(&mut self, line: &str, reporter: &mut dyn Reporter) -> Flow {
        self.execute_at(line, None, reporter)
    }

    /// Runs every line of the script at `path`.
    ///
    /// Relative paths are resolved against the directory of the script
    /// currently executing, if any.
    pub fn run_script(
        &mut self,
        path: &Path,
        reporter: &mut dyn Reporter,
    ) -> Result<Flow, CliError> {
        if self.scripts.len() >= MAX_EXEC_DEPTH {
            return Err(CliError::ExecDepth(MAX_EXEC_DEPTH));
        }
        let path = self.resolve_script(path);
        let bytes = fs::read(&path).map_err(|source| CliError::Script {
            path: path.clone(),
            source,
        })?;
        let contents = String::from_utf8_lossy(&bytes);
        info!(
            script = %path.display(),
            depth = self.scripts.len() + 1,
            "session.exec.start"
        );

        let before = self.counters;
        self.scripts.push(path.clone());
        let mut flow = Flow::Continue;
        for (idx, line) in contents.lines().enumerate() {
            let location = Location {
                path: path.clone(),
                line: idx + 1,
            };
            flow = self.execute_at(line, Some(&location), reporter);
            if flow == Flow::Quit {
                break;
            }
        }
        self.scripts.pop();

        let commands = self.counters.executed - before.executed;
        let failures = self.counters.failed - before.failed;
        info!(script = %path.display(), commands, failures, "session.exec.finish");
        reporter.response(&Response::ScriptFinished {
            path,
            commands,
            failures,
        });
        Ok(flow)
    }

    fn resolve_script(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            return path.to_path_buf();
        }
        match self.scripts.last().and_then(|current| current.parent()) {
            Some(dir) => dir.join(path),
            None => path.to_path_buf(),
        }
    }

    fn execute_at(
        &mut self,
        line: &str,
        location: Option<&Location>,
        reporter: &mut dyn Reporter,
    ) -> Flow {
        let parsed = tokenize(line).and_then(|tokens| Command::parse(&tokens));
        let command = match parsed {
            Ok(Some(command)) => command,
            Ok(None) => return Flow::Continue,
            Err(err) => {
                self.counters.failed += 1;
                reporter.failure(location, &err);
                return Flow::Continue;
            }
        };
        self.counters.executed += 1;
        debug!(command = command.keyword(), "session.dispatch");
        match self.dispatch(command, reporter) {
            Ok(flow) => flow,
            Err(err) => {
                self.counters.failed += 1;
                reporter.failure(location, &err);
                Flow::Continue
            }
        }
    }

    fn dispatch(
        &mut self,
        command: Command,
        reporter: &mut dyn Reporter,
    ) -> Result<Flow, CliError> {
        let response = match command {
            Command::Help => Response::Help,
            Command::Vertex { label } => {
                let id = self.graph.create_vertex(&label)?;
                Response::VertexCreated {
                    id,
                    label: self.graph.label(id).clone(),
                }
            }
            Command::Edge {
                weight,
                origin,
                endpoint,
            } => {
                let id = self
                    .graph
                    .create_edge_by_labels(weight, &origin, &endpoint)?;
                let edge = *self.graph.edge(id);
                Response::EdgeCreated {
                    id,
                    origin: self.graph.label(edge.origin).clone(),
                    endpoint: self.graph.label(edge.endpoint).clone(),
                    weight,
                }
            }
            Command::RmVertex { label } => {
                let removal = self.graph.delete_vertex_by_label(&label)?;
                Response::VertexRemoved {
                    label: removal.label,
                    edges_removed: removal.edges.len(),
                }
            }
            Command::RmEdge { origin, endpoint } => {
                let edge = self.graph.delete_edge_by_labels(&origin, &endpoint)?;
                Response::EdgeRemoved {
                    origin: self.graph.label(edge.origin).clone(),
                    endpoint: self.graph.label(edge.endpoint).clone(),
                    weight: edge.weight,
                }
            }
            Command::RmAll => {
                let vertices = self.graph.vertex_count();
                let edges = self.graph.edge_count();
                self.graph.reset();
                Response::Cleared { vertices, edges }
            }
            Command::Matrix => Response::Rendered(render_matrix(&self.graph)),
            Command::Adjacency { label: None } => {
                Response::Rendered(render_adjacency(&self.graph))
            }
            Command::Adjacency { label: Some(label) } => {
                let id = self.graph.resolve(&label)?;
                Response::Rendered(render_adjacency_of(&self.graph, id))
            }
            Command::Edges => Response::Rendered(render_edge_list(&self.graph)),
            Command::Stats => Response::Stats(admin::stats(&self.graph)),
            Command::Verify => Response::Verify(admin::verify(&self.graph)),
            Command::Path { origin, endpoint } => {
                self.graph.resolve(&origin)?;
                self.graph.resolve(&endpoint)?;
                return Err(GraphError::Unsupported("path finding").into());
            }
            Command::Exec { path } => return self.run_script(&path, reporter),
            Command::Quit => return Ok(Flow::Quit),
        };
        reporter.response(&response);
        Ok(Flow::Continue)
    }
}
