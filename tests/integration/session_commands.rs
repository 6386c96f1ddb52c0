#![allow(missing_docs)]

use std::fs;
use std::path::Path;

use slotgraph::cli::{CliError, Flow, Location, Reporter, Response, Session, MAX_EXEC_DEPTH};
use slotgraph::storage::Graph;
use tempfile::TempDir;

#[derive(Default)]
struct Transcript {
    out: Vec<String>,
    errors: Vec<String>,
}

impl Reporter for Transcript {
    fn response(&mut self, response: &Response) {
        self.out.push(response.to_string());
    }

    fn failure(&mut self, location: Option<&Location>, error: &CliError) {
        let line = match location {
            Some(location) => format!("{}:{}: {error}", file_name(&location.path), location.line),
            None => error.to_string(),
        };
        self.errors.push(line);
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn session() -> Session {
    Session::new(Graph::with_capacity(8, 16).expect("graph"))
}

fn write_script(dir: &Path, name: &str, lines: &[&str]) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, lines.join("\n")).expect("write script");
    path
}

#[test]
fn script_builds_graph_and_renders_matrix() {
    let dir = TempDir::new().expect("tempdir");
    let script = write_script(
        dir.path(),
        "build.txt",
        &[
            "# sample graph",
            "vertex foo",
            "vertex bar",
            "",
            "edge 5 foo bar",
            "edge -2 bar foo",
            "matrix",
        ],
    );

    let mut session = session();
    let mut transcript = Transcript::default();
    let flow = session
        .run_script(&script, &mut transcript)
        .expect("script runs");

    assert_eq!(flow, Flow::Continue);
    assert!(transcript.errors.is_empty(), "{:?}", transcript.errors);
    assert_eq!(
        transcript.out[4],
        concat!("    FOO BAR\n", "FOO   .   5\n", "BAR  -2   .")
    );
    assert!(transcript.out[5].ends_with("build.txt: 5 commands, 0 failed"));
    assert_eq!(session.graph().edge_count(), 2);
}

#[test]
fn script_failures_carry_line_numbers() {
    let dir = TempDir::new().expect("tempdir");
    let script = write_script(
        dir.path(),
        "broken.txt",
        &["vertex a", "vertex A", "edge x a a", "rmedge a b"],
    );

    let mut session = session();
    let mut transcript = Transcript::default();
    session
        .run_script(&script, &mut transcript)
        .expect("script runs");

    assert_eq!(
        transcript.errors,
        vec![
            "broken.txt:2: vertex A already exists".to_string(),
            "broken.txt:3: invalid weight \"x\": expected a signed 32-bit integer".to_string(),
            "broken.txt:4: edge not found: a -> b".to_string(),
        ]
    );
    assert_eq!(session.counters().failed, 3);
    assert!(transcript
        .out
        .last()
        .expect("summary")
        .ends_with("3 commands, 3 failed"));
}

#[test]
fn nested_exec_resolves_relative_to_parent_script() {
    let dir = TempDir::new().expect("tempdir");
    let nested = dir.path().join("lib");
    fs::create_dir(&nested).expect("mkdir");
    write_script(&nested, "vertices.txt", &["vertex a", "vertex b"]);
    write_script(&nested, "main.txt", &["exec vertices.txt", "edge 1 a b"]);

    let mut session = session();
    let mut transcript = Transcript::default();
    session.execute_line(
        &format!("exec {}", nested.join("main.txt").display()),
        &mut transcript,
    );

    assert!(transcript.errors.is_empty(), "{:?}", transcript.errors);
    assert_eq!(session.graph().vertex_count(), 2);
    assert_eq!(session.graph().edge_count(), 1);
    let summaries: Vec<_> = transcript
        .out
        .iter()
        .filter(|line| line.starts_with("Finished"))
        .collect();
    assert_eq!(summaries.len(), 2);
    assert!(summaries[0].contains("vertices.txt: 2 commands"));
    assert!(summaries[1].contains("main.txt: 4 commands, 0 failed"));
}

#[test]
fn self_including_script_hits_depth_limit() {
    let dir = TempDir::new().expect("tempdir");
    let script = write_script(dir.path(), "loop.txt", &["vertex a", "exec loop.txt"]);

    let mut session = session();
    let mut transcript = Transcript::default();
    session
        .run_script(&script, &mut transcript)
        .expect("outer script runs");

    let depth_errors: Vec<_> = transcript
        .errors
        .iter()
        .filter(|line| line.contains(&format!("nested deeper than {MAX_EXEC_DEPTH}")))
        .collect();
    assert_eq!(depth_errors.len(), 1, "{:?}", transcript.errors);
    assert_eq!(session.graph().vertex_count(), 1);
}

#[test]
fn quit_inside_script_ends_session() {
    let dir = TempDir::new().expect("tempdir");
    let script = write_script(dir.path(), "stop.txt", &["vertex a", "quit", "vertex b"]);

    let mut session = session();
    let mut transcript = Transcript::default();
    let flow = session.execute_line(&format!("exec {}", script.display()), &mut transcript);

    assert_eq!(flow, Flow::Quit);
    assert_eq!(session.graph().vertex_count(), 1);
    assert!(transcript
        .out
        .last()
        .expect("summary")
        .ends_with("2 commands, 0 failed"));
}

#[test]
fn missing_script_is_reported() {
    let dir = TempDir::new().expect("tempdir");
    let mut session = session();
    let mut transcript = Transcript::default();
    let flow = session.execute_line(
        &format!("exec {}", dir.path().join("absent.txt").display()),
        &mut transcript,
    );

    assert_eq!(flow, Flow::Continue);
    assert_eq!(transcript.errors.len(), 1);
    assert!(transcript.errors[0].contains("absent.txt"));
    assert_eq!(session.counters().failed, 1);
}

#[test]
fn rmall_then_stats_reports_empty_pools() {
    let mut session = session();
    let mut transcript = Transcript::default();
    for line in ["vertex a", "vertex b", "edge 3 a b", "rmall", "stats"] {
        session.execute_line(line, &mut transcript);
    }
    assert_eq!(transcript.out[3], "Removed 2 vertices and 1 edges");
    assert_eq!(
        transcript.out[4],
        "Vertices: 0/8 used, 8 free\nEdges: 0/16 used, 16 free"
    );
}

#[test]
fn script_line_with_invalid_utf8_fails_alone() {
    let dir = TempDir::new().expect("tempdir");
    let script = dir.path().join("bytes.txt");
    fs::write(&script, b"vertex a\nvertex \xff\xfe\nvertex b\n").expect("write script");

    let mut session = session();
    let mut transcript = Transcript::default();
    session
        .run_script(&script, &mut transcript)
        .expect("script runs");

    assert_eq!(transcript.errors.len(), 1, "{:?}", transcript.errors);
    assert!(transcript.errors[0].starts_with("bytes.txt:2: invalid label"));
    assert_eq!(session.graph().vertex_count(), 2);
    assert!(transcript
        .out
        .last()
        .expect("summary")
        .ends_with("3 commands, 1 failed"));
}
