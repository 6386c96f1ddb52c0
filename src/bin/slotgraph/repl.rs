use std::error::Error;
use std::io::{self, BufRead, IsTerminal};
use std::path::Path;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use slotgraph::cli::{Flow, Reporter, Session};
use tracing::debug;

use super::ui::Ui;

const PROMPT: &str = "> ";

/// Reads commands until QUIT or end of input.
pub fn run(
    session: &mut Session,
    reporter: &mut dyn Reporter,
    ui: &Ui,
    history: Option<&Path>,
) -> Result<(), Box<dyn Error>> {
    if io::stdin().is_terminal() {
        interactive(session, reporter, ui, history)
    } else {
        piped(session, reporter)
    }
}

fn interactive(
    session: &mut Session,
    reporter: &mut dyn Reporter,
    ui: &Ui,
    history: Option<&Path>,
) -> Result<(), Box<dyn Error>> {
    let mut rl = DefaultEditor::new()?;
    if let Some(path) = history {
        if rl.load_history(path).is_err() {
            debug!(path = %path.display(), "repl.history.missing");
        }
    }
    if !ui.is_quiet() {
        ui.info("Type HELP for commands, QUIT to exit.");
    }

    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    rl.add_history_entry(line.as_str())?;
                }
                if session.execute_line(&line, reporter) == Flow::Quit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => return Err(Box::new(err)),
        }
    }

    if let Some(path) = history {
        if let Err(err) = rl.save_history(path) {
            ui.warn(&format!(
                "could not save history to {}: {err}",
                path.display()
            ));
        }
    }
    Ok(())
}

/// Bytes that are not UTF-8 become U+FFFD, which label validation rejects
/// for that line only.
fn piped(session: &mut Session, reporter: &mut dyn Reporter) -> Result<(), Box<dyn Error>> {
    let mut input = io::stdin().lock();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        if session.execute_line(&line, reporter) == Flow::Quit {
            break;
        }
    }
    Ok(())
}
