//! Binary entry point for the slotgraph shell.
#![forbid(unsafe_code)]

mod config;
mod repl;
mod ui;

use std::error::Error;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand, ValueEnum};
use slotgraph::admin::{StatsReport, VerifyReport};
use slotgraph::cli::{CliError, Flow, Location, Reporter, Response, Session};
use slotgraph::storage::{
    CounterMetrics, Graph, GraphOptions, DEFAULT_EDGE_CAPACITY, DEFAULT_VERTEX_CAPACITY,
};
use tracing_subscriber::EnvFilter;

use config::CliConfig;
use ui::{Theme, Ui};

#[derive(Parser, Debug)]
#[command(
    name = "slotgraph",
    version,
    about = "Interactive shell for a fixed-capacity directed, weighted graph",
    disable_help_subcommand = true
)]
struct Cli {
    #[arg(
        long,
        global = true,
        env = "SLOTGRAPH_CONFIG",
        value_name = "FILE",
        help = "Config file (defaults to <config dir>/slotgraph/config.toml)"
    )]
    config: Option<PathBuf>,

    #[command(flatten)]
    graph: GraphArgs,

    #[arg(
        long,
        global = true,
        value_enum,
        default_value_t = OutputFormat::Text,
        help = "Output format for STATS and VERIFY reports"
    )]
    format: OutputFormat,

    #[arg(long, global = true, value_enum, help = "Color theme")]
    theme: Option<ThemeArg>,

    #[arg(short, long, global = true, help = "Plain output without icons")]
    quiet: bool,

    #[arg(short, long, global = true, help = "Log storage operations to stderr")]
    verbose: bool,

    #[arg(
        long,
        global = true,
        help = "Exit with status 2 if any command failed"
    )]
    strict: bool,

    #[arg(
        short = 'c',
        long = "command",
        value_name = "LINE",
        help = "Run a command line before anything else (repeatable)"
    )]
    commands: Vec<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Args, Debug)]
struct GraphArgs {
    #[arg(long, global = true, value_name = "SLOTS", help = "Vertex pool size")]
    vertex_capacity: Option<usize>,

    #[arg(long, global = true, value_name = "SLOTS", help = "Edge pool size")]
    edge_capacity: Option<usize>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Read commands interactively (the default without -c)
    Repl,
    /// Run the commands in FILE, then exit
    Exec {
        #[arg(value_name = "FILE")]
        script: PathBuf,
    },
    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the effective settings
    Show,
    /// Write a config file with default settings
    Init {
        #[arg(long, help = "Overwrite an existing file")]
        force: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum ThemeArg {
    Auto,
    Light,
    Dark,
    Plain,
}

impl From<ThemeArg> for Theme {
    fn from(value: ThemeArg) -> Self {
        match value {
            ThemeArg::Auto => Theme::Auto,
            ThemeArg::Light => Theme::Light,
            ThemeArg::Dark => Theme::Dark,
            ThemeArg::Plain => Theme::Plain,
        }
    }
}

fn main() {
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

fn run() -> Result<i32, Box<dyn Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = CliConfig::load(cli.config.clone())?;

    let theme = cli.theme.or(config.theme()).unwrap_or(ThemeArg::Auto);
    let ui = Ui::new(theme.into(), cli.quiet || config.quiet());

    if let Some(Command::Config { action }) = &cli.command {
        run_config(action, &config, &cli, &ui)?;
        return Ok(0);
    }

    let graph = Graph::new(build_graph_options(&cli.graph, &config))?;
    let mut session = Session::new(graph);
    let mut console = Console {
        ui: &ui,
        format: cli.format,
    };

    let mut flow = Flow::Continue;
    for line in &cli.commands {
        flow = session.execute_line(line, &mut console);
        if flow == Flow::Quit {
            break;
        }
    }

    if flow == Flow::Continue {
        match &cli.command {
            Some(Command::Exec { script }) => {
                if let Err(err) = session.run_script(script, &mut console) {
                    console.failure(None, &err);
                    return Ok(1);
                }
            }
            Some(Command::Repl) => {
                repl::run(&mut session, &mut console, &ui, config.history_file())?
            }
            None if cli.commands.is_empty() => {
                repl::run(&mut session, &mut console, &ui, config.history_file())?
            }
            None | Some(Command::Config { .. }) => {}
        }
    }

    if cli.strict && session.counters().failed > 0 {
        return Ok(2);
    }
    Ok(0)
}

fn build_graph_options(args: &GraphArgs, config: &CliConfig) -> GraphOptions {
    let vertex_capacity = args
        .vertex_capacity
        .or(config.vertex_capacity())
        .unwrap_or(DEFAULT_VERTEX_CAPACITY);
    let edge_capacity = args
        .edge_capacity
        .or(config.edge_capacity())
        .unwrap_or(DEFAULT_EDGE_CAPACITY);
    GraphOptions::new()
        .vertex_capacity(vertex_capacity)
        .edge_capacity(edge_capacity)
        .metrics(Arc::new(CounterMetrics::default()))
}

fn run_config(
    action: &ConfigAction,
    config: &CliConfig,
    cli: &Cli,
    ui: &Ui,
) -> Result<(), Box<dyn Error>> {
    match action {
        ConfigAction::Show => {
            let opts = build_graph_options(&cli.graph, config);
            let path = config
                .path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(none)".to_string());
            let history = config
                .history_file()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(disabled)".to_string());
            ui.section(
                "Config",
                [
                    ("file", path),
                    ("vertex_capacity", opts.vertex_capacity.to_string()),
                    ("edge_capacity", opts.edge_capacity.to_string()),
                    ("history_file", history),
                ],
            );
        }
        ConfigAction::Init { force } => {
            let path = config.write_defaults(*force)?;
            ui.success(&format!("Wrote {}", path.display()));
        }
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "slotgraph=debug" } else { "error" };
    let filter =
        EnvFilter::try_from_env("SLOTGRAPH_LOG").unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}

/// Prints session outcomes through the terminal UI.
struct Console<'a> {
    ui: &'a Ui,
    format: OutputFormat,
}

impl Reporter for Console<'_> {
    fn response(&mut self, response: &Response) {
        match response {
            Response::Help | Response::Rendered(_) => self.ui.block(&response.to_string()),
            Response::Stats(report) => self.emit(report, |ui| print_stats_text(ui, report)),
            Response::Verify(report) => self.emit(report, |ui| print_verify_text(ui, report)),
            other => self.ui.success(&other.to_string()),
        }
    }

    fn failure(&mut self, location: Option<&Location>, error: &CliError) {
        match location {
            Some(location) => self.ui.error(&format!("{location}: {error}")),
            None => self.ui.error(&error.to_string()),
        }
    }
}

impl Console<'_> {
    fn emit<T, F>(&self, value: &T, printer: F)
    where
        T: serde::Serialize,
        F: Fn(&Ui),
    {
        match self.format {
            OutputFormat::Json => match serde_json::to_string_pretty(value) {
                Ok(json) => println!("{json}"),
                Err(err) => self.ui.error(&format!("failed to encode report: {err}")),
            },
            OutputFormat::Text => printer(self.ui),
        }
    }
}

fn print_stats_text(ui: &Ui, report: &StatsReport) {
    for (title, pool) in [("Vertices", &report.vertices), ("Edges", &report.edges)] {
        ui.section(
            title,
            [
                ("capacity", pool.capacity),
                ("occupied", pool.occupied),
                ("free", pool.free),
            ],
        );
    }
    if let Some(metrics) = &report.metrics {
        ui.section(
            "Operations",
            [
                ("vertices_created", metrics.vertices_created),
                ("vertices_deleted", metrics.vertices_deleted),
                ("edges_created", metrics.edges_created),
                ("edges_deleted", metrics.edges_deleted),
                ("adjacency_scans", metrics.adjacency_scans_out + metrics.adjacency_scans_in),
                ("rejected", metrics.rejected),
                ("rejected_exhausted", metrics.rejected_exhausted),
            ],
        );
    }
}

fn print_verify_text(ui: &Ui, report: &VerifyReport) {
    let counts = &report.counts;
    ui.section(
        "Verify",
        [
            ("success", report.success.to_string()),
            ("vertices", counts.vertices_found.to_string()),
            ("edges", counts.edges_found.to_string()),
            ("dangling_references", counts.dangling_references.to_string()),
            ("duplicate_labels", counts.duplicate_labels.to_string()),
            ("duplicate_pairs", counts.duplicate_pairs.to_string()),
            ("invalid_labels", counts.invalid_labels.to_string()),
        ],
    );
    ui.list(
        "Findings",
        report
            .findings
            .iter()
            .map(|finding| format!("{:?}: {}", finding.severity, finding.message)),
    );
}
