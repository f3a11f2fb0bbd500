//! CLI binary for running the receipt points service and scoring receipt
//! files offline.

use core::net::SocketAddr;
use std::fs;
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, Table};
use owo_colors::OwoColorize as _;
use receipt_points::config::{BIND_ENV, ServerConfig};
use receipt_points::models::Receipt;
use receipt_points::scoring::{PointsBreakdown, ScoringEngine};
use receipt_points::storage::{InMemoryReceiptStore, ReceiptStore};

/// Environment variable holding log filter directives.
const LOG_ENV: &str = "RUST_LOG";

/// Log filter used when `RUST_LOG` is unset or invalid.
const DEFAULT_LOG_FILTER: &str = "info";

/// Receipt points service: store receipts and award reward points.
#[derive(Debug, Parser)]
#[command(name = "receipt-points", version, about)]
struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP service.
    Serve(ServeArgs),
    /// Score receipt JSON files and print the per-rule breakdown.
    Score {
        /// Receipt JSON files to score.
        #[arg(required = true, value_name = "FILE")]
        files: Vec<PathBuf>,
    },
}

/// Arguments for the `serve` subcommand.
#[derive(Debug, Args)]
struct ServeArgs {
    /// Address to listen on.
    #[arg(long, env = BIND_ENV, default_value_t = ServerConfig::default().bind_address)]
    bind: SocketAddr,
}

/// Runs the CLI, returning an appropriate exit code.
fn run() -> io::Result<ExitCode> {
    // Loaded first so `RUST_LOG` from `.env` reaches the filter.
    let _dotenv = dotenvy::dotenv();

    let directives = std::env::var(LOG_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(directives.as_deref()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve(args) => cmd_serve(&args),
        Command::Score { files } => cmd_score(&files),
    }
}

/// Builds the log filter from `RUST_LOG` directives, defaulting to `info`.
fn log_filter(directives: Option<&str>) -> tracing_subscriber::EnvFilter {
    directives
        .filter(|raw| !raw.trim().is_empty())
        .and_then(|raw| tracing_subscriber::EnvFilter::try_new(raw).ok())
        .unwrap_or_else(|| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Executes the `serve` subcommand: runs the HTTP service until Ctrl-C.
fn cmd_serve(args: &ServeArgs) -> io::Result<ExitCode> {
    let runtime = tokio::runtime::Runtime::new()?;
    let store: Arc<dyn ReceiptStore> = Arc::new(InMemoryReceiptStore::new());
    let config = ServerConfig::new(args.bind);

    match runtime.block_on(receipt_points::server::serve(config, store)) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            writeln!(
                io::stderr().lock(),
                "{} server failed on {}: {err}",
                "error:".red().bold(),
                args.bind.bold()
            )?;
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Executes the `score` subcommand: scores every file, reporting the ones
/// that cannot be read.
fn cmd_score(files: &[PathBuf]) -> io::Result<ExitCode> {
    let mut failed = false;
    for path in files {
        match load_receipt(path) {
            Ok(receipt) => {
                let breakdown = ScoringEngine::breakdown(&receipt);
                print_breakdown_table(path, &receipt.retailer, &breakdown)?;
            }
            Err(err) => {
                failed = true;
                writeln!(
                    io::stderr().lock(),
                    "{} failed to load {}: {err}",
                    "error:".red().bold(),
                    path.display()
                )?;
            }
        }
    }
    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Reads and decodes a receipt JSON file.
fn load_receipt(path: &Path) -> receipt_points::error::Result<Receipt> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Prints the per-rule breakdown for one receipt in a table.
fn print_breakdown_table(
    path: &Path,
    retailer: &str,
    breakdown: &PointsBreakdown,
) -> io::Result<()> {
    let mut out = io::stdout().lock();

    let mut table = Table::new();
    _ = table.load_preset(UTF8_FULL);
    _ = table.set_header(vec![
        Cell::new("Rule").fg(Color::Cyan),
        Cell::new("Points").fg(Color::Cyan),
    ]);
    for (rule, points) in breakdown.rules() {
        let points_cell = if points == 0 {
            Cell::new(points).fg(Color::DarkGrey)
        } else {
            Cell::new(points).fg(Color::Green)
        };
        _ = table.add_row(vec![Cell::new(rule), points_cell]);
    }
    _ = table.add_row(vec![
        Cell::new("Total").fg(Color::Yellow),
        Cell::new(breakdown.total()).fg(Color::Yellow),
    ]);

    writeln!(
        out,
        "{} {}",
        retailer.green().bold(),
        format_args!("({})", path.display()).dimmed()
    )?;
    writeln!(out, "{table}")?;
    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            // Last-resort error output; nothing left to do if stderr fails.
            let _ignored = writeln!(io::stderr(), "fatal I/O error: {err}");
            ExitCode::FAILURE
        }
    }
}
