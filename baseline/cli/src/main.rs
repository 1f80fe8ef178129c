//! Baseline CLI - browser compatibility report for HTML, CSS and JavaScript files

mod output;

use baseline_lib::{
    CompatClient, CompatConfig, DocumentKind, analyze_document, analyze_document_offline,
    hover_at,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "baseline")]
#[command(about = "Browser compatibility report for web source files", long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', action = clap::ArgAction::Count, global = true)]
    log_verbosity: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Terminal,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract web features from a file and report their browser support
    Analyze {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Language id (html, css, scss, less, javascript, typescript, ...)
        /// [default: inferred from the file extension]
        #[arg(short, long, value_name = "LANG")]
        language: Option<String>,

        /// Only extract tokens; skip compatibility lookups
        #[arg(long)]
        offline: bool,

        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,
    },

    /// Show the hover report for the word at a position
    Hover {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// 1-based line number
        #[arg(long)]
        line: usize,

        /// 1-based column number
        #[arg(long)]
        column: usize,

        /// Language id [default: inferred from the file extension]
        #[arg(short, long, value_name = "LANG")]
        language: Option<String>,

        /// Output the report as JSON instead of markdown
        #[arg(long)]
        json: bool,
    },
}

/// Default filter for a `-v` count when `RUST_LOG` is unset.
///
/// The binary logs under `baseline` and the engine under `baseline_lib`;
/// HTTP internals stay at `warn` until `-vvv`.
fn default_filter(verbose: u8) -> &'static str {
    match verbose {
        // Failed lookups and rate-limit retries
        0 => "warn",
        // + batch summaries and the analyzed file
        1 => "warn,baseline=info,baseline_lib=info",
        // + one event per feature query, and lookup span timings on close
        2 => "warn,baseline=debug,baseline_lib=debug",
        // + span enter/exit and connection-level reqwest/hyper logs
        _ => "debug,baseline=trace,baseline_lib=trace",
    }
}

/// Initialize tracing subscriber based on verbosity and output format
fn init_tracing(verbose: u8, json: bool) {
    let base_filter =
        std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter(verbose).to_string());

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_span_events(if verbose >= 2 {
                        FmtSpan::CLOSE
                    } else {
                        FmtSpan::NONE
                    })
                    .with_file(verbose >= 3)
                    .with_line_number(verbose >= 3)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    }
}

/// Resolves the document kind from an explicit language id or the file path.
fn document_kind(path: &Path, language: Option<&str>) -> DocumentKind {
    match language {
        Some(id) => DocumentKind::from_language_id(id),
        None => DocumentKind::from_path(path),
    }
}

fn build_client() -> Result<CompatClient, Box<dyn std::error::Error>> {
    let config = CompatConfig::from_env()?;
    tracing::debug!(endpoint = %config.endpoint, "Using feature service");
    Ok(CompatClient::new(config)?)
}

async fn run(command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Analyze {
            file,
            language,
            offline,
            format,
        } => {
            let text = std::fs::read_to_string(&file)?;
            let kind = document_kind(&file, language.as_deref());
            tracing::info!(file = %file.display(), %kind, "Analyzing document");

            let analysis = if offline {
                analyze_document_offline(&text, kind)
            } else {
                analyze_document(&text, kind, &build_client()?).await
            };

            match format {
                OutputFormat::Terminal => print!("{}", output::format_analysis(&analysis)),
                OutputFormat::Json => println!("{}", output::format_json(&analysis)?),
            }
        }
        Commands::Hover {
            file,
            line,
            column,
            language,
            json,
        } => {
            if line == 0 || column == 0 {
                return Err("line and column are 1-based".into());
            }
            let text = std::fs::read_to_string(&file)?;
            let kind = document_kind(&file, language.as_deref());
            let client = build_client()?;

            let Some(report) = hover_at(&text, kind, line - 1, column - 1, &client).await else {
                return Err(format!("No word at line {line}, column {column}").into());
            };

            if json {
                println!("{}", output::format_json(&report)?);
            } else {
                println!("{}", output::format_hover(&report));
            }
        }
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.log_verbosity, cli.json_logs);

    if let Err(e) = run(cli.command).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
