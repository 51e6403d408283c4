use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use evaluate::client::BackendClient;
use evaluate::fixture::FixtureGenerator;
use evaluate::{EvaluationContext, PerformanceCalculator};
use model::{ActivitySnapshot, TeamPerformance};
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "team-eval")]
#[command(about = "Team and member performance scoring", long_about = None)]
struct Cli {
    /// TOML config with weights, trend tolerance and backend settings
    #[arg(long, global = true, default_value = "evaluate/config")]
    config: String,
    /// Evaluation time (RFC 3339). Overrides a snapshot's `capturedAt`,
    /// defaults to it or to the current time
    #[arg(long, global = true)]
    now: Option<DateTime<Utc>>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a snapshot JSON file
    Snapshot {
        #[arg(long)]
        input: PathBuf,
    },
    /// Fetch a snapshot from the backend and evaluate it
    Fetch {
        #[arg(long)]
        idea_id: String,
        /// Overrides `api.base_url` from the config
        #[arg(long)]
        base_url: Option<String>,
    },
    /// Evaluate a synthetic team
    Demo {
        #[arg(long, default_value_t = 5)]
        members: usize,
        #[arg(long, default_value_t = 1)]
        seed: u64,
    },
}

fn init_logger() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_file(true)
                .with_line_number(true)
                .with_target(false),
        )
        .init();
}

fn print_report(report: &TeamPerformance) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("failed to serialize result")?;
    println!("{json}");
    Ok(())
}

fn read_snapshot(path: &Path) -> Result<ActivitySnapshot> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logger();

    let cli = Cli::parse();
    let mut ctx = EvaluationContext::load_config(&cli.config)?;
    let fetched_at = cli.now.unwrap_or_else(Utc::now);

    let snapshot = match cli.command {
        Commands::Snapshot { input } => read_snapshot(&input)?,
        Commands::Fetch { idea_id, base_url } => {
            if let Some(base_url) = base_url {
                ctx.api.base_url = base_url;
            }
            let client = BackendClient::new(&ctx.api)?;
            client
                .snapshot(&idea_id, fetched_at)
                .await
                .context("could not load team data")?
        }
        Commands::Demo { members, seed } => FixtureGenerator::new(seed, fetched_at).team(members),
    };

    info!(
        "Evaluating {} members with weights {:?}",
        snapshot.members.len(),
        ctx.weights
    );
    let calculator = PerformanceCalculator::new(ctx);
    let report = calculator.calculate_snapshot(&snapshot, cli.now);
    print_report(&report)
}
