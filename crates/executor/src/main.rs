pub mod config;
pub mod csv_source;
pub mod error;
pub mod report;
pub mod searcher;
pub mod simulator;
pub mod types;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use circuit_core::build_graph;
use common::error::Error as CircuitError;
use csv_source::CsvSource;
use error::Error;
use report::CircuitReport;
use searcher::CircuitSearcher;
use simulator::SimulatedSeason;
use types::{ResultSource, filter_through_week, match_results};

/// Find a chain of wins that runs through every team and loops back
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    source: DataSource,

    /// Path to a TOML config file (defaults to ./Config.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Only count games played up to and including this week
    #[arg(long, global = true, value_name = "WEEK")]
    through_week: Option<u32>,

    /// Team the circuit should start and end with
    #[arg(long, global = true, value_name = "TEAM")]
    start: Option<String>,

    /// Abort the search after this many steps
    #[arg(long, global = true)]
    max_steps: Option<u64>,

    /// Abort the search after this many milliseconds
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,

    /// Print the report as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum DataSource {
    /// Read season results from a CSV file
    Csv {
        #[arg(value_name = "CSV_FILE")]
        path: PathBuf,
    },
    /// Simulate a round-robin season
    Sim {
        /// Number of teams
        #[arg(long)]
        teams: Option<usize>,

        /// RNG seed for a reproducible season
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match run(Args::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so stdout only carries the report.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Command-line flags take precedence over file and environment values.
fn apply_overrides(config: &mut config::Config, args: &Args) {
    if args.max_steps.is_some() {
        config.search.max_steps = args.max_steps;
    }
    if args.timeout_ms.is_some() {
        config.search.timeout_ms = args.timeout_ms;
    }
    if let DataSource::Sim { teams, seed } = &args.source {
        if let Some(teams) = *teams {
            config.simulator.teams = teams;
        }
        if seed.is_some() {
            config.simulator.seed = *seed;
        }
    }
}

async fn run(args: Args) -> Result<(), Error> {
    let mut config = config::load_config(args.config.as_deref())?;
    apply_overrides(&mut config, &args);

    let source: Box<dyn ResultSource> = match &args.source {
        DataSource::Csv { path } => {
            info!("Reading season from CSV...");
            Box::new(CsvSource::new(path.clone(), &config.csv)?)
        }
        DataSource::Sim { .. } => {
            info!("Simulating season...");
            Box::new(SimulatedSeason::new(&config.simulator))
        }
    };

    let records = filter_through_week(source.load()?, args.through_week);
    let results = match_results(&records)?;
    let graph = Arc::new(build_graph(results)?);

    info!(
        games = records.len(),
        teams = graph.num_nodes(),
        edges = graph.num_edges(),
        "Graph built"
    );

    let start = args
        .start
        .map(|team| graph.index_of(team.trim()).ok_or(CircuitError::UnknownNode(team)))
        .transpose()?;

    let outcome = CircuitSearcher::new(config.search)
        .search(graph.clone(), start)
        .await?;

    let report = CircuitReport::new(&graph, &outcome)?;
    if args.json {
        println!("{}", report.render_json()?);
    } else {
        println!("{}", report.render_text());
    }

    info!(
        steps = outcome.stats.steps,
        backtracks = outcome.stats.backtracks,
        "Search complete"
    );
    Ok(())
}
