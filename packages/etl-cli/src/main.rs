//! `socialetl` command-line entry point.
//!
//! Thin wrapper around the library: parses arguments, loads `.env`, sets up
//! tracing, bootstraps or resets the schema, and dispatches `run` through
//! the factory.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use socialetl::store::{schema, Database};
use socialetl::{factory, Transformation};

#[derive(Parser)]
#[command(name = "socialetl", about = "Pull social media posts into SQLite")]
struct Cli {
    /// SQLite database URL.
    #[arg(long, default_value = "sqlite://data/socialetl.db?mode=rwc")]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run one extract -> transform -> load pass for a source.
    Run {
        /// Source to pull from: reddit or twitter.
        #[arg(long)]
        source: String,

        /// Filter strategy: no_tx, rand, or sd.
        #[arg(long, default_value = "no_tx")]
        transformation: String,

        /// Subreddit name or twitter handle; defaults per source.
        #[arg(long)]
        id: Option<String>,

        /// Maximum number of posts to pull.
        #[arg(long)]
        num_records: Option<usize>,
    },
    /// Create the schema if it does not exist.
    InitDb,
    /// Drop and recreate the schema, discarding all persisted data.
    ResetDb,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let db = Database::connect(&cli.database_url).await?;

    match cli.command {
        Command::InitDb => {
            schema::setup(&db).await?;
        }
        Command::ResetDb => {
            schema::teardown(&db).await?;
            schema::setup(&db).await?;
        }
        Command::Run {
            source,
            transformation,
            id,
            num_records,
        } => {
            let strategy = Transformation::from_name(&transformation)?;
            let pipeline = factory::create(&source)?;
            let source_id = id.unwrap_or_else(|| pipeline.default_source_id().to_string());
            let limit = num_records.unwrap_or(factory::DEFAULT_NUM_RECORDS);

            info!(
                source = %pipeline.source(),
                id = %source_id,
                strategy = strategy.name(),
                limit,
                "starting pipeline run"
            );
            pipeline.run(&db, &strategy, &source_id, limit).await?;
            info!("pipeline run finished");
        }
    }

    Ok(())
}
