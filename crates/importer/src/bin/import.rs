use clap::{Parser, Subcommand};
use importer::{
    FixedDelay, ImageBackfiller, RosterSource, RosterSynchronizer, WikiConfig, WikiSource,
    roster::{DEFAULT_DELAY_MS, to_pretty_json},
    sources::wiki::{DEFAULT_BASE_URL, DEFAULT_LIST_PATH},
};
use storage::{Database, repository::character::CharacterRepository};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "roster-import")]
#[command(about = "Character roster synchronization tools", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    #[arg(long, env = "ROSTER_SOURCE_URL", default_value = DEFAULT_BASE_URL)]
    source_url: String,

    #[arg(long, env = "ROSTER_LIST_PATH", default_value = DEFAULT_LIST_PATH)]
    list_path: String,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Replace the stored roster with the current listing
    Sync,
    /// Fetch every character article and store its portrait
    Backfill {
        #[arg(long, env = "BACKFILL_DELAY_MS", default_value_t = DEFAULT_DELAY_MS)]
        delay_ms: u64,
    },
    /// Scrape the listing and print it without touching the database
    Preview,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("roster_import={},importer={},storage={}", log_level, log_level, log_level)
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let source = WikiSource::new(&WikiConfig {
        base_url: cli.source_url.clone(),
        list_path: cli.list_path.clone(),
    })?;

    match cli.command {
        Commands::Sync => {
            let db = connect(cli.database_url.as_deref()).await?;
            let repo = CharacterRepository::new(db.pool());

            let result = RosterSynchronizer::new(&source).sync(&repo).await;
            db.close().await;

            let outcome = result?;
            tracing::info!(
                "✓ Sync finished at {}: {} characters applied",
                outcome.completed_at,
                outcome.applied
            );
        }
        Commands::Backfill { delay_ms } => {
            let db = connect(cli.database_url.as_deref()).await?;
            let repo = CharacterRepository::new(db.pool());

            let result = ImageBackfiller::new(&source, FixedDelay::from_millis(delay_ms))
                .backfill(&repo)
                .await;
            db.close().await;

            let summary = result?;
            println!("{}", to_pretty_json(&summary)?);
        }
        Commands::Preview => {
            let entries = source.fetch_roster().await?;
            println!("{}", to_pretty_json(&entries)?);
            tracing::info!("{} characters found", entries.len());
        }
    }

    Ok(())
}

async fn connect(database_url: Option<&str>) -> Result<Database, Box<dyn std::error::Error>> {
    let database_url = database_url.ok_or("DATABASE_URL is required for this command")?;

    tracing::info!("Connecting to database...");
    let db = Database::new(database_url).await?;
    db.run_migrations().await?;

    Ok(db)
}
