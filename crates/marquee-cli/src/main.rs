mod browse;
mod catalogue;
mod render;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "marquee")]
#[command(about = "Browse and search the movie catalogue")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List popular movies, or search when a query is given
    Movies {
        /// Free-text search query
        query: Option<String>,
    },
    /// Show the most searched terms
    Trending {
        /// Number of entries to show (defaults to MARQUEE_TRENDING_LIMIT)
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Interactive search: each stdin line replaces the query
    Browse,
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Check database connectivity
    Ping,
    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("marquee: run `marquee --help` for available commands");
        return Ok(());
    };

    let config = marquee_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match command {
        Commands::Movies { query } => catalogue::run_movies(&config, query.as_deref()).await,
        Commands::Trending { limit } => catalogue::run_trending(&config, limit).await,
        Commands::Browse => browse::run_browse(&config).await,
        Commands::Db { command } => run_db(&config, command).await,
    }
}

async fn run_db(config: &marquee_core::AppConfig, command: DbCommands) -> anyhow::Result<()> {
    let pool = marquee_db::connect_pool_from_config(config).await?;
    match command {
        DbCommands::Ping => {
            marquee_db::health_check(&pool).await?;
            println!("database ok");
        }
        DbCommands::Migrate => {
            let applied = marquee_db::run_migrations(&pool).await?;
            tracing::info!(applied, "migrations complete");
            println!("applied {applied} migration(s)");
        }
    }
    pool.close().await;
    Ok(())
}

#[cfg(test)]
mod tests;
