mod collect;
mod format;
mod logging;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::collect::CollectArgs;
use crate::format::OutputFormat;

#[derive(Debug, Parser)]
#[command(name = "madshus")]
#[command(about = "Harvest the Madshus product catalog and render stored products")]
struct Cli {
    /// Log at debug level regardless of MADSHUS_LOG_LEVEL
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Also append log output to this file, creating parent directories
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Crawl catalog categories and upsert every product found
    Collect(CollectArgs),
    /// Render stored products as text, Markdown, or JSON
    Format {
        /// Product uid to render; repeat for several. Defaults to all products.
        #[arg(long = "uid", short = 'u', value_name = "UID")]
        uids: Vec<String>,

        #[arg(long, short, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Write to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// List recent collection runs
    Runs {
        #[arg(long, default_value_t = 10)]
        limit: i64,
    },
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Create or update the schema
    Init,
    /// Check that the database can be opened and queried
    Ping,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = madshus_core::load_app_config()?;

    let _log_guard = logging::init(cli.verbose, &config.log_level, cli.log_file.as_deref())?;

    let Some(command) = cli.command else {
        println!("no command given; run with --help for usage");
        return Ok(());
    };

    let pool_config = madshus_db::PoolConfig::from_app_config(&config);
    let pool = madshus_db::connect_pool(&config.database_url, pool_config).await?;

    match command {
        Commands::Db {
            command: DbCommands::Ping,
        } => {
            madshus_db::ping(&pool).await?;
            println!("database ok");
        }
        Commands::Db {
            command: DbCommands::Init,
        } => {
            let applied = madshus_db::run_migrations(&pool).await?;
            println!("schema ready ({applied} migrations applied)");
        }
        Commands::Collect(args) => {
            madshus_db::run_migrations(&pool).await?;
            collect::run_collect(&pool, &config, &args).await?;
        }
        Commands::Format {
            uids,
            format,
            output,
        } => {
            madshus_db::run_migrations(&pool).await?;
            format::run_format(&pool, &uids, format, output.as_deref()).await?;
        }
        Commands::Runs { limit } => {
            madshus_db::run_migrations(&pool).await?;
            list_runs(&pool, limit).await?;
        }
    }

    Ok(())
}

async fn list_runs(pool: &madshus_db::SqlitePool, limit: i64) -> anyhow::Result<()> {
    let runs = madshus_db::list_collection_runs(pool, limit).await?;
    if runs.is_empty() {
        println!("no collection runs recorded");
        return Ok(());
    }

    for run in runs {
        let started = run
            .started_at
            .map_or_else(|| "-".to_string(), |t| t.format("%Y-%m-%d %H:%M:%S").to_string());
        let error = run.error_message.as_deref().unwrap_or("");
        println!(
            "{id:>5}  {status:<9}  {started}  {records:>5} products  {error}",
            id = run.id,
            status = run.status,
            records = run.records_processed,
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests;
