use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use gazette::app::AppContext;
use gazette::cli::{commands, Cli, Commands};
use gazette::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let ctx = AppContext::new(config)?;

    match cli.command {
        Commands::Items { category, limit } => {
            commands::show_items(&ctx, category.as_deref(), limit).await?;
        }
        Commands::Trending { limit } => {
            commands::show_trending(&ctx, limit).await?;
        }
        Commands::All { limit } => {
            commands::show_all(&ctx, limit).await?;
        }
        Commands::Search { query, limit } => {
            commands::search(&ctx, &query, limit).await?;
        }
        Commands::Categories => {
            commands::list_categories(&ctx);
        }
        Commands::Sources => {
            commands::list_sources(&ctx);
        }
        Commands::Report { category } => {
            commands::report(&ctx, category.as_deref()).await?;
        }
        Commands::Watch {
            category,
            limit,
            interval,
            force,
        } => {
            commands::watch(&ctx, category.as_deref(), limit, interval.as_deref(), force).await?;
        }
    }

    Ok(())
}
