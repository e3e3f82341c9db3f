// radar/src/main.rs

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Setup Logging (Tracing)
    // RUST_LOG=debug radar run ... to see the details
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let paths = commands::ConfigPaths {
        datasets: cli.config,
        quality: cli.quality,
    };

    match cli.command {
        Commands::Fetch { dataset_id, output } => {
            commands::fetch::execute(&paths, &dataset_id, &output).await?
        }
        Commands::Parse {
            dataset_id,
            input,
            output,
        } => commands::parse::execute(&paths, &dataset_id, &input, &output)?,
        Commands::Normalize {
            dataset_id,
            input,
            output,
        } => commands::normalize::execute(&paths, &dataset_id, &input, &output)?,
        Commands::Quality {
            dataset_id,
            input,
            output,
        } => commands::quality::execute(&paths, &dataset_id, &input, &output)?,
        Commands::Write {
            dataset_id,
            input,
            output,
            format,
            partition,
        } => {
            commands::write::execute(&dataset_id, &input, &output, format.into(), partition).await?
        }
        Commands::Run {
            select,
            data_dir,
            format,
            partition,
            concurrency,
        } => {
            commands::run::execute(&paths, select, data_dir, format.into(), partition, concurrency)
                .await?
        }
        Commands::Report {
            dataset_id,
            input,
            json,
        } => commands::report::execute(&dataset_id, &input, json)?,
    }

    Ok(())
}
