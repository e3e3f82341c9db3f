// radar/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use radar_core::ports::SinkFormat;

#[derive(Parser)]
#[command(name = "radar")]
#[command(about = "Economic time-series ingestion, normalization and quality pipeline", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Datasets configuration file
    #[arg(long, global = true, default_value = "configs/datasets.yml")]
    pub config: PathBuf,

    /// Quality profiles file (optional; missing file means no profiles)
    #[arg(long, global = true, default_value = "configs/quality.yml")]
    pub quality: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Parquet,
    Csv,
}

impl From<OutputFormat> for SinkFormat {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Parquet => SinkFormat::Parquet,
            OutputFormat::Csv => SinkFormat::Csv,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// 📥 Fetches the source file of a dataset
    Fetch {
        dataset_id: String,

        /// Directory for raw files
        #[arg(long, default_value = "data/raw")]
        output: PathBuf,
    },

    /// 🧾 Parses a raw file into records
    Parse {
        dataset_id: String,

        #[arg(long, default_value = "data/raw")]
        input: PathBuf,

        #[arg(long, default_value = "data/parsed")]
        output: PathBuf,
    },

    /// 📐 Maps parsed records onto a series and its observations
    Normalize {
        dataset_id: String,

        #[arg(long, default_value = "data/parsed")]
        input: PathBuf,

        #[arg(long, default_value = "data/normalized")]
        output: PathBuf,
    },

    /// 🧪 Applies the dataset's quality profile
    Quality {
        dataset_id: String,

        #[arg(long, default_value = "data/normalized")]
        input: PathBuf,

        #[arg(long, default_value = "data/quality")]
        output: PathBuf,
    },

    /// 💾 Writes the cleaned series to Parquet or CSV
    Write {
        dataset_id: String,

        #[arg(long, default_value = "data/quality")]
        input: PathBuf,

        #[arg(long, default_value = "data/output")]
        output: PathBuf,

        #[arg(long, value_enum, default_value = "parquet")]
        format: OutputFormat,

        /// Parquet only: one sub-directory per series code
        #[arg(long)]
        partition: bool,
    },

    /// 🚀 Runs every stage for all (or selected) datasets
    Run {
        /// Dataset id to run (repeatable)
        #[arg(long, short)]
        select: Vec<String>,

        /// Data root (overridden by RADAR_DATA_DIR)
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,

        #[arg(long, value_enum, default_value = "parquet")]
        format: OutputFormat,

        #[arg(long)]
        partition: bool,

        /// Datasets processed at the same time
        #[arg(long, default_value = "4")]
        concurrency: usize,
    },

    /// 📊 Prints the saved quality report of a dataset
    Report {
        dataset_id: String,

        #[arg(long, default_value = "data/quality")]
        input: PathBuf,

        /// Print the JSON report instead of the table
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, bail};
    use clap::Parser;

    #[test]
    fn test_cli_parse_run_defaults() -> Result<()> {
        let args = Cli::parse_from(["radar", "run"]);
        assert_eq!(args.config, PathBuf::from("configs/datasets.yml"));
        assert_eq!(args.quality, PathBuf::from("configs/quality.yml"));
        match args.command {
            Commands::Run {
                select,
                data_dir,
                format,
                partition,
                concurrency,
            } => {
                assert!(select.is_empty());
                assert_eq!(data_dir, PathBuf::from("data"));
                assert_eq!(format, OutputFormat::Parquet);
                assert!(!partition);
                assert_eq!(concurrency, 4);
                Ok(())
            }
            _ => bail!("Expected Run command"),
        }
    }

    #[test]
    fn test_cli_parse_run_select_many() -> Result<()> {
        let args = Cli::parse_from([
            "radar",
            "run",
            "--select",
            "bcra_reservas",
            "-s",
            "indec_ipc",
            "--format",
            "csv",
            "--config",
            "/etc/radar/datasets.yml",
        ]);
        assert_eq!(args.config, PathBuf::from("/etc/radar/datasets.yml"));
        match args.command {
            Commands::Run { select, format, .. } => {
                assert_eq!(select, vec!["bcra_reservas", "indec_ipc"]);
                assert_eq!(SinkFormat::from(format), SinkFormat::Csv);
                Ok(())
            }
            _ => bail!("Expected Run command"),
        }
    }

    #[test]
    fn test_cli_parse_stage_defaults() -> Result<()> {
        let args = Cli::parse_from(["radar", "quality", "indec_ipc"]);
        match args.command {
            Commands::Quality {
                dataset_id,
                input,
                output,
            } => {
                assert_eq!(dataset_id, "indec_ipc");
                assert_eq!(input, PathBuf::from("data/normalized"));
                assert_eq!(output, PathBuf::from("data/quality"));
                Ok(())
            }
            _ => bail!("Expected Quality command"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["radar", "write", "x", "--format", "xlsx"]).is_err());
    }
}
