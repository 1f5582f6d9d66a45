use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "warpkit")]
#[command(about = "Inspect, compose and invert spatial transforms")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a transform's kind, dimension and parameters
    Inspect {
        /// Transform file (JSON)
        file: PathBuf,
    },

    /// Map a physical point through a transform
    MapPoint {
        /// Transform file (JSON)
        file: PathBuf,

        /// Comma-separated coordinates, e.g. 1.5,-2,0
        #[arg(short, long, value_delimiter = ',', allow_negative_numbers = true)]
        point: Vec<f64>,

        /// Map through the inverse transform instead
        #[arg(long)]
        inverse: bool,
    },

    /// Write the inverse of a transform
    Invert {
        /// Transform file (JSON)
        file: PathBuf,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Print the output grid that contains a source grid after transformation
    DeriveGrid {
        /// Resampling transform file (JSON), mapping output to source
        file: PathBuf,

        /// Source grid size, comma-separated
        #[arg(long, value_delimiter = ',')]
        size: Vec<usize>,

        /// Source grid spacing (default 1 on every axis)
        #[arg(long, value_delimiter = ',')]
        spacing: Option<Vec<f64>>,

        /// Source grid origin (default 0 on every axis)
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
        origin: Option<Vec<f64>>,

        /// Spacing of the derived grid (default: source spacing)
        #[arg(long, value_delimiter = ',')]
        output_spacing: Option<Vec<f64>>,
    },

    /// Stack transforms into one composite; the last file is applied first
    Compose {
        /// Transform files in add order
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect { file } => {
            print!("{}", commands::inspect(&file)?);
        }
        Commands::MapPoint { file, point, inverse } => {
            println!("{}", commands::map_point(&file, &point, inverse)?);
        }
        Commands::Invert { file, output } => {
            commands::invert(&file, &output)?;
        }
        Commands::DeriveGrid {
            file,
            size,
            spacing,
            origin,
            output_spacing,
        } => {
            let request = commands::GridRequest {
                size,
                spacing,
                origin,
                output_spacing,
            };
            println!("{}", commands::derive_grid(&file, &request)?);
        }
        Commands::Compose { files, output } => {
            commands::compose(&files, &output)?;
        }
    }

    Ok(())
}
