pub mod report;

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Command-line arguments for lvseg
#[derive(Parser, Debug)]
#[command(name = "lvseg")]
#[command(about = "Cardiac MRI DICOM + LV contour loading tool")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Locate annotated slices in a dataset directory and summarize them
    Summary {
        /// Dataset directory containing link.csv
        #[arg(value_name = "BASE_DIR")]
        base_dir: PathBuf,

        /// Only count slices that also have an outer contour
        #[arg(long)]
        outer: bool,
    },

    /// Parse a single DICOM slice and contour file
    Inspect {
        /// Path to DICOM file
        #[arg(value_name = "DICOM")]
        dicom: PathBuf,

        /// Path to contour file
        #[arg(value_name = "CONTOUR")]
        contour: PathBuf,

        /// Write a mask-over-image PNG to this path
        #[arg(long, value_name = "PNG")]
        overlay: Option<PathBuf>,
    },

    /// Load the dataset and iterate shuffled minibatches
    Batches(BatchArgs),
}

#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Dataset directory containing link.csv
    #[arg(value_name = "BASE_DIR")]
    pub base_dir: PathBuf,

    /// Samples per batch
    #[arg(short, long, default_value_t = 8)]
    pub batch_size: usize,

    /// Shuffle seed (random when omitted)
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Number of epochs to run
    #[arg(short, long, default_value_t = 1)]
    pub epochs: usize,

    /// Require outer contours and batch outer masks
    #[arg(long)]
    pub outer: bool,

    /// Keep the trailing incomplete batch of each epoch
    #[arg(long)]
    pub keep_last: bool,

    /// Abort on the first sample that fails to load
    #[arg(long)]
    pub fail_fast: bool,
}

/// Output format options
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format
    Text,
    /// JSON format
    Json,
}
