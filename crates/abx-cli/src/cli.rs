use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::LogFormat;

#[derive(Parser, Debug)]
#[command(name = "abx")]
#[command(about = "Antibiotic sensitivity testing calculations", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to the user config directory)
    #[arg(long, global = true, env = "ABX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Name stamped on rejections and audit events
    #[arg(long, global = true, env = "ABX_ACTOR")]
    pub actor: Option<String>,

    /// Log output format
    #[arg(long, global = true, value_enum, env = "ABX_LOG_FORMAT")]
    pub log_format: Option<LogFormat>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MeasurementKind {
    /// Disk diffusion zone diameter (mm)
    Zone,
    /// Minimum inhibitory concentration (mg/L)
    Mic,
}

/// A cluster of a workbook: one sample, one microorganism.
#[derive(clap::Args, Debug, Clone)]
pub struct ClusterArgs {
    /// Sample identifier
    #[arg(long)]
    pub sample: String,

    /// Microorganism name
    #[arg(long)]
    pub microorganism: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check a setup file: unique identifiers, known antibiotics, acyclic
    /// extrapolation
    ValidateSetup {
        /// Setup JSON file
        setup: PathBuf,
    },

    /// Classify a single measurement against a breakpoints table
    Classify {
        /// Setup JSON file
        #[arg(long)]
        setup: PathBuf,

        /// Breakpoints table uid or title
        #[arg(long)]
        table: String,

        /// Microorganism name
        #[arg(long)]
        microorganism: String,

        /// Antibiotic abbreviation
        #[arg(long)]
        antibiotic: String,

        /// Measurement method
        #[arg(long, value_enum, default_value = "zone")]
        method: MeasurementKind,

        /// Measured value
        value: String,
    },

    /// Recalculate the cluster of an analysis after one of its results
    /// changed
    Recalc {
        /// Workbook JSON file
        workbook: PathBuf,

        /// Id of the analysis that changed
        #[arg(long)]
        analysis: String,

        /// Output file (defaults to rewriting the workbook)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Flag antibiotics as "Not Tested" across a cluster
    Reject {
        /// Workbook JSON file
        workbook: PathBuf,

        #[command(flatten)]
        cluster: ClusterArgs,

        /// Antibiotic abbreviations
        #[arg(long, value_delimiter = ',', required = true)]
        antibiotics: Vec<String>,

        /// Output file (defaults to rewriting the workbook)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Assign antibiotics to every analysis of a cluster
    Assign {
        /// Workbook JSON file
        workbook: PathBuf,

        #[command(flatten)]
        cluster: ClusterArgs,

        /// Antibiotic abbreviations
        #[arg(long, value_delimiter = ',', required = true)]
        antibiotics: Vec<String>,

        /// Output file (defaults to rewriting the workbook)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the values and reportable result of a cluster
    Show {
        /// Workbook JSON file
        workbook: PathBuf,

        #[command(flatten)]
        cluster: ClusterArgs,
    },

    /// Print the effective config, or write the defaults
    Config {
        /// Write the default config if none exists
        #[arg(long)]
        init: bool,
    },
}
