//! CLI argument parsing using clap

use clap::Parser;
use std::path::PathBuf;

/// sparkopts - Resolve and stage Spark runner pipeline options
#[derive(Parser, Debug)]
#[command(name = "sparkopts")]
#[command(version, about, long_about = None)]
pub struct Cli {
    // === Configuration File ===
    /// TOML options file
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    // === Spark Options ===
    /// The url of the spark master to connect to (e.g. spark://host:port, local[4])
    #[arg(long, env = "SPARK_MASTER")]
    pub spark_master: Option<String>,

    /// Checkpoint directory for streaming resilience (default: /tmp/<job name>)
    #[arg(long)]
    pub checkpoint_dir: Option<String>,

    /// Files to send to all workers (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub files_to_stage: Option<Vec<String>>,

    /// Enable/disable sending aggregator values to Spark's metric sinks
    #[arg(long)]
    pub enable_metrics_sink: Option<bool>,

    // === Application Options ===
    /// Application name (default: executable name)
    #[arg(long)]
    pub app_name: Option<String>,

    /// Job name (default: <app>-<user>-<MMddHHmmss>-<random>)
    #[arg(long)]
    pub job_name: Option<String>,

    // === Pipeline Options ===
    /// Base directory for temporary artifacts
    #[arg(long, env = "SPARKOPTS_TEMP_LOCATION")]
    pub temp_location: Option<String>,

    /// Run as a streaming pipeline
    #[arg(long)]
    pub streaming: bool,

    // === Output Options ===
    /// Print the option schema and exit
    #[arg(long)]
    pub describe: bool,

    /// Print the registered options groups and exit
    #[arg(long)]
    pub list_groups: bool,

    /// Print resolved options as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
