//! TOML options file parsing

use super::*;
use crate::config::cli::Cli;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Parse a TOML options file
pub fn parse_toml_file(path: &Path) -> Result<SparkPipelineOptions> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read options file: {}", path.display()))?;

    parse_toml_string(&contents)
        .with_context(|| format!("Failed to parse options file: {}", path.display()))
}

/// Parse TOML options from a string
pub fn parse_toml_string(contents: &str) -> Result<SparkPipelineOptions> {
    let options: SparkPipelineOptions = ::toml::from_str(contents)
        .context("Failed to parse TOML options")?;

    Ok(options)
}

/// Merge CLI arguments into file options (CLI takes precedence)
pub fn merge_cli_with_options(cli: &Cli, mut options: SparkPipelineOptions) -> SparkPipelineOptions {
    if let Some(ref master) = cli.spark_master {
        options.set_spark_master(master.clone());
    }
    if let Some(ref dir) = cli.checkpoint_dir {
        options.set_checkpoint_dir(dir.clone());
    }
    if let Some(ref files) = cli.files_to_stage {
        options.set_files_to_stage(files.clone());
    }
    if let Some(enabled) = cli.enable_metrics_sink {
        options.set_enable_metrics_sink(enabled);
    }

    if let Some(ref name) = cli.app_name {
        options.set_app_name(name.clone());
    }
    if let Some(ref name) = cli.job_name {
        options.set_job_name(name.clone());
    }

    if let Some(ref location) = cli.temp_location {
        options.pipeline.temp_location = Some(location.clone());
    }
    if cli.streaming {
        options.streaming.streaming = true;
    }

    options
}
