//! sparkopts CLI entry point

use anyhow::{Context, Result};
use sparkopts::config::{cli::Cli, schema, toml as options_toml, SparkPipelineOptions};
use sparkopts::{registry, staging, DirectoryPackager};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    init_tracing(cli.debug);

    if cli.describe {
        print_schema();
        return Ok(());
    }
    if cli.list_groups {
        print_groups();
        return Ok(());
    }

    let options = match cli.config {
        Some(ref path) => options_toml::parse_toml_file(path)?,
        None => SparkPipelineOptions::new(),
    };
    let mut options = options_toml::merge_cli_with_options(&cli, options);

    // Caller-side default: stage the running executable
    if options.files_to_stage().is_none() {
        options.set_files_to_stage(staging::detect_files_to_stage());
    }

    tracing::info!(
        master = %options.spark_master(),
        mode = %options.execution_mode(),
        "Preparing pipeline options"
    );

    staging::prepare_files_to_stage(&mut options, &DirectoryPackager::new())
        .context("Failed to prepare files for staging")?;

    options.resolve_defaults();
    if options.is_streaming() && options.checkpoint_dir().starts_with("/tmp/") {
        tracing::warn!(
            checkpoint_dir = %options.checkpoint_dir(),
            "Streaming job checkpoints to /tmp; use a reliable filesystem such as HDFS/S3/GS for durability"
        );
    }

    if cli.json {
        let json = serde_json::to_string_pretty(&options)
            .context("Failed to serialize options")?;
        println!("{}", json);
    } else {
        print!("{}", options);
    }

    Ok(())
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "sparkopts=debug" } else { "sparkopts=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_schema() {
    println!("Pipeline options:");
    for spec in schema::SPARK_PIPELINE_OPTIONS {
        println!("  {}", spec);
    }
}

fn print_groups() {
    println!("Registered options groups:");
    for group in registry::registered_options_groups() {
        println!("  {}", group);
    }
}
