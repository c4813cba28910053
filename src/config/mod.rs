//! Configuration module
//!
//! Pipeline options for the Spark runner, the schema describing them, and
//! loading from TOML files and CLI flags.

pub mod cli;
pub mod defaults;
pub mod lazy;
pub mod schema;
pub mod toml;

use crate::mode::ExecutionMode;
use lazy::Defaulted;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Complete set of options for one pipeline submission
///
/// Built once per execution request and owned by a single preparation
/// sequence. Computed defaults are resolved on first read and cached, so the
/// type is deliberately not `Sync`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SparkPipelineOptions {
    #[serde(default)]
    pub pipeline: PipelineOptions,
    #[serde(default)]
    pub streaming: StreamingOptions,
    #[serde(default)]
    pub application: ApplicationOptions,
    #[serde(default)]
    pub spark: SparkCommonOptions,
}

/// Options shared by every runner
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineOptions {
    /// Base directory for temporary artifacts
    pub temp_location: Option<String>,
}

/// Streaming execution toggle
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StreamingOptions {
    /// Run as a streaming (unbounded) pipeline
    #[serde(default)]
    pub streaming: bool,
}

/// Application and job naming
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApplicationOptions {
    /// Application name; defaults to the executable name
    #[serde(default)]
    pub app_name: Defaulted<String>,
    /// Job name; defaults to `app-user-MMddHHmmss-random`
    #[serde(default)]
    pub job_name: Defaulted<String>,
}

/// Spark execution options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SparkCommonOptions {
    /// URL of the Spark master (e.g. spark://host:port, local[4])
    #[serde(default = "default_spark_master")]
    pub spark_master: String,
    /// Checkpoint directory for streaming resilience; defaults to /tmp/<job name>
    #[serde(default)]
    pub checkpoint_dir: Defaulted<String>,
    /// Local files to send to every worker
    #[serde(default)]
    pub files_to_stage: Option<Vec<String>>,
    /// Send aggregator values to Spark's metric sinks
    #[serde(default = "default_enable_metrics_sink")]
    pub enable_metrics_sink: bool,
}

fn default_spark_master() -> String {
    defaults::DEFAULT_MASTER_URL.to_string()
}

fn default_enable_metrics_sink() -> bool {
    true
}

impl Default for SparkCommonOptions {
    fn default() -> Self {
        Self {
            spark_master: default_spark_master(),
            checkpoint_dir: Defaulted::unset(),
            files_to_stage: None,
            enable_metrics_sink: default_enable_metrics_sink(),
        }
    }
}

impl SparkPipelineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spark_master(&self) -> &str {
        &self.spark.spark_master
    }

    pub fn set_spark_master(&mut self, master: impl Into<String>) {
        self.spark.spark_master = master.into();
    }

    pub fn app_name(&self) -> &str {
        self.application
            .app_name
            .get_or_compute(|| defaults::app_name_default(self))
    }

    pub fn set_app_name(&mut self, name: impl Into<String>) {
        self.application.app_name.set(name.into());
    }

    pub fn job_name(&self) -> &str {
        self.application.job_name.get_or_compute(|| {
            let name = defaults::job_name_default(self);
            tracing::debug!(job_name = %name, "Resolved default job name");
            name
        })
    }

    pub fn set_job_name(&mut self, name: impl Into<String>) {
        self.application.job_name.set(name.into());
    }

    /// Checkpoint directory, computed from the job name on first read if unset
    pub fn checkpoint_dir(&self) -> &str {
        self.spark.checkpoint_dir.get_or_compute(|| {
            let dir = defaults::checkpoint_dir_default(self);
            tracing::debug!(checkpoint_dir = %dir, "Resolved default checkpoint directory");
            dir
        })
    }

    pub fn set_checkpoint_dir(&mut self, dir: impl Into<String>) {
        self.spark.checkpoint_dir.set(dir.into());
    }

    pub fn files_to_stage(&self) -> Option<&[String]> {
        self.spark.files_to_stage.as_deref()
    }

    pub fn set_files_to_stage(&mut self, files: Vec<String>) {
        self.spark.files_to_stage = Some(files);
    }

    pub fn enable_metrics_sink(&self) -> bool {
        self.spark.enable_metrics_sink
    }

    pub fn set_enable_metrics_sink(&mut self, enabled: bool) {
        self.spark.enable_metrics_sink = enabled;
    }

    pub fn temp_location(&self) -> Option<&str> {
        self.pipeline.temp_location.as_deref()
    }

    pub fn is_streaming(&self) -> bool {
        self.streaming.streaming
    }

    /// Local or cluster execution, derived from the master URL
    pub fn execution_mode(&self) -> ExecutionMode {
        ExecutionMode::detect(self.spark_master())
    }

    /// Force every computed default so that a serialized snapshot is complete
    pub fn resolve_defaults(&self) {
        self.app_name();
        self.job_name();
        self.checkpoint_dir();
    }
}

// Display trait implementations

impl fmt::Display for SparkPipelineOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Pipeline options:")?;
        writeln!(f, "  Application: {}", self.application)?;
        writeln!(f, "  Pipeline: {}", self.pipeline)?;
        writeln!(f, "  Streaming: {}", self.streaming.streaming)?;
        writeln!(f, "  Spark: {}", self.spark)?;
        Ok(())
    }
}

impl fmt::Display for PipelineOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.temp_location {
            Some(ref location) => write!(f, "temp_location={}", location),
            None => write!(f, "temp_location=<system temp dir>"),
        }
    }
}

impl fmt::Display for ApplicationOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "app_name={:?}, job_name={:?}", self.app_name, self.job_name)
    }
}

impl fmt::Display for SparkCommonOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "master={} ({}), checkpoint_dir={:?}, metrics_sink={}",
            self.spark_master,
            ExecutionMode::detect(&self.spark_master),
            self.checkpoint_dir,
            if self.enable_metrics_sink { "enabled" } else { "disabled" }
        )?;
        match self.files_to_stage {
            Some(ref files) => write!(f, ", files_to_stage=[{}]", files.join(", ")),
            None => Ok(()),
        }
    }
}
