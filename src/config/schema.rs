//! Option schema: names, descriptions and default strategies
//!
//! Each option carries a human-readable description and a default strategy,
//! either a static constant or a function of the other options.

use super::defaults;
use super::SparkPipelineOptions;
use std::fmt;

/// How an option gets its value when the user did not supply one
#[derive(Clone, Copy)]
pub enum DefaultValue {
    /// No default at this layer
    None,
    /// A constant, shown in its textual form
    Static(&'static str),
    /// Computed lazily from other options; `compute` reads through the
    /// instance's cache, so it never yields a second, different value
    Computed {
        rule: &'static str,
        compute: fn(&SparkPipelineOptions) -> String,
    },
}

/// One configurable option
#[derive(Clone, Copy)]
pub struct OptionSpec {
    pub name: &'static str,
    pub group: &'static str,
    pub description: &'static str,
    pub default: DefaultValue,
}

/// Every option of [`SparkPipelineOptions`], in declaration order
pub static SPARK_PIPELINE_OPTIONS: &[OptionSpec] = &[
    OptionSpec {
        name: "temp_location",
        group: "pipeline",
        description: "Base directory for temporary artifacts such as packaged directories.",
        default: DefaultValue::None,
    },
    OptionSpec {
        name: "streaming",
        group: "streaming",
        description: "Run the pipeline in streaming mode.",
        default: DefaultValue::Static("false"),
    },
    OptionSpec {
        name: "app_name",
        group: "application",
        description: "Name of the application.",
        default: DefaultValue::Computed {
            rule: "executable name",
            compute: resolved_app_name,
        },
    },
    OptionSpec {
        name: "job_name",
        group: "application",
        description: "Name of the job; must be unique among running jobs.",
        default: DefaultValue::Computed {
            rule: "<app>-<user>-<MMddHHmmss>-<random hex>",
            compute: resolved_job_name,
        },
    },
    OptionSpec {
        name: "spark_master",
        group: "spark",
        description: "The url of the spark master to connect to, (e.g. spark://host:port, local[4]).",
        default: DefaultValue::Static(defaults::DEFAULT_MASTER_URL),
    },
    OptionSpec {
        name: "checkpoint_dir",
        group: "spark",
        description: "A checkpoint directory for streaming resilience, ignored in batch. \
                      For durability, a reliable filesystem such as HDFS/S3/GS is necessary.",
        default: DefaultValue::Computed {
            rule: "/tmp/<job_name>",
            compute: resolved_checkpoint_dir,
        },
    },
    OptionSpec {
        name: "files_to_stage",
        group: "spark",
        description: "Files to send to all workers and put on the classpath. \
                      The default value is the running executable.",
        default: DefaultValue::None,
    },
    OptionSpec {
        name: "enable_metrics_sink",
        group: "spark",
        description: "Enable/disable sending aggregator values to Spark's metric sinks.",
        default: DefaultValue::Static("true"),
    },
];

fn resolved_app_name(options: &SparkPipelineOptions) -> String {
    options.app_name().to_string()
}

fn resolved_job_name(options: &SparkPipelineOptions) -> String {
    options.job_name().to_string()
}

fn resolved_checkpoint_dir(options: &SparkPipelineOptions) -> String {
    options.checkpoint_dir().to_string()
}

/// Look up an option by name
pub fn find_option(name: &str) -> Option<&'static OptionSpec> {
    SPARK_PIPELINE_OPTIONS.iter().find(|spec| spec.name == name)
}

/// Options belonging to one group, in declaration order
pub fn options_in_group(group: &str) -> impl Iterator<Item = &'static OptionSpec> + '_ {
    SPARK_PIPELINE_OPTIONS.iter().filter(move |spec| spec.group == group)
}

impl OptionSpec {
    /// The default this option takes on `options`, if it has one.
    ///
    /// Computed options report the value cached on `options`, resolving it
    /// there first if it has not been read yet.
    pub fn default_for(&self, options: &SparkPipelineOptions) -> Option<String> {
        match self.default {
            DefaultValue::None => None,
            DefaultValue::Static(value) => Some(value.to_string()),
            DefaultValue::Computed { compute, .. } => Some(compute(options)),
        }
    }

    pub fn is_computed(&self) -> bool {
        matches!(self.default, DefaultValue::Computed { .. })
    }
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::None => write!(f, "none"),
            DefaultValue::Static(value) => write!(f, "{}", value),
            DefaultValue::Computed { rule, .. } => write!(f, "computed: {}", rule),
        }
    }
}

impl fmt::Debug for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for OptionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{} [default: {}]\n    {}",
            self.group, self.name, self.default, self.description
        )
    }
}

impl fmt::Debug for OptionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionSpec")
            .field("name", &self.name)
            .field("group", &self.group)
            .field("default", &self.default)
            .finish()
    }
}
