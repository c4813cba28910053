//! Registry of known options groups
//!
//! Each optional integration contributes a registrar listing its options
//! groups. Registrars are wired in explicitly in [`registrars`], so an
//! options-aggregation layer can enumerate every group without loading
//! plugins at runtime.

use std::collections::HashSet;
use std::fmt;

/// Identifies one cohesive set of related options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OptionsGroup {
    /// Unique group name
    pub name: &'static str,
    /// Feature or integration that owns the group
    pub feature: &'static str,
    pub description: &'static str,
}

/// Source of a fixed, ordered list of options groups
pub trait OptionsRegistrar: Sync {
    fn options_groups(&self) -> &'static [OptionsGroup];
}

/// Options groups of the Google Cloud IO connectors
#[derive(Debug, Clone, Copy, Default)]
pub struct GcpIoOptionsRegistrar;

pub static GCP_IO_OPTIONS_GROUPS: &[OptionsGroup] = &[
    OptionsGroup {
        name: "bigquery",
        feature: "gcp-io",
        description: "BigQuery read/write options",
    },
    OptionsGroup {
        name: "pubsub",
        feature: "gcp-io",
        description: "Pub/Sub endpoint options",
    },
    OptionsGroup {
        name: "firestore",
        feature: "gcp-io",
        description: "Firestore connector options",
    },
    OptionsGroup {
        name: "test-bigquery",
        feature: "gcp-io",
        description: "BigQuery options used by integration tests",
    },
];

impl OptionsRegistrar for GcpIoOptionsRegistrar {
    fn options_groups(&self) -> &'static [OptionsGroup] {
        GCP_IO_OPTIONS_GROUPS
    }
}

/// Options groups of the Spark runner itself
#[derive(Debug, Clone, Copy, Default)]
pub struct SparkRunnerOptionsRegistrar;

pub static SPARK_RUNNER_OPTIONS_GROUPS: &[OptionsGroup] = &[
    OptionsGroup {
        name: "pipeline",
        feature: "core",
        description: "Options shared by every runner",
    },
    OptionsGroup {
        name: "streaming",
        feature: "core",
        description: "Streaming execution toggle",
    },
    OptionsGroup {
        name: "application",
        feature: "core",
        description: "Application and job naming",
    },
    OptionsGroup {
        name: "spark",
        feature: "spark-runner",
        description: "Spark master, checkpointing, staging and metrics",
    },
];

impl OptionsRegistrar for SparkRunnerOptionsRegistrar {
    fn options_groups(&self) -> &'static [OptionsGroup] {
        SPARK_RUNNER_OPTIONS_GROUPS
    }
}

/// Every registrar compiled into this build, runner first
pub fn registrars() -> Vec<&'static dyn OptionsRegistrar> {
    #[allow(unused_mut)]
    let mut all: Vec<&'static dyn OptionsRegistrar> = vec![&SparkRunnerOptionsRegistrar];
    #[cfg(feature = "gcp-io")]
    all.push(&GcpIoOptionsRegistrar);
    all
}

/// All groups from all registrars in order; a repeated name keeps its first entry
pub fn registered_options_groups() -> Vec<&'static OptionsGroup> {
    let mut seen = HashSet::new();
    registrars()
        .into_iter()
        .flat_map(|registrar| registrar.options_groups().iter())
        .filter(|group| seen.insert(group.name))
        .collect()
}

impl fmt::Display for OptionsGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.name, self.feature, self.description)
    }
}
