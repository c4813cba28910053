//! sparkopts - Pipeline options for the Spark runner
//!
//! Holds the user-tunable execution parameters of a Spark pipeline
//! submission and the small amount of behavior attached to them.
//!
//! # Architecture
//!
//! - **Options**: [`SparkPipelineOptions`] with static and lazily computed defaults
//! - **Execution mode**: local vs cluster, derived from the master URL
//! - **Staging**: filter and canonicalize `files_to_stage`, then hand them to a
//!   [`staging::StagingService`] (cluster mode only)
//! - **Registry**: fixed lists of options groups contributed by integrations

pub mod config;
pub mod error;
pub mod mode;
pub mod registry;
pub mod staging;

// Re-export commonly used types
pub use config::SparkPipelineOptions;
pub use error::StagingError;
pub use mode::{is_local_master, ExecutionMode};
pub use staging::{prepare_files_to_stage, DirectoryPackager, StagingService};

/// Result type used by the loading and CLI layers
pub type Result<T> = anyhow::Result<T>;
