//! File staging preparation
//!
//! Before a cluster submission, the files listed in `spark.files_to_stage`
//! are filtered down to the ones that exist, canonicalized, and handed to a
//! [`StagingService`] whose output replaces the configured list. In local
//! mode the driver and executors share one process, so nothing is staged.
//! Skipping local mode matters for correctness too: staging loose class
//! directories is known to break local runs.

pub mod packager;

pub use packager::DirectoryPackager;

use crate::config::SparkPipelineOptions;
use crate::error::StagingError;
use std::fs;

/// Turns a list of local paths into the identifiers workers will fetch
pub trait StagingService {
    /// Prepare `paths` for staging; `fallback_dir` receives any generated artifacts
    fn prepare_files_for_staging(
        &self,
        paths: &[String],
        fallback_dir: &str,
    ) -> Result<Vec<String>, StagingError>;
}

/// Rewrite `options.spark.files_to_stage` for a cluster submission.
///
/// Local masters return immediately and leave the list untouched. Entries that
/// do not exist are dropped with a warning. Failures from `stager` propagate.
pub fn prepare_files_to_stage(
    options: &mut SparkPipelineOptions,
    stager: &dyn StagingService,
) -> Result<(), StagingError> {
    if options.execution_mode().is_local() {
        tracing::debug!(
            master = %options.spark_master(),
            "Local master, skipping file staging"
        );
        return Ok(());
    }

    let existing = existing_absolute_paths(options.files_to_stage().unwrap_or_default());
    let fallback_dir = fallback_dir(options);

    let staged = stager.prepare_files_for_staging(&existing, &fallback_dir)?;
    tracing::info!(
        count = staged.len(),
        fallback_dir = %fallback_dir,
        "Prepared files for staging"
    );

    options.set_files_to_stage(staged);
    Ok(())
}

/// Keep the paths that exist, in canonical absolute form
fn existing_absolute_paths(paths: &[String]) -> Vec<String> {
    paths
        .iter()
        .filter_map(|path| match fs::canonicalize(path) {
            Ok(resolved) => Some(resolved.to_string_lossy().into_owned()),
            Err(e) => {
                tracing::warn!(path = %path, error = %e, "Dropping missing file from files_to_stage");
                None
            }
        })
        .collect()
}

/// Configured temp location, or the system temp dir
fn fallback_dir(options: &SparkPipelineOptions) -> String {
    match options.temp_location() {
        Some(location) => location.to_string(),
        None => std::env::temp_dir().to_string_lossy().into_owned(),
    }
}

/// Default for `files_to_stage` when the caller has none: the running executable
pub fn detect_files_to_stage() -> Vec<String> {
    std::env::current_exe()
        .ok()
        .map(|exe| vec![exe.to_string_lossy().into_owned()])
        .unwrap_or_default()
}
