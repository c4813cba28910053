//! Default values and default-value factories
//!
//! Static defaults are plain constants. Computed defaults are functions of
//! the other fields of a [`SparkPipelineOptions`] and are evaluated lazily,
//! once per options instance.

use super::SparkPipelineOptions;
use chrono::{DateTime, Utc};

/// Default Spark master: local mode with four worker threads
pub const DEFAULT_MASTER_URL: &str = "local[4]";

/// App name used when the executable name cannot be determined
pub const FALLBACK_APP_NAME: &str = "SparkPipeline";

/// Checkpoint directory for a job: `/tmp/<job name>`.
///
/// Meant for testing only; production streaming jobs should point the
/// checkpoint directory at a reliable filesystem (HDFS, S3, GCS). An empty job
/// name yields `/tmp/`.
pub fn tmp_checkpoint_dir(job_name: &str) -> String {
    format!("/tmp/{}", job_name)
}

/// Computed default for `spark.checkpoint_dir`
pub fn checkpoint_dir_default(options: &SparkPipelineOptions) -> String {
    tmp_checkpoint_dir(options.job_name())
}

/// Computed default for `application.job_name`
pub fn job_name_default(options: &SparkPipelineOptions) -> String {
    job_name_for(
        options.app_name(),
        &current_user_name(),
        Utc::now(),
        rand::random::<u32>(),
    )
}

/// Computed default for `application.app_name`
pub fn app_name_default(_options: &SparkPipelineOptions) -> String {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.file_stem().map(|stem| stem.to_string_lossy().into_owned()))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| FALLBACK_APP_NAME.to_string())
}

/// Build a job name of the form `app-user-MMddHHmmss-hex`
pub fn job_name_for(app_name: &str, user_name: &str, now: DateTime<Utc>, random: u32) -> String {
    let app = if app_name.is_empty() {
        normalize_name(FALLBACK_APP_NAME)
    } else {
        normalize_name(app_name)
    };

    format!(
        "{}-{}-{}-{:x}",
        app,
        normalize_name(user_name),
        now.format("%m%d%H%M%S"),
        random
    )
}

/// Lowercase and replace anything outside `[a-z0-9]` with `0`
fn normalize_name(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() {
                c
            } else {
                '0'
            }
        })
        .collect()
}

fn current_user_name() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_tmp_checkpoint_dir() {
        assert_eq!(tmp_checkpoint_dir("wordcount"), "/tmp/wordcount");
        assert_eq!(tmp_checkpoint_dir("a-b-0101"), "/tmp/a-b-0101");
        assert_eq!(tmp_checkpoint_dir(""), "/tmp/");
    }

    #[test]
    fn test_job_name_format() {
        let now = Utc.with_ymd_and_hms(2024, 3, 7, 9, 5, 2).unwrap();
        let name = job_name_for("WordCount", "alice", now, 0xbeef);
        assert_eq!(name, "wordcount-alice-0307090502-beef");
    }

    #[test]
    fn test_job_name_normalizes_names() {
        let now = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap();
        let name = job_name_for("My App.v2", "J.Doe", now, 1);
        assert_eq!(name, "my0app0v2-j0doe-1231235959-1");
    }

    #[test]
    fn test_job_name_empty_app_and_user() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let name = job_name_for("", "", now, 0xffff_ffff);
        assert_eq!(name, "sparkpipeline--0101000000-ffffffff");
    }
}
