//! Error types for file staging

use std::path::PathBuf;
use thiserror::Error;

/// Failures raised while preparing files for staging.
///
/// None of these are recovered locally: if staging fails, workers cannot
/// obtain the resources they need and the submission has to stop.
#[derive(Error, Debug)]
pub enum StagingError {
    #[error("To-be-staged file does not exist: '{}'", path.display())]
    MissingFile { path: PathBuf },

    #[error("No temporary location for packaging directory '{}'", path.display())]
    MissingTempLocation { path: PathBuf },

    #[error("Staging IO error at '{}': {message}", path.display())]
    Io {
        path: PathBuf,
        message: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to package '{}': {source}", path.display())]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("Failed to walk directory '{}': {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

// Convenience constructors
impl StagingError {
    pub fn missing_file(path: impl Into<PathBuf>) -> Self {
        Self::MissingFile { path: path.into() }
    }

    pub fn missing_temp_location(path: impl Into<PathBuf>) -> Self {
        Self::MissingTempLocation { path: path.into() }
    }

    pub fn io(path: impl Into<PathBuf>, message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: message.into(),
            source,
        }
    }

    pub fn archive(path: impl Into<PathBuf>, source: zip::result::ZipError) -> Self {
        Self::Archive {
            path: path.into(),
            source,
        }
    }

    pub fn walk(path: impl Into<PathBuf>, source: walkdir::Error) -> Self {
        Self::Walk {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_message() {
        let err = StagingError::missing_file("/no/such/app.jar");
        assert_eq!(
            err.to_string(),
            "To-be-staged file does not exist: '/no/such/app.jar'"
        );
    }

    #[test]
    fn test_io_error_keeps_source() {
        let source = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = StagingError::io("/tmp/stage", "Failed to create staging dir", source);
        assert!(err.to_string().contains("Failed to create staging dir"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
