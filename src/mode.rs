//! Execution mode detection from the Spark master URL

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the pipeline will run
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// Single process; workers share the driver's resources
    Local,
    /// Separate worker processes that need staged files
    Cluster,
}

impl ExecutionMode {
    pub fn detect(master: &str) -> Self {
        if is_local_master(master) {
            Self::Local
        } else {
            Self::Cluster
        }
    }

    pub fn is_local(self) -> bool {
        self == Self::Local
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionMode::Local => write!(f, "local"),
            ExecutionMode::Cluster => write!(f, "cluster"),
        }
    }
}

/// True for `local` and `local[N]` (N may be empty), false for anything else.
///
/// Unrecognized masters count as cluster mode, so staging runs when in doubt.
pub fn is_local_master(master: &str) -> bool {
    let Some(rest) = master.strip_prefix("local") else {
        return false;
    };
    if rest.is_empty() {
        return true;
    }

    rest.strip_prefix('[')
        .and_then(|inner| inner.strip_suffix(']'))
        .map_or(false, |threads| threads.bytes().all(|b| b.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_masters() {
        for master in ["local", "local[4]", "local[]", "local[12]", "local[0]"] {
            assert!(is_local_master(master), "{} should be local", master);
        }
    }

    #[test]
    fn test_cluster_masters() {
        for master in [
            "spark://host:7077",
            "yarn",
            "",
            "local[*]",
            "local[4",
            "local4",
            "local[4]x",
            "local[-1]",
            "LOCAL",
            " local",
            "mesos://zk:2181",
        ] {
            assert!(!is_local_master(master), "{:?} should not be local", master);
        }
    }

    #[test]
    fn test_detect() {
        assert_eq!(ExecutionMode::detect("local[2]"), ExecutionMode::Local);
        assert_eq!(ExecutionMode::detect("k8s://https://api:6443"), ExecutionMode::Cluster);
        assert!(ExecutionMode::Local.is_local());
        assert_eq!(ExecutionMode::Cluster.to_string(), "cluster");
    }
}
