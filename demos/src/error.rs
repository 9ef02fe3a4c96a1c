// Copyright 2025 the Kdviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::path::PathBuf;

use thiserror::Error;

pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result alias for command runners.
pub type Result<T> = std::result::Result<T, KdvizError>;

/// A failed command.
#[derive(Debug, Error)]
pub enum KdvizError {
    /// Reading or writing a local file.
    #[error("{path}: {source}")]
    Io {
        /// The file.
        path: PathBuf,
        /// Cause.
        source: std::io::Error,
    },

    /// Standard input or output.
    #[error("I/O error: {0}")]
    Stdio(#[from] std::io::Error),

    /// The partition tree could not be fetched or decoded.
    #[error("Could not load tree visualization. {source}")]
    Tree {
        /// Cause.
        source: BoxError,
    },

    /// The embedding table could not be fetched or parsed.
    #[error("Could not load 3D plot. {source}")]
    Plot {
        /// Cause.
        source: BoxError,
    },

    /// HTTP client setup.
    #[error(transparent)]
    Network(#[from] kdviz_controller::NetworkError),

    /// Figure serialization.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Some searches did not produce a result.
    #[error("{failed} of {total} searches failed")]
    Searches {
        /// Searches rejected or failed.
        failed: usize,
        /// Searches attempted.
        total: usize,
    },
}

impl KdvizError {
    /// Process exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Searches { .. } => 2,
            _ => 1,
        }
    }

    pub(crate) fn tree(source: impl Into<BoxError>) -> Self {
        Self::Tree {
            source: source.into(),
        }
    }

    pub(crate) fn plot(source: impl Into<BoxError>) -> Self {
        Self::Plot {
            source: source.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::KdvizError;

    #[test]
    fn tree_errors_lead_with_the_user_message() {
        let cause = kdviz_partition::DataError::MissingAxis {
            path: "root.left".into(),
        };
        let e = KdvizError::tree(cause);
        assert_eq!(
            e.to_string(),
            "Could not load tree visualization. node root.left is missing `axis`"
        );
        assert_eq!(e.exit_code(), 1);
    }

    #[test]
    fn search_failures_use_exit_code_two() {
        let e = KdvizError::Searches {
            failed: 1,
            total: 3,
        };
        assert_eq!(e.exit_code(), 2);
        assert_eq!(e.to_string(), "1 of 3 searches failed");
    }
}
