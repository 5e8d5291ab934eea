//! Error types for unmerged-commits.
//!
//! ## Error Categories
//!
//! - [`GitError`]: a configured branch does not resolve, or `git cherry` failed
//! - [`ConfigError`]: the configuration file could not be read or parsed
//!
//! Every error is fatal: the run stops at the first one and nothing from
//! already-queried edges is printed.
//!
//! ## Example
//!
//! ```rust
//! use unmerged_commits::error::{GitError, UnmergedError};
//!
//! fn example() -> Result<(), UnmergedError> {
//!     Err(GitError::BranchResolution {
//!         branch: "couchbase/6.5.0".to_string(),
//!         downstream: "couchbase/6.5.0".to_string(),
//!         upstream: "couchbase/mad-hatter".to_string(),
//!         message: "fatal: unknown commit couchbase/6.5.0".to_string(),
//!     })?;
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the unmerged-commits library.
#[derive(Error, Debug)]
pub enum UnmergedError {
    /// A git query failed.
    #[error("Git error: {0}")]
    Git(#[from] GitError),

    /// The configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Writing the report failed.
    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while querying git for one merge edge.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GitError {
    /// A configured branch does not exist in the local checkout.
    #[error(
        "Branch '{branch}' does not resolve (checking '{downstream}' against '{upstream}'): {message}"
    )]
    BranchResolution {
        /// The reference that failed to resolve.
        branch: String,
        /// Downstream side of the edge being checked.
        downstream: String,
        /// Upstream side of the edge being checked.
        upstream: String,
        /// Diagnostic text from git.
        message: String,
    },

    /// `git cherry` exited non-zero for a reason other than a missing branch.
    #[error("Query '{command}' for '{downstream}' -> '{upstream}' failed: {message}")]
    QueryExecution {
        /// The git command line that was run.
        command: String,
        /// Downstream side of the edge being checked.
        downstream: String,
        /// Upstream side of the edge being checked.
        upstream: String,
        /// Diagnostic text from git.
        message: String,
    },

    /// git could not be started at all.
    #[error("Failed to run '{command}' for '{downstream}' -> '{upstream}': {message}")]
    SpawnFailed {
        /// The git command line that was attempted.
        command: String,
        /// Downstream side of the edge being checked.
        downstream: String,
        /// Upstream side of the edge being checked.
        upstream: String,
        /// The OS error.
        message: String,
    },
}

impl GitError {
    /// The `(downstream, upstream)` pair this error belongs to.
    pub fn edge(&self) -> Option<(&str, &str)> {
        match self {
            GitError::BranchResolution {
                downstream,
                upstream,
                ..
            }
            | GitError::QueryExecution {
                downstream,
                upstream,
                ..
            }
            | GitError::SpawnFailed {
                downstream,
                upstream,
                ..
            } => Some((downstream, upstream)),
        }
    }
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist.
    #[error("Config file not found: {path}")]
    NotFound {
        /// Path that was requested.
        path: PathBuf,
    },

    /// Failed to read the configuration file.
    #[error("Failed to read config file at {path}: {message}")]
    FileReadError {
        /// Path to the config file.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Failed to parse the configuration file.
    #[error("Failed to parse config file at {path}: {message}")]
    ParseError {
        /// Path to the config file.
        path: PathBuf,
        /// Parse error message.
        message: String,
    },

    /// The branch table could not be rendered as TOML.
    #[error("Failed to serialize configuration: {message}")]
    SerializeError {
        /// Serializer error message.
        message: String,
    },
}

/// Type alias for Results using UnmergedError.
pub type UnmergedResult<T> = std::result::Result<T, UnmergedError>;
