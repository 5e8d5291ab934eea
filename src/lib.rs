//! # unmerged-commits
//!
//! Reports commits that exist on a downstream release branch but have not
//! been merged forward into its upstream branch, for every edge of a
//! configured chain of release branches.
//!
//! Each edge is checked with `git cherry -v <upstream> <downstream>`, which
//! matches commits by patch content, so cherry-picked or rebased commits are
//! recognised. The number of listed commits becomes the process exit status.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use unmerged_commits::{GitCherry, Reporter, sequences::builtin_sequences};
//!
//! let query = GitCherry::new(".");
//! let mut reporter = Reporter::new(std::io::stdout(), false);
//! let summary = unmerged_commits::core::run(&builtin_sequences(), &query, &mut reporter)?;
//! std::process::exit(summary.exit_status().code().into());
//! # Ok::<(), unmerged_commits::error::UnmergedError>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod git;
pub mod logging;
pub mod models;
pub mod parsed_property;
pub mod report;
pub mod sequences;

pub use config::Config;
pub use crate::core::ExitStatus;
pub use git::{EquivalenceQuery, GitCherry};
pub use models::{
    Args, BranchRef, CherryCommit, CherryMarker, EdgeReport, MergeEdge, OutputTarget, Sequence,
};
pub use report::Reporter;

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
