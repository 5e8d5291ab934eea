//! Commit-equivalence queries against a local checkout.
//!
//! The query behind every edge is `git cherry -v <upstream> <downstream>`,
//! which lists commits on `downstream` and marks each one `+` (no equivalent
//! patch upstream) or `-` (same patch-id already upstream).

use crate::{
    error::GitError,
    models::{BranchRef, CherryCommit, MergeEdge},
};
use std::{
    path::{Path, PathBuf},
    process::{Command, Output},
};

/// Lists the commits on an edge's downstream branch that are not on its upstream.
pub trait EquivalenceQuery {
    fn unmerged_commits(&self, edge: &MergeEdge) -> Result<Vec<CherryCommit>, GitError>;
}

/// [`EquivalenceQuery`] backed by the `git` binary.
///
/// Each edge costs exactly one `git cherry` process. A branch that does not
/// resolve is recognised from git's own `unknown commit` diagnostic.
#[derive(Debug, Clone)]
pub struct GitCherry {
    repo_path: PathBuf,
}

impl GitCherry {
    pub fn new(repo_path: impl Into<PathBuf>) -> Self {
        Self {
            repo_path: repo_path.into(),
        }
    }

    pub fn repo_path(&self) -> &Path {
        &self.repo_path
    }

    fn run_git(&self, args: &[&str], edge: &MergeEdge) -> Result<Output, GitError> {
        Command::new("git")
            .current_dir(&self.repo_path)
            // diagnostics are matched below
            .env("LC_ALL", "C")
            .args(args)
            .output()
            .map_err(|e| GitError::SpawnFailed {
                command: format!("git {}", args.join(" ")),
                downstream: edge.downstream.to_string(),
                upstream: edge.upstream.to_string(),
                message: e.to_string(),
            })
    }
}

impl EquivalenceQuery for GitCherry {
    fn unmerged_commits(&self, edge: &MergeEdge) -> Result<Vec<CherryCommit>, GitError> {
        let args = [
            "cherry",
            "-v",
            edge.upstream.as_str(),
            edge.downstream.as_str(),
        ];
        tracing::debug!(repo = %self.repo_path.display(), %edge, "running git cherry");
        let output = self.run_git(&args, edge)?;

        if !output.status.success() {
            let message = String::from_utf8_lossy(&output.stderr).trim().to_string();
            if let Some(branch) = unresolved_branch(&message, edge) {
                return Err(GitError::BranchResolution {
                    branch: branch.to_string(),
                    downstream: edge.downstream.to_string(),
                    upstream: edge.upstream.to_string(),
                    message,
                });
            }
            return Err(GitError::QueryExecution {
                command: format!("git {}", args.join(" ")),
                downstream: edge.downstream.to_string(),
                upstream: edge.upstream.to_string(),
                message,
            });
        }

        Ok(parse_cherry_output(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Which side of `edge` git reported as `unknown commit`, if either.
fn unresolved_branch<'a>(stderr: &str, edge: &'a MergeEdge) -> Option<&'a BranchRef> {
    [&edge.downstream, &edge.upstream].into_iter().find(|branch| {
        let needle = format!("unknown commit {}", branch);
        stderr.lines().any(|line| line.trim_end().ends_with(&needle))
    })
}

/// Split `git cherry -v` output into commits, one per non-empty line.
pub fn parse_cherry_output(stdout: &str) -> Vec<CherryCommit> {
    stdout
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(CherryCommit::parse)
        .collect()
}
