//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;
use unmerged_commits::{CherryCommit, EquivalenceQuery, MergeEdge, error::GitError};

/// A throwaway git repository with a `main` branch holding one commit.
pub struct TempGitRepo {
    dir: TempDir,
}

impl TempGitRepo {
    pub fn new() -> Self {
        let repo = Self {
            dir: TempDir::new().unwrap(),
        };
        repo.git(&["init", "--quiet"]);
        repo.git(&["config", "user.name", "Test User"]);
        repo.git(&["config", "user.email", "test@example.com"]);
        repo.git(&["config", "commit.gpgsign", "false"]);
        repo.commit("base.txt", "Initial commit");
        repo.git(&["branch", "-M", "main"]);
        repo
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn git(&self, args: &[&str]) -> String {
        let output = Command::new("git")
            .current_dir(self.path())
            .args(args)
            .output()
            .unwrap();
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    /// Commits a file whose content is derived from the message.
    pub fn commit(&self, file: &str, message: &str) {
        fs::write(self.path().join(file), format!("content for: {}", message)).unwrap();
        self.git(&["add", "."]);
        self.git(&["commit", "--quiet", "-m", message]);
    }

    pub fn checkout_new(&self, branch: &str, from: &str) {
        self.git(&["checkout", "--quiet", "-b", branch, from]);
    }

    pub fn checkout(&self, branch: &str) {
        self.git(&["checkout", "--quiet", branch]);
    }

    pub fn rev_parse(&self, rev: &str) -> String {
        self.git(&["rev-parse", rev])
    }

    /// Writes a config file declaring the given sequences and returns its path.
    pub fn write_config(&self, sequences: &[(&str, &[(&str, &str)])]) -> PathBuf {
        let mut toml = String::new();
        for (name, edges) in sequences {
            toml.push_str(&format!("[[sequences]]\nname = \"{}\"\nedges = [\n", name));
            for (downstream, upstream) in edges.iter() {
                toml.push_str(&format!(
                    "    {{ downstream = \"{}\", upstream = \"{}\" }},\n",
                    downstream, upstream
                ));
            }
            toml.push_str("]\n\n");
        }

        let path = self.path().join("unmerged-commits.toml");
        fs::write(&path, toml).unwrap();
        path
    }
}

/// Builds the layout most tests use:
///
/// - `release-1`: three commits on top of `main`
/// - `release-2`: `main` plus one own commit and a cherry-pick of the first
///   `release-1` commit
/// - `release-2-merged`: same as `main`
pub fn release_repo() -> TempGitRepo {
    let repo = TempGitRepo::new();

    repo.checkout_new("release-1", "main");
    repo.commit("flusher.txt", "MB-100 Fix flusher stall");
    repo.commit("backfill.txt", "MB-101 Add backfill stats");
    repo.commit("checkpoint.txt", "MB-102 Trim checkpoint memory");

    repo.checkout_new("release-2", "main");
    // new parent, so the pick gets its own commit id
    repo.commit("version.txt", "MB-200 Bump version");
    let first = repo.rev_parse("release-1~2");
    repo.git(&["cherry-pick", &first]);

    repo.git(&["branch", "release-2-merged", "main"]);
    repo.checkout("main");
    repo
}

/// In-memory query returning canned results per edge.
#[derive(Default)]
pub struct FakeQuery {
    results: HashMap<MergeEdge, Result<Vec<CherryCommit>, GitError>>,
}

impl FakeQuery {
    pub fn with_lines(mut self, downstream: &str, upstream: &str, lines: &[&str]) -> Self {
        self.results.insert(
            MergeEdge::new(downstream, upstream),
            Ok(lines.iter().map(|l| CherryCommit::parse(l)).collect()),
        );
        self
    }

    pub fn with_missing_branch(mut self, downstream: &str, upstream: &str, branch: &str) -> Self {
        self.results.insert(
            MergeEdge::new(downstream, upstream),
            Err(GitError::BranchResolution {
                branch: branch.to_string(),
                downstream: downstream.to_string(),
                upstream: upstream.to_string(),
                message: format!("fatal: unknown commit {}", branch),
            }),
        );
        self
    }
}

impl EquivalenceQuery for FakeQuery {
    fn unmerged_commits(&self, edge: &MergeEdge) -> Result<Vec<CherryCommit>, GitError> {
        self.results
            .get(edge)
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}
