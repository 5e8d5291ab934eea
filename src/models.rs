use clap::Parser;
use serde::{Deserialize, Serialize};
use std::{fmt, io::IsTerminal, path::PathBuf};

/// A branch reference as git understands it, e.g. `couchbase/mad-hatter`.
///
/// No validation happens here; git decides whether the name resolves.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BranchRef(String);

impl BranchRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BranchRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BranchRef {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// "Commits on `downstream` are expected to eventually land on `upstream`."
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MergeEdge {
    pub downstream: BranchRef,
    pub upstream: BranchRef,
}

impl MergeEdge {
    pub fn new(downstream: impl Into<BranchRef>, upstream: impl Into<BranchRef>) -> Self {
        Self {
            downstream: downstream.into(),
            upstream: upstream.into(),
        }
    }
}

impl fmt::Display for MergeEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.downstream, self.upstream)
    }
}

/// One release train: a named, ordered chain of merge-forward edges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequence {
    pub name: String,
    #[serde(default)]
    pub edges: Vec<MergeEdge>,
}

impl Sequence {
    pub fn new(name: impl Into<String>, edges: Vec<MergeEdge>) -> Self {
        Self {
            name: name.into(),
            edges,
        }
    }
}

/// Marker in front of each `git cherry -v` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CherryMarker {
    /// `+`: no equivalent patch exists upstream.
    Missing,
    /// `-`: an equivalent patch is upstream under a different commit id.
    Equivalent,
}

/// A single line of the commit-equivalence diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CherryCommit {
    pub marker: CherryMarker,
    pub id: String,
    pub summary: String,
    /// The line exactly as git printed it.
    pub raw: String,
}

impl CherryCommit {
    /// Parse one `git cherry -v` line.
    ///
    /// Anything not prefixed with `-` is treated as missing, so every line
    /// git prints is kept and counted.
    pub fn parse(line: &str) -> Self {
        let marker = if line.starts_with('-') {
            CherryMarker::Equivalent
        } else {
            CherryMarker::Missing
        };
        let rest = line.get(1..).unwrap_or_default().trim_start();
        let (id, summary) = rest.split_once(' ').unwrap_or((rest, ""));

        Self {
            marker,
            id: id.to_string(),
            summary: summary.to_string(),
            raw: line.to_string(),
        }
    }
}

/// Unmerged commits found for one edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeReport {
    pub edge: MergeEdge,
    pub commits: Vec<CherryCommit>,
}

impl EdgeReport {
    /// Number of listed lines. Equivalent (`-`) lines count too.
    pub fn count(&self) -> usize {
        self.commits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    pub fn missing_count(&self) -> usize {
        self.commits
            .iter()
            .filter(|c| c.marker == CherryMarker::Missing)
            .count()
    }

    pub fn equivalent_count(&self) -> usize {
        self.count() - self.missing_count()
    }
}

/// When to emit ANSI colors on stdout.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    /// Color only when stdout is a terminal
    #[default]
    Auto,
    /// Always color
    Always,
    /// Never color
    Never,
}

impl ColorChoice {
    /// Parse a color choice from a string, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        <Self as clap::ValueEnum>::from_str(s.trim(), true).ok()
    }

    /// Decide whether to color for the given output stream.
    ///
    /// `NO_COLOR` only vetoes `Auto`; an explicit `Always` still colors.
    pub fn enabled(self, target: OutputTarget) -> bool {
        match self {
            ColorChoice::Auto => target.is_terminal && !target.no_color,
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }
}

/// Facts about stdout gathered once at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputTarget {
    pub is_terminal: bool,
    /// `NO_COLOR` is set to a non-empty value.
    pub no_color: bool,
}

impl OutputTarget {
    pub fn detect(stdout: &impl IsTerminal) -> Self {
        Self {
            is_terminal: stdout.is_terminal(),
            no_color: std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()),
        }
    }
}

#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "unmerged-commits",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_REVISION"), ")"),
    about = "Show which commits are not yet merged forward between release branches",
    long_about = "Show which commits are not yet merged forward between release branches.\n\n\
        For every configured (downstream, upstream) pair, runs `git cherry -v upstream downstream`\n\
        in the current checkout and prints the commits whose patches are not upstream yet.\n\
        The exit status is the total number of outstanding commits (modulo 256).\n\n\
        Branches are read from the built-in table unless the file passed with\n\
        --config defines [[sequences]].",
    after_help = "EXAMPLES:\n    \
        # Check the built-in release trains in the current checkout\n    \
        unmerged-commits\n\n    \
        # Use another checkout and a custom branch table\n    \
        unmerged-commits --repo ~/src/kv_engine --config trains.toml\n\n    \
        # Show the branch table that would be checked\n    \
        unmerged-commits --print-config"
)]
pub struct Args {
    /// Repository checkout to query [default: current directory]
    #[arg(long, value_name = "PATH", help_heading = "Repository")]
    pub repo: Option<PathBuf>,

    /// Config file with repo, color and [[sequences]] settings
    #[arg(long, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<PathBuf>,

    /// Print the resolved branch table and exit
    #[arg(long, help_heading = "Configuration")]
    pub print_config: bool,

    /// When to color the report [default: auto]
    #[arg(long, value_enum, help_heading = "Output Options")]
    pub color: Option<ColorChoice>,

    /// Enable logging at this level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL", help_heading = "Logging")]
    pub log_level: Option<String>,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "FILE", help_heading = "Logging")]
    pub log_file: Option<PathBuf>,

    /// Log format (text or json)
    #[arg(long, value_name = "FORMAT", help_heading = "Logging")]
    pub log_format: Option<String>,
}
