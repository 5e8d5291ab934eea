//! Core run logic and exit status mapping.
//!
//! - `engine.rs` - queries every configured edge, then hands the results to
//!   the reporter

pub mod engine;

pub use engine::{RunSummary, collect_reports, run};

/// Process exit status of a run.
///
/// CI treats any nonzero status as "merge-forward needed". The count is
/// reported modulo 256, so 256 outstanding commits exit with 0; the summary
/// line on stdout always carries the exact total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// The run finished; carries the total number of listed commits.
    Outstanding(usize),
    /// Configuration or git failure.
    Fatal,
}

impl ExitStatus {
    /// Status reported when the run aborts.
    pub const FATAL_CODE: u8 = 1;

    /// Returns the numeric exit code value.
    pub fn code(self) -> u8 {
        match self {
            ExitStatus::Outstanding(total) => (total % 256) as u8,
            ExitStatus::Fatal => Self::FATAL_CODE,
        }
    }

    /// Returns true when nothing is outstanding and the run succeeded.
    pub fn is_clean(self) -> bool {
        matches!(self, ExitStatus::Outstanding(0))
    }
}

impl From<ExitStatus> for std::process::ExitCode {
    fn from(status: ExitStatus) -> Self {
        std::process::ExitCode::from(status.code())
    }
}
