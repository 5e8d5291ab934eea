//! Wiring from parsed arguments to a finished run.

use crate::{
    Config,
    core::{ExitStatus, run},
    error::UnmergedResult,
    git::GitCherry,
    models::{Args, OutputTarget},
    report::Reporter,
};
use std::io::Write;

/// Resolve configuration, query every edge and write the report to `out`.
///
/// `target` is detected once by the caller; together with the configured
/// color choice it decides whether the report is colored.
pub fn execute<W: Write>(
    args: &Args,
    mut out: W,
    target: OutputTarget,
) -> UnmergedResult<ExitStatus> {
    let config = Config::resolve(args)?;

    if args.print_config {
        write!(out, "{}", config.sequences_to_toml()?)?;
        out.flush()?;
        return Ok(ExitStatus::Outstanding(0));
    }

    let color = config.color_choice().enabled(target);
    tracing::debug!(
        color,
        is_terminal = target.is_terminal,
        no_color = target.no_color,
        "color decided"
    );

    let query = GitCherry::new(config.repo_path());
    let mut reporter = Reporter::new(out, color);
    let summary = run(config.sequences(), &query, &mut reporter)?;

    Ok(summary.exit_status())
}
