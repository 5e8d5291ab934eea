use anyhow::Result;
use clap::Parser;
use std::io;
use std::process::ExitCode;

use unmerged_commits::{
    Args, ExitStatus, OutputTarget, cli,
    logging::{init_logging, parse_early_log_config},
};

fn run(args: &Args) -> Result<ExitStatus> {
    let stdout = io::stdout();
    // Decided once; the reporter never re-checks
    let target = OutputTarget::detect(&stdout);

    let status = cli::execute(args, stdout.lock(), target)?;
    Ok(status)
}

fn main() -> ExitCode {
    let raw_args: Vec<String> = std::env::args().collect();
    let _log_guard = init_logging(parse_early_log_config(&raw_args));

    let args = Args::parse();

    match run(&args) {
        Ok(status) => status.into(),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitStatus::Fatal.into()
        }
    }
}
