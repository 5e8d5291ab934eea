//! Text rendering of unmerged-commit reports.

use crate::models::EdgeReport;
use crossterm::style::Stylize;
use std::io::{self, Write};

/// Header line for one edge's listing.
pub fn header_line(report: &EdgeReport) -> String {
    format!(
        "{} commits in '{}' not present in '{}':",
        report.count(),
        report.edge.downstream,
        report.edge.upstream
    )
}

/// Final line printed when anything is outstanding.
pub fn summary_line(total: usize) -> String {
    format!("Total of {} commits outstanding", total)
}

/// Writes edge reports and the summary, optionally colored.
///
/// Whether to color is decided by the caller once; the reporter never looks
/// at the terminal itself.
pub struct Reporter<W: Write> {
    writer: W,
    color: bool,
}

impl<W: Write> Reporter<W> {
    pub fn new(writer: W, color: bool) -> Self {
        if color {
            // NO_COLOR is already folded into `color`; stop crossterm re-reading it
            crossterm::style::force_color_output(true);
        }
        Self { writer, color }
    }

    pub fn is_colored(&self) -> bool {
        self.color
    }

    /// Writes one edge section. Empty edges produce no output.
    pub fn write_edge(&mut self, report: &EdgeReport) -> io::Result<()> {
        if report.is_empty() {
            return Ok(());
        }

        let header = header_line(report);
        if self.color {
            writeln!(self.writer, "{}", header.cyan())?;
        } else {
            writeln!(self.writer, "{}", header)?;
        }

        for commit in &report.commits {
            writeln!(self.writer, "{}", commit.raw)?;
        }
        writeln!(self.writer)
    }

    /// Writes the summary line. A zero total produces no output.
    pub fn write_summary(&mut self, total: usize) -> io::Result<()> {
        if total == 0 {
            return Ok(());
        }

        let summary = summary_line(total);
        if self.color {
            writeln!(self.writer, "{}", summary.yellow())
        } else {
            writeln!(self.writer, "{}", summary)
        }
    }

    /// Writes every edge then the summary; returns the total count.
    pub fn write_all(&mut self, reports: &[EdgeReport]) -> io::Result<usize> {
        let mut total = 0;
        for report in reports {
            total += report.count();
            self.write_edge(report)?;
        }
        self.write_summary(total)?;
        self.writer.flush()?;
        Ok(total)
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
