//! Sequential query-then-report flow.
//!
//! All edges are queried before anything is printed, so a fatal error on a
//! later edge leaves stdout untouched.

use crate::{
    core::ExitStatus,
    error::{GitError, UnmergedResult},
    git::EquivalenceQuery,
    models::{EdgeReport, Sequence},
    report::Reporter,
    sequences::edge_count,
};
use std::io::Write;

/// Outcome of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Sum of per-edge counts.
    pub total: usize,
    /// Number of edges queried.
    pub edges_checked: usize,
    /// Number of edges with at least one listed commit.
    pub edges_outstanding: usize,
}

impl RunSummary {
    pub fn exit_status(&self) -> ExitStatus {
        ExitStatus::Outstanding(self.total)
    }
}

/// Query every edge in order, stopping at the first failure.
pub fn collect_reports<Q>(sequences: &[Sequence], query: &Q) -> Result<Vec<EdgeReport>, GitError>
where
    Q: EquivalenceQuery + ?Sized,
{
    let mut reports = Vec::with_capacity(edge_count(sequences));

    for sequence in sequences {
        let _span = tracing::debug_span!("sequence", name = %sequence.name).entered();

        for edge in &sequence.edges {
            let commits = query.unmerged_commits(edge).inspect_err(|e| {
                tracing::error!(%edge, error = %e, "query failed, aborting run");
            })?;

            let report = EdgeReport {
                edge: edge.clone(),
                commits,
            };
            tracing::debug!(
                %edge,
                count = report.count(),
                missing = report.missing_count(),
                equivalent = report.equivalent_count(),
                "edge checked"
            );
            reports.push(report);
        }
    }

    Ok(reports)
}

/// Query all edges, then write the report.
pub fn run<Q, W>(
    sequences: &[Sequence],
    query: &Q,
    reporter: &mut Reporter<W>,
) -> UnmergedResult<RunSummary>
where
    Q: EquivalenceQuery + ?Sized,
    W: Write,
{
    let reports = collect_reports(sequences, query)?;
    let total = reporter.write_all(&reports)?;

    let summary = RunSummary {
        total,
        edges_checked: reports.len(),
        edges_outstanding: reports.iter().filter(|r| !r.is_empty()).count(),
    };
    tracing::info!(
        total = summary.total,
        edges_checked = summary.edges_checked,
        edges_outstanding = summary.edges_outstanding,
        "run complete"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CherryCommit, MergeEdge};
    use std::cell::RefCell;

    /// Records the order edges are queried in and fails on a chosen edge.
    struct RecordingQuery {
        seen: RefCell<Vec<MergeEdge>>,
        fail_on: Option<MergeEdge>,
    }

    impl EquivalenceQuery for RecordingQuery {
        fn unmerged_commits(&self, edge: &MergeEdge) -> Result<Vec<CherryCommit>, GitError> {
            self.seen.borrow_mut().push(edge.clone());
            if self.fail_on.as_ref() == Some(edge) {
                return Err(GitError::BranchResolution {
                    branch: edge.upstream.to_string(),
                    downstream: edge.downstream.to_string(),
                    upstream: edge.upstream.to_string(),
                    message: format!("fatal: unknown commit {}", edge.upstream),
                });
            }
            Ok(vec![CherryCommit::parse("+ 0000000 pending")])
        }
    }

    fn sequences() -> Vec<Sequence> {
        vec![
            Sequence::new(
                "train",
                vec![MergeEdge::new("z-old", "m-mid"), MergeEdge::new("m-mid", "a-new")],
            ),
            Sequence::new("point", vec![MergeEdge::new("p", "m-mid")]),
        ]
    }

    /// # Configured Order Is Preserved
    ///
    /// Tests that edges are queried exactly in declaration order.
    ///
    /// ## Test Scenario
    /// - Runs collect_reports over two sequences whose names are not sorted
    ///
    /// ## Expected Outcome
    /// - Queries follow the configured order, not lexicographic order
    #[test]
    fn test_configured_order_is_preserved() {
        let query = RecordingQuery {
            seen: RefCell::new(Vec::new()),
            fail_on: None,
        };

        let reports = collect_reports(&sequences(), &query).unwrap();

        let expected = vec![
            MergeEdge::new("z-old", "m-mid"),
            MergeEdge::new("m-mid", "a-new"),
            MergeEdge::new("p", "m-mid"),
        ];
        assert_eq!(*query.seen.borrow(), expected);
        assert_eq!(
            reports.iter().map(|r| r.edge.clone()).collect::<Vec<_>>(),
            expected
        );
    }

    /// # Fail Fast
    ///
    /// Tests that the first failing edge stops the run.
    ///
    /// ## Test Scenario
    /// - Makes the second edge fail and runs with a buffer reporter
    ///
    /// ## Expected Outcome
    /// - The third edge is never queried
    /// - Nothing is written for the first, successful edge
    #[test]
    fn test_fail_fast_without_partial_output() {
        let query = RecordingQuery {
            seen: RefCell::new(Vec::new()),
            fail_on: Some(MergeEdge::new("m-mid", "a-new")),
        };
        let mut reporter = Reporter::new(Vec::new(), false);

        let err = run(&sequences(), &query, &mut reporter).unwrap_err();

        assert!(err.to_string().contains("a-new"));
        assert_eq!(query.seen.borrow().len(), 2);
        assert!(reporter.into_inner().is_empty());
    }

    #[test]
    fn test_run_summary_counts() {
        let query = RecordingQuery {
            seen: RefCell::new(Vec::new()),
            fail_on: None,
        };
        let mut reporter = Reporter::new(Vec::new(), false);

        let summary = run(&sequences(), &query, &mut reporter).unwrap();

        assert_eq!(
            summary,
            RunSummary {
                total: 3,
                edges_checked: 3,
                edges_outstanding: 3,
            }
        );
        assert_eq!(summary.exit_status().code(), 3);
    }
}
