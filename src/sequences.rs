//! Built-in table of release-branch sequences.
//!
//! Each sequence lists branches that must be merged forward into each other,
//! oldest supported branch first, which is the order patches are merged.
//!
//! Release trains (e.g. vulcan is 5.5.0, 5.5.1, 5.5.2) share one sequence and
//! are kept merged into the next train as maintenance releases come along.
//! Branches cut for a single release (e.g. 6.5.0) have a limited lifespan and
//! get their own sequence; once shipped, later fixes go through the train
//! branch instead.
//!
//! Add or retire branches by editing [`BUILTIN_SEQUENCES`].

use crate::models::{MergeEdge, Sequence};

/// `(sequence name, [(downstream, upstream), ...])`
pub const BUILTIN_SEQUENCES: &[(&str, &[(&str, &str)])] = &[
    (
        "release-train",
        &[
            ("couchbase/watson_ep", "couchbase/spock"),
            ("couchbase/watson_mc", "couchbase/spock"),
            ("couchbase/spock", "couchbase/vulcan"),
            ("couchbase/vulcan", "couchbase/alice"),
            ("couchbase/alice", "couchbase/mad-hatter"),
            ("couchbase/mad-hatter", "couchbase/master"),
        ],
    ),
    ("6.5.0", &[("couchbase/6.5.0", "couchbase/mad-hatter")]),
];

/// The built-in table as owned [`Sequence`] values, in declaration order.
pub fn builtin_sequences() -> Vec<Sequence> {
    BUILTIN_SEQUENCES
        .iter()
        .map(|(name, edges)| {
            Sequence::new(
                *name,
                edges
                    .iter()
                    .map(|(downstream, upstream)| MergeEdge::new(*downstream, *upstream))
                    .collect(),
            )
        })
        .collect()
}

/// Total number of edges across all sequences.
pub fn edge_count(sequences: &[Sequence]) -> usize {
    sequences.iter().map(|s| s.edges.len()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_sequences_keep_declaration_order() {
        let sequences = builtin_sequences();

        assert_eq!(sequences.len(), 2);
        assert_eq!(sequences[0].name, "release-train");
        assert_eq!(sequences[1].name, "6.5.0");
        assert_eq!(
            sequences[0].edges.first(),
            Some(&MergeEdge::new("couchbase/watson_ep", "couchbase/spock"))
        );
        assert_eq!(
            sequences[0].edges.last(),
            Some(&MergeEdge::new("couchbase/mad-hatter", "couchbase/master"))
        );
        assert_eq!(edge_count(&sequences), 7);
    }

    #[test]
    fn test_builtin_edges_are_not_self_loops() {
        for sequence in builtin_sequences() {
            for edge in &sequence.edges {
                assert_ne!(edge.downstream, edge.upstream, "{}", edge);
            }
        }
    }
}
