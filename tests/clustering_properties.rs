//! Property-based tests for the coupling and clustering core
//!
//! These tests verify invariants that should hold for all inputs:
//! - Clustering merges N leaves in exactly N-1 steps into one root
//! - Partitions cover every leaf exactly once
//! - Coupling ratios do not depend on the direction relations were recorded in
//! - Graph projections emit one node per key and one link per distinct edge

use couplingmap::clustering::{ClusteringEngine, DendrogramProjector, PairSelection};
use couplingmap::graph::{build_graph, graph_document};
use couplingmap::CouplingMatrix;
use proptest::prelude::*;
use std::collections::{BTreeSet, HashSet};

/// Square matrix of small relation counts
fn square_matrix(max_size: usize) -> impl Strategy<Value = Vec<Vec<u64>>> {
    (1..=max_size).prop_flat_map(|n| prop::collection::vec(prop::collection::vec(0u64..6, n), n))
}

fn selection() -> impl Strategy<Value = PairSelection> {
    prop_oneof![Just(PairSelection::Consistent), Just(PairSelection::Legacy)]
}

proptest! {
    /// Property: every run reduces N leaves to one root in N - 1 merges
    #[test]
    fn prop_clustering_terminates_with_all_leaves(cells in square_matrix(9), selection in selection()) {
        let n = cells.len();
        let labels: Vec<usize> = (0..n).collect();
        let mut engine = ClusteringEngine::new(labels, cells).with_selection(selection);

        let mut merges = 0;
        while engine.step() {
            merges += 1;
        }
        prop_assert_eq!(merges, n - 1);
        prop_assert_eq!(engine.active().len(), 1);

        let root = &engine.active()[0];
        prop_assert_eq!(root.leaf_count(), n);

        let labels: BTreeSet<usize> = root.labels().into_iter().copied().collect();
        prop_assert_eq!(labels, (0..n).collect::<BTreeSet<_>>());
    }

    /// Property: the selected partitions are disjoint and cover every leaf
    #[test]
    fn prop_partitions_cover_every_leaf(cells in square_matrix(9)) {
        let n = cells.len();
        let root = ClusteringEngine::new((0..n).collect::<Vec<_>>(), cells).run().unwrap();

        let partitions = DendrogramProjector::select_partitions(&root);
        let mut seen = Vec::new();
        for partition in &partitions {
            seen.extend(partition.labels().into_iter().copied());
        }
        seen.sort_unstable();
        prop_assert_eq!(seen, (0..n).collect::<Vec<_>>());

        let emitted = DendrogramProjector::partition_links(&partitions).len();
        let internal: usize = partitions.iter().map(|p| p.leaf_count() - 1).sum();
        prop_assert_eq!(emitted, 2 * internal);
    }

    /// Property: dendrogram projection has 2N - 1 nodes and 2N - 2 links
    #[test]
    fn prop_dendrogram_shape(cells in square_matrix(9)) {
        let n = cells.len();
        let root = ClusteringEngine::new((0..n).collect::<Vec<_>>(), cells).run().unwrap();

        let nodes = DendrogramProjector::nodes(&root);
        prop_assert_eq!(nodes.len(), 2 * n - 1);
        prop_assert_eq!(DendrogramProjector::links(&root).len(), 2 * n - 2);

        let ids: HashSet<usize> = nodes.iter().map(|node| node.id).collect();
        prop_assert_eq!(ids.len(), nodes.len());
    }

    /// Property: swapping the direction of recorded relations leaves the table unchanged
    #[test]
    fn prop_table_is_direction_independent(
        relations in prop::collection::vec((0usize..4, 0usize..4, any::<bool>()), 0..30)
    ) {
        let names = ["A", "B", "C", "D"];
        let mut forward = CouplingMatrix::new(names);
        let mut mixed = CouplingMatrix::new(names);

        for (from, to, flip) in relations {
            forward.increment(names[from], names[to]);
            if flip {
                mixed.increment(names[to], names[from]);
            } else {
                mixed.increment(names[from], names[to]);
            }
        }

        prop_assert_eq!(forward.total(), mixed.total());
        prop_assert_eq!(forward.generate_table(), mixed.generate_table());
    }

    /// Property: K distinct keys give K nodes and sum(outdegree) links
    #[test]
    fn prop_graph_projection_counts(
        pairs in prop::collection::vec(("[a-e]", "[a-h]"), 0..40)
    ) {
        let graph = build_graph(
            &pairs,
            |(_, callee)| std::iter::once(callee.clone()),
            |(caller, _)| caller.clone(),
            |callee: &String| callee.clone(),
        );
        let document = graph_document(&graph);

        let keys: HashSet<&String> = pairs.iter().flat_map(|(a, b)| [a, b]).collect();
        let edges: HashSet<(&String, &String)> = pairs.iter().map(|(a, b)| (a, b)).collect();

        prop_assert_eq!(document.nodes.len(), keys.len());
        prop_assert_eq!(document.links.len(), edges.len());
        prop_assert_eq!(document.links.len(), graph.edge_count());
    }
}
