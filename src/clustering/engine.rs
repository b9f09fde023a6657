//! Agglomerative clustering over a shrinking working matrix.
//!
//! Every step merges the two most strongly coupled active clusters into a
//! new internal node, removes their rows/columns from the working matrix and
//! appends one row/column for the merged cluster holding the summed
//! couplings. `N` leaves always reduce to one root in `N - 1` steps, whether
//! or not the entities are connected.

use super::cluster::Cluster;
use crate::coupling::CouplingMatrix;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// How the closest pair is chosen from the working matrix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PairSelection {
    /// Compare and track the bidirectional sum `m[i][j] + m[j][i]`.
    #[default]
    Consistent,
    /// Compare the single cell `m[i][j]` against a running maximum that is
    /// updated with the bidirectional sum. Reproduces output of earlier
    /// releases; may miss the true maximum.
    Legacy,
}

/// A merge that happened during a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergeStep {
    pub left: usize,
    pub right: usize,
    pub merged: usize,
    pub similarity: f64,
}

/// Working state of one clustering run.
#[derive(Debug, Clone)]
pub struct ClusteringEngine<T> {
    clusters: Vec<Cluster<T>>,
    matrix: Vec<Vec<u64>>,
    next_id: usize,
    selection: PairSelection,
    history: Vec<MergeStep>,
}

impl ClusteringEngine<String> {
    /// Start from one leaf per matrix row. The matrix itself is left untouched.
    pub fn from_matrix(matrix: &CouplingMatrix) -> Self {
        Self::new(matrix.names().to_vec(), matrix.cells().to_vec())
    }
}

impl<T> ClusteringEngine<T> {
    /// `cells` must be a `labels.len()` square matrix; missing cells read as 0.
    pub fn new(labels: Vec<T>, cells: Vec<Vec<u64>>) -> Self {
        let n = labels.len();
        let matrix = (0..n)
            .map(|i| {
                (0..n)
                    .map(|j| cells.get(i).and_then(|row| row.get(j)).copied().unwrap_or(0))
                    .collect()
            })
            .collect();
        let clusters = labels
            .into_iter()
            .enumerate()
            .map(|(id, label)| Cluster::leaf(id, label))
            .collect();

        Self {
            clusters,
            matrix,
            next_id: n,
            selection: PairSelection::default(),
            history: Vec::new(),
        }
    }

    pub fn with_selection(mut self, selection: PairSelection) -> Self {
        self.selection = selection;
        self
    }

    pub fn active(&self) -> &[Cluster<T>] {
        &self.clusters
    }

    pub fn working_matrix(&self) -> &[Vec<u64>] {
        &self.matrix
    }

    pub fn history(&self) -> &[MergeStep] {
        &self.history
    }

    fn coupling(&self, i: usize, j: usize) -> u64 {
        self.matrix[i][j] + self.matrix[j][i]
    }

    /// Indices of the pair to merge next, scanning row-major; the first
    /// maximum found wins. `None` with fewer than two active clusters.
    pub fn closest_pair(&self) -> Option<(usize, usize)> {
        let n = self.matrix.len();
        let mut best: Option<((usize, usize), u64)> = None;

        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let candidate = match self.selection {
                    PairSelection::Consistent => self.coupling(i, j),
                    PairSelection::Legacy => self.matrix[i][j],
                };
                if best.map_or(true, |(_, max)| candidate > max) {
                    best = Some(((i, j), self.coupling(i, j)));
                }
            }
        }

        best.map(|(pair, _)| pair)
    }

    /// Perform one merge. Returns `false` once a single cluster remains.
    pub fn step(&mut self) -> bool {
        let Some((first, second)) = self.closest_pair() else {
            return false;
        };
        let similarity = self.coupling(first, second) as f64;

        self.clusters[first].stamp_similarity(similarity);
        self.clusters[second].stamp_similarity(similarity);

        let (lo, hi) = if first < second {
            (first, second)
        } else {
            (second, first)
        };
        let hi_cluster = self.clusters.remove(hi);
        let lo_cluster = self.clusters.remove(lo);
        let (left, right) = if first < second {
            (lo_cluster, hi_cluster)
        } else {
            (hi_cluster, lo_cluster)
        };

        let merged_id = self.next_id;
        self.next_id += 1;

        let step = MergeStep {
            left: left.id(),
            right: right.id(),
            merged: merged_id,
            similarity,
        };
        trace!(
            left = step.left,
            right = step.right,
            merged = step.merged,
            similarity,
            "Merged clusters"
        );
        self.history.push(step);

        self.clusters
            .push(Cluster::merge(merged_id, similarity, left, right));
        self.matrix = reduce(&self.matrix, first, second);
        true
    }

    /// Merge until one cluster remains and return it. `None` for an empty input.
    pub fn run(mut self) -> Option<Cluster<T>> {
        let leaves = self.clusters.len();
        while self.step() {}

        let root = self.clusters.pop();
        debug!(
            leaves,
            merges = self.history.len(),
            root_similarity = root.as_ref().and_then(Cluster::similarity),
            "Clustering finished"
        );
        root
    }
}

/// Drop rows/columns `first` and `second`, renumber the rest densely and
/// append one row/column holding their summed couplings.
fn reduce(matrix: &[Vec<u64>], first: usize, second: usize) -> Vec<Vec<u64>> {
    let survivors: Vec<usize> = (0..matrix.len())
        .filter(|&k| k != first && k != second)
        .collect();
    let fused = survivors.len();
    let mut reduced = vec![vec![0; fused + 1]; fused + 1];

    for (r, &i) in survivors.iter().enumerate() {
        for (c, &j) in survivors.iter().enumerate() {
            reduced[r][c] = matrix[i][j];
        }
        reduced[fused][r] = matrix[first][i] + matrix[second][i];
        reduced[r][fused] = matrix[i][first] + matrix[i][second];
    }

    reduced
}

/// Cluster the entities of `matrix`.
pub fn hierarchic_clustering(
    matrix: &CouplingMatrix,
    selection: PairSelection,
) -> Option<Cluster<String>> {
    ClusteringEngine::from_matrix(matrix)
        .with_selection(selection)
        .run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn abc_engine() -> ClusteringEngine<&'static str> {
        // A-B = 5, B-C = 1, A-C = 0
        ClusteringEngine::new(
            vec!["A", "B", "C"],
            vec![vec![0, 3, 0], vec![2, 0, 1], vec![0, 0, 0]],
        )
    }

    #[test]
    fn test_three_leaf_scenario() {
        let root = abc_engine().run().unwrap();

        assert_eq!(root.similarity(), Some(1.0));
        assert_eq!(root.id(), 4);
        let (left, right) = root.children().unwrap();
        assert_eq!(left.label(), Some(&"C"));
        assert_eq!(left.similarity(), Some(1.0));
        assert_eq!(right.id(), 3);
        assert_eq!(right.similarity(), Some(5.0));

        let (a, b) = right.children().unwrap();
        assert_eq!((a.label(), b.label()), (Some(&"A"), Some(&"B")));
        assert_eq!(a.similarity(), Some(5.0));
        assert_eq!(b.similarity(), Some(5.0));
    }

    #[test]
    fn test_reduction_sums_merged_rows_and_columns() {
        let mut engine = abc_engine();
        assert!(engine.step());

        // survivors: C, then the merged {A,B}
        assert_eq!(engine.working_matrix(), &[vec![0, 0], vec![1, 0]]);
        assert_eq!(engine.active().len(), 2);
        assert_eq!(engine.active()[1].id(), 3);
        assert_eq!(
            engine.history(),
            &[MergeStep {
                left: 0,
                right: 1,
                merged: 3,
                similarity: 5.0
            }]
        );
    }

    #[test]
    fn test_all_zero_matrix_still_merges_first_pair() {
        let engine = ClusteringEngine::new(vec!["x", "y"], vec![vec![0, 0], vec![0, 0]]);
        assert_eq!(engine.closest_pair(), Some((0, 1)));

        let root = engine.run().unwrap();
        assert_eq!(root.similarity(), Some(0.0));
        assert_eq!(root.leaf_count(), 2);
    }

    #[test]
    fn test_single_leaf_is_root() {
        let root = ClusteringEngine::new(vec!["only"], vec![vec![7]]).run().unwrap();
        assert!(root.is_leaf());
        assert_eq!(root.similarity(), None);
    }

    #[test]
    fn test_empty_input_has_no_root() {
        let engine: ClusteringEngine<String> = ClusteringEngine::new(vec![], vec![]);
        assert!(engine.run().is_none());
    }

    #[test]
    fn test_ties_resolve_to_first_pair_in_scan_order() {
        let engine = ClusteringEngine::new(
            vec!["a", "b", "c", "d"],
            vec![
                vec![0, 0, 0, 0],
                vec![0, 0, 2, 0],
                vec![0, 0, 0, 0],
                vec![2, 0, 0, 0],
            ],
        );
        // (0,3) and (1,2) both sum to 2; row 0 is scanned first
        assert_eq!(engine.closest_pair(), Some((0, 3)));
    }

    #[test]
    fn test_legacy_selection_can_miss_the_maximum() {
        // m[0][1] = 2 sets max to 2 + 0; m[1][2] = 2 is not > 2 although 2 + 2 = 4
        let cells = vec![vec![0, 2, 0], vec![0, 0, 2], vec![0, 2, 0]];

        let consistent = ClusteringEngine::new(vec!["a", "b", "c"], cells.clone());
        let legacy = ClusteringEngine::new(vec!["a", "b", "c"], cells)
            .with_selection(PairSelection::Legacy);

        assert_eq!(consistent.closest_pair(), Some((1, 2)));
        assert_eq!(legacy.closest_pair(), Some((0, 1)));
    }

    #[test]
    fn test_from_matrix_leaves_source_intact() {
        let mut matrix = CouplingMatrix::new(["A", "B", "C"]);
        matrix.increment("A", "B");
        matrix.increment("C", "B");

        let root = hierarchic_clustering(&matrix, PairSelection::Consistent).unwrap();

        assert_eq!(root.leaf_count(), 3);
        assert_eq!(matrix.total(), 2);
        assert_eq!(matrix.count(0, 1), 1);
    }

    #[test]
    fn test_ids_are_fresh_and_increasing() {
        let n = 6;
        let cells = (0..n)
            .map(|i| (0..n).map(|j| ((i * 7 + j * 3) % 5) as u64).collect())
            .collect();
        let mut engine = ClusteringEngine::new((0..n).collect::<Vec<_>>(), cells);
        while engine.step() {}

        let merged: Vec<_> = engine.history().iter().map(|s| s.merged).collect();
        assert_eq!(merged, (n..2 * n - 1).collect::<Vec<_>>());
    }
}
