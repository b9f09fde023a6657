//! Dendrogram nodes.

use std::collections::VecDeque;

/// A node of the merge tree.
///
/// Leaves stand for one entity and carry the matrix row they came from as
/// their id. Internal nodes own both merged subtrees and record the coupling
/// strength at which they were formed. There is no parent pointer.
#[derive(Debug, Clone, PartialEq)]
pub enum Cluster<T> {
    Leaf {
        id: usize,
        label: T,
        /// Coupling of the merge that absorbed this leaf; set once.
        similarity: Option<f64>,
    },
    Internal {
        id: usize,
        similarity: f64,
        left: Box<Cluster<T>>,
        right: Box<Cluster<T>>,
    },
}

impl<T> Cluster<T> {
    pub fn leaf(id: usize, label: T) -> Self {
        Cluster::Leaf {
            id,
            label,
            similarity: None,
        }
    }

    pub fn merge(id: usize, similarity: f64, left: Cluster<T>, right: Cluster<T>) -> Self {
        Cluster::Internal {
            id,
            similarity,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn id(&self) -> usize {
        match self {
            Cluster::Leaf { id, .. } | Cluster::Internal { id, .. } => *id,
        }
    }

    pub fn similarity(&self) -> Option<f64> {
        match self {
            Cluster::Leaf { similarity, .. } => *similarity,
            Cluster::Internal { similarity, .. } => Some(*similarity),
        }
    }

    /// Assign the similarity if it is still unset. Returns whether it was assigned.
    pub fn stamp_similarity(&mut self, value: f64) -> bool {
        match self {
            Cluster::Leaf {
                similarity: slot @ None,
                ..
            } => {
                *slot = Some(value);
                true
            }
            _ => false,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Cluster::Leaf { .. })
    }

    pub fn label(&self) -> Option<&T> {
        match self {
            Cluster::Leaf { label, .. } => Some(label),
            Cluster::Internal { .. } => None,
        }
    }

    pub fn children(&self) -> Option<(&Cluster<T>, &Cluster<T>)> {
        match self {
            Cluster::Leaf { .. } => None,
            Cluster::Internal { left, right, .. } => Some((&**left, &**right)),
        }
    }

    /// Leaves in breadth-first order.
    pub fn leaves(&self) -> Vec<&Cluster<T>> {
        let mut queue = VecDeque::from([self]);
        let mut leaves = Vec::new();

        while let Some(cluster) = queue.pop_front() {
            match cluster.children() {
                Some((left, right)) => {
                    queue.push_back(left);
                    queue.push_back(right);
                }
                None => leaves.push(cluster),
            }
        }

        leaves
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves().len()
    }

    /// Labels of every leaf under this node.
    pub fn labels(&self) -> Vec<&T> {
        self.leaves().into_iter().filter_map(Cluster::label).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_similarity_is_write_once() {
        let mut leaf = Cluster::leaf(0, "A");
        assert_eq!(leaf.similarity(), None);

        assert!(leaf.stamp_similarity(4.0));
        assert!(!leaf.stamp_similarity(9.0));
        assert_eq!(leaf.similarity(), Some(4.0));
    }

    #[test]
    fn test_internal_similarity_is_fixed_at_creation() {
        let mut merged = Cluster::merge(2, 3.0, Cluster::leaf(0, "A"), Cluster::leaf(1, "B"));
        assert!(!merged.stamp_similarity(1.0));
        assert_eq!(merged.similarity(), Some(3.0));
        assert_eq!(merged.label(), None);
    }

    #[test]
    fn test_leaves_breadth_first() {
        let inner = Cluster::merge(3, 2.0, Cluster::leaf(0, "A"), Cluster::leaf(1, "B"));
        let root = Cluster::merge(4, 1.0, Cluster::leaf(2, "C"), inner);

        assert_eq!(root.labels(), vec![&"C", &"A", &"B"]);
        assert_eq!(root.leaf_count(), 3);
        assert_eq!(Cluster::leaf(9, "solo").leaf_count(), 1);
    }
}
