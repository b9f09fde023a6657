//! Breadth-first projections of a cluster tree.
//!
//! All traversals use an explicit FIFO queue seeded with the root, so tree
//! depth never translates into stack depth.

use super::cluster::Cluster;
use crate::graph::{GraphDocument, LinkRecord, NodeRecord};
use std::collections::VecDeque;
use std::fmt::Display;

/// Dendrogram edges carry a unit weight.
pub type DendrogramLink = LinkRecord<u32>;

pub struct DendrogramProjector;

impl DendrogramProjector {
    /// One node per cluster: leaves are labelled with their entity, internal
    /// nodes with the similarity they were formed at.
    pub fn nodes<T: Display>(root: &Cluster<T>) -> Vec<NodeRecord> {
        let mut queue = VecDeque::from([root]);
        let mut nodes = Vec::new();

        while let Some(cluster) = queue.pop_front() {
            let name = match cluster {
                Cluster::Leaf { label, .. } => label.to_string(),
                Cluster::Internal {
                    similarity,
                    left,
                    right,
                    ..
                } => {
                    queue.push_back(left);
                    queue.push_back(right);
                    format_similarity(*similarity)
                }
            };
            nodes.push(NodeRecord {
                id: cluster.id(),
                name,
                own: true,
            });
        }

        nodes
    }

    /// Two parent -> child edges per internal node.
    pub fn links<T>(root: &Cluster<T>) -> Vec<DendrogramLink> {
        let mut queue = VecDeque::from([root]);
        let mut links = Vec::new();

        while let Some(cluster) = queue.pop_front() {
            let Some((left, right)) = cluster.children() else {
                continue;
            };
            for child in [left, right] {
                links.push(LinkRecord {
                    source: cluster.id(),
                    target: child.id(),
                    strength: 1,
                });
                queue.push_back(child);
            }
        }

        links
    }

    /// Cut the tree into disjoint subtrees.
    ///
    /// An internal node whose similarity is strictly greater than the mean of
    /// its children's similarities becomes a partition and is not expanded.
    /// Otherwise its internal children are examined in turn and its leaf
    /// children become singleton partitions. Together the partitions cover
    /// every leaf exactly once.
    pub fn select_partitions<T>(root: &Cluster<T>) -> Vec<&Cluster<T>> {
        let mut queue = VecDeque::from([root]);
        let mut partitions = Vec::new();

        while let Some(cluster) = queue.pop_front() {
            let Some((left, right)) = cluster.children() else {
                // only a leaf root reaches this point
                partitions.push(cluster);
                continue;
            };

            if stands_out(cluster, left, right) {
                partitions.push(cluster);
                continue;
            }

            for child in [left, right] {
                if child.is_leaf() {
                    partitions.push(child);
                } else {
                    queue.push_back(child);
                }
            }
        }

        partitions
    }

    /// Edges of every partition subtree, concatenated in partition order.
    pub fn partition_links<T>(partitions: &[&Cluster<T>]) -> Vec<DendrogramLink> {
        partitions
            .iter()
            .flat_map(|partition| Self::links(partition))
            .collect()
    }

    pub fn document<T: Display>(root: &Cluster<T>) -> GraphDocument<u32> {
        GraphDocument::new(Self::nodes(root), Self::links(root))
    }

    /// Full node list with only the edges inside the selected partitions.
    pub fn partition_document<T: Display>(root: &Cluster<T>) -> GraphDocument<u32> {
        let partitions = Self::select_partitions(root);
        GraphDocument::new(Self::nodes(root), Self::partition_links(&partitions))
    }
}

fn stands_out<T>(cluster: &Cluster<T>, left: &Cluster<T>, right: &Cluster<T>) -> bool {
    let own = cluster.similarity().unwrap_or(0.0);
    let mean =
        (left.similarity().unwrap_or(0.0) + right.similarity().unwrap_or(0.0)) / 2.0;
    own > mean
}

/// Shortest representation that round-trips (`5`, `2.5`).
pub fn format_similarity(similarity: f64) -> String {
    similarity.to_string()
}
