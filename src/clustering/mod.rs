//! Hierarchical agglomerative clustering of a coupling matrix.
//!
//! The [`ClusteringEngine`] reduces one leaf per entity to a single root
//! [`Cluster`]; the [`DendrogramProjector`] turns that tree into graph
//! records and a flat partition.

pub mod cluster;
pub mod dendrogram;
pub mod engine;

pub use cluster::Cluster;
pub use dendrogram::{format_similarity, DendrogramLink, DendrogramProjector};
pub use engine::{hierarchic_clustering, ClusteringEngine, MergeStep, PairSelection};
