//! Everything a finished analysis reports: project statistics, the class
//! coupling matrix and the artifacts written along the way.

mod statistics;

pub use statistics::{
    has_more_than, intersect, packages, same_as_max, top_count, top_percent, ClassListing,
    ClassSummary, MethodSummary, ProjectStatistics, Selection,
};

use crate::coupling::CouplingMatrix;
use serde::Serialize;

pub const METHOD_GRAPH_TITLE: &str = "MethodCall Json graph";
pub const CLASS_GRAPH_TITLE: &str = "ClassCall Json graph";
pub const DENDROGRAM_TITLE: &str = "Dendrogram Cluster graph";
pub const PARTITION_TITLE: &str = "Dendrogram Partition graph";

/// A JSON artifact that was handed to the sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactRecord {
    pub title: String,
    pub file_name: String,
    pub nodes: usize,
    pub links: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub statistics: ProjectStatistics,
    pub coupling: CouplingMatrix,
    /// Number of partitions the dendrogram was cut into.
    pub partitions: usize,
    pub artifacts: Vec<ArtifactRecord>,
}

impl AnalysisReport {
    pub fn artifact(&self, title: &str) -> Option<&ArtifactRecord> {
        self.artifacts.iter().find(|a| a.title == title)
    }
}
