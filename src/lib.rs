// Export modules for library usage
pub mod cli;
pub mod clustering;
pub mod commands;
pub mod config;
pub mod coupling;
pub mod errors;
pub mod facts;
pub mod graph;
pub mod io;
pub mod observability;
pub mod report;

// Re-export commonly used types
pub use crate::clustering::{
    hierarchic_clustering, Cluster, ClusteringEngine, DendrogramProjector, PairSelection,
};
pub use crate::config::CouplingmapConfig;
pub use crate::coupling::{class_coupling, CouplingMatrix};
pub use crate::errors::{Error, ErrorCode, Result};
pub use crate::facts::{FactIndex, FactSet, InvocationFact, MethodFact, TypeFact};
pub use crate::graph::{
    build_graph, class_graph, graph_document, method_graph, GraphDocument, IdentifierRegistry,
    LinkRecord, NodeRecord, RelationGraph,
};
pub use crate::report::{AnalysisReport, ProjectStatistics};
