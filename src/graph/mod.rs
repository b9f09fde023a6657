//! Call graph construction.
//!
//! Keys (method signatures or type names) are deduplicated through an
//! [`IdentifierRegistry`]; a [`RelationGraph`] records the distinct callees
//! of every caller. The same builder produces both the method-call graph and
//! the class-call graph.

pub mod projection;
pub mod registry;
pub mod relation;

pub use projection::{
    call_strength, graph_document, graph_links, graph_nodes, GraphDocument, LinkRecord,
    NodeRecord,
};
pub use registry::{IdentifierRegistry, NodeInfo};
pub use relation::{build_graph, class_graph, method_graph, RelationGraph};
