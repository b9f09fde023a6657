//! Serializable node/link records shared by every graph artifact.

use super::relation::RelationGraph;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: usize,
    pub name: String,
    pub own: bool,
}

/// A weighted edge. Call graphs carry a float strength, dendrograms the unit weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkRecord<S = f64> {
    pub source: usize,
    pub target: usize,
    #[serde(rename = "str")]
    pub strength: S,
}

/// `{"nodes": [...], "links": [...]}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument<S = f64> {
    pub nodes: Vec<NodeRecord>,
    pub links: Vec<LinkRecord<S>>,
}

impl<S: Serialize> GraphDocument<S> {
    pub fn new(nodes: Vec<NodeRecord>, links: Vec<LinkRecord<S>>) -> Self {
        Self { nodes, links }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Edge thickness hint: the more often a node is called, the thinner its inbound edges.
pub fn call_strength(inbound_count: usize) -> f64 {
    1.0 / (0.5 * inbound_count as f64 + 0.5)
}

/// One record per node, in id order.
pub fn graph_nodes(graph: &RelationGraph) -> Vec<NodeRecord> {
    let registry = graph.registry();
    registry
        .keys()
        .map(|(id, key)| NodeRecord {
            id,
            name: key.to_string(),
            own: registry.is_owned(id),
        })
        .collect()
}

/// One record per distinct caller/callee edge.
pub fn graph_links(graph: &RelationGraph) -> Vec<LinkRecord> {
    let registry = graph.registry();
    graph
        .edges()
        .map(|(source, target)| LinkRecord {
            source,
            target,
            strength: call_strength(registry.inbound_count(target)),
        })
        .collect()
}

pub fn graph_document(graph: &RelationGraph) -> GraphDocument {
    GraphDocument::new(graph_nodes(graph), graph_links(graph))
}
