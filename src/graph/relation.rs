//! Deduplicated caller -> callee graphs built over an [`IdentifierRegistry`].

use super::registry::IdentifierRegistry;
use crate::facts::{FactIndex, InvocationFact};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Callers mapped to the set of distinct callees they reach.
#[derive(Debug, Clone, Default)]
pub struct RelationGraph {
    registry: IdentifierRegistry,
    edges: BTreeMap<usize, BTreeSet<usize>>,
}

impl RelationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registry(&self) -> &IdentifierRegistry {
        &self.registry
    }

    /// Distinct callees of `caller`, ascending. Empty when `caller` never called anything.
    pub fn callees(&self, caller: usize) -> impl Iterator<Item = usize> + '_ {
        self.edges.get(&caller).into_iter().flatten().copied()
    }

    /// All `(caller, callee)` edges, ascending by caller then callee.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.edges
            .iter()
            .flat_map(|(&caller, callees)| callees.iter().map(move |&callee| (caller, callee)))
    }

    pub fn node_count(&self) -> usize {
        self.registry.len()
    }

    /// Sum of all outdegrees.
    pub fn edge_count(&self) -> usize {
        self.edges.values().map(BTreeSet::len).sum()
    }

    pub fn out_degree(&self, caller: usize) -> usize {
        self.edges.get(&caller).map_or(0, BTreeSet::len)
    }

    fn add_caller(&mut self, key: &str) -> usize {
        let id = self.registry.record_caller(key);
        self.edges.entry(id).or_default();
        id
    }

    fn add_call(&mut self, caller: usize, callee_key: &str) -> usize {
        let callee = self.registry.record_callee(callee_key);
        self.edges.entry(caller).or_default().insert(callee);
        callee
    }
}

/// Build a graph from parent records and the child records each one yields.
///
/// Every parent becomes an owned node, every child a node (unowned unless it
/// is also a parent somewhere), and every parent/child pair an edge. A child
/// seen several times under the same parent yields one edge but counts each
/// occurrence as an inbound reference.
pub fn build_graph<'p, P, C, I, FC, FP, FK>(
    parents: &'p [P],
    children: FC,
    parent_key: FP,
    child_key: FK,
) -> RelationGraph
where
    FC: Fn(&'p P) -> I,
    I: IntoIterator<Item = C>,
    FP: Fn(&'p P) -> String,
    FK: Fn(&C) -> String,
{
    let mut graph = RelationGraph::new();

    for parent in parents {
        let caller = graph.add_caller(&parent_key(parent));
        for child in children(parent) {
            graph.add_call(caller, &child_key(&child));
        }
    }

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "Built relation graph"
    );
    graph
}

/// Method-level call graph keyed by `Type.method(ParamTypes)`.
pub fn method_graph(index: &FactIndex) -> RelationGraph {
    build_graph(
        index.methods(),
        |entry| entry.method.invocations.iter(),
        |entry| index.short_with_param_types(entry),
        |invocation: &&InvocationFact| invocation.short_with_param_types(),
    )
}

/// Class-level call graph keyed by short type names.
pub fn class_graph(index: &FactIndex) -> RelationGraph {
    build_graph(
        index.methods(),
        |entry| entry.method.invocations.iter(),
        |entry| index.owner(entry).name.clone(),
        |invocation: &&InvocationFact| invocation.class_type().to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::{FactSet, MethodFact, TypeFact};

    fn pairs_graph(pairs: &[(&str, &[&str])]) -> RelationGraph {
        build_graph(
            pairs,
            |(_, callees)| callees.iter().copied(),
            |(caller, _)| caller.to_string(),
            |callee: &&str| callee.to_string(),
        )
    }

    fn call(declaring_type: &str, name: &str) -> InvocationFact {
        InvocationFact {
            name: name.into(),
            declaring_type: declaring_type.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_repeated_call_is_one_edge_many_references() {
        let graph = pairs_graph(&[("a", &["b", "b"])]);

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.registry().inbound_count(1), 2);
    }

    #[test]
    fn test_ids_follow_enumeration_order() {
        let graph = pairs_graph(&[("x", &["lib"]), ("lib", &["x"])]);
        let registry = graph.registry();

        assert_eq!(registry.get("x"), Some(0));
        assert_eq!(registry.get("lib"), Some(1));
        // "lib" was first seen as a callee and later as a caller
        assert!(registry.is_owned(1));
        assert_eq!(registry.inbound_count(1), 1);
        assert_eq!(registry.inbound_count(0), 1);
    }

    #[test]
    fn test_edges_accumulate_across_parents_sharing_a_key() {
        let graph = pairs_graph(&[("a", &["b"]), ("a", &["c", "b"])]);

        let callees: Vec<_> = graph.callees(0).collect();
        assert_eq!(callees, vec![1, 2]);
        assert_eq!(graph.registry().inbound_count(1), 2);
    }

    #[test]
    fn test_caller_without_calls_is_a_node() {
        let graph = pairs_graph(&[("lonely", &[])]);
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.registry().is_owned(0));
    }

    #[test]
    fn test_method_and_class_graphs() {
        let facts = FactSet {
            types: vec![
                TypeFact {
                    name: "Service".into(),
                    methods: vec![
                        MethodFact {
                            name: "handle".into(),
                            parameters: vec!["Request".into()],
                            invocations: vec![call("Repo", "find"), call("Repo", "save")],
                            ..Default::default()
                        },
                        MethodFact {
                            name: "close".into(),
                            invocations: vec![call("Repo", "find")],
                            ..Default::default()
                        },
                    ],
                    ..Default::default()
                },
                TypeFact {
                    name: "Repo".into(),
                    methods: vec![MethodFact {
                        name: "find".into(),
                        ..Default::default()
                    }],
                    ..Default::default()
                },
            ],
        };
        let index = FactIndex::new(facts);

        let methods = method_graph(&index);
        assert_eq!(methods.registry().get("Service.handle(Request)"), Some(0));
        assert_eq!(methods.registry().get("Repo.find()"), Some(1));
        assert_eq!(methods.registry().inbound_count(1), 2);
        assert!(!methods.registry().is_owned(2)); // Repo.save() is never declared
        assert!(methods.registry().is_owned(1));
        assert_eq!(methods.edge_count(), 3);

        let classes = class_graph(&index);
        assert_eq!(classes.node_count(), 2);
        assert_eq!(classes.edge_count(), 1);
        assert_eq!(classes.registry().inbound_count(1), 3);
    }
}
