//! Flattened view over a [`FactSet`].
//!
//! Methods are stored in one arena in declaration order (type order, then
//! method order). Each entry refers to its owner through a [`TypeIndex`]
//! into the types arena.

use super::{qualify, FactSet, InvocationFact, MethodFact, TypeFact};
use std::ops::Range;

/// Position of a type in [`FactIndex::types`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeIndex(pub usize);

#[derive(Debug, Clone)]
pub struct MethodEntry {
    pub owner: TypeIndex,
    pub method: MethodFact,
}

#[derive(Debug, Clone, Default)]
pub struct FactIndex {
    types: Vec<TypeFact>,
    methods: Vec<MethodEntry>,
    /// Slice of `methods` owned by each type, parallel to `types`.
    spans: Vec<Range<usize>>,
}

impl FactIndex {
    pub fn new(facts: FactSet) -> Self {
        let mut types = Vec::with_capacity(facts.types.len());
        let mut spans = Vec::with_capacity(facts.types.len());
        let mut methods = Vec::new();

        for (position, mut type_fact) in facts.types.into_iter().enumerate() {
            let owner = TypeIndex(position);
            let start = methods.len();
            methods.extend(
                std::mem::take(&mut type_fact.methods)
                    .into_iter()
                    .map(|method| MethodEntry { owner, method }),
            );
            spans.push(start..methods.len());
            types.push(type_fact);
        }

        Self {
            types,
            methods,
            spans,
        }
    }

    /// Declared types. Their `methods` lists are empty; use [`Self::methods_of`].
    pub fn types(&self) -> &[TypeFact] {
        &self.types
    }

    pub fn methods(&self) -> &[MethodEntry] {
        &self.methods
    }

    pub fn owner(&self, entry: &MethodEntry) -> &TypeFact {
        &self.types[entry.owner.0]
    }

    /// Methods declared by `owner`; empty for an unknown index.
    pub fn methods_of(&self, owner: TypeIndex) -> &[MethodEntry] {
        self.spans
            .get(owner.0)
            .map_or(&[] as &[MethodEntry], |span| &self.methods[span.clone()])
    }

    pub fn method_count_of(&self, owner: TypeIndex) -> usize {
        self.spans.get(owner.0).map_or(0, |span| span.len())
    }

    /// `Owner.name(P1, P2)`
    pub fn short_with_param_types(&self, entry: &MethodEntry) -> String {
        format!(
            "{}.{}({})",
            self.owner(entry).name,
            entry.method.name,
            entry.method.parameters.join(", ")
        )
    }

    /// `package.Owner.name`
    pub fn method_full_name(&self, entry: &MethodEntry) -> String {
        let owner = self.owner(entry);
        format!("{}.{}", qualify(&owner.package, &owner.name), entry.method.name)
    }

    pub fn invocations<'a>(&self, entry: &'a MethodEntry) -> &'a [InvocationFact] {
        &entry.method.invocations
    }
}
