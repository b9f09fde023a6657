//! Source-code facts consumed by the analysis.
//!
//! Facts are produced by an external parser/resolver and handed over as a
//! JSON document: declared types, the methods they declare and the resolved
//! invocations each method performs. Deserialization yields owner-less
//! records; [`FactIndex`] links methods back to their owners afterwards.

mod index;

pub use index::{FactIndex, MethodEntry, TypeIndex};

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The whole fact document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FactSet {
    #[serde(default)]
    pub types: Vec<TypeFact>,
}

/// A declared class or interface.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeFact {
    pub name: String,
    #[serde(default)]
    pub package: String,
    #[serde(default)]
    pub lines: usize,
    #[serde(default)]
    pub fields: usize,
    #[serde(default)]
    pub methods: Vec<MethodFact>,
}

/// A method declared by a type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MethodFact {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<String>,
    #[serde(default)]
    pub lines: usize,
    #[serde(default)]
    pub invocations: Vec<InvocationFact>,
}

/// A resolved method invocation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvocationFact {
    pub name: String,
    pub declaring_type: String,
    #[serde(default)]
    pub package: String,
    #[serde(default)]
    pub parameters: Vec<String>,
}

impl FactSet {
    pub fn from_json(contents: &str) -> serde_json::Result<Self> {
        serde_json::from_str(contents)
    }

    /// Read and decode a fact document from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| Error::fact_source(path, e))?;
        Self::from_json(&contents).map_err(|e| Error::fact_format(path, e))
    }
}

impl TypeFact {
    pub fn full_name(&self) -> String {
        qualify(&self.package, &self.name)
    }

    pub fn method_count(&self) -> usize {
        self.methods.len()
    }
}

impl MethodFact {
    pub fn parameter_count(&self) -> usize {
        self.parameters.len()
    }

    pub fn signature(&self) -> String {
        format!("{}({})", self.name, self.parameters.join(", "))
    }
}

impl InvocationFact {
    /// `DeclaringType.name(P1, P2)`
    pub fn short_with_param_types(&self) -> String {
        format!(
            "{}.{}({})",
            self.declaring_type,
            self.name,
            self.parameters.join(", ")
        )
    }

    pub fn class_type(&self) -> &str {
        &self.declaring_type
    }

    pub fn class_full_name(&self) -> String {
        qualify(&self.package, &self.declaring_type)
    }
}

pub(crate) fn qualify(package: &str, name: &str) -> String {
    if package.is_empty() {
        name.to_string()
    } else {
        format!("{package}.{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let facts = FactSet::from_json(indoc! {r#"
            { "types": [ { "name": "Foo", "methods": [ { "name": "bar" } ] } ] }
        "#})
        .unwrap();

        let foo = &facts.types[0];
        assert_eq!(foo.package, "");
        assert_eq!(foo.lines, 0);
        assert_eq!(foo.full_name(), "Foo");
        assert!(foo.methods[0].invocations.is_empty());
    }

    #[test]
    fn test_invocation_keys() {
        let invocation = InvocationFact {
            name: "save".into(),
            declaring_type: "Repo".into(),
            package: "com.acme.data".into(),
            parameters: vec!["User".into(), "int".into()],
        };

        assert_eq!(invocation.short_with_param_types(), "Repo.save(User, int)");
        assert_eq!(invocation.class_type(), "Repo");
        assert_eq!(invocation.class_full_name(), "com.acme.data.Repo");
    }

    #[test]
    fn test_load_missing_file_is_source_error() {
        let err = FactSet::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, Error::FactSource { .. }));
    }
}
