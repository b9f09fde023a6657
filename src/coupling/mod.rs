//! Class coupling matrix.

mod matrix;

pub use matrix::{format_ratio, CouplingMatrix};

use crate::facts::FactIndex;
use tracing::debug;

/// Count invocations between every pair of declared types.
///
/// Rows and columns are the fully qualified names of the declared types in
/// declaration order. Invocations of types outside the project are dropped.
pub fn class_coupling(index: &FactIndex) -> CouplingMatrix {
    let mut matrix = CouplingMatrix::new(index.types().iter().map(|t| t.full_name()));

    for entry in index.methods() {
        let caller = index.owner(entry).full_name();
        for invocation in index.invocations(entry) {
            matrix.increment(&caller, &invocation.class_full_name());
        }
    }

    debug!(
        classes = matrix.len(),
        relations = matrix.total(),
        "Built class coupling matrix"
    );
    matrix
}
