//! Fixed-size coupling matrix over a closed set of entity names.
//!
//! ```text
//!          A     B     C
//!    A     -   0.75   -          cell = (m[i][j] + m[j][i]) / total
//!    B   0.75   -   0.25
//!    C     -   0.25   -
//! ```
//!
//! Recording is directional (`m[i][j]` counts relations from i to j) but
//! every read path sums both directions.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Symmetric-on-read relation counts between named entities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouplingMatrix {
    names: Vec<String>,
    #[serde(skip)]
    index: HashMap<String, usize>,
    cells: Vec<Vec<u64>>,
    total: u64,
}

impl CouplingMatrix {
    /// Create an empty matrix. Duplicate names share the index of their first occurrence.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut index = HashMap::new();
        let mut distinct = Vec::new();

        for name in names {
            let name = name.into();
            if !index.contains_key(&name) {
                index.insert(name.clone(), distinct.len());
                distinct.push(name);
            }
        }

        let n = distinct.len();
        Self {
            names: distinct,
            index,
            cells: vec![vec![0; n]; n],
            total: 0,
        }
    }

    /// Record one relation from `from` to `to`. Ignored if either name is unknown.
    pub fn increment(&mut self, from: &str, to: &str) {
        let (Some(&i), Some(&j)) = (self.index.get(from), self.index.get(to)) else {
            return;
        };
        self.cells[i][j] += 1;
        self.total += 1;
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Number of relations recorded from `i` to `j`.
    pub fn count(&self, i: usize, j: usize) -> u64 {
        self.cells[i][j]
    }

    /// Relations between `i` and `j` in either direction.
    pub fn coupling(&self, i: usize, j: usize) -> u64 {
        if i == j {
            self.cells[i][i]
        } else {
            self.cells[i][j] + self.cells[j][i]
        }
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Raw directional counts, row-major.
    pub fn cells(&self) -> &[Vec<u64>] {
        &self.cells
    }

    /// Coupling ratio between `i` and `j`, `None` when nothing was recorded at all.
    pub fn ratio(&self, i: usize, j: usize) -> Option<f64> {
        (self.total > 0).then(|| self.coupling(i, j) as f64 / self.total as f64)
    }

    /// Display grid of `(len + 1) x (len + 1)` cells with names as headers.
    ///
    /// Each cell reads `"<ratio> (<sum>/<total>)"`, or `-` when the pair has
    /// no recorded relation (always `-` for an empty matrix).
    pub fn generate_table(&self) -> Vec<Vec<String>> {
        let n = self.len();
        let mut table = vec![vec![String::new(); n + 1]; n + 1];

        for (i, name) in self.names.iter().enumerate() {
            table[0][i + 1] = name.clone();
            table[i + 1][0] = name.clone();
        }

        for i in 0..n {
            for j in 0..n {
                table[i + 1][j + 1] = self.cell_label(i, j);
            }
        }

        table
    }

    fn cell_label(&self, i: usize, j: usize) -> String {
        let sum = self.coupling(i, j);
        match self.ratio(i, j) {
            Some(ratio) if sum > 0 => {
                format!("{} ({}/{})", format_ratio(ratio), sum, self.total)
            }
            _ => "-".to_string(),
        }
    }

    /// Rebuild the name lookup after deserialization.
    pub fn reindex(&mut self) {
        self.index = self
            .names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
    }
}

/// Up to four decimals, trailing zeros trimmed.
pub fn format_ratio(ratio: f64) -> String {
    let formatted = format!("{:.4}", ratio);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_string()
}
