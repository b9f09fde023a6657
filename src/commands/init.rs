use crate::config::CONFIG_FILE_NAME;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG: &str = r#"# couplingmap configuration

[report]
# Percentage of classes with the most methods to list
method_percentage = 10
# Percentage of classes with the most fields to list
field_percentage = 10
# Percentage of methods with the most lines to list
method_lines_percentage = 10
# List classes declaring more than this many methods
min_methods = 3

[output]
directory = "."
report = "results.md"
method_graph = "method-call-output.json"
class_graph = "class-call-output.json"
dendrogram = "dendrogram-output.json"
partition = "dendrogram-partition.json"

[clustering]
# "consistent" or "legacy"
pair_selection = "consistent"
"#;

/// Write a default configuration file into `directory`.
pub fn init_config(directory: &Path, force: bool) -> Result<PathBuf> {
    let config_path = directory.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!("Created {} configuration file", CONFIG_FILE_NAME);

    Ok(config_path)
}
