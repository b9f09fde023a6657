use crate::clustering::PairSelection;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for couplingmap
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CouplingmapConfig {
    /// Report statistics configuration
    #[serde(default)]
    pub report: ReportConfig,

    /// Artifact locations
    #[serde(default)]
    pub output: OutputConfig,

    /// Clustering behaviour
    #[serde(default)]
    pub clustering: ClusteringConfig,
}

/// Selection thresholds for the statistics report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Percentage of classes with the most methods to list
    #[serde(default = "default_percentage")]
    pub method_percentage: u32,

    /// Percentage of classes with the most fields to list
    #[serde(default = "default_percentage")]
    pub field_percentage: u32,

    /// Percentage of methods with the most lines to list
    #[serde(default = "default_percentage")]
    pub method_lines_percentage: u32,

    /// List classes declaring strictly more methods than this
    #[serde(default = "default_min_methods")]
    pub min_methods: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            method_percentage: default_percentage(),
            field_percentage: default_percentage(),
            method_lines_percentage: default_percentage(),
            min_methods: default_min_methods(),
        }
    }
}

impl ReportConfig {
    fn validate_percentage(value: u32, name: &str) -> Result<(), String> {
        if value <= 100 {
            Ok(())
        } else {
            Err(format!("{} must be between 0 and 100, got {}", name, value))
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        Self::validate_percentage(self.method_percentage, "method_percentage")?;
        Self::validate_percentage(self.field_percentage, "field_percentage")?;
        Self::validate_percentage(self.method_lines_percentage, "method_lines_percentage")
    }
}

/// Where artifacts are written, relative to `directory`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_directory")]
    pub directory: PathBuf,

    #[serde(default = "default_report")]
    pub report: String,

    #[serde(default = "default_method_graph")]
    pub method_graph: String,

    #[serde(default = "default_class_graph")]
    pub class_graph: String,

    #[serde(default = "default_dendrogram")]
    pub dendrogram: String,

    #[serde(default = "default_partition")]
    pub partition: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            report: default_report(),
            method_graph: default_method_graph(),
            class_graph: default_class_graph(),
            dendrogram: default_dendrogram(),
            partition: default_partition(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusteringConfig {
    #[serde(default)]
    pub pair_selection: PairSelection,
}

fn default_percentage() -> u32 {
    10
}

fn default_min_methods() -> usize {
    3
}

fn default_directory() -> PathBuf {
    PathBuf::from(".")
}

fn default_report() -> String {
    "results.md".to_string()
}

fn default_method_graph() -> String {
    "method-call-output.json".to_string()
}

fn default_class_graph() -> String {
    "class-call-output.json".to_string()
}

fn default_dendrogram() -> String {
    "dendrogram-output.json".to_string()
}

fn default_partition() -> String {
    "dendrogram-partition.json".to_string()
}
