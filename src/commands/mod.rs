//! CLI command implementations.
//!
//! Available commands:
//! - **analyze**: Build the call graphs, coupling matrix and dendrogram for a fact document
//! - **init**: Write a default `.couplingmap.toml`

pub mod analyze;
pub mod init;

pub use analyze::{analyze_facts, handle_analyze, resolve_settings, run_analysis, AnalyzeConfig};
pub use init::{init_config, DEFAULT_CONFIG};
