//! Configuration loaded from `.couplingmap.toml`.
//!
//! Every section and field is optional; missing values fall back to the
//! defaults shown by `couplingmap init`.

mod core;
mod loader;

pub use self::core::{ClusteringConfig, CouplingmapConfig, OutputConfig, ReportConfig};
pub use loader::{
    directory_ancestors, discover_config, load_config, load_config_from,
    parse_and_validate_config, CONFIG_FILE_NAME,
};
