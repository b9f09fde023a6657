use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "couplingmap")]
#[command(
    about = "Call graphs, class coupling and hierarchical clustering from source facts",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Increase verbosity level (can be repeated: -v, -vv)
    /// -v: debug events
    /// -vv: trace events, including every merge step
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a fact document
    Analyze {
        /// JSON fact document produced by the source parser
        facts: PathBuf,

        /// Directory receiving the report and the JSON artifacts
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Format of the report printed to stdout
        #[arg(long, value_enum, default_value = "markdown")]
        format: OutputFormat,

        /// Percentage of top classes with the most methods
        #[arg(short = 'm', long = "method-percentage", value_parser = clap::value_parser!(u32).range(0..=100))]
        method_percentage: Option<u32>,

        /// Percentage of top classes with the most fields
        #[arg(short = 'f', long = "field-percentage", value_parser = clap::value_parser!(u32).range(0..=100))]
        field_percentage: Option<u32>,

        /// Percentage of top methods with the most lines
        #[arg(short = 'l', long = "method-lines-percentage", value_parser = clap::value_parser!(u32).range(0..=100))]
        method_lines_percentage: Option<u32>,

        /// List classes with more than N methods
        #[arg(long = "min-methods")]
        min_methods: Option<usize>,

        /// Closest-pair selection used while clustering
        #[arg(long = "pair-selection", value_enum)]
        pair_selection: Option<PairSelection>,

        /// Configuration file (defaults to the nearest .couplingmap.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PairSelection {
    /// Compare the bidirectional coupling of every pair
    Consistent,
    /// Compare single cells, as earlier releases did
    Legacy,
}

impl From<OutputFormat> for crate::io::output::OutputFormat {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Json => crate::io::output::OutputFormat::Json,
            OutputFormat::Markdown => crate::io::output::OutputFormat::Markdown,
            OutputFormat::Terminal => crate::io::output::OutputFormat::Terminal,
        }
    }
}

impl From<PairSelection> for crate::clustering::PairSelection {
    fn from(p: PairSelection) -> Self {
        match p {
            PairSelection::Consistent => crate::clustering::PairSelection::Consistent,
            PairSelection::Legacy => crate::clustering::PairSelection::Legacy,
        }
    }
}
