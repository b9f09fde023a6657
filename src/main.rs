use anyhow::Result;
use clap::Parser;
use couplingmap::cli::{Cli, Commands};
use couplingmap::commands::{self, AnalyzeConfig};
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();
    couplingmap::observability::init_tracing(cli.verbosity);

    match cli.command {
        command @ Commands::Analyze { .. } => handle_analyze_command(command),
        Commands::Init { force } => {
            commands::init_config(Path::new("."), force)?;
            Ok(())
        }
    }
}

fn handle_analyze_command(command: Commands) -> Result<()> {
    let Commands::Analyze {
        facts,
        output,
        format,
        method_percentage,
        field_percentage,
        method_lines_percentage,
        min_methods,
        pair_selection,
        config,
    } = command
    else {
        return Ok(());
    };

    commands::handle_analyze(AnalyzeConfig {
        facts,
        format: format.into(),
        output,
        method_percentage,
        field_percentage,
        method_lines_percentage,
        min_methods,
        pair_selection: pair_selection.map(Into::into),
        config,
    })
}
