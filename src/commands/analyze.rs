use crate::clustering::{hierarchic_clustering, DendrogramProjector, PairSelection};
use crate::config::{self, CouplingmapConfig};
use crate::coupling::class_coupling;
use crate::errors::Error;
use crate::facts::{FactIndex, FactSet};
use crate::graph::{class_graph, graph_document, method_graph, GraphDocument};
use crate::io::{
    create_writer, render_markdown, write_graph_document, ArtifactSink, DirectorySink,
    OutputFormat,
};
use crate::report::{
    AnalysisReport, ArtifactRecord, ProjectStatistics, CLASS_GRAPH_TITLE, DENDROGRAM_TITLE,
    METHOD_GRAPH_TITLE, PARTITION_TITLE,
};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, info_span};

pub struct AnalyzeConfig {
    pub facts: PathBuf,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub method_percentage: Option<u32>,
    pub field_percentage: Option<u32>,
    pub method_lines_percentage: Option<u32>,
    pub min_methods: Option<usize>,
    pub pair_selection: Option<PairSelection>,
    pub config: Option<PathBuf>,
}

pub fn handle_analyze(config: AnalyzeConfig) -> Result<()> {
    let settings = resolve_settings(&config)?;
    let sink = DirectorySink::new(&settings.output.directory);

    let report = run_analysis(&config.facts, &settings, &sink)?;

    let stdout = std::io::stdout();
    let mut writer = create_writer(config.format, stdout.lock());
    writer.write_report(&report)?;
    Ok(())
}

/// File configuration with command-line overrides applied on top.
pub fn resolve_settings(config: &AnalyzeConfig) -> Result<CouplingmapConfig> {
    let mut settings = match &config.config {
        Some(path) => config::load_config_from(path)?,
        None => config::load_config(),
    };

    let report = &mut settings.report;
    if let Some(value) = config.method_percentage {
        report.method_percentage = value;
    }
    if let Some(value) = config.field_percentage {
        report.field_percentage = value;
    }
    if let Some(value) = config.method_lines_percentage {
        report.method_lines_percentage = value;
    }
    if let Some(value) = config.min_methods {
        report.min_methods = value;
    }
    report.validate().map_err(Error::Configuration)?;

    if let Some(selection) = config.pair_selection {
        settings.clustering.pair_selection = selection;
    }
    if let Some(directory) = &config.output {
        settings.output.directory = directory.clone();
    }

    Ok(settings)
}

/// Load the fact document at `facts` and analyze it.
pub fn run_analysis(
    facts: &Path,
    settings: &CouplingmapConfig,
    sink: &dyn ArtifactSink,
) -> Result<AnalysisReport> {
    let _span = info_span!("analyze", facts = %facts.display()).entered();

    let facts = FactSet::load(facts)
        .with_context(|| format!("Failed to load facts from {}", facts.display()))?;
    analyze_facts(FactIndex::new(facts), settings, sink)
}

/// Build every projection of `index`, write the artifacts and the markdown
/// report to `sink`, and return the report.
pub fn analyze_facts(
    index: FactIndex,
    settings: &CouplingmapConfig,
    sink: &dyn ArtifactSink,
) -> Result<AnalysisReport> {
    info!(
        types = index.types().len(),
        methods = index.methods().len(),
        "Analyzing facts"
    );
    let output = &settings.output;
    let mut artifacts = Vec::with_capacity(4);

    let methods = graph_document(&method_graph(&index));
    artifacts.push(emit(sink, METHOD_GRAPH_TITLE, &output.method_graph, &methods)?);

    let classes = graph_document(&class_graph(&index));
    artifacts.push(emit(sink, CLASS_GRAPH_TITLE, &output.class_graph, &classes)?);

    let coupling = class_coupling(&index);
    let root = hierarchic_clustering(&coupling, settings.clustering.pair_selection);

    let partitions = match &root {
        Some(root) => {
            let dendrogram = DendrogramProjector::document(root);
            artifacts.push(emit(sink, DENDROGRAM_TITLE, &output.dendrogram, &dendrogram)?);

            let selected = DendrogramProjector::select_partitions(root);
            let partition = GraphDocument::new(
                dendrogram.nodes,
                DendrogramProjector::partition_links(&selected),
            );
            artifacts.push(emit(sink, PARTITION_TITLE, &output.partition, &partition)?);
            selected.len()
        }
        None => {
            debug!("No classes to cluster");
            let empty = GraphDocument::<u32>::new(Vec::new(), Vec::new());
            artifacts.push(emit(sink, DENDROGRAM_TITLE, &output.dendrogram, &empty)?);
            artifacts.push(emit(sink, PARTITION_TITLE, &output.partition, &empty)?);
            0
        }
    };

    let report = AnalysisReport {
        statistics: ProjectStatistics::compute(&index, &settings.report),
        coupling,
        partitions,
        artifacts,
    };

    let markdown = render_markdown(&report)?;
    sink.write_artifact(&output.report, &markdown)?;
    info!(
        sink = %sink.description(),
        artifacts = report.artifacts.len() + 1,
        "Analysis complete"
    );

    Ok(report)
}

fn emit<S: Serialize>(
    sink: &dyn ArtifactSink,
    title: &str,
    file_name: &str,
    document: &GraphDocument<S>,
) -> Result<ArtifactRecord> {
    write_graph_document(sink, file_name, document)?;
    Ok(ArtifactRecord {
        title: title.to_string(),
        file_name: file_name.to_string(),
        nodes: document.nodes.len(),
        links: document.links.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::MemorySink;
    use indoc::indoc;

    fn index() -> FactIndex {
        FactIndex::new(
            FactSet::from_json(indoc! {r#"
                {"types": [
                  {"name": "A", "package": "p", "methods": [
                    {"name": "a", "invocations": [
                      {"name": "b", "declaring_type": "B", "package": "p"},
                      {"name": "b", "declaring_type": "B", "package": "p"},
                      {"name": "println", "declaring_type": "PrintStream", "package": "java.io",
                       "parameters": ["String"]}
                    ]}
                  ]},
                  {"name": "B", "package": "p", "methods": [
                    {"name": "b", "invocations": [
                      {"name": "c", "declaring_type": "C", "package": "p"}
                    ]}
                  ]},
                  {"name": "C", "package": "p", "methods": [{"name": "c"}]}
                ]}
            "#})
            .unwrap(),
        )
    }

    #[test]
    fn test_all_artifacts_reach_the_sink() {
        let sink = MemorySink::new();
        let report = analyze_facts(index(), &CouplingmapConfig::default(), &sink).unwrap();

        assert_eq!(
            sink.names(),
            vec![
                "class-call-output.json",
                "dendrogram-output.json",
                "dendrogram-partition.json",
                "method-call-output.json",
                "results.md",
            ]
        );
        assert_eq!(report.artifacts.len(), 4);
        assert_eq!(report.coupling.total(), 3);

        let dendrogram = report.artifact(DENDROGRAM_TITLE).unwrap();
        assert_eq!((dendrogram.nodes, dendrogram.links), (5, 4));
    }

    #[test]
    fn test_method_graph_marks_external_nodes() {
        let sink = MemorySink::new();
        analyze_facts(index(), &CouplingmapConfig::default(), &sink).unwrap();

        let graph: serde_json::Value =
            serde_json::from_str(&sink.get("method-call-output.json").unwrap()).unwrap();
        let names: Vec<_> = graph["nodes"]
            .as_array()
            .unwrap()
            .iter()
            .map(|n| (n["name"].as_str().unwrap().to_string(), n["own"].as_bool().unwrap()))
            .collect();

        assert_eq!(
            names,
            vec![
                ("A.a()".to_string(), true),
                ("B.b()".to_string(), true),
                ("PrintStream.println(String)".to_string(), false),
                ("C.c()".to_string(), true),
            ]
        );
    }

    #[test]
    fn test_empty_fact_set_still_writes_every_artifact() {
        let sink = MemorySink::new();
        let report =
            analyze_facts(FactIndex::default(), &CouplingmapConfig::default(), &sink).unwrap();

        assert_eq!(report.partitions, 0);
        assert_eq!(
            sink.get("dendrogram-output.json").unwrap(),
            r#"{"nodes":[],"links":[]}"#
        );
        assert!(sink.get("results.md").unwrap().contains("Number of classes : 0"));
    }

    #[test]
    fn test_overrides_are_validated() {
        let config = AnalyzeConfig {
            facts: PathBuf::from("facts.json"),
            format: OutputFormat::Markdown,
            output: Some(PathBuf::from("out")),
            method_percentage: Some(150),
            field_percentage: None,
            method_lines_percentage: None,
            min_methods: None,
            pair_selection: None,
            config: None,
        };

        let err = resolve_settings(&config).unwrap_err();
        assert!(err.to_string().contains("method_percentage"));
    }
}
