use crate::errors::Result;
use crate::graph::GraphDocument;
use crate::io::destinations::ArtifactSink;
use crate::io::output::OutputWriter;
use crate::report::AnalysisReport;
use serde::Serialize;
use std::io::Write;

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

/// Serialize a graph document and hand it to `sink` as `name`.
pub fn write_graph_document<S: Serialize>(
    sink: &dyn ArtifactSink,
    name: &str,
    document: &GraphDocument<S>,
) -> Result<()> {
    let json = document.to_json()?;
    sink.write_artifact(name, &json)
}
