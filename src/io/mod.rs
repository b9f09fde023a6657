pub mod destinations;
pub mod output;
pub mod writers;

pub use destinations::{ArtifactSink, DirectorySink, MemorySink};
pub use output::{create_writer, render_markdown, OutputFormat, OutputWriter};
pub use writers::write_graph_document;
