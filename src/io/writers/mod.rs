pub mod json;
pub mod markdown;
pub mod terminal;

pub use json::{write_graph_document, JsonWriter};
pub use markdown::MarkdownWriter;
pub use terminal::TerminalWriter;
