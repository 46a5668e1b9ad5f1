mod common;
mod document;
mod source;

pub use common::{descendants, node_text, string_literal_text};
pub use document::DocumentParser;
pub use source::SourceParser;
