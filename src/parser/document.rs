use serde::Deserialize;
use serde_yaml::Value;

/// Generic YAML document parser
///
/// A manifest file may hold several documents separated by `---`; each is
/// parsed into a generic [`Value`] tree. Empty documents (an empty file, or
/// a bare `---` separator) deserialize to null and are dropped, since no
/// rule can match them. Parse errors are returned to the caller, which
/// converts them into a per-file policy finding rather than propagating.
pub struct DocumentParser;

impl DocumentParser {
    /// Parse all non-empty documents in a manifest's text
    pub fn parse_str(contents: &str) -> Result<Vec<Value>, serde_yaml::Error> {
        serde_yaml::Deserializer::from_str(contents)
            .map(Value::deserialize)
            .filter(|document| !matches!(document, Ok(Value::Null)))
            .collect()
    }
}
