use std::path::Path;
use tracing::warn;
use tree_sitter::{Language, Parser as TsParser, Tree};

/// TypeScript/JavaScript source parser using tree-sitter
///
/// The grammar is selected per file from the extension. Read and parse
/// failures are logged as warnings and reported as `None`; the absence of a
/// tree, not an error, is the skip signal for callers.
pub struct SourceParser {
    parser: TsParser,
}

impl SourceParser {
    pub fn new() -> Self {
        Self {
            parser: TsParser::new(),
        }
    }

    /// Read and parse one source file
    pub fn parse_file(&mut self, path: &Path) -> Option<(String, Tree)> {
        let source = match std::fs::read_to_string(path) {
            Ok(source) => source,
            Err(err) => {
                warn!("Failed to read {}: {}", path.display(), err);
                return None;
            }
        };

        let tree = self.parse(path, &source)?;
        Some((source, tree))
    }

    /// Parse already-loaded source text, selecting the grammar from the path
    pub fn parse(&mut self, path: &Path, source: &str) -> Option<Tree> {
        let language = match Self::language_for(path) {
            Some(language) => language,
            None => {
                warn!("No grammar for {}", path.display());
                return None;
            }
        };

        if let Err(err) = self.parser.set_language(&language) {
            warn!("Failed to load grammar for {}: {}", path.display(), err);
            return None;
        }

        match self.parser.parse(source, None) {
            Some(tree) => Some(tree),
            None => {
                warn!("Failed to parse {}", path.display());
                None
            }
        }
    }

    fn language_for(path: &Path) -> Option<Language> {
        let extension = path.extension()?.to_str()?.to_lowercase();
        match extension.as_str() {
            "ts" => Some(tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()),
            "js" => Some(tree_sitter_javascript::LANGUAGE.into()),
            _ => None,
        }
    }
}

impl Default for SourceParser {
    fn default() -> Self {
        Self::new()
    }
}
