use crate::config::Config;
use crate::discovery::FileFinder;
use crate::parser::{descendants, node_text, string_literal_text, SourceParser};
use miette::Result;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::Path;
use tracing::debug;
use tree_sitter::{Node, Tree};

/// Kind of a top-level declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DeclarationKind {
    Function,
    Class,
    /// Variable whose initializer is a function or arrow-function expression
    FunctionVariable,
}

impl DeclarationKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            DeclarationKind::Function => "function",
            DeclarationKind::Class => "class",
            DeclarationKind::FunctionVariable => "function variable",
        }
    }
}

/// Everything one traversal collects from a single source file
#[derive(Debug, Default)]
pub struct FileUsage {
    /// Top-level exportable declarations, keyed by name (set semantics)
    pub declarations: BTreeMap<String, DeclarationKind>,

    /// Names bound by import statements
    pub imports: BTreeSet<String>,

    /// Flat set of identifier names seen anywhere in the tree
    ///
    /// Deliberately unscoped: shadowing and lexical scope are ignored. The
    /// identifier that names a registered declaration or import binding at
    /// its declaration site is excluded, so a symbol does not count as its
    /// own only use; every other occurrence counts, including recursive
    /// references inside the declaration's body.
    pub usage: HashSet<String>,

    /// Specifiers of dynamic `import(...)` calls (empty string when the
    /// argument is not a plain string literal). Recorded as a notable
    /// pattern, not an error.
    pub dynamic_imports: Vec<String>,
}

/// Combined dead-export / unused-import report
///
/// Only files with at least one finding appear; maps and name lists are
/// ordered so repeated runs over an unchanged tree serialize identically.
#[derive(Debug, Default, Serialize)]
pub struct DeadCodeReport {
    #[serde(rename = "deadExports")]
    pub dead_exports: BTreeMap<String, Vec<String>>,

    #[serde(rename = "unusedImports")]
    pub unused_imports: BTreeMap<String, Vec<String>>,
}

impl DeadCodeReport {
    pub fn is_empty(&self) -> bool {
        self.dead_exports.is_empty() && self.unused_imports.is_empty()
    }
}

/// Collect declarations, import bindings, and the flat usage set from one
/// parsed source file
pub fn collect_usage(source: &str, tree: &Tree) -> FileUsage {
    let root = tree.root_node();
    let mut file = FileUsage::default();

    // First pass: top-level declarations and import bindings. The identifier
    // nodes that name them are remembered so the usage walk can skip them.
    let mut declaration_sites: HashSet<usize> = HashSet::new();
    let mut cursor = root.walk();
    for child in root.children(&mut cursor) {
        collect_top_level(child, source, &mut file, &mut declaration_sites);
    }

    // Second pass: every node transitively
    for node in descendants(root) {
        if is_identifier_kind(node.kind()) && !declaration_sites.contains(&node.id()) {
            file.usage.insert(node_text(node, source).to_string());
        }

        if node.kind() == "call_expression" {
            collect_dynamic_import(node, source, &mut file);
        }
    }

    file
}

fn collect_top_level(
    node: Node,
    source: &str,
    file: &mut FileUsage,
    declaration_sites: &mut HashSet<usize>,
) {
    match node.kind() {
        // `export function f() {}` wraps the declaration one level down
        "export_statement" => {
            if let Some(declaration) = node.child_by_field_name("declaration") {
                collect_top_level(declaration, source, file, declaration_sites);
            }
        }
        "function_declaration" | "generator_function_declaration" => {
            register_declaration(node, source, DeclarationKind::Function, file, declaration_sites);
        }
        "class_declaration" | "abstract_class_declaration" => {
            register_declaration(node, source, DeclarationKind::Class, file, declaration_sites);
        }
        "lexical_declaration" | "variable_declaration" => {
            collect_function_variables(node, source, file, declaration_sites);
        }
        "import_statement" => {
            collect_import_bindings(node, source, file, declaration_sites);
        }
        _ => {}
    }
}

fn register_declaration(
    node: Node,
    source: &str,
    kind: DeclarationKind,
    file: &mut FileUsage,
    declaration_sites: &mut HashSet<usize>,
) {
    if let Some(name) = node.child_by_field_name("name") {
        declaration_sites.insert(name.id());
        file.declarations.insert(node_text(name, source).to_string(), kind);
    }
}

fn collect_function_variables(
    node: Node,
    source: &str,
    file: &mut FileUsage,
    declaration_sites: &mut HashSet<usize>,
) {
    let mut cursor = node.walk();
    for declarator in node.named_children(&mut cursor) {
        if declarator.kind() != "variable_declarator" {
            continue;
        }
        let Some(name) = declarator.child_by_field_name("name") else {
            continue;
        };
        // Destructuring patterns are not exportable symbols here
        if name.kind() != "identifier" {
            continue;
        }
        let is_function_valued = declarator
            .child_by_field_name("value")
            .map(|value| {
                matches!(
                    value.kind(),
                    "arrow_function" | "function_expression" | "function"
                )
            })
            .unwrap_or(false);
        if is_function_valued {
            declaration_sites.insert(name.id());
            file.declarations
                .insert(node_text(name, source).to_string(), DeclarationKind::FunctionVariable);
        }
    }
}

fn collect_import_bindings(
    node: Node,
    source: &str,
    file: &mut FileUsage,
    declaration_sites: &mut HashSet<usize>,
) {
    let mut cursor = node.walk();
    for clause in node.named_children(&mut cursor) {
        if clause.kind() != "import_clause" {
            continue;
        }
        let mut clause_cursor = clause.walk();
        for binding in clause.named_children(&mut clause_cursor) {
            match binding.kind() {
                // Default import: `import axios from "axios"`
                "identifier" => {
                    declaration_sites.insert(binding.id());
                    file.imports.insert(node_text(binding, source).to_string());
                }
                // Named imports: `import { a, b as c } from "m"`
                "named_imports" => {
                    let mut imports_cursor = binding.walk();
                    for specifier in binding.named_children(&mut imports_cursor) {
                        if specifier.kind() != "import_specifier" {
                            continue;
                        }
                        let bound = specifier
                            .child_by_field_name("alias")
                            .or_else(|| specifier.child_by_field_name("name"));
                        if let Some(bound) = bound {
                            declaration_sites.insert(bound.id());
                            file.imports.insert(node_text(bound, source).to_string());
                        }
                    }
                }
                // Namespace imports (`* as ns`) are not tracked
                _ => {}
            }
        }
    }
}

fn collect_dynamic_import(node: Node, source: &str, file: &mut FileUsage) {
    let Some(function) = node.child_by_field_name("function") else {
        return;
    };
    if function.kind() != "import" {
        return;
    }

    let literal = node
        .child_by_field_name("arguments")
        .and_then(|arguments| arguments.named_child(0))
        .filter(|argument| argument.kind() == "string")
        .map(|argument| string_literal_text(argument, source));

    // A dynamically referenced module specifier counts as a usage so it is
    // never misclassified as dead
    if let Some(specifier) = &literal {
        file.usage.insert(specifier.clone());
    }

    debug!(
        "Dynamic import detected ({})",
        literal.as_deref().unwrap_or("non-literal argument")
    );
    file.dynamic_imports.push(literal.unwrap_or_default());
}

fn is_identifier_kind(kind: &str) -> bool {
    matches!(
        kind,
        "identifier"
            | "property_identifier"
            | "shorthand_property_identifier"
            | "shorthand_property_identifier_pattern"
            | "type_identifier"
            | "statement_identifier"
            | "private_property_identifier"
    )
}

/// Decide dead exports and unused imports from the fully collected per-file
/// usage
///
/// Dead exports are judged against the union of every file's usage set;
/// unused imports are judged only against the importing file's own set. The
/// asymmetry is deliberate.
pub fn decide(per_file: &BTreeMap<String, FileUsage>) -> DeadCodeReport {
    let mut global_usage: HashSet<&str> = HashSet::new();
    for usage in per_file.values() {
        global_usage.extend(usage.usage.iter().map(String::as_str));
    }

    let mut report = DeadCodeReport::default();
    for (path, usage) in per_file {
        let dead: Vec<String> = usage
            .declarations
            .keys()
            .filter(|name| !global_usage.contains(name.as_str()))
            .cloned()
            .collect();
        if !dead.is_empty() {
            report.dead_exports.insert(path.clone(), dead);
        }

        let unused: Vec<String> = usage
            .imports
            .iter()
            .filter(|name| !usage.usage.contains(name.as_str()))
            .cloned()
            .collect();
        if !unused.is_empty() {
            report.unused_imports.insert(path.clone(), unused);
        }
    }

    report
}

/// Symbol usage analyzer
///
/// Two-pass over the project: collect every file's declarations, imports,
/// and usage first, then decide findings. Files that fail to read or parse
/// contribute nothing and never halt the batch.
pub struct UsageAnalyzer<'a> {
    config: &'a Config,
}

impl<'a> UsageAnalyzer<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    pub fn analyze(&self, root: &Path) -> Result<DeadCodeReport> {
        let finder = FileFinder::new(self.config);
        let files = finder.find_source_files(root);

        let mut parser = SourceParser::new();
        let mut per_file: BTreeMap<String, FileUsage> = BTreeMap::new();

        for file in &files {
            let Some((source, tree)) = parser.parse_file(&file.path) else {
                continue;
            };
            per_file.insert(file.path.display().to_string(), collect_usage(&source, &tree));
        }

        Ok(decide(&per_file))
    }
}
