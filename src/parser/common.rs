//! Shared tree-sitter helpers

/// Extract the raw text of a node
pub fn node_text<'a>(node: tree_sitter::Node, source: &'a str) -> &'a str {
    &source[node.start_byte()..node.end_byte()]
}

/// Extract the text of a string literal node, without the surrounding quotes
///
/// A `string` node holds its content as interleaved `string_fragment` and
/// `escape_sequence` children; escape sequences are kept verbatim. An empty
/// literal yields an empty string.
pub fn string_literal_text(node: tree_sitter::Node, source: &str) -> String {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| matches!(child.kind(), "string_fragment" | "escape_sequence"))
        .map(|child| node_text(child, source))
        .collect()
}

/// Iterator over a node and all of its descendants, in pre-order
pub fn descendants(node: tree_sitter::Node) -> impl Iterator<Item = tree_sitter::Node> {
    DescendantIterator::new(node)
}

struct DescendantIterator<'a> {
    cursor: tree_sitter::TreeCursor<'a>,
    done: bool,
}

impl<'a> DescendantIterator<'a> {
    fn new(node: tree_sitter::Node<'a>) -> Self {
        Self {
            cursor: node.walk(),
            done: false,
        }
    }
}

impl<'a> Iterator for DescendantIterator<'a> {
    type Item = tree_sitter::Node<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let node = self.cursor.node();

        // Try to go to first child
        if self.cursor.goto_first_child() {
            return Some(node);
        }

        // Try to go to next sibling
        loop {
            if self.cursor.goto_next_sibling() {
                return Some(node);
            }

            // Go up to parent
            if !self.cursor.goto_parent() {
                self.done = true;
                return Some(node);
            }
        }
    }
}
