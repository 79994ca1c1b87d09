//! Diagnostic trail accumulated by a single parse

use crate::criteria::NodeTypeId;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// One tuple node visited by the parser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedNode {
    pub node_depth: usize,
    pub wire_tag: String,
    /// `None` until the node parsed successfully
    pub resolved: Option<NodeTypeId>,
}

/// Depth, node count and visit log of one `parse_boolean` call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseProgress {
    depth: usize,
    tuple_node_count: usize,
    parsed_nodes: Vec<ParsedNode>,
}

impl ParseProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter_tuple_node(&mut self) {
        self.depth += 1;
        self.tuple_node_count += 1;
    }

    /// Record a node at the current depth; returns its index for `exit_tuple_node`
    pub fn add_parsed_node(&mut self, wire_tag: &str) -> usize {
        self.parsed_nodes.push(ParsedNode {
            node_depth: self.depth,
            wire_tag: wire_tag.to_string(),
            resolved: None,
        });
        self.parsed_nodes.len() - 1
    }

    pub fn exit_tuple_node(&mut self, index: usize, type_id: NodeTypeId) {
        if let Some(node) = self.parsed_nodes.get_mut(index) {
            node.resolved = Some(type_id);
        }
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn tuple_node_count(&self) -> usize {
        self.tuple_node_count
    }

    pub fn parsed_nodes(&self) -> &[ParsedNode] {
        &self.parsed_nodes
    }

    /// Nodes entered but never resolved; on failure the innermost is last
    pub fn unresolved(&self) -> impl Iterator<Item = &ParsedNode> {
        self.parsed_nodes.iter().filter(|node| node.resolved.is_none())
    }

    /// Indented, one line per visited node
    pub fn render_trail(&self) -> String {
        let mut out = String::new();
        for node in &self.parsed_nodes {
            let indent = "  ".repeat(node.node_depth.saturating_sub(1));
            let resolved = node
                .resolved
                .map(|id| id.to_string())
                .unwrap_or_else(|| "<unresolved>".to_string());
            let _ = writeln!(out, "{}{} -> {}", indent, node.wire_tag, resolved);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_add_exit() {
        let mut progress = ParseProgress::new();

        progress.enter_tuple_node();
        let outer = progress.add_parsed_node("And");
        progress.enter_tuple_node();
        let inner = progress.add_parsed_node("All");
        assert_eq!(progress.depth(), 2);

        progress.exit_tuple_node(inner, NodeTypeId::All);
        progress.exit_tuple_node(outer, NodeTypeId::And);

        assert_eq!(progress.depth(), 0);
        assert_eq!(progress.tuple_node_count(), 2);
        assert_eq!(progress.parsed_nodes()[1].node_depth, 2);
        assert_eq!(progress.unresolved().count(), 0);
    }

    #[test]
    fn test_trail_marks_unresolved() {
        let mut progress = ParseProgress::new();
        progress.enter_tuple_node();
        progress.add_parsed_node("Or");
        progress.enter_tuple_node();
        progress.add_parsed_node("Bogus");

        let trail = progress.render_trail();
        assert_eq!(trail, "Or -> <unresolved>\n  Bogus -> <unresolved>\n");
        assert_eq!(progress.unresolved().last().map(|n| n.wire_tag.as_str()), Some("Bogus"));
    }
}
