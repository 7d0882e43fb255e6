//! Graph-source text for dependency trees
//!
//! Flattens a resolved tree into a Graphviz `digraph`. The walk is pre-order:
//! a node's own edge is written, then every edge below it, before its next
//! sibling is visited.
//!
//! Package names are written verbatim. A name containing `"` produces text
//! Graphviz will reject.

use std::fmt::{self, Write};

use super::node::DependencyNode;

/// A complete directed-graph description, named after the root package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphText {
    name: String,
    text: String,
}

impl GraphText {
    /// Graph name (the root package)
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Number of edge lines in the graph
    pub fn edge_count(&self) -> usize {
        self.text.lines().filter(|line| line.contains(" -> ")).count()
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Display for GraphText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for GraphText {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// Serializes `root_dependencies` as edges hanging off `root_name`
pub fn serialize(root_dependencies: &[DependencyNode], root_name: &str) -> GraphText {
    let mut text = String::with_capacity(64 + root_dependencies.len() * 32);
    let _ = writeln!(text, "digraph {root_name} {{");
    write_edges(&mut text, root_name, root_dependencies);
    text.push_str("}\n");

    GraphText {
        name: root_name.to_string(),
        text,
    }
}

fn write_edges(out: &mut String, parent: &str, children: &[DependencyNode]) {
    for child in children {
        let _ = writeln!(out, "  \"{}\" -> \"{}\";", parent, child.name);
        write_edges(out, &child.name, &child.dependencies);
    }
}
