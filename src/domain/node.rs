//! Dependency tree nodes
//!
//! A resolved tree is a plain owned structure: every node owns its children,
//! and the same package name may appear any number of times when it is
//! reached through different parents.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// One resolved occurrence of a package in the dependency tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyNode {
    /// Package name, exactly as declared by the parent
    pub name: String,

    /// Declared dependencies in registry order
    #[serde(default)]
    pub dependencies: Vec<DependencyNode>,
}

impl DependencyNode {
    /// Creates a node without dependencies
    pub fn leaf(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dependencies: Vec::new(),
        }
    }

    /// Creates a node with the given dependencies
    pub fn with_dependencies(name: impl Into<String>, dependencies: Vec<DependencyNode>) -> Self {
        Self {
            name: name.into(),
            dependencies,
        }
    }

    /// Returns true if the node has no dependencies
    pub fn is_leaf(&self) -> bool {
        self.dependencies.is_empty()
    }

    /// Depth of the subtree rooted here (a leaf has depth 1)
    pub fn depth(&self) -> usize {
        1 + tree_depth(&self.dependencies)
    }

    /// Number of nodes in the subtree rooted here, including this one
    pub fn node_count(&self) -> usize {
        1 + count_nodes(&self.dependencies)
    }
}

/// Depth of a root sequence; 0 when empty
pub fn tree_depth(nodes: &[DependencyNode]) -> usize {
    nodes.iter().map(DependencyNode::depth).max().unwrap_or(0)
}

/// Total number of nodes in a root sequence
pub fn count_nodes(nodes: &[DependencyNode]) -> usize {
    nodes.iter().map(DependencyNode::node_count).sum()
}

/// Distinct package names anywhere in the tree, sorted
pub fn unique_names(nodes: &[DependencyNode]) -> Vec<String> {
    fn collect<'a>(nodes: &'a [DependencyNode], names: &mut BTreeSet<&'a str>) {
        for node in nodes {
            names.insert(&node.name);
            collect(&node.dependencies, names);
        }
    }

    let mut names = BTreeSet::new();
    collect(nodes, &mut names);
    names.into_iter().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<DependencyNode> {
        vec![
            DependencyNode::with_dependencies(
                "a",
                vec![DependencyNode::with_dependencies(
                    "b",
                    vec![DependencyNode::leaf("c")],
                )],
            ),
            DependencyNode::with_dependencies("b", vec![DependencyNode::leaf("c")]),
        ]
    }

    #[test]
    fn leaf_has_depth_one() {
        let node = DependencyNode::leaf("left-pad");
        assert!(node.is_leaf());
        assert_eq!(node.depth(), 1);
        assert_eq!(node.node_count(), 1);
    }

    #[test]
    fn tree_depth_and_count() {
        let tree = sample();
        assert_eq!(tree_depth(&tree), 3);
        assert_eq!(count_nodes(&tree), 5);
        assert_eq!(tree_depth(&[]), 0);
    }

    #[test]
    fn unique_names_collapses_duplicates() {
        assert_eq!(unique_names(&sample()), vec!["a", "b", "c"]);
    }

    #[test]
    fn json_shape() {
        let node = DependencyNode::with_dependencies("dep1", vec![DependencyNode::leaf("dep2")]);
        let json = serde_json::to_value(&node).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "name": "dep1",
                "dependencies": [{ "name": "dep2", "dependencies": [] }]
            })
        );
    }
}
