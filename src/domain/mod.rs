//! Domain models for depviz
//!
//! The dependency tree and its graph-source text. No I/O happens here.

mod dot;
mod node;

pub use dot::{serialize, GraphText};
pub use node::{count_nodes, tree_depth, unique_names, DependencyNode};
