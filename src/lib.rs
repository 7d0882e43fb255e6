//! depviz - Dependency tree resolution and Graphviz rendering
//!
//! Resolves a package's transitive dependencies from a registry up to a
//! depth bound, writes them as a Graphviz `digraph`, and converts that into
//! SVG and PNG images with external tools.

pub mod domain;
pub mod registry;
pub mod render;
pub mod storage;
pub mod cli;

pub use domain::{serialize, DependencyNode, GraphText};
pub use registry::{HttpRegistry, Registry, Resolver, ResolveOptions};
pub use render::{RenderArtifacts, RenderPipeline, SystemShell};
