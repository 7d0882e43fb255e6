//! Bounded-depth dependency resolution
//!
//! Expands a package into its transitive dependency tree, one registry
//! lookup at a time. A child's subtree is fully resolved before its next
//! sibling is looked up.

use futures::future::{FutureExt, LocalBoxFuture};
use tracing::debug;

use super::Registry;
use crate::domain::DependencyNode;

/// Knobs for one resolution run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Deepest level whose dependencies are still looked up (root = 1)
    pub max_depth: u32,

    /// Stop at packages already on the current root-to-node path
    pub cycle_guard: bool,
}

impl ResolveOptions {
    pub fn new(max_depth: u32) -> Self {
        Self {
            max_depth,
            cycle_guard: false,
        }
    }

    pub fn with_cycle_guard(mut self, enabled: bool) -> Self {
        self.cycle_guard = enabled;
        self
    }
}

/// Recursive resolver over any [`Registry`]
#[derive(Debug)]
pub struct Resolver<R> {
    registry: R,
    options: ResolveOptions,
}

impl<R: Registry> Resolver<R> {
    pub fn new(registry: R, options: ResolveOptions) -> Self {
        Self { registry, options }
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn options(&self) -> ResolveOptions {
        self.options
    }

    /// Resolves the dependencies of a root package (depth 1)
    pub async fn resolve_root(&self, package: &str) -> Vec<DependencyNode> {
        self.resolve(package, 1).await
    }

    /// Resolves the dependencies of `package` as seen at `current_depth`
    ///
    /// Returns an empty sequence without contacting the registry once
    /// `current_depth` exceeds the configured maximum. An empty result is
    /// also what a failed lookup looks like; the two are not distinguished.
    pub async fn resolve(&self, package: &str, current_depth: u32) -> Vec<DependencyNode> {
        self.resolve_on_path(package, current_depth, &[]).await
    }

    fn resolve_on_path<'a>(
        &'a self,
        package: &'a str,
        depth: u32,
        ancestors: &'a [String],
    ) -> LocalBoxFuture<'a, Vec<DependencyNode>> {
        async move {
            if depth > self.options.max_depth {
                return Vec::new();
            }

            debug!(package, depth, "resolving dependencies");
            let declared = self.registry.declared_dependencies(package).await;

            let mut path = Vec::with_capacity(ancestors.len() + 1);
            path.extend_from_slice(ancestors);
            path.push(package.to_string());

            let mut nodes = Vec::with_capacity(declared.len());
            for name in declared.keys() {
                if self.options.cycle_guard && path.iter().any(|seen| seen == name) {
                    debug!(package = %name, depth = depth + 1, "already on path, not expanding");
                    nodes.push(DependencyNode::leaf(name.as_str()));
                    continue;
                }

                let dependencies = self.resolve_on_path(name, depth + 1, &path).await;
                nodes.push(DependencyNode::with_dependencies(name.as_str(), dependencies));
            }

            nodes
        }
        .boxed_local()
    }
}
