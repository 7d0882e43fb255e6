//! # Registry Lookups
//!
//! Fetches declared dependencies from a package registry and expands them
//! into a bounded-depth tree.
//!
//! ## Failure Model
//!
//! A lookup never fails from the caller's point of view. Transport errors,
//! non-2xx responses and malformed bodies are logged and the package is
//! treated as having no dependencies, so one bad node never aborts the rest
//! of the resolution.
//!
//! ## Key Types
//!
//! - [`Registry`] - One lookup per package name
//! - [`HttpRegistry`] - `GET {base}/{package}/latest` over HTTP(S)
//! - [`Resolver`] - Recursive, strictly sequential tree construction

mod client;
mod resolver;

use serde_json::{Map, Value};

pub use client::{HttpRegistry, RegistryError, RegistryOptions};
pub use resolver::{ResolveOptions, Resolver};

/// Declared dependencies of one package: name to opaque metadata,
/// in the order the registry listed them
pub type DeclaredDependencies = Map<String, Value>;

/// A source of declared dependencies
///
/// Implementations must not surface errors: a failed lookup yields an empty
/// map and is reported through logging.
#[allow(async_fn_in_trait)]
pub trait Registry {
    async fn declared_dependencies(&self, package: &str) -> DeclaredDependencies;
}

impl<R: Registry + ?Sized> Registry for &R {
    async fn declared_dependencies(&self, package: &str) -> DeclaredDependencies {
        (**self).declared_dependencies(package).await
    }
}
