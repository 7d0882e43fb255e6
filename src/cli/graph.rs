//! Resolve-and-render commands

use anyhow::{Context, Result};
use serde_json::json;

use super::output::Output;
use crate::domain::{count_nodes, serialize, tree_depth, unique_names, DependencyNode};
use crate::registry::{HttpRegistry, Resolver};
use crate::render::{RenderArtifacts, RenderPipeline, SystemShell};
use crate::storage::AppConfig;

/// Resolves the configured package against the configured registry
async fn resolve(config: &AppConfig, output: &Output) -> Result<Vec<DependencyNode>> {
    let registry = HttpRegistry::with_options(&config.repository_url, config.registry_options())
        .context("Failed to set up registry client")?;

    output.verbose_ctx(
        "resolve",
        &format!(
            "Resolving {} from {} (max depth {})",
            config.package_name, config.repository_url, config.max_depth
        ),
    );

    let resolver = Resolver::new(registry, config.resolve_options());
    Ok(resolver.resolve_root(&config.package_name).await)
}

/// Reports an empty resolution; returns true if there is nothing to do
fn nothing_resolved(config: &AppConfig, tree: &[DependencyNode], output: &Output) -> bool {
    if !tree.is_empty() {
        return false;
    }

    output.success(&format!(
        "No dependencies found or resolution failed for {}",
        config.package_name
    ));
    true
}

/// Full run: resolve, write `.dot`, render `.svg` and `.png`
pub async fn run(config: &AppConfig, output: &Output) -> Result<()> {
    let tree = resolve(config, output).await?;
    if nothing_resolved(config, &tree, output) {
        return Ok(());
    }

    let graph = serialize(&tree, &config.package_name);
    output.verbose_ctx(
        "serialize",
        &format!("{} edges in graph {}", graph.edge_count(), graph.name()),
    );

    let artifacts = RenderArtifacts::from_output_path(&config.output_file_path);
    let pipeline = RenderPipeline::new(SystemShell)
        .with_visualizer(&config.visualizer_path)
        .with_rasterizer(&config.rasterizer_path);

    let report = pipeline
        .render_to(&graph, artifacts)
        .await
        .with_context(|| format!("Failed to render dependency graph for {}", config.package_name))?;

    let unique = unique_names(&tree);
    let raster_error = report.raster_error.as_ref().map(|err| err.to_string());

    if output.is_json() {
        output.data(&json!({
            "package": config.package_name,
            "dependencies": count_nodes(&tree),
            "uniquePackages": unique.len(),
            "depth": tree_depth(&tree),
            "artifacts": report.artifacts,
            "rasterError": raster_error,
        }));
        return Ok(());
    }

    output.line(&format!(
        "Resolved {} dependencies ({} unique packages) for {}",
        count_nodes(&tree),
        unique.len(),
        config.package_name
    ));
    output.line(&format!("Wrote {}", report.artifacts.source.display()));
    output.line(&format!("Rendered {}", report.artifacts.vector.display()));
    match raster_error {
        None => output.line(&format!("Rendered {}", report.artifacts.raster.display())),
        Some(message) => output.warning(&message),
    }

    Ok(())
}

/// Resolve only, printing the tree
pub async fn tree(config: &AppConfig, output: &Output) -> Result<()> {
    let tree = resolve(config, output).await?;
    if nothing_resolved(config, &tree, output) {
        return Ok(());
    }

    if output.is_json() {
        output.data(&json!({
            "package": config.package_name,
            "dependencies": tree,
        }));
        return Ok(());
    }

    output.line(&config.package_name);
    print_nodes(output, &tree, 1);
    Ok(())
}

fn print_nodes(output: &Output, nodes: &[DependencyNode], indent: usize) {
    for node in nodes {
        output.line(&format!("{}{}", "  ".repeat(indent), node.name));
        print_nodes(output, &node.dependencies, indent + 1);
    }
}

/// Resolve and print the graph source to stdout
pub async fn dot(config: &AppConfig, output: &Output) -> Result<()> {
    let tree = resolve(config, output).await?;
    if nothing_resolved(config, &tree, output) {
        return Ok(());
    }

    let graph = serialize(&tree, &config.package_name);

    if output.is_json() {
        output.data(&json!({
            "graph": graph.name(),
            "edges": graph.edge_count(),
            "dot": graph.as_str(),
        }));
    } else {
        print!("{}", graph);
    }

    Ok(())
}
