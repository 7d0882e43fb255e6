//! Graph-source persistence and image conversion
//!
//! Rendering is three gated steps:
//!
//! 1. write `{base}.dot`
//! 2. `{visualizer} -Tsvg {base}.dot -o {base}.svg`
//! 3. `{rasterizer} {base}.svg {base}.png`
//!
//! A failure in step 1 or 2 stops the pipeline and is returned. Step 3 is
//! terminal: its failure is logged and recorded in the report, and the
//! files from the earlier steps stay on disk.

use std::ffi::OsString;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, error, info};

use super::shell::Shell;
use crate::domain::GraphText;

/// Default Graphviz executable
pub const DEFAULT_VISUALIZER: &str = "dot";

/// Default SVG to PNG converter (ImageMagick)
pub const DEFAULT_RASTERIZER: &str = "convert";

/// The external conversion steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStep {
    Vector,
    Raster,
}

impl fmt::Display for RenderStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderStep::Vector => f.write_str("vector conversion"),
            RenderStep::Raster => f.write_str("raster conversion"),
        }
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to write graph source {}: {source}", path.display())]
    WriteSource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{step} failed (`{command}`): {message}")]
    Tool {
        step: RenderStep,
        command: String,
        message: String,
    },
}

/// Paths produced by one render, all sharing a base name
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct RenderArtifacts {
    pub source: PathBuf,
    pub vector: PathBuf,
    pub raster: PathBuf,
}

impl RenderArtifacts {
    /// Derives `{base}.dot`, `{base}.svg` and `{base}.png`
    pub fn from_base(base: impl AsRef<Path>) -> Self {
        let base = base.as_ref();
        Self {
            source: with_suffix(base, ".dot"),
            vector: with_suffix(base, ".svg"),
            raster: with_suffix(base, ".png"),
        }
    }

    /// Derives artifacts from a configured output file, dropping its extension
    pub fn from_output_path(path: impl AsRef<Path>) -> Self {
        Self::from_base(path.as_ref().with_extension(""))
    }
}

fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(base.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// Result of a render that got past the vector step
#[derive(Debug)]
pub struct RenderReport {
    pub artifacts: RenderArtifacts,

    /// Set when the terminal raster step failed
    pub raster_error: Option<RenderError>,
}

impl RenderReport {
    /// True when all three artifacts were produced
    pub fn is_complete(&self) -> bool {
        self.raster_error.is_none()
    }
}

/// Writes graph text and drives the external converters
#[derive(Debug, Clone)]
pub struct RenderPipeline<S> {
    shell: S,
    visualizer: String,
    rasterizer: String,
}

impl<S: Shell> RenderPipeline<S> {
    pub fn new(shell: S) -> Self {
        Self {
            shell,
            visualizer: DEFAULT_VISUALIZER.to_string(),
            rasterizer: DEFAULT_RASTERIZER.to_string(),
        }
    }

    /// Uses `visualizer` verbatim as the Graphviz executable
    pub fn with_visualizer(mut self, visualizer: impl Into<String>) -> Self {
        self.visualizer = visualizer.into();
        self
    }

    /// Uses `rasterizer` verbatim as the SVG to PNG converter
    pub fn with_rasterizer(mut self, rasterizer: impl Into<String>) -> Self {
        self.rasterizer = rasterizer.into();
        self
    }

    pub fn shell(&self) -> &S {
        &self.shell
    }

    /// Command line for the SVG step
    pub fn vector_command(&self, artifacts: &RenderArtifacts) -> String {
        format!(
            "{} -Tsvg {} -o {}",
            self.visualizer,
            artifacts.source.display(),
            artifacts.vector.display()
        )
    }

    /// Command line for the PNG step
    pub fn raster_command(&self, artifacts: &RenderArtifacts) -> String {
        format!(
            "{} {} {}",
            self.rasterizer,
            artifacts.vector.display(),
            artifacts.raster.display()
        )
    }

    /// Writes `graph` to `{base}.dot` and converts it to SVG, then PNG
    pub async fn render(
        &self,
        graph: &GraphText,
        base: impl AsRef<Path>,
    ) -> Result<RenderReport, RenderError> {
        self.render_to(graph, RenderArtifacts::from_base(base)).await
    }

    /// Same as [`render`](Self::render) with precomputed artifact paths
    pub async fn render_to(
        &self,
        graph: &GraphText,
        artifacts: RenderArtifacts,
    ) -> Result<RenderReport, RenderError> {
        tokio::fs::write(&artifacts.source, graph.as_str())
            .await
            .map_err(|source| RenderError::WriteSource {
                path: artifacts.source.clone(),
                source,
            })?;
        info!(path = %artifacts.source.display(), "wrote graph source");

        let command = self.vector_command(&artifacts);
        self.run_step(RenderStep::Vector, &command).await?;
        info!(path = %artifacts.vector.display(), "rendered vector image");

        let command = self.raster_command(&artifacts);
        let raster_error = match self.run_step(RenderStep::Raster, &command).await {
            Ok(()) => {
                info!(path = %artifacts.raster.display(), "rendered raster image");
                None
            }
            Err(err) => {
                error!(error = %err, "raster conversion failed");
                Some(err)
            }
        };

        Ok(RenderReport {
            artifacts,
            raster_error,
        })
    }

    async fn run_step(&self, step: RenderStep, command: &str) -> Result<(), RenderError> {
        debug!(%step, command, "running conversion");

        let tool_error = |message: String| RenderError::Tool {
            step,
            command: command.to_string(),
            message,
        };

        let output = self
            .shell
            .run(command)
            .await
            .map_err(|err| tool_error(err.to_string()))?;

        match output.failure_message() {
            Some(message) => Err(tool_error(message)),
            None => Ok(()),
        }
    }
}
