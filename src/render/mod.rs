//! # Rendering
//!
//! Turns graph-source text into files on disk via external tools.
//!
//! ## Artifacts
//!
//! | Step | Output | Produced by |
//! |------|--------|-------------|
//! | 1 | `{base}.dot` | written directly |
//! | 2 | `{base}.svg` | `{visualizer} -Tsvg {base}.dot -o {base}.svg` |
//! | 3 | `{base}.png` | `{rasterizer} {base}.svg {base}.png` |
//!
//! Each step runs only after the previous one succeeded. The tool paths are
//! substituted into the shell command line as-is; nothing checks that they
//! exist beforehand.
//!
//! ## Key Types
//!
//! - [`RenderPipeline`] - Runs the three steps
//! - [`Shell`] - Seam for command execution ([`SystemShell`] in production)
//! - [`RenderArtifacts`] - The derived file paths

mod pipeline;
mod shell;

pub use pipeline::{
    RenderArtifacts, RenderError, RenderPipeline, RenderReport, RenderStep, DEFAULT_RASTERIZER,
    DEFAULT_VISUALIZER,
};
pub use shell::{Shell, ShellOutput, SystemShell};
