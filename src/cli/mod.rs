//! # Command-Line Interface
//!
//! User-facing commands and output formatting.
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `run` (default) | Resolve, write `.dot`, render `.svg` and `.png` |
//! | `tree` | Resolve and print the dependency tree |
//! | `dot` | Resolve and print the graph source to stdout |
//!
//! ## Output Formats
//!
//! All commands support the `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Verbose Mode
//!
//! `-v` enables progress messages and `info` logging, `-vv` adds `debug`
//! logging of every registry lookup and shell command. `RUST_LOG` takes
//! precedence when set:
//! ```bash
//! depviz -vv --config depviz.toml
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod graph;
mod output;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
