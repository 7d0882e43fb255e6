//! # Storage Layer
//!
//! Configuration files read by depviz.
//!
//! ## Lookup Order
//!
//! | Priority | Location |
//! |----------|----------|
//! | 1 | `--config <path>` (or `$DEPVIZ_CONFIG`) |
//! | 2 | `./depviz.toml` |
//! | 3 | `<user config dir>/depviz/config.toml` |
//!
//! ## Key Types
//!
//! - [`AppConfig`] - Settings for one run, camelCase TOML keys
//! - [`ConfigOverrides`] - Command-line replacements for file values

mod config;

pub use config::{AppConfig, ConfigError, ConfigOverrides, LOCAL_CONFIG_FILE};
