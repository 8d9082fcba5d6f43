//! # Storage Layer
//!
//! Everything that touches the filesystem: reading declaration documents
//! and loading configuration.
//!
//! ## Input Formats
//!
//! | Extension | Format | Parser |
//! |-----------|--------|--------|
//! | `.tf` (default) | HCL | `hcl-rs` |
//! | `.json`, `.tf.json` | Terraform JSON | `serde_json` |
//! | `.yaml`, `.yml` | YAML | `serde_yaml` |
//!
//! ## Configuration
//!
//! | Scope | Location |
//! |-------|----------|
//! | Project | `infragraph.toml` in the current directory or a parent |
//! | Global | `<config dir>/infragraph/config.toml` |
//! | Explicit | `--config <path>` (replaces the project lookup) |
//!
//! ## Key Types
//!
//! - [`parse_document`] / [`load_document`] - text to declaration value
//! - [`ParseError`] - the one fatal input error
//! - [`Config`] - effective configuration

mod document;
mod config;

pub use document::{load_document, parse_document, DocumentFormat, ParseError};
pub use config::{Config, ConfigError, ConfigFile, DEFAULT_TITLE, PROJECT_CONFIG_FILE};
