//! # Command-Line Interface
//!
//! User-facing CLI commands and output formatting.
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `render` | Write a DOT, Mermaid or JSON diagram |
//! | `resources` | List extracted resources and their dependencies |
//! | `check` | Report skipped or malformed declarations |
//! | `order` | Provisioning order, dependencies first |
//! | `categories` | The effective type-to-category table |
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! Diagnostics always go to stderr so rendered diagrams on stdout stay clean.
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output:
//! ```bash
//! infragraph --verbose render main.tf
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod pipeline;
mod render_cmd;
mod inspect;

pub use app::{Cli, Commands, run};
pub use output::{Output, OutputFormat};
