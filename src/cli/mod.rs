//! # Command-Line Interface
//!
//! User-facing CLI commands and output formatting.
//!
//! ## Command Groups
//!
//! | Group | Purpose | Examples |
//! |-------|---------|----------|
//! | Core | Project management | `init`, `status` |
//! | Todo | To-do list | `todo add`, `todo toggle`, `todo clear-completed` |
//! | Gallery | Image gallery | `gallery add`, `gallery like`, `gallery list --search` |
//! | TUI | Interactive views | `tui`, `tui --view gallery` |
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! The default can be changed with `default_format` in the global config.
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output. It also raises the log
//! filter to `debug` unless `RUST_LOG` is set:
//! ```bash
//! listkeep --verbose todo list
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod gallery;
mod output;
mod todo;
mod tui;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
pub use tui::ViewMode;
