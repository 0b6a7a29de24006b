//! Printing for listkeep commands
//!
//! Every command reports through an [`Output`]: plain lines in text mode, a
//! single JSON document per result in JSON mode. Diagnostics behind
//! `--verbose` go to stderr so JSON on stdout stays parseable.

use serde::Serialize;

use crate::storage::{self, LoadOutcome};

/// How command results are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl From<storage::OutputFormat> for OutputFormat {
    fn from(format: storage::OutputFormat) -> Self {
        match format {
            storage::OutputFormat::Text => OutputFormat::Text,
            storage::OutputFormat::Json => OutputFormat::Json,
        }
    }
}

/// Result printer shared by the to-do, gallery and core commands
pub struct Output {
    format: OutputFormat,
    verbose: bool,
}

impl Output {
    pub fn new(format: OutputFormat, verbose: bool) -> Self {
        Self { format, verbose }
    }

    /// Confirms a mutation, e.g. "Added to-do ..." or "Gallery reset ..."
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Text => println!("{}", message),
            OutputFormat::Json => print_json(&serde_json::json!({
                "success": true,
                "message": message,
            })),
        }
    }

    /// Prints an item, list or summary as JSON; text mode pretty-prints it
    pub fn data<T: Serialize>(&self, data: &T) {
        let rendered = match self.format {
            OutputFormat::Text => serde_json::to_string_pretty(data),
            OutputFormat::Json => serde_json::to_string(data),
        };
        match rendered {
            Ok(json) => println!("{}", json),
            Err(e) => log::warn!("could not render command output: {}", e),
        }
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// `[verbose] ...` on stderr
    pub fn verbose(&self, message: &str) {
        if self.verbose {
            eprintln!("[verbose] {}", message);
        }
    }

    /// `[verbose:{context}] ...` on stderr; context is a command or slot key
    pub fn verbose_ctx(&self, context: &str, message: &str) {
        if self.verbose {
            eprintln!("[verbose:{}] {}", context, message);
        }
    }

    /// Notes whether the store behind `key` was seeded, restored or recovered
    pub fn load_outcome(&self, key: &str, outcome: LoadOutcome) {
        self.verbose_ctx(key, outcome_note(outcome));
    }
}

fn print_json(value: &serde_json::Value) {
    println!("{}", value);
}

fn outcome_note(outcome: LoadOutcome) -> &'static str {
    match outcome {
        LoadOutcome::Fresh => "no saved data, starting from defaults",
        LoadOutcome::Restored => "restored saved data",
        LoadOutcome::Recovered => "saved data was unreadable, starting from defaults",
    }
}
