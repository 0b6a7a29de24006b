//! Interactive TUI for listkeep
//!
//! Provides a terminal-based interface for working through the to-do
//! list and browsing the image gallery using ratatui.

mod app;
mod event;
mod ui;
mod utils;
mod views;

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::str::FromStr;

use anyhow::{anyhow, Result};

use crate::storage::Project;
use app::App;
use event::EventHandler;

/// View mode for the TUI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Todos,
    Gallery,
}

impl ViewMode {
    fn toggle(self) -> Self {
        match self {
            ViewMode::Todos => ViewMode::Gallery,
            ViewMode::Gallery => ViewMode::Todos,
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewMode::Todos => f.pad("todos"),
            ViewMode::Gallery => f.pad("gallery"),
        }
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "todos" | "todo" | "t" | "1" => Ok(ViewMode::Todos),
            "gallery" | "g" | "2" => Ok(ViewMode::Gallery),
            other => Err(format!("unknown view '{}' (expected todos or gallery)", other)),
        }
    }
}

/// Launch the TUI
pub fn run(project: Project, view_mode: ViewMode) -> Result<()> {
    log::debug!("starting TUI in {} view at {}", view_mode, project.root().display());

    // Open the stores before touching the terminal so errors print normally
    let mut app = App::new(project, view_mode)?;

    let mut terminal = ui::init_terminal()?;
    let event_handler = EventHandler::new(250);

    // Run the main loop with panic safety
    let result = panic::catch_unwind(AssertUnwindSafe(|| app.run(&mut terminal, event_handler)));

    // Always restore terminal, even on panic
    let restore_result = ui::restore_terminal();

    match result {
        Ok(inner_result) => {
            restore_result?;
            inner_result
        }
        Err(panic_payload) => {
            let _ = restore_result;
            if let Some(s) = panic_payload.downcast_ref::<&str>() {
                Err(anyhow!("TUI panicked: {}", s))
            } else if let Some(s) = panic_payload.downcast_ref::<String>() {
                Err(anyhow!("TUI panicked: {}", s))
            } else {
                Err(anyhow!("TUI panicked with unknown error"))
            }
        }
    }
}
