//! # Storage Layer
//!
//! Persistence layer for listkeep.
//!
//! ## Storage Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | To-dos | JSON array | `.listkeep/data/todos.json` |
//! | Gallery images | JSON array | `.listkeep/data/galleryImages.json` |
//! | Config | TOML | `.listkeep/config.toml` |
//!
//! ## Consistency
//!
//! - [`PersistentListStore`] writes the full snapshot on every mutation and
//!   commits in memory only after the write succeeded
//! - [`FileSlots`] uses file locking (`fs2`) and atomic writes (temp file + rename)
//! - Unreadable snapshots are replaced by the seed, never surfaced as errors
//!
//! ## Key Types
//!
//! - [`Project`] - Entry point for accessing a listkeep project
//! - [`PersistentListStore`] - Owner of one ordered, persisted collection
//! - [`Slots`] - Durable key-value storage for snapshots
//! - [`Config`] - Project and global configuration

mod slot;
mod store;
mod config;
mod project;

use crate::domain::{GalleryImage, Todo};

pub use slot::{FileSlots, MemorySlots, SlotError, Slots};
pub use store::{LoadOutcome, PersistentListStore, StoreError};
pub use config::{
    Config, ConfigError, GalleryConfig, GlobalConfig, OutputFormat, ProjectConfig, TodoConfig,
    CONFIG_DIR_ENV, PROJECT_DIR,
};
pub use project::{Project, ProjectError};

/// To-do store backed by project files
pub type TodoStore = PersistentListStore<Todo, FileSlots>;

/// Gallery store backed by project files
pub type GalleryStore = PersistentListStore<GalleryImage, FileSlots>;
