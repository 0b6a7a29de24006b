//! listkeep - A local-first to-do list and image gallery keeper
//!
//! Each list lives in a [`storage::PersistentListStore`]: an ordered
//! collection that owns its items, validates every mutation and mirrors
//! itself to a durable slot so it survives restarts. The CLI and TUI are
//! thin layers on top of the stores.

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{GalleryImage, ItemId, ListItem, Priority, Todo};
pub use storage::{PersistentListStore, StoreError};
