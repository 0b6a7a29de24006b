//! Project management
//!
//! Handles project initialization and opens the list stores.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use super::config::PROJECT_DIR;
use super::{Config, FileSlots, GalleryStore, TodoStore};
use crate::domain::{GalleryImage, ListItem};

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Not in a listkeep project. Run 'listkeep init' first.")]
    NotInProject,
}

const DEFAULT_CONFIG: &str = r#"# listkeep configuration

[todos]
# Sort for 'listkeep todo list': date, priority or alphabetical
default_sort = "date"
# Priority for new to-dos: low, medium or high
default_priority = "medium"

[gallery]
# Fill an empty gallery with sample images on first use
seed_on_first_run = true
# Sort for 'listkeep gallery list': date, title or likes
default_sort = "date"
default_category = "nature"
"#;

/// A listkeep project
pub struct Project {
    root: PathBuf,
    config: Config,
}

impl Project {
    /// Opens an existing project at the given path
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();

        if !root.join(PROJECT_DIR).is_dir() {
            return Err(ProjectError::NotInProject.into());
        }

        let config = Config::for_project(&root)?;

        Ok(Self { root, config })
    }

    /// Opens the project at the current directory or a parent
    pub fn open_current() -> Result<Self> {
        let root = Config::find_project_root().ok_or(ProjectError::NotInProject)?;

        Self::open(root)
    }

    /// Initializes a new project at the given path
    pub fn init(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let project_dir = root.join(PROJECT_DIR);

        let data_dir = project_dir.join("data");
        fs::create_dir_all(&data_dir).with_context(|| {
            format!("Failed to create data directory: {}", data_dir.display())
        })?;

        let config_path = project_dir.join("config.toml");
        if !config_path.exists() {
            fs::write(&config_path, DEFAULT_CONFIG)
                .with_context(|| format!("Failed to write config: {}", config_path.display()))?;
        }

        Self::open(root)
    }

    /// Returns the project root path
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the .listkeep directory path
    pub fn project_dir(&self) -> PathBuf {
        self.root.join(PROJECT_DIR)
    }

    /// Returns the directory holding the list snapshots
    pub fn data_dir(&self) -> PathBuf {
        self.project_dir().join("data")
    }

    /// Returns the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the durable slots of this project
    pub fn slots(&self) -> FileSlots {
        FileSlots::new(self.data_dir())
    }

    /// Opens the to-do store
    pub fn todo_store(&self) -> Result<TodoStore> {
        TodoStore::load(self.slots()).context("Failed to open to-do store")
    }

    /// Opens the gallery store, seeding first runs when configured
    pub fn gallery_store(&self) -> Result<GalleryStore> {
        let seed = if self.config.project.gallery.seed_on_first_run {
            GalleryImage::seed()
        } else {
            Vec::new()
        };
        GalleryStore::load_with_seed(self.slots(), seed).context("Failed to open gallery store")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TodoDraft;
    use tempfile::TempDir;

    #[test]
    fn init_creates_structure() {
        let dir = TempDir::new().unwrap();
        let project = Project::init(dir.path()).unwrap();

        assert!(project.project_dir().is_dir());
        assert!(project.data_dir().is_dir());
        assert!(project.project_dir().join("config.toml").is_file());
    }

    #[test]
    fn default_config_file_parses() {
        let dir = TempDir::new().unwrap();
        let project = Project::init(dir.path()).unwrap();

        assert!(project.config().project.gallery.seed_on_first_run);
        assert!(project.config().is_in_project());
    }

    #[test]
    fn init_is_idempotent() {
        let dir = TempDir::new().unwrap();

        Project::init(dir.path()).unwrap();
        Project::init(dir.path()).unwrap();

        assert!(dir.path().join(PROJECT_DIR).is_dir());
    }

    #[test]
    fn open_existing_project() {
        let dir = TempDir::new().unwrap();
        Project::init(dir.path()).unwrap();

        let project = Project::open(dir.path()).unwrap();
        assert_eq!(project.root(), dir.path());
    }

    #[test]
    fn open_non_project_fails() {
        let dir = TempDir::new().unwrap();
        let result = Project::open(dir.path());

        assert!(result.is_err());
    }

    #[test]
    fn stores_persist_under_data_dir() {
        let dir = TempDir::new().unwrap();
        let project = Project::init(dir.path()).unwrap();

        let mut todos = project.todo_store().unwrap();
        todos.add(TodoDraft::new("Water plants")).unwrap();

        assert!(project.data_dir().join("todos.json").is_file());
        assert_eq!(project.todo_store().unwrap().len(), 1);
    }

    #[test]
    fn gallery_seed_can_be_disabled() {
        let dir = TempDir::new().unwrap();
        Project::init(dir.path()).unwrap();
        fs::write(
            dir.path().join(PROJECT_DIR).join("config.toml"),
            "[gallery]\nseed_on_first_run = false\n",
        )
        .unwrap();

        let project = Project::open(dir.path()).unwrap();
        assert!(project.gallery_store().unwrap().is_empty());
    }
}
