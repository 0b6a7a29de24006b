//! Durable key-value slots
//!
//! A slot holds one serialized snapshot under a string key. [`FileSlots`]
//! keeps each key in `{dir}/{key}.json` and uses file locking plus
//! temp-file + rename so a reader never sees a half-written snapshot.
//! [`MemorySlots`] is a shared in-process map.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use fs2::FileExt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SlotError {
    #[error("Invalid slot key '{0}'")]
    InvalidKey(String),

    #[error("Failed to read slot '{key}': {source}")]
    Read {
        key: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write slot '{key}': {source}")]
    Write {
        key: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to serialize snapshot for slot '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Key-value storage for serialized snapshots
pub trait Slots {
    /// Returns the raw stored bytes, or `None` if the key was never written
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, SlotError>;

    /// Replaces the payload stored under `key`
    fn write(&self, key: &str, payload: &str) -> Result<(), SlotError>;

    /// Deletes the payload; missing keys are not an error
    fn remove(&self, key: &str) -> Result<(), SlotError>;
}

impl<S: Slots + ?Sized> Slots for &S {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, SlotError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, payload: &str) -> Result<(), SlotError> {
        (**self).write(key, payload)
    }

    fn remove(&self, key: &str) -> Result<(), SlotError> {
        (**self).remove(key)
    }
}

fn check_key(key: &str) -> Result<(), SlotError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(SlotError::InvalidKey(key.to_string()))
    }
}

/// Slots stored as JSON files in a directory
#[derive(Debug, Clone)]
pub struct FileSlots {
    dir: PathBuf,
}

impl FileSlots {
    /// Creates slots rooted at `dir`; the directory is created on first write
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the slot directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the file backing `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl Slots for FileSlots {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, SlotError> {
        check_key(key)?;
        let path = self.path_for(key);
        let read_err = |source| SlotError::Read {
            key: key.to_string(),
            source,
        };

        let mut file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(read_err(e)),
        };

        // Shared lock for reading, released when the file is dropped
        file.lock_shared().map_err(read_err)?;

        // Raw bytes; decoding is left to the store
        let mut payload = Vec::new();
        file.read_to_end(&mut payload).map_err(read_err)?;

        Ok(Some(payload))
    }

    fn write(&self, key: &str, payload: &str) -> Result<(), SlotError> {
        check_key(key)?;
        let write_err = |source| SlotError::Write {
            key: key.to_string(),
            source,
        };

        fs::create_dir_all(&self.dir).map_err(write_err)?;

        let path = self.path_for(key);
        let temp_path = path.with_extension("json.tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .map_err(write_err)?;

            file.lock_exclusive().map_err(write_err)?;

            let mut writer = BufWriter::new(&file);
            writer.write_all(payload.as_bytes()).map_err(write_err)?;
            writer.flush().map_err(write_err)?;
        }

        fs::rename(&temp_path, &path).map_err(write_err)?;

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SlotError> {
        check_key(key)?;
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(SlotError::Write {
                key: key.to_string(),
                source,
            }),
        }
    }
}

/// In-memory slots; clones share the same storage
#[derive(Debug, Clone, Default)]
pub struct MemorySlots {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemorySlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl Slots for MemorySlots {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, SlotError> {
        check_key(key)?;
        Ok(self
            .entries
            .borrow()
            .get(key)
            .map(|payload| payload.clone().into_bytes()))
    }

    fn write(&self, key: &str, payload: &str) -> Result<(), SlotError> {
        check_key(key)?;
        self.entries
            .borrow_mut()
            .insert(key.to_string(), payload.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SlotError> {
        check_key(key)?;
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn read_missing_slot() {
        let dir = TempDir::new().unwrap();
        let slots = FileSlots::new(dir.path());

        assert!(slots.read("todos").unwrap().is_none());
    }

    #[test]
    fn write_and_read_slot() {
        let dir = TempDir::new().unwrap();
        let slots = FileSlots::new(dir.path());

        slots.write("todos", "[1,2,3]").unwrap();

        assert_eq!(slots.read("todos").unwrap().as_deref(), Some(&b"[1,2,3]"[..]));
        assert!(slots.path_for("todos").is_file());
    }

    #[test]
    fn read_returns_raw_bytes() {
        let dir = TempDir::new().unwrap();
        let slots = FileSlots::new(dir.path());
        fs::write(slots.path_for("todos"), [0xff, 0xfe, 0x5b]).unwrap();

        assert_eq!(slots.read("todos").unwrap(), Some(vec![0xff, 0xfe, 0x5b]));
    }

    #[test]
    fn write_replaces_payload() {
        let dir = TempDir::new().unwrap();
        let slots = FileSlots::new(dir.path());

        slots.write("galleryImages", "[\"a\", \"b\"]").unwrap();
        slots.write("galleryImages", "[]").unwrap();

        assert_eq!(slots.read("galleryImages").unwrap().as_deref(), Some(&b"[]"[..]));
    }

    #[test]
    fn keys_are_independent() {
        let dir = TempDir::new().unwrap();
        let slots = FileSlots::new(dir.path());

        slots.write("todos", "[1]").unwrap();
        slots.write("galleryImages", "[2]").unwrap();

        assert_eq!(slots.read("todos").unwrap().as_deref(), Some(&b"[1]"[..]));
        assert_eq!(slots.read("galleryImages").unwrap().as_deref(), Some(&b"[2]"[..]));
    }

    #[test]
    fn creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let slots = FileSlots::new(dir.path().join("nested").join("data"));

        slots.write("todos", "[]").unwrap();

        assert!(slots.dir().is_dir());
    }

    #[test]
    fn atomic_write_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let slots = FileSlots::new(dir.path());

        slots.write("todos", "[]").unwrap();

        let temp_path = slots.path_for("todos").with_extension("json.tmp");
        assert!(!temp_path.exists());
    }

    #[test]
    fn remove_slot() {
        let dir = TempDir::new().unwrap();
        let slots = FileSlots::new(dir.path());

        slots.write("todos", "[]").unwrap();
        slots.remove("todos").unwrap();
        slots.remove("todos").unwrap();

        assert!(slots.read("todos").unwrap().is_none());
    }

    #[test]
    fn rejects_path_like_keys() {
        let dir = TempDir::new().unwrap();
        let slots = FileSlots::new(dir.path());

        assert!(matches!(slots.write("../escape", "[]"), Err(SlotError::InvalidKey(_))));
        assert!(matches!(slots.read(""), Err(SlotError::InvalidKey(_))));
    }

    #[test]
    fn memory_slots_share_storage_between_clones() {
        let slots = MemorySlots::new();
        let other = slots.clone();

        slots.write("todos", "[]").unwrap();

        assert_eq!(other.read("todos").unwrap().as_deref(), Some(&b"[]"[..]));
        assert_eq!(other.len(), 1);

        other.remove("todos").unwrap();
        assert!(slots.is_empty());
    }
}
