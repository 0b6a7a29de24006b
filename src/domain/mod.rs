//! Domain models for listkeep
//!
//! Contains the list kinds and their queries without any I/O concerns.

mod id;
mod item;
mod todo;
mod image;
mod selection;

pub use id::{IdError, IdSequence, ItemId};
pub use item::{ItemQuery, ListItem, ValidationError};
pub use todo::{Priority, StatusFilter, Todo, TodoDraft, TodoField, TodoPatch, TodoQuery, TodoSort, TodoStats};
pub use image::{
    categories_of, sample_images, GalleryImage, ImageDraft, ImageField, ImagePatch, ImageQuery,
    ImageSort, CATEGORIES, DEFAULT_CATEGORY,
};
pub use selection::Selection;
