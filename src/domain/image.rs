//! Gallery image domain model
//!
//! Images are URL references with a title, description, category and a
//! like counter. The `galleryImages` slot stores them with an `addedAt`
//! timestamp. First runs are seeded with six sample images.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::id::ItemId;
use super::item::{
    by_created_desc, by_text, contains_ignore_case, required, ItemQuery, ListItem, ValidationError,
};

/// Category assigned when a draft leaves it empty
pub const DEFAULT_CATEGORY: &str = "nature";

/// Categories offered when adding an image
pub const CATEGORIES: [&str; 5] = ["nature", "architecture", "art", "photography", "design"];

const PLACEHOLDER_URL: &str = "/placeholder.svg?height=300&width=400";

/// An image in the gallery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImage {
    pub id: ItemId,

    pub url: String,

    pub title: String,

    #[serde(default)]
    pub description: String,

    pub category: String,

    #[serde(default)]
    pub likes: u64,

    pub added_at: DateTime<Utc>,
}

/// Fields for a new image
#[derive(Debug, Clone, Default)]
pub struct ImageDraft {
    pub url: String,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
}

impl ImageDraft {
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            description: None,
            category: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// Partial update of an image
#[derive(Debug, Clone, Default)]
pub struct ImagePatch {
    pub url: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
}

impl ImagePatch {
    pub fn is_empty(&self) -> bool {
        self.url.is_none()
            && self.title.is_none()
            && self.description.is_none()
            && self.category.is_none()
    }
}

/// Countable image fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageField {
    Likes,
}

fn normalize_category(category: Option<&str>) -> String {
    category
        .map(|c| c.trim().to_lowercase())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string())
}

impl ListItem for GalleryImage {
    type Draft = ImageDraft;
    type Patch = ImagePatch;
    type Field = ImageField;

    const SLOT_KEY: &'static str = "galleryImages";

    fn id(&self) -> ItemId {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.added_at
    }

    fn create(
        id: ItemId,
        created_at: DateTime<Utc>,
        draft: ImageDraft,
    ) -> Result<Self, ValidationError> {
        let url = required("url", &draft.url)?;
        let title = required("title", &draft.title)?;

        Ok(Self {
            id,
            url,
            title,
            description: draft.description.map(|d| d.trim().to_string()).unwrap_or_default(),
            category: normalize_category(draft.category.as_deref()),
            likes: 0,
            added_at: created_at,
        })
    }

    fn patched(&self, patch: ImagePatch) -> Result<Self, ValidationError> {
        let mut next = self.clone();
        if let Some(url) = patch.url {
            next.url = required("url", &url)?;
        }
        if let Some(title) = patch.title {
            next.title = required("title", &title)?;
        }
        if let Some(description) = patch.description {
            next.description = description.trim().to_string();
        }
        if let Some(category) = patch.category {
            next.category = normalize_category(Some(&category));
        }
        Ok(next)
    }

    fn bump(&mut self, field: ImageField) {
        match field {
            ImageField::Likes => self.likes = self.likes.saturating_add(1),
        }
    }

    fn seed() -> Vec<Self> {
        sample_images()
    }
}

fn sample(
    id: u64,
    title: &str,
    description: &str,
    category: &str,
    likes: u64,
    (year, month, day): (i32, u32, u32),
) -> GalleryImage {
    let added_at = NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or_default();

    GalleryImage {
        id: ItemId::new(id),
        url: PLACEHOLDER_URL.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        likes,
        added_at,
    }
}

/// The fixed first-run gallery
pub fn sample_images() -> Vec<GalleryImage> {
    vec![
        sample(1, "Mountain Landscape", "Beautiful mountain view during sunset", "nature", 15, (2024, 1, 15)),
        sample(2, "City Architecture", "Modern building with glass facade", "architecture", 8, (2024, 1, 20)),
        sample(3, "Abstract Art", "Colorful abstract composition", "art", 23, (2024, 1, 25)),
        sample(4, "Ocean Waves", "Peaceful ocean scene with waves", "nature", 12, (2024, 2, 1)),
        sample(5, "Street Photography", "Urban life captured in black and white", "photography", 19, (2024, 2, 5)),
        sample(6, "Digital Design", "Modern UI/UX design concept", "design", 31, (2024, 2, 10)),
    ]
}

/// Distinct categories present in `images`, in first-seen order
pub fn categories_of<'a>(images: impl IntoIterator<Item = &'a GalleryImage>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for image in images {
        if !seen.iter().any(|c| c == &image.category) {
            seen.push(image.category.clone());
        }
    }
    seen
}

/// Sort key for the gallery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageSort {
    #[default]
    Date,
    Title,
    Likes,
}

impl ImageSort {
    pub fn as_str(self) -> &'static str {
        match self {
            ImageSort::Date => "date",
            ImageSort::Title => "title",
            ImageSort::Likes => "likes",
        }
    }

    pub fn cycle(self) -> Self {
        match self {
            ImageSort::Date => ImageSort::Title,
            ImageSort::Title => ImageSort::Likes,
            ImageSort::Likes => ImageSort::Date,
        }
    }

    pub fn compare(self, a: &GalleryImage, b: &GalleryImage) -> Ordering {
        match self {
            ImageSort::Date => by_created_desc(a, b),
            ImageSort::Title => by_text(&a.title, &b.title),
            ImageSort::Likes => b.likes.cmp(&a.likes),
        }
    }
}

impl fmt::Display for ImageSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ImageSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "date" => Ok(ImageSort::Date),
            "title" => Ok(ImageSort::Title),
            "likes" => Ok(ImageSort::Likes),
            other => Err(format!("unknown sort '{}' (expected date, title or likes)", other)),
        }
    }
}

/// View parameters for the gallery
#[derive(Debug, Clone, Default)]
pub struct ImageQuery {
    /// Matched against title and description, ignoring case
    pub search: String,

    /// `None` or `"all"` matches every category
    pub category: Option<String>,

    pub sort: ImageSort,
}

impl ImageQuery {
    fn category_matches(&self, image: &GalleryImage) -> bool {
        match self.category.as_deref().map(str::trim) {
            None | Some("") | Some("all") => true,
            Some(category) => image.category.eq_ignore_ascii_case(category),
        }
    }
}

impl ItemQuery<GalleryImage> for ImageQuery {
    fn matches(&self, item: &GalleryImage) -> bool {
        let search = self.search.trim();
        let text_matches = contains_ignore_case(&item.title, search)
            || contains_ignore_case(&item.description, search);

        text_matches && self.category_matches(item)
    }

    fn compare(&self, a: &GalleryImage, b: &GalleryImage) -> Ordering {
        self.sort.compare(a, b)
    }
}
