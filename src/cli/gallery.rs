//! Gallery CLI commands

use anyhow::{Context, Result};
use clap::Subcommand;

use super::output::Output;
use crate::domain::{
    categories_of, GalleryImage, ImageDraft, ImageField, ImagePatch, ImageQuery, ImageSort, ItemId,
    ListItem, CATEGORIES,
};
use crate::storage::{GalleryStore, Project};

#[derive(Subcommand)]
pub enum GalleryCommands {
    /// Add an image by URL
    Add {
        /// Image URL
        #[arg(long, short)]
        url: String,

        /// Image title
        #[arg(long, short)]
        title: String,

        /// Short description
        #[arg(long, short)]
        description: Option<String>,

        /// Category (nature, architecture, art, photography, design, ...)
        #[arg(long, short)]
        category: Option<String>,
    },

    /// List images
    List {
        /// Case-insensitive match on title or description
        #[arg(long, short)]
        search: Option<String>,

        /// Only show this category ("all" for every category)
        #[arg(long, short)]
        category: Option<String>,

        /// Sort order (date, title, likes)
        #[arg(long)]
        sort: Option<ImageSort>,
    },

    /// Show image details
    Show {
        /// Image ID
        id: String,
    },

    /// Like an image
    Like {
        /// Image ID
        id: String,
    },

    /// Change an image's fields
    Edit {
        /// Image ID
        id: String,

        #[arg(long, short)]
        url: Option<String>,

        #[arg(long, short)]
        title: Option<String>,

        #[arg(long, short)]
        description: Option<String>,

        #[arg(long, short)]
        category: Option<String>,
    },

    /// Delete an image
    Remove {
        /// Image ID
        id: String,
    },

    /// List categories in use
    Categories,

    /// Discard all changes and return to the sample gallery
    Reset,
}

pub fn run(cmd: GalleryCommands, output: &Output) -> Result<()> {
    let project = Project::open_current()?;
    let mut store = project.gallery_store()?;
    output.load_outcome(store.key(), store.load_outcome());

    let gallery_config = &project.config().project.gallery;

    match cmd {
        GalleryCommands::Add { url, title, description, category } => {
            let draft = ImageDraft {
                url,
                title,
                description,
                category: category.or_else(|| Some(gallery_config.default_category.clone())),
            };
            add_image(output, &mut store, draft)
        }
        GalleryCommands::List { search, category, sort } => {
            let query = ImageQuery {
                search: search.unwrap_or_default(),
                category,
                sort: sort.unwrap_or(gallery_config.default_sort),
            };
            list_images(output, &store, &query)
        }
        GalleryCommands::Show { id } => show_image(output, &store, &id),
        GalleryCommands::Like { id } => like_image(output, &mut store, &id),
        GalleryCommands::Edit { id, url, title, description, category } => {
            let patch = ImagePatch { url, title, description, category };
            edit_image(output, &mut store, &id, patch)
        }
        GalleryCommands::Remove { id } => remove_image(output, &mut store, &id),
        GalleryCommands::Categories => list_categories(output, &store),
        GalleryCommands::Reset => reset_gallery(output, &mut store, gallery_config.seed_on_first_run),
    }
}

fn add_image(output: &Output, store: &mut GalleryStore, draft: ImageDraft) -> Result<()> {
    let image = store.add(draft).context("Failed to add image")?;

    if output.is_json() {
        output.data(&image);
    } else {
        output.success(&format!("Added image {}: {} [{}]", image.id, image.title, image.category));
    }

    Ok(())
}

fn list_images(output: &Output, store: &GalleryStore, query: &ImageQuery) -> Result<()> {
    output.verbose_ctx(
        "gallery",
        &format!(
            "Listing with search={:?} category={:?} sort={}",
            query.search, query.category, query.sort
        ),
    );

    let images = store.view_by(query);

    if output.is_json() {
        output.data(&serde_json::json!({
            "total": store.len(),
            "sort": query.sort.as_str(),
            "images": images,
        }));
        return Ok(());
    }

    println!("Showing {} of {} image(s)", images.len(), store.len());

    if images.is_empty() {
        println!("No images found. Try a different search or category.");
        return Ok(());
    }

    println!();
    println!("{:<16} {:<14} {:>5} {:<11} TITLE", "ID", "CATEGORY", "LIKES", "ADDED");
    println!("{}", "-".repeat(70));
    for image in &images {
        println!(
            "{:<16} {:<14} {:>5} {:<11} {}",
            image.id,
            image.category,
            image.likes,
            image.added_at.format("%Y-%m-%d"),
            image.title
        );
    }

    Ok(())
}

fn find<'a>(store: &'a GalleryStore, id: ItemId) -> Result<&'a GalleryImage> {
    store
        .get(id)
        .ok_or_else(|| anyhow::anyhow!("Image not found: {}", id))
}

fn show_image(output: &Output, store: &GalleryStore, id_str: &str) -> Result<()> {
    let id: ItemId = id_str.parse()?;
    let image = find(store, id)?;

    if output.is_json() {
        output.data(image);
    } else {
        println!("Image: {}", image.id);
        println!("Title: {}", image.title);
        println!("URL: {}", image.url);
        println!("Category: {}", image.category);
        println!("Likes: {}", image.likes);
        println!("Added: {}", image.added_at.format("%Y-%m-%d"));
        if !image.description.is_empty() {
            println!("\nDescription:");
            println!("{}", image.description);
        }
    }

    Ok(())
}

fn like_image(output: &Output, store: &mut GalleryStore, id_str: &str) -> Result<()> {
    let id: ItemId = id_str.parse()?;
    let image = store
        .toggle_or_increment(id, ImageField::Likes)
        .with_context(|| format!("Failed to like image {}", id))?;

    if output.is_json() {
        output.data(&image);
    } else {
        output.success(&format!("Liked {} ({} likes)", image.title, image.likes));
    }

    Ok(())
}

fn edit_image(output: &Output, store: &mut GalleryStore, id_str: &str, patch: ImagePatch) -> Result<()> {
    let id: ItemId = id_str.parse()?;
    if patch.is_empty() {
        anyhow::bail!("Nothing to change: pass at least one of --url, --title, --description, --category");
    }

    let image = store
        .update(id, patch)
        .with_context(|| format!("Failed to edit image {}", id))?;

    if output.is_json() {
        output.data(&image);
    } else {
        output.success(&format!("Updated image {}: {}", image.id, image.title));
    }

    Ok(())
}

fn remove_image(output: &Output, store: &mut GalleryStore, id_str: &str) -> Result<()> {
    let id: ItemId = id_str.parse()?;
    let removed = store
        .remove(id)
        .with_context(|| format!("Failed to remove image {}", id))?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "id": id,
            "removed": removed,
        }));
    } else if removed {
        output.success(&format!("Removed image {}", id));
    } else {
        output.success(&format!("No image with ID {}", id));
    }

    Ok(())
}

fn list_categories(output: &Output, store: &GalleryStore) -> Result<()> {
    let in_use = categories_of(store.items());

    if output.is_json() {
        output.data(&serde_json::json!({
            "in_use": in_use,
            "suggested": CATEGORIES,
        }));
        return Ok(());
    }

    println!("all");
    for category in &in_use {
        let count = store.count_where(|image| &image.category == category);
        println!("{} ({})", category, count);
    }

    Ok(())
}

fn reset_gallery(output: &Output, store: &mut GalleryStore, seed: bool) -> Result<()> {
    let seed = if seed { GalleryImage::seed() } else { Vec::new() };
    store.reset(seed).context("Failed to reset gallery")?;

    if output.is_json() {
        output.data(&serde_json::json!({ "images": store.len() }));
    } else {
        output.success(&format!("Gallery reset ({} image(s))", store.len()));
    }

    Ok(())
}
