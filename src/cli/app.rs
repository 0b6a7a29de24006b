//! Main CLI application structure

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::tui::{self, ViewMode};
use super::{gallery, todo};
use crate::domain::TodoStats;
use crate::storage::{Config, Project};

#[derive(Parser)]
#[command(name = "listkeep")]
#[command(author, version, about = "Local-first to-do list and image gallery")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the global config, then text)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new listkeep project
    Init {
        /// Path to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: String,
    },

    /// Show counts for both lists
    Status,

    /// Manage to-dos
    #[command(subcommand)]
    Todo(todo::TodoCommands),

    /// Manage the image gallery
    #[command(subcommand)]
    Gallery(gallery::GalleryCommands),

    /// Open the interactive terminal UI
    Tui {
        /// Initial view (todos, gallery)
        #[arg(long, default_value = "todos")]
        view: ViewMode,
    },
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "error" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .try_init();
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let format = match cli.format {
        Some(format) => format,
        None => Config::load_global()?.default_format.into(),
    };
    let output = Output::new(format, cli.verbose);

    output.verbose("listkeep starting");

    match cli.command {
        Commands::Init { path } => {
            output.verbose_ctx("init", &format!("Initializing project at: {}", path));
            let project = Project::init(&path)?;
            output.verbose_ctx(
                "init",
                &format!("Created .listkeep directory at: {}", project.project_dir().display()),
            );
            output.success(&format!("Initialized listkeep project at {}", project.root().display()));
        }

        Commands::Status => {
            output.verbose("Gathering project status");
            status(&output)?
        }

        Commands::Todo(cmd) => todo::run(cmd, &output)?,
        Commands::Gallery(cmd) => gallery::run(cmd, &output)?,

        Commands::Tui { view } => {
            let project = Project::open_current()?;
            tui::run(project, view)?
        }
    }

    output.verbose("Command completed successfully");
    Ok(())
}

fn status(output: &Output) -> Result<()> {
    let project = Project::open_current()?;
    let todos = project.todo_store()?;
    let gallery = project.gallery_store()?;
    output.load_outcome(todos.key(), todos.load_outcome());
    output.load_outcome(gallery.key(), gallery.load_outcome());

    let stats = TodoStats::of(todos.items());
    let likes: u64 = gallery.items().iter().map(|image| image.likes).sum();

    if output.is_json() {
        output.data(&serde_json::json!({
            "root": project.root().display().to_string(),
            "todos": stats,
            "gallery": {
                "images": gallery.len(),
                "likes": likes,
            },
        }));
        return Ok(());
    }

    println!("Project: {}", project.root().display());
    println!();
    println!("To-dos:");
    println!("  Total:     {}", stats.total);
    println!("  Active:    {}", stats.active);
    println!("  Completed: {}", stats.completed);
    println!();
    println!("Gallery:");
    println!("  Images:    {}", gallery.len());
    println!("  Likes:     {}", likes);

    Ok(())
}
