//! To-do CLI commands

use anyhow::{Context, Result};
use clap::Subcommand;

use super::output::Output;
use crate::domain::{
    ItemId, Priority, StatusFilter, TodoDraft, TodoField, TodoPatch, TodoQuery, TodoSort, TodoStats,
};
use crate::storage::{Project, TodoStore};

#[derive(Subcommand)]
pub enum TodoCommands {
    /// Add a to-do
    ///
    /// Examples:
    ///   listkeep todo add Buy milk
    ///   listkeep todo add "Ship release" --priority high
    Add {
        /// To-do text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,

        /// Priority (low, medium, high)
        #[arg(long, short)]
        priority: Option<Priority>,
    },

    /// List to-dos
    List {
        /// Which to-dos to show (all, active, completed)
        #[arg(long, default_value = "all")]
        filter: StatusFilter,

        /// Sort order (date, priority, alphabetical)
        #[arg(long)]
        sort: Option<TodoSort>,
    },

    /// Toggle a to-do between active and completed
    Toggle {
        /// To-do ID
        id: String,
    },

    /// Change a to-do's text or priority
    Edit {
        /// To-do ID
        id: String,

        /// New text
        #[arg(long, short)]
        text: Option<String>,

        /// New priority
        #[arg(long, short)]
        priority: Option<Priority>,
    },

    /// Delete a to-do
    Remove {
        /// To-do ID
        id: String,
    },

    /// Delete all completed to-dos
    ClearCompleted,
}

pub fn run(cmd: TodoCommands, output: &Output) -> Result<()> {
    let project = Project::open_current()?;
    let mut store = project.todo_store()?;
    output.load_outcome(store.key(), store.load_outcome());

    match cmd {
        TodoCommands::Add { text, priority } => {
            let priority = priority.unwrap_or(project.config().project.todos.default_priority);
            add_todo(output, &mut store, &text.join(" "), priority)
        }
        TodoCommands::List { filter, sort } => {
            let sort = sort.unwrap_or(project.config().project.todos.default_sort);
            list_todos(output, &store, TodoQuery { status: filter, sort })
        }
        TodoCommands::Toggle { id } => toggle_todo(output, &mut store, &id),
        TodoCommands::Edit { id, text, priority } => edit_todo(output, &mut store, &id, text, priority),
        TodoCommands::Remove { id } => remove_todo(output, &mut store, &id),
        TodoCommands::ClearCompleted => clear_completed(output, &mut store),
    }
}

fn add_todo(output: &Output, store: &mut TodoStore, text: &str, priority: Priority) -> Result<()> {
    let todo = store
        .add(TodoDraft::new(text).with_priority(priority))
        .context("Failed to add to-do")?;

    if output.is_json() {
        output.data(&todo);
    } else {
        output.success(&format!("Added to-do {}: {} ({})", todo.id, todo.text, todo.priority));
    }

    Ok(())
}

fn list_todos(output: &Output, store: &TodoStore, query: TodoQuery) -> Result<()> {
    output.verbose_ctx(
        "todo",
        &format!("Listing with filter={} sort={}", query.status.as_str(), query.sort.as_str()),
    );

    let todos = store.view_by(&query);
    let stats = TodoStats::of(store.items());

    if output.is_json() {
        output.data(&serde_json::json!({
            "stats": stats,
            "filter": query.status.as_str(),
            "sort": query.sort.as_str(),
            "todos": todos,
        }));
        return Ok(());
    }

    println!(
        "{} total, {} active, {} completed",
        stats.total, stats.active, stats.completed
    );

    if todos.is_empty() {
        match query.status {
            StatusFilter::All => println!("No to-dos yet. Add one with 'listkeep todo add'."),
            other => println!("No {} to-dos at the moment.", other.as_str()),
        }
        return Ok(());
    }

    println!();
    println!("{:<16} {:<8} {:<4} {:<11} TEXT", "ID", "PRIORITY", "DONE", "CREATED");
    println!("{}", "-".repeat(70));
    for todo in &todos {
        let done = if todo.completed { "[x]" } else { "[ ]" };
        println!(
            "{:<16} {:<8} {:<4} {:<11} {}",
            todo.id,
            todo.priority,
            done,
            todo.created_at.format("%Y-%m-%d"),
            todo.text
        );
    }

    Ok(())
}

fn toggle_todo(output: &Output, store: &mut TodoStore, id_str: &str) -> Result<()> {
    let id: ItemId = id_str.parse()?;
    let todo = store
        .toggle_or_increment(id, TodoField::Completed)
        .with_context(|| format!("Failed to toggle to-do {}", id))?;

    if output.is_json() {
        output.data(&todo);
    } else if todo.completed {
        output.success(&format!("Completed to-do {}: {}", todo.id, todo.text));
    } else {
        output.success(&format!("Reopened to-do {}: {}", todo.id, todo.text));
    }

    Ok(())
}

fn edit_todo(
    output: &Output,
    store: &mut TodoStore,
    id_str: &str,
    text: Option<String>,
    priority: Option<Priority>,
) -> Result<()> {
    let id: ItemId = id_str.parse()?;
    let patch = TodoPatch {
        text,
        priority,
        completed: None,
    };
    if patch.is_empty() {
        anyhow::bail!("Nothing to change: pass --text and/or --priority");
    }

    let todo = store
        .update(id, patch)
        .with_context(|| format!("Failed to edit to-do {}", id))?;

    if output.is_json() {
        output.data(&todo);
    } else {
        output.success(&format!("Updated to-do {}: {} ({})", todo.id, todo.text, todo.priority));
    }

    Ok(())
}

fn remove_todo(output: &Output, store: &mut TodoStore, id_str: &str) -> Result<()> {
    let id: ItemId = id_str.parse()?;
    let removed = store
        .remove(id)
        .with_context(|| format!("Failed to remove to-do {}", id))?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "id": id,
            "removed": removed,
        }));
    } else if removed {
        output.success(&format!("Removed to-do {}", id));
    } else {
        output.success(&format!("No to-do with ID {}", id));
    }

    Ok(())
}

fn clear_completed(output: &Output, store: &mut TodoStore) -> Result<()> {
    let cleared = store
        .clear_where(|todo| todo.completed)
        .context("Failed to clear completed to-dos")?;

    if output.is_json() {
        output.data(&serde_json::json!({ "cleared": cleared }));
    } else {
        output.success(&format!("Cleared {} completed to-do(s)", cleared));
    }

    Ok(())
}
