//! To-do domain model
//!
//! A to-do is a line of text with a completion flag and a priority.
//! Snapshots use the camelCase field names of the `todos` slot.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::ItemId;
use super::item::{by_created_desc, by_text, required, ItemQuery, ListItem, ValidationError};

/// Priority of a to-do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Sort rank; higher ranks sort first
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    /// Next priority in the low -> medium -> high cycle
    pub fn cycle(self) -> Self {
        match self {
            Priority::Low => Priority::Medium,
            Priority::Medium => Priority::High,
            Priority::High => Priority::Low,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" | "l" => Ok(Priority::Low),
            "medium" | "med" | "m" => Ok(Priority::Medium),
            "high" | "h" => Ok(Priority::High),
            other => Err(format!("unknown priority '{}' (expected low, medium or high)", other)),
        }
    }
}

/// A to-do item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: ItemId,

    pub text: String,

    #[serde(default)]
    pub completed: bool,

    pub created_at: DateTime<Utc>,

    #[serde(default)]
    pub priority: Priority,
}

/// Fields for a new to-do
#[derive(Debug, Clone, Default)]
pub struct TodoDraft {
    pub text: String,
    pub priority: Option<Priority>,
}

impl TodoDraft {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            priority: None,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }
}

/// Partial update of a to-do
#[derive(Debug, Clone, Default)]
pub struct TodoPatch {
    pub text: Option<String>,
    pub priority: Option<Priority>,
    pub completed: Option<bool>,
}

impl TodoPatch {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn priority(priority: Priority) -> Self {
        Self {
            priority: Some(priority),
            ..Self::default()
        }
    }

    /// Returns true if the patch changes nothing
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.priority.is_none() && self.completed.is_none()
    }
}

/// Toggleable to-do fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoField {
    Completed,
}

impl ListItem for Todo {
    type Draft = TodoDraft;
    type Patch = TodoPatch;
    type Field = TodoField;

    const SLOT_KEY: &'static str = "todos";

    fn id(&self) -> ItemId {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn create(
        id: ItemId,
        created_at: DateTime<Utc>,
        draft: TodoDraft,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id,
            text: required("text", &draft.text)?,
            completed: false,
            created_at,
            priority: draft.priority.unwrap_or_default(),
        })
    }

    fn patched(&self, patch: TodoPatch) -> Result<Self, ValidationError> {
        let mut next = self.clone();
        if let Some(text) = patch.text {
            next.text = required("text", &text)?;
        }
        if let Some(priority) = patch.priority {
            next.priority = priority;
        }
        if let Some(completed) = patch.completed {
            next.completed = completed;
        }
        Ok(next)
    }

    fn bump(&mut self, field: TodoField) {
        match field {
            TodoField::Completed => self.completed = !self.completed,
        }
    }
}

/// Completion filter for the to-do list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl StatusFilter {
    pub fn matches(self, todo: &Todo) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => !todo.completed,
            StatusFilter::Completed => todo.completed,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Active => "active",
            StatusFilter::Completed => "completed",
        }
    }

    /// Next filter in the all -> active -> completed cycle
    pub fn cycle(self) -> Self {
        match self {
            StatusFilter::All => StatusFilter::Active,
            StatusFilter::Active => StatusFilter::Completed,
            StatusFilter::Completed => StatusFilter::All,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "active" => Ok(StatusFilter::Active),
            "completed" | "done" => Ok(StatusFilter::Completed),
            other => Err(format!("unknown filter '{}' (expected all, active or completed)", other)),
        }
    }
}

/// Sort key for the to-do list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TodoSort {
    #[default]
    Date,
    Priority,
    Alphabetical,
}

impl TodoSort {
    pub fn as_str(self) -> &'static str {
        match self {
            TodoSort::Date => "date",
            TodoSort::Priority => "priority",
            TodoSort::Alphabetical => "alphabetical",
        }
    }

    pub fn cycle(self) -> Self {
        match self {
            TodoSort::Date => TodoSort::Priority,
            TodoSort::Priority => TodoSort::Alphabetical,
            TodoSort::Alphabetical => TodoSort::Date,
        }
    }

    pub fn compare(self, a: &Todo, b: &Todo) -> Ordering {
        match self {
            TodoSort::Date => by_created_desc(a, b),
            TodoSort::Priority => b.priority.rank().cmp(&a.priority.rank()),
            TodoSort::Alphabetical => by_text(&a.text, &b.text),
        }
    }
}

impl FromStr for TodoSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "date" => Ok(TodoSort::Date),
            "priority" => Ok(TodoSort::Priority),
            "alphabetical" | "alpha" | "text" => Ok(TodoSort::Alphabetical),
            other => Err(format!(
                "unknown sort '{}' (expected date, priority or alphabetical)",
                other
            )),
        }
    }
}

/// View parameters for the to-do list
#[derive(Debug, Clone, Copy, Default)]
pub struct TodoQuery {
    pub status: StatusFilter,
    pub sort: TodoSort,
}

impl ItemQuery<Todo> for TodoQuery {
    fn matches(&self, item: &Todo) -> bool {
        self.status.matches(item)
    }

    fn compare(&self, a: &Todo, b: &Todo) -> Ordering {
        self.sort.compare(a, b)
    }
}

/// Counts shown above the to-do list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TodoStats {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
}

impl TodoStats {
    pub fn of<'a>(todos: impl IntoIterator<Item = &'a Todo>) -> Self {
        let mut stats = Self::default();
        for todo in todos {
            stats.total += 1;
            if todo.completed {
                stats.completed += 1;
            } else {
                stats.active += 1;
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn make_todo(id: u64, text: &str, priority: Priority) -> Todo {
        let created = Utc.timestamp_millis_opt(id as i64 * 1_000).unwrap();
        Todo::create(
            ItemId::new(id),
            created,
            TodoDraft::new(text).with_priority(priority),
        )
        .unwrap()
    }

    #[test]
    fn new_todo_defaults() {
        let todo = Todo::create(ItemId::new(1), Utc::now(), TodoDraft::new("  Buy milk  ")).unwrap();

        assert_eq!(todo.text, "Buy milk");
        assert!(!todo.completed);
        assert_eq!(todo.priority, Priority::Medium);
    }

    #[test]
    fn blank_text_is_rejected() {
        let result = Todo::create(ItemId::new(1), Utc::now(), TodoDraft::new("   "));
        assert_eq!(result, Err(ValidationError::Blank("text")));
    }

    #[test]
    fn patch_keeps_identity() {
        let todo = make_todo(1, "Old", Priority::Low);
        let patched = todo
            .patched(TodoPatch {
                text: Some(" New ".to_string()),
                priority: Some(Priority::High),
                completed: Some(true),
            })
            .unwrap();

        assert_eq!(patched.id, todo.id);
        assert_eq!(patched.created_at, todo.created_at);
        assert_eq!(patched.text, "New");
        assert_eq!(patched.priority, Priority::High);
        assert!(patched.completed);
    }

    #[test]
    fn blank_patch_text_is_rejected() {
        let todo = make_todo(1, "Keep me", Priority::Low);
        assert!(todo.patched(TodoPatch::text("")).is_err());
    }

    #[test]
    fn bump_toggles_completion() {
        let mut todo = make_todo(1, "Task", Priority::Low);
        todo.bump(TodoField::Completed);
        assert!(todo.completed);
        todo.bump(TodoField::Completed);
        assert!(!todo.completed);
    }

    #[test]
    fn priority_sort_uses_rank() {
        let mut todos = vec![
            make_todo(1, "a", Priority::Low),
            make_todo(2, "b", Priority::High),
            make_todo(3, "c", Priority::Medium),
        ];
        todos.sort_by(|a, b| TodoSort::Priority.compare(a, b));

        let order: Vec<_> = todos.iter().map(|t| t.priority).collect();
        assert_eq!(order, vec![Priority::High, Priority::Medium, Priority::Low]);
    }

    #[test]
    fn date_sort_is_newest_first() {
        let mut todos = vec![
            make_todo(1, "old", Priority::Low),
            make_todo(3, "new", Priority::Low),
            make_todo(2, "mid", Priority::Low),
        ];
        todos.sort_by(|a, b| TodoSort::Date.compare(a, b));

        let texts: Vec<_> = todos.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["new", "mid", "old"]);
    }

    #[test]
    fn status_filter() {
        let mut done = make_todo(1, "done", Priority::Low);
        done.completed = true;
        let open = make_todo(2, "open", Priority::Low);

        assert!(StatusFilter::All.matches(&done) && StatusFilter::All.matches(&open));
        assert!(StatusFilter::Active.matches(&open) && !StatusFilter::Active.matches(&done));
        assert!(StatusFilter::Completed.matches(&done) && !StatusFilter::Completed.matches(&open));
    }

    #[test]
    fn stats_count_states() {
        let mut done = make_todo(1, "done", Priority::Low);
        done.completed = true;
        let todos = vec![done, make_todo(2, "a", Priority::Low), make_todo(3, "b", Priority::High)];

        let stats = TodoStats::of(&todos);
        assert_eq!(stats, TodoStats { total: 3, active: 2, completed: 1 });
    }

    #[test]
    fn serde_uses_camel_case() {
        let todo = make_todo(1_705_000_000_000, "Write docs", Priority::High);
        let json = serde_json::to_value(&todo).unwrap();

        assert_eq!(json["id"], serde_json::json!(1_705_000_000_000u64));
        assert_eq!(json["priority"], "high");
        assert!(json["createdAt"].as_str().unwrap().starts_with("2024-01-11T"));
    }

    #[test]
    fn parses_snapshot_written_by_browser() {
        let json = r#"{"id":1718000000000,"text":"Legacy","completed":true,"createdAt":"2024-06-10T06:13:20.000Z","priority":"low"}"#;
        let todo: Todo = serde_json::from_str(json).unwrap();

        assert_eq!(todo.id, ItemId::new(1_718_000_000_000));
        assert!(todo.completed);
        assert_eq!(todo.priority, Priority::Low);
        assert_eq!(todo.created_at.timestamp_millis(), 1_718_000_000_000);
    }

    #[test]
    fn priority_parsing() {
        assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!("m".parse::<Priority>().unwrap(), Priority::Medium);
        assert!("urgent".parse::<Priority>().is_err());
    }
}
