//! TUI application state and key handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::warn;
use ratatui::Frame;

use super::event::{Event, EventHandler};
use super::ui::Terminal;
use super::utils::{next_category, step};
use super::views;
use super::ViewMode;
use crate::domain::{
    categories_of, GalleryImage, ImageDraft, ImageField, ImageQuery, ItemId, ListItem, Selection,
    StatusFilter, Todo, TodoDraft, TodoField, TodoPatch, TodoQuery, TodoStats,
};
use crate::storage::{GalleryStore, LoadOutcome, Project, StoreError, TodoStore};

/// Actions that ask for confirmation first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    ClearCompleted,
    ResetGallery,
}

/// Labels of the new-image form, in tab order
pub const IMAGE_FORM_FIELDS: [&str; 4] = ["URL", "Title", "Description", "Category"];

/// New-image form being filled in
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImageForm {
    values: [String; 4],
    field: usize,
}

impl ImageForm {
    pub fn values(&self) -> &[String; 4] {
        &self.values
    }

    /// Index of the field receiving input
    pub fn field(&self) -> usize {
        self.field
    }

    fn current(&mut self) -> &mut String {
        &mut self.values[self.field]
    }

    fn next_field(&mut self) {
        self.field = (self.field + 1) % self.values.len();
    }

    fn prev_field(&mut self) {
        self.field = (self.field + self.values.len() - 1) % self.values.len();
    }

    fn to_draft(&self, default_category: &str) -> ImageDraft {
        let [url, title, description, category] = self.values.clone();
        let category = if category.trim().is_empty() {
            default_category.to_string()
        } else {
            category
        };
        ImageDraft::new(url, title)
            .with_description(description)
            .with_category(category)
    }
}

/// Input mode
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Search(String),
    NewTodo(String),
    EditTodo(ItemId, String),
    NewImage(ImageForm),
    Confirm(ConfirmAction),
}

/// Applies a line-editing key to `buffer`
fn edit_line(buffer: &mut String, code: KeyCode) {
    match code {
        KeyCode::Backspace => {
            buffer.pop();
        }
        KeyCode::Char(c) => buffer.push(c),
        _ => {}
    }
}

/// Application state
pub struct App {
    project: Project,

    todos: TodoStore,

    gallery: GalleryStore,

    view_mode: ViewMode,

    input_mode: InputMode,

    todo_query: TodoQuery,

    image_query: ImageQuery,

    /// Highlighted to-do, resolved against the store before every draw
    todo_selection: Selection,

    /// Highlighted image, resolved against the store before every draw
    image_selection: Selection,

    status_message: Option<String>,

    should_quit: bool,
}

impl App {
    pub fn new(project: Project, view_mode: ViewMode) -> Result<Self> {
        let todos = project.todo_store()?;
        let gallery = project.gallery_store()?;

        let config = &project.config().project;
        let todo_query = TodoQuery {
            status: StatusFilter::All,
            sort: config.todos.default_sort,
        };
        let image_query = ImageQuery {
            sort: config.gallery.default_sort,
            ..ImageQuery::default()
        };

        let status_message = [(todos.load_outcome(), "to-dos"), (gallery.load_outcome(), "gallery")]
            .into_iter()
            .find(|(outcome, _)| *outcome == LoadOutcome::Recovered)
            .map(|(_, name)| format!("Saved {} were unreadable and have been reset", name));

        let mut app = Self {
            project,
            todos,
            gallery,
            view_mode,
            input_mode: InputMode::Normal,
            todo_query,
            image_query,
            todo_selection: Selection::new(),
            image_selection: Selection::new(),
            status_message,
            should_quit: false,
        };
        app.sync_selection();

        Ok(app)
    }

    /// Run the main application loop
    pub fn run(&mut self, terminal: &mut Terminal, events: EventHandler) -> Result<()> {
        while !self.should_quit {
            self.sync_selection();
            terminal.draw(|frame| self.draw(frame))?;

            match events.next()? {
                Event::Key(key) => self.handle_key(key)?,
                Event::Resize | Event::Tick => {}
            }
        }

        Ok(())
    }

    fn draw(&self, frame: &mut Frame) {
        match self.view_mode {
            ViewMode::Todos => views::todos::draw(frame, self),
            ViewMode::Gallery => views::gallery::draw(frame, self),
        }
    }

    /// Drops dangling selections and keeps one visible item highlighted
    fn sync_selection(&mut self) {
        let visible: Vec<ItemId> = self.visible_todos().iter().map(|t| t.id).collect();
        let current = self.todo_selection.resolve(self.todos.items()).map(Todo::id);
        match (current, visible.first()) {
            (Some(id), _) if visible.contains(&id) => {}
            (_, Some(first)) => self.todo_selection.select(*first),
            (_, None) => self.todo_selection.clear(),
        }

        let visible: Vec<ItemId> = self.visible_images().iter().map(|i| i.id).collect();
        let current = self.image_selection.resolve(self.gallery.items()).map(GalleryImage::id);
        match (current, visible.first()) {
            (Some(id), _) if visible.contains(&id) => {}
            (_, Some(first)) => self.image_selection.select(*first),
            (_, None) => self.image_selection.clear(),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return Ok(());
        }

        match std::mem::take(&mut self.input_mode) {
            InputMode::Normal => self.handle_normal_key(key)?,
            InputMode::Search(query) => self.input_mode = self.handle_search_key(key, query),
            InputMode::NewTodo(text) => self.input_mode = self.handle_new_todo_key(key, text),
            InputMode::EditTodo(id, text) => self.input_mode = self.handle_edit_todo_key(key, id, text),
            InputMode::NewImage(form) => self.input_mode = self.handle_new_image_key(key, form),
            InputMode::Confirm(action) => self.input_mode = self.handle_confirm_key(key, action),
        }

        Ok(())
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> Result<()> {
        self.status_message = None;

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,

            KeyCode::Char('j') | KeyCode::Down => self.move_selection(true),
            KeyCode::Char('k') | KeyCode::Up => self.move_selection(false),

            KeyCode::Tab | KeyCode::BackTab => self.view_mode = self.view_mode.toggle(),
            KeyCode::Char('1') => self.view_mode = ViewMode::Todos,
            KeyCode::Char('2') => self.view_mode = ViewMode::Gallery,

            KeyCode::Char(' ') | KeyCode::Enter => self.bump_selected(),
            KeyCode::Char('d') | KeyCode::Delete => self.delete_selected(),
            KeyCode::Char('n') => {
                self.input_mode = match self.view_mode {
                    ViewMode::Todos => InputMode::NewTodo(String::new()),
                    ViewMode::Gallery => InputMode::NewImage(ImageForm::default()),
                }
            }
            KeyCode::Char('e') => self.start_edit(),
            KeyCode::Char('p') => self.cycle_priority(),
            KeyCode::Char('f') => self.cycle_filter(),
            KeyCode::Char('s') => self.cycle_sort(),
            KeyCode::Char('/') if self.view_mode == ViewMode::Gallery => {
                self.input_mode = InputMode::Search(self.image_query.search.clone());
            }
            KeyCode::Char('c') if self.view_mode == ViewMode::Todos => {
                if self.todos.count_where(|todo| todo.completed) > 0 {
                    self.input_mode = InputMode::Confirm(ConfirmAction::ClearCompleted);
                } else {
                    self.status_message = Some("No completed to-dos to clear".to_string());
                }
            }
            KeyCode::Char('R') if self.view_mode == ViewMode::Gallery => {
                self.input_mode = InputMode::Confirm(ConfirmAction::ResetGallery);
            }
            KeyCode::Char('r') => self.reload()?,
            KeyCode::Char('?') => {
                let help = match self.view_mode {
                    ViewMode::Todos => {
                        "j/k:move space:toggle n:new e:edit p:priority d:delete f:filter s:sort c:clear done Tab:gallery q:quit"
                    }
                    ViewMode::Gallery => {
                        "j/k:move space:like n:new d:delete /:search f:category s:sort R:reset Tab:to-dos q:quit"
                    }
                };
                self.status_message = Some(help.to_string());
            }

            _ => {}
        }

        Ok(())
    }

    fn handle_search_key(&mut self, key: KeyEvent, mut query: String) -> InputMode {
        match key.code {
            KeyCode::Esc => {
                self.image_query.search.clear();
                InputMode::Normal
            }
            KeyCode::Enter => InputMode::Normal,
            code => {
                edit_line(&mut query, code);
                self.image_query.search = query.clone();
                InputMode::Search(query)
            }
        }
    }

    fn handle_new_todo_key(&mut self, key: KeyEvent, mut text: String) -> InputMode {
        match key.code {
            KeyCode::Esc => InputMode::Normal,
            KeyCode::Enter => {
                let priority = self.project.config().project.todos.default_priority;
                match self.todos.add(TodoDraft::new(text.as_str()).with_priority(priority)) {
                    Ok(todo) => {
                        self.todo_selection.select(todo.id);
                        self.status_message = Some(format!("Added: {}", todo.text));
                        InputMode::Normal
                    }
                    Err(e) => {
                        self.report(e);
                        InputMode::NewTodo(text)
                    }
                }
            }
            code => {
                edit_line(&mut text, code);
                InputMode::NewTodo(text)
            }
        }
    }

    fn handle_edit_todo_key(&mut self, key: KeyEvent, id: ItemId, mut text: String) -> InputMode {
        match key.code {
            KeyCode::Esc => InputMode::Normal,
            KeyCode::Enter => match self.todos.update(id, TodoPatch::text(text.as_str())) {
                Ok(todo) => {
                    self.status_message = Some(format!("Updated: {}", todo.text));
                    InputMode::Normal
                }
                Err(e) if e.is_validation() => {
                    self.report(e);
                    InputMode::EditTodo(id, text)
                }
                Err(e) => {
                    self.report(e);
                    InputMode::Normal
                }
            },
            code => {
                edit_line(&mut text, code);
                InputMode::EditTodo(id, text)
            }
        }
    }

    fn handle_new_image_key(&mut self, key: KeyEvent, mut form: ImageForm) -> InputMode {
        match key.code {
            KeyCode::Esc => InputMode::Normal,
            KeyCode::Tab | KeyCode::Down => {
                form.next_field();
                InputMode::NewImage(form)
            }
            KeyCode::BackTab | KeyCode::Up => {
                form.prev_field();
                InputMode::NewImage(form)
            }
            KeyCode::Enter => {
                let default_category = &self.project.config().project.gallery.default_category;
                let draft = form.to_draft(default_category);
                match self.gallery.add(draft) {
                    Ok(image) => {
                        self.image_selection.select(image.id);
                        self.status_message = Some(format!("Added: {}", image.title));
                        InputMode::Normal
                    }
                    Err(e) => {
                        self.report(e);
                        InputMode::NewImage(form)
                    }
                }
            }
            code => {
                edit_line(form.current(), code);
                InputMode::NewImage(form)
            }
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent, action: ConfirmAction) -> InputMode {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                match action {
                    ConfirmAction::ClearCompleted => self.clear_completed(),
                    ConfirmAction::ResetGallery => self.reset_gallery(),
                }
                InputMode::Normal
            }
            KeyCode::Char('n') | KeyCode::Esc => InputMode::Normal,
            _ => InputMode::Confirm(action),
        }
    }

    fn report(&mut self, error: StoreError) {
        warn!("{}", error);
        self.status_message = Some(format!("Error: {}", error));
    }

    fn move_selection(&mut self, forward: bool) {
        match self.view_mode {
            ViewMode::Todos => {
                let ids: Vec<ItemId> = self.visible_todos().iter().map(|t| t.id).collect();
                if let Some(id) = step(&ids, self.todo_selection.id(), forward) {
                    self.todo_selection.select(id);
                }
            }
            ViewMode::Gallery => {
                let ids: Vec<ItemId> = self.visible_images().iter().map(|i| i.id).collect();
                if let Some(id) = step(&ids, self.image_selection.id(), forward) {
                    self.image_selection.select(id);
                }
            }
        }
    }

    /// Toggles the selected to-do or likes the selected image
    fn bump_selected(&mut self) {
        match self.view_mode {
            ViewMode::Todos => {
                let Some(id) = self.todo_selection.id() else { return };
                match self.todos.toggle_or_increment(id, TodoField::Completed) {
                    Ok(todo) if todo.completed => {
                        self.status_message = Some(format!("Completed: {}", todo.text))
                    }
                    Ok(todo) => self.status_message = Some(format!("Reopened: {}", todo.text)),
                    Err(e) => self.report(e),
                }
            }
            ViewMode::Gallery => {
                let Some(id) = self.image_selection.id() else { return };
                match self.gallery.toggle_or_increment(id, ImageField::Likes) {
                    Ok(image) => {
                        self.status_message = Some(format!("Liked {} ({} likes)", image.title, image.likes))
                    }
                    Err(e) => self.report(e),
                }
            }
        }
    }

    fn delete_selected(&mut self) {
        match self.view_mode {
            ViewMode::Todos => {
                let Some(id) = self.todo_selection.id() else { return };
                match self.todos.remove(id) {
                    Ok(removed) => {
                        self.todo_selection.forget(id);
                        if removed {
                            self.status_message = Some("To-do deleted".to_string());
                        }
                    }
                    Err(e) => self.report(e),
                }
            }
            ViewMode::Gallery => {
                let Some(id) = self.image_selection.id() else { return };
                match self.gallery.remove(id) {
                    Ok(removed) => {
                        self.image_selection.forget(id);
                        if removed {
                            self.status_message = Some("Image deleted".to_string());
                        }
                    }
                    Err(e) => self.report(e),
                }
            }
        }
    }

    fn start_edit(&mut self) {
        match self.view_mode {
            ViewMode::Todos => {
                let selected = self.todo_selection.resolve(self.todos.items());
                if let Some(todo) = selected {
                    self.input_mode = InputMode::EditTodo(todo.id, todo.text.clone());
                }
            }
            ViewMode::Gallery => {
                self.status_message =
                    Some("Edit image fields with 'listkeep gallery edit <id>'".to_string());
            }
        }
    }

    fn cycle_priority(&mut self) {
        if self.view_mode != ViewMode::Todos {
            return;
        }
        let Some(todo) = self.todo_selection.resolve(self.todos.items()) else { return };
        let (id, next) = (todo.id, todo.priority.cycle());

        match self.todos.update(id, TodoPatch::priority(next)) {
            Ok(todo) => self.status_message = Some(format!("Priority {}: {}", todo.priority, todo.text)),
            Err(e) => self.report(e),
        }
    }

    fn cycle_filter(&mut self) {
        match self.view_mode {
            ViewMode::Todos => self.todo_query.status = self.todo_query.status.cycle(),
            ViewMode::Gallery => {
                let in_use = categories_of(self.gallery.items());
                self.image_query.category = next_category(self.image_query.category.as_deref(), &in_use);
            }
        }
    }

    fn cycle_sort(&mut self) {
        match self.view_mode {
            ViewMode::Todos => self.todo_query.sort = self.todo_query.sort.cycle(),
            ViewMode::Gallery => self.image_query.sort = self.image_query.sort.cycle(),
        }
    }

    fn clear_completed(&mut self) {
        match self.todos.clear_where(|todo| todo.completed) {
            Ok(cleared) => self.status_message = Some(format!("Cleared {} completed to-do(s)", cleared)),
            Err(e) => self.report(e),
        }
    }

    fn reset_gallery(&mut self) {
        let seed = if self.project.config().project.gallery.seed_on_first_run {
            GalleryImage::seed()
        } else {
            Vec::new()
        };

        match self.gallery.reset(seed) {
            Ok(()) => {
                self.image_selection.clear();
                self.image_query = ImageQuery {
                    sort: self.image_query.sort,
                    ..ImageQuery::default()
                };
                self.status_message = Some("Gallery reset".to_string());
            }
            Err(e) => self.report(e),
        }
    }

    /// Reloads both lists from disk
    fn reload(&mut self) -> Result<()> {
        self.todos = self.project.todo_store()?;
        self.gallery = self.project.gallery_store()?;
        self.status_message = Some("Reloaded".to_string());
        Ok(())
    }

    // Accessors for views

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn input_mode(&self) -> &InputMode {
        &self.input_mode
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn todo_query(&self) -> TodoQuery {
        self.todo_query
    }

    pub fn image_query(&self) -> &ImageQuery {
        &self.image_query
    }

    pub fn visible_todos(&self) -> Vec<Todo> {
        self.todos.view_by(&self.todo_query)
    }

    pub fn visible_images(&self) -> Vec<GalleryImage> {
        self.gallery.view_by(&self.image_query)
    }

    pub fn todo_stats(&self) -> TodoStats {
        TodoStats::of(self.todos.items())
    }

    pub fn image_count(&self) -> usize {
        self.gallery.len()
    }

    pub fn selected_todo_id(&self) -> Option<ItemId> {
        self.todo_selection.id()
    }

    pub fn selected_image_id(&self) -> Option<ItemId> {
        self.image_selection.id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open(view: ViewMode) -> (TempDir, App) {
        let tmp = TempDir::new().unwrap();
        let project = Project::init(tmp.path()).unwrap();
        let app = App::new(project, view).unwrap();
        (tmp, app)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE)).unwrap();
        app.sync_selection();
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn view_mode_from_str() {
        use std::str::FromStr;
        assert_eq!(ViewMode::from_str("todos").unwrap(), ViewMode::Todos);
        assert_eq!(ViewMode::from_str("G").unwrap(), ViewMode::Gallery);
        assert_eq!(ViewMode::from_str("2").unwrap(), ViewMode::Gallery);
        assert!(ViewMode::from_str("kanban").is_err());
    }

    #[test]
    fn tab_switches_views() {
        let (_tmp, mut app) = open(ViewMode::Todos);

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.view_mode(), ViewMode::Gallery);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.view_mode(), ViewMode::Todos);
    }

    #[test]
    fn add_toggle_and_delete_todo() {
        let (_tmp, mut app) = open(ViewMode::Todos);

        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "Buy milk");
        press(&mut app, KeyCode::Enter);

        let todos = app.visible_todos();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].text, "Buy milk");
        assert_eq!(app.selected_todo_id(), Some(todos[0].id));

        press(&mut app, KeyCode::Char(' '));
        assert!(app.visible_todos()[0].completed);

        press(&mut app, KeyCode::Char('d'));
        assert!(app.visible_todos().is_empty());
        assert_eq!(app.selected_todo_id(), None);
    }

    #[test]
    fn blank_todo_keeps_prompt_open() {
        let (_tmp, mut app) = open(ViewMode::Todos);

        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "   ");
        press(&mut app, KeyCode::Enter);

        assert!(matches!(app.input_mode(), InputMode::NewTodo(_)));
        assert!(app.status_message().unwrap().contains("text must not be blank"));
        assert!(app.visible_todos().is_empty());
    }

    #[test]
    fn edit_replaces_text() {
        let (_tmp, mut app) = open(ViewMode::Todos);
        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "Draft");
        press(&mut app, KeyCode::Enter);

        press(&mut app, KeyCode::Char('e'));
        assert!(matches!(app.input_mode(), InputMode::EditTodo(_, text) if text == "Draft"));
        for _ in 0..5 {
            press(&mut app, KeyCode::Backspace);
        }
        type_text(&mut app, "Final");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.visible_todos()[0].text, "Final");
        assert_eq!(app.input_mode(), &InputMode::Normal);
    }

    #[test]
    fn filter_moves_selection_to_visible_item() {
        let (_tmp, mut app) = open(ViewMode::Todos);
        for text in ["one", "two"] {
            press(&mut app, KeyCode::Char('n'));
            type_text(&mut app, text);
            press(&mut app, KeyCode::Enter);
        }
        // "two" is newest and selected; complete it, then show only active
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Char('f'));

        assert_eq!(app.todo_query().status, StatusFilter::Active);
        let visible = app.visible_todos();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].text, "one");
        assert_eq!(app.selected_todo_id(), Some(visible[0].id));
    }

    #[test]
    fn clear_completed_asks_first() {
        let (_tmp, mut app) = open(ViewMode::Todos);
        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "done soon");
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char(' '));

        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.input_mode(), &InputMode::Confirm(ConfirmAction::ClearCompleted));
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.visible_todos().len(), 1);

        press(&mut app, KeyCode::Char('c'));
        press(&mut app, KeyCode::Char('y'));
        assert!(app.visible_todos().is_empty());
    }

    #[test]
    fn gallery_starts_with_samples_and_likes_newest() {
        let (_tmp, mut app) = open(ViewMode::Gallery);

        assert_eq!(app.image_count(), 6);
        let first = app.visible_images()[0].clone();
        assert_eq!(first.title, "Digital Design");
        assert_eq!(app.selected_image_id(), Some(first.id));

        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.visible_images()[0].likes, 32);
    }

    #[test]
    fn search_filters_gallery_live() {
        let (_tmp, mut app) = open(ViewMode::Gallery);

        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "oce");
        let titles: Vec<_> = app.visible_images().into_iter().map(|i| i.title).collect();
        assert_eq!(titles, vec!["Ocean Waves"]);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.visible_images().len(), 6);
    }

    #[test]
    fn category_filter_cycles_back_to_all() {
        let (_tmp, mut app) = open(ViewMode::Gallery);

        press(&mut app, KeyCode::Char('f'));
        assert_eq!(app.image_query().category.as_deref(), Some("nature"));
        assert_eq!(app.visible_images().len(), 2);

        for _ in 0..5 {
            press(&mut app, KeyCode::Char('f'));
        }
        assert_eq!(app.image_query().category, None);
        assert_eq!(app.visible_images().len(), 6);
    }

    #[test]
    fn image_form_requires_url() {
        let (_tmp, mut app) = open(ViewMode::Gallery);

        press(&mut app, KeyCode::Char('n'));
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "Sunset");
        press(&mut app, KeyCode::Enter);

        assert!(matches!(app.input_mode(), InputMode::NewImage(form) if form.values()[1] == "Sunset"));
        assert!(app.status_message().unwrap().contains("url must not be blank"));
        assert_eq!(app.image_count(), 6);

        press(&mut app, KeyCode::BackTab);
        type_text(&mut app, "https://example.com/sunset.jpg");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.input_mode(), &InputMode::Normal);
        assert_eq!(app.image_count(), 7);
        let added = app.visible_images()[0].clone();
        assert_eq!(added.title, "Sunset");
        assert_eq!(added.category, "nature");
        assert_eq!(app.selected_image_id(), Some(added.id));
    }

    #[test]
    fn deleting_selected_image_moves_highlight() {
        let (_tmp, mut app) = open(ViewMode::Gallery);
        let first = app.selected_image_id().unwrap();

        press(&mut app, KeyCode::Char('d'));

        assert_eq!(app.image_count(), 5);
        assert!(app.selected_image_id().is_some());
        assert_ne!(app.selected_image_id(), Some(first));
    }

    #[test]
    fn reset_restores_samples() {
        let (_tmp, mut app) = open(ViewMode::Gallery);
        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.image_count(), 4);

        press(&mut app, KeyCode::Char('R'));
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.image_count(), 6);
    }

    #[test]
    fn reload_sees_saved_changes() {
        let (tmp, mut app) = open(ViewMode::Todos);
        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "persisted");
        press(&mut app, KeyCode::Enter);

        let reopened = App::new(Project::open(tmp.path()).unwrap(), ViewMode::Todos).unwrap();
        assert_eq!(reopened.visible_todos()[0].text, "persisted");

        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.visible_todos().len(), 1);
    }

    #[test]
    fn image_form_fields_wrap() {
        let mut form = ImageForm::default();
        form.prev_field();
        assert_eq!(form.field(), IMAGE_FORM_FIELDS.len() - 1);
        form.next_field();
        assert_eq!(form.field(), 0);
    }
}
