//! Screen layouts for each view mode

pub mod gallery;
pub mod todos;

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use super::app::{App, ConfirmAction, InputMode, IMAGE_FORM_FIELDS};
use super::ViewMode;

/// Splits the screen into header, content and status bar
fn frame_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(8),    // Content
            Constraint::Length(3), // Status bar
        ])
        .split(area);
    (chunks[0], chunks[1], chunks[2])
}

/// Splits content into the list and the details panel
fn content_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);
    (chunks[0], chunks[1])
}

fn draw_header(frame: &mut Frame, area: Rect, text: String) {
    let paragraph = Paragraph::new(text).block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (content, style) = match app.input_mode() {
        InputMode::Normal => {
            let hint = match app.view_mode() {
                ViewMode::Todos => "[n]ew [space]toggle [e]dit [p]riority [d]elete [f]ilter [s]ort [c]lear [Tab]gallery [q]uit [?]help",
                ViewMode::Gallery => "[n]ew [space]like [d]elete [/]search [f]category [s]ort [R]eset [Tab]to-dos [q]uit [?]help",
            };
            (app.status_message().unwrap_or(hint).to_string(), Style::default())
        }
        InputMode::Search(query) => (format!("Search: {}_", query), Style::default().fg(Color::Yellow)),
        InputMode::NewTodo(text) => (format!("New to-do: {}_", text), Style::default().fg(Color::Green)),
        InputMode::EditTodo(id, text) => {
            (format!("Edit {}: {}_", id, text), Style::default().fg(Color::Green))
        }
        InputMode::NewImage(form) => {
            let label = IMAGE_FORM_FIELDS[form.field()];
            let value = &form.values()[form.field()];
            let prompt = format!("New image {}: {}_  [Tab]next field [Enter]save [Esc]cancel", label, value);
            let message = app.status_message().map(|m| format!("{}  {}", m, prompt));
            (message.unwrap_or(prompt), Style::default().fg(Color::Green))
        }
        InputMode::Confirm(action) => {
            let question = match action {
                ConfirmAction::ClearCompleted => "Delete all completed to-dos? [y/n]",
                ConfirmAction::ResetGallery => "Discard gallery changes and restore samples? [y/n]",
            };
            (question.to_string(), Style::default().fg(Color::Yellow))
        }
    };

    let view_str = match app.view_mode() {
        ViewMode::Todos => "[1:To-dos]",
        ViewMode::Gallery => "[2:Gallery]",
    };

    let paragraph = Paragraph::new(format!("listkeep {} {}", view_str, content))
        .style(style)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(paragraph, area);
}
