//! To-do view: list with a details panel

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use super::{content_layout, draw_header, draw_status_bar, frame_layout};
use crate::cli::tui::app::App;
use crate::cli::tui::utils::{completed_style, priority_style, truncate_str};
use crate::domain::{StatusFilter, Todo};

pub fn draw(frame: &mut Frame, app: &App) {
    let (header, content, status) = frame_layout(frame.area());
    let (list_area, details_area) = content_layout(content);

    let stats = app.todo_stats();
    let query = app.todo_query();
    draw_header(
        frame,
        header,
        format!(
            "{} total, {} active, {} completed | filter: {} | sort: {}",
            stats.total,
            stats.active,
            stats.completed,
            query.status.as_str(),
            query.sort.as_str()
        ),
    );

    let todos = app.visible_todos();
    draw_list(frame, app, &todos, list_area);
    draw_details(frame, app, &todos, details_area);
    draw_status_bar(frame, app, status);
}

fn draw_list(frame: &mut Frame, app: &App, todos: &[Todo], area: Rect) {
    let width = area.width.saturating_sub(20) as usize;

    let items: Vec<ListItem> = if todos.is_empty() {
        let empty = match app.todo_query().status {
            StatusFilter::All => "No to-dos yet. Press 'n' to add one.".to_string(),
            other => format!("No {} to-dos at the moment.", other.as_str()),
        };
        vec![ListItem::new(empty).style(Style::default().fg(Color::DarkGray))]
    } else {
        todos
            .iter()
            .map(|todo| {
                let checkbox = if todo.completed { "[x]" } else { "[ ]" };
                let text_style = if todo.completed { completed_style() } else { Style::default() };
                ListItem::new(Line::from(vec![
                    Span::raw(format!("{} ", checkbox)),
                    Span::styled(truncate_str(&todo.text, width), text_style),
                    Span::raw(" "),
                    Span::styled(format!("({})", todo.priority), priority_style(todo.priority)),
                ]))
            })
            .collect()
    };

    let list = List::new(items)
        .block(
            Block::default()
                .title("To-dos")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    let selected = app
        .selected_todo_id()
        .and_then(|id| todos.iter().position(|todo| todo.id == id));
    let mut state = ListState::default();
    state.select(selected);

    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_details(frame: &mut Frame, app: &App, todos: &[Todo], area: Rect) {
    let selected = app
        .selected_todo_id()
        .and_then(|id| todos.iter().find(|todo| todo.id == id));

    let content = match selected {
        Some(todo) => vec![
            format!("To-do: {}", todo.id),
            format!("Status: {}", if todo.completed { "completed" } else { "active" }),
            format!("Priority: {}", todo.priority),
            format!("Created: {}", todo.created_at.format("%Y-%m-%d %H:%M")),
            String::new(),
            todo.text.clone(),
        ]
        .join("\n"),
        None => "No to-do selected".to_string(),
    };

    let paragraph = Paragraph::new(content)
        .block(Block::default().title("Details").borders(Borders::ALL))
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}
