//! Gallery view: image list with a details panel

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use super::{content_layout, draw_header, draw_status_bar, frame_layout};
use crate::cli::tui::app::App;
use crate::cli::tui::utils::truncate_str;
use crate::domain::GalleryImage;

pub fn draw(frame: &mut Frame, app: &App) {
    let (header, content, status) = frame_layout(frame.area());
    let (list_area, details_area) = content_layout(content);

    let images = app.visible_images();
    let query = app.image_query();
    let search = if query.search.is_empty() { "-" } else { query.search.as_str() };
    draw_header(
        frame,
        header,
        format!(
            "Showing {} of {} image(s) | search: {} | category: {} | sort: {}",
            images.len(),
            app.image_count(),
            search,
            query.category.as_deref().unwrap_or("all"),
            query.sort
        ),
    );

    draw_list(frame, app, &images, list_area);
    draw_details(frame, app, &images, details_area);
    draw_status_bar(frame, app, status);
}

fn draw_list(frame: &mut Frame, app: &App, images: &[GalleryImage], area: Rect) {
    let width = area.width.saturating_sub(30) as usize;

    let items: Vec<ListItem> = if images.is_empty() {
        vec![ListItem::new("No images found. Try a different search or category.")
            .style(Style::default().fg(Color::DarkGray))]
    } else {
        images
            .iter()
            .map(|image| {
                ListItem::new(Line::from(vec![
                    Span::raw(format!("{:<width$} ", truncate_str(&image.title, width), width = width)),
                    Span::styled(format!("{:>4} likes ", image.likes), Style::default().fg(Color::Magenta)),
                    Span::styled(format!("[{}]", image.category), Style::default().fg(Color::Blue)),
                ]))
            })
            .collect()
    };

    let list = List::new(items)
        .block(
            Block::default()
                .title("Gallery")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    let selected = app
        .selected_image_id()
        .and_then(|id| images.iter().position(|image| image.id == id));
    let mut state = ListState::default();
    state.select(selected);

    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_details(frame: &mut Frame, app: &App, images: &[GalleryImage], area: Rect) {
    let selected = app
        .selected_image_id()
        .and_then(|id| images.iter().find(|image| image.id == id));

    let content = match selected {
        Some(image) => {
            let mut lines = vec![
                format!("Image: {}", image.id),
                format!("Title: {}", image.title),
                format!("Category: {}", image.category),
                format!("Likes: {}", image.likes),
                format!("Added: {}", image.added_at.format("%Y-%m-%d")),
                format!("URL: {}", image.url),
            ];
            if !image.description.is_empty() {
                lines.push(String::new());
                lines.push(image.description.clone());
            }
            lines.join("\n")
        }
        None => "No image selected".to_string(),
    };

    let paragraph = Paragraph::new(content)
        .block(Block::default().title("Details").borders(Borders::ALL))
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}
