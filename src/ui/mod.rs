mod compare;
mod database;
mod dialogs;
pub mod edit_dialog;
mod overview;
mod status_bar;
pub mod upload_dialog;

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Tabs},
};

use crate::app::{App, AppMode, View};

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Main layout: view tabs + content area + status bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    render_tabs(frame, app, main_chunks[0]);

    match app.view {
        View::Overview => overview::render(frame, app, main_chunks[1]),
        View::Database => database::render(frame, app, main_chunks[1]),
        View::Compare => compare::render(frame, app, main_chunks[1]),
    }

    status_bar::render(frame, app, main_chunks[2]);

    // Modal overlays
    match app.mode {
        AppMode::Help => dialogs::render_help(frame, area),
        AppMode::Uploading => {
            if let Some(ref dialog) = app.upload_dialog {
                upload_dialog::render(frame, dialog, area);
            }
        }
        AppMode::Editing => {
            if let Some(ref dialog) = app.edit_dialog {
                edit_dialog::render(frame, dialog, area);
            }
        }
        _ => {}
    }
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = View::all()
        .iter()
        .enumerate()
        .map(|(i, view)| Line::from(format!(" {}:{} ", i + 1, view.display_name())))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(24)])
        .split(area);

    let tabs = Tabs::new(titles)
        .select(app.view.index())
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .divider("|");
    frame.render_widget(tabs, chunks[0]);

    // Signed-in user, right aligned
    let profile = &app.config.profile;
    let user = Line::from(vec![
        Span::styled(
            format!("{} ", profile.name),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("[{}] ", profile.role.display_name()),
            Style::default().fg(Color::DarkGray),
        ),
    ])
    .alignment(Alignment::Right);
    frame.render_widget(
        ratatui::widgets::Paragraph::new(user).block(Block::default().borders(Borders::NONE)),
        chunks[1],
    );
}
