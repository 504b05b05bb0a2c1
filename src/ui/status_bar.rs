use ratatui::{prelude::*, widgets::Paragraph};

use crate::app::{App, AppMode, View};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    // A status message takes over the whole bar until the next one
    if let Some(ref message) = app.status_message {
        let line = Line::from(vec![Span::styled(
            format!(" {} ", message),
            Style::default().fg(Color::Yellow).bg(Color::DarkGray),
        )]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    let filtered = app.filtered_records().len();
    let total = app.store.len();

    let position = match app.view {
        View::Database if filtered > 0 => {
            format!("{}/{}", app.selected_index + 1, filtered)
        }
        View::Compare if total > 0 => format!("{}/{}", app.compare_index + 1, total),
        _ => format!("{} photos", total),
    };

    let mut spans = Vec::new();

    spans.push(Span::styled(
        format!(" {} ", app.view.display_name()),
        Style::default().fg(Color::White).bg(Color::DarkGray),
    ));

    if filtered != total {
        spans.push(Span::styled(
            format!(" {} of {} shown ", filtered, total),
            Style::default().fg(Color::Gray),
        ));
    }

    // Upload progress indicator
    if let Some(stage) = app.upload_stage {
        spans.push(Span::styled(
            format!(" [{}] ", stage.display_name()),
            Style::default().fg(Color::Cyan),
        ));
    }

    let help_text = match (app.view, app.mode) {
        (_, AppMode::Searching) => format!(" {} | Enter:done Esc:done Ctrl+U:clear ", position),
        (View::Database, _) => format!(
            " {} | /:search c:category u:upload e:edit d:del Space:compare ?:help ",
            position
        ),
        (View::Compare, _) => format!(" {} | Space:toggle i:metadata ?:help q:quit ", position),
        _ => format!(" {} | 1/2/3:views Tab:next ?:help q:quit ", position),
    };

    let content_len: usize = spans.iter().map(|s| s.content.len()).sum();
    let help_len = help_text.len();
    let available = area.width as usize;
    if available > content_len + help_len {
        spans.push(Span::raw(" ".repeat(available - content_len - help_len)));
    }

    spans.push(Span::styled(
        help_text,
        Style::default().fg(Color::White).bg(Color::DarkGray),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
