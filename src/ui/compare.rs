//! Compare view: side-by-side inspection of up to three records.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::app::App;
use crate::compare::MAX_COMPARED;
use crate::store::PhotoRecord;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(34), Constraint::Min(0)])
        .split(area);

    render_picker(frame, app, chunks[0]);
    render_columns(frame, app, chunks[1]);
}

fn render_picker(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .store
        .records()
        .iter()
        .map(|record| {
            let (marker, style) = if app.compare.contains(&record.id) {
                ("[x] ", Style::default().fg(Color::Magenta))
            } else {
                ("[ ] ", Style::default().fg(Color::White))
            };
            ListItem::new(Line::from(vec![
                Span::styled(marker, Style::default().fg(Color::Magenta)),
                Span::styled(record.filename.clone(), style),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(format!(
            " Select ({}/{}) ",
            app.compare.len(),
            MAX_COMPARED
        )))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default();
    if !app.store.is_empty() {
        state.select(Some(app.compare_index.min(app.store.len() - 1)));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_columns(frame: &mut Frame, app: &App, area: Rect) {
    let selected: Vec<&PhotoRecord> = app
        .compare
        .ids()
        .iter()
        .filter_map(|id| app.store.get(id))
        .collect();

    if selected.is_empty() {
        let hint = Paragraph::new(vec![
            Line::from(""),
            Line::from("Select up to 3 photos to compare").alignment(Alignment::Center),
            Line::from(""),
            Line::from(Span::styled(
                "Space toggles, i hides metadata",
                Style::default().fg(Color::DarkGray),
            ))
            .alignment(Alignment::Center),
        ])
        .block(Block::default().borders(Borders::ALL).title(" Compare "));
        frame.render_widget(hint, area);
        return;
    }

    let constraints: Vec<Constraint> = selected
        .iter()
        .map(|_| Constraint::Ratio(1, selected.len() as u32))
        .collect();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (record, column) in selected.iter().zip(columns.iter()) {
        render_record_column(frame, record, app.show_metadata, *column);
    }
}

fn render_record_column(frame: &mut Frame, record: &PhotoRecord, show_metadata: bool, area: Rect) {
    let mut lines = vec![
        Line::from(Span::styled(
            record.category.clone(),
            Style::default().fg(Color::Cyan),
        )),
        Line::from(""),
        Line::from(Span::styled(
            record.notes.clone(),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            record.tags.join(", "),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    if show_metadata {
        lines.push(Line::from(""));
        lines.push(metadata_line("Uploaded", record.upload_date.clone()));
        lines.push(metadata_line("Captured", record.capture_date.clone()));
        lines.push(metadata_line("Location", record.location.name.clone()));

        let metadata = &record.metadata;
        if let Some(ref camera) = metadata.camera {
            lines.push(metadata_line("Camera", camera.clone()));
        }
        if let Some(iso) = metadata.iso {
            lines.push(metadata_line("ISO", iso.to_string()));
        }
        if let Some(ref aperture) = metadata.aperture {
            lines.push(metadata_line("Aperture", aperture.clone()));
        }
        if let Some(ref shutter) = metadata.shutter_speed {
            lines.push(metadata_line("Shutter", shutter.clone()));
        }
        if let Some(ref focal) = metadata.focal_length {
            lines.push(metadata_line("Focal", focal.clone()));
        }
    }

    let column = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Magenta))
                .title(format!(" {} ", record.filename)),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(column, area);
}

fn metadata_line(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<10}", label), Style::default().fg(Color::Cyan)),
        Span::styled(value, Style::default().fg(Color::White)),
    ])
}
