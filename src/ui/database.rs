//! Database view: searchable, filterable record listing.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table, TableState, Tabs},
};

use crate::app::{App, AppMode, ViewMode};
use crate::store::PhotoRecord;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    render_search_line(frame, app, chunks[0]);
    render_category_tabs(frame, app, chunks[1]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(chunks[2]);

    let records = app.filtered_records();
    match app.view_mode {
        ViewMode::Table => render_table(frame, app, &records, columns[0]),
        ViewMode::Gallery => render_gallery(frame, app, &records, columns[0]),
    }
    render_detail(frame, records.get(app.selected_index).copied(), columns[1]);
}

fn render_search_line(frame: &mut Frame, app: &App, area: Rect) {
    let searching = app.mode == AppMode::Searching;

    let mut spans = vec![Span::styled(
        " / ",
        Style::default().fg(if searching { Color::Yellow } else { Color::DarkGray }),
    )];

    if app.filter.query.is_empty() && !searching {
        spans.push(Span::styled(
            "press / to search filename, tags, notes",
            Style::default().fg(Color::DarkGray),
        ));
    } else {
        spans.push(Span::styled(
            app.filter.query.clone(),
            Style::default().fg(Color::White),
        ));
    }

    if searching {
        spans.push(Span::styled(" ", Style::default().bg(Color::White)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_category_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let tabs = App::category_tabs();
    let selected = tabs
        .iter()
        .position(|c| *c == app.filter.category)
        .unwrap_or(0);

    let titles: Vec<Line> = tabs.iter().map(|c| Line::from(format!(" {} ", c))).collect();
    let widget = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
        .divider("·");
    frame.render_widget(widget, area);
}

fn render_table(frame: &mut Frame, app: &App, records: &[&PhotoRecord], area: Rect) {
    let header = Row::new(vec!["", "Filename", "Date", "Category", "Location", "Tags"])
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .bottom_margin(1);

    let rows: Vec<Row> = records
        .iter()
        .map(|record| {
            let marker = if app.compare.contains(&record.id) {
                "◆"
            } else {
                " "
            };
            Row::new(vec![
                Cell::from(Span::styled(marker, Style::default().fg(Color::Magenta))),
                Cell::from(record.filename.clone()),
                Cell::from(record.upload_date.clone()),
                Cell::from(record.category.clone()),
                Cell::from(record.location.name.clone()),
                Cell::from(record.tags.join(", ")),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(1),
            Constraint::Percentage(30),
            Constraint::Length(10),
            Constraint::Length(12),
            Constraint::Percentage(20),
            Constraint::Percentage(30),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Photos ({}) ", records.len())),
    )
    .row_highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    );

    let mut state = TableState::default();
    if !records.is_empty() {
        state.select(Some(app.selected_index.min(records.len() - 1)));
    }
    frame.render_stateful_widget(table, area, &mut state);
}

fn render_gallery(frame: &mut Frame, app: &App, records: &[&PhotoRecord], area: Rect) {
    let items: Vec<ListItem> = records
        .iter()
        .map(|record| {
            let marker = if app.compare.contains(&record.id) {
                "◆ "
            } else {
                "  "
            };
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(marker, Style::default().fg(Color::Magenta)),
                    Span::styled(
                        record.filename.clone(),
                        Style::default()
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("  {}", record.category),
                        Style::default().fg(Color::Cyan),
                    ),
                ]),
                Line::from(vec![
                    Span::raw("  "),
                    Span::styled(
                        format!("{} · {}", record.upload_date, record.location.name),
                        Style::default().fg(Color::Gray),
                    ),
                ]),
                Line::from(vec![
                    Span::raw("  "),
                    Span::styled(
                        record.tags.join(", "),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]),
                Line::from(""),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Gallery ({}) ", records.len())),
        )
        .highlight_style(Style::default().bg(Color::DarkGray));

    let mut state = ListState::default();
    if !records.is_empty() {
        state.select(Some(app.selected_index.min(records.len() - 1)));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_detail(frame: &mut Frame, record: Option<&PhotoRecord>, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Details ");

    let Some(record) = record else {
        let empty = Paragraph::new("No photo selected")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(
            record.filename.clone(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        field_line("Category", &record.category),
        field_line("Uploaded", &record.upload_date),
        field_line("Captured", &record.capture_date),
        field_line("Location", &record.location.name),
        field_line("Tags", &record.tags.join(", ")),
        Line::from(""),
    ];

    let metadata = &record.metadata;
    if let Some(ref camera) = metadata.camera {
        lines.push(field_line("Camera", camera));
    }
    let mut exposure = Vec::new();
    if let Some(iso) = metadata.iso {
        exposure.push(format!("ISO {}", iso));
    }
    if let Some(ref aperture) = metadata.aperture {
        exposure.push(aperture.clone());
    }
    if let Some(ref shutter) = metadata.shutter_speed {
        exposure.push(shutter.clone());
    }
    if let Some(ref focal) = metadata.focal_length {
        exposure.push(focal.clone());
    }
    if !exposure.is_empty() {
        lines.push(field_line("Exposure", &exposure.join(" · ")));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        record.notes.clone(),
        Style::default().fg(Color::Gray),
    )));

    let detail = Paragraph::new(lines)
        .block(block)
        .wrap(ratatui::widgets::Wrap { trim: false });
    frame.render_widget(detail, area);
}

fn field_line(label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{:<10}", label),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(value.to_string(), Style::default().fg(Color::White)),
    ])
}
