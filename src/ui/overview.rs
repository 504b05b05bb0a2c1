//! Overview view: library-wide statistics at a glance.

use ratatui::{
    prelude::*,
    widgets::{BarChart, Block, Borders, List, ListItem, Paragraph},
};

use crate::app::App;
use crate::stats::LibraryStats;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let stats = LibraryStats::compute(app.store.records());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Min(8),
            Constraint::Length(8),
        ])
        .split(area);

    render_stat_cards(frame, &stats, chunks[0]);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    render_upload_chart(frame, &stats, middle[0]);
    render_category_breakdown(frame, &stats, middle[1]);
    render_recent_uploads(frame, app, chunks[2]);
}

fn render_stat_cards(frame: &mut Frame, stats: &LibraryStats, area: Rect) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let values = [
        ("Total Photos", stats.total.to_string(), Color::Cyan),
        (
            "Categories",
            stats.categories.len().to_string(),
            Color::Green,
        ),
        (
            "Locations",
            stats.unique_locations.to_string(),
            Color::Yellow,
        ),
        ("Unique Tags", stats.unique_tags.to_string(), Color::Magenta),
    ];

    for (i, (label, value, color)) in values.iter().enumerate() {
        let card = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                value.clone(),
                Style::default().fg(*color).add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center),
            Line::from(Span::styled(*label, Style::default().fg(Color::Gray)))
                .alignment(Alignment::Center),
        ])
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(card, cards[i]);
    }
}

fn render_upload_chart(frame: &mut Frame, stats: &LibraryStats, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(format!(
        " Uploads by Month ({} active) ",
        stats.active_months()
    ));

    if stats.uploads_by_month.is_empty() {
        let empty = Paragraph::new("No uploads yet")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let data: Vec<(&str, u64)> = stats
        .uploads_by_month
        .iter()
        .map(|(month, count)| (month.as_str(), *count as u64))
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(&data)
        .bar_width(7)
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::Cyan))
        .value_style(Style::default().fg(Color::Black).bg(Color::Cyan));
    frame.render_widget(chart, area);
}

fn render_category_breakdown(frame: &mut Frame, stats: &LibraryStats, area: Rect) {
    let max = stats
        .categories
        .iter()
        .map(|(_, count)| *count)
        .max()
        .unwrap_or(1)
        .max(1);

    let bar_space = area.width.saturating_sub(24).max(4) as usize;

    let items: Vec<ListItem> = stats
        .categories
        .iter()
        .map(|(category, count)| {
            let filled = count * bar_space / max;
            let bar: String = "█".repeat(filled);
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<12}", category),
                    Style::default().fg(Color::White),
                ),
                Span::styled(bar, Style::default().fg(Color::Green)),
                Span::styled(format!(" {}", count), Style::default().fg(Color::Gray)),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Categories "),
    );
    frame.render_widget(list, area);
}

fn render_recent_uploads(frame: &mut Frame, app: &App, area: Rect) {
    // Records are kept newest-first, so the head of the store is the
    // recent-uploads list.
    let items: Vec<ListItem> = app
        .store
        .records()
        .iter()
        .take(5)
        .map(|record| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<28}", record.filename),
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    format!("{:<12}", record.upload_date),
                    Style::default().fg(Color::Gray),
                ),
                Span::styled(
                    record.category.clone(),
                    Style::default().fg(Color::Cyan),
                ),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Recent Uploads "),
    );
    frame.render_widget(list, area);
}
