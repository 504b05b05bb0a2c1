use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

pub fn render_help(frame: &mut Frame, area: Rect) {
    // Center the help dialog
    let dialog_width = 58.min(area.width.saturating_sub(4));
    let dialog_height = 28.min(area.height.saturating_sub(4));

    let x = area.width.saturating_sub(dialog_width) / 2;
    let y = area.height.saturating_sub(dialog_height) / 2;

    let dialog_area = Rect::new(x, y, dialog_width, dialog_height);

    // Clear the area behind the dialog
    frame.render_widget(Clear, dialog_area);

    let help_text = vec![
        Line::from(Span::styled("Views", Style::default().add_modifier(Modifier::BOLD).fg(Color::Cyan))),
        Line::from(""),
        Line::from("  1 / 2 / 3  Overview / Database / Compare"),
        Line::from("  Tab        Next view"),
        Line::from(""),
        Line::from(Span::styled("Database", Style::default().add_modifier(Modifier::BOLD).fg(Color::Cyan))),
        Line::from(""),
        Line::from("  j / ↓      Move down"),
        Line::from("  k / ↑      Move up"),
        Line::from("  /          Search filename, tags, notes"),
        Line::from("  c / C      Next / previous category filter"),
        Line::from("  g          Toggle gallery / table layout"),
        Line::from("  u          Upload and analyze a photo"),
        Line::from("  e          Edit selected record"),
        Line::from("  d          Delete selected record"),
        Line::from("  Space      Toggle compare selection"),
        Line::from("  x / X      Export filtered records (CSV / JSON)"),
        Line::from(""),
        Line::from(Span::styled("Compare", Style::default().add_modifier(Modifier::BOLD).fg(Color::Cyan))),
        Line::from(""),
        Line::from("  Space / ↵  Toggle photo in comparison (max 3)"),
        Line::from("  i          Show / hide metadata"),
        Line::from(""),
        Line::from("  ?          Show this help"),
        Line::from("  q          Quit"),
        Line::from(""),
        Line::from(Span::styled("Press any key to close", Style::default().fg(Color::DarkGray))),
    ];

    let paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help ")
                .title_style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, dialog_area);
}
