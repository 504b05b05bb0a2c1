//! Dialog for editing a record's notes and category.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::store::{PhotoRecord, CATEGORIES};

/// Dialog state for editing a photo record
pub struct EditDialog {
    /// Id of the record being edited
    pub record_id: String,
    /// Filename shown in the title
    pub filename: String,
    /// Category, cycled with Tab
    pub category: String,
    /// Notes text being edited
    pub notes: String,
    /// Cursor position in notes
    pub cursor: usize,
}

impl EditDialog {
    pub fn for_record(record: &PhotoRecord) -> Self {
        Self {
            record_id: record.id.clone(),
            filename: record.filename.clone(),
            category: record.category.clone(),
            notes: record.notes.clone(),
            cursor: record.notes.len(),
        }
    }

    /// Fold the edited fields back into `record`.
    pub fn apply_to(&self, mut record: PhotoRecord) -> PhotoRecord {
        record.notes = self.notes.clone();
        record.category = self.category.clone();
        record
    }

    pub fn cycle_category(&mut self) {
        let current = CATEGORIES
            .iter()
            .position(|c| *c == self.category)
            .unwrap_or(CATEGORIES.len() - 1);
        self.category = CATEGORIES[(current + 1) % CATEGORIES.len()].to_string();
    }

    pub fn handle_char(&mut self, c: char) {
        self.notes.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let prev = self.notes[..self.cursor]
                .chars()
                .next_back()
                .map(|c| c.len_utf8())
                .unwrap_or(1);
            self.cursor -= prev;
            self.notes.remove(self.cursor);
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor > 0 {
            let prev = self.notes[..self.cursor]
                .chars()
                .next_back()
                .map(|c| c.len_utf8())
                .unwrap_or(1);
            self.cursor -= prev;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor < self.notes.len() {
            let next = self.notes[self.cursor..]
                .chars()
                .next()
                .map(|c| c.len_utf8())
                .unwrap_or(1);
            self.cursor += next;
        }
    }
}

pub fn render(frame: &mut Frame, dialog: &EditDialog, area: Rect) {
    let dialog_width = 70.min(area.width.saturating_sub(4));
    let dialog_height = 16.min(area.height.saturating_sub(4));

    let x = area.width.saturating_sub(dialog_width) / 2;
    let y = area.height.saturating_sub(dialog_height) / 2;

    let dialog_area = Rect::new(x, y, dialog_width, dialog_height);

    frame.render_widget(Clear, dialog_area);

    // Layout: category, notes area, help
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(6),
            Constraint::Length(2),
        ])
        .margin(1)
        .split(dialog_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" Edit {} ", dialog.filename));
    frame.render_widget(block, dialog_area);

    let category_line = Paragraph::new(Line::from(vec![
        Span::styled("Category: ", Style::default().fg(Color::Gray)),
        Span::styled(
            dialog.category.clone(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  (Tab to change)", Style::default().fg(Color::DarkGray)),
    ]));
    frame.render_widget(category_line, chunks[0]);

    // Notes with cursor highlighting
    let notes_line = if dialog.cursor < dialog.notes.len() {
        let (before, after) = dialog.notes.split_at(dialog.cursor);
        let cursor_char = after.chars().next().unwrap_or(' ');
        let rest = &after[cursor_char.len_utf8()..];
        Line::from(vec![
            Span::raw(before.to_string()),
            Span::styled(
                cursor_char.to_string(),
                Style::default().bg(Color::White).fg(Color::Black),
            ),
            Span::raw(rest.to_string()),
        ])
    } else {
        Line::from(vec![
            Span::raw(dialog.notes.clone()),
            Span::styled(" ", Style::default().bg(Color::White)),
        ])
    };

    let notes = Paragraph::new(vec![notes_line])
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green))
                .title(" Notes "),
        );
    frame.render_widget(notes, chunks[1]);

    let help = Paragraph::new(vec![
        Line::from("Enter=save | Esc=cancel | Tab=category"),
        Line::from("Arrows=move cursor"),
    ])
    .style(Style::default().fg(Color::DarkGray))
    .alignment(Alignment::Center);
    frame.render_widget(help, chunks[2]);
}
