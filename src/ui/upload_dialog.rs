//! Dialog for entering the path of a photo to upload.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};
use std::path::PathBuf;

/// Dialog state for the upload path prompt
pub struct UploadDialog {
    /// Path text being edited
    pub input: String,
    /// Cursor position in input
    pub cursor: usize,
}

impl UploadDialog {
    pub fn new() -> Self {
        Self {
            input: String::new(),
            cursor: 0,
        }
    }

    pub fn path_buf(&self) -> PathBuf {
        let trimmed = self.input.trim();
        // Expand a leading ~ to the home directory
        if let Some(rest) = trimmed.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
        PathBuf::from(trimmed)
    }

    pub fn handle_char(&mut self, c: char) {
        self.input.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let prev = self.input[..self.cursor]
                .chars()
                .next_back()
                .map(|c| c.len_utf8())
                .unwrap_or(1);
            self.cursor -= prev;
            self.input.remove(self.cursor);
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor > 0 {
            let prev = self.input[..self.cursor]
                .chars()
                .next_back()
                .map(|c| c.len_utf8())
                .unwrap_or(1);
            self.cursor -= prev;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor < self.input.len() {
            let next = self.input[self.cursor..]
                .chars()
                .next()
                .map(|c| c.len_utf8())
                .unwrap_or(1);
            self.cursor += next;
        }
    }

    pub fn clear(&mut self) {
        self.input.clear();
        self.cursor = 0;
    }
}

impl Default for UploadDialog {
    fn default() -> Self {
        Self::new()
    }
}

pub fn render(frame: &mut Frame, dialog: &UploadDialog, area: Rect) {
    let dialog_width = 70.min(area.width.saturating_sub(4));
    let dialog_height = 8.min(area.height.saturating_sub(4));

    let x = area.width.saturating_sub(dialog_width) / 2;
    let y = area.height.saturating_sub(dialog_height) / 2;

    let dialog_area = Rect::new(x, y, dialog_width, dialog_height);

    frame.render_widget(Clear, dialog_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(2)])
        .margin(1)
        .split(dialog_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Upload Photo ");
    frame.render_widget(block, dialog_area);

    // Input line with cursor highlighting
    let input_line = if dialog.cursor < dialog.input.len() {
        let (before, after) = dialog.input.split_at(dialog.cursor);
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
            Span::raw(dialog.input.clone()),
            Span::styled(" ", Style::default().bg(Color::White)),
        ])
    };

    let input = Paragraph::new(input_line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green))
            .title(" Image file path "),
    );
    frame.render_widget(input, chunks[0]);

    let help = Paragraph::new(vec![
        Line::from("Enter=upload | Esc=cancel | Ctrl+U=clear"),
        Line::from("The photo is analyzed with AI after upload"),
    ])
    .style(Style::default().fg(Color::DarkGray))
    .alignment(Alignment::Center);
    frame.render_widget(help, chunks[1]);
}
