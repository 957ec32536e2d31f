use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Widget},
};

use crate::{ui::util::animation_step, util::colors};

/// Placeholder card outlines shown while a request is in flight.
pub struct Skeleton {
    rows: usize,
    row_height: u16,
}

impl Skeleton {
    pub fn new(rows: usize) -> Self {
        Self {
            rows,
            row_height: 4,
        }
    }

    pub fn row_height(mut self, row_height: u16) -> Self {
        self.row_height = row_height.max(3);
        self
    }
}

impl Widget for Skeleton {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.rows == 0 || area.is_empty() {
            return;
        }

        let rows = Layout::vertical(vec![Constraint::Length(self.row_height); self.rows]).split(area);
        let lit = animation_step(150, self.rows.max(1));

        for (i, row) in rows.iter().enumerate() {
            let fg = if i == lit { colors::MUTED } else { colors::NEUTRAL };
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::new().fg(fg));
            let inner = block.inner(*row);
            block.render(*row, buf);

            let style = Style::new().bg(colors::SKELETON);
            for (line, width) in [(0u16, inner.width * 3 / 5), (1, inner.width * 2 / 5)] {
                if line < inner.height && width > 0 {
                    buf.set_string(inner.x, inner.y + line, " ".repeat(width as usize), style);
                }
            }
        }
    }
}
