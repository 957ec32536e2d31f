use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::{
    ui::{
        text::translate,
        view_model::{Message, MessageKind},
    },
    util::colors,
};

/// A titled card holding one translated line: errors, prompts, "not found".
pub struct MessageCard<'a> {
    message: &'a Message,
}

impl<'a> MessageCard<'a> {
    pub fn new(message: &'a Message) -> Self {
        Self { message }
    }
}

impl Widget for MessageCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let accent = match self.message.kind {
            MessageKind::Error => colors::ERROR,
            MessageKind::NotFound => colors::SECONDARY,
            MessageKind::Prompt => colors::MUTED,
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .border_style(Style::new().fg(accent))
            .title(Span::styled(
                translate(self.message.title_key),
                Style::new().fg(accent).add_modifier(Modifier::BOLD),
            ));

        let height = area.height.min(5);
        let card = Rect { height, ..area };

        Paragraph::new(Line::from(translate(&self.message.text)))
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true })
            .block(block)
            .render(card, buf);
    }
}
