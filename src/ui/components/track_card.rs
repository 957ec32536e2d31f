use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::ListItem,
};

use crate::{
    ui::view_model::Card,
    util::colors,
};

pub const CARD_HEIGHT: u16 = 4;

/// Renders one result card as a multi-line list item.
pub fn track_card(card: &Card) -> ListItem<'static> {
    let icon = if card.is_playing { "⏸" } else { "▶" };

    let title_style = if card.is_playing {
        Style::new().fg(colors::PRIMARY).add_modifier(Modifier::BOLD)
    } else {
        Style::new().add_modifier(Modifier::BOLD)
    };
    let dim = Style::new().fg(colors::MUTED);

    ListItem::new(vec![
        Line::from(vec![
            Span::styled(format!("{icon} "), Style::new().fg(colors::PRIMARY)),
            Span::styled(card.track_name.clone(), title_style),
            Span::raw("  "),
            Span::styled(card.artist_name.clone(), Style::new().fg(colors::SECONDARY)),
        ]),
        Line::from(Span::styled(
            format!("  {} · {} · {}", card.collection_name, card.genre, card.country),
            dim,
        )),
        Line::from(Span::styled(format!("  {}", card.thumbnail), Style::new().fg(colors::NEUTRAL))),
        Line::default(),
    ])
}
