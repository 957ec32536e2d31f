use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::{
    audio::{PlaybackState, PlaybackStatus},
    model::Track,
    ui::{text::translate, util::get_active_track_icon},
    util::colors,
};

pub struct NowPlaying<'a> {
    state: &'a PlaybackState,
    track: Option<&'a Track>,
}

impl<'a> NowPlaying<'a> {
    pub fn new(state: &'a PlaybackState, track: Option<&'a Track>) -> Self {
        Self { state, track }
    }

    fn label(&self) -> String {
        let track = self.track.filter(|t| {
            t.preview_url.is_some() && t.preview_url.as_deref() == self.state.source()
        });

        match track {
            Some(track) => format!(
                "{} - {}",
                track.track_name.as_deref().unwrap_or_default(),
                track.artist_name.as_deref().unwrap_or_default()
            ),
            None => self.state.source().unwrap_or_default().to_string(),
        }
    }
}

impl Widget for NowPlaying<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .border_style(Style::new().fg(colors::NEUTRAL));

        let line = match self.state.status() {
            PlaybackStatus::NoTrack => Line::from(Span::styled(
                translate("no_preview"),
                Style::new().fg(colors::MUTED),
            )),
            status => {
                let (icon, tag) = match status {
                    PlaybackStatus::Playing => (get_active_track_icon(true), "playing"),
                    PlaybackStatus::Paused => ("⏸", "paused"),
                    _ => ("■", "ended"),
                };
                Line::from(vec![
                    Span::styled(format!("{icon} "), Style::new().fg(colors::PRIMARY)),
                    Span::styled(self.label(), Style::new().add_modifier(Modifier::BOLD)),
                    Span::styled(format!("  [{tag}]"), Style::new().fg(colors::MUTED)),
                ])
            }
        };

        Paragraph::new(line).block(block).render(area, buf);
    }
}
