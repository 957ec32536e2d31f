use async_trait::async_trait;
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::{
    event::events::Event,
    lifecycle::DetailLifecycle,
    model::Track,
    ui::{
        components::{MessageCard, Skeleton},
        context::AppContext,
        state::{AppState, Route},
        text::translate,
        traits::{Action, View},
        view_model::{self, Detail, TrackDetails},
    },
    util::colors,
};

/// Detail page for one track id. A different id means a new view.
pub struct TrackDetail {
    lifecycle: DetailLifecycle,
}

impl TrackDetail {
    /// `track` is the entry the user navigated from, if any; it is shown
    /// as-is and no lookup is made.
    pub fn new(track_id: u64, track: Option<Track>) -> Self {
        Self {
            lifecycle: DetailLifecycle::new(track_id, track),
        }
    }

    pub fn lifecycle(&self) -> &DetailLifecycle {
        &self.lifecycle
    }

    fn render_track(&self, f: &mut Frame, area: Rect, details: &TrackDetails) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(1)])
            .split(area);

        let icon = if details.is_playing { "⏸" } else { "▶" };
        let title = Line::from(vec![
            Span::styled(
                if details.has_preview {
                    format!("{icon} ")
                } else {
                    String::new()
                },
                Style::default().fg(colors::PRIMARY),
            ),
            Span::styled(
                details.title.clone().unwrap_or_default(),
                Style::default()
                    .fg(colors::PRIMARY)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        f.render_widget(
            Paragraph::new(title).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(translate("track_name")),
            ),
            chunks[0],
        );

        let mut lines: Vec<Line> = details
            .fields
            .iter()
            .map(|field| {
                Line::from(vec![
                    Span::styled(
                        format!("{:<10}", translate(field.label_key)),
                        Style::default().fg(colors::MUTED),
                    ),
                    Span::raw(field.value.clone()),
                ])
            })
            .collect();

        if let Some(thumbnail) = &details.thumbnail {
            lines.push(Line::default());
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{:<10}", translate("artwork")),
                    Style::default().fg(colors::MUTED),
                ),
                Span::styled(thumbnail.clone(), Style::default().fg(colors::NEUTRAL)),
            ]));
        }

        f.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .block(Block::default().borders(Borders::ALL)),
            chunks[1],
        );
    }
}

#[async_trait]
impl View for TrackDetail {
    fn route(&self) -> Route {
        Route::TrackDetail(self.lifecycle.track_id())
    }

    fn on_mount(&mut self, ctx: &AppContext) {
        if let Some(ticket) = self.lifecycle.mount() {
            let _ = ctx.event_tx.send(Event::TrackRequested {
                ticket,
                track_id: self.lifecycle.track_id(),
            });
        }
    }

    fn on_unmount(&mut self) {
        self.lifecycle.dispose();
    }

    fn render(&mut self, f: &mut Frame, area: Rect, _state: &AppState, ctx: &AppContext) {
        match view_model::detail(&self.lifecycle, ctx.audio.state()) {
            Detail::Loading { rows } => f.render_widget(Skeleton::new(rows), area),
            Detail::Message(message) => f.render_widget(MessageCard::new(&message), area),
            Detail::Track(details) => self.render_track(f, area, &details),
            Detail::Empty => {}
        }
    }

    async fn handle_input(
        &mut self,
        key: KeyEvent,
        _state: &AppState,
        _ctx: &AppContext,
    ) -> Option<Action> {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('p') => self
                .lifecycle
                .track()
                .map(|track| Action::TogglePlay(track.clone())),
            KeyCode::Backspace | KeyCode::Char('h') => Some(Action::Back),
            _ => None,
        }
    }

    async fn on_event(&mut self, event: &Event, _ctx: &AppContext) {
        if let Event::TrackResolved { ticket, result } = event {
            if ticket.owner == self.lifecycle.owner() {
                self.lifecycle.resolve(*ticket, result.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use ratatui::crossterm::event::KeyModifiers;

    use super::*;
    use crate::{http::ApiError, lifecycle::RequestStatus, ui::context::testing};

    fn track(id: u64) -> Track {
        Track {
            id: Some(id),
            track_name: Some("Thunderstruck".into()),
            preview_url: Some("http://x/1.m4a".into()),
            ..Track::default()
        }
    }

    #[tokio::test]
    async fn preloaded_detail_makes_no_request() {
        let (ctx, rx) = testing::context();
        let mut view = TrackDetail::new(1, Some(track(1)));
        view.on_mount(&ctx);

        assert!(rx.try_recv().is_err());
        assert_eq!(view.route(), Route::TrackDetail(1));
        assert_eq!(
            view.handle_input(
                KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE),
                &AppState::default(),
                &ctx
            )
            .await,
            Some(Action::TogglePlay(track(1)))
        );
    }

    #[tokio::test]
    async fn direct_entry_fetches_by_id() {
        let (ctx, rx) = testing::context();
        let mut view = TrackDetail::new(7, None);
        view.on_mount(&ctx);

        let Event::TrackRequested { ticket, track_id } = rx.try_recv().unwrap() else {
            panic!("expected a lookup");
        };
        assert_eq!(track_id, 7);
        assert!(view.lifecycle().is_loading());

        view.on_event(
            &Event::TrackResolved {
                ticket,
                result: Err(ApiError::NotFound(7)),
            },
            &ctx,
        )
        .await;
        assert_eq!(view.lifecycle().status(), RequestStatus::Error);
        assert_eq!(
            view.handle_input(
                KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE),
                &AppState::default(),
                &ctx
            )
            .await,
            None
        );
    }
}
