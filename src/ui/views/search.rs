use std::time::Duration;

use async_trait::async_trait;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, List, ListState, Paragraph},
};
use tracing::debug;
use unicode_width::UnicodeWidthStr;

use crate::{
    event::events::Event,
    lifecycle::{RequestStatus, SearchLifecycle, Ticket},
    ui::{
        components::{MessageCard, Skeleton, track_card, track_card::CARD_HEIGHT},
        context::AppContext,
        state::{AppState, Route},
        text::translate,
        traits::{Action, View},
        view_model::{self, SearchResults},
    },
    util::{colors, debounce::Debouncer},
};

pub struct Search {
    input: String,
    is_editing: bool,
    list_state: ListState,
    lifecycle: SearchLifecycle,
    debouncer: Debouncer,
}

impl Search {
    /// `query` pre-fills the input and is searched once on mount.
    pub fn new(query: Option<String>, debounce: Duration) -> Self {
        let input = query.unwrap_or_default();

        Self {
            lifecycle: SearchLifecycle::new(input.clone()),
            is_editing: true,
            list_state: ListState::default(),
            debouncer: Debouncer::new(debounce),
            input,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_editing(&self) -> bool {
        self.is_editing
    }

    pub fn lifecycle(&self) -> &SearchLifecycle {
        &self.lifecycle
    }

    pub fn selected(&self) -> Option<usize> {
        self.list_state.selected()
    }

    fn request(&self, ctx: &AppContext, ticket: Ticket) {
        let _ = ctx.event_tx.send(Event::SearchRequested {
            ticket,
            query: self.lifecycle.query().to_string(),
        });
    }

    fn submit(&mut self, query: &str, ctx: &AppContext) {
        self.list_state.select(None);
        if let Some(ticket) = self.lifecycle.submit(query) {
            self.request(ctx, ticket);
        }
    }

    fn schedule_search(&mut self, ctx: &AppContext) {
        let tx = ctx.event_tx.clone();
        let owner = self.lifecycle.owner();
        let query = self.input.clone();

        self.debouncer.schedule(move || {
            let _ = tx.send(Event::SearchInputSettled { owner, query });
        });
    }

    fn cards(&self, ctx: &AppContext) -> Vec<view_model::Card> {
        match view_model::search_results(&self.lifecycle, ctx.audio.state()) {
            SearchResults::Cards(cards) => cards,
            _ => Vec::new(),
        }
    }

    fn render_input(&self, f: &mut Frame, area: Rect) {
        let border_style = if self.is_editing {
            Style::default().fg(colors::PRIMARY)
        } else {
            Style::default().fg(colors::NEUTRAL)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .title(translate("search"))
            .border_style(border_style);

        let text = if self.input.is_empty() {
            Span::styled(
                translate("songs_search_input_placeholder"),
                Style::default().fg(colors::MUTED),
            )
        } else {
            Span::raw(self.input.as_str())
        };

        let inner = block.inner(area);
        f.render_widget(Paragraph::new(text).block(block), area);

        if self.is_editing {
            let width = (self.input.width() as u16).min(inner.width.saturating_sub(1));
            f.set_cursor_position(Position::new(inner.x + width, inner.y));
        }
    }
}

#[async_trait]
impl View for Search {
    fn route(&self) -> Route {
        Route::Search
    }

    fn on_mount(&mut self, ctx: &AppContext) {
        if let Some(ticket) = self.lifecycle.mount() {
            self.request(ctx, ticket);
        }
    }

    fn on_unmount(&mut self) {
        self.debouncer.cancel();
        self.lifecycle.dispose();
    }

    fn render(&mut self, f: &mut Frame, area: Rect, _state: &AppState, ctx: &AppContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(1)])
            .split(area);

        self.render_input(f, chunks[0]);
        let results_area = chunks[1];

        match view_model::search_results(&self.lifecycle, ctx.audio.state()) {
            SearchResults::Loading { rows } => {
                f.render_widget(Skeleton::new(rows).row_height(CARD_HEIGHT), results_area);
            }
            SearchResults::Message(message) => {
                f.render_widget(MessageCard::new(&message), results_area);
            }
            SearchResults::Cards(cards) => {
                if self.list_state.selected().is_none_or(|i| i >= cards.len()) {
                    self.list_state.select(Some(0));
                }

                let highlight = if self.is_editing {
                    Style::default()
                } else {
                    Style::default()
                        .bg(colors::SKELETON)
                        .add_modifier(Modifier::BOLD)
                };

                let list = List::new(cards.iter().map(track_card))
                    .block(
                        Block::default()
                            .borders(Borders::TOP)
                            .title(translate("media_list"))
                            .border_style(Style::default().fg(colors::NEUTRAL)),
                    )
                    .highlight_style(highlight);

                f.render_stateful_widget(list, results_area, &mut self.list_state);
            }
        }
    }

    async fn handle_input(
        &mut self,
        key: KeyEvent,
        _state: &AppState,
        ctx: &AppContext,
    ) -> Option<Action> {
        if self.is_editing {
            return match key.code {
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => None,
                KeyCode::Char(c) => {
                    self.input.push(c);
                    self.schedule_search(ctx);
                    Some(Action::None)
                }
                KeyCode::Backspace => {
                    self.input.pop();
                    self.schedule_search(ctx);
                    Some(Action::None)
                }
                KeyCode::Enter => {
                    self.debouncer.cancel();
                    let query = self.input.clone();
                    self.submit(&query, ctx);
                    self.is_editing = false;
                    Some(Action::None)
                }
                KeyCode::Esc | KeyCode::Down | KeyCode::Tab => {
                    self.is_editing = false;
                    Some(Action::None)
                }
                _ => Some(Action::None),
            };
        }

        match key.code {
            KeyCode::Char('/') => {
                self.is_editing = true;
                Some(Action::None)
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let len = self.cards(ctx).len();
                if len > 0 {
                    let i = self.list_state.selected().map_or(0, |i| (i + 1).min(len - 1));
                    self.list_state.select(Some(i));
                }
                Some(Action::None)
            }
            KeyCode::Up | KeyCode::Char('k') => {
                match self.list_state.selected() {
                    Some(0) | None => self.is_editing = true,
                    Some(i) => self.list_state.select(Some(i - 1)),
                }
                Some(Action::None)
            }
            KeyCode::Enter => {
                let selected = self.list_state.selected()?;
                let card = self.cards(ctx).into_iter().nth(selected)?;
                Some(Action::OpenTrack(card.track))
            }
            KeyCode::Char(' ') | KeyCode::Char('p') => {
                let selected = self.list_state.selected()?;
                let card = self.cards(ctx).into_iter().nth(selected)?;
                Some(Action::TogglePlay(card.track))
            }
            _ => None,
        }
    }

    async fn on_event(&mut self, event: &Event, ctx: &AppContext) {
        match event {
            Event::SearchInputSettled { owner, query } if *owner == self.lifecycle.owner() => {
                if *query != self.input {
                    debug!(query = query.as_str(), "superseded_input_ignored");
                    return;
                }
                // Enter may already have submitted this text.
                if *query == self.lifecycle.query()
                    && self.lifecycle.status() != RequestStatus::Idle
                {
                    debug!(query = query.as_str(), "duplicate_search_skipped");
                    return;
                }
                self.submit(query, ctx);
            }
            Event::SearchResolved { ticket, result } if ticket.owner == self.lifecycle.owner() => {
                if self.lifecycle.resolve(*ticket, result.clone()) {
                    self.list_state.select(None);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        lifecycle::RequestStatus,
        model::{CatalogResponse, Track},
        ui::context::testing,
    };

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    async fn type_text(view: &mut Search, text: &str, ctx: &AppContext) {
        let state = AppState::default();
        for c in text.chars() {
            view.handle_input(key(KeyCode::Char(c)), &state, ctx).await;
        }
    }

    fn track(id: u64) -> Track {
        Track {
            id: Some(id),
            track_name: Some(format!("Song {id}")),
            collection_name: Some("Album".into()),
            artist_name: Some("Band".into()),
            country: Some("USA".into()),
            primary_genre_name: Some("Rock".into()),
            artwork_url: Some("http://x/a.jpg".into()),
            preview_url: Some(format!("http://x/{id}.m4a")),
            release_date: None,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn typing_searches_once_after_the_quiet_period() {
        let (ctx, rx) = testing::context();
        let mut view = Search::new(None, Duration::from_millis(200));
        view.on_mount(&ctx);

        type_text(&mut view, "thu", &ctx).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(250)).await;
        let settled = rx.try_recv().unwrap();
        assert!(matches!(
            &settled,
            Event::SearchInputSettled { query, .. } if query == "thu"
        ));
        assert!(rx.try_recv().is_err());

        view.on_event(&settled, &ctx).await;
        assert!(view.lifecycle().is_loading());
        assert!(matches!(
            rx.try_recv().unwrap(),
            Event::SearchRequested { query, .. } if query == "thu"
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn settled_input_after_enter_is_not_searched_twice() {
        let (ctx, rx) = testing::context();
        let mut view = Search::new(None, Duration::from_millis(200));
        view.on_mount(&ctx);

        type_text(&mut view, "acdc", &ctx).await;
        tokio::time::sleep(Duration::from_millis(250)).await;
        let settled = rx.try_recv().unwrap();
        assert!(matches!(&settled, Event::SearchInputSettled { .. }));

        view.handle_input(key(KeyCode::Enter), &AppState::default(), &ctx)
            .await;
        let Event::SearchRequested { ticket, query } = rx.try_recv().unwrap() else {
            panic!("expected a request on enter");
        };
        assert_eq!(query, "acdc");

        view.on_event(&settled, &ctx).await;
        assert!(rx.try_recv().is_err());

        view.on_event(
            &Event::SearchResolved {
                ticket,
                result: Ok(CatalogResponse {
                    result_count: 1,
                    results: vec![track(1)],
                }),
            },
            &ctx,
        )
        .await;
        view.on_event(&settled, &ctx).await;
        assert!(rx.try_recv().is_err());
        assert_eq!(view.lifecycle().status(), RequestStatus::Success);
        assert_eq!(view.lifecycle().results().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn clearing_the_input_goes_back_to_the_prompt() {
        let (ctx, rx) = testing::context();
        let mut view = Search::new(Some("cat".into()), Duration::from_millis(200));
        view.on_mount(&ctx);
        let Event::SearchRequested { ticket, .. } = rx.try_recv().unwrap() else {
            panic!("expected a request on mount");
        };
        view.on_event(
            &Event::SearchResolved {
                ticket,
                result: Ok(CatalogResponse {
                    result_count: 1,
                    results: vec![track(1)],
                }),
            },
            &ctx,
        )
        .await;
        assert_eq!(view.lifecycle().results().len(), 1);

        let state = AppState::default();
        for _ in 0..3 {
            view.handle_input(key(KeyCode::Backspace), &state, &ctx).await;
        }
        tokio::time::sleep(Duration::from_millis(250)).await;
        let settled = rx.try_recv().unwrap();
        view.on_event(&settled, &ctx).await;

        assert_eq!(view.lifecycle().status(), RequestStatus::Idle);
        assert!(rx.try_recv().is_err());
        assert!(matches!(
            view_model::search_results(view.lifecycle(), ctx.audio.state()),
            SearchResults::Message(_)
        ));
    }

    #[tokio::test]
    async fn enter_opens_and_space_toggles_the_selected_card() {
        let (ctx, rx) = testing::context();
        let mut view = Search::new(None, Duration::from_millis(200));
        let state = AppState::default();

        type_text(&mut view, "song", &ctx).await;
        view.handle_input(key(KeyCode::Enter), &state, &ctx).await;
        assert!(!view.is_editing());

        let ticket = loop {
            if let Event::SearchRequested { ticket, .. } = rx.recv_async().await.unwrap() {
                break ticket;
            }
        };
        view.on_event(
            &Event::SearchResolved {
                ticket,
                result: Ok(CatalogResponse {
                    result_count: 2,
                    results: vec![track(1), track(2)],
                }),
            },
            &ctx,
        )
        .await;

        view.handle_input(key(KeyCode::Char('j')), &state, &ctx).await;
        assert_eq!(view.selected(), Some(0));
        view.handle_input(key(KeyCode::Char('j')), &state, &ctx).await;
        assert_eq!(view.selected(), Some(1));
        view.handle_input(key(KeyCode::Char('j')), &state, &ctx).await;
        assert_eq!(view.selected(), Some(1));

        assert_eq!(
            view.handle_input(key(KeyCode::Enter), &state, &ctx).await,
            Some(Action::OpenTrack(track(2)))
        );
        assert_eq!(
            view.handle_input(key(KeyCode::Char(' ')), &state, &ctx).await,
            Some(Action::TogglePlay(track(2)))
        );
    }

    #[tokio::test]
    async fn responses_after_unmount_are_ignored() {
        let (ctx, rx) = testing::context();
        let mut view = Search::new(Some("late".into()), Duration::from_millis(200));
        view.on_mount(&ctx);
        let Event::SearchRequested { ticket, .. } = rx.try_recv().unwrap() else {
            panic!("expected a request on mount");
        };

        view.on_unmount();
        view.on_event(
            &Event::SearchResolved {
                ticket,
                result: Ok(CatalogResponse {
                    result_count: 1,
                    results: vec![track(1)],
                }),
            },
            &ctx,
        )
        .await;

        assert!(view.lifecycle().results().is_empty());
    }
}
