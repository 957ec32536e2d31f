use ratatui::crossterm::event::{KeyEvent, KeyEventKind};
use tracing::{debug, info, warn};

use crate::{
    audio::AudioCommand,
    event::events::Event,
    model::Track,
    ui::{
        app::App,
        input::InputHandler,
        state::Route,
        traits::Action,
        tui::{TerminalEvent, Tui},
        view_model::toggle_command,
        views::TrackDetail,
    },
};

pub struct EventHandler;

impl EventHandler {
    pub async fn handle_events(app: &mut App, tui: &mut Tui) -> color_eyre::Result<bool> {
        let mut should_render = false;
        if let Some(evt) = tui.next().await {
            if Self::handle_event(app, evt, tui).await? {
                should_render = true;
            }
        }

        while let Ok(evt) = app.event_rx.try_recv() {
            Self::handle_action(app, evt).await;
            should_render = true;
        }

        Ok(should_render)
    }

    pub async fn handle_event(
        app: &mut App,
        evt: TerminalEvent,
        tui: &mut Tui,
    ) -> color_eyre::Result<bool> {
        match evt {
            TerminalEvent::Init => {}
            TerminalEvent::FocusGained => {
                app.has_focus = true;
                tui.clear()?;
            }
            TerminalEvent::FocusLost => app.has_focus = false,
            TerminalEvent::Key(key) => Self::handle_key_event(app, key).await,
            TerminalEvent::Resize(..) => {}
            TerminalEvent::Tick => {
                return Ok(app.has_focus);
            }
        }

        Ok(true)
    }

    pub async fn handle_action(app: &mut App, evt: Event) {
        app.router.on_event(&evt, &app.ctx).await;

        match evt {
            Event::SearchRequested { ticket, query } => {
                let api = app.ctx.api.clone();
                let tx = app.ctx.event_tx.clone();

                app.task_manager.spawn(
                    "search",
                    tokio::spawn(async move {
                        let result = api.search(&query).await;
                        match &result {
                            Ok(response) => info!(
                                query = query.as_str(),
                                results = response.result_count,
                                "search_fetched"
                            ),
                            Err(e) => warn!(query = query.as_str(), error = %e, "search_failed"),
                        }
                        let _ = tx.send(Event::SearchResolved { ticket, result });
                    }),
                );
            }
            Event::TrackRequested { ticket, track_id } => {
                let api = app.ctx.api.clone();
                let tx = app.ctx.event_tx.clone();

                app.task_manager.spawn(
                    "detail",
                    tokio::spawn(async move {
                        let result = api.track(track_id).await;
                        if let Err(e) = &result {
                            warn!(track_id, error = %e, "track_lookup_failed");
                        }
                        let _ = tx.send(Event::TrackResolved { ticket, result });
                    }),
                );
            }
            Event::PlaybackFinished(source) => {
                app.ctx.audio.on_finished(&source);
            }
            _ => {}
        }
    }

    pub async fn handle_key_event(app: &mut App, evt: KeyEvent) {
        if evt.kind != KeyEventKind::Press {
            return;
        }

        let action = match app.router.handle_input(evt, &app.state, &app.ctx).await {
            Some(action) => Some(action),
            None => InputHandler::handle_key(evt),
        };

        if let Some(action) = action {
            Self::dispatch_action(app, action).await;
        }
    }

    pub async fn dispatch_action(app: &mut App, action: Action) {
        match action {
            Action::Quit => app.should_quit = true,
            Action::Back => {
                if app.router.pop() {
                    app.task_manager.abort("detail");
                    Self::navigated(app);
                }
            }
            Action::OpenTrack(track) => Self::open_track(app, track),
            Action::TogglePlay(track) => Self::toggle_play(app, track),
            Action::None => {}
        }
    }

    fn open_track(app: &mut App, track: Track) {
        let Some(track_id) = track.id else {
            debug!("open_without_id_ignored");
            return;
        };

        let view = Box::new(TrackDetail::new(track_id, Some(track)));
        match app.router.active_route() {
            Route::TrackDetail(_) => app.router.replace(view, &app.ctx),
            Route::Search => app.router.push(view, &app.ctx),
        }
        Self::navigated(app);
    }

    fn toggle_play(app: &mut App, track: Track) {
        let Some(cmd) = toggle_command(app.ctx.audio.state(), &track) else {
            debug!(track_id = ?track.id, "toggle_without_preview_ignored");
            return;
        };

        if let AudioCommand::LoadAndPlay(_) = cmd {
            app.state.data.now_playing = Some(track);
        }
        app.ctx.audio.handle_command(cmd);
    }

    /// Audio never outlives the screen that started it.
    fn navigated(app: &mut App) {
        app.state.ui.current_route = app.router.active_route();
        app.state.data.now_playing = None;
        app.ctx.audio.handle_command(AudioCommand::Reset);
    }
}
