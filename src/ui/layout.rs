use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols::border,
    text::Span,
    widgets::{Block, Borders},
};

use crate::{
    ui::{app::App, components::NowPlaying, text::translate},
    util::colors,
};

pub struct AppLayout<'a> {
    pub app: &'a mut App,
}

impl<'a> AppLayout<'a> {
    pub fn new(app: &'a mut App) -> Self {
        Self { app }
    }

    pub fn render(self, f: &mut Frame, area: Rect) {
        let buf = f.buffer_mut();
        buf.set_style(area, Style::new().bg(colors::BACKGROUND));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(3)])
            .split(area);

        let content_area = chunks[0];
        let player_area = chunks[1];

        let route = self.app.router.active_route();
        let content_block = Block::default()
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .title(Span::styled(
                format!(" tunescout · {} ", translate(route.title_key())),
                Style::new().fg(colors::PRIMARY).add_modifier(Modifier::BOLD),
            ))
            .title_alignment(Alignment::Center);

        let content_inner = content_block.inner(content_area);
        f.render_widget(content_block, content_area);

        self.app
            .router
            .render(f, content_inner, &self.app.state, &self.app.ctx);

        f.render_widget(
            NowPlaying::new(
                self.app.ctx.audio.state(),
                self.app.state.data.now_playing.as_ref(),
            ),
            player_area,
        );
    }
}
