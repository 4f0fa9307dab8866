use ratatui::{
    layout::{Constraint, Layout},
    prelude::{Buffer, Rect},
    style::Style,
    text::{Line, Span, Text},
    widgets::{Block, Clear, Widget},
};
use slidetile_engine::{GameSession, SessionState};

use crate::ui::{
    color_scheme::ColorScheme,
    widgets::{GridDisplay, color, style},
};

/// Title line, grid and any popup for one game session.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    session: &'a GameSession,
    scheme: ColorScheme,
    best: Option<u32>,
    prompt: Option<&'a str>,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(session: &'a GameSession, scheme: ColorScheme) -> Self {
        Self {
            session,
            scheme,
            best: None,
            prompt: None,
        }
    }

    pub fn best(self, best: Option<u32>) -> Self {
        Self { best, ..self }
    }

    /// Shows a confirmation popup over the grid.
    pub fn prompt(self, prompt: Option<&'a str>) -> Self {
        Self { prompt, ..self }
    }

    fn popup(&self) -> Option<(&'a str, Style)> {
        if let Some(prompt) = self.prompt {
            return Some((prompt, style::PROMPT));
        }
        match self.session.session_state() {
            SessionState::Playing | SessionState::AwaitingSpawn => None,
            SessionState::GameOver => Some(("GAME OVER", style::GAME_OVER)),
        }
    }

    fn grid_display(&self) -> GridDisplay<'a> {
        let border_color = match self.session.session_state() {
            SessionState::Playing | SessionState::AwaitingSpawn => color::GRAY,
            SessionState::GameOver => color::RED,
        };
        GridDisplay::new(self.session.state().grid(), self.scheme)
            .last_spawn(self.session.last_spawn())
            .block(Block::bordered().border_style(border_color))
    }

    pub fn width(&self) -> u16 {
        self.grid_display().width()
    }

    pub fn height(&self) -> u16 {
        self.grid_display().height() + 2
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let grid = self.grid_display();
        let [title_area, moves_area, grid_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(grid.height()),
        ])
        .areas(area);

        Line::styled("slidetile", style::TITLE).render(title_area, buf);
        let mut score = vec![Span::styled(
            format!("{} pts", self.session.score()),
            style::SCORE,
        )];
        if let Some(best) = self.best {
            score.push(Span::styled(format!("  best {best}"), style::BEST));
        }
        Line::from(score).right_aligned().render(title_area, buf);
        Line::styled(format!("moves {}", self.session.moves()), style::BEST)
            .right_aligned()
            .render(moves_area, buf);

        grid.render(grid_area, buf);

        if let Some((text, style)) = self.popup() {
            let block = Block::new().style(style);
            let popup_area = grid_area.centered(
                Constraint::Length(grid_area.width),
                Constraint::Length(3),
            );
            let inner = block.inner(popup_area);
            Clear.render(popup_area, buf);
            block.render(popup_area, buf);
            Text::styled(text, style)
                .centered()
                .render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}
