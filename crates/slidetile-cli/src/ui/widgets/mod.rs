use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub use self::{
    grid_display::*, key_binding_display::*, session_display::*, tile_display::*,
};

mod grid_display;
mod key_binding_display;
mod session_display;
mod tile_display;

mod color {
    use ratatui::style::Color;

    pub const GRAY: Color = Color::Indexed(244);
    pub const RED: Color = Color::Indexed(196);
    pub const YELLOW: Color = Color::Indexed(226);
    pub const BLACK: Color = Color::Indexed(0);
    pub const WHITE: Color = Color::Indexed(255);
}

pub mod style {
    use ratatui::style::{Color, Modifier, Style};

    use crate::ui::widgets::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    pub const TITLE: Style = Style::new().fg(color::WHITE).add_modifier(Modifier::BOLD);
    pub const SCORE: Style = Style::new().fg(color::YELLOW);
    pub const BEST: Style = Style::new().fg(color::GRAY);
    pub const NOTICE: Style = Style::new().fg(color::GRAY);
    pub const GAME_OVER: Style = fg_bg(color::WHITE, color::RED);
    pub const PROMPT: Style = fg_bg(color::BLACK, color::YELLOW);
}

fn block_vertical_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.height - inner_rect.height
}

fn block_horizontal_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.width - inner_rect.width
}
