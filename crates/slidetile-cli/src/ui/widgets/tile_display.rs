use ratatui::{
    layout::Constraint,
    prelude::{Buffer, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Widget},
};

use crate::ui::color_scheme::ColorScheme;

/// One grid cell: a colored 7×3 box with the tile value in the middle row.
#[derive(Debug)]
pub struct TileDisplay {
    exponent: u8,
    style: Style,
}

impl TileDisplay {
    pub fn new(exponent: u8, scheme: ColorScheme) -> Self {
        Self {
            exponent,
            style: scheme.tile_colors(exponent).style(),
        }
    }

    /// Draws the value in bold, used for the most recently spawned tile.
    pub fn highlight(self, highlight: bool) -> Self {
        if highlight {
            Self {
                style: self.style.add_modifier(Modifier::BOLD),
                ..self
            }
        } else {
            self
        }
    }

    pub const fn width() -> u16 {
        7
    }

    pub const fn height() -> u16 {
        3
    }

    /// Text shown in the middle row.
    pub fn label(&self) -> String {
        if self.exponent == 0 {
            "·".to_owned()
        } else {
            1_u64.checked_shl(u32::from(self.exponent)).map_or_else(
                || format!("2^{}", self.exponent),
                |value| value.to_string(),
            )
        }
    }
}

impl Widget for TileDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &TileDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        // Fill the whole cell, not just the row with the label
        Block::new().style(self.style).render(area, buf);
        Line::styled(self.label(), self.style)
            .centered()
            .render(area.centered_vertically(Constraint::Length(1)), buf);
    }
}
