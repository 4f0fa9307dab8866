use ratatui::style::{Color, Style};

/// Palette used to color tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, derive_more::Display)]
pub enum ColorScheme {
    #[default]
    #[display("original")]
    Original,
    #[display("black-white")]
    BlackWhite,
    #[display("blue-red")]
    BlueRed,
}

/// 256-color palette indices for one tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileColors {
    pub fg: u8,
    pub bg: u8,
}

impl TileColors {
    #[must_use]
    pub const fn style(self) -> Style {
        Style::new()
            .fg(Color::Indexed(self.fg))
            .bg(Color::Indexed(self.bg))
    }
}

// (background, foreground) pairs, one per exponent starting at empty.
const ORIGINAL: [u8; 32] = [
    8, 255, 1, 255, 2, 255, 3, 255, 4, 255, 5, 255, 6, 255, 7, 255, //
    9, 0, 10, 0, 11, 0, 12, 0, 13, 0, 14, 0, 255, 0, 255, 0,
];
const BLACK_WHITE: [u8; 32] = [
    232, 255, 234, 255, 236, 255, 238, 255, 240, 255, 242, 255, 244, 255, 246, 0, //
    248, 0, 249, 0, 250, 0, 251, 0, 252, 0, 253, 0, 254, 0, 255, 0,
];
const BLUE_RED: [u8; 32] = [
    235, 255, 63, 255, 57, 255, 93, 255, 129, 255, 165, 255, 201, 255, 200, 255, //
    199, 255, 198, 255, 197, 255, 196, 255, 196, 255, 196, 255, 196, 255, 196, 255,
];

impl ColorScheme {
    const fn table(self) -> &'static [u8; 32] {
        match self {
            Self::Original => &ORIGINAL,
            Self::BlackWhite => &BLACK_WHITE,
            Self::BlueRed => &BLUE_RED,
        }
    }

    /// Returns the colors of a cell holding `exponent`.
    ///
    /// Exponents past the end of the table wrap around to its start.
    #[must_use]
    pub fn tile_colors(self, exponent: u8) -> TileColors {
        let table = self.table();
        let i = usize::from(exponent) * 2;
        TileColors {
            bg: table[i % table.len()],
            fg: table[(i + 1) % table.len()],
        }
    }
}
