use std::iter;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt, Widget},
};
use slidetile_engine::{GRID_SIZE, Grid, Spawn};

use crate::ui::{color_scheme::ColorScheme, widgets::TileDisplay};

#[derive(Debug)]
pub struct GridDisplay<'a> {
    grid: &'a Grid,
    scheme: ColorScheme,
    last_spawn: Option<Spawn>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> GridDisplay<'a> {
    pub fn new(grid: &'a Grid, scheme: ColorScheme) -> Self {
        Self {
            grid,
            scheme,
            last_spawn: None,
            block: None,
        }
    }

    pub fn last_spawn(self, last_spawn: Option<Spawn>) -> Self {
        Self { last_spawn, ..self }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn width(&self) -> u16 {
        GRID_SIZE as u16 * TileDisplay::width()
            + super::block_horizontal_margin(self.block.as_ref())
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        GRID_SIZE as u16 * TileDisplay::height()
            + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for GridDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &GridDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let col_constraints = (0..GRID_SIZE).map(|_| Constraint::Length(TileDisplay::width()));
        let row_constraints = (0..GRID_SIZE).map(|_| Constraint::Length(TileDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_cells = area
            .layout::<GRID_SIZE>(&vertical)
            .into_iter()
            .map(|row| row.layout::<GRID_SIZE>(&horizontal));

        for (y, (grid_row, row)) in iter::zip(grid_cells, self.grid.rows()).enumerate() {
            for (x, (grid_cell, exponent)) in iter::zip(grid_row, row).enumerate() {
                let is_new = self
                    .last_spawn
                    .is_some_and(|spawn| spawn.x == x && spawn.y == y);
                TileDisplay::new(*exponent, self.scheme)
                    .highlight(is_new)
                    .render(grid_cell, buf);
            }
        }
    }
}
