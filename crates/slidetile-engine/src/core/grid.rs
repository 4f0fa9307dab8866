use arrayvec::ArrayVec;

use super::{
    GRID_SIZE, LINE_LEN,
    direction::Direction,
    line::{LineSlide, can_merge, slide_line},
};

/// Number of cells on the board.
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// Result of applying one directional move to a whole grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridMove {
    /// Whether any column (after rotation) changed.
    pub changed: bool,
    /// Points gained from all merges of the move.
    pub score_delta: u32,
}

impl GridMove {
    fn absorb(&mut self, slide: LineSlide) {
        self.changed |= slide.changed;
        self.score_delta = self.score_delta.saturating_add(slide.score_delta);
    }
}

/// The 4×4 board.
///
/// Cells are stored row-major (`rows[y][x]`, `y == 0` is the top row). A cell
/// holds an exponent: `0` is empty and `v > 0` is a tile worth `2^v`.
///
/// All four directional moves share a single code path: the grid is rotated
/// so the target edge faces up, every column is slid toward the top, and the
/// grid is rotated back.
///
/// # Example
///
/// ```
/// use slidetile_engine::{Direction, Grid};
///
/// let mut grid = Grid::from_rows([
///     [0, 0, 1, 1],
///     [0, 0, 0, 0],
///     [0, 0, 0, 0],
///     [0, 0, 0, 0],
/// ]);
/// let result = grid.slide(Direction::Left);
///
/// assert!(result.changed);
/// assert_eq!(result.score_delta, 4);
/// assert_eq!(grid.rows()[0], [2, 0, 0, 0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Grid {
    rows: [[u8; GRID_SIZE]; GRID_SIZE],
}

impl Grid {
    pub const SIZE: usize = GRID_SIZE;

    pub const EMPTY: Self = Self {
        rows: [[0; GRID_SIZE]; GRID_SIZE],
    };

    #[must_use]
    pub const fn from_rows(rows: [[u8; GRID_SIZE]; GRID_SIZE]) -> Self {
        Self { rows }
    }

    #[must_use]
    pub const fn rows(&self) -> &[[u8; GRID_SIZE]; GRID_SIZE] {
        &self.rows
    }

    /// Returns the exponent stored at column `x`, row `y`.
    #[must_use]
    pub const fn get(&self, x: usize, y: usize) -> u8 {
        self.rows[y][x]
    }

    pub const fn set(&mut self, x: usize, y: usize, value: u8) {
        self.rows[y][x] = value;
    }

    /// Iterates over all cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = u8> + '_ {
        self.rows.iter().flatten().copied()
    }

    /// Returns `(x, y)` of every empty cell in row-major order.
    #[must_use]
    pub fn empty_cells(&self) -> ArrayVec<(usize, usize), CELL_COUNT> {
        let mut cells = ArrayVec::new();
        for (y, row) in self.rows.iter().enumerate() {
            for (x, value) in row.iter().enumerate() {
                if *value == 0 {
                    cells.push((x, y));
                }
            }
        }
        cells
    }

    #[must_use]
    pub fn count_empty(&self) -> usize {
        self.cells().filter(|v| *v == 0).count()
    }

    /// Returns the largest exponent on the board (`0` for an empty board).
    #[must_use]
    pub fn max_exponent(&self) -> u8 {
        self.cells().max().unwrap_or(0)
    }

    /// Rotates the grid a quarter turn clockwise in place.
    ///
    /// Works ring by ring from the outside in, cycling four cells at a time.
    pub fn rotate(&mut self) {
        const N: usize = GRID_SIZE;
        let g = &mut self.rows;
        for i in 0..N / 2 {
            for j in i..N - i - 1 {
                let tmp = g[i][j];
                g[i][j] = g[N - 1 - j][i];
                g[N - 1 - j][i] = g[N - 1 - i][N - 1 - j];
                g[N - 1 - i][N - 1 - j] = g[j][N - 1 - i];
                g[j][N - 1 - i] = tmp;
            }
        }
    }

    /// Applies [`Self::rotate`] `n` times.
    pub fn rotate_n(&mut self, n: usize) {
        for _ in 0..n % 4 {
            self.rotate();
        }
    }

    /// Slides every column toward the top row.
    fn slide_up(&mut self) -> GridMove {
        let mut result = GridMove::default();
        for x in 0..GRID_SIZE {
            let mut column: [u8; LINE_LEN] = std::array::from_fn(|y| self.rows[y][x]);
            result.absorb(slide_line(&mut column));
            for (y, value) in column.into_iter().enumerate() {
                self.rows[y][x] = value;
            }
        }
        result
    }

    /// Slides and merges all tiles toward `direction`.
    pub fn slide(&mut self, direction: Direction) -> GridMove {
        let turns = direction.quarter_turns();
        self.rotate_n(turns);
        let result = self.slide_up();
        self.rotate_n((4 - turns) % 4);
        result
    }

    /// Returns `true` if any two horizontally adjacent cells can merge.
    fn has_horizontal_pair(&self) -> bool {
        self.rows
            .iter()
            .any(|row| row.windows(2).any(|pair| can_merge(pair[0], pair[1])))
    }

    /// Returns `true` if no move can change the grid.
    ///
    /// That is the case exactly when the board is full and no two
    /// orthogonally adjacent cells can merge.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        if self.count_empty() > 0 || self.has_horizontal_pair() {
            return false;
        }
        let mut rotated = *self;
        rotated.rotate();
        !rotated.has_horizontal_pair()
    }
}

impl From<[[u8; GRID_SIZE]; GRID_SIZE]> for Grid {
    fn from(rows: [[u8; GRID_SIZE]; GRID_SIZE]) -> Self {
        Self::from_rows(rows)
    }
}
