use crate::core::{Direction, Grid, GridMove};

use super::tile_rng::{GameSeed, ReseedMode};

/// A tile placed by [`GameState::spawn_tile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spawn {
    pub x: usize,
    pub y: usize,
    pub exponent: u8,
}

/// The live `{grid, score, seed}` triple of a game.
///
/// This is exactly what gets persisted when a game is suspended, and what a
/// [`Snapshot`](super::Snapshot) holds for undo.
///
/// # Example
///
/// ```
/// use slidetile_engine::{GameSeed, GameState, ReseedMode};
///
/// let a = GameState::fresh(GameSeed::new(1), ReseedMode::Chained);
/// let b = GameState::fresh(GameSeed::new(1), ReseedMode::Chained);
///
/// assert_eq!(a, b);
/// assert_eq!(a.grid().count_empty(), 14);
/// assert_eq!(a.score(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameState {
    grid: Grid,
    score: u32,
    seed: GameSeed,
}

impl GameState {
    #[must_use]
    pub const fn new(grid: Grid, score: u32, seed: GameSeed) -> Self {
        Self { grid, score, seed }
    }

    /// Starts a new game: an empty grid with two random tiles.
    #[must_use]
    pub fn fresh(seed: GameSeed, mode: ReseedMode) -> Self {
        let mut state = Self::new(Grid::EMPTY, 0, seed);
        state.spawn_tile(mode);
        state.spawn_tile(mode);
        state
    }

    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub const fn seed(&self) -> GameSeed {
        self.seed
    }

    pub(crate) const fn set_seed(&mut self, seed: GameSeed) {
        self.seed = seed;
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.grid.is_game_over()
    }

    /// Slides the grid toward `direction` and adds the merge points to the
    /// score. Does not spawn.
    pub fn apply_move(&mut self, direction: Direction) -> GridMove {
        let result = self.grid.slide(direction);
        self.score = self.score.saturating_add(result.score_delta);
        result
    }

    /// Places one new tile in a uniformly chosen empty cell.
    ///
    /// The cell and its value are drawn from a generator seeded with the
    /// current seed; the seed then moves forward according to `mode`.
    /// Returns `None` and leaves the state untouched if the grid is full.
    pub fn spawn_tile(&mut self, mode: ReseedMode) -> Option<Spawn> {
        let empty = self.grid.empty_cells();
        if empty.is_empty() {
            return None;
        }

        let mut rng = self.seed.rng();
        let (x, y) = empty[rng.pick_index(empty.len())];
        let exponent = rng.pick_exponent();
        self.grid.set(x, y, exponent);
        self.seed = rng.into_next_seed(mode);

        log::debug!("spawned {} at ({x}, {y})", 1_u32 << exponent);
        Some(Spawn { x, y, exponent })
    }
}
