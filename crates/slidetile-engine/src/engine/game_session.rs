use std::path::Path;

use crate::core::Direction;

use super::{
    game_state::{GameState, Spawn},
    persistence::{self, PersistenceError},
    tile_rng::{GameSeed, ReseedMode},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    /// Waiting for a move.
    Playing,
    /// A move changed the grid and its tile has not been spawned yet.
    AwaitingSpawn,
    GameOver,
}

/// The state a session had right before its last successful move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot(GameState);

impl Snapshot {
    #[must_use]
    pub const fn state(&self) -> &GameState {
        &self.0
    }
}

/// How [`GameSession::resume_or_new`] obtained its game.
#[derive(Debug, derive_more::IsVariant)]
pub enum GameStart {
    /// A saved state was found and consumed.
    Restored,
    /// No saved state existed.
    Fresh,
    /// A saved state existed but could not be decoded; a fresh game was started.
    DiscardedCorrupt(PersistenceError),
}

/// One running game with a single level of undo.
///
/// A move is split in two halves so a front end can show the slide before the
/// new tile appears: [`Self::try_move`] slides the grid, and
/// [`Self::complete_move`] spawns the tile, advances the seed and checks for
/// the end of the game. Any command issued while a spawn is pending finishes
/// the spawn first, so no input is lost.
///
/// # Example
///
/// ```
/// use slidetile_engine::{Direction, GameSeed, GameSession, ReseedMode};
///
/// let mut session = GameSession::new(GameSeed::new(3), ReseedMode::Chained);
/// let before = *session.state();
///
/// let moved = Direction::ALL
///     .into_iter()
///     .any(|direction| session.play(direction));
/// assert!(moved);
/// assert_ne!(*session.state(), before);
///
/// assert!(session.undo());
/// assert_eq!(*session.state(), before);
/// assert!(!session.undo());
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    state: GameState,
    snapshot: Option<Snapshot>,
    reseed_mode: ReseedMode,
    session_state: SessionState,
    last_spawn: Option<Spawn>,
    moves: usize,
}

impl GameSession {
    /// Starts a fresh game from `seed`.
    #[must_use]
    pub fn new(seed: GameSeed, reseed_mode: ReseedMode) -> Self {
        Self::from_state(GameState::fresh(seed, reseed_mode), reseed_mode)
    }

    /// Continues a game from an existing state.
    #[must_use]
    pub fn from_state(state: GameState, reseed_mode: ReseedMode) -> Self {
        let session_state = if state.is_game_over() {
            SessionState::GameOver
        } else {
            SessionState::Playing
        };
        Self {
            state,
            snapshot: None,
            reseed_mode,
            session_state,
            last_spawn: None,
            moves: 0,
        }
    }

    /// Resumes the game saved at `path`, or starts a fresh one from `seed`.
    ///
    /// The state file is consumed either way.
    #[must_use]
    pub fn resume_or_new(path: &Path, seed: GameSeed, reseed_mode: ReseedMode) -> (Self, GameStart) {
        match persistence::load_state(path) {
            Ok(Some(state)) => (Self::from_state(state, reseed_mode), GameStart::Restored),
            Ok(None) => (Self::new(seed, reseed_mode), GameStart::Fresh),
            Err(err) => (
                Self::new(seed, reseed_mode),
                GameStart::DiscardedCorrupt(err),
            ),
        }
    }

    #[must_use]
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub const fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    #[must_use]
    pub const fn session_state(&self) -> SessionState {
        self.session_state
    }

    #[must_use]
    pub const fn reseed_mode(&self) -> ReseedMode {
        self.reseed_mode
    }

    /// Returns the tile placed by the most recent spawn of this session.
    #[must_use]
    pub const fn last_spawn(&self) -> Option<Spawn> {
        self.last_spawn
    }

    /// Number of successful moves since the session started, minus undos.
    #[must_use]
    pub const fn moves(&self) -> usize {
        self.moves
    }

    #[must_use]
    pub const fn score(&self) -> u32 {
        self.state.score()
    }

    /// Slides the grid toward `direction`.
    ///
    /// Returns `false` without touching anything if the move changes nothing
    /// or the game is over. On success the previous state becomes the undo
    /// snapshot and a spawn is left pending.
    pub fn try_move(&mut self, direction: Direction) -> bool {
        self.complete_move();
        if self.session_state.is_game_over() {
            return false;
        }

        let before = self.state;
        let result = self.state.apply_move(direction);
        if !result.changed {
            return false;
        }

        log::debug!("moved {direction}, +{} points", result.score_delta);
        self.snapshot = Some(Snapshot(before));
        self.last_spawn = None;
        self.moves += 1;
        self.session_state = SessionState::AwaitingSpawn;
        true
    }

    /// Finishes a pending move: spawns a tile and checks for the end of the
    /// game. Does nothing if no spawn is pending.
    pub fn complete_move(&mut self) {
        if !self.session_state.is_awaiting_spawn() {
            return;
        }
        self.last_spawn = self.state.spawn_tile(self.reseed_mode);
        self.session_state = if self.state.is_game_over() {
            log::info!("game over with {} points", self.state.score());
            SessionState::GameOver
        } else {
            SessionState::Playing
        };
    }

    /// Moves toward `direction` and completes the move right away.
    pub fn play(&mut self, direction: Direction) -> bool {
        let moved = self.try_move(direction);
        self.complete_move();
        moved
    }

    /// Restores the state from before the last successful move.
    ///
    /// Only one level is kept, so a second undo in a row returns `false`. With
    /// [`ReseedMode::WallClock`] the restored seed is replaced by a new one
    /// from the clock, so repeating the move does not repeat its spawn.
    pub fn undo(&mut self) -> bool {
        let Some(Snapshot(state)) = self.snapshot.take() else {
            return false;
        };
        self.state = state;
        if self.reseed_mode.is_wall_clock() {
            self.state.set_seed(GameSeed::from_wall_clock());
        }
        self.session_state = SessionState::Playing;
        self.last_spawn = None;
        self.moves = self.moves.saturating_sub(1);
        log::debug!("undo to {} points", self.state.score());
        true
    }

    /// Throws the current game away and starts a fresh one.
    pub fn restart(&mut self, seed: GameSeed) {
        *self = Self::new(seed, self.reseed_mode);
    }

    /// Finishes any pending move and writes the state to `path`.
    pub fn save(&mut self, path: &Path) -> Result<(), PersistenceError> {
        self.complete_move();
        persistence::save_state(path, &self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Grid;

    fn session_with(rows: [[u8; 4]; 4]) -> GameSession {
        GameSession::from_state(
            GameState::new(Grid::from_rows(rows), 0, GameSeed::new(17)),
            ReseedMode::Chained,
        )
    }

    #[test]
    fn test_noop_move_keeps_state_and_snapshot() {
        let mut session = session_with([
            [1, 0, 0, 0], //
            [0, 0, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ]);
        assert!(!session.try_move(Direction::Left));
        assert!(!session.try_move(Direction::Up));
        assert!(session.snapshot().is_none());
        assert!(session.session_state().is_playing());
        assert_eq!(session.moves(), 0);
    }

    #[test]
    fn test_blocked_move_keeps_previous_snapshot() {
        let mut session = session_with([
            [1, 2, 3, 4], //
            [2, 3, 4, 5],
            [3, 4, 5, 6],
            [0, 5, 6, 7],
        ]);
        let before = *session.state();
        assert!(session.play(Direction::Down));

        // the spawn lands in the top-left corner; pick the direction it blocks
        let blocked = if session.state().grid().get(0, 0) == 1 {
            Direction::Left
        } else {
            Direction::Down
        };
        assert!(!session.try_move(blocked));
        assert_eq!(session.snapshot().map(|snapshot| *snapshot.state()), Some(before));

        assert!(session.undo());
        assert_eq!(*session.state(), before);
    }

    #[test]
    fn test_move_then_spawn() {
        let mut session = session_with([
            [1, 1, 0, 0], //
            [0, 0, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ]);
        let before = *session.state();

        assert!(session.try_move(Direction::Left));
        assert!(session.session_state().is_awaiting_spawn());
        assert_eq!(session.state().grid().count_empty(), 15);
        assert_eq!(session.score(), 4);
        assert_eq!(session.snapshot().map(Snapshot::state), Some(&before));

        session.complete_move();
        assert!(session.session_state().is_playing());
        assert_eq!(session.state().grid().count_empty(), 14);
        assert!(session.last_spawn().is_some());
        assert_ne!(session.state().seed(), before.seed());
    }

    #[test]
    fn test_next_move_completes_pending_spawn() {
        let mut session = session_with([
            [1, 1, 0, 0], //
            [0, 0, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ]);
        assert!(session.try_move(Direction::Left));
        // the pending tile lands before the next slide
        assert!(session.try_move(Direction::Right));
        let snapshot = session.snapshot().unwrap().state();
        assert_eq!(snapshot.grid().count_empty(), 14);
    }

    #[test]
    fn test_undo_restores_state_and_seed() {
        let mut session = GameSession::new(GameSeed::new(2024), ReseedMode::Chained);
        let before = *session.state();
        let direction = Direction::ALL
            .into_iter()
            .find(|direction| session.play(*direction))
            .unwrap();
        let after = *session.state();

        assert!(session.undo());
        assert_eq!(*session.state(), before);
        assert_eq!(session.moves(), 0);
        assert!(!session.undo());

        // same seed, same move, same spawn
        assert!(session.play(direction));
        assert_eq!(*session.state(), after);
    }

    #[test]
    fn test_undo_with_wall_clock_reseeds() {
        let mut session = GameSession::new(GameSeed::new(5), ReseedMode::WallClock);
        let before = *session.state();
        assert!(
            Direction::ALL
                .into_iter()
                .any(|direction| session.play(direction))
        );
        assert!(session.undo());
        assert_eq!(session.state().grid(), before.grid());
        assert_eq!(session.score(), before.score());
    }

    #[test]
    fn test_undo_pending_move_drops_spawn() {
        let mut session = session_with([
            [2, 2, 0, 0], //
            [0, 0, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ]);
        let before = *session.state();
        assert!(session.try_move(Direction::Right));
        assert!(session.undo());
        assert_eq!(*session.state(), before);
        assert!(session.session_state().is_playing());
    }

    #[test]
    fn test_game_over_after_last_spawn() {
        // one empty cell whose spawn leaves no legal move
        let mut session = session_with([
            [1, 2, 1, 2], //
            [2, 1, 2, 1],
            [1, 2, 1, 2],
            [3, 4, 3, 0],
        ]);
        assert!(session.try_move(Direction::Right));
        assert_eq!(session.state().grid().rows()[3], [0, 3, 4, 3]);
        session.complete_move();
        let spawned = session.last_spawn().unwrap();
        assert_eq!((spawned.x, spawned.y), (0, 3));
        // the game goes on only if the new tile matches the 1 above it
        assert_eq!(spawned.exponent == 1, session.session_state().is_playing());
        assert_eq!(
            session.session_state().is_game_over(),
            session.state().is_game_over()
        );
        if session.session_state().is_game_over() {
            assert!(!session.try_move(Direction::Left));
        }
    }

    #[test]
    fn test_from_state_detects_game_over() {
        let session = session_with([
            [1, 2, 1, 2], //
            [2, 1, 2, 1],
            [1, 2, 1, 2],
            [2, 1, 2, 1],
        ]);
        assert!(session.session_state().is_game_over());
    }

    #[test]
    fn test_score_never_decreases() {
        let mut session = GameSession::new(GameSeed::new(77), ReseedMode::Chained);
        let mut last = session.score();
        for step in 0..500 {
            session.play(Direction::ALL[step % 4]);
            assert!(session.score() >= last);
            last = session.score();
            if session.session_state().is_game_over() {
                break;
            }
        }
    }

    #[test]
    fn test_resume_or_new() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.bin");

        let (mut session, start) =
            GameSession::resume_or_new(&path, GameSeed::new(1), ReseedMode::Chained);
        assert!(start.is_fresh());
        session.play(Direction::Left);
        session.play(Direction::Up);
        session.save(&path).unwrap();

        let (resumed, start) =
            GameSession::resume_or_new(&path, GameSeed::new(99), ReseedMode::Chained);
        assert!(start.is_restored());
        assert_eq!(resumed.state(), session.state());
        assert!(!path.exists());

        std::fs::write(&path, [0xff; 4]).unwrap();
        let (_, start) = GameSession::resume_or_new(&path, GameSeed::new(1), ReseedMode::Chained);
        assert!(start.is_discarded_corrupt());
    }

    #[test]
    fn test_restart_clears_snapshot() {
        let mut session = GameSession::new(GameSeed::new(8), ReseedMode::WallClock);
        Direction::ALL.into_iter().any(|direction| session.play(direction));
        session.restart(GameSeed::new(9));
        assert!(session.snapshot().is_none());
        assert_eq!(session.score(), 0);
        assert_eq!(session.moves(), 0);
        assert!(session.reseed_mode().is_wall_clock());
    }
}
