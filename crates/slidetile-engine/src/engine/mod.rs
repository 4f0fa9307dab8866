//! Game state, randomness, and everything that outlives a single move.
//!
//! This module builds gameplay on top of the pure grid transformations in
//! [`crate::core`]:
//!
//! - [`GameState`] - The `{grid, score, seed}` triple of a game
//! - [`GameSeed`] / [`TileRng`] - Seed-per-draw random decisions
//! - [`GameSession`] - Move sequencing, spawning and one level of undo
//! - [`persistence`] - Binary save format for suspending a game
//! - [`ScoreLog`] - History of finished sessions
//!
//! # Game Flow
//!
//! 1. Start a [`GameSession`], either fresh (two random tiles) or from a
//!    saved state
//! 2. Slide the grid with [`GameSession::try_move`]
//! 3. On success, spawn a tile with [`GameSession::complete_move`]; the seed
//!    moves forward and the end of the game is checked
//! 4. Repeat until [`SessionState::GameOver`]
//!
//! [`GameSession::play`] performs steps 2 and 3 at once.

pub use self::{game_session::*, game_state::*, score_log::*, tile_rng::*};

mod game_session;
mod game_state;
pub mod persistence;
mod score_log;
mod tile_rng;
