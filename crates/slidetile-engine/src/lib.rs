//! Engine for the 2048 sliding-tile puzzle.
//!
//! [`core`] holds the board and its pure transformations (slide, merge,
//! rotate, end-of-game detection). [`engine`] adds seeded tile spawning,
//! undo, persistence and the score log.

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;
