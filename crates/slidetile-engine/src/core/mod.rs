//! Board representation and the pure transformations over it.
//!
//! Nothing in this module touches randomness or I/O. Every function here is
//! total over any [`Grid`].

pub use self::{direction::*, grid::*, line::*};

pub(crate) mod direction;
pub(crate) mod grid;
pub(crate) mod line;

/// Width and height of the board.
pub const GRID_SIZE: usize = 4;

/// Number of cells in one row or column.
pub(crate) const LINE_LEN: usize = GRID_SIZE;

/// Largest exponent a cell may hold (2^31 is the biggest tile a `u32` score
/// can still account for).
pub const MAX_EXPONENT: u8 = 31;
