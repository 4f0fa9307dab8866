/// One of the four directions a move can slide the grid toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Direction {
    #[display("up")]
    Up,
    #[display("left")]
    Left,
    #[display("down")]
    Down,
    #[display("right")]
    Right,
}

impl Direction {
    pub const ALL: [Self; 4] = [Self::Up, Self::Left, Self::Down, Self::Right];

    /// Number of clockwise quarter turns that bring this direction's target
    /// edge to the top of the grid.
    #[must_use]
    pub const fn quarter_turns(self) -> usize {
        match self {
            Self::Up => 0,
            Self::Left => 1,
            Self::Down => 2,
            Self::Right => 3,
        }
    }
}
