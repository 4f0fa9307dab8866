use std::time::{SystemTime, UNIX_EPOCH};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;

/// Visible random state of a game.
///
/// The seed is not a live generator. Every random decision reseeds a fresh
/// [`TileRng`] from it, and the next seed is drawn from that generator once
/// the decision is made. Two games that share a grid and a seed therefore
/// spawn the same tiles, which is what makes replay and debugging possible.
///
/// # Example
///
/// ```
/// use slidetile_engine::GameSeed;
///
/// let seed = GameSeed::new(42);
/// let mut a = seed.rng();
/// let mut b = seed.rng();
///
/// assert_eq!(a.pick_index(16), b.pick_index(16));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSeed(u64);

impl GameSeed {
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Takes a seed from the current wall-clock time.
    ///
    /// Falls back to zero if the clock is set before the unix epoch.
    #[must_use]
    pub fn from_wall_clock() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| {
                elapsed
                    .as_secs()
                    .wrapping_mul(1_000_000_000)
                    .wrapping_add(u64::from(elapsed.subsec_nanos()))
            });
        Self(nanos)
    }

    /// Creates a generator freshly seeded from this seed.
    #[must_use]
    pub fn rng(self) -> TileRng {
        TileRng {
            rng: Pcg32::seed_from_u64(self.0),
        }
    }

    /// Returns the seed that follows this one in `mode`.
    #[must_use]
    pub fn advance(self, mode: ReseedMode) -> Self {
        self.rng().into_next_seed(mode)
    }
}

impl Distribution<GameSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> GameSeed {
        GameSeed(rng.random())
    }
}

/// How the seed moves forward after each spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::IsVariant)]
pub enum ReseedMode {
    /// The next seed is drawn from the generator seeded by the current one.
    #[default]
    Chained,
    /// The next seed comes from the wall clock ("seed hacking").
    ///
    /// Breaks replay on purpose, so undoing a move and repeating it does not
    /// reveal the same spawn.
    WallClock,
}

/// Short-lived generator for a single random decision.
#[derive(Debug, Clone)]
pub struct TileRng {
    rng: Pcg32,
}

impl TileRng {
    /// Draws an index uniformly from `0..len`.
    ///
    /// # Panics
    ///
    /// Panics if `len` is zero.
    pub fn pick_index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }

    /// Draws the exponent of a new tile: `1` nine times out of ten, else `2`.
    pub fn pick_exponent(&mut self) -> u8 {
        if self.rng.random_ratio(1, 10) { 2 } else { 1 }
    }

    /// Consumes the generator and produces the next seed.
    #[must_use]
    pub fn into_next_seed(mut self, mode: ReseedMode) -> GameSeed {
        match mode {
            ReseedMode::Chained => GameSeed(self.rng.random()),
            ReseedMode::WallClock => GameSeed::from_wall_clock(),
        }
    }
}
