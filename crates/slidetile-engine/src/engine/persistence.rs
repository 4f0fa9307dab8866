//! Binary save format for suspending and resuming a game.
//!
//! The layout is fixed and little-endian:
//!
//! | offset | size | field |
//! |-------:|-----:|-------|
//! | 0 | 16 | grid cells, one exponent per byte, row-major |
//! | 16 | 4 | score (`u32`) |
//! | 20 | 8 | seed (`u64`) |
//!
//! A state file is single-use: [`load_state`] deletes it as soon as it has
//! been read, whether or not its contents turn out to be valid.

use std::{
    fs,
    io::{self, Read, Write},
    path::Path,
};

use crate::core::{CELL_COUNT, GRID_SIZE, Grid, MAX_EXPONENT};

use super::{game_state::GameState, tile_rng::GameSeed};

const SCORE_OFFSET: usize = CELL_COUNT;
const SEED_OFFSET: usize = SCORE_OFFSET + size_of::<u32>();

/// Size in bytes of an encoded [`GameState`].
pub const STATE_LEN: usize = SEED_OFFSET + size_of::<u64>();

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum PersistenceError {
    #[display("state file I/O failed")]
    Io(io::Error),
    #[display("state data has {len} bytes, expected {expected}")]
    WrongLength { len: usize, expected: usize },
    #[display("state data has invalid exponent {value} in cell {index}")]
    InvalidCell { index: usize, value: u8 },
}

impl From<io::Error> for PersistenceError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

/// Encodes `state` into its fixed binary layout.
///
/// # Example
///
/// ```
/// use slidetile_engine::{GameSeed, GameState, Grid, persistence};
///
/// let state = GameState::new(Grid::EMPTY, 2048, GameSeed::new(9));
/// let bytes = persistence::encode(&state);
///
/// assert_eq!(bytes.len(), persistence::STATE_LEN);
/// assert_eq!(persistence::decode(&bytes).unwrap(), state);
/// ```
#[must_use]
pub fn encode(state: &GameState) -> [u8; STATE_LEN] {
    let mut bytes = [0; STATE_LEN];
    for (dst, cell) in bytes[..CELL_COUNT].iter_mut().zip(state.grid().cells()) {
        *dst = cell;
    }
    bytes[SCORE_OFFSET..SEED_OFFSET].copy_from_slice(&state.score().to_le_bytes());
    bytes[SEED_OFFSET..].copy_from_slice(&state.seed().value().to_le_bytes());
    bytes
}

/// Decodes a state previously produced by [`encode`].
pub fn decode(bytes: &[u8]) -> Result<GameState, PersistenceError> {
    let bytes: &[u8; STATE_LEN] =
        bytes
            .try_into()
            .map_err(|_| PersistenceError::WrongLength {
                len: bytes.len(),
                expected: STATE_LEN,
            })?;

    let mut rows = [[0; GRID_SIZE]; GRID_SIZE];
    for (index, value) in bytes[..CELL_COUNT].iter().copied().enumerate() {
        if value > MAX_EXPONENT {
            return Err(PersistenceError::InvalidCell { index, value });
        }
        rows[index / GRID_SIZE][index % GRID_SIZE] = value;
    }

    let mut score = [0; size_of::<u32>()];
    score.copy_from_slice(&bytes[SCORE_OFFSET..SEED_OFFSET]);
    let mut seed = [0; size_of::<u64>()];
    seed.copy_from_slice(&bytes[SEED_OFFSET..]);

    Ok(GameState::new(
        Grid::from_rows(rows),
        u32::from_le_bytes(score),
        GameSeed::new(u64::from_le_bytes(seed)),
    ))
}

pub fn write_state<W>(mut writer: W, state: &GameState) -> io::Result<()>
where
    W: Write,
{
    writer.write_all(&encode(state))?;
    writer.flush()
}

pub fn read_state<R>(mut reader: R) -> Result<GameState, PersistenceError>
where
    R: Read,
{
    let mut bytes = Vec::with_capacity(STATE_LEN);
    reader.read_to_end(&mut bytes)?;
    decode(&bytes)
}

/// Writes `state` to `path`, creating the parent directory if needed.
///
/// The data goes to a sibling temporary file first and is then renamed over
/// `path`, so an interrupted save never leaves a half-written state file.
pub fn save_state(path: &Path, state: &GameState) -> Result<(), PersistenceError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let tmp_path = path.with_extension("tmp");
    write_state(fs::File::create(&tmp_path)?, state)?;
    fs::rename(&tmp_path, path)?;
    log::info!("saved game state to {}", path.display());
    Ok(())
}

/// Reads and consumes the state file at `path`.
///
/// Returns `Ok(None)` if the file is missing or cannot be read, which callers
/// treat as "start a fresh game". Malformed contents are an error, and the
/// file is removed in that case too.
pub fn load_state(path: &Path) -> Result<Option<GameState>, PersistenceError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) => {
            if err.kind() != io::ErrorKind::NotFound {
                log::warn!("cannot read state file {}: {err}", path.display());
            }
            return Ok(None);
        }
    };
    if let Err(err) = fs::remove_file(path) {
        log::warn!("cannot remove state file {}: {err}", path.display());
    }
    let state = decode(&bytes)?;
    log::info!("restored game state from {}", path.display());
    Ok(Some(state))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn arb_state() -> impl Strategy<Value = GameState> {
        (
            prop::array::uniform4(prop::array::uniform4(0_u8..=MAX_EXPONENT)),
            any::<u32>(),
            any::<u64>(),
        )
            .prop_map(|(rows, score, seed)| {
                GameState::new(Grid::from_rows(rows), score, GameSeed::new(seed))
            })
    }

    fn sample_state() -> GameState {
        GameState::new(
            Grid::from_rows([
                [1, 2, 3, 4], //
                [0, 0, 0, 0],
                [5, 0, 6, 0],
                [0, 17, 0, 11],
            ]),
            123_456,
            GameSeed::new(0x0102_0304_0506_0708),
        )
    }

    #[test]
    fn test_layout() {
        let bytes = encode(&sample_state());
        assert_eq!(bytes.len(), 28);
        assert_eq!(&bytes[..4], &[1, 2, 3, 4]);
        assert_eq!(&bytes[12..16], &[0, 17, 0, 11]);
        assert_eq!(&bytes[16..20], &123_456_u32.to_le_bytes());
        assert_eq!(&bytes[20..], &[8, 7, 6, 5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_roundtrip_through_stream() {
        let state = sample_state();
        let mut buf = Vec::new();
        write_state(&mut buf, &state).unwrap();
        assert_eq!(read_state(buf.as_slice()).unwrap(), state);
    }

    #[test]
    fn test_decode_rejects_wrong_length() {
        let bytes = encode(&sample_state());
        let err = decode(&bytes[..20]).unwrap_err();
        assert!(matches!(
            err,
            PersistenceError::WrongLength {
                len: 20,
                expected: 28
            }
        ));

        let mut long = bytes.to_vec();
        long.push(0);
        assert!(matches!(
            decode(&long),
            Err(PersistenceError::WrongLength { len: 29, .. })
        ));
        assert!(decode(&[]).is_err());
    }

    #[test]
    fn test_decode_rejects_oversized_exponent() {
        let mut bytes = encode(&sample_state());
        bytes[5] = MAX_EXPONENT + 1;
        assert!(matches!(
            decode(&bytes),
            Err(PersistenceError::InvalidCell { index: 5, value: 32 })
        ));
    }

    #[test]
    fn test_save_then_load_consumes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.bin");
        let state = sample_state();

        save_state(&path, &state).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());

        assert_eq!(load_state(&path).unwrap(), Some(state));
        assert!(!path.exists());
        assert_eq!(load_state(&path).unwrap(), None);
    }

    #[test]
    fn test_load_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_state(&dir.path().join("absent.bin")).unwrap(), None);
    }

    #[test]
    fn test_load_corrupt_file_is_error_and_consumed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.bin");
        fs::write(&path, [1, 2, 3]).unwrap();

        assert!(matches!(
            load_state(&path),
            Err(PersistenceError::WrongLength { len: 3, .. })
        ));
        assert!(!path.exists());
    }

    #[test]
    fn test_save_into_unwritable_location_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"not a directory").unwrap();

        let err = save_state(&blocker.join("state.bin"), &sample_state()).unwrap_err();
        assert!(matches!(err, PersistenceError::Io(_)));
    }

    proptest! {
        #[test]
        fn decode_inverts_encode(state in arb_state()) {
            let bytes = encode(&state);
            prop_assert_eq!(bytes.len(), STATE_LEN);
            prop_assert_eq!(decode(&bytes).unwrap(), state);
        }
    }
}
