use super::{LINE_LEN, MAX_EXPONENT};

/// Result of sliding a single line toward its head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineSlide {
    /// Whether any tile moved or merged.
    pub changed: bool,
    /// Points gained from merges in this line.
    pub score_delta: u32,
}

/// Returns the points awarded for a merge that produced `exponent`.
///
/// Saturates at `u32::MAX` for exponents that do not fit.
#[must_use]
pub fn merge_points(exponent: u8) -> u32 {
    1_u32.checked_shl(u32::from(exponent)).unwrap_or(u32::MAX)
}

/// Returns whether cells holding `a` and `b` merge into one tile.
///
/// Tiles at [`MAX_EXPONENT`] or above never merge, so a merge cannot leave
/// the exponent range.
#[must_use]
pub const fn can_merge(a: u8, b: u8) -> bool {
    a != 0 && a == b && a < MAX_EXPONENT
}

/// Finds where the tile at `x` comes to rest.
///
/// Scans backward from `x - 1`. Empty cells are passed over unless they sit on
/// `stop`, a cell the tile can merge with is a merge target, and any other
/// tile blocks so the target becomes the cell right after it.
fn find_target(line: &[u8; LINE_LEN], x: usize, stop: usize) -> usize {
    if x == 0 {
        return x;
    }
    for t in (0..x).rev() {
        if line[t] != 0 {
            if !can_merge(line[t], line[x]) {
                return t + 1;
            }
            return t;
        }
        if t == stop {
            return t;
        }
    }
    x
}

/// Slides and merges one line toward index 0.
///
/// The line is swept once from left to right. Each merge moves the `stop`
/// boundary past the merged cell, so a cell that has already absorbed a tile
/// cannot absorb another one in the same pass.
///
/// # Example
///
/// ```
/// use slidetile_engine::slide_line;
///
/// let mut line = [1, 1, 1, 1];
/// let slide = slide_line(&mut line);
///
/// assert_eq!(line, [2, 2, 0, 0]);
/// assert!(slide.changed);
/// assert_eq!(slide.score_delta, 8);
/// ```
pub fn slide_line(line: &mut [u8; LINE_LEN]) -> LineSlide {
    let mut result = LineSlide::default();
    let mut stop = 0;

    for x in 0..LINE_LEN {
        if line[x] == 0 {
            continue;
        }
        let t = find_target(line, x, stop);
        if t == x {
            continue;
        }
        if line[t] == 0 {
            line[t] = line[x];
        } else if can_merge(line[t], line[x]) {
            line[t] += 1;
            result.score_delta = result.score_delta.saturating_add(merge_points(line[t]));
            stop = t + 1;
        }
        line[x] = 0;
        result.changed = true;
    }

    result
}

/// Known `(input, expected output)` slides in exponent notation.
///
/// Covers the single-pass merge rule on triple and quadruple runs.
pub const REFERENCE_SLIDES: &[([u8; 4], [u8; 4])] = &[
    ([0, 0, 0, 1], [1, 0, 0, 0]),
    ([0, 0, 1, 1], [2, 0, 0, 0]),
    ([0, 1, 0, 1], [2, 0, 0, 0]),
    ([1, 0, 0, 1], [2, 0, 0, 0]),
    ([1, 0, 1, 0], [2, 0, 0, 0]),
    ([1, 1, 1, 0], [2, 1, 0, 0]),
    ([1, 0, 1, 1], [2, 1, 0, 0]),
    ([1, 1, 0, 1], [2, 1, 0, 0]),
    ([1, 1, 1, 1], [2, 2, 0, 0]),
    ([2, 2, 1, 1], [3, 2, 0, 0]),
    ([1, 1, 2, 2], [2, 3, 0, 0]),
    ([3, 0, 1, 1], [3, 2, 0, 0]),
    ([2, 0, 1, 1], [2, 2, 0, 0]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_slides() {
        for (input, expected) in REFERENCE_SLIDES {
            let mut line = *input;
            slide_line(&mut line);
            assert_eq!(&line, expected, "input {input:?}");
        }
    }

    #[test]
    fn test_single_slide_scores_nothing() {
        let mut line = [0, 0, 0, 1];
        let slide = slide_line(&mut line);
        assert_eq!(line, [1, 0, 0, 0]);
        assert_eq!(
            slide,
            LineSlide {
                changed: true,
                score_delta: 0
            }
        );
    }

    #[test]
    fn test_pair_merge_scores_new_tile() {
        let mut line = [0, 0, 1, 1];
        let slide = slide_line(&mut line);
        assert_eq!(line, [2, 0, 0, 0]);
        assert_eq!(slide.score_delta, 4);
        assert!(slide.changed);
    }

    #[test]
    fn test_four_equal_merge_pairwise() {
        let mut line = [1, 1, 1, 1];
        let slide = slide_line(&mut line);
        assert_eq!(line, [2, 2, 0, 0]);
        assert_eq!(slide.score_delta, 8);
    }

    #[test]
    fn test_merged_cell_does_not_absorb_again() {
        for input in [[1, 0, 1, 1], [1, 1, 0, 1]] {
            let mut line = input;
            let slide = slide_line(&mut line);
            assert_eq!(line, [2, 1, 0, 0]);
            assert_eq!(slide.score_delta, 4);
        }
    }

    #[test]
    fn test_packed_line_is_unchanged() {
        let mut line = [1, 2, 3, 4];
        let slide = slide_line(&mut line);
        assert_eq!(line, [1, 2, 3, 4]);
        assert_eq!(slide, LineSlide::default());

        let mut line = [0; 4];
        assert!(!slide_line(&mut line).changed);
    }

    #[test]
    fn test_pair_merge_scores_exactly_for_every_exponent() {
        for v in 1..MAX_EXPONENT {
            let mut line = [0, v, 0, v];
            let slide = slide_line(&mut line);
            assert_eq!(line, [v + 1, 0, 0, 0], "exponent {v}");
            assert_eq!(slide.score_delta, 1_u32 << (v + 1), "exponent {v}");
        }
    }

    #[test]
    fn test_tiles_at_max_exponent_do_not_merge() {
        let mut line = [MAX_EXPONENT, MAX_EXPONENT, 0, 0];
        assert_eq!(slide_line(&mut line), LineSlide::default());
        assert_eq!(line, [MAX_EXPONENT, MAX_EXPONENT, 0, 0]);

        let mut line = [0, u8::MAX, 0, u8::MAX];
        let slide = slide_line(&mut line);
        assert_eq!(line, [u8::MAX, u8::MAX, 0, 0]);
        assert!(slide.changed);
        assert_eq!(slide.score_delta, 0);

        assert!(can_merge(MAX_EXPONENT - 1, MAX_EXPONENT - 1));
        assert!(!can_merge(0, 0));
        assert!(!can_merge(2, 3));
    }

    #[test]
    fn test_merge_points_saturates() {
        assert_eq!(merge_points(1), 2);
        assert_eq!(merge_points(11), 2048);
        assert_eq!(merge_points(31), 1 << 31);
        assert_eq!(merge_points(32), u32::MAX);
    }
}
