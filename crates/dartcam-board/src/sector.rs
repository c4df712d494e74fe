//! Fixed sector layout of a standard board.

use std::f64::consts::TAU;

/// Number of angular wedges.
pub const SECTOR_COUNT: usize = 20;

/// Angular width of one wedge in radians.
pub const SECTOR_WIDTH: f64 = TAU / SECTOR_COUNT as f64;

/// Board numbers clockwise, index 0 at straight up.
pub static SECTOR_NUMBERS: [u8; SECTOR_COUNT] = [
    20, 1, 18, 4, 13, 6, 10, 15, 2, 17, 3, 19, 7, 16, 8, 11, 14, 9, 12, 5,
];

/// Fold an angle in `[-TAU, 2 * TAU)` into `[0, TAU)` with one correction.
#[inline]
pub(crate) fn wrap_once(theta: f64) -> f64 {
    if theta < 0.0 {
        theta + TAU
    } else if theta >= TAU {
        theta - TAU
    } else {
        theta
    }
}

/// Wedge index for a normalized angle. Values rounding up to `TAU` stay in
/// the last wedge.
#[inline]
pub(crate) fn sector_index(theta: f64) -> usize {
    let idx = (theta / SECTOR_WIDTH).floor();
    if idx <= 0.0 {
        0
    } else {
        (idx as usize).min(SECTOR_COUNT - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_a_permutation_of_one_to_twenty() {
        let mut sorted = SECTOR_NUMBERS;
        sorted.sort_unstable();
        let expected: Vec<u8> = (1..=20).collect();
        assert_eq!(sorted.to_vec(), expected);
    }

    #[test]
    fn wedge_midpoints_map_to_their_index() {
        for i in 0..SECTOR_COUNT {
            let mid = (i as f64 + 0.5) * SECTOR_WIDTH;
            assert_eq!(sector_index(mid), i);
        }
    }

    #[test]
    fn edge_values_are_clamped() {
        assert_eq!(sector_index(0.0), 0);
        assert_eq!(sector_index(TAU), SECTOR_COUNT - 1);
        assert_eq!(sector_index(f64::from_bits(TAU.to_bits() - 1)), SECTOR_COUNT - 1);
    }

    #[test]
    fn single_wrap_covers_one_turn_either_side() {
        assert_eq!(wrap_once(-0.5), TAU - 0.5);
        assert_eq!(wrap_once(TAU + 0.25), 0.25);
        assert_eq!(wrap_once(1.0), 1.0);
    }
}
