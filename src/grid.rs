//! Subplot placement, item windows and square-image reshaping.

use crate::error::{PlotError, Result};
use crate::options::Subplots;
use crate::series::Placement;

/// Cell for the `index`-th item of a window, flattened row-major against `columns`.
///
/// `columns` must be non-zero; the builder checks this before placing anything.
#[inline]
pub fn placement(index: usize, columns: usize) -> Placement {
    Placement::new(index / columns, index % columns)
}

/// Column count of `subplots`, rejecting an empty grid. `option` names the field in the error.
pub fn checked_columns(subplots: &Subplots, option: &'static str) -> Result<usize> {
    match subplots.columns {
        0 => Err(PlotError::invalid(option, "subplot grid needs at least one column")),
        c => Ok(c),
    }
}

/// Skip `skip` items, then take at most `count`. Out-of-range windows truncate.
pub fn window<T>(data: &[T], skip: usize, count: usize) -> &[T] {
    let start = skip.min(data.len());
    let end = start.saturating_add(count).min(data.len());
    &data[start..end]
}

/// Reinterpret a flat vector as a square row-major grid.
///
/// The side is `floor(sqrt(n))`; for non-square lengths the trailing
/// `n - side²` values are dropped.
pub fn reshape_square(flat: &[f64]) -> Vec<Vec<f64>> {
    let side = integer_sqrt(flat.len());
    flat.chunks_exact(side.max(1))
        .take(side)
        .map(<[f64]>::to_vec)
        .collect()
}

fn integer_sqrt(n: usize) -> usize {
    let mut k = (n as f64).sqrt() as usize;
    // Float rounding can be off by one for large n.
    while k * k > n {
        k -= 1;
    }
    while (k + 1) * (k + 1) <= n {
        k += 1;
    }
    k
}

/// Grid used for dictionary plots: one column for small dictionaries, 4×4 otherwise.
pub fn auto_subplots(num_bases: usize) -> Subplots {
    if num_bases < 16 {
        Subplots::shared(num_bases, 1)
    } else {
        Subplots::shared(4, 4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placement_is_row_major() {
        assert_eq!(placement(0, 3), Placement::new(0, 0));
        assert_eq!(placement(4, 3), Placement::new(1, 1));
        assert_eq!(placement(5, 1), Placement::new(5, 0));
    }

    #[test]
    fn window_truncates() {
        let v = [1, 2, 3, 4, 5];
        assert_eq!(window(&v, 1, 2), &[2, 3]);
        assert_eq!(window(&v, 3, 10), &[4, 5]);
        assert!(window(&v, 9, 2).is_empty());
        assert_eq!(window(&v, 0, usize::MAX), &v);
    }

    #[test]
    fn reshape_square_is_row_major() {
        let flat: Vec<f64> = (0..9).map(f64::from).collect();
        let g = reshape_square(&flat);
        assert_eq!(g.len(), 3);
        for r in 0..3 {
            for c in 0..3 {
                assert_eq!(g[r][c], flat[r * 3 + c]);
            }
        }
    }

    #[test]
    fn reshape_drops_remainder_for_non_square() {
        let flat: Vec<f64> = (0..11).map(f64::from).collect();
        let g = reshape_square(&flat);
        assert_eq!(g, vec![vec![0.0, 1.0, 2.0], vec![3.0, 4.0, 5.0], vec![6.0, 7.0, 8.0]]);
        assert!(reshape_square(&[]).is_empty());
        assert_eq!(reshape_square(&[7.0, 8.0]), vec![vec![7.0]]);
    }

    #[test]
    fn auto_subplots_switches_at_sixteen() {
        assert_eq!(auto_subplots(5), Subplots::shared(5, 1));
        assert_eq!(auto_subplots(16), Subplots::shared(4, 4));
    }
}
