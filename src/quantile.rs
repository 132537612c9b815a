//! Per-cell empirical quantile cutoffs of the bootstrap distribution.

use ndarray::Array2;

use crate::config::check_sig;
use crate::error::SigError;
use crate::grid::{Grid2, Grid3};

/// Collapses the bootstrap distribution into low/high cutoff grids.
///
/// Per cell, the samples along the leading axis are sorted and the type-7
/// (linear interpolation) empirical quantile is evaluated at `sig` for the
/// low cutoff and `1 - sig` for the high cutoff. Any NaN sample at a cell
/// makes both of that cell's cutoffs NaN (NaN is the missing-value
/// marker); infinite samples are data and sort to the ends like any other
/// value. The input distribution is not modified.
///
/// Returns `(low, high)`; for every finite cell, `low <= high`.
///
/// # Errors
///
/// [`SigError::InvalidSignificanceLevel`] if `sig` is outside `(0, 0.5)`.
pub fn quantile_cutoffs(distribution: &Grid3, sig: f64) -> Result<(Grid2, Grid2), SigError> {
    check_sig(sig)?;

    let values = distribution.values();
    let (n_samples, nlat, nlon) = values.dim();

    let mut low = Array2::<f64>::zeros((nlat, nlon));
    let mut high = Array2::<f64>::zeros((nlat, nlon));
    let mut cell = Vec::with_capacity(n_samples);

    for i in 0..nlat {
        for j in 0..nlon {
            cell.clear();
            cell.extend((0..n_samples).map(|s| values[[s, i, j]]));

            if cell.iter().any(|v| v.is_nan()) {
                low[[i, j]] = f64::NAN;
                high[[i, j]] = f64::NAN;
                continue;
            }

            cell.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
            low[[i, j]] = quantile_type7(&cell, sig);
            high[[i, j]] = quantile_type7(&cell, 1.0 - sig);
        }
    }

    let coords = distribution.coords();
    Ok((
        Grid2::new(coords.clone(), low)?,
        Grid2::new(coords.clone(), high)?,
    ))
}

/// R's default quantile algorithm (type=7), i.e. numpy's `linear` method.
///
/// Expects pre-sorted, non-empty input (caller's responsibility).
fn quantile_type7(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    let h = (n - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    if sorted[lo] == sorted[hi] {
        // Also keeps interpolation between two infinities from producing
        // inf - inf = NaN.
        return sorted[lo];
    }
    sorted[lo] + (h - h.floor()) * (sorted[hi] - sorted[lo])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::SpatialCoords;
    use approx::assert_relative_eq;
    use ndarray::Array3;

    fn coords() -> SpatialCoords {
        SpatialCoords::new(vec![40.0, 41.0], vec![-120.0, -119.0])
    }

    #[test]
    fn quantile_type7_median() {
        let sorted = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_relative_eq!(quantile_type7(&sorted, 0.5), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn quantile_type7_interpolation() {
        // p=0.1 -> h=0.4, lo=0, hi=1 -> 1 + 0.4*(2-1) = 1.4
        let sorted = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_relative_eq!(quantile_type7(&sorted, 0.1), 1.4, epsilon = 1e-12);
    }

    #[test]
    fn quantile_type7_r_crossvalidation() {
        // R: quantile(1:10, 0.3, type=7) = 3.7
        let sorted: Vec<f64> = (1..=10).map(|x| x as f64).collect();
        assert_relative_eq!(quantile_type7(&sorted, 0.3), 3.7, epsilon = 1e-12);
    }

    #[test]
    fn cutoffs_ordered_per_cell() {
        let mut values = Array3::zeros((100, 2, 2));
        for s in 0..100 {
            values[[s, 0, 0]] = s as f64;
            values[[s, 0, 1]] = (s as f64 * 0.37).sin();
            values[[s, 1, 0]] = -(s as f64);
            values[[s, 1, 1]] = 4.0; // constant cell
        }
        let dist = Grid3::new(coords(), values).unwrap();
        let (low, high) = quantile_cutoffs(&dist, 0.05).unwrap();
        for i in 0..2 {
            for j in 0..2 {
                assert!(
                    low.values()[[i, j]] <= high.values()[[i, j]],
                    "low > high at ({i}, {j})"
                );
            }
        }
        // Constant cell: cutoffs collapse to the constant.
        assert_relative_eq!(low.values()[[1, 1]], 4.0, epsilon = 1e-12);
        assert_relative_eq!(high.values()[[1, 1]], 4.0, epsilon = 1e-12);
    }

    #[test]
    fn cutoffs_known_values() {
        // Cell (0,0) holds 0..100; R: quantile(0:99, 0.05) = 4.95,
        // quantile(0:99, 0.95) = 94.05.
        let mut values = Array3::zeros((100, 2, 2));
        for s in 0..100 {
            values[[s, 0, 0]] = s as f64;
        }
        let dist = Grid3::new(coords(), values).unwrap();
        let (low, high) = quantile_cutoffs(&dist, 0.05).unwrap();
        assert_relative_eq!(low.values()[[0, 0]], 4.95, epsilon = 1e-9);
        assert_relative_eq!(high.values()[[0, 0]], 94.05, epsilon = 1e-9);
    }

    #[test]
    fn nan_sample_yields_nan_cutoffs() {
        let mut values = Array3::from_elem((50, 2, 2), 1.0);
        values[[10, 0, 1]] = f64::NAN;
        let dist = Grid3::new(coords(), values).unwrap();
        let (low, high) = quantile_cutoffs(&dist, 0.01).unwrap();
        assert!(low.values()[[0, 1]].is_nan());
        assert!(high.values()[[0, 1]].is_nan());
        // Other cells unaffected.
        assert_relative_eq!(low.values()[[0, 0]], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn infinite_samples_are_data_not_missing() {
        // An overflowed mean is an extreme observation, not a gap: it
        // sorts past every finite sample and lands in the high cutoff.
        let mut values = Array3::zeros((100, 2, 2));
        for s in 0..100 {
            values[[s, 0, 0]] = s as f64;
        }
        values[[99, 0, 0]] = f64::INFINITY;
        let dist = Grid3::new(coords(), values).unwrap();
        let (low, high) = quantile_cutoffs(&dist, 0.05).unwrap();
        assert!(low.values()[[0, 0]].is_finite());
        assert!(
            high.values()[[0, 0]] > 94.0,
            "high cutoff = {}",
            high.values()[[0, 0]]
        );
        assert!(!high.values()[[0, 0]].is_nan());
    }

    #[test]
    fn all_infinite_cell_keeps_infinite_cutoffs() {
        let values = Array3::from_elem((50, 2, 2), f64::INFINITY);
        let dist = Grid3::new(coords(), values).unwrap();
        let (low, high) = quantile_cutoffs(&dist, 0.01).unwrap();
        assert_eq!(low.values()[[0, 0]], f64::INFINITY);
        assert_eq!(high.values()[[0, 0]], f64::INFINITY);
    }

    #[test]
    fn input_not_mutated() {
        let mut values = Array3::zeros((20, 2, 2));
        for s in 0..20 {
            values[[s, 0, 0]] = (20 - s) as f64; // deliberately unsorted
        }
        let dist = Grid3::new(coords(), values.clone()).unwrap();
        let _ = quantile_cutoffs(&dist, 0.1).unwrap();
        assert_eq!(dist.values(), &values);
    }

    #[test]
    fn invalid_sig_rejected() {
        let dist = Grid3::new(coords(), Array3::zeros((10, 2, 2))).unwrap();
        for bad in [0.0, 0.5, 0.9, -0.1] {
            let err = quantile_cutoffs(&dist, bad).unwrap_err();
            assert!(matches!(err, SigError::InvalidSignificanceLevel { .. }));
        }
    }

    #[test]
    fn coords_carried_through() {
        let dist = Grid3::new(coords(), Array3::zeros((10, 2, 2))).unwrap();
        let (low, high) = quantile_cutoffs(&dist, 0.05).unwrap();
        assert_eq!(low.coords(), dist.coords());
        assert_eq!(high.coords(), dist.coords());
    }
}
