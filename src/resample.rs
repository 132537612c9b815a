//! Bootstrap resampling of the climatology time axis.
//!
//! Each draw selects `composite_n` time slices with replacement and reduces
//! them to a per-cell mean. Draws are independent, so they run as a rayon
//! parallel map over the pre-sized output array: each worker owns exactly
//! one `sample` slice and no locks are needed.

use ndarray::{Array3, Axis};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::debug;

use crate::error::SigError;
use crate::grid::Grid3;

/// Builds the synthetic bootstrap distribution of composite means.
///
/// Draws `bootstrap_n` independent time-subsets of size `composite_n`
/// (uniformly, with replacement) from the climatology's time axis and
/// reduces each to a per-cell arithmetic mean. The result is a
/// `(sample, lat, lon)` grid with exactly `bootstrap_n` samples and the
/// climatology's spatial coordinates.
///
/// Missing values propagate: a cell whose drawn slices include a NaN is NaN
/// for that draw.
///
/// One seed per draw is taken from the caller's RNG up front, and each draw
/// then runs on its own `StdRng`. A fixed master seed therefore reproduces
/// the distribution exactly, independent of how the draws are scheduled
/// across worker threads.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`SigError::InvalidSampleSize`] | `composite_n == 0` or greater than the time length |
/// | [`SigError::InvalidBootstrapCount`] | `bootstrap_n == 0` |
#[tracing::instrument(skip_all, fields(composite_n, bootstrap_n))]
pub fn bootstrap_distribution(
    climatology: &Grid3,
    composite_n: usize,
    bootstrap_n: usize,
    rng: &mut impl Rng,
) -> Result<Grid3, SigError> {
    let time_len = climatology.time_len();
    if composite_n == 0 || composite_n > time_len {
        return Err(SigError::InvalidSampleSize {
            composite_n,
            time_len,
        });
    }
    if bootstrap_n == 0 {
        return Err(SigError::InvalidBootstrapCount { bootstrap_n });
    }

    let seeds: Vec<u64> = (0..bootstrap_n).map(|_| rng.random()).collect();

    let values = climatology.values();
    let (_, nlat, nlon) = values.dim();
    let mut distribution = Array3::<f64>::zeros((bootstrap_n, nlat, nlon));

    distribution
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .zip(seeds)
        .for_each(|(mut slice, seed)| {
            let mut draw_rng = StdRng::seed_from_u64(seed);
            for _ in 0..composite_n {
                let t = draw_rng.random_range(0..time_len);
                slice += &values.index_axis(Axis(0), t);
            }
            slice /= composite_n as f64;
        });

    debug!(
        draws = bootstrap_n,
        subset = composite_n,
        time_len,
        "bootstrap distribution assembled"
    );

    Grid3::new(climatology.coords().clone(), distribution)
}
