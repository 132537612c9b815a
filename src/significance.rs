//! Entry points chaining validation, resampling, cutoffs, and
//! classification.

use ndarray::Array2;
use rand::Rng;
use tracing::debug;

use crate::classify::classify;
use crate::config::{BootstrapConfig, check_sig};
use crate::error::SigError;
use crate::grid::{Dataset, Grid2, Grid3, SignificanceGrid};
use crate::quantile::quantile_cutoffs;
use crate::resample::bootstrap_distribution;
use crate::ttest::{cell_series, welch_t};
use crate::validate::check_alignment;

/// Tests a composite against the climatology by bootstrap resampling.
///
/// Chains: variable lookup -> alignment check -> bootstrap distribution ->
/// quantile cutoffs -> per-cell classification. Any invalid input aborts
/// the whole call; no partial grid is returned.
///
/// The caller's RNG is the only source of randomness; a fixed seed gives a
/// fully reproducible significance grid.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`SigError::MissingVariable`] | `variable` absent from either dataset |
/// | [`SigError::ShapeMismatch`] | climatology and composite footprints differ |
/// | [`SigError::InvalidSampleSize`] | `composite_n` zero or beyond the time length |
/// | [`SigError::InvalidBootstrapCount`] | `bootstrap_n == 0` |
/// | [`SigError::InvalidSignificanceLevel`] | `sig` outside `(0, 0.5)` |
#[tracing::instrument(skip_all, fields(variable))]
pub fn bootstrap_significance(
    climatology: &Dataset<Grid3>,
    composite: &Dataset<Grid2>,
    variable: &str,
    config: &BootstrapConfig,
    rng: &mut impl Rng,
) -> Result<SignificanceGrid, SigError> {
    config.validate()?;

    let climo = climatology.get(variable)?;
    let comp = composite.get(variable)?;
    check_alignment("climatology", climo.coords(), "composite", comp.coords())?;

    let distribution =
        bootstrap_distribution(climo, config.composite_n(), config.bootstrap_n(), rng)?;
    let (low, high) = quantile_cutoffs(&distribution, config.sig())?;

    let grid = classify(comp, &low, &high, config.tail())?;
    debug!(
        n_high = grid.n_high(),
        n_low = grid.n_low(),
        "bootstrap classification done"
    );
    Ok(grid)
}

/// Tests two raw sample stacks for a per-cell difference in means with
/// Welch's t-test.
///
/// Per cell, non-finite values are excluded pairwise and the two-sided
/// p-value is compared against `sig`: `+1` when sample A's mean is
/// significantly above sample B's, `-1` when significantly below, `0`
/// otherwise. Cells where the test is undefined (fewer than two finite
/// values in a sample, or no spread and no mean difference) are `0`.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`SigError::MissingVariable`] | `variable` absent from either dataset |
/// | [`SigError::ShapeMismatch`] | the two footprints differ |
/// | [`SigError::InvalidSignificanceLevel`] | `sig` outside `(0, 0.5)` |
#[tracing::instrument(skip_all, fields(variable, sig))]
pub fn ttest_significance(
    sample_a: &Dataset<Grid3>,
    sample_b: &Dataset<Grid3>,
    variable: &str,
    sig: f64,
) -> Result<SignificanceGrid, SigError> {
    check_sig(sig)?;

    let a = sample_a.get(variable)?;
    let b = sample_b.get(variable)?;
    check_alignment("sample A", a.coords(), "sample B", b.coords())?;

    let (nlat, nlon) = (a.coords().nlat(), a.coords().nlon());
    let mut out = Array2::<i8>::zeros((nlat, nlon));

    for i in 0..nlat {
        for j in 0..nlon {
            let series_a = cell_series(a, i, j);
            let series_b = cell_series(b, i, j);
            if let Some((t, p)) = welch_t(&series_a, &series_b)
                && p <= sig
            {
                out[[i, j]] = if t > 0.0 {
                    1
                } else if t < 0.0 {
                    -1
                } else {
                    0
                };
            }
        }
    }

    Ok(SignificanceGrid::new(a.coords().clone(), out))
}
