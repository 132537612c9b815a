//! Per-cell classification of a composite against its bootstrap cutoffs.

use std::str::FromStr;

use ndarray::Array2;

use crate::error::SigError;
use crate::grid::{Grid2, SignificanceGrid};
use crate::validate::check_alignment;

/// Which direction(s) of deviation are tested for significance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Tail {
    /// Test for significantly high and significantly low values.
    #[default]
    Both,
    /// Only test for significantly high values; nothing is classified `-1`.
    High,
    /// Only test for significantly low values; nothing is classified `+1`.
    Low,
}

impl FromStr for Tail {
    type Err = SigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "both" => Ok(Tail::Both),
            "high" => Ok(Tail::High),
            "low" => Ok(Tail::Low),
            other => Err(SigError::InvalidTailOption {
                tail: other.to_string(),
            }),
        }
    }
}

/// Classifies a composite grid against low/high cutoff grids.
///
/// All three grids must share an identical spatial footprint; alignment is
/// re-validated here and a mismatch is fatal. Per cell, strictly above the
/// high cutoff is `+1`, strictly below the low cutoff is `-1`, anything
/// else (including ties and NaN comparisons) is `0`. `tail` restricts which
/// branch is evaluated. No input is modified.
///
/// # Errors
///
/// [`SigError::ShapeMismatch`] if the composite and either cutoff grid
/// disagree on coordinates.
pub fn classify(
    composite: &Grid2,
    low: &Grid2,
    high: &Grid2,
    tail: Tail,
) -> Result<SignificanceGrid, SigError> {
    check_alignment("composite", composite.coords(), "low cutoff", low.coords())?;
    check_alignment("composite", composite.coords(), "high cutoff", high.coords())?;

    let (nlat, nlon) = composite.values().dim();
    let mut out = Array2::<i8>::zeros((nlat, nlon));

    for i in 0..nlat {
        for j in 0..nlon {
            let v = composite.values()[[i, j]];
            if tail != Tail::Low && v > high.values()[[i, j]] {
                out[[i, j]] = 1;
            } else if tail != Tail::High && v < low.values()[[i, j]] {
                out[[i, j]] = -1;
            }
        }
    }

    Ok(SignificanceGrid::new(composite.coords().clone(), out))
}
