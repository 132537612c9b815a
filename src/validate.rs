//! Spatial alignment checks between grids.
//!
//! Mismatched footprints are fatal: computation on misaligned grids would
//! silently compare unrelated cells, so every entry point validates before
//! any statistic is computed.

use crate::error::SigError;
use crate::grid::SpatialCoords;

/// Verifies that two grids share the same spatial footprint.
///
/// Checks, in order: longitude axis length, element-wise longitude
/// equality, latitude axis length, element-wise latitude equality. The
/// returned error names both grids, the failing check, and the first
/// differing index.
///
/// # Errors
///
/// [`SigError::ShapeMismatch`] on the first failing check.
pub fn check_alignment(
    left_name: &str,
    left: &SpatialCoords,
    right_name: &str,
    right: &SpatialCoords,
) -> Result<(), SigError> {
    check_axis("longitudes", left_name, left.lon(), right_name, right.lon())?;
    check_axis("latitudes", left_name, left.lat(), right_name, right.lat())?;
    Ok(())
}

fn check_axis(
    axis: &str,
    left_name: &str,
    left: &[f64],
    right_name: &str,
    right: &[f64],
) -> Result<(), SigError> {
    if left.len() != right.len() {
        return Err(SigError::ShapeMismatch {
            detail: format!(
                "{axis} of {left_name} ({}) and {right_name} ({}) differ in length",
                left.len(),
                right.len()
            ),
        });
    }
    if let Some(i) = left.iter().zip(right).position(|(a, b)| a != b) {
        return Err(SigError::ShapeMismatch {
            detail: format!(
                "{axis} of {left_name} and {right_name} differ at index {i}: {} vs {}",
                left[i], right[i]
            ),
        });
    }
    Ok(())
}
