//! Error types for the composite-sig crate.

/// Error type for all fallible operations in the composite-sig crate.
///
/// Every variant is fatal: an invalid input aborts the whole call and no
/// partial significance grid is returned.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SigError {
    /// Returned when spatial dimensions or coordinate vectors differ
    /// between two grids expected to align.
    #[error("shape mismatch: {detail}")]
    ShapeMismatch {
        /// Which check failed, naming both grids and the first difference.
        detail: String,
    },

    /// Returned when `composite_n` is zero or exceeds the climatology's
    /// time length.
    #[error("invalid composite sample size: {composite_n} (climatology has {time_len} time steps)")]
    InvalidSampleSize {
        /// Requested subset size.
        composite_n: usize,
        /// Available time steps in the climatology.
        time_len: usize,
    },

    /// Returned when the requested number of bootstrap draws is zero.
    #[error("invalid bootstrap draw count: {bootstrap_n} (must be >= 1)")]
    InvalidBootstrapCount {
        /// Requested number of draws.
        bootstrap_n: usize,
    },

    /// Returned when the significance level is outside `(0, 0.5)`.
    #[error("invalid significance level: {sig} (must be in (0, 0.5))")]
    InvalidSignificanceLevel {
        /// The rejected level.
        sig: f64,
    },

    /// Returned when a tail string is not one of `"both"`, `"high"`, `"low"`.
    #[error("invalid tail option: {tail:?} (must be \"both\", \"high\", or \"low\")")]
    InvalidTailOption {
        /// The rejected string.
        tail: String,
    },

    /// Returned when a variable name is absent from a dataset.
    #[error("variable {name:?} not found in dataset")]
    MissingVariable {
        /// The requested variable name.
        name: String,
    },
}
