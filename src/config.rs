//! Configuration for the bootstrap significance test.

use crate::classify::Tail;
use crate::error::SigError;

/// Configuration for [`bootstrap_significance`](crate::bootstrap_significance).
///
/// Use the builder methods to customise parameters.
///
/// # Example
///
/// ```
/// use composite_sig::{BootstrapConfig, Tail};
///
/// let config = BootstrapConfig::new(25)
///     .with_bootstrap_n(2000)
///     .with_sig(0.05)
///     .with_tail(Tail::High);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct BootstrapConfig {
    composite_n: usize,
    bootstrap_n: usize,
    sig: f64,
    tail: Tail,
}

impl BootstrapConfig {
    /// Creates a configuration for a composite built from `composite_n`
    /// time steps.
    ///
    /// Defaults: `bootstrap_n = 1000`, `sig = 0.01`, `tail = Both`.
    pub fn new(composite_n: usize) -> Self {
        Self {
            composite_n,
            bootstrap_n: 1000,
            sig: 0.01,
            tail: Tail::Both,
        }
    }

    /// Sets the number of bootstrap draws.
    pub fn with_bootstrap_n(mut self, n: usize) -> Self {
        self.bootstrap_n = n;
        self
    }

    /// Sets the significance threshold.
    pub fn with_sig(mut self, sig: f64) -> Self {
        self.sig = sig;
        self
    }

    /// Sets which tails are tested.
    pub fn with_tail(mut self, tail: Tail) -> Self {
        self.tail = tail;
        self
    }

    // --- Accessors ---

    /// Returns the number of time steps in each resampled subset.
    pub fn composite_n(&self) -> usize {
        self.composite_n
    }

    /// Returns the number of bootstrap draws.
    pub fn bootstrap_n(&self) -> usize {
        self.bootstrap_n
    }

    /// Returns the significance threshold.
    pub fn sig(&self) -> f64 {
        self.sig
    }

    /// Returns which tails are tested.
    pub fn tail(&self) -> Tail {
        self.tail
    }

    /// Validates the data-independent parameter ranges.
    ///
    /// `composite_n` is checked against the actual climatology time length
    /// by the resampler, which sees the grid.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`SigError::InvalidBootstrapCount`] | `bootstrap_n == 0` |
    /// | [`SigError::InvalidSignificanceLevel`] | `sig` outside `(0, 0.5)` |
    pub fn validate(&self) -> Result<(), SigError> {
        if self.bootstrap_n == 0 {
            return Err(SigError::InvalidBootstrapCount {
                bootstrap_n: self.bootstrap_n,
            });
        }
        check_sig(self.sig)?;
        Ok(())
    }
}

/// Checks that a significance level lies in `(0, 0.5)`.
///
/// Shared by the bootstrap config, the quantile estimator, and the t-test
/// path.
pub(crate) fn check_sig(sig: f64) -> Result<(), SigError> {
    if !sig.is_finite() || sig <= 0.0 || sig >= 0.5 {
        return Err(SigError::InvalidSignificanceLevel { sig });
    }
    Ok(())
}
