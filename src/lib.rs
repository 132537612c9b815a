//! # composite-sig
//!
//! Per-grid-cell significance testing of spatial composites against a
//! background climatology, for event-composite analysis (e.g. "all
//! atmospheric-river days" vs. the full record).
//!
//! Two independent methods share one output contract: a categorical grid
//! with `+1` (significantly high), `-1` (significantly low), `0` (not
//! significant) per cell.
//!
//! ## Bootstrap pipeline
//!
//! ```text
//!  ┌────────────────┐    ┌────────────┐    ┌───────────────┐    ┌────────────┐
//!  │ Grid Validator  │───▶│ Resampler  │───▶│ Quantile      │───▶│ Classifier │
//!  │ (coords align)  │    │ (n draws,  │    │ Estimator     │    │ (±1 / 0)   │
//!  └────────────────┘    │  per-cell  │    │ (sig, 1-sig   │    └────────────┘
//!                        │  means)    │    │  cutoffs)     │
//!                        └────────────┘    └───────────────┘
//! ```
//!
//! The t-test path skips the resampler: per cell, Welch's two-sample test
//! between two raw sample stacks, thresholded on the p-value.
//!
//! ## Quick start
//!
//! ```ignore
//! use composite_sig::{BootstrapConfig, Dataset, Tail, bootstrap_significance};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let climatology = Dataset::with_variable("ivt", climo_grid);
//! let composite = Dataset::with_variable("ivt", composite_grid);
//! let config = BootstrapConfig::new(25).with_sig(0.01).with_tail(Tail::Both);
//! let mut rng = StdRng::seed_from_u64(42);
//! let sig = bootstrap_significance(&climatology, &composite, "ivt", &config, &mut rng)?;
//! ```

mod classify;
mod config;
mod error;
mod grid;
mod quantile;
mod resample;
mod significance;
mod ttest;
mod validate;

pub use classify::{Tail, classify};
pub use config::BootstrapConfig;
pub use error::SigError;
pub use grid::{Dataset, Grid2, Grid3, SignificanceGrid, SpatialCoords};
pub use quantile::quantile_cutoffs;
pub use resample::bootstrap_distribution;
pub use significance::{bootstrap_significance, ttest_significance};
pub use validate::check_alignment;
