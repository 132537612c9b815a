//! Labeled grid types shared by both significance paths.
//!
//! A grid is a numeric array plus the latitude/longitude coordinate vectors
//! that label its spatial axes. Spatial shape and coordinates are fixed at
//! construction; only the leading `time`/`sample` axis varies across
//! operations.

use std::collections::BTreeMap;

use ndarray::{Array2, Array3};

use crate::error::SigError;

/// Latitude/longitude coordinate vectors for a spatial footprint.
///
/// Coordinates are immutable once constructed and are compared
/// element-for-element by the grid validator.
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialCoords {
    lat: Vec<f64>,
    lon: Vec<f64>,
}

impl SpatialCoords {
    /// Creates coordinate vectors for a `(lat, lon)` footprint.
    pub fn new(lat: Vec<f64>, lon: Vec<f64>) -> Self {
        Self { lat, lon }
    }

    /// Returns the latitude coordinates.
    pub fn lat(&self) -> &[f64] {
        &self.lat
    }

    /// Returns the longitude coordinates.
    pub fn lon(&self) -> &[f64] {
        &self.lon
    }

    /// Returns the number of latitude points.
    pub fn nlat(&self) -> usize {
        self.lat.len()
    }

    /// Returns the number of longitude points.
    pub fn nlon(&self) -> usize {
        self.lon.len()
    }
}

/// A 2-D `(lat, lon)` grid of one variable (a composite, a cutoff grid).
#[derive(Debug, Clone)]
pub struct Grid2 {
    coords: SpatialCoords,
    values: Array2<f64>,
}

impl Grid2 {
    /// Creates a 2-D grid, checking that the value array's shape matches
    /// the coordinate lengths.
    ///
    /// # Errors
    ///
    /// [`SigError::ShapeMismatch`] if the array is not `(nlat, nlon)`.
    pub fn new(coords: SpatialCoords, values: Array2<f64>) -> Result<Self, SigError> {
        let (nlat, nlon) = values.dim();
        if nlat != coords.nlat() || nlon != coords.nlon() {
            return Err(SigError::ShapeMismatch {
                detail: format!(
                    "2-D values have shape ({}, {}) but coordinates describe ({}, {})",
                    nlat,
                    nlon,
                    coords.nlat(),
                    coords.nlon()
                ),
            });
        }
        Ok(Self { coords, values })
    }

    /// Returns the spatial coordinates.
    pub fn coords(&self) -> &SpatialCoords {
        &self.coords
    }

    /// Returns the cell values.
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }
}

/// A 3-D `(time, lat, lon)` grid (a climatology, a raw sample stack, or the
/// ephemeral bootstrap distribution with `sample` in place of `time`).
#[derive(Debug, Clone)]
pub struct Grid3 {
    coords: SpatialCoords,
    values: Array3<f64>,
}

impl Grid3 {
    /// Creates a 3-D grid, checking that the value array's trailing axes
    /// match the coordinate lengths.
    ///
    /// # Errors
    ///
    /// [`SigError::ShapeMismatch`] if the array is not `(_, nlat, nlon)`.
    pub fn new(coords: SpatialCoords, values: Array3<f64>) -> Result<Self, SigError> {
        let (_, nlat, nlon) = values.dim();
        if nlat != coords.nlat() || nlon != coords.nlon() {
            return Err(SigError::ShapeMismatch {
                detail: format!(
                    "3-D values have spatial shape ({}, {}) but coordinates describe ({}, {})",
                    nlat,
                    nlon,
                    coords.nlat(),
                    coords.nlon()
                ),
            });
        }
        Ok(Self { coords, values })
    }

    /// Returns the spatial coordinates.
    pub fn coords(&self) -> &SpatialCoords {
        &self.coords
    }

    /// Returns the cell values, leading axis first.
    pub fn values(&self) -> &Array3<f64> {
        &self.values
    }

    /// Returns the length of the leading `time`/`sample` axis.
    pub fn time_len(&self) -> usize {
        self.values.dim().0
    }
}

/// The final per-cell categorical output, values in `{-1, 0, +1}`.
///
/// `+1` = significantly high, `-1` = significantly low, `0` = not
/// significant. Returned to the caller and immutable.
#[derive(Debug, Clone, PartialEq)]
pub struct SignificanceGrid {
    coords: SpatialCoords,
    values: Array2<i8>,
}

impl SignificanceGrid {
    pub(crate) fn new(coords: SpatialCoords, values: Array2<i8>) -> Self {
        Self { coords, values }
    }

    /// Returns the spatial coordinates.
    pub fn coords(&self) -> &SpatialCoords {
        &self.coords
    }

    /// Returns the categorical cell values.
    pub fn values(&self) -> &Array2<i8> {
        &self.values
    }

    /// Returns the number of cells classified significantly high (`+1`).
    pub fn n_high(&self) -> usize {
        self.values.iter().filter(|&&v| v == 1).count()
    }

    /// Returns the number of cells classified significantly low (`-1`).
    pub fn n_low(&self) -> usize {
        self.values.iter().filter(|&&v| v == -1).count()
    }
}

/// A named-variable container, the map a grid file's variables load into.
///
/// Both significance entry points take datasets and a variable name, so a
/// request for an absent variable fails with
/// [`SigError::MissingVariable`] instead of a panic.
#[derive(Debug, Clone, Default)]
pub struct Dataset<G> {
    vars: BTreeMap<String, G>,
}

impl<G> Dataset<G> {
    /// Creates an empty dataset.
    pub fn new() -> Self {
        Self {
            vars: BTreeMap::new(),
        }
    }

    /// Creates a dataset holding a single named variable.
    pub fn with_variable(name: impl Into<String>, grid: G) -> Self {
        let mut ds = Self::new();
        ds.insert(name, grid);
        ds
    }

    /// Inserts a variable, replacing any existing grid under that name.
    pub fn insert(&mut self, name: impl Into<String>, grid: G) {
        self.vars.insert(name.into(), grid);
    }

    /// Looks up a variable by name.
    ///
    /// # Errors
    ///
    /// [`SigError::MissingVariable`] if the name is absent.
    pub fn get(&self, name: &str) -> Result<&G, SigError> {
        self.vars.get(name).ok_or_else(|| SigError::MissingVariable {
            name: name.to_string(),
        })
    }

    /// Returns the variable names in sorted order.
    pub fn variable_names(&self) -> impl Iterator<Item = &str> {
        self.vars.keys().map(String::as_str)
    }
}
