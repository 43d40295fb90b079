//! Physical pixel size attached to an array.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A magnitude with a unit string, e.g. `1.0 um`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhysicalQuantity {
    pub magnitude: f64,
    #[serde(default)]
    pub units: String,
}

impl PhysicalQuantity {
    pub fn new(magnitude: f64, units: impl Into<String>) -> Self {
        Self {
            magnitude,
            units: units.into(),
        }
    }

    /// One dimensionless pixel.
    pub fn pixel() -> Self {
        Self::new(1.0, "px")
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.magnitude * factor, self.units.clone())
    }
}

impl fmt::Display for PhysicalQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.magnitude, self.units)
    }
}

/// Per-dimension physical size of a pixel.
///
/// When fewer entries than dimensions are stored, the last entry applies to
/// all higher dimensions. An empty pixel size is undefined and reports one
/// pixel per dimension.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PixelSize {
    sizes: Vec<PhysicalQuantity>,
}

impl PixelSize {
    pub fn new(sizes: Vec<PhysicalQuantity>) -> Self {
        Self { sizes }
    }

    /// Same size along every dimension.
    pub fn isotropic(size: PhysicalQuantity) -> Self {
        Self { sizes: vec![size] }
    }

    pub fn is_defined(&self) -> bool {
        !self.sizes.is_empty()
    }

    pub fn get(&self, dim: usize) -> PhysicalQuantity {
        self.sizes
            .get(dim)
            .or_else(|| self.sizes.last())
            .cloned()
            .unwrap_or_else(PhysicalQuantity::pixel)
    }

    /// True when every one of the first `ndim` dimensions has the same size.
    pub fn is_isotropic(&self, ndim: usize) -> bool {
        (1..ndim).all(|d| self.get(d) == self.get(0))
    }

    /// Expands the repeated trailing entry so `ndim` entries are stored.
    fn expanded(&self, ndim: usize) -> Vec<PhysicalQuantity> {
        (0..ndim).map(|d| self.get(d)).collect()
    }

    pub(crate) fn scale_dimension(&mut self, dim: usize, factor: f64, ndim: usize) {
        if !self.is_defined() || factor == 1.0 {
            return;
        }
        let mut sizes = self.expanded(ndim);
        sizes[dim] = sizes[dim].scaled(factor);
        self.sizes = sizes;
    }

    /// Reorders entries to follow a new dimension order.
    ///
    /// An empty order (every dimension dropped) keeps the stored entries.
    pub(crate) fn permute(&mut self, order: &[usize], ndim: usize) {
        if !self.is_defined() || order.is_empty() {
            return;
        }
        let sizes = self.expanded(ndim);
        self.sizes = order.iter().map(|&d| sizes[d].clone()).collect();
    }

    /// Inserts a one-pixel entry at `dim`. A zero-dimensional array keeps
    /// its stored entries so they apply to the new dimension.
    pub(crate) fn insert(&mut self, dim: usize, ndim: usize) {
        if !self.is_defined() || ndim == 0 {
            return;
        }
        let mut sizes = self.expanded(ndim);
        sizes.insert(dim, PhysicalQuantity::pixel());
        self.sizes = sizes;
    }
}
