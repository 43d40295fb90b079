#![doc = include_str!("../README.md")]

// Core data model
pub mod array;
pub mod error;

// Metadata and edges
pub mod color;
pub mod config;
pub mod diagnostics;
pub mod io;

// --- High-level re-exports -------------------------------------------------

pub use crate::array::{
    Array, CompareOp, DataType, Element, Operand, PhysicalQuantity, PixelSize, Range, Storage,
    TensorShape,
};
pub use crate::color::ColorSpaceRegistry;
pub use crate::error::{ArrayError, Result};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```
/// use ndview::prelude::*;
///
/// # fn main() -> Result<()> {
/// let a = Array::new(&[10, 20], 1, DataType::U8)?;
/// let roi = a.slice(&[Range::new(0, 4), Range::new(4, -1)])?;
/// roi.fill(5.0);
/// let m = a.compare(CompareOp::Eq, 5)?;
/// assert_eq!(m.count(), 4 * 15);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::io::DisplayMode;
    pub use crate::{
        Array, ArrayError, ColorSpaceRegistry, CompareOp, DataType, PhysicalQuantity, PixelSize,
        Range, Result, TensorShape,
    };
}
