//! Comparisons producing masks, and masked gather/scatter.
//!
//! A mask is a single-channel binary array with the same sizes as the array
//! it indexes. Selected pixels are always visited in scan order, so the
//! values returned by [`Array::gather`] line up with what
//! [`Array::scatter_values`] expects.

use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::core::Array;
use super::dtype::DataType;
use super::storage::Storage;
use crate::error::{ArrayError, Result};

/// Elementwise comparison operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompareOp {
    #[serde(alias = "==")]
    Eq,
    #[serde(alias = "!=")]
    Ne,
    #[serde(alias = "<")]
    Lt,
    #[serde(alias = "<=")]
    Le,
    #[serde(alias = ">")]
    Gt,
    #[serde(alias = ">=")]
    Ge,
}

impl CompareOp {
    #[inline]
    pub fn apply(self, lhs: f64, rhs: f64) -> bool {
        match self {
            CompareOp::Eq => lhs == rhs,
            CompareOp::Ne => lhs != rhs,
            CompareOp::Lt => lhs < rhs,
            CompareOp::Le => lhs <= rhs,
            CompareOp::Gt => lhs > rhs,
            CompareOp::Ge => lhs >= rhs,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            CompareOp::Eq => "==",
            CompareOp::Ne => "!=",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Right-hand side of a comparison.
#[derive(Clone, Copy, Debug)]
pub enum Operand<'a> {
    Scalar(f64),
    Array(&'a Array),
}

impl From<f64> for Operand<'_> {
    fn from(v: f64) -> Self {
        Operand::Scalar(v)
    }
}

impl From<i32> for Operand<'_> {
    fn from(v: i32) -> Self {
        Operand::Scalar(v as f64)
    }
}

impl<'a> From<&'a Array> for Operand<'a> {
    fn from(a: &'a Array) -> Self {
        Operand::Array(a)
    }
}

impl Array {
    /// Compares every sample against a scalar or an equally shaped array.
    ///
    /// The result is a fresh binary array with the same sizes and tensor
    /// shape; for scalar input it is a mask.
    ///
    /// ```
    /// use ndview::{Array, CompareOp, DataType};
    ///
    /// let a = Array::from_vec(&[4], 1, vec![1u8, 5, 9, 2]).unwrap();
    /// let m = a.compare(CompareOp::Gt, 4).unwrap();
    /// assert_eq!(m.to_vec::<bool>().unwrap(), vec![false, true, true, false]);
    /// assert_eq!(m.data_type(), DataType::Bin);
    /// ```
    pub fn compare<'a>(&self, op: CompareOp, rhs: impl Into<Operand<'a>>) -> Result<Array> {
        let lhs = self.samples();
        let result: Vec<bool> = match rhs.into() {
            Operand::Scalar(v) => lhs.iter().map(|&x| op.apply(x, v)).collect(),
            Operand::Array(other) => {
                if other.sizes() != self.sizes() {
                    return Err(ArrayError::ShapeMismatch {
                        expected: self.sizes().to_vec(),
                        found: other.sizes().to_vec(),
                    });
                }
                if other.channels() != self.channels() {
                    return Err(ArrayError::ShapeMismatch {
                        expected: vec![self.channels()],
                        found: vec![other.channels()],
                    });
                }
                lhs.iter()
                    .zip(other.samples())
                    .map(|(&x, y)| op.apply(x, y))
                    .collect()
            }
        };
        let mut out = Array::from_storage(
            Storage::from_vec(result),
            self.sizes().to_vec(),
            self.tensor_shape(),
        );
        out.set_pixel_size(self.pixel_size().clone());
        Ok(out)
    }

    /// Checks that `mask` can index this array.
    pub fn check_mask(&self, mask: &Array) -> Result<()> {
        if !mask.data_type().is_binary() {
            return Err(ArrayError::DataTypeMismatch {
                expected: DataType::Bin,
                found: mask.data_type(),
            });
        }
        if !mask.is_scalar() {
            return Err(ArrayError::ShapeMismatch {
                expected: vec![1],
                found: vec![mask.channels()],
            });
        }
        if mask.sizes() != self.sizes() {
            return Err(ArrayError::ShapeMismatch {
                expected: self.sizes().to_vec(),
                found: mask.sizes().to_vec(),
            });
        }
        Ok(())
    }

    /// Storage index (channel 0) of every selected pixel, in scan order.
    fn selected_pixels(&self, mask: &Array) -> Result<Vec<usize>> {
        self.check_mask(mask)?;
        let flags = mask.samples();
        Ok(self
            .pixel_offsets()
            .zip(flags)
            .filter_map(|(p, f)| (f != 0.0).then_some(p))
            .collect())
    }

    fn selected_samples(&self, pixels: &[usize]) -> Vec<usize> {
        let channels = self.channels();
        pixels
            .iter()
            .flat_map(|&p| (0..channels).map(move |k| self.channel_index(p, k)))
            .collect()
    }

    /// Samples of the pixels selected by `mask`, channels of a pixel adjacent.
    pub fn gather(&self, mask: &Array) -> Result<Vec<f64>> {
        let pixels = self.selected_pixels(mask)?;
        let indices = self.selected_samples(&pixels);
        Ok(self.storage.borrow().read(indices.into_iter()))
    }

    /// Writes `value` to every channel of every selected pixel.
    pub fn scatter(&self, mask: &Array, value: f64) -> Result<()> {
        let pixels = self.selected_pixels(mask)?;
        debug!("Array::scatter value={} selected={}", value, pixels.len());
        let indices = self.selected_samples(&pixels);
        self.storage.borrow_mut().fill(indices.into_iter(), value);
        Ok(())
    }

    /// Writes `values` to the selected pixels in scan order.
    ///
    /// `values` must hold exactly `count(mask) * channels` samples.
    pub fn scatter_values(&self, mask: &Array, values: &[f64]) -> Result<()> {
        let pixels = self.selected_pixels(mask)?;
        let expected = pixels.len() * self.channels();
        if values.len() != expected {
            return Err(ArrayError::LengthMismatch {
                expected,
                found: values.len(),
            });
        }
        debug!("Array::scatter_values selected={}", pixels.len());
        let indices = self.selected_samples(&pixels);
        self.storage
            .borrow_mut()
            .write(indices.into_iter(), values.iter().copied());
        Ok(())
    }

    /// Owned one-dimensional array of the selected pixels.
    ///
    /// Keeps tensor shape, data type and color space. An empty selection has
    /// no valid shape and is reported as `InvalidShape`.
    pub fn masked(&self, mask: &Array) -> Result<Array> {
        let pixels = self.selected_pixels(mask)?;
        if pixels.is_empty() {
            return Err(ArrayError::InvalidShape("mask selects no pixels".into()));
        }
        let indices = self.selected_samples(&pixels);
        let buffer = self.storage.borrow().gather(indices.into_iter());
        let mut out =
            Array::from_storage(Storage::from_buffer(buffer), vec![pixels.len()], self.tensor_shape());
        out.color_space = self.color_space.clone();
        Ok(out)
    }

    // --- Reductions and mask logic -----------------------------------------

    /// Number of non-zero samples.
    pub fn count(&self) -> usize {
        self.samples().into_iter().filter(|&v| v != 0.0).count()
    }

    pub fn any(&self) -> bool {
        self.samples().into_iter().any(|v| v != 0.0)
    }

    pub fn all(&self) -> bool {
        self.samples().into_iter().all(|v| v != 0.0)
    }

    fn require_binary(&self) -> Result<()> {
        if !self.data_type().is_binary() {
            return Err(ArrayError::DataTypeMismatch {
                expected: DataType::Bin,
                found: self.data_type(),
            });
        }
        Ok(())
    }

    fn binary_op(&self, other: &Array, f: impl Fn(bool, bool) -> bool) -> Result<Array> {
        self.require_binary()?;
        other.require_binary()?;
        if other.sizes() != self.sizes() || other.channels() != self.channels() {
            return Err(ArrayError::ShapeMismatch {
                expected: self.sizes().to_vec(),
                found: other.sizes().to_vec(),
            });
        }
        let lhs = self.to_vec::<bool>()?;
        let rhs = other.to_vec::<bool>()?;
        let out: Vec<bool> = lhs.into_iter().zip(rhs).map(|(a, b)| f(a, b)).collect();
        Ok(Array::from_storage(
            Storage::from_vec(out),
            self.sizes().to_vec(),
            self.tensor_shape(),
        ))
    }

    /// Logical negation of a binary array.
    pub fn not(&self) -> Result<Array> {
        self.require_binary()?;
        let out: Vec<bool> = self.to_vec::<bool>()?.into_iter().map(|v| !v).collect();
        Ok(Array::from_storage(
            Storage::from_vec(out),
            self.sizes().to_vec(),
            self.tensor_shape(),
        ))
    }

    pub fn and(&self, other: &Array) -> Result<Array> {
        self.binary_op(other, |a, b| a && b)
    }

    pub fn or(&self, other: &Array) -> Result<Array> {
        self.binary_op(other, |a, b| a || b)
    }

    pub fn xor(&self, other: &Array) -> Result<Array> {
        self.binary_op(other, |a, b| a ^ b)
    }
}
