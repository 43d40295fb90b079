//! Zero-copy geometry: new windows on the same storage.
//!
//! Each operation returns a view whose sizes and strides are rearranged; the
//! pixel size follows its dimension. Only [`Array::flatten`] may copy, when
//! the source is not contiguous.

use log::debug;

use super::core::Array;
use super::range::Range;
use super::shape::num_pixels;
use super::tensor::TensorShape;
use crate::error::{ArrayError, Result};

impl Array {
    fn into_view(mut self) -> Array {
        self.view = true;
        self
    }

    /// Reorders dimensions: dimension `d` of the result is `order[d]` of `self`.
    ///
    /// Dimensions left out of `order` must have size 1 and are dropped.
    pub fn permute_dimensions(&self, order: &[usize]) -> Result<Array> {
        let ndim = self.ndim();
        let mut used = vec![false; ndim];
        for &d in order {
            if d >= ndim {
                return Err(ArrayError::IndexOutOfRange(format!(
                    "dimension {d} of a {ndim}-dimensional array"
                )));
            }
            if used[d] {
                return Err(ArrayError::InvalidShape(format!(
                    "dimension {d} listed twice in {order:?}"
                )));
            }
            used[d] = true;
        }
        if let Some(d) = (0..ndim).find(|&d| !used[d] && self.sizes[d] != 1) {
            return Err(ArrayError::InvalidShape(format!(
                "cannot drop dimension {d} of size {}",
                self.sizes[d]
            )));
        }
        let mut out = self.clone();
        out.sizes = order.iter().map(|&d| self.sizes[d]).collect();
        out.strides = order.iter().map(|&d| self.strides[d]).collect();
        out.pixel_size.permute(order, ndim);
        debug!("Array::permute_dimensions {:?} -> sizes {:?}", order, out.sizes);
        Ok(out.into_view())
    }

    pub fn swap_dimensions(&self, a: usize, b: usize) -> Result<Array> {
        let ndim = self.ndim();
        if a >= ndim || b >= ndim {
            return Err(ArrayError::IndexOutOfRange(format!(
                "cannot swap dimensions {a} and {b} of a {ndim}-dimensional array"
            )));
        }
        let mut order: Vec<usize> = (0..ndim).collect();
        order.swap(a, b);
        self.permute_dimensions(&order)
    }

    /// Reverses the dimensions flagged in `axes`; an empty slice mirrors all.
    pub fn mirror(&self, axes: &[bool]) -> Result<Array> {
        let ndim = self.ndim();
        if !axes.is_empty() && axes.len() != ndim {
            return Err(ArrayError::ShapeMismatch {
                expected: vec![ndim],
                found: vec![axes.len()],
            });
        }
        let mut out = self.clone();
        let mut origin = self.origin as isize;
        for d in 0..ndim {
            if !axes.is_empty() && !axes[d] {
                continue;
            }
            if self.sizes[d] > 0 {
                origin += (self.sizes[d] as isize - 1) * self.strides[d];
            }
            out.strides[d] = -self.strides[d];
        }
        out.origin = origin as usize;
        Ok(out.into_view())
    }

    /// Drops every dimension of size 1.
    pub fn squeeze(&self) -> Array {
        let order: Vec<usize> = (0..self.ndim()).filter(|&d| self.sizes[d] != 1).collect();
        let mut out = self.clone();
        out.sizes = order.iter().map(|&d| self.sizes[d]).collect();
        out.strides = order.iter().map(|&d| self.strides[d]).collect();
        out.pixel_size.permute(&order, self.ndim());
        out.into_view()
    }

    /// Inserts a dimension of size 1 before dimension `dim`.
    pub fn add_singleton(&self, dim: usize) -> Result<Array> {
        let ndim = self.ndim();
        if dim > ndim {
            return Err(ArrayError::IndexOutOfRange(format!(
                "cannot insert dimension {dim} into a {ndim}-dimensional array"
            )));
        }
        let mut out = self.clone();
        out.sizes.insert(dim, 1);
        out.strides.insert(dim, 0);
        out.pixel_size.insert(dim, ndim);
        Ok(out.into_view())
    }

    /// One-dimensional array over every pixel in scan order.
    ///
    /// Returns a view when the data is contiguous, otherwise a fresh copy.
    /// Pixel size survives only when it is isotropic.
    pub fn flatten(&self) -> Array {
        if !self.is_contiguous() {
            debug!("Array::flatten copying non-contiguous sizes={:?}", self.sizes);
            return self.copy().flatten();
        }
        let mut out = self.clone();
        out.sizes = vec![num_pixels(&self.sizes)];
        out.strides = vec![self.channels() as isize];
        if !self.pixel_size.is_isotropic(self.ndim()) {
            out.reset_pixel_size();
        }
        out.into_view()
    }

    /// Keeps every `steps[d]`-th pixel along each leading dimension.
    pub fn subsample(&self, steps: &[usize]) -> Result<Array> {
        let ranges: Vec<Range> = steps.iter().map(|&s| Range::all().with_step(s)).collect();
        self.slice(&ranges)
    }

    /// Same samples, read as the transposed tensor.
    pub fn transpose_tensor(&self) -> Array {
        let mut out = self.clone();
        out.tensor = self.tensor.transposed();
        out.into_view()
    }

    /// Reinterprets each pixel's samples with a new tensor shape of equal size.
    pub fn reshape_tensor(&self, shape: TensorShape) -> Result<Array> {
        if shape.elements() != self.channels() {
            return Err(ArrayError::ShapeMismatch {
                expected: vec![self.channels()],
                found: vec![shape.elements()],
            });
        }
        let mut out = self.clone();
        out.tensor = shape;
        Ok(out.into_view())
    }
}
