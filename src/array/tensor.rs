//! Layout of the samples that make up one pixel.

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

/// How the channels of a pixel map onto a vector or matrix.
///
/// `Matrix` stores its elements column-major and `RowMajorMatrix` row-major.
/// A symmetric matrix stores the diagonal first, followed by the upper
/// triangle column by column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TensorShape {
    #[default]
    Scalar,
    ColumnVector(usize),
    RowVector(usize),
    Matrix { rows: usize, cols: usize },
    RowMajorMatrix { rows: usize, cols: usize },
    Diagonal(usize),
    Symmetric(usize),
}

impl TensorShape {
    /// Column vector for `n > 1` channels, scalar otherwise.
    pub fn vector(n: usize) -> Self {
        if n <= 1 {
            TensorShape::Scalar
        } else {
            TensorShape::ColumnVector(n)
        }
    }

    /// Number of stored samples per pixel.
    pub fn elements(&self) -> usize {
        match *self {
            TensorShape::Scalar => 1,
            TensorShape::ColumnVector(n) | TensorShape::RowVector(n) | TensorShape::Diagonal(n) => n,
            TensorShape::Matrix { rows, cols } | TensorShape::RowMajorMatrix { rows, cols } => {
                rows * cols
            }
            TensorShape::Symmetric(n) => n * (n + 1) / 2,
        }
    }

    pub fn rows(&self) -> usize {
        match *self {
            TensorShape::Scalar | TensorShape::RowVector(_) => 1,
            TensorShape::ColumnVector(n) | TensorShape::Diagonal(n) | TensorShape::Symmetric(n) => n,
            TensorShape::Matrix { rows, .. } | TensorShape::RowMajorMatrix { rows, .. } => rows,
        }
    }

    pub fn cols(&self) -> usize {
        match *self {
            TensorShape::Scalar | TensorShape::ColumnVector(_) => 1,
            TensorShape::RowVector(n) | TensorShape::Diagonal(n) | TensorShape::Symmetric(n) => n,
            TensorShape::Matrix { cols, .. } | TensorShape::RowMajorMatrix { cols, .. } => cols,
        }
    }

    pub fn is_scalar(&self) -> bool {
        self.elements() == 1
    }

    pub fn is_vector(&self) -> bool {
        matches!(self, TensorShape::ColumnVector(_) | TensorShape::RowVector(_))
    }

    /// Transposed shape, with the same stored element order.
    pub fn transposed(&self) -> Self {
        match *self {
            TensorShape::ColumnVector(n) => TensorShape::RowVector(n),
            TensorShape::RowVector(n) => TensorShape::ColumnVector(n),
            TensorShape::Matrix { rows, cols } => TensorShape::RowMajorMatrix { rows: cols, cols: rows },
            TensorShape::RowMajorMatrix { rows, cols } => TensorShape::Matrix { rows: cols, cols: rows },
            other => other,
        }
    }

    /// Expands stored samples into the full `rows × cols` matrix.
    pub fn to_matrix(&self, samples: &[f64]) -> DMatrix<f64> {
        debug_assert_eq!(samples.len(), self.elements());
        let (rows, cols) = (self.rows(), self.cols());
        match *self {
            TensorShape::Diagonal(n) => {
                let mut m = DMatrix::zeros(n, n);
                for (i, &v) in samples.iter().enumerate() {
                    m[(i, i)] = v;
                }
                m
            }
            TensorShape::Symmetric(n) => {
                let mut m = DMatrix::zeros(n, n);
                for (i, &v) in samples.iter().take(n).enumerate() {
                    m[(i, i)] = v;
                }
                let mut k = n;
                for c in 1..n {
                    for r in 0..c {
                        m[(r, c)] = samples[k];
                        m[(c, r)] = samples[k];
                        k += 1;
                    }
                }
                m
            }
            TensorShape::RowMajorMatrix { .. } => DMatrix::from_row_slice(rows, cols, samples),
            _ => DMatrix::from_column_slice(rows, cols, samples),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_counts() {
        assert_eq!(TensorShape::Scalar.elements(), 1);
        assert_eq!(TensorShape::vector(3).elements(), 3);
        assert_eq!(TensorShape::Matrix { rows: 2, cols: 3 }.elements(), 6);
        assert_eq!(TensorShape::Diagonal(4).elements(), 4);
        assert_eq!(TensorShape::Symmetric(3).elements(), 6);
        assert_eq!(TensorShape::vector(1), TensorShape::Scalar);
    }

    #[test]
    fn symmetric_expansion_mirrors_upper_triangle() {
        // xx, yy, zz, xy, xz, yz
        let m = TensorShape::Symmetric(3).to_matrix(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(m[(0, 0)], 1.0);
        assert_eq!(m[(2, 2)], 3.0);
        assert_eq!(m[(0, 1)], 4.0);
        assert_eq!(m[(1, 0)], 4.0);
        assert_eq!(m[(0, 2)], 5.0);
        assert_eq!(m[(2, 1)], 6.0);
    }

    #[test]
    fn matrix_expansion_is_column_major() {
        let m = TensorShape::Matrix { rows: 2, cols: 2 }.to_matrix(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(m[(1, 0)], 2.0);
        assert_eq!(m[(0, 1)], 3.0);
        let d = TensorShape::Diagonal(2).to_matrix(&[7.0, 8.0]);
        assert_eq!(d[(0, 1)], 0.0);
        assert_eq!(d[(1, 1)], 8.0);
    }

    #[test]
    fn transpose_swaps_vectors() {
        assert_eq!(TensorShape::ColumnVector(3).transposed(), TensorShape::RowVector(3));
        let m = TensorShape::Matrix { rows: 2, cols: 3 };
        assert_eq!(m.transposed(), TensorShape::RowMajorMatrix { rows: 3, cols: 2 });
        assert_eq!(m.transposed().transposed(), m);

        // Same stored samples, read as the transpose.
        let samples = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        assert_eq!(m.to_matrix(&samples).transpose(), m.transposed().to_matrix(&samples));
    }
}
