//! Stride arithmetic and the canonical scan order.
//!
//! Scan order is row-major over the logical sizes of an array: the last
//! dimension varies fastest. It does not depend on the strides, so any two
//! arrays with equal sizes visit corresponding pixels in the same sequence.

/// Number of pixels implied by `sizes` (1 for a zero-dimensional array).
pub fn num_pixels(sizes: &[usize]) -> usize {
    sizes.iter().product()
}

/// Sample count for `sizes` × `channels`, rejecting totals whose byte size
/// does not fit in `isize`.
pub fn checked_num_samples(sizes: &[usize], channels: usize, bytes_per_sample: usize) -> Option<usize> {
    let samples = sizes
        .iter()
        .try_fold(channels, |acc, &s| acc.checked_mul(s))?;
    let bytes = samples.checked_mul(bytes_per_sample)?;
    (bytes <= isize::MAX as usize).then_some(samples)
}

/// Row-major strides (in samples) for interleaved channels.
///
/// The last dimension steps over one full pixel (`channels` samples).
pub fn contiguous_strides(sizes: &[usize], channels: usize) -> Vec<isize> {
    let ndim = sizes.len();
    let mut strides = vec![0isize; ndim];
    let mut step = channels as isize;
    for d in (0..ndim).rev() {
        strides[d] = step;
        step *= sizes[d] as isize;
    }
    strides
}

/// Offset of `coords` relative to the origin.
pub fn offset_of(strides: &[isize], coords: &[usize]) -> isize {
    debug_assert_eq!(strides.len(), coords.len());
    strides
        .iter()
        .zip(coords)
        .map(|(&s, &c)| s * c as isize)
        .sum()
}

/// Iterator over pixel offsets (relative to the origin) in scan order.
#[derive(Clone, Debug)]
pub struct Offsets<'a> {
    sizes: &'a [usize],
    strides: &'a [isize],
    coords: Vec<usize>,
    offset: isize,
    remaining: usize,
}

impl<'a> Offsets<'a> {
    pub fn new(sizes: &'a [usize], strides: &'a [isize]) -> Self {
        debug_assert_eq!(sizes.len(), strides.len());
        Self {
            sizes,
            strides,
            coords: vec![0; sizes.len()],
            offset: 0,
            remaining: num_pixels(sizes),
        }
    }
}

impl Iterator for Offsets<'_> {
    type Item = isize;

    fn next(&mut self) -> Option<isize> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.offset;
        self.remaining -= 1;
        if self.remaining > 0 {
            // Odometer increment, rightmost dimension first.
            for d in (0..self.sizes.len()).rev() {
                self.coords[d] += 1;
                self.offset += self.strides[d];
                if self.coords[d] < self.sizes[d] {
                    break;
                }
                self.offset -= self.strides[d] * self.sizes[d] as isize;
                self.coords[d] = 0;
            }
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Offsets<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contiguous_strides_interleave_channels() {
        assert_eq!(contiguous_strides(&[2, 3, 4], 1), vec![12, 4, 1]);
        assert_eq!(contiguous_strides(&[10, 20], 3), vec![60, 3]);
        assert!(contiguous_strides(&[], 2).is_empty());
    }

    #[test]
    fn offsets_follow_row_major_order() {
        let sizes = [2, 3];
        let strides = [3, 1];
        let offsets: Vec<isize> = Offsets::new(&sizes, &strides).collect();
        assert_eq!(offsets, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn offsets_honor_transposed_and_negative_strides() {
        let sizes = [2, 3];
        let transposed = [1, 2];
        let offsets: Vec<isize> = Offsets::new(&sizes, &transposed).collect();
        assert_eq!(offsets, vec![0, 2, 4, 1, 3, 5]);

        let reversed = [3, -1];
        let offsets: Vec<isize> = Offsets::new(&sizes, &reversed).collect();
        assert_eq!(offsets, vec![0, -1, -2, 3, 2, 1]);
    }

    #[test]
    fn degenerate_shapes() {
        assert_eq!(Offsets::new(&[], &[]).collect::<Vec<_>>(), vec![0]);
        assert_eq!(Offsets::new(&[4, 0], &[1, 1]).count(), 0);
    }

    #[test]
    fn checked_sample_count_rejects_overflow() {
        assert_eq!(checked_num_samples(&[10, 20], 3, 4), Some(600));
        assert_eq!(checked_num_samples(&[usize::MAX, 2], 1, 1), None);
        assert_eq!(checked_num_samples(&[usize::MAX / 4], 1, 8), None);
    }
}
