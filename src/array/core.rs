//! The [`Array`] handle: an N-dimensional, multi-channel view on shared storage.
//!
//! Every `Array` is a window (sizes, strides, origin) on a reference-counted
//! [`Storage`]. Allocating creates a fresh storage; slicing, selecting a tensor
//! element, cloning and the geometry operations create further windows on the
//! same samples. Sample writes go through `&self` because other handles may
//! alias the same samples anyway; metadata changes need `&mut self`.
//!
//! Samples are laid out row-major with interleaved channels: the last
//! dimension is the fastest-varying one and the channels of a pixel are
//! adjacent.

use log::debug;
use nalgebra::DMatrix;
use rand::Rng;
use std::fmt;

use super::dtype::{DataType, Element};
use super::metadata::PixelSize;
use super::range::Range;
use super::shape::{checked_num_samples, contiguous_strides, num_pixels, offset_of, Offsets};
use super::storage::Storage;
use super::tensor::TensorShape;
use crate::error::{ArrayError, Result};

#[derive(Clone)]
pub struct Array {
    pub(super) storage: Storage,
    pub(super) sizes: Vec<usize>,
    /// Per-dimension step, in samples.
    pub(super) strides: Vec<isize>,
    pub(super) tensor: TensorShape,
    pub(super) tensor_stride: isize,
    /// Index of pixel 0, channel 0 in the storage.
    pub(super) origin: usize,
    pub(super) pixel_size: PixelSize,
    pub(super) color_space: Option<String>,
    pub(super) view: bool,
}

fn validate_shape(sizes: &[usize], tensor: &TensorShape, dtype: DataType) -> Result<usize> {
    let channels = tensor.elements();
    if channels == 0 {
        return Err(ArrayError::InvalidShape("an array needs at least one channel".into()));
    }
    if let Some(dim) = sizes.iter().position(|&s| s == 0) {
        return Err(ArrayError::InvalidShape(format!("dimension {dim} has size 0")));
    }
    checked_num_samples(sizes, channels, dtype.size_in_bytes()).ok_or_else(|| {
        ArrayError::InvalidShape(format!(
            "{sizes:?} x {channels} samples of {dtype} overflow the address space"
        ))
    })
}

impl Array {
    /// Allocates a zeroed array with `channels` samples per pixel.
    ///
    /// ```
    /// use ndview::{Array, DataType};
    ///
    /// let a = Array::new(&[10, 20], 1, DataType::U8).unwrap();
    /// assert_eq!(a.sizes(), &[10, 20]);
    /// ```
    pub fn new(sizes: &[usize], channels: usize, dtype: DataType) -> Result<Self> {
        if channels == 0 {
            return Err(ArrayError::InvalidShape("an array needs at least one channel".into()));
        }
        Self::with_tensor(sizes, TensorShape::vector(channels), dtype)
    }

    /// Allocates a zeroed array whose pixels have the given tensor shape.
    pub fn with_tensor(sizes: &[usize], tensor: TensorShape, dtype: DataType) -> Result<Self> {
        let len = validate_shape(sizes, &tensor, dtype)?;
        debug!(
            "Array::with_tensor sizes={:?} tensor={:?} dtype={} samples={}",
            sizes, tensor, dtype, len
        );
        Ok(Self::from_storage(
            Storage::zeros(dtype, len),
            sizes.to_vec(),
            tensor,
        ))
    }

    /// Wraps typed samples laid out row-major with interleaved channels.
    pub fn from_vec<T: Element>(sizes: &[usize], channels: usize, data: Vec<T>) -> Result<Self> {
        let tensor = TensorShape::vector(channels);
        if channels == 0 {
            return Err(ArrayError::InvalidShape("an array needs at least one channel".into()));
        }
        let len = validate_shape(sizes, &tensor, T::DATA_TYPE)?;
        if data.len() != len {
            return Err(ArrayError::LengthMismatch {
                expected: len,
                found: data.len(),
            });
        }
        Ok(Self::from_storage(
            Storage::from_vec(data),
            sizes.to_vec(),
            tensor,
        ))
    }

    /// Contiguous owner of `storage`; the caller guarantees the length fits.
    pub(crate) fn from_storage(storage: Storage, sizes: Vec<usize>, tensor: TensorShape) -> Self {
        let strides = contiguous_strides(&sizes, tensor.elements());
        Self {
            storage,
            sizes,
            strides,
            tensor,
            tensor_stride: 1,
            origin: 0,
            pixel_size: PixelSize::default(),
            color_space: None,
            view: false,
        }
    }

    // --- Geometry and metadata ---------------------------------------------

    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    /// Size along `dim`.
    ///
    /// # Panics
    ///
    /// Panics when `dim >= self.ndim()`, like slice indexing.
    pub fn size(&self, dim: usize) -> usize {
        self.sizes[dim]
    }

    /// Number of spatial dimensions.
    pub fn ndim(&self) -> usize {
        self.sizes.len()
    }

    pub fn strides(&self) -> &[isize] {
        &self.strides
    }

    pub fn tensor_stride(&self) -> isize {
        self.tensor_stride
    }

    pub fn origin(&self) -> usize {
        self.origin
    }

    pub fn tensor_shape(&self) -> TensorShape {
        self.tensor
    }

    /// Number of samples per pixel.
    pub fn channels(&self) -> usize {
        self.tensor.elements()
    }

    pub fn is_scalar(&self) -> bool {
        self.channels() == 1
    }

    pub fn data_type(&self) -> DataType {
        self.storage.data_type()
    }

    pub fn num_pixels(&self) -> usize {
        num_pixels(&self.sizes)
    }

    pub fn num_samples(&self) -> usize {
        self.num_pixels() * self.channels()
    }

    pub fn is_empty(&self) -> bool {
        self.num_pixels() == 0
    }

    pub fn pixel_size(&self) -> &PixelSize {
        &self.pixel_size
    }

    pub fn set_pixel_size(&mut self, pixel_size: PixelSize) {
        self.pixel_size = pixel_size;
    }

    pub fn reset_pixel_size(&mut self) {
        self.pixel_size = PixelSize::default();
    }

    pub fn color_space(&self) -> Option<&str> {
        self.color_space.as_deref()
    }

    pub fn is_color(&self) -> bool {
        self.color_space.is_some()
    }

    /// Tags the array with a color space name. Requires at least 3 channels.
    pub fn set_color_space(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        if self.channels() < 3 {
            return Err(ArrayError::InvalidState(format!(
                "color space '{name}' needs at least 3 channels, array has {}",
                self.channels()
            )));
        }
        self.color_space = Some(name);
        Ok(())
    }

    pub fn reset_color_space(&mut self) {
        self.color_space = None;
    }

    // --- Sharing -------------------------------------------------------------

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// True for handles created by slicing or reshaping another array.
    pub fn is_view(&self) -> bool {
        self.view
    }

    pub fn shares_storage(&self, other: &Array) -> bool {
        self.storage.same_as(&other.storage)
    }

    /// Number of handles (this one included) keeping the storage alive.
    pub fn share_count(&self) -> usize {
        self.storage.share_count()
    }

    pub fn is_shared(&self) -> bool {
        self.share_count() > 1
    }

    /// True when the array covers a row-major block with interleaved channels.
    pub fn is_contiguous(&self) -> bool {
        let channels = self.channels();
        if channels > 1 && self.tensor_stride != 1 {
            return false;
        }
        let expected = contiguous_strides(&self.sizes, channels);
        self.sizes
            .iter()
            .zip(self.strides.iter().zip(&expected))
            .all(|(&size, (&s, &e))| size == 1 || s == e)
    }

    // --- Scan order ----------------------------------------------------------

    /// Storage index of every pixel (channel 0), in scan order.
    pub(crate) fn pixel_offsets(&self) -> impl Iterator<Item = usize> + '_ {
        let origin = self.origin as isize;
        Offsets::new(&self.sizes, &self.strides).map(move |off| (origin + off) as usize)
    }

    #[inline]
    pub(crate) fn channel_index(&self, pixel: usize, channel: usize) -> usize {
        (pixel as isize + channel as isize * self.tensor_stride) as usize
    }

    /// Storage index of every sample, pixel by pixel in scan order.
    pub(crate) fn sample_indices(&self) -> impl Iterator<Item = usize> + '_ {
        let channels = self.channels();
        self.pixel_offsets()
            .flat_map(move |p| (0..channels).map(move |k| self.channel_index(p, k)))
    }

    /// Every sample in scan order, channels of a pixel adjacent.
    pub fn samples(&self) -> Vec<f64> {
        self.storage.borrow().read(self.sample_indices())
    }

    /// Typed copy of every sample in scan order.
    pub fn to_vec<T: Element>(&self) -> Result<Vec<T>> {
        self.storage
            .borrow()
            .read_typed(self.sample_indices())
            .ok_or(ArrayError::DataTypeMismatch {
                expected: T::DATA_TYPE,
                found: self.data_type(),
            })
    }

    // --- Writing -------------------------------------------------------------

    /// Writes `value` to every channel of every pixel covered by this array.
    pub fn fill(&self, value: f64) {
        debug!("Array::fill value={} pixels={}", value, self.num_pixels());
        self.storage.borrow_mut().fill(self.sample_indices(), value);
    }

    /// Writes one value per channel to every pixel covered by this array.
    pub fn fill_pixel(&self, values: &[f64]) -> Result<()> {
        if values.len() != self.channels() {
            return Err(ArrayError::ShapeMismatch {
                expected: vec![self.channels()],
                found: vec![values.len()],
            });
        }
        self.storage
            .borrow_mut()
            .write(self.sample_indices(), values.iter().copied().cycle());
        Ok(())
    }

    /// Fills with uniform noise in `[low, high)` drawn from `rng`.
    pub fn fill_uniform<R: Rng>(&self, low: f64, high: f64, rng: &mut R) -> Result<()> {
        if !(low < high) || !(high - low).is_finite() {
            return Err(ArrayError::InvalidState(format!(
                "noise range [{low}, {high}) is empty or unbounded"
            )));
        }
        let values: Vec<f64> = (0..self.num_samples())
            .map(|_| rng.gen_range(low..high))
            .collect();
        self.storage
            .borrow_mut()
            .write(self.sample_indices(), values.into_iter());
        Ok(())
    }

    /// Assigns the samples of `src` to the region covered by this array.
    ///
    /// Sizes and channel counts must match; values are converted to this
    /// array's data type. `src` may overlap this array.
    pub fn copy_from(&self, src: &Array) -> Result<()> {
        if src.sizes != self.sizes {
            return Err(ArrayError::ShapeMismatch {
                expected: self.sizes.clone(),
                found: src.sizes.clone(),
            });
        }
        if src.channels() != self.channels() {
            return Err(ArrayError::ShapeMismatch {
                expected: vec![self.channels()],
                found: vec![src.channels()],
            });
        }
        let values = src.samples();
        self.storage
            .borrow_mut()
            .write(self.sample_indices(), values.into_iter());
        Ok(())
    }

    // --- Views ---------------------------------------------------------------

    /// Region-of-interest view, one [`Range`] per leading dimension.
    ///
    /// Dimensions without a range are kept whole.
    ///
    /// ```
    /// use ndview::{Array, DataType, Range};
    ///
    /// let a = Array::new(&[10, 20], 1, DataType::U8).unwrap();
    /// let b = a.slice(&[Range::new(0, 4), Range::new(4, -1)]).unwrap();
    /// assert_eq!(b.sizes(), &[4, 15]);
    /// assert!(b.shares_storage(&a));
    /// ```
    pub fn slice(&self, ranges: &[Range]) -> Result<Array> {
        let ndim = self.ndim();
        if ranges.len() > ndim {
            return Err(ArrayError::IndexOutOfRange(format!(
                "{} ranges given for a {ndim}-dimensional array",
                ranges.len()
            )));
        }
        let mut out = self.clone();
        let mut origin = self.origin as isize;
        for (dim, range) in ranges.iter().enumerate() {
            let resolved = range.resolve(self.sizes[dim]).map_err(|err| match err {
                ArrayError::IndexOutOfRange(msg) => {
                    ArrayError::IndexOutOfRange(format!("dimension {dim}: {msg}"))
                }
                other => other,
            })?;
            if resolved.len > 0 {
                origin += resolved.start as isize * self.strides[dim];
            }
            out.sizes[dim] = resolved.len;
            out.strides[dim] = self.strides[dim] * resolved.step as isize;
            out.pixel_size
                .scale_dimension(dim, resolved.step as f64, ndim);
        }
        out.origin = origin as usize;
        out.view = true;
        debug!(
            "Array::slice sizes={:?} -> {:?} origin={}",
            self.sizes, out.sizes, out.origin
        );
        Ok(out)
    }

    /// Scalar view on channel `index` of every pixel.
    pub fn tensor_element(&self, index: usize) -> Result<Array> {
        if index >= self.channels() {
            return Err(ArrayError::IndexOutOfRange(format!(
                "tensor element {index} of a {}-channel array",
                self.channels()
            )));
        }
        let mut out = self.clone();
        out.origin = self.channel_index(self.origin, index);
        out.tensor = TensorShape::Scalar;
        out.color_space = None;
        out.view = true;
        Ok(out)
    }

    // --- Pixel access --------------------------------------------------------

    fn pixel_index(&self, coords: &[usize]) -> Result<usize> {
        if coords.len() != self.ndim() {
            return Err(ArrayError::ShapeMismatch {
                expected: vec![self.ndim()],
                found: vec![coords.len()],
            });
        }
        for (dim, (&c, &size)) in coords.iter().zip(&self.sizes).enumerate() {
            if c >= size {
                return Err(ArrayError::IndexOutOfRange(format!(
                    "coordinate {c} along dimension {dim} of size {size}"
                )));
            }
        }
        Ok((self.origin as isize + offset_of(&self.strides, coords)) as usize)
    }

    fn check_channel(&self, channel: usize) -> Result<()> {
        if channel >= self.channels() {
            return Err(ArrayError::IndexOutOfRange(format!(
                "channel {channel} of a {}-channel array",
                self.channels()
            )));
        }
        Ok(())
    }

    /// All channels of the pixel at `coords`.
    pub fn at(&self, coords: &[usize]) -> Result<Vec<f64>> {
        let p = self.pixel_index(coords)?;
        let buffer = self.storage.borrow();
        Ok((0..self.channels())
            .map(|k| buffer.get(self.channel_index(p, k)))
            .collect())
    }

    pub fn sample(&self, coords: &[usize], channel: usize) -> Result<f64> {
        self.check_channel(channel)?;
        let p = self.pixel_index(coords)?;
        Ok(self.storage.borrow().get(self.channel_index(p, channel)))
    }

    pub fn set_pixel(&self, coords: &[usize], values: &[f64]) -> Result<()> {
        if values.len() != self.channels() {
            return Err(ArrayError::ShapeMismatch {
                expected: vec![self.channels()],
                found: vec![values.len()],
            });
        }
        let p = self.pixel_index(coords)?;
        let mut buffer = self.storage.borrow_mut();
        for (k, &v) in values.iter().enumerate() {
            buffer.set(self.channel_index(p, k), v);
        }
        Ok(())
    }

    pub fn set_sample(&self, coords: &[usize], channel: usize, value: f64) -> Result<()> {
        self.check_channel(channel)?;
        let p = self.pixel_index(coords)?;
        self.storage
            .borrow_mut()
            .set(self.channel_index(p, channel), value);
        Ok(())
    }

    /// The pixel at `coords` expanded to its full tensor matrix.
    pub fn pixel_matrix(&self, coords: &[usize]) -> Result<DMatrix<f64>> {
        let samples = self.at(coords)?;
        Ok(self.tensor.to_matrix(&samples))
    }

    // --- Copies --------------------------------------------------------------

    fn with_metadata_of(mut self, src: &Array) -> Self {
        self.pixel_size = src.pixel_size.clone();
        self.color_space = src.color_space.clone();
        self
    }

    /// Deep copy into fresh contiguous storage, keeping type and metadata.
    pub fn copy(&self) -> Array {
        let buffer = self.storage.borrow().gather(self.sample_indices());
        Array::from_storage(Storage::from_buffer(buffer), self.sizes.clone(), self.tensor)
            .with_metadata_of(self)
    }

    /// Copy converted to `dtype`, saturating out-of-range values.
    pub fn convert(&self, dtype: DataType) -> Array {
        if dtype == self.data_type() {
            return self.copy();
        }
        let out = self.similar(dtype);
        let values = self.samples();
        out.storage
            .borrow_mut()
            .write(0..values.len(), values.into_iter());
        out
    }

    /// Zeroed array with the same sizes, tensor shape and metadata.
    pub fn similar(&self, dtype: DataType) -> Array {
        Array::from_storage(
            Storage::zeros(dtype, self.num_samples()),
            self.sizes.clone(),
            self.tensor,
        )
        .with_metadata_of(self)
    }
}

impl fmt::Debug for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Array")
            .field("sizes", &self.sizes)
            .field("strides", &self.strides)
            .field("tensor", &self.tensor)
            .field("tensor_stride", &self.tensor_stride)
            .field("origin", &self.origin)
            .field("data_type", &self.data_type())
            .field("color_space", &self.color_space)
            .field("view", &self.view)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::metadata::PhysicalQuantity;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ramp(sizes: &[usize]) -> Array {
        let n = num_pixels(sizes);
        Array::from_vec(sizes, 1, (0..n as i32).collect()).unwrap()
    }

    #[test]
    #[should_panic]
    fn size_past_last_dimension_panics() {
        ramp(&[2, 3]).size(2);
    }

    #[test]
    fn allocation_is_zeroed() {
        let a = Array::new(&[3, 4, 5], 2, DataType::F32).unwrap();
        assert_eq!(a.sizes(), &[3, 4, 5]);
        assert_eq!(a.channels(), 2);
        assert_eq!(a.num_samples(), 120);
        assert!(a.samples().iter().all(|&v| v == 0.0));
        assert!(!a.is_view());
        assert!(a.is_contiguous());
    }

    #[test]
    fn allocation_rejects_bad_shapes() {
        assert!(matches!(
            Array::new(&[4, 0], 1, DataType::U8),
            Err(ArrayError::InvalidShape(_))
        ));
        assert!(matches!(
            Array::new(&[4], 0, DataType::U8),
            Err(ArrayError::InvalidShape(_))
        ));
        assert!(matches!(
            Array::new(&[usize::MAX / 2, 4], 1, DataType::F64),
            Err(ArrayError::InvalidShape(_))
        ));
    }

    #[test]
    fn zero_dimensional_array_holds_one_pixel() {
        let a = Array::new(&[], 3, DataType::U8).unwrap();
        assert_eq!(a.num_pixels(), 1);
        a.fill_pixel(&[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(a.at(&[]).unwrap(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn from_vec_checks_length() {
        let err = Array::from_vec(&[2, 2], 1, vec![1u8, 2, 3]).unwrap_err();
        assert_eq!(err, ArrayError::LengthMismatch { expected: 4, found: 3 });
    }

    #[test]
    fn typed_readback_requires_matching_type() {
        let a = ramp(&[2, 3]);
        assert_eq!(a.to_vec::<i32>().unwrap(), vec![0, 1, 2, 3, 4, 5]);
        assert!(matches!(
            a.to_vec::<u8>(),
            Err(ArrayError::DataTypeMismatch { .. })
        ));
    }

    #[test]
    fn fill_pixel_broadcasts_per_channel() {
        let a = Array::new(&[2, 2], 3, DataType::U8).unwrap();
        a.fill_pixel(&[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(a.at(&[1, 1]).unwrap(), vec![1.0, 2.0, 3.0]);
        assert!(matches!(
            a.fill_pixel(&[1.0, 2.0]),
            Err(ArrayError::ShapeMismatch { .. })
        ));
        // The failed call wrote nothing.
        assert_eq!(a.at(&[0, 0]).unwrap(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn slice_shares_storage_and_offsets_origin() {
        let a = ramp(&[4, 5]);
        let b = a.slice(&[Range::new(1, 3), Range::new(2, 5)]).unwrap();
        assert_eq!(b.sizes(), &[2, 3]);
        assert!(b.is_view());
        assert!(b.shares_storage(&a));
        assert_eq!(b.samples(), vec![7.0, 8.0, 9.0, 12.0, 13.0, 14.0]);
        assert!(!b.is_contiguous());
    }

    #[test]
    fn slice_of_slice_composes() {
        let a = ramp(&[6, 6]);
        let b = a.slice(&[Range::starting_at(1), Range::starting_at(1)]).unwrap();
        let c = b.slice(&[Range::index(-1), Range::new(0, 2)]).unwrap();
        assert_eq!(c.samples(), vec![31.0, 32.0]);
    }

    #[test]
    fn stepped_slice_subsamples_and_scales_pixel_size() {
        let mut a = ramp(&[4, 6]);
        a.set_pixel_size(PixelSize::isotropic(PhysicalQuantity::new(0.5, "um")));
        let b = a.slice(&[Range::all(), Range::all().with_step(2)]).unwrap();
        assert_eq!(b.sizes(), &[4, 3]);
        assert_eq!(b.sample(&[1, 2], 0).unwrap(), 10.0);
        assert_eq!(b.pixel_size().get(0).magnitude, 0.5);
        assert_eq!(b.pixel_size().get(1).magnitude, 1.0);
    }

    #[test]
    fn fewer_ranges_keep_trailing_dimensions() {
        let a = ramp(&[3, 4, 5]);
        let b = a.slice(&[Range::index(2)]).unwrap();
        assert_eq!(b.sizes(), &[1, 4, 5]);
        assert!(matches!(
            a.slice(&[Range::all(), Range::all(), Range::all(), Range::all()]),
            Err(ArrayError::IndexOutOfRange(_))
        ));
    }

    #[test]
    fn empty_slice_is_allowed() {
        let a = ramp(&[3, 4]);
        let b = a.slice(&[Range::new(3, 3)]).unwrap();
        assert!(b.is_empty());
        assert!(b.samples().is_empty());
        b.fill(9.0);
        assert!(a.samples().iter().all(|&v| v < 12.0));
    }

    #[test]
    fn tensor_element_views_one_channel() {
        let mut a = Array::new(&[2, 3], 3, DataType::U8).unwrap();
        a.set_color_space("sRGB").unwrap();
        let g = a.tensor_element(1).unwrap();
        assert!(g.is_scalar());
        assert_eq!(g.color_space(), None);
        g.fill(7.0);
        assert_eq!(a.at(&[1, 2]).unwrap(), vec![0.0, 7.0, 0.0]);
        a.set_pixel(&[0, 0], &[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(g.sample(&[0, 0], 0).unwrap(), 2.0);
        assert!(matches!(
            a.tensor_element(3),
            Err(ArrayError::IndexOutOfRange(_))
        ));
    }

    #[test]
    fn pixel_access_validates_coordinates() {
        let a = ramp(&[2, 3]);
        assert_eq!(a.sample(&[1, 2], 0).unwrap(), 5.0);
        assert!(matches!(a.at(&[2, 0]), Err(ArrayError::IndexOutOfRange(_))));
        assert!(matches!(a.at(&[1]), Err(ArrayError::ShapeMismatch { .. })));
        assert!(matches!(
            a.sample(&[0, 0], 1),
            Err(ArrayError::IndexOutOfRange(_))
        ));
    }

    #[test]
    fn pixel_matrix_expands_symmetric_tensors() {
        let a = Array::with_tensor(&[2], TensorShape::Symmetric(2), DataType::F64).unwrap();
        a.set_pixel(&[1], &[1.0, 2.0, 0.5]).unwrap();
        let m = a.pixel_matrix(&[1]).unwrap();
        assert_eq!(m.nrows(), 2);
        assert_eq!(m[(0, 1)], 0.5);
        assert_eq!(m[(1, 0)], 0.5);
        assert_eq!(m[(1, 1)], 2.0);
    }

    #[test]
    fn color_space_requires_three_channels() {
        let mut gray = Array::new(&[4, 4], 1, DataType::U8).unwrap();
        assert!(matches!(
            gray.set_color_space("sRGB"),
            Err(ArrayError::InvalidState(_))
        ));
        let mut rgb = Array::new(&[4, 4], 3, DataType::U8).unwrap();
        rgb.set_color_space("sRGB").unwrap();
        assert!(rgb.is_color());
        rgb.reset_color_space();
        assert!(!rgb.is_color());
    }

    #[test]
    fn copy_detaches_from_source() {
        let a = ramp(&[3, 3]);
        let v = a.slice(&[Range::new(1, 3), Range::new(1, 3)]).unwrap();
        let c = v.copy();
        assert!(!c.shares_storage(&a));
        assert!(c.is_contiguous());
        assert_eq!(c.to_vec::<i32>().unwrap(), vec![4, 5, 7, 8]);
        c.fill(0.0);
        assert_eq!(v.sample(&[0, 0], 0).unwrap(), 4.0);
    }

    #[test]
    fn convert_saturates() {
        let a = Array::from_vec(&[3], 1, vec![-5.0f32, 127.6, 300.0]).unwrap();
        let b = a.convert(DataType::U8);
        assert_eq!(b.data_type(), DataType::U8);
        assert_eq!(b.to_vec::<u8>().unwrap(), vec![0, 128, 255]);
    }

    #[test]
    fn copy_from_handles_overlap() {
        let a = ramp(&[1, 6]);
        let left = a.slice(&[Range::all(), Range::new(0, 4)]).unwrap();
        let right = a.slice(&[Range::all(), Range::new(2, 6)]).unwrap();
        right.copy_from(&left).unwrap();
        assert_eq!(a.to_vec::<i32>().unwrap(), vec![0, 1, 0, 1, 2, 3]);
        let wrong = ramp(&[2, 2]);
        assert!(matches!(
            right.copy_from(&wrong),
            Err(ArrayError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn uniform_noise_stays_in_range() {
        let a = Array::new(&[8, 8], 1, DataType::F64).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        a.fill_uniform(10.0, 20.0, &mut rng).unwrap();
        assert!(a.samples().iter().all(|&v| (10.0..20.0).contains(&v)));
        assert!(a.fill_uniform(1.0, 1.0, &mut rng).is_err());
    }

    #[test]
    fn dropping_the_parent_keeps_views_alive() {
        let a = ramp(&[2, 2]);
        let v = a.slice(&[Range::index(1)]).unwrap();
        assert_eq!(v.share_count(), 2);
        drop(a);
        assert_eq!(v.share_count(), 1);
        assert_eq!(v.samples(), vec![2.0, 3.0]);
    }
}
