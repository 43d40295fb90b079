//! Reference-counted sample buffers shared by arrays and their views.
//!
//! A [`Storage`] is a cheap handle: cloning it shares the samples. Storage
//! never refers back to the arrays viewing it, so dropping the last array
//! handle releases the samples.

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use super::dtype::{DataType, Element};

/// Typed flat sample buffer.
#[derive(Clone, Debug, PartialEq)]
pub enum Buffer {
    Bin(Vec<bool>),
    U8(Vec<u8>),
    I8(Vec<i8>),
    U16(Vec<u16>),
    I16(Vec<i16>),
    U32(Vec<u32>),
    I32(Vec<i32>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

macro_rules! dispatch {
    ($buf:expr, $v:ident => $body:expr) => {
        match $buf {
            Buffer::Bin($v) => $body,
            Buffer::U8($v) => $body,
            Buffer::I8($v) => $body,
            Buffer::U16($v) => $body,
            Buffer::I16($v) => $body,
            Buffer::U32($v) => $body,
            Buffer::I32($v) => $body,
            Buffer::F32($v) => $body,
            Buffer::F64($v) => $body,
        }
    };
}

impl Buffer {
    /// Allocates `len` zero samples of the given type.
    pub fn zeros(dtype: DataType, len: usize) -> Self {
        match dtype {
            DataType::Bin => Buffer::Bin(vec![false; len]),
            DataType::U8 => Buffer::U8(vec![0; len]),
            DataType::I8 => Buffer::I8(vec![0; len]),
            DataType::U16 => Buffer::U16(vec![0; len]),
            DataType::I16 => Buffer::I16(vec![0; len]),
            DataType::U32 => Buffer::U32(vec![0; len]),
            DataType::I32 => Buffer::I32(vec![0; len]),
            DataType::F32 => Buffer::F32(vec![0.0; len]),
            DataType::F64 => Buffer::F64(vec![0.0; len]),
        }
    }

    pub fn data_type(&self) -> DataType {
        match self {
            Buffer::Bin(_) => DataType::Bin,
            Buffer::U8(_) => DataType::U8,
            Buffer::I8(_) => DataType::I8,
            Buffer::U16(_) => DataType::U16,
            Buffer::I16(_) => DataType::I16,
            Buffer::U32(_) => DataType::U32,
            Buffer::I32(_) => DataType::I32,
            Buffer::F32(_) => DataType::F32,
            Buffer::F64(_) => DataType::F64,
        }
    }

    pub fn len(&self) -> usize {
        dispatch!(self, v => v.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn get(&self, index: usize) -> f64 {
        dispatch!(self, v => v[index].to_f64())
    }

    #[inline]
    pub fn set(&mut self, index: usize, value: f64) {
        dispatch!(self, v => put(&mut v[index], value))
    }

    /// Reads the samples at `indices`, in iteration order.
    pub fn read<I>(&self, indices: I) -> Vec<f64>
    where
        I: Iterator<Item = usize>,
    {
        dispatch!(self, v => indices.map(|i| v[i].to_f64()).collect())
    }

    /// Writes one value, converted once, to every index.
    pub fn fill<I>(&mut self, indices: I, value: f64)
    where
        I: Iterator<Item = usize>,
    {
        dispatch!(self, v => fill_typed(v, indices, value))
    }

    /// Writes `values` to `indices` pairwise.
    pub fn write<I, V>(&mut self, indices: I, values: V)
    where
        I: Iterator<Item = usize>,
        V: Iterator<Item = f64>,
    {
        dispatch!(self, v => {
            for (i, value) in indices.zip(values) {
                put(&mut v[i], value);
            }
        })
    }

    /// New buffer of the same type holding the samples at `indices`.
    pub fn gather<I>(&self, indices: I) -> Buffer
    where
        I: Iterator<Item = usize>,
    {
        dispatch!(self, v => gather_typed(v, indices))
    }

    /// Typed copy of the samples at `indices`; `None` when `T` is not the buffer type.
    pub fn read_typed<T, I>(&self, indices: I) -> Option<Vec<T>>
    where
        T: Element,
        I: Iterator<Item = usize>,
    {
        T::from_buffer(self).map(|samples| indices.map(|i| samples[i]).collect())
    }
}

#[inline]
fn put<T: Element>(slot: &mut T, value: f64) {
    *slot = T::from_f64(value);
}

fn gather_typed<T: Element, I: Iterator<Item = usize>>(data: &[T], indices: I) -> Buffer {
    T::into_buffer(indices.map(|i| data[i]).collect())
}

fn fill_typed<T: Element, I: Iterator<Item = usize>>(data: &mut [T], indices: I, value: f64) {
    let converted = T::from_f64(value);
    for i in indices {
        data[i] = converted;
    }
}

/// Shared handle on a [`Buffer`].
#[derive(Clone)]
pub struct Storage {
    inner: Rc<RefCell<Buffer>>,
}

impl Storage {
    pub fn zeros(dtype: DataType, len: usize) -> Self {
        Self::from_buffer(Buffer::zeros(dtype, len))
    }

    pub fn from_buffer(buffer: Buffer) -> Self {
        Self {
            inner: Rc::new(RefCell::new(buffer)),
        }
    }

    pub fn from_vec<T: Element>(data: Vec<T>) -> Self {
        Self::from_buffer(T::into_buffer(data))
    }

    pub fn data_type(&self) -> DataType {
        self.inner.borrow().data_type()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of array handles currently referencing these samples.
    pub fn share_count(&self) -> usize {
        Rc::strong_count(&self.inner)
    }

    /// True when both handles refer to the same samples.
    pub fn same_as(&self, other: &Storage) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn borrow(&self) -> Ref<'_, Buffer> {
        self.inner.borrow()
    }

    pub(crate) fn borrow_mut(&self) -> RefMut<'_, Buffer> {
        self.inner.borrow_mut()
    }
}

impl fmt::Debug for Storage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Storage")
            .field("data_type", &self.data_type())
            .field("len", &self.len())
            .field("share_count", &self.share_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_samples() {
        let a = Storage::zeros(DataType::U16, 8);
        let b = a.clone();
        assert_eq!(a.share_count(), 2);
        assert!(a.same_as(&b));

        b.borrow_mut().set(3, 42.0);
        assert_eq!(a.borrow().get(3), 42.0);

        drop(b);
        assert_eq!(a.share_count(), 1);
    }

    #[test]
    fn fill_converts_once_per_type() {
        let s = Storage::zeros(DataType::U8, 4);
        s.borrow_mut().fill([0usize, 2].into_iter(), 511.0);
        assert_eq!(s.borrow().read(0..4), vec![255.0, 0.0, 255.0, 0.0]);
    }

    #[test]
    fn gather_keeps_the_sample_type() {
        let s = Storage::from_vec(vec![10i16, -20, 30]);
        let picked = s.borrow().gather([2usize, 1].into_iter());
        assert_eq!(picked, Buffer::I16(vec![30, -20]));
    }

    #[test]
    fn typed_read_checks_buffer_type() {
        let s = Storage::from_vec(vec![1.5f32, 2.5, 3.5]);
        assert_eq!(s.borrow().read_typed::<f32, _>([2usize, 0].into_iter()), Some(vec![3.5, 1.5]));
        assert_eq!(s.borrow().read_typed::<u8, _>(0..3), None);
    }
}
