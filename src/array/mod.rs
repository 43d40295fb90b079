//! N-dimensional, multi-channel arrays over shared storage.

mod core;
pub mod dtype;
mod geometry;
mod mask;
pub mod metadata;
pub mod range;
pub mod shape;
pub mod storage;
pub mod tensor;

pub use self::core::Array;
pub use dtype::{DataType, Element};
pub use mask::{CompareOp, Operand};
pub use metadata::{PhysicalQuantity, PixelSize};
pub use range::Range;
pub use storage::Storage;
pub use tensor::TensorShape;
