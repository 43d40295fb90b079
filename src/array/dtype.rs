//! Enumerates the sample types an array can hold and the typed element trait.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::storage::Buffer;

/// Scalar sample type of an array.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    /// Binary samples, used for masks.
    #[serde(rename = "BIN")]
    Bin,
    #[serde(rename = "UINT8", alias = "U8")]
    U8,
    #[serde(rename = "SINT8", alias = "I8")]
    I8,
    #[serde(rename = "UINT16", alias = "U16")]
    U16,
    #[serde(rename = "SINT16", alias = "I16")]
    I16,
    #[serde(rename = "UINT32", alias = "U32")]
    U32,
    #[serde(rename = "SINT32", alias = "I32")]
    I32,
    #[serde(rename = "SFLOAT", alias = "F32")]
    F32,
    #[serde(rename = "DFLOAT", alias = "F64")]
    F64,
}

impl DataType {
    /// Returns the number of bytes required per sample.
    pub fn size_in_bytes(self) -> usize {
        match self {
            DataType::Bin | DataType::U8 | DataType::I8 => 1,
            DataType::U16 | DataType::I16 => 2,
            DataType::U32 | DataType::I32 | DataType::F32 => 4,
            DataType::F64 => 8,
        }
    }

    pub fn is_binary(self) -> bool {
        self == DataType::Bin
    }

    pub fn is_integer(self) -> bool {
        matches!(
            self,
            DataType::U8
                | DataType::I8
                | DataType::U16
                | DataType::I16
                | DataType::U32
                | DataType::I32
        )
    }

    pub fn is_float(self) -> bool {
        matches!(self, DataType::F32 | DataType::F64)
    }

    /// Inclusive value range representable by the type.
    pub fn value_range(self) -> (f64, f64) {
        match self {
            DataType::Bin => (0.0, 1.0),
            DataType::U8 => (u8::MIN as f64, u8::MAX as f64),
            DataType::I8 => (i8::MIN as f64, i8::MAX as f64),
            DataType::U16 => (u16::MIN as f64, u16::MAX as f64),
            DataType::I16 => (i16::MIN as f64, i16::MAX as f64),
            DataType::U32 => (u32::MIN as f64, u32::MAX as f64),
            DataType::I32 => (i32::MIN as f64, i32::MAX as f64),
            DataType::F32 => (f32::MIN as f64, f32::MAX as f64),
            DataType::F64 => (f64::MIN, f64::MAX),
        }
    }

    /// Stable upper-case name, matching what [`FromStr`] accepts.
    pub fn name(self) -> &'static str {
        match self {
            DataType::Bin => "BIN",
            DataType::U8 => "UINT8",
            DataType::I8 => "SINT8",
            DataType::U16 => "UINT16",
            DataType::I16 => "SINT16",
            DataType::U32 => "UINT32",
            DataType::I32 => "SINT32",
            DataType::F32 => "SFLOAT",
            DataType::F64 => "DFLOAT",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DataType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let dt = match s.trim().to_ascii_uppercase().as_str() {
            "BIN" => DataType::Bin,
            "UINT8" | "U8" => DataType::U8,
            "SINT8" | "I8" => DataType::I8,
            "UINT16" | "U16" => DataType::U16,
            "SINT16" | "I16" => DataType::I16,
            "UINT32" | "U32" => DataType::U32,
            "SINT32" | "I32" => DataType::I32,
            "SFLOAT" | "F32" => DataType::F32,
            "DFLOAT" | "F64" => DataType::F64,
            other => return Err(format!("unknown data type '{other}'")),
        };
        Ok(dt)
    }
}

/// Sample types that can be stored in an array buffer.
///
/// Conversion from `f64` into integral types rounds to the nearest integer,
/// saturates at [`DataType::value_range`] and maps `NaN` to zero. Float types
/// keep `NaN` and infinities.
pub trait Element: Copy + Default + PartialEq + fmt::Debug + 'static {
    const DATA_TYPE: DataType;

    fn to_f64(self) -> f64;
    fn from_f64(v: f64) -> Self;

    #[doc(hidden)]
    fn into_buffer(data: Vec<Self>) -> Buffer;
    #[doc(hidden)]
    fn from_buffer(buffer: &Buffer) -> Option<&[Self]>;
}

impl Element for bool {
    const DATA_TYPE: DataType = DataType::Bin;

    #[inline]
    fn to_f64(self) -> f64 {
        if self {
            1.0
        } else {
            0.0
        }
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        v != 0.0 && !v.is_nan()
    }

    fn into_buffer(data: Vec<Self>) -> Buffer {
        Buffer::Bin(data)
    }

    fn from_buffer(buffer: &Buffer) -> Option<&[Self]> {
        match buffer {
            Buffer::Bin(v) => Some(v),
            _ => None,
        }
    }
}

macro_rules! integer_element {
    ($ty:ty, $dt:ident) => {
        impl Element for $ty {
            const DATA_TYPE: DataType = DataType::$dt;

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn from_f64(v: f64) -> Self {
                if v.is_nan() {
                    return 0;
                }
                let (lo, hi) = DataType::$dt.value_range();
                v.round().clamp(lo, hi) as $ty
            }

            fn into_buffer(data: Vec<Self>) -> Buffer {
                Buffer::$dt(data)
            }

            fn from_buffer(buffer: &Buffer) -> Option<&[Self]> {
                match buffer {
                    Buffer::$dt(v) => Some(v),
                    _ => None,
                }
            }
        }
    };
}

integer_element!(u8, U8);
integer_element!(i8, I8);
integer_element!(u16, U16);
integer_element!(i16, I16);
integer_element!(u32, U32);
integer_element!(i32, I32);

impl Element for f32 {
    const DATA_TYPE: DataType = DataType::F32;

    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        // Finite values beyond the f32 range become infinite.
        v as f32
    }

    fn into_buffer(data: Vec<Self>) -> Buffer {
        Buffer::F32(data)
    }

    fn from_buffer(buffer: &Buffer) -> Option<&[Self]> {
        match buffer {
            Buffer::F32(v) => Some(v),
            _ => None,
        }
    }
}

impl Element for f64 {
    const DATA_TYPE: DataType = DataType::F64;

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        v
    }

    fn into_buffer(data: Vec<Self>) -> Buffer {
        Buffer::F64(data)
    }

    fn from_buffer(buffer: &Buffer) -> Option<&[Self]> {
        match buffer {
            Buffer::F64(v) => Some(v),
            _ => None,
        }
    }
}
