//! Serializable summaries of arrays and masks for JSON reports.

use serde::Serialize;

use crate::array::{Array, DataType, PixelSize, TensorShape};

/// Layout and metadata of one array handle.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrayDescriptor {
    pub sizes: Vec<usize>,
    pub strides: Vec<isize>,
    pub tensor_stride: isize,
    pub tensor_shape: TensorShape,
    pub data_type: DataType,
    pub pixel_size: PixelSize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_space: Option<String>,
    pub is_view: bool,
    pub share_count: usize,
}

impl ArrayDescriptor {
    pub fn of(array: &Array) -> Self {
        Self {
            sizes: array.sizes().to_vec(),
            strides: array.strides().to_vec(),
            tensor_stride: array.tensor_stride(),
            tensor_shape: array.tensor_shape(),
            data_type: array.data_type(),
            pixel_size: array.pixel_size().clone(),
            color_space: array.color_space().map(str::to_string),
            is_view: array.is_view(),
            share_count: array.share_count(),
        }
    }
}

/// How much of an array a mask selects.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaskSummary {
    pub pixels: usize,
    pub selected: usize,
    pub fraction: f64,
}

impl MaskSummary {
    pub fn of(mask: &Array) -> Self {
        let pixels = mask.num_pixels();
        let selected = mask.count();
        let fraction = if pixels == 0 {
            0.0
        } else {
            selected as f64 / pixels as f64
        };
        Self {
            pixels,
            selected,
            fraction,
        }
    }
}
