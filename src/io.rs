//! Image and JSON I/O at the crate's edge.
//!
//! - `from_dynamic_image` / `load_image`: decode through the `image` crate into an [`Array`].
//! - `to_dynamic_image` / `save_image`: render a 2-D array for display.
//! - `write_json_file`: pretty-print a serializable value to disk.
use image::{DynamicImage, ImageBuffer, Luma, Rgb};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::array::{Array, DataType, Element};
use crate::error::ArrayError;

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Image(#[from] image::ImageError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Array(#[from] ArrayError),
}

impl IoError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        IoError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

/// How sample values are mapped onto 8-bit display intensities.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Clamp to `0..=255`.
    Raw,
    /// Stretch the value range linearly onto `0..=255`.
    #[default]
    Normal,
    /// Integer labels on a color palette; 0 and non-finite values stay black.
    Labels,
}

const LABEL_PALETTE: [[u8; 3]; 12] = [
    [255, 0, 0],
    [0, 255, 0],
    [0, 0, 255],
    [255, 255, 0],
    [0, 255, 255],
    [255, 0, 255],
    [255, 128, 0],
    [128, 255, 0],
    [0, 128, 255],
    [128, 0, 255],
    [255, 0, 128],
    [0, 255, 128],
];

fn wrap<T: Element>(width: u32, height: u32, channels: usize, data: Vec<T>) -> Result<Array, IoError> {
    let mut array = Array::from_vec(&[height as usize, width as usize], channels, data)?;
    if channels == 3 {
        array.set_color_space("sRGB")?;
    }
    Ok(array)
}

/// Converts a decoded image into a `[height, width]` array with interleaved channels.
///
/// 8-bit and 16-bit images keep their sample type; float images become
/// `F32`. Three-channel images are tagged `sRGB`.
pub fn from_dynamic_image(img: DynamicImage) -> Result<Array, IoError> {
    let (w, h) = (img.width(), img.height());
    match img {
        DynamicImage::ImageLuma8(b) => wrap(w, h, 1, b.into_raw()),
        DynamicImage::ImageLumaA8(b) => wrap(w, h, 2, b.into_raw()),
        DynamicImage::ImageRgb8(b) => wrap(w, h, 3, b.into_raw()),
        DynamicImage::ImageRgba8(b) => wrap(w, h, 4, b.into_raw()),
        DynamicImage::ImageLuma16(b) => wrap(w, h, 1, b.into_raw()),
        DynamicImage::ImageLumaA16(b) => wrap(w, h, 2, b.into_raw()),
        DynamicImage::ImageRgb16(b) => wrap(w, h, 3, b.into_raw()),
        DynamicImage::ImageRgba16(b) => wrap(w, h, 4, b.into_raw()),
        DynamicImage::ImageRgb32F(b) => wrap(w, h, 3, b.into_raw()),
        other => wrap(w, h, 4, other.into_rgba32f().into_raw()),
    }
}

/// Loads an image from disk.
pub fn load_image(path: &Path) -> Result<Array, IoError> {
    let img = image::open(path)?;
    debug!("load_image {} color={:?}", path.display(), img.color());
    from_dynamic_image(img)
}

fn display_values(samples: &[f64], dtype: DataType, mode: DisplayMode) -> Vec<u8> {
    if dtype.is_binary() {
        return samples.iter().map(|&v| if v != 0.0 { 255 } else { 0 }).collect();
    }
    match mode {
        DisplayMode::Raw => {
            if samples.iter().any(|&v| !(0.0..=255.0).contains(&v)) {
                warn!("display: values outside 0..=255 are clamped");
            }
            samples.iter().map(|&v| v.clamp(0.0, 255.0).round() as u8).collect()
        }
        DisplayMode::Normal | DisplayMode::Labels => {
            let (lo, hi) = samples
                .iter()
                .filter(|v| v.is_finite())
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
            if !(hi > lo) {
                return vec![0; samples.len()];
            }
            let scale = 255.0 / (hi - lo);
            samples.iter().map(|&v| ((v - lo) * scale).round() as u8).collect()
        }
    }
}

fn label_colors(samples: &[f64], dtype: DataType) -> Vec<u8> {
    if dtype.is_float() && samples.iter().any(|v| v.is_finite() && v.fract() != 0.0) {
        warn!("display: non-integer labels are rounded");
    }
    samples
        .iter()
        .flat_map(|&v| {
            let label = v.round();
            if !label.is_finite() || label == 0.0 {
                [0, 0, 0]
            } else {
                let idx = (label.abs() as usize - 1) % LABEL_PALETTE.len();
                LABEL_PALETTE[idx]
            }
        })
        .collect()
}

/// Renders a 2-D array (after dropping singleton dimensions) as an 8-bit image.
///
/// Supports 1 or 3 channels; `Labels` needs a single channel and produces RGB.
pub fn to_dynamic_image(array: &Array, mode: DisplayMode) -> Result<DynamicImage, IoError> {
    let mut view = if array.ndim() == 2 {
        array.clone()
    } else {
        array.squeeze()
    };
    while view.ndim() < 2 {
        view = view.add_singleton(0)?;
    }
    if view.ndim() != 2 {
        return Err(ArrayError::InvalidShape(format!(
            "display needs a 2-D array, got sizes {:?}",
            array.sizes()
        ))
        .into());
    }
    let too_large = || ArrayError::InvalidShape(format!("{:?} exceeds image limits", view.sizes()));
    let height = u32::try_from(view.size(0)).map_err(|_| too_large())?;
    let width = u32::try_from(view.size(1)).map_err(|_| too_large())?;
    let samples = view.samples();
    let channels = view.channels();

    let image = match (mode, channels) {
        (DisplayMode::Labels, 1) => {
            let data = label_colors(&samples, view.data_type());
            ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, data).map(DynamicImage::ImageRgb8)
        }
        (DisplayMode::Labels, c) => {
            return Err(ArrayError::ShapeMismatch {
                expected: vec![1],
                found: vec![c],
            }
            .into())
        }
        (_, 1) => {
            let data = display_values(&samples, view.data_type(), mode);
            ImageBuffer::<Luma<u8>, _>::from_raw(width, height, data).map(DynamicImage::ImageLuma8)
        }
        (_, 3) => {
            let data = display_values(&samples, view.data_type(), mode);
            ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, data).map(DynamicImage::ImageRgb8)
        }
        (_, c) => {
            return Err(ArrayError::ShapeMismatch {
                expected: vec![3],
                found: vec![c],
            }
            .into())
        }
    };
    image.ok_or_else(|| too_large().into())
}

/// Renders `array` and writes it to `path`; the format follows the extension.
pub fn save_image(array: &Array, path: &Path, mode: DisplayMode) -> Result<(), IoError> {
    ensure_parent_dir(path)?;
    let image = to_dynamic_image(array, mode)?;
    debug!("save_image {} mode={:?}", path.display(), mode);
    image.save(path)?;
    Ok(())
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), IoError> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).map_err(|e| IoError::io(path, e))
}

fn ensure_parent_dir(path: &Path) -> Result<(), IoError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| IoError::io(parent, e))?;
        }
    }
    Ok(())
}
