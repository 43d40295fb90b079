use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::array::{CompareOp, DataType, PhysicalQuantity, Range};
use crate::io::{DisplayMode, IoError};

/// Configuration for the `mask_demo` tool.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MaskDemoConfig {
    /// Image to load; a synthetic noise image is generated when absent.
    pub input: Option<PathBuf>,
    pub synthetic: SyntheticInput,
    /// Isotropic pixel size attached before slicing.
    pub pixel_size: Option<PhysicalQuantity>,
    /// Region of interest, one range per leading dimension.
    pub roi: Vec<Range>,
    /// Channel compared against the threshold.
    pub channel: usize,
    pub op: CompareOp,
    pub threshold: f64,
    /// Value written to every selected pixel.
    pub value: f64,
    pub output: MaskDemoOutput,
}

impl Default for MaskDemoConfig {
    fn default() -> Self {
        Self {
            input: None,
            synthetic: SyntheticInput::default(),
            pixel_size: None,
            roi: Vec::new(),
            channel: 0,
            op: CompareOp::Gt,
            threshold: 128.0,
            value: 255.0,
            output: MaskDemoOutput::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SyntheticInput {
    pub sizes: Vec<usize>,
    pub channels: usize,
    pub data_type: DataType,
    pub seed: u64,
    pub low: f64,
    pub high: f64,
}

impl Default for SyntheticInput {
    fn default() -> Self {
        Self {
            sizes: vec![64, 96],
            channels: 1,
            data_type: DataType::U8,
            seed: 42,
            low: 0.0,
            high: 256.0,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MaskDemoOutput {
    pub image: Option<PathBuf>,
    pub mode: DisplayMode,
    pub summary_json: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<MaskDemoConfig, IoError> {
    let data = fs::read_to_string(path).map_err(|e| IoError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(serde_json::from_str(&data)?)
}
