//! JSON configuration for the demo tools.

pub mod mask_demo;

pub use mask_demo::{load_config, MaskDemoConfig, MaskDemoOutput, SyntheticInput};
