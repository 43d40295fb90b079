use anyhow::{bail, Context, Result};
use log::info;
use ndview::config::{load_config, MaskDemoConfig};
use ndview::diagnostics::{ArrayDescriptor, MaskSummary};
use ndview::io::{load_image, save_image, write_json_file};
use ndview::{Array, PixelSize};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::env;
use std::path::Path;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DemoSummary {
    op: String,
    threshold: f64,
    value: f64,
    image: ArrayDescriptor,
    roi: ArrayDescriptor,
    mask: MaskSummary,
}

fn main() {
    env_logger::Builder::default()
        .parse_env(env_logger::Env::default().filter_or("NDVIEW_LOG", "info"))
        .init();
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn usage() -> String {
    "Usage: mask_demo <config.json>".to_string()
}

fn input_array(config: &MaskDemoConfig) -> Result<Array> {
    if let Some(path) = &config.input {
        return load_image(path).with_context(|| format!("loading {}", path.display()));
    }
    let synth = &config.synthetic;
    let array = Array::new(&synth.sizes, synth.channels, synth.data_type)?;
    let mut rng = StdRng::seed_from_u64(synth.seed);
    array.fill_uniform(synth.low, synth.high, &mut rng)?;
    Ok(array)
}

fn run() -> Result<()> {
    let config_path = env::args().nth(1).ok_or_else(|| anyhow::anyhow!(usage()))?;
    let config = load_config(Path::new(&config_path))
        .with_context(|| format!("reading config {config_path}"))?;

    let mut image = input_array(&config)?;
    if let Some(size) = &config.pixel_size {
        image.set_pixel_size(PixelSize::isotropic(size.clone()));
    }
    if config.channel >= image.channels() {
        bail!(
            "channel {} requested from a {}-channel image",
            config.channel,
            image.channels()
        );
    }

    let roi = image.slice(&config.roi)?;
    let mask = roi
        .tensor_element(config.channel)?
        .compare(config.op, config.threshold)?;
    roi.scatter(&mask, config.value)?;

    let summary = DemoSummary {
        op: config.op.to_string(),
        threshold: config.threshold,
        value: config.value,
        image: ArrayDescriptor::of(&image),
        roi: ArrayDescriptor::of(&roi),
        mask: MaskSummary::of(&mask),
    };
    info!(
        "selected {} of {} pixels in roi {:?}",
        summary.mask.selected,
        summary.mask.pixels,
        roi.sizes()
    );

    if let Some(path) = &config.output.image {
        save_image(&image, path, config.output.mode)?;
        println!("Image written to {}", path.display());
    }
    match &config.output.summary_json {
        Some(path) => {
            write_json_file(path, &summary)?;
            println!("Summary written to {}", path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&summary)?),
    }
    Ok(())
}
