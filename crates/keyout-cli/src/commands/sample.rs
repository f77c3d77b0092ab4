use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use keyout_core::io::image_io::{load_image, orient_portrait};
use keyout_core::preset::MaskPreset;
use keyout_core::sampler::sample_at;
use keyout_core::threshold::ThresholdState;
use keyout_core::viewport::Point;

#[derive(Args)]
pub struct SampleArgs {
    /// Input image file
    pub file: PathBuf,

    /// Column in the displayed (portrait) orientation
    #[arg(allow_negative_numbers = true)]
    pub x: f64,

    /// Row in the displayed (portrait) orientation
    #[arg(allow_negative_numbers = true)]
    pub y: f64,
}

/// Print the color under a pixel and a preset that keys exactly that color.
pub fn run(args: &SampleArgs) -> Result<()> {
    let buffer = orient_portrait(load_image(&args.file)?)?;
    let color = sample_at(&buffer, Point::new(args.x, args.y))?;

    println!("# {} at ({}, {}): {}", args.file.display(), args.x, args.y, color);
    let preset = MaskPreset::new(ThresholdState::pinned(color), false);
    print!("{}", toml::to_string_pretty(&preset)?);

    Ok(())
}
