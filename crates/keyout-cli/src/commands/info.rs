use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use keyout_core::histogram::channel_histograms;
use keyout_core::io::image_io::{load_image, orient_portrait};
use keyout_core::threshold::Channel;

#[derive(Args)]
pub struct InfoArgs {
    /// Input image file
    pub file: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let decoded = load_image(&args.file)?;
    let (file_w, file_h) = (decoded.width(), decoded.height());
    let rotated = decoded.is_landscape();
    let buffer = orient_portrait(decoded)?;
    let histograms = channel_histograms(&buffer);

    println!("File:        {}", args.file.display());
    println!("Stored:      {}x{}", file_w, file_h);
    if rotated {
        println!("Displayed:   {}x{} (rotated to portrait)", buffer.width(), buffer.height());
    } else {
        println!("Displayed:   {}x{}", buffer.width(), buffer.height());
    }
    println!("Pixels:      {}", buffer.pixel_count());

    for channel in Channel::ALL {
        let bins = histograms.channel(channel);
        let min = bins.iter().position(|&n| n > 0);
        let max = bins.iter().rposition(|&n| n > 0);
        if let (Some(min), Some(max)) = (min, max) {
            println!("{:<13}{}-{}", format!("{channel}:"), min, max);
        }
    }

    Ok(())
}
