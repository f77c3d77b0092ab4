use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use keyout_core::controller::{Outcome, Pane, ViewerController, ViewerEvent};
use keyout_core::threshold::{Bound, Channel, ChannelRange};
use keyout_core::viewport::Point;
use tracing::debug;

use super::{parse_point, parse_range, read_preset};
use crate::summary::print_mask_summary;

#[derive(Args)]
pub struct MaskArgs {
    /// Input image file
    pub file: PathBuf,

    /// Output path; .png is appended unless it ends in png, jpg, jpeg or bmp
    #[arg(short, long, default_value = "masked.png")]
    pub output: PathBuf,

    /// Start from a TOML preset (see `keyout config`)
    #[arg(long)]
    pub preset: Option<PathBuf>,

    /// Red range as "lower,upper"
    #[arg(long, value_parser = parse_range)]
    pub red: Option<ChannelRange>,

    /// Green range as "lower,upper"
    #[arg(long, value_parser = parse_range)]
    pub green: Option<ChannelRange>,

    /// Blue range as "lower,upper"
    #[arg(long, value_parser = parse_range)]
    pub blue: Option<ChannelRange>,

    /// Key out the exact color at "x,y" instead of using ranges
    #[arg(
        long,
        allow_hyphen_values = true,
        conflicts_with_all = ["preset", "red", "green", "blue"]
    )]
    pub pick: Option<String>,
}

pub fn run(args: &MaskArgs) -> Result<()> {
    let mut viewer = ViewerController::default();
    viewer
        .handle(ViewerEvent::LoadImage(args.file.clone()))
        .with_context(|| format!("Failed to load {}", args.file.display()))?;

    if let Some(ref path) = args.preset {
        let preset = read_preset(path)?;
        debug!(path = %path.display(), thresholds = %preset.thresholds, "Applying preset");
        viewer.handle(ViewerEvent::ApplyPreset(preset))?;
    }

    let overrides = [
        (Channel::Red, args.red),
        (Channel::Green, args.green),
        (Channel::Blue, args.blue),
    ];
    for (channel, range) in overrides {
        let Some(range) = range else { continue };
        for (bound, value) in [(Bound::Lower, range.lower), (Bound::Upper, range.upper)] {
            viewer.handle(ViewerEvent::SetThreshold {
                channel,
                bound,
                value,
            })?;
        }
    }

    if let Some(ref pick) = args.pick {
        let (x, y) = parse_point(pick)?;
        viewer.handle(ViewerEvent::ToggleClickSample)?;
        // A freshly loaded input pane is untransformed: screen and image coordinates agree.
        let outcome = viewer.handle(ViewerEvent::Click {
            pane: Pane::Input,
            point: Point::new(x, y),
        })?;
        if outcome == Outcome::Ignored {
            let size = viewer.image_size().unwrap_or(Point::ZERO);
            bail!("Pick point ({x}, {y}) is outside the {}x{} image", size.x, size.y);
        }
    }

    let written = match viewer.handle(ViewerEvent::SaveImage(args.output.clone()))? {
        Outcome::Saved(path) => path,
        other => bail!("Unexpected outcome while saving: {other:?}"),
    };

    print_mask_summary(&viewer, &args.file, &written);
    Ok(())
}
