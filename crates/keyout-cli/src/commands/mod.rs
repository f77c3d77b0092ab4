pub mod config;
pub mod info;
pub mod mask;
pub mod sample;

use std::path::Path;

use anyhow::{bail, Context, Result};
use keyout_core::preset::MaskPreset;
use keyout_core::threshold::ChannelRange;

/// Parse "lower,upper" into an inclusive channel range.
pub fn parse_range(s: &str) -> Result<ChannelRange> {
    let parts: Vec<u8> = s
        .split(',')
        .map(|p| p.trim().parse::<u8>())
        .collect::<std::result::Result<_, _>>()
        .with_context(|| format!("Invalid range '{s}' (expected 'lower,upper' in 0..=255)"))?;
    if parts.len() != 2 {
        bail!("Range '{s}' needs exactly 2 values: lower,upper");
    }
    Ok(ChannelRange::new(parts[0], parts[1]))
}

/// Parse "x,y" image coordinates.
pub fn parse_point(s: &str) -> Result<(f64, f64)> {
    let parts: Vec<f64> = s
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<std::result::Result<_, _>>()
        .with_context(|| format!("Invalid point '{s}' (expected 'x,y')"))?;
    if parts.len() != 2 {
        bail!("Point '{s}' needs exactly 2 values: x,y");
    }
    Ok((parts[0], parts[1]))
}

pub fn read_preset(path: &Path) -> Result<MaskPreset> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read preset {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("Invalid preset {}", path.display()))
}

pub fn write_preset(preset: &MaskPreset, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(preset)?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write preset to {}", path.display()))
}
