use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use keyout_core::preset::MaskPreset;

use super::write_preset;

#[derive(Args)]
pub struct ConfigArgs {
    /// Write the preset to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Print or save the default MaskPreset as TOML.
pub fn run(args: &ConfigArgs) -> Result<()> {
    let preset = MaskPreset::default();

    if let Some(ref path) = args.output {
        write_preset(&preset, path)?;
        println!("Default preset saved to {}", path.display());
    } else {
        print!("{}", toml::to_string_pretty(&preset)?);
    }

    Ok(())
}
