mod commands;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "keyout", about = "Color-key masking for a single image")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show image dimensions and per-channel value ranges
    Info(commands::info::InfoArgs),
    /// Print the color at a pixel and the preset that keys it out
    Sample(commands::sample::SampleArgs),
    /// Make pixels inside the color ranges transparent and save the result
    Mask(commands::mask::MaskArgs),
    /// Print or save the default preset as TOML
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Info(args) => commands::info::run(args),
        Commands::Sample(args) => commands::sample::run(args),
        Commands::Mask(args) => commands::mask::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_accepts_negative_coordinates() {
        let cli = Cli::try_parse_from(["keyout", "sample", "in.png", "-1", "-2.5"]).unwrap();
        match cli.command {
            Commands::Sample(args) => assert_eq!((args.x, args.y), (-1.0, -2.5)),
            _ => panic!("expected sample"),
        }
    }

    #[test]
    fn mask_pick_accepts_negative_coordinates() {
        let cli = Cli::try_parse_from(["keyout", "mask", "in.png", "--pick", "-1,3"]).unwrap();
        match cli.command {
            Commands::Mask(args) => assert_eq!(args.pick.as_deref(), Some("-1,3")),
            _ => panic!("expected mask"),
        }
    }

    #[test]
    fn mask_pick_conflicts_with_ranges() {
        let args = ["keyout", "mask", "in.png", "--pick", "1,1", "--red", "0,10"];
        assert!(Cli::try_parse_from(args).is_err());
    }
}
