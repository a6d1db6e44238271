//! Command-line argument definitions for the Mosaic CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, logging verbosity and the interaction state to render.

use clap::Parser;

/// Command-line arguments for the Mosaic region map tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input scene file
    #[arg(help = "Path to the input scene (TOML)")]
    pub input: String,

    /// Path to the output SVG file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Region to render as selected; may be repeated
    #[arg(long = "select", value_name = "REGION")]
    pub selected: Vec<String>,

    /// Region to render as hovered
    #[arg(long = "hover", value_name = "REGION")]
    pub hovered: Option<String>,

    /// Interaction counter of a region, as REGION=COUNT; may be repeated
    #[arg(long = "count", value_name = "REGION=COUNT", value_parser = parse_count)]
    pub counts: Vec<(String, u32)>,
}

/// Parses a `REGION=COUNT` pair.
fn parse_count(value: &str) -> Result<(String, u32), String> {
    let (region, count) = value
        .split_once('=')
        .ok_or_else(|| format!("expected REGION=COUNT, got `{value}`"))?;
    if region.is_empty() {
        return Err(format!("missing region name in `{value}`"));
    }
    let count = count
        .parse()
        .map_err(|err| format!("invalid count in `{value}`: {err}"))?;
    Ok((region.to_string(), count))
}
