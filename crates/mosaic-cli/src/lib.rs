//! CLI logic for the Mosaic region map tool.
//!
//! Loads a scene and its configuration, applies the interaction state given
//! on the command line and writes the composited SVG.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::{debug, info};

use mosaic::{MosaicError, SceneBuilder, identifier::Id, interaction::InteractionState};

/// Run the Mosaic CLI application
///
/// # Errors
///
/// Returns `MosaicError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Scene errors
/// - Aesthetic resolution errors
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), MosaicError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing scene"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;

    let builder = SceneBuilder::new(app_config);
    let scene = builder.parse(&source)?;

    let state = interaction_state(args);
    debug!(state:?; "Interaction state");

    builder.export_svg(&scene, &state, &args.output)?;

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}

/// Builds the interaction state requested on the command line.
fn interaction_state(args: &Args) -> InteractionState {
    let mut state = InteractionState::new();
    for region in &args.selected {
        state.select(Id::new(region));
    }
    for (region, count) in &args.counts {
        state.set_count(Id::new(region), *count);
    }
    if let Some(region) = &args.hovered {
        state.set_hovered(Id::new(region));
    }
    state
}
