//! Mosaic CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};
use miette::GraphicalReportHandler;

use mosaic::MosaicError;
use mosaic_cli::{Args, error_adapter::to_reportables};

fn main() {
    miette::set_panic_hook();

    let args = Args::parse();
    init_logging(&args.log_level);

    info!(input = args.input.as_str(), output = args.output.as_str(); "Rendering scene");
    debug!(args:?; "Parsed arguments");

    match mosaic_cli::run(&args) {
        Ok(()) => info!(output = args.output.as_str(); "Scene written"),
        Err(err) => {
            report(&err);
            process::exit(1);
        }
    }
}

fn init_logging(level: &str) {
    let level = LevelFilter::from_str(level).unwrap_or_else(|_| {
        eprintln!("Unknown log level `{level}`, falling back to `warn`");
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(level)
        .init();
}

/// Renders every diagnostic carried by `err` through miette.
fn report(err: &MosaicError) {
    let handler = GraphicalReportHandler::new();

    for reportable in to_reportables(err) {
        let mut rendered = String::new();
        if handler.render_report(&mut rendered, &reportable).is_err() {
            // Formatting into a String only fails if a Display impl does.
            rendered = reportable.to_string();
        }
        error!("{rendered}");
    }
}
