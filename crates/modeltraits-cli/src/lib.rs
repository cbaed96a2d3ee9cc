//! CLI logic for the model-traits reader.
//!
//! Reads a TOML attribute document, converts it into model traits and
//! writes the tree summary.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use modeltraits::{ModelTraitsError, TraitsReader};

/// Run the model-traits CLI application
///
/// This function converts the input document and writes the summary of the
/// resulting model traits to the output file, or to standard output.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `ModelTraitsError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Invalid attribute documents
/// - Conversion errors
pub fn run(args: &Args) -> Result<(), ModelTraitsError> {
    info!(input_path = args.input; "Processing attribute document");

    let reader_config = config::load_config(args.config.as_ref())?;

    let reader = TraitsReader::new(reader_config);
    let harvest = reader.read_file(&args.input)?;
    let summary = harvest.traits().to_string();

    match &args.output {
        Some(output) => {
            fs::write(output, summary)?;
            info!(output_file = output; "Summary written");
        }
        None => print!("{summary}"),
    }

    Ok(())
}
