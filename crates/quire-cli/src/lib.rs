//! Quire CLI library
//!
//! This module contains the core CLI logic for the Quire markup compiler.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::{info, warn};

use quire::{DocumentBuilder, QuireError};

use error_adapter::{Reportable, diagnostics_to_reportables};

/// Run the Quire CLI application
///
/// This function compiles the input file through the Quire pipeline and
/// writes the rendered result to the output file. Pipeline warnings are
/// logged and do not fail the run.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `QuireError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Notation and structural errors
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), QuireError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing document"
    );

    // Load configuration, then apply command-line overrides
    let mut app_config = config::load_config(args.config.as_ref())?;
    app_config = app_config.with_tags(args.tags.iter().copied());
    if let Some(format) = args.format {
        app_config = app_config.with_format(format);
    }
    let format = app_config.output().format();

    let source = fs::read_to_string(&args.input)?;

    let builder = DocumentBuilder::new(app_config).with_source_name(args.input.clone());
    let mangled = builder.compile(&source)?;
    report_warnings(&diagnostics_to_reportables(&mangled.diagnostics, &source));

    let output = builder.render(&mangled, format)?;
    fs::write(&args.output, output)?;

    info!(output_file = args.output, format = format.as_str(); "Document exported successfully");

    Ok(())
}

/// Render each warning with miette and log it.
fn report_warnings(reportables: &[Reportable<'_>]) {
    let reporter = miette::GraphicalReportHandler::new();
    for reportable in reportables {
        let mut writer = String::new();
        if reporter.render_report(&mut writer, reportable).is_ok() {
            warn!("{writer}");
        } else {
            warn!("{reportable}");
        }
    }
}
