// src/pipeline.rs

use std::error::Error;
use std::path::{Path, PathBuf};

use crate::data_analysis::summary::summarize_trial;
use crate::data_input::trial_parser::parse_trial_file;
use crate::error::AnalysisError;
use crate::plot_functions::plot_performance_report::{plot_performance_report, report_output_path};
use crate::report::{format_console_report, format_not_found_message, format_saved_message};

/// How a run ended when nothing went wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The input log does not exist; the message was printed and no image written.
    InputNotFound(String),
    /// The console report was printed and the image written to this path.
    ReportSaved(PathBuf),
}

/// Loads the trial at `input_path`, prints its console report and writes the
/// report image into `output_dir` (empty means the working directory).
///
/// A missing input is an outcome, not an error. Every other failure propagates.
pub fn run(input_path: &Path, output_dir: &Path) -> Result<RunOutcome, Box<dyn Error>> {
    // --- Load ---
    let trial = match parse_trial_file(input_path) {
        Ok(trial) => trial,
        Err(AnalysisError::InputNotFound(name)) => {
            println!("{}", format_not_found_message(&name));
            return Ok(RunOutcome::InputNotFound(name));
        }
        Err(e) => return Err(e.into()),
    };

    // --- Metrics and Console Report ---
    let summary = summarize_trial(&trial)?;
    print!("{}", format_console_report(&trial.source_name, &summary));

    // --- Plot ---
    let output_path = report_output_path(input_path, output_dir);
    plot_performance_report(&trial, &summary, &output_path)?;
    println!("{}", format_saved_message(&output_path));

    Ok(RunOutcome::ReportSaved(output_path))
}

// src/pipeline.rs
