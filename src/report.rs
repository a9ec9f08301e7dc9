// src/report.rs

use std::path::Path;

use crate::constants::{REPORT_BANNER_CHAR, REPORT_BANNER_WIDTH};
use crate::data_analysis::summary::TrialSummary;

/// Formats the fixed-layout console block for one trial, including the blank
/// line before the opening banner and after the closing one.
pub fn format_console_report(source_name: &str, summary: &TrialSummary) -> String {
    let banner: String = std::iter::repeat(REPORT_BANNER_CHAR)
        .take(REPORT_BANNER_WIDTH)
        .collect();
    format!(
        "\n{banner}\n\
         \x20FINAL PERFORMANCE ANALYSIS: {source_name}\n\
         {banner}\n\
         \x20Total Traversal Time : {total_time:.2} s\n\
         \x20IAE (Accuracy)       : {iae:.2}\n\
         \x20ISE (Stability)      : {ise:.2}\n\
         \x20Reliability (>100px) : {reliability:.2}% ({num_peaks} peaks)\n\
         \x20Avg. Settling Time   : {settling:.3} s\n\
         {banner}\n\n",
        total_time = summary.total_time,
        iae = summary.final_iae,
        ise = summary.final_ise,
        reliability = summary.reliability_score,
        num_peaks = summary.num_peaks,
        settling = summary.avg_settling_time,
    )
}

/// Message shown when the input log does not exist.
pub fn format_not_found_message(source_name: &str) -> String {
    format!("Error: {source_name} not found.")
}

/// Message shown once the report image has been written.
pub fn format_saved_message(output_path: &Path) -> String {
    format!("Report saved as: {}", output_path.display())
}


// src/report.rs
