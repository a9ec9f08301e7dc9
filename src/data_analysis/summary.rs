// src/data_analysis/summary.rs

use tracing::debug;

use crate::constants::{
    CRITICAL_ERROR_THRESHOLD_PX, SETTLING_WINDOW_SAMPLES, STABILITY_THRESHOLD_PX,
};
use crate::data_analysis::reliability::calculate_reliability;
use crate::data_analysis::settling_time::{
    average_settling_time, detect_disturbance_events, DisturbanceEvent,
};
use crate::data_input::trial_data::TrialRecord;
use crate::error::AnalysisError;

/// Headline scores of one trial.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialSummary {
    pub total_time: f64,
    pub final_iae: f64,
    pub final_ise: f64,
    pub reliability_score: f64,
    pub num_peaks: usize,
    pub total_samples: usize,
    pub settling_events: Vec<DisturbanceEvent>,
    pub avg_settling_time: f64,
}

/// Derives the summary scores from a loaded trial.
///
/// Time, IAE and ISE are taken from the last sample as logged; the controller
/// already writes running integrals, so nothing is re-integrated here.
pub fn summarize_trial(record: &TrialRecord) -> Result<TrialSummary, AnalysisError> {
    let last = record.last().ok_or(AnalysisError::EmptyTrial)?;

    let reliability = calculate_reliability(&record.samples, CRITICAL_ERROR_THRESHOLD_PX);
    let settling_events = detect_disturbance_events(
        &record.samples,
        STABILITY_THRESHOLD_PX,
        SETTLING_WINDOW_SAMPLES,
    );
    let avg_settling_time = average_settling_time(&settling_events);

    debug!(
        "{} disturbance events confirmed, {} critical peaks in {} samples",
        settling_events.len(),
        reliability.num_peaks,
        reliability.total_samples
    );

    Ok(TrialSummary {
        total_time: last.time,
        final_iae: last.iae,
        final_ise: last.ise,
        reliability_score: reliability.score,
        num_peaks: reliability.num_peaks,
        total_samples: reliability.total_samples,
        settling_events,
        avg_settling_time,
    })
}


// src/data_analysis/summary.rs
