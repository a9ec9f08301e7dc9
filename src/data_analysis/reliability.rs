// src/data_analysis/reliability.rs

use crate::data_input::trial_data::TrialSample;

/// Share of samples that stayed clear of the critical error threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reliability {
    /// Percentage in [0, 100].
    pub score: f64,
    /// Samples whose |error| exceeded the threshold.
    pub num_peaks: usize,
    pub total_samples: usize,
}

impl Reliability {
    pub fn passing_samples(&self) -> usize {
        self.total_samples - self.num_peaks
    }
}

/// Counts samples with `|error| > critical_threshold` and scores the rest as a percentage.
/// An empty trial scores 100.
pub fn calculate_reliability(samples: &[TrialSample], critical_threshold: f64) -> Reliability {
    let total_samples = samples.len();
    let num_peaks = samples
        .iter()
        .filter(|s| s.error.abs() > critical_threshold)
        .count();
    let score = if total_samples == 0 {
        100.0
    } else {
        (total_samples - num_peaks) as f64 / total_samples as f64 * 100.0
    };
    Reliability {
        score,
        num_peaks,
        total_samples,
    }
}


// src/data_analysis/reliability.rs
