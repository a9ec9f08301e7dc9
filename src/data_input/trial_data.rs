// src/data_input/trial_data.rs

use ndarray::Array1;

/// Structure to hold data parsed from a single row of the trial CSV log.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct TrialSample {
    pub time: f64,               // Elapsed time (seconds).
    pub error: f64,              // Signed line offset from image center (pixels).
    pub left_speed: f64,         // Left wheel command.
    pub right_speed: f64,        // Right wheel command.
    pub iae: f64,                // Running integral of absolute error.
    pub ise: f64,                // Running integral of squared error.
    pub base_speed: Option<f64>, // Target base speed, when logged.
}

/// A complete trial, in log order. Built once by the parser and only read afterwards.
#[derive(Debug, Clone, Default)]
pub struct TrialRecord {
    /// Name of the input as given by the user, used in titles.
    pub source_name: String,
    pub samples: Vec<TrialSample>,
    /// Whether the log carried a `baseSpeed` column.
    pub base_speed_found: bool,
}

impl TrialRecord {
    pub fn new(source_name: impl Into<String>, samples: Vec<TrialSample>, base_speed_found: bool) -> Self {
        Self {
            source_name: source_name.into(),
            samples,
            base_speed_found,
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn last(&self) -> Option<&TrialSample> {
        self.samples.last()
    }

    /// Extracts one field of every sample as a column.
    pub fn column<F>(&self, field: F) -> Array1<f64>
    where
        F: Fn(&TrialSample) -> f64,
    {
        self.samples.iter().map(field).collect()
    }

    /// The `baseSpeed` column, with NaN for rows that left it empty.
    /// `None` when the log has no such column.
    pub fn base_speed_column(&self) -> Option<Array1<f64>> {
        if !self.base_speed_found {
            return None;
        }
        Some(self.column(|s| s.base_speed.unwrap_or(f64::NAN)))
    }
}


// src/data_input/trial_data.rs
