// src/data_analysis/settling_time.rs

use ndarray::Array1;

use crate::data_input::trial_data::TrialSample;

/// A disturbance that left the tolerance band at `start_time` and was confirmed
/// back inside it at `recovery_time`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisturbanceEvent {
    pub start_time: f64,
    pub recovery_time: f64,
}

impl DisturbanceEvent {
    pub fn settling_time(&self) -> f64 {
        self.recovery_time - self.start_time
    }
}

/// Scans a trial for disturbance/recovery cycles against a tolerance band.
///
/// The first sample is the baseline and never starts a disturbance. A disturbance
/// starts at the first sample whose `|error|` exceeds `tolerance`. It closes at a
/// later in-band sample only if the `window` samples starting there (truncated at
/// the end of the trial) all stay within `tolerance`; otherwise it stays open and
/// later samples are checked again. A disturbance still open when the trial ends
/// is dropped.
pub fn detect_disturbance_events(
    samples: &[TrialSample],
    tolerance: f64,
    window: usize,
) -> Vec<DisturbanceEvent> {
    let window = window.max(1);
    let mut events = Vec::new();
    let mut is_disturbed = false;
    let mut start_time = 0.0;

    for i in 1..samples.len() {
        let err = samples[i].error.abs();
        let time = samples[i].time;

        if err > tolerance && !is_disturbed {
            is_disturbed = true;
            start_time = time;
        } else if err <= tolerance && is_disturbed {
            let window_end = (i + window).min(samples.len());
            // f64::max skips NaN, so unparseable gaps never block a recovery.
            let window_max = samples[i..window_end]
                .iter()
                .map(|s| s.error.abs())
                .fold(f64::NEG_INFINITY, f64::max);
            if window_max <= tolerance {
                events.push(DisturbanceEvent {
                    start_time,
                    recovery_time: time,
                });
                is_disturbed = false;
            }
        }
    }

    events
}

/// Mean settling time over all confirmed events, or 0.0 when there were none.
pub fn average_settling_time(events: &[DisturbanceEvent]) -> f64 {
    let durations: Array1<f64> = events.iter().map(DisturbanceEvent::settling_time).collect();
    durations.mean().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trace(errors: &[f64]) -> Vec<TrialSample> {
        errors
            .iter()
            .enumerate()
            .map(|(i, &error)| TrialSample {
                time: i as f64,
                error,
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn test_quiet_trial_has_no_events() {
        let samples = trace(&[0.0, 3.0, -10.0, 10.0, 9.9, -4.0]);
        let events = detect_disturbance_events(&samples, 10.0, 5);
        assert!(events.is_empty());
        assert_eq!(average_settling_time(&events), 0.0);
    }

    #[test]
    fn test_first_sample_never_triggers() {
        let samples = trace(&[50.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        assert!(detect_disturbance_events(&samples, 10.0, 5).is_empty());
    }

    #[test]
    fn test_renewed_excursion_in_window_keeps_event_open() {
        let samples = trace(&[0.0, 15.0, 15.0, 5.0, 15.0, 5.0, 5.0, 5.0, 5.0, 5.0]);
        let events = detect_disturbance_events(&samples, 10.0, 5);
        assert_eq!(
            events,
            vec![DisturbanceEvent {
                start_time: 1.0,
                recovery_time: 5.0,
            }]
        );
        assert_eq!(average_settling_time(&events), 4.0);
    }

    #[test]
    fn test_window_truncated_at_trial_end() {
        // Recovery at t=3 only has two samples left to confirm with.
        let samples = trace(&[0.0, 20.0, -20.0, 1.0, 2.0]);
        let events = detect_disturbance_events(&samples, 10.0, 5);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].settling_time(), 2.0);
    }

    #[test]
    fn test_open_disturbance_at_end_is_dropped() {
        let samples = trace(&[0.0, 0.0, 12.0, 0.0, 0.0, 0.0, 0.0, 0.0, 30.0, 40.0]);
        let events = detect_disturbance_events(&samples, 10.0, 5);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].start_time, 2.0);
        assert_eq!(events[0].recovery_time, 3.0);
    }

    #[test]
    fn test_negative_errors_use_magnitude() {
        let samples = trace(&[0.0, -11.0, -11.0, -1.0, -1.0, -1.0, -1.0, -1.0]);
        let events = detect_disturbance_events(&samples, 10.0, 5);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].settling_time(), 2.0);
    }

    #[test]
    fn test_average_over_several_events() {
        let samples = trace(&[
            0.0, 20.0, 0.0, 0.0, 0.0, 0.0, 0.0, // event 1: 1 -> 2
            20.0, 20.0, 20.0, 0.0, 0.0, 0.0, 0.0, 0.0, // event 2: 7 -> 10
        ]);
        let events = detect_disturbance_events(&samples, 10.0, 5);
        assert_eq!(events.len(), 2);
        assert_eq!(average_settling_time(&events), 2.0);
    }
}

// src/data_analysis/settling_time.rs
