// src/plot_functions/plot_performance_report.rs

use std::error::Error;
use std::ops::Range;
use std::path::{Path, PathBuf};

use crate::constants::{
    COLOR_BASE_SPEED, COLOR_CRITICAL_THRESHOLD, COLOR_LEFT_MOTOR, COLOR_RIGHT_MOTOR,
    COLOR_STABILITY_ZONE, COLOR_TRACKING_ERROR, COLOR_ZERO_LINE, CRITICAL_ERROR_THRESHOLD_PX,
    LINE_WIDTH_ERROR, LINE_WIDTH_PLOT, LINE_WIDTH_REFERENCE, OPACITY_BASE_SPEED,
    OPACITY_CRITICAL_THRESHOLD, OPACITY_STABILITY_ZONE, REPORT_IMAGE_SUFFIX,
    STABILITY_THRESHOLD_PX,
};
use crate::data_analysis::summary::TrialSummary;
use crate::data_input::trial_data::TrialRecord;
use crate::plot_framework::{
    calculate_range, data_extent, draw_stacked_plot, LineStyle, PlotConfig, PlotSeries,
};

/// Image path for a trial: the input file stem plus `_report.png`, inside `output_dir`.
/// An empty `output_dir` means the working directory.
pub fn report_output_path(input_path: &Path, output_dir: &Path) -> PathBuf {
    let root_name = input_path.file_stem().unwrap_or_default().to_string_lossy();
    output_dir.join(format!("{root_name}{REPORT_IMAGE_SUFFIX}"))
}

/// Padded time range shared by both panels.
pub fn shared_time_range(record: &TrialRecord) -> Option<Range<f64>> {
    let (time_min, time_max) = data_extent(&record.column(|s| s.time))?;
    let (start, end) = calculate_range(time_min, time_max);
    Some(start..end)
}

/// Upper panel: tracking error with the stability and critical bands.
pub fn error_panel_config(
    record: &TrialRecord,
    summary: &TrialSummary,
    x_range: &Range<f64>,
) -> Option<PlotConfig> {
    let errors = record.column(|s| s.error);
    let (err_min, err_max) = data_extent(&errors)?;

    // Keep every reference line on screen, as the bands frame the error trace.
    let (y_min, y_max) = calculate_range(
        err_min.min(-CRITICAL_ERROR_THRESHOLD_PX),
        err_max.max(CRITICAL_ERROR_THRESHOLD_PX),
    );

    let error_series_data: Vec<(f64, f64)> = record
        .samples
        .iter()
        .map(|s| (s.time, s.error))
        .collect();

    let stability_label = format!("Stability Zone (±{STABILITY_THRESHOLD_PX:.0}px)");
    let critical_label = format!("Critical Threshold ({CRITICAL_ERROR_THRESHOLD_PX:.0}px)");

    let series = vec![
        PlotSeries {
            data: error_series_data,
            label: "Tracking Error (px)".to_string(),
            color: COLOR_TRACKING_ERROR,
            opacity: 1.0,
            stroke_width: LINE_WIDTH_ERROR,
            line_style: LineStyle::Solid,
        },
        PlotSeries::horizontal_line(0.0, x_range, "", COLOR_ZERO_LINE, 1.0, LINE_WIDTH_REFERENCE, LineStyle::Solid),
        PlotSeries::horizontal_line(
            STABILITY_THRESHOLD_PX,
            x_range,
            &stability_label,
            COLOR_STABILITY_ZONE,
            OPACITY_STABILITY_ZONE,
            LINE_WIDTH_REFERENCE,
            LineStyle::Dotted,
        ),
        PlotSeries::horizontal_line(
            -STABILITY_THRESHOLD_PX,
            x_range,
            "",
            COLOR_STABILITY_ZONE,
            OPACITY_STABILITY_ZONE,
            LINE_WIDTH_REFERENCE,
            LineStyle::Dotted,
        ),
        PlotSeries::horizontal_line(
            CRITICAL_ERROR_THRESHOLD_PX,
            x_range,
            &critical_label,
            COLOR_CRITICAL_THRESHOLD,
            OPACITY_CRITICAL_THRESHOLD,
            LINE_WIDTH_REFERENCE,
            LineStyle::Dashed,
        ),
        PlotSeries::horizontal_line(
            -CRITICAL_ERROR_THRESHOLD_PX,
            x_range,
            "",
            COLOR_CRITICAL_THRESHOLD,
            OPACITY_CRITICAL_THRESHOLD,
            LINE_WIDTH_REFERENCE,
            LineStyle::Dashed,
        ),
    ];

    Some(PlotConfig {
        title: format!("PID Performance Report - {}", record.source_name),
        subtitle: format!(
            "IAE: {:.0} | ISE: {:.0} | Reliability: {:.1}%",
            summary.final_iae, summary.final_ise, summary.reliability_score
        ),
        x_range: x_range.clone(),
        y_range: y_min..y_max,
        series,
        // The time axis is labelled once, under the lower panel.
        x_label: String::new(),
        y_label: "Centroid Offset (Pixels)".to_string(),
    })
}

/// Lower panel: wheel commands, with the target base speed when it was logged.
pub fn speed_panel_config(record: &TrialRecord, x_range: &Range<f64>) -> Option<PlotConfig> {
    let left = record.column(|s| s.left_speed);
    let right = record.column(|s| s.right_speed);
    let base = record.base_speed_column();

    let (val_min, val_max) = [Some(&left), Some(&right), base.as_ref()]
        .into_iter()
        .flatten()
        .filter_map(data_extent)
        .fold(None, |acc: Option<(f64, f64)>, (lo, hi)| match acc {
            Some((min, max)) => Some((min.min(lo), max.max(hi))),
            None => Some((lo, hi)),
        })?;
    let (y_min, y_max) = calculate_range(val_min, val_max);

    let times = record.column(|s| s.time);
    let pair_with_time = |values: &ndarray::Array1<f64>| -> Vec<(f64, f64)> {
        times.iter().copied().zip(values.iter().copied()).collect()
    };

    let mut series = vec![
        PlotSeries {
            data: pair_with_time(&left),
            label: "Left Motor".to_string(),
            color: COLOR_LEFT_MOTOR,
            opacity: 1.0,
            stroke_width: LINE_WIDTH_PLOT,
            line_style: LineStyle::Solid,
        },
        PlotSeries {
            data: pair_with_time(&right),
            label: "Right Motor".to_string(),
            color: COLOR_RIGHT_MOTOR,
            opacity: 1.0,
            stroke_width: LINE_WIDTH_PLOT,
            line_style: LineStyle::Solid,
        },
    ];
    if let Some(base) = &base {
        series.push(PlotSeries {
            data: pair_with_time(base),
            label: "Target Base Speed".to_string(),
            color: COLOR_BASE_SPEED,
            opacity: OPACITY_BASE_SPEED,
            stroke_width: LINE_WIDTH_PLOT,
            line_style: LineStyle::Dashed,
        });
    }

    Some(PlotConfig {
        title: "Actuator Commands".to_string(),
        subtitle: String::new(),
        x_range: x_range.clone(),
        y_range: y_min..y_max,
        series,
        x_label: "Time (seconds)".to_string(),
        y_label: "Velocity (rad/s)".to_string(),
    })
}

/// Renders the two-panel performance report for a trial into `output_path`.
pub fn plot_performance_report(
    record: &TrialRecord,
    summary: &TrialSummary,
    output_path: &Path,
) -> Result<(), Box<dyn Error>> {
    let time_range = shared_time_range(record);

    draw_stacked_plot(output_path, "Performance Report", 2, |panel_index| {
        let x_range = time_range.as_ref()?;
        match panel_index {
            0 => error_panel_config(record, summary, x_range),
            1 => speed_panel_config(record, x_range),
            _ => None,
        }
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_analysis::summary::summarize_trial;
    use crate::data_input::trial_data::TrialSample;

    fn record(base_speed: Option<f64>) -> TrialRecord {
        let samples = (0..20)
            .map(|i| TrialSample {
                time: i as f64 * 0.032,
                error: if i == 7 { 140.0 } else { (i as f64 - 10.0) * 2.0 },
                left_speed: 5.8 + 0.01 * i as f64,
                right_speed: 5.8 - 0.01 * i as f64,
                iae: i as f64,
                ise: 2.0 * i as f64,
                base_speed,
            })
            .collect();
        TrialRecord::new("pid7_performance.csv", samples, base_speed.is_some())
    }

    #[test]
    fn test_report_output_path_replaces_extension() {
        assert_eq!(
            report_output_path(Path::new("logs/pid7_performance.csv"), Path::new("")),
            PathBuf::from("pid7_performance_report.png")
        );
        assert_eq!(
            report_output_path(Path::new("run"), Path::new("out")),
            Path::new("out").join("run_report.png")
        );
    }

    #[test]
    fn test_error_panel_bands_and_title() {
        let trial = record(None);
        let summary = summarize_trial(&trial).expect("summary");
        let x_range = shared_time_range(&trial).expect("time range");
        let config = error_panel_config(&trial, &summary, &x_range).expect("config");

        assert_eq!(config.title, "PID Performance Report - pid7_performance.csv");
        assert_eq!(config.subtitle, "IAE: 19 | ISE: 38 | Reliability: 95.0%");
        assert!(config.y_range.start < -100.0 && config.y_range.end > 140.0);
        assert_eq!(config.series.len(), 6);

        let labelled: Vec<&str> = config
            .series
            .iter()
            .filter(|s| !s.label.is_empty())
            .map(|s| s.label.as_str())
            .collect();
        assert_eq!(
            labelled,
            vec!["Tracking Error (px)", "Stability Zone (±10px)", "Critical Threshold (100px)"]
        );
        assert_eq!(config.series[2].line_style, LineStyle::Dotted);
        assert_eq!(config.series[4].line_style, LineStyle::Dashed);
        assert_eq!(config.series[5].data, vec![(x_range.start, -100.0), (x_range.end, -100.0)]);
    }

    #[test]
    fn test_speed_panel_without_base_speed() {
        let trial = record(None);
        let x_range = shared_time_range(&trial).expect("time range");
        let config = speed_panel_config(&trial, &x_range).expect("config");
        assert_eq!(config.series.len(), 2);
        assert!(config.subtitle.is_empty());
        assert_eq!(config.x_label, "Time (seconds)");
        assert!(config.y_range.start < 5.61 && config.y_range.end > 5.99);
    }

    #[test]
    fn test_speed_panel_overlays_base_speed() {
        let trial = record(Some(5.8));
        let x_range = shared_time_range(&trial).expect("time range");
        let config = speed_panel_config(&trial, &x_range).expect("config");
        assert_eq!(config.series.len(), 3);
        let base = &config.series[2];
        assert_eq!(base.label, "Target Base Speed");
        assert_eq!(base.line_style, LineStyle::Dashed);
        assert_eq!(base.data.len(), trial.len());
    }

    #[test]
    fn test_shared_time_range_pads_span() {
        let trial = record(None);
        let range = shared_time_range(&trial).expect("time range");
        assert!(range.start < 0.0);
        assert!(range.end > 19.0 * 0.032);
    }
}

// src/plot_functions/plot_performance_report.rs
