// src/constants.rs

use plotters::style::colors::BLACK;
use plotters::style::RGBColor;

// Input log read when no path is given on the command line.
pub const DEFAULT_INPUT_FILE: &str = "pid7_performance.csv";

// Suffix replacing the input extension for the rendered image.
pub const REPORT_IMAGE_SUFFIX: &str = "_report.png";

// --- CSV Headers ---
pub const HEADER_TIME: &str = "Time";
pub const HEADER_ERROR: &str = "Error";
pub const HEADER_LEFT_SPEED: &str = "LeftSpeed";
pub const HEADER_RIGHT_SPEED: &str = "RightSpeed";
pub const HEADER_IAE: &str = "IAE";
pub const HEADER_ISE: &str = "ISE";
pub const HEADER_BASE_SPEED: &str = "baseSpeed"; // Optional

// --- Analysis Thresholds ---
// Tolerance band for settling time (pixels).
pub const STABILITY_THRESHOLD_PX: f64 = 10.0;
// Excursions beyond this count against reliability (pixels).
pub const CRITICAL_ERROR_THRESHOLD_PX: f64 = 100.0;
// Samples (current one included) that must stay in band to confirm a recovery.
pub const SETTLING_WINDOW_SAMPLES: usize = 5;

// --- Console Report ---
pub const REPORT_BANNER_WIDTH: usize = 45;
pub const REPORT_BANNER_CHAR: char = '=';

// --- Figure Geometry ---
// 12 x 10 inch figure rendered at 300 DPI.
pub const PLOT_DPI: u32 = 300;
pub const PLOT_WIDTH: u32 = 12 * PLOT_DPI;
pub const PLOT_HEIGHT: u32 = 10 * PLOT_DPI;

/// Converts a typographic point size to pixels at `PLOT_DPI`.
pub const fn points_to_px(points: u32) -> i32 {
    (points * PLOT_DPI / 72) as i32
}

pub const FONT_SIZE_CHART_TITLE: i32 = points_to_px(14);
pub const FONT_SIZE_AXIS_LABEL: i32 = points_to_px(10);
pub const FONT_SIZE_TICK_LABEL: i32 = points_to_px(9);
pub const FONT_SIZE_LEGEND: i32 = points_to_px(10);
pub const FONT_SIZE_MESSAGE: i32 = points_to_px(12);

pub const CHART_MARGIN_PX: u32 = 40;
pub const X_LABEL_AREA_PX: u32 = 160;
pub const Y_LABEL_AREA_PX: u32 = 220;
pub const LEGEND_SAMPLE_LENGTH_PX: i32 = 90;

// Fraction of the data span added on each side of an axis.
pub const RANGE_PADDING_FRACTION: f64 = 0.05;

// --- Line Patterns ---
// Dash periods across the full time span, and the drawn share of each period.
pub const DASHED_LINE_PERIODS: usize = 60;
pub const DASHED_LINE_DUTY: f64 = 0.7;
pub const DOTTED_LINE_PERIODS: usize = 180;
pub const DOTTED_LINE_DUTY: f64 = 0.35;
// Above this many dashes a patterned line is drawn solid.
pub const MAX_DASH_COUNT: usize = 10_000;

// --- Plot Color Assignments ---
pub const COLOR_TRACKING_ERROR: RGBColor = RGBColor(0xc0, 0x39, 0x2b);
pub const COLOR_ZERO_LINE: RGBColor = BLACK;
pub const COLOR_STABILITY_ZONE: RGBColor = RGBColor(0x00, 0x80, 0x00);
pub const COLOR_CRITICAL_THRESHOLD: RGBColor = RGBColor(0xff, 0xa5, 0x00);
pub const COLOR_LEFT_MOTOR: RGBColor = RGBColor(0x29, 0x80, 0xb9);
pub const COLOR_RIGHT_MOTOR: RGBColor = RGBColor(0xf3, 0x9c, 0x12);
pub const COLOR_BASE_SPEED: RGBColor = BLACK;

pub const OPACITY_STABILITY_ZONE: f64 = 0.6;
pub const OPACITY_CRITICAL_THRESHOLD: f64 = 0.4;
pub const OPACITY_BASE_SPEED: f64 = 0.3;
pub const OPACITY_GRID: f64 = 0.5;

// Stroke widths for lines (pixels at PLOT_DPI).
pub const LINE_WIDTH_ERROR: u32 = 6;
pub const LINE_WIDTH_PLOT: u32 = 6;
pub const LINE_WIDTH_REFERENCE: u32 = 4;
pub const LINE_WIDTH_LEGEND: u32 = 6;

// src/constants.rs
