// src/plot_framework.rs

use ndarray::Array1;
use ndarray_stats::QuantileExt;
use plotters::backend::BitMapBackend;
use plotters::chart::{ChartBuilder, ChartContext, SeriesLabelPosition};
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::drawing::{DrawingArea, IntoDrawingArea};
use plotters::element::{PathElement, Text};
use plotters::series::LineSeries;
use plotters::style::colors::{BLACK, RED, WHITE};
use plotters::style::{Color, IntoFont, RGBColor, ShapeStyle};
use tracing::{info, warn};

use std::error::Error;
use std::ops::Range;
use std::path::Path;

use crate::constants::{
    CHART_MARGIN_PX, DASHED_LINE_DUTY, DASHED_LINE_PERIODS, DOTTED_LINE_DUTY,
    DOTTED_LINE_PERIODS, FONT_SIZE_MESSAGE, LEGEND_SAMPLE_LENGTH_PX, LINE_WIDTH_LEGEND,
    MAX_DASH_COUNT, OPACITY_GRID, PLOT_HEIGHT, PLOT_WIDTH, RANGE_PADDING_FRACTION,
    X_LABEL_AREA_PX, Y_LABEL_AREA_PX,
};
use crate::font_config::{
    FONT_TUPLE_AXIS_LABEL, FONT_TUPLE_CHART_TITLE, FONT_TUPLE_LEGEND, FONT_TUPLE_MESSAGE,
    FONT_TUPLE_TICK_LABEL,
};

type TimeSeriesChart<'a, 'b> =
    ChartContext<'a, BitMapBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Calculate plot range with padding.
/// Adds `RANGE_PADDING_FRACTION` of the span on each side, or a fixed padding for very small ranges.
pub fn calculate_range(min_val: f64, max_val: f64) -> (f64, f64) {
    let (min, max) = if min_val <= max_val {
        (min_val, max_val)
    } else {
        (max_val, min_val)
    };
    let range = (max - min).abs();
    let padding = if range < 1e-6 {
        0.5
    } else {
        range * RANGE_PADDING_FRACTION
    };
    (min - padding, max + padding)
}

/// Smallest and largest non-NaN value of a column, or `None` if there is none.
pub fn data_extent(values: &Array1<f64>) -> Option<(f64, f64)> {
    let min = *values.min_skipnan();
    let max = *values.max_skipnan();
    if min.is_nan() || max.is_nan() {
        None
    } else {
        Some((min, max))
    }
}

/// Draw a "Data Unavailable" message on a plot area.
pub fn draw_unavailable_message(
    area: &DrawingArea<BitMapBackend, Shift>,
    panel_name: &str,
    reason: &str,
) -> Result<(), Box<dyn Error>> {
    const CHAR_WIDTH_RATIO: f32 = 0.6; // Approximate character width relative to font size

    let (x_range, y_range) = area.get_pixel_range();
    let (width, height) = (x_range.end - x_range.start, y_range.end - y_range.start);
    let message = format!("{panel_name} Data Unavailable: {reason}");

    let estimated_text_width = (message.len() as f32 * FONT_SIZE_MESSAGE as f32 * CHAR_WIDTH_RATIO) as i32;
    let center_x = width / 2 - estimated_text_width / 2;
    let center_y = height / 2 - FONT_SIZE_MESSAGE / 2;

    let text_style = FONT_TUPLE_MESSAGE.into_font().color(&RED);
    area.draw(&Text::new(message, (center_x, center_y), text_style))?;
    Ok(())
}

/// How a series is stroked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    Dashed,
    Dotted,
}

#[derive(Debug, Clone)]
pub struct PlotSeries {
    pub data: Vec<(f64, f64)>,
    /// Empty labels are kept out of the legend.
    pub label: String,
    pub color: RGBColor,
    pub opacity: f64,
    pub stroke_width: u32,
    pub line_style: LineStyle,
}

impl PlotSeries {
    /// A horizontal line spanning `x_range` at height `y`.
    pub fn horizontal_line(
        y: f64,
        x_range: &Range<f64>,
        label: &str,
        color: RGBColor,
        opacity: f64,
        stroke_width: u32,
        line_style: LineStyle,
    ) -> Self {
        Self {
            data: vec![(x_range.start, y), (x_range.end, y)],
            label: label.to_string(),
            color,
            opacity,
            stroke_width,
            line_style,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PlotConfig {
    pub title: String,
    /// Second title line, drawn under `title` when non-empty.
    pub subtitle: String,
    pub x_range: Range<f64>,
    pub y_range: Range<f64>,
    pub series: Vec<PlotSeries>,
    pub x_label: String,
    pub y_label: String,
}

/// Splits a polyline into dashes of `period * duty` length along x, one dash
/// starting every `period`. Dash ends are linearly interpolated. Points must be
/// sorted by x. A pattern that would need more than `MAX_DASH_COUNT` dashes is
/// returned as a single solid run.
pub fn dash_polyline(data: &[(f64, f64)], period: f64, duty: f64) -> Vec<Vec<(f64, f64)>> {
    let (Some(&(x_start, _)), Some(&(x_end, _))) = (data.first(), data.last()) else {
        return Vec::new();
    };
    if data.len() < 2 || !period.is_finite() || period <= 0.0 || x_end <= x_start {
        return vec![data.to_vec()];
    }
    let dash_count = ((x_end - x_start) / period).ceil() as usize;
    if dash_count > MAX_DASH_COUNT {
        return vec![data.to_vec()];
    }

    let on_length = period * duty.clamp(0.0, 1.0);
    let mut dashes = Vec::with_capacity(dash_count);
    let mut first_inside = 0;
    for k in 0..dash_count {
        let dash_start = x_start + k as f64 * period;
        let dash_end = (dash_start + on_length).min(x_end);
        if dash_end <= dash_start {
            continue;
        }
        while first_inside < data.len() && data[first_inside].0 <= dash_start {
            first_inside += 1;
        }
        let mut dash = vec![(dash_start, value_at(data, dash_start))];
        dash.extend(
            data[first_inside..]
                .iter()
                .take_while(|p| p.0 < dash_end)
                .copied(),
        );
        dash.push((dash_end, value_at(data, dash_end)));
        dashes.push(dash);
    }
    dashes
}

/// Linear interpolation of a sorted polyline at `x`, clamped to its end values.
fn value_at(data: &[(f64, f64)], x: f64) -> f64 {
    let i = data.partition_point(|p| p.0 < x);
    if i == 0 {
        return data[0].1;
    }
    if i >= data.len() {
        return data[data.len() - 1].1;
    }
    let (a, b) = (data[i - 1], data[i]);
    if b.0 == a.0 {
        b.1
    } else {
        a.1 + (b.1 - a.1) * (x - a.0) / (b.0 - a.0)
    }
}

/// Splits a polyline at non-finite points, so missing samples leave a gap
/// instead of a straight line bridging them. Empty pieces are dropped.
pub fn split_at_gaps(data: &[(f64, f64)]) -> Vec<Vec<(f64, f64)>> {
    data.split(|p| !(p.0.is_finite() && p.1.is_finite()))
        .filter(|piece| !piece.is_empty())
        .map(|piece| piece.to_vec())
        .collect()
}

/// Draws one series, splitting it into dash runs when patterned.
/// Returns true if a legend entry was added.
fn draw_plot_series(
    chart: &mut TimeSeriesChart,
    s: &PlotSeries,
    x_span: f64,
) -> Result<bool, Box<dyn Error>> {
    let style: ShapeStyle = s.color.mix(s.opacity).stroke_width(s.stroke_width);
    let legend_style: ShapeStyle = s.color.mix(s.opacity).stroke_width(LINE_WIDTH_LEGEND);

    let runs = match s.line_style {
        LineStyle::Solid => vec![s.data.clone()],
        LineStyle::Dashed => dash_polyline(&s.data, x_span / DASHED_LINE_PERIODS as f64, DASHED_LINE_DUTY),
        LineStyle::Dotted => dash_polyline(&s.data, x_span / DOTTED_LINE_PERIODS as f64, DOTTED_LINE_DUTY),
    };

    let mut labelled = false;
    for run in runs.iter().flat_map(|run| split_at_gaps(run)) {
        let series = chart.draw_series(LineSeries::new(run, style))?;
        if !labelled && !s.label.is_empty() {
            series.label(&s.label).legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + LEGEND_SAMPLE_LENGTH_PX, y)], legend_style)
            });
            labelled = true;
        }
    }
    Ok(labelled)
}

/// Draws a single chart from a PlotConfig: mesh grid, series in order, and an
/// upper-right legend when any series is labelled.
fn draw_single_chart_with_config(
    area: &DrawingArea<BitMapBackend, Shift>,
    plot_config: &PlotConfig,
) -> Result<(), Box<dyn Error>> {
    // Captions are single-line, so a two-line title is stacked above the chart area.
    let titled_area;
    let chart_area = if plot_config.subtitle.is_empty() {
        area
    } else {
        titled_area = area
            .titled(&plot_config.title, FONT_TUPLE_CHART_TITLE)?
            .titled(&plot_config.subtitle, FONT_TUPLE_CHART_TITLE)?;
        &titled_area
    };

    let mut builder = ChartBuilder::on(chart_area);
    builder
        .margin(CHART_MARGIN_PX)
        .x_label_area_size(X_LABEL_AREA_PX)
        .y_label_area_size(Y_LABEL_AREA_PX);
    if plot_config.subtitle.is_empty() {
        builder.caption(&plot_config.title, FONT_TUPLE_CHART_TITLE);
    }
    let mut chart =
        builder.build_cartesian_2d(plot_config.x_range.clone(), plot_config.y_range.clone())?;

    chart
        .configure_mesh()
        .x_desc(&plot_config.x_label)
        .y_desc(&plot_config.y_label)
        .x_labels(12)
        .y_labels(10)
        .bold_line_style(BLACK.mix(OPACITY_GRID * 0.3))
        .light_line_style(WHITE.mix(0.7))
        .label_style(FONT_TUPLE_TICK_LABEL)
        .axis_desc_style(FONT_TUPLE_AXIS_LABEL)
        .draw()?;

    let x_span = plot_config.x_range.end - plot_config.x_range.start;
    let mut legend_series_count = 0;
    for s in &plot_config.series {
        if draw_plot_series(&mut chart, s, x_span)? {
            legend_series_count += 1;
        }
    }

    if legend_series_count > 0 {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .legend_area_size(LEGEND_SAMPLE_LENGTH_PX + 30)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(FONT_TUPLE_LEGEND)
            .draw()?;
    }
    Ok(())
}

/// Creates a plot image with `panel_count` charts stacked vertically.
///
/// `get_panel_config` is asked for each panel in turn; `None`, a panel without
/// data, or an empty range draws a placeholder message instead of a chart.
/// Returns true if at least one chart was drawn.
pub fn draw_stacked_plot<F>(
    output_path: &Path,
    plot_type_name: &str,
    panel_count: usize,
    mut get_panel_config: F,
) -> Result<bool, Box<dyn Error>>
where
    F: FnMut(usize) -> Option<PlotConfig>,
{
    let root_area = BitMapBackend::new(output_path, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
    root_area.fill(&WHITE)?;
    let margined_root_area = root_area.margin(20, 20, 20, 20);
    let sub_plot_areas = margined_root_area.split_evenly((panel_count, 1));
    let mut any_panel_plotted = false;

    for (panel_index, area) in sub_plot_areas.iter().enumerate() {
        match get_panel_config(panel_index) {
            Some(plot_config) => {
                let has_data = plot_config.series.iter().any(|s| !s.data.is_empty());
                let valid_ranges = plot_config.x_range.end > plot_config.x_range.start
                    && plot_config.y_range.end > plot_config.y_range.start;
                if has_data && valid_ranges {
                    draw_single_chart_with_config(area, &plot_config)?;
                    any_panel_plotted = true;
                } else {
                    let reason = if !has_data { "No data points" } else { "Invalid ranges" };
                    draw_unavailable_message(area, &plot_config.title, reason)?;
                }
            }
            None => {
                let panel_name = format!("{plot_type_name} panel {}", panel_index + 1);
                draw_unavailable_message(area, &panel_name, "Calculation/Data Extraction Failed")?;
            }
        }
    }

    root_area.present()?;
    if any_panel_plotted {
        info!("Stacked plot saved as '{}'.", output_path.display());
    } else {
        warn!(
            "'{}' holds only placeholder messages: no panel had data to plot.",
            output_path.display()
        );
    }
    Ok(any_panel_plotted)
}


// src/plot_framework.rs
