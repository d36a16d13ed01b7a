use plotters::prelude::*;
use thiserror::Error;

use crate::models::{ChartKind, SampleSeries};

/// Default chart canvas size in pixels
pub const CHART_WIDTH: u32 = 720;
pub const CHART_HEIGHT: u32 = 420;

/// Chart rendering errors
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Not enough data to draw a chart")]
    Empty,
    #[error("Failed to render chart: {0}")]
    Render(String),
}

fn render_err<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Render(e.to_string())
}

/// Value axis range covering every point and the zero baseline, padded by 10%
fn value_range(series: &SampleSeries) -> Option<(f64, f64)> {
    let (min_value, max_value) = series.value_bounds()?;
    let low = min_value.min(0.0);
    let high = max_value.max(0.0);

    let range = (high - low).max(1e-8); // Avoid a zero-height axis
    let padding = range * 0.1;
    Some((low - padding, high + padding))
}

/// Date label for an x-axis position, blank between points
fn date_label(series: &SampleSeries, x: f64) -> String {
    let idx = x.round();
    if idx < 0.0 || (idx as usize) >= series.len() || (x - idx).abs() > 1e-6 {
        return String::new();
    }
    series.points[idx as usize].date.format("%Y-%m-%d").to_string()
}

/// Render a sample series as an SVG document.
///
/// Points sit at their index on the x axis and are labelled with their date.
pub fn render_chart(
    series: &SampleSeries,
    kind: ChartKind,
    width: u32,
    height: u32,
) -> Result<String, ChartError> {
    let (y_min, y_max) = value_range(series).ok_or(ChartError::Empty)?;
    let x_max = series.len() as f64 - 0.5;

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(format!("{} chart", kind), ("sans-serif", 24.0).into_font())
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(-0.5..x_max, y_min..y_max)
            .map_err(render_err)?;

        chart
            .configure_mesh()
            .x_desc("Date")
            .y_desc("Value")
            .x_labels(series.len().min(6))
            .x_label_formatter(&|x| date_label(series, *x))
            .draw()
            .map_err(render_err)?;

        let coords = series
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| (i as f64, p.value));

        match kind {
            ChartKind::Line => {
                chart
                    .draw_series(LineSeries::new(coords, &BLUE))
                    .map_err(render_err)?;
            }
            ChartKind::Bar => {
                chart
                    .draw_series(coords.map(|(x, y)| {
                        Rectangle::new([(x - 0.4, 0.0), (x + 0.4, y)], BLUE.filled())
                    }))
                    .map_err(render_err)?;
            }
            ChartKind::Area => {
                chart
                    .draw_series(AreaSeries::new(coords, 0.0, BLUE.mix(0.3)).border_style(&BLUE))
                    .map_err(render_err)?;
            }
        }

        root.present().map_err(render_err)?;
    }

    tracing::debug!("Rendered {} chart with {} points ({} bytes)", kind, series.len(), svg.len());
    Ok(svg)
}
