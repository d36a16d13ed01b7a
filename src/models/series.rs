//! Sample series models

use chrono::NaiveDate;
use serde::Serialize;

/// A single data point of a sample series
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SamplePoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Daily-spaced random walk, regenerated on every read
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SampleSeries {
    pub points: Vec<SamplePoint>,
}

impl SampleSeries {
    pub fn new(points: Vec<SamplePoint>) -> Self {
        SampleSeries { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&SamplePoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&SamplePoint> {
        self.points.last()
    }

    /// Smallest and largest value, or `None` for an empty series
    pub fn value_bounds(&self) -> Option<(f64, f64)> {
        if self.points.is_empty() {
            return None;
        }
        let min = self.points.iter().map(|p| p.value).fold(f64::INFINITY, f64::min);
        let max = self.points.iter().map(|p| p.value).fold(f64::NEG_INFINITY, f64::max);
        Some((min, max))
    }
}

/// Derived metrics shown next to the chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesMetrics {
    pub sample_count: usize,
    pub final_value: f64,
    pub value_change: f64,
}
