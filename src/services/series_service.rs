use chrono::{Duration, NaiveDate};
use rand::Rng;
use rand_distr::StandardNormal;

use crate::models::{SamplePoint, SampleSeries, SeriesMetrics};

/// Smallest sample size the slider allows
pub const MIN_SAMPLES: usize = 10;
/// Largest sample size the slider allows
pub const MAX_SAMPLES: usize = 100;
/// Slider position on first load
pub const DEFAULT_SAMPLES: usize = 50;

/// First date of every generated series (2023-01-01)
pub fn series_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or_default()
}

/// Keep a requested sample size inside the slider range
pub fn clamp_samples(requested: usize) -> usize {
    requested.clamp(MIN_SAMPLES, MAX_SAMPLES)
}

/// Generate a random walk of `samples` daily points using a fresh RNG.
///
/// Output differs on every call. Use [`generate_series_with`] with a seeded
/// generator when the values need to be reproducible.
pub fn generate_series(samples: usize) -> SampleSeries {
    generate_series_with(samples, &mut rand::thread_rng())
}

/// Generate a random walk of `samples` daily points drawing from `rng`.
///
/// Each value is the previous value plus an independent N(0, 1) draw, so
/// the first value is just the first draw. The sample size is not
/// validated here; callers clamp it with [`clamp_samples`].
pub fn generate_series_with<R: Rng>(samples: usize, rng: &mut R) -> SampleSeries {
    let start = series_start();
    let mut total = 0.0;

    let points = (0..samples)
        .map(|i| {
            let step: f64 = rng.sample(StandardNormal);
            total += step;
            SamplePoint {
                date: start + Duration::days(i as i64),
                value: total,
            }
        })
        .collect();

    SampleSeries::new(points)
}

/// Round to 2 decimal places, halves to even (0.125 -> 0.12)
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

impl SeriesMetrics {
    /// Compute sample count, final value and value change for a series.
    /// An empty series reports zeros.
    pub fn from_series(series: &SampleSeries) -> Self {
        let (first, last) = match (series.first(), series.last()) {
            (Some(first), Some(last)) => (first.value, last.value),
            _ => (0.0, 0.0),
        };

        SeriesMetrics {
            sample_count: series.len(),
            final_value: round2(last),
            value_change: round2(last - first),
        }
    }
}
