//! Data models for the dashboard
//!
//! This module organizes the data and view structs shared by services and
//! the HTTP layer.

pub mod chart;
pub mod page;
pub mod series;

// Re-export commonly used types for convenience
pub use chart::ChartKind;
pub use page::{Layout, PageConfig, PageView};
pub use series::{SamplePoint, SampleSeries, SeriesMetrics};
