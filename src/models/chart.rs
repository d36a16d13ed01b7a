//! Chart selection models

use serde::Serialize;

/// Rendering mode picked by the chart type selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ChartKind {
    #[default]
    Line,
    Bar,
    Area,
}

impl ChartKind {
    /// Options in the order the selector shows them
    pub const ALL: [ChartKind; 3] = [ChartKind::Line, ChartKind::Bar, ChartKind::Area];

    /// Map a selector value to a rendering mode.
    ///
    /// Only "Bar" and "Area" are matched explicitly; every other value,
    /// "Line" included, renders as a line chart.
    pub fn from_selection(selection: &str) -> Self {
        match selection {
            "Bar" => ChartKind::Bar,
            "Area" => ChartKind::Area,
            _ => ChartKind::Line,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChartKind::Line => "Line",
            ChartKind::Bar => "Bar",
            ChartKind::Area => "Area",
        }
    }
}

impl std::fmt::Display for ChartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
