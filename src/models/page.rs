//! Page configuration and render models

use serde::Deserialize;

use super::chart::ChartKind;
use super::series::{SampleSeries, SeriesMetrics};

/// Page width mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    #[default]
    Wide,
    Centered,
}

/// Static page settings, read from the run-target file
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub page_title: String,
    pub page_icon: String,
    pub layout: Layout,
    pub title: String,
    pub subtitle: String,
    pub sidebar_header: String,
    pub deployment_info: Vec<String>,
}

impl Default for PageConfig {
    fn default() -> Self {
        PageConfig {
            page_title: "AWS EKS Demo App".to_string(),
            page_icon: "🚀".to_string(),
            layout: Layout::Wide,
            title: "🚀 Rust Dashboard on AWS EKS Demo with CI/CD v1".to_string(),
            subtitle: "Deployed with Kaniko on Amazon EKS".to_string(),
            sidebar_header: "Demo Controls".to_string(),
            deployment_info: vec![
                "📦 Built with Kaniko".to_string(),
                "🐳 Image stored in Amazon ECR".to_string(),
                "☸️ Running on Amazon EKS".to_string(),
            ],
        }
    }
}

/// Everything a single page render needs
#[derive(Debug, Clone)]
pub struct PageView<'a> {
    pub config: &'a PageConfig,
    pub samples: usize,
    pub chart_kind: ChartKind,
    pub series: &'a SampleSeries,
    pub metrics: SeriesMetrics,
    pub chart_svg: &'a str,
    pub xsrf_token: Option<&'a str>,
}
