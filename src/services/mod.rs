pub mod chart_service;
pub mod page_service;
pub mod series_service;
