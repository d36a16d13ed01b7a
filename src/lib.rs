//! Synthetic time-series demo dashboard
//!
//! A random-walk series rendered as a chart with two controls, served over
//! HTTP by the `dashboard` binary and started in containers by `launcher`.

pub mod config;
pub mod launcher;
pub mod models;
pub mod server;
pub mod services;
pub mod utils;
