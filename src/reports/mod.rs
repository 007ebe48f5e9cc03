//! Reports module for SymLog
//!
//! Provides the plain-text health report.

pub mod health;

pub use health::{HealthReport, ReportConfig, ReportSections, ReportStyle, DEFAULT_TITLE};
