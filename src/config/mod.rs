//! Configuration module for SymLog
//!
//! This module provides configuration management including:
//! - Data directory resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::SymlogPaths;
pub use settings::Settings;
