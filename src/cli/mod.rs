//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod backup;
pub mod entry;
pub mod profile;
pub mod report;

pub use backup::{handle_backup_command, BackupCommands};
pub use entry::{handle_entry_command, EntryCommands};
pub use profile::{handle_profile_command, ProfileCommands};
pub use report::{handle_report_command, ReportArgs};

use chrono::NaiveDate;

use crate::error::{SymlogError, SymlogResult};

/// Parse a `YYYY-MM-DD` date argument
pub fn parse_date(date_str: &str) -> SymlogResult<NaiveDate> {
    NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d").map_err(|_| {
        SymlogError::Validation(format!(
            "Invalid date format: '{}'. Use YYYY-MM-DD",
            date_str
        ))
    })
}

/// Parse an optional date argument, defaulting to today
pub fn parse_date_or_today(date_str: Option<&str>) -> SymlogResult<NaiveDate> {
    match date_str {
        Some(date_str) => parse_date(date_str),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-06-10").unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
        );
        assert!(parse_date("10/06/2024").unwrap_err().is_validation());
    }
}
