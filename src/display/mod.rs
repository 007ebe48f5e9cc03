//! Display formatting for terminal output
//!
//! Provides utilities for formatting entries, the entry type catalog, the
//! profile and backup metadata for terminal display.

pub mod backup;
pub mod catalog;
pub mod entry;
pub mod profile;

pub use backup::{
    format_duration, format_envelope_info, format_last_backup, format_restored_preview,
    format_size,
};
pub use catalog::format_entry_types;
pub use entry::{format_entries_grouped, format_entry_details, format_entry_page, format_entry_table};
pub use profile::{format_profile_details, format_profile_summary};
