//! Store key namespace

/// The profile object
pub const PROFILE: &str = "symlog_profile";

/// The ordered entry array
pub const ENTRIES: &str = "symlog_entries";

/// `{timestamp, size}` of the last exported backup
pub const LAST_BACKUP_INFO: &str = "symlog_last_backup_info";

/// Legacy backup slot; only ever cleared
pub const LEGACY_BACKUP: &str = "symlog_backup";

/// Keys removed by a full data wipe
pub const WIPED_BY_RESET: [&str; 3] = [ENTRIES, PROFILE, LEGACY_BACKUP];
