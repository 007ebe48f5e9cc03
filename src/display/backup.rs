//! Backup display formatting

use chrono::{DateTime, Utc};

use crate::backup::{EnvelopeInfo, LastBackupInfo, RestoredData, BACKUP_VERSION};

/// Format envelope metadata, as shown by `backup info`
pub fn format_envelope_info(info: &EnvelopeInfo, now: DateTime<Utc>) -> String {
    let mut output = String::new();

    output.push_str(&format!("Version: {}", info.version));
    if !info.is_supported() {
        output.push_str(&format!(" (unsupported, expected {})", BACKUP_VERSION));
    }
    output.push('\n');
    output.push_str(&format!("Created: {}\n", format_timestamp(&info.timestamp, now)));
    output.push_str(&format!("Size:    {}\n", format_size(info.size as u64)));

    output
}

/// Format the contents of a decrypted backup
pub fn format_restored_preview(restored: &RestoredData) -> String {
    format!(
        "Entries: {}\nProfile: {}\n",
        restored.entry_count(),
        if restored.profile.is_some() { "Yes" } else { "No" }
    )
}

/// Format the last-backup record
pub fn format_last_backup(info: Option<&LastBackupInfo>, now: DateTime<Utc>) -> String {
    match info {
        Some(info) => format!(
            "Last backup: {}\nSize:        {}\n",
            format_timestamp(&info.timestamp, now),
            format_size(info.size)
        ),
        None => "No backup has been created yet.\n".to_string(),
    }
}

/// The timestamp with its age, or as-is when it doesn't parse
fn format_timestamp(timestamp: &str, now: DateTime<Utc>) -> String {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(created) => {
            let created = created.with_timezone(&Utc);
            format!(
                "{} ({} ago)",
                created.format("%Y-%m-%d %H:%M:%S UTC"),
                format_duration(now.signed_duration_since(created))
            )
        }
        Err(_) => timestamp.to_string(),
    }
}

/// Format a duration in human-readable form
pub fn format_duration(duration: chrono::Duration) -> String {
    let total_seconds = duration.num_seconds().max(0);

    if total_seconds < 60 {
        return format!("{}s", total_seconds);
    }

    let minutes = total_seconds / 60;
    if minutes < 60 {
        return format!("{}m", minutes);
    }

    let hours = minutes / 60;
    if hours < 24 {
        return format!("{}h", hours);
    }

    let days = hours / 24;
    if days < 30 {
        return format!("{}d", days);
    }

    format!("{}mo", days / 30)
}

/// Format a file size in human-readable form
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-06-12T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(chrono::Duration::seconds(42)), "42s");
        assert_eq!(format_duration(chrono::Duration::minutes(90)), "1h");
        assert_eq!(format_duration(chrono::Duration::days(2)), "2d");
        assert_eq!(format_duration(chrono::Duration::days(65)), "2mo");
        assert_eq!(format_duration(chrono::Duration::seconds(-5)), "0s");
    }

    #[test]
    fn test_envelope_info() {
        let info = EnvelopeInfo {
            version: "1.0".into(),
            timestamp: "2024-06-10T10:00:00.000Z".into(),
            size: 2048,
        };
        let output = format_envelope_info(&info, now());
        assert!(output.contains("Version: 1.0\n"));
        assert!(output.contains("Created: 2024-06-10 10:00:00 UTC (2d ago)\n"));
        assert!(output.contains("Size:    2.0 KB\n"));
    }

    #[test]
    fn test_unsupported_version_flagged() {
        let info = EnvelopeInfo {
            version: "0.9".into(),
            timestamp: "yesterday".into(),
            size: 10,
        };
        let output = format_envelope_info(&info, now());
        assert!(output.contains("unsupported"));
        assert!(output.contains("Created: yesterday\n"));
    }

    #[test]
    fn test_last_backup_missing() {
        assert_eq!(
            format_last_backup(None, now()),
            "No backup has been created yet.\n"
        );
    }
}
