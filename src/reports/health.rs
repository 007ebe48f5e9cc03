//! Health Report
//!
//! A plain-text report of the profile and the entries in a date range,
//! suitable for copying into a message to a doctor.

use chrono::{Duration, NaiveDate};

use crate::config::Settings;
use crate::error::{SymlogError, SymlogResult};
use crate::models::{Entry, EntryType, Profile};
use crate::services::{sort_entries, EntryService, ProfileService, SortOrder};
use crate::storage::Store;

/// Default report title
pub const DEFAULT_TITLE: &str = "My Health Report";

/// Range start used when there are no entries at all
const EMPTY_RANGE_DAYS: i64 = 30;

const RULE_WIDTH: usize = 50;

/// How much of each entry to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportStyle {
    /// Label, date, values and notes
    #[default]
    Detailed,
    /// Label and date only
    Summary,
}

/// Which sections and entry types go into the report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportSections {
    pub personal_info: bool,
    pub medical_info: bool,
    pub symptoms: bool,
    pub medications: bool,
    pub test_results: bool,
    pub diary: bool,
}

impl Default for ReportSections {
    fn default() -> Self {
        Self {
            personal_info: true,
            medical_info: true,
            symptoms: true,
            medications: true,
            test_results: true,
            diary: true,
        }
    }
}

impl ReportSections {
    /// Whether entries of this type are included
    pub fn includes(&self, entry_type: EntryType) -> bool {
        match entry_type {
            EntryType::Symptom => self.symptoms,
            EntryType::Medication => self.medications,
            EntryType::TestResult => self.test_results,
            EntryType::Diary => self.diary,
        }
    }

    /// Turn off a section by name, e.g. `personal_info` or `medications`
    pub fn exclude(&mut self, name: &str) -> SymlogResult<()> {
        match name.trim().to_lowercase().as_str() {
            "personal_info" | "personal" => self.personal_info = false,
            "medical_info" | "medical" => self.medical_info = false,
            other => match EntryType::parse(other) {
                Some(EntryType::Symptom) => self.symptoms = false,
                Some(EntryType::Medication) => self.medications = false,
                Some(EntryType::TestResult) => self.test_results = false,
                Some(EntryType::Diary) => self.diary = false,
                None => {
                    return Err(SymlogError::Validation(format!(
                        "Unknown report section: '{}'",
                        name
                    )))
                }
            },
        }
        Ok(())
    }
}

/// Report options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    pub title: String,
    pub include: ReportSections,
    /// Inclusive; defaults to the earliest entry date
    pub date_from: Option<NaiveDate>,
    /// Inclusive; defaults to today
    pub date_to: Option<NaiveDate>,
    pub style: ReportStyle,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            include: ReportSections::default(),
            date_from: None,
            date_to: None,
            style: ReportStyle::default(),
        }
    }
}

/// A generated health report
#[derive(Debug, Clone)]
pub struct HealthReport {
    pub title: String,
    pub generated: NaiveDate,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub style: ReportStyle,
    pub include: ReportSections,
    pub profile: Profile,
    /// Entries in range, oldest first
    pub entries: Vec<Entry>,
}

impl HealthReport {
    /// Generate a report from the store
    pub fn generate(
        store: &dyn Store,
        settings: &Settings,
        config: &ReportConfig,
        today: NaiveDate,
    ) -> SymlogResult<Self> {
        let profile = ProfileService::new(store, settings).get()?;
        let entries = EntryService::new(store).all()?;
        Self::from_parts(config, profile, entries, today)
    }

    /// Build a report from already loaded data
    pub fn from_parts(
        config: &ReportConfig,
        profile: Profile,
        entries: Vec<Entry>,
        today: NaiveDate,
    ) -> SymlogResult<Self> {
        let date_from = config.date_from.unwrap_or_else(|| {
            entries
                .iter()
                .map(|e| e.date)
                .min()
                .unwrap_or(today - Duration::days(EMPTY_RANGE_DAYS))
        });
        let date_to = config.date_to.unwrap_or(today);

        if date_from > date_to {
            return Err(SymlogError::Validation(format!(
                "Report start {} is after end {}",
                date_from, date_to
            )));
        }

        let mut entries: Vec<Entry> = entries
            .into_iter()
            .filter(|e| e.date >= date_from && e.date <= date_to)
            .filter(|e| config.include.includes(e.entry_type))
            .collect();
        sort_entries(&mut entries, SortOrder::Ascending);

        let title = if config.title.trim().is_empty() {
            DEFAULT_TITLE.to_string()
        } else {
            config.title.trim().to_string()
        };

        Ok(Self {
            title,
            generated: today,
            date_from,
            date_to,
            style: config.style,
            include: config.include,
            profile,
            entries,
        })
    }

    /// Format the report as plain text
    pub fn format_text(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("{}\n", self.title));
        output.push_str(&format!("Generated: {}\n", self.generated.format("%Y-%m-%d")));
        output.push_str(&format!("Period: {} to {}\n", self.date_from, self.date_to));
        output.push_str(&"=".repeat(RULE_WIDTH));
        output.push_str("\n\n");

        if self.include.personal_info {
            let personal = &self.profile.personal_info;
            section_header(&mut output, "PERSONAL INFORMATION");
            output.push_str(&format!("Name: {}\n", or_not_set(&personal.name)));
            output.push_str(&format!(
                "Age: {}\n",
                personal
                    .age
                    .filter(|a| *a > 0)
                    .map_or_else(|| "Not set".to_string(), |a| a.to_string())
            ));
            output.push_str(&format!("Weight: {}\n", personal.weight));
            output.push_str(&format!("Height: {}\n", personal.height));
            output.push_str(&format!("Blood Type: {}\n\n", or_not_set(&personal.blood_type)));
        }

        if self.include.medical_info {
            let medical = &self.profile.medical_info;
            section_header(&mut output, "MEDICAL INFORMATION");
            output.push_str(&format!("Conditions: {}\n", or_none(&medical.conditions)));
            output.push_str(&format!("Allergies: {}\n", or_none(&medical.allergies)));
            output.push_str(&format!("Doctor: {}\n", or_not_set(&medical.doctor_name)));
            output.push_str(&format!("Diagnosis: {}\n\n", or_not_set(&medical.diagnosis)));
        }

        if !self.entries.is_empty() {
            section_header(&mut output, "HEALTH LOG");
            for (i, entry) in self.entries.iter().enumerate() {
                output.push_str(&format!(
                    "{}. {} - {}\n",
                    i + 1,
                    entry.display_label(),
                    entry.date
                ));

                if self.style == ReportStyle::Detailed {
                    for (field, value) in &entry.values {
                        output.push_str(&format!("   {}: {}\n", field, value));
                    }
                    if !entry.notes.is_empty() {
                        output.push_str(&format!("   Notes: {}\n", entry.notes));
                    }
                }
                output.push('\n');
            }
        }

        output
    }
}

fn section_header(output: &mut String, title: &str) {
    output.push_str(title);
    output.push('\n');
    output.push_str(&"-".repeat(RULE_WIDTH));
    output.push('\n');
}

fn or_not_set(s: &str) -> &str {
    if s.trim().is_empty() {
        "Not set"
    } else {
        s
    }
}

fn or_none(items: &[String]) -> String {
    if items.is_empty() {
        "None".to_string()
    } else {
        items.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntryId, FieldValue};

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn entry(id: i64, entry_type: EntryType, on: NaiveDate, label: &str) -> Entry {
        let mut e = Entry::new(EntryId::from_raw(id), entry_type, "sub", on);
        e.subtype_label = label.into();
        e
    }

    fn sample_entries() -> Vec<Entry> {
        let mut pain = entry(1, EntryType::Symptom, date(6, 3), "Pain");
        pain.values.insert("score".into(), FieldValue::parse("7"));
        pain.notes = "left knee".into();
        vec![
            pain,
            entry(2, EntryType::Medication, date(6, 1), "Ibuprofen"),
            entry(3, EntryType::Diary, date(6, 5), ""),
        ]
    }

    #[test]
    fn test_default_range_starts_at_earliest_entry() {
        let report = HealthReport::from_parts(
            &ReportConfig::default(),
            Profile::default(),
            sample_entries(),
            date(6, 10),
        )
        .unwrap();

        assert_eq!(report.date_from, date(6, 1));
        assert_eq!(report.date_to, date(6, 10));
        let ids: Vec<i64> = report.entries.iter().map(|e| e.id.as_i64()).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn test_empty_range_defaults_to_thirty_days() {
        let report = HealthReport::from_parts(
            &ReportConfig::default(),
            Profile::default(),
            Vec::new(),
            date(6, 30),
        )
        .unwrap();
        assert_eq!(report.date_from, date(5, 31));
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let config = ReportConfig {
            date_from: Some(date(6, 3)),
            date_to: Some(date(6, 5)),
            ..ReportConfig::default()
        };
        let report =
            HealthReport::from_parts(&config, Profile::default(), sample_entries(), date(6, 10))
                .unwrap();
        assert_eq!(report.entries.len(), 2);
    }

    #[test]
    fn test_inverted_range_rejected() {
        let config = ReportConfig {
            date_from: Some(date(6, 5)),
            date_to: Some(date(6, 3)),
            ..ReportConfig::default()
        };
        assert!(
            HealthReport::from_parts(&config, Profile::default(), Vec::new(), date(6, 10))
                .unwrap_err()
                .is_validation()
        );
    }

    #[test]
    fn test_text_layout() {
        let mut profile = Profile::default();
        profile.personal_info.name = "Ada".into();
        profile.medical_info.conditions = vec!["asthma".into()];

        let report = HealthReport::from_parts(
            &ReportConfig::default(),
            profile,
            sample_entries(),
            date(6, 10),
        )
        .unwrap();
        let text = report.format_text();

        assert!(text.starts_with("My Health Report\nGenerated: 2024-06-10\n"));
        assert!(text.contains(&"=".repeat(50)));
        assert!(text.contains("PERSONAL INFORMATION\n"));
        assert!(text.contains("Name: Ada\n"));
        assert!(text.contains("Age: Not set\n"));
        assert!(text.contains("Conditions: asthma\n"));
        assert!(text.contains("Allergies: None\n"));
        assert!(text.contains("HEALTH LOG\n"));
        assert!(text.contains("1. Ibuprofen - 2024-06-01\n"));
        assert!(text.contains("2. Pain - 2024-06-03\n   score: 7\n   Notes: left knee\n"));
        assert!(text.contains("3. Diary - 2024-06-05\n"));
    }

    #[test]
    fn test_summary_style_omits_details() {
        let config = ReportConfig {
            style: ReportStyle::Summary,
            ..ReportConfig::default()
        };
        let text =
            HealthReport::from_parts(&config, Profile::default(), sample_entries(), date(6, 10))
                .unwrap()
                .format_text();

        assert!(text.contains("2. Pain - 2024-06-03\n\n"));
        assert!(!text.contains("Notes:"));
        assert!(!text.contains("score"));
    }

    #[test]
    fn test_section_toggles() {
        let mut include = ReportSections::default();
        include.exclude("personal_info").unwrap();
        include.exclude("medical").unwrap();
        include.exclude("medications").unwrap();
        assert!(include.exclude("finances").is_err());

        let config = ReportConfig {
            include,
            ..ReportConfig::default()
        };
        let report =
            HealthReport::from_parts(&config, Profile::default(), sample_entries(), date(6, 10))
                .unwrap();
        let text = report.format_text();

        assert!(!text.contains("PERSONAL INFORMATION"));
        assert!(!text.contains("MEDICAL INFORMATION"));
        assert!(!text.contains("Ibuprofen"));
        assert_eq!(report.entries.len(), 2);
    }

    #[test]
    fn test_no_entries_omits_health_log() {
        let config = ReportConfig {
            title: "  ".into(),
            ..ReportConfig::default()
        };
        let text = HealthReport::from_parts(&config, Profile::default(), Vec::new(), date(6, 10))
            .unwrap()
            .format_text();

        assert!(text.starts_with(DEFAULT_TITLE));
        assert!(!text.contains("HEALTH LOG"));
    }
}
