//! Entry model
//!
//! One user-recorded observation: a symptom score, a medication dose, a diary
//! note or a test result.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::ids::EntryId;

/// Kind of entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    Symptom,
    Medication,
    Diary,
    TestResult,
}

impl EntryType {
    pub fn all() -> [EntryType; 4] {
        [
            Self::Symptom,
            Self::Medication,
            Self::Diary,
            Self::TestResult,
        ]
    }

    /// Parse entry type from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "symptom" | "symptoms" => Some(Self::Symptom),
            "medication" | "medications" | "med" => Some(Self::Medication),
            "diary" | "note" => Some(Self::Diary),
            "test_result" | "test_results" | "test" | "tests" => Some(Self::TestResult),
            _ => None,
        }
    }

    /// Wire name, as stored in `entry_type`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Symptom => "symptom",
            Self::Medication => "medication",
            Self::Diary => "diary",
            Self::TestResult => "test_result",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Symptom => write!(f, "Symptom"),
            Self::Medication => write!(f, "Medication"),
            Self::Diary => write!(f, "Diary"),
            Self::TestResult => write!(f, "Test Result"),
        }
    }
}

/// A single user-entered field value
///
/// Numbers keep their original JSON representation so `3` stays `3`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(serde_json::Number),
    Text(String),
}

impl FieldValue {
    /// Parse a command-line value: numeric text becomes a number
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if let Ok(int) = trimmed.parse::<i64>() {
            return Self::Number(int.into());
        }
        if let Some(number) = trimmed
            .parse::<f64>()
            .ok()
            .and_then(serde_json::Number::from_f64)
        {
            return Self::Number(number);
        }
        Self::Text(raw.to_string())
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Validation errors for entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryValidationError {
    MissingSubtype,
    EmptyFieldId,
    EmptyTag,
}

impl fmt::Display for EntryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSubtype => write!(f, "Entry subtype is required"),
            Self::EmptyFieldId => write!(f, "Field ids cannot be empty"),
            Self::EmptyTag => write!(f, "Tags cannot be empty"),
        }
    }
}

impl std::error::Error for EntryValidationError {}

/// A diary entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,

    pub entry_type: EntryType,

    /// Subtype within the entry type (e.g., "pain_vas")
    pub subtype_id: String,

    /// Human-readable subtype label
    #[serde(default)]
    pub subtype_label: String,

    /// Calendar date the observation is about (user-editable)
    pub date: NaiveDate,

    /// Field id -> entered value
    #[serde(default)]
    pub values: BTreeMap<String, FieldValue>,

    #[serde(default)]
    pub notes: String,

    #[serde(default)]
    pub tags: Vec<String>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Entry {
    /// Create a new entry with the given id and no values
    pub fn new(
        id: EntryId,
        entry_type: EntryType,
        subtype_id: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            entry_type,
            subtype_id: subtype_id.into(),
            subtype_label: String::new(),
            date,
            values: BTreeMap::new(),
            notes: String::new(),
            tags: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Label shown in lists and reports: subtype label, else the type name
    pub fn display_label(&self) -> String {
        if self.subtype_label.trim().is_empty() {
            self.entry_type.to_string()
        } else {
            self.subtype_label.clone()
        }
    }

    /// Case-insensitive match against notes, tags and subtype label
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }

        self.notes.to_lowercase().contains(&term)
            || self.tags.iter().any(|t| t.to_lowercase().contains(&term))
            || self.subtype_label.to_lowercase().contains(&term)
    }

    /// Mark the entry as modified
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn validate(&self) -> Result<(), EntryValidationError> {
        if self.subtype_id.trim().is_empty() {
            return Err(EntryValidationError::MissingSubtype);
        }
        if self.values.keys().any(|k| k.trim().is_empty()) {
            return Err(EntryValidationError::EmptyFieldId);
        }
        if self.tags.iter().any(|t| t.trim().is_empty()) {
            return Err(EntryValidationError::EmptyTag);
        }
        Ok(())
    }
}

/// Split a comma-separated tag string, trimming and dropping empties
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entry() -> Entry {
        let mut entry = Entry::new(
            EntryId::from_raw(1),
            EntryType::Symptom,
            "pain_vas",
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        );
        entry.subtype_label = "Pain (VAS)".into();
        entry.notes = "Worse after running".into();
        entry.tags = vec!["Knee".into(), "sport".into()];
        entry
    }

    #[test]
    fn test_entry_type_parse() {
        assert_eq!(EntryType::parse("symptom"), Some(EntryType::Symptom));
        assert_eq!(EntryType::parse("Medications"), Some(EntryType::Medication));
        assert_eq!(EntryType::parse("test"), Some(EntryType::TestResult));
        assert_eq!(EntryType::parse("invalid"), None);
    }

    #[test]
    fn test_entry_type_wire_name() {
        let json = serde_json::to_string(&EntryType::TestResult).unwrap();
        assert_eq!(json, "\"test_result\"");
        for t in EntryType::all() {
            assert_eq!(EntryType::parse(t.as_str()), Some(t));
        }
    }

    #[test]
    fn test_field_value_parse() {
        assert_eq!(FieldValue::parse("3"), FieldValue::Number(3.into()));
        assert_eq!(FieldValue::parse("2.5").to_string(), "2.5");
        assert_eq!(FieldValue::parse("mild"), FieldValue::Text("mild".into()));
    }

    #[test]
    fn test_integer_values_keep_representation() {
        let json = r#"{"id":1718000000000,"entry_type":"symptom","subtype_id":"pain_vas",
            "subtype_label":"Pain","date":"2024-06-10","values":{"pain_score":7,"where":"knee"},
            "notes":"","tags":[],"created_at":"2024-06-10T10:00:00.000Z",
            "updated_at":"2024-06-10T10:00:00.000Z"}"#;

        let entry: Entry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.values["pain_score"], FieldValue::Number(7.into()));

        let back = serde_json::to_value(&entry).unwrap();
        assert_eq!(back["values"]["pain_score"], serde_json::json!(7));
        assert_eq!(back["values"]["where"], serde_json::json!("knee"));
        assert_eq!(back["date"], serde_json::json!("2024-06-10"));
    }

    #[test]
    fn test_matches_search() {
        let entry = sample_entry();
        assert!(entry.matches_search(""));
        assert!(entry.matches_search("RUNNING"));
        assert!(entry.matches_search("knee"));
        assert!(entry.matches_search("vas"));
        assert!(!entry.matches_search("headache"));
    }

    #[test]
    fn test_display_label_falls_back_to_type() {
        let mut entry = sample_entry();
        assert_eq!(entry.display_label(), "Pain (VAS)");
        entry.subtype_label.clear();
        assert_eq!(entry.display_label(), "Symptom");
    }

    #[test]
    fn test_validation() {
        let mut entry = sample_entry();
        assert!(entry.validate().is_ok());

        entry.subtype_id = "  ".into();
        assert_eq!(entry.validate(), Err(EntryValidationError::MissingSubtype));
    }

    #[test]
    fn test_parse_tags() {
        assert_eq!(parse_tags(" a, b ,,c,"), vec!["a", "b", "c"]);
        assert!(parse_tags("").is_empty());
    }
}
