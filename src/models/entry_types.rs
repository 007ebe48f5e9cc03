//! Entry type catalog
//!
//! Every entry type offers a fixed set of subtypes, and each subtype defines
//! the fields it records: bounded sliders for questionnaire scores, option
//! lists, free text, dates and times. Values entered for an entry are checked
//! and normalized against its subtype here. Some subtypes also carry a score
//! computed from other fields.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{NaiveDate, NaiveTime};

use super::entry::{EntryType, FieldValue};

/// How a field is entered and validated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Whole number in `min..=max`, on multiples of `step` from `min`
    Slider { min: i64, max: i64, step: i64 },
    /// One of a fixed set of options
    Select(&'static [SelectOption]),
    Text,
    /// `YYYY-MM-DD`
    Date,
    /// `HH:MM`
    Time,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectOption {
    /// Stored value
    pub value: &'static str,
    pub label: &'static str,
}

impl SelectOption {
    /// Short form accepted on input, the part after the last `_`
    pub fn short(&self) -> &'static str {
        self.value.rsplit('_').next().unwrap_or(self.value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub id: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

/// A score stored under `field` as the sum of other slider fields
///
/// Missing inputs count as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreDef {
    pub field: &'static str,
    pub label: &'static str,
    pub sum_of: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubtypeDef {
    pub id: &'static str,
    pub label: &'static str,
    pub fields: &'static [FieldDef],
    pub score: Option<ScoreDef>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeDef {
    pub entry_type: EntryType,
    pub description: &'static str,
    pub subtypes: &'static [SubtypeDef],
}

/// Why a value does not fit its subtype
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    UnknownSubtype {
        entry_type: EntryType,
        subtype: String,
    },
    UnknownField {
        subtype: &'static str,
        field: String,
    },
    NotANumber {
        field: &'static str,
        value: String,
    },
    OutOfRange {
        field: &'static str,
        value: String,
        min: i64,
        max: i64,
    },
    OffStep {
        field: &'static str,
        value: String,
        step: i64,
    },
    UnknownOption {
        field: &'static str,
        value: String,
        options: String,
    },
    InvalidDate {
        field: &'static str,
        value: String,
    },
    InvalidTime {
        field: &'static str,
        value: String,
    },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownSubtype {
                entry_type,
                subtype,
            } => write!(
                f,
                "Unknown {} subtype '{}'. Available: {}",
                entry_type.as_str(),
                subtype,
                type_def(*entry_type)
                    .subtypes
                    .iter()
                    .map(|s| s.id)
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            Self::UnknownField { subtype, field } => {
                write!(f, "Unknown field '{}' for {}", field, subtype)
            }
            Self::NotANumber { field, value } => {
                write!(f, "{} must be a number, got '{}'", field, value)
            }
            Self::OutOfRange {
                field,
                value,
                min,
                max,
            } => write!(f, "{} must be between {} and {}, got {}", field, min, max, value),
            Self::OffStep { field, value, step } => {
                write!(f, "{} must move in steps of {}, got {}", field, step, value)
            }
            Self::UnknownOption {
                field,
                value,
                options,
            } => write!(f, "Invalid {} '{}'. Use one of: {}", field, value, options),
            Self::InvalidDate { field, value } => {
                write!(f, "{} must be a date (YYYY-MM-DD), got '{}'", field, value)
            }
            Self::InvalidTime { field, value } => {
                write!(f, "{} must be a time (HH:MM), got '{}'", field, value)
            }
        }
    }
}

impl std::error::Error for CatalogError {}

impl FieldDef {
    /// Check one value and bring it to its stored form
    pub fn normalize(&self, value: &FieldValue) -> Result<FieldValue, CatalogError> {
        let raw = value.to_string();
        let text = raw.trim();

        match self.kind {
            FieldKind::Slider { min, max, step } => {
                let number = match value {
                    FieldValue::Number(n) => n.as_f64(),
                    FieldValue::Text(_) => text.parse::<f64>().ok(),
                }
                .filter(|n| n.is_finite())
                .ok_or_else(|| CatalogError::NotANumber {
                    field: self.id,
                    value: raw.clone(),
                })?;

                if number < min as f64 || number > max as f64 {
                    return Err(CatalogError::OutOfRange {
                        field: self.id,
                        value: text.to_string(),
                        min,
                        max,
                    });
                }
                let steps = (number - min as f64) / step as f64;
                if steps.fract() != 0.0 {
                    return Err(CatalogError::OffStep {
                        field: self.id,
                        value: text.to_string(),
                        step,
                    });
                }
                Ok(FieldValue::Number((number as i64).into()))
            }

            FieldKind::Select(options) => options
                .iter()
                .find(|o| {
                    o.value == text
                        || o.short().eq_ignore_ascii_case(text)
                        || o.label.eq_ignore_ascii_case(text)
                })
                .map(|o| FieldValue::Text(o.value.to_string()))
                .ok_or_else(|| CatalogError::UnknownOption {
                    field: self.id,
                    value: raw.clone(),
                    options: options.iter().map(|o| o.short()).collect::<Vec<_>>().join(", "),
                }),

            FieldKind::Text => Ok(FieldValue::Text(raw)),

            FieldKind::Date => NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .map(|d| FieldValue::Text(d.format("%Y-%m-%d").to_string()))
                .map_err(|_| CatalogError::InvalidDate {
                    field: self.id,
                    value: raw.clone(),
                }),

            FieldKind::Time => NaiveTime::parse_from_str(text, "%H:%M")
                .map(|t| FieldValue::Text(t.format("%H:%M").to_string()))
                .map_err(|_| CatalogError::InvalidTime {
                    field: self.id,
                    value: raw.clone(),
                }),
        }
    }

    /// Short input hint, e.g. `0-3` or `great|good|okay`
    pub fn hint(&self) -> String {
        match self.kind {
            FieldKind::Slider { min, max, step: 1 } => format!("{}-{}", min, max),
            FieldKind::Slider { min, max, step } => format!("{}-{} step {}", min, max, step),
            FieldKind::Select(options) => options
                .iter()
                .map(|o| o.short())
                .collect::<Vec<_>>()
                .join("|"),
            FieldKind::Text => "text".to_string(),
            FieldKind::Date => "YYYY-MM-DD".to_string(),
            FieldKind::Time => "HH:MM".to_string(),
        }
    }
}

impl SubtypeDef {
    pub fn field(&self, id: &str) -> Option<&'static FieldDef> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// Check every value against this subtype and fill in its score
    ///
    /// A supplied value for the score field is ignored and recomputed.
    pub fn normalize_values(
        &self,
        values: BTreeMap<String, FieldValue>,
    ) -> Result<BTreeMap<String, FieldValue>, CatalogError> {
        let mut normalized = BTreeMap::new();

        for (id, value) in values {
            if self.score.is_some_and(|s| s.field == id) {
                continue;
            }
            let field = self.field(&id).ok_or_else(|| CatalogError::UnknownField {
                subtype: self.id,
                field: id.clone(),
            })?;
            normalized.insert(id, field.normalize(&value)?);
        }

        if let Some(score) = self.score {
            let total: i64 = score
                .sum_of
                .iter()
                .filter_map(|id| match normalized.get(*id) {
                    Some(FieldValue::Number(n)) => n.as_i64(),
                    _ => None,
                })
                .sum();
            normalized.insert(score.field.to_string(), FieldValue::Number(total.into()));
        }

        Ok(normalized)
    }
}

/// Everything that can be recorded
pub fn catalog() -> &'static [TypeDef] {
    &CATALOG
}

pub fn type_def(entry_type: EntryType) -> &'static TypeDef {
    match entry_type {
        EntryType::Symptom => &CATALOG[0],
        EntryType::Medication => &CATALOG[1],
        EntryType::Diary => &CATALOG[2],
        EntryType::TestResult => &CATALOG[3],
    }
}

pub fn find_subtype(entry_type: EntryType, id: &str) -> Option<&'static SubtypeDef> {
    type_def(entry_type).subtypes.iter().find(|s| s.id == id)
}

/// Look up a subtype, with an error naming the available ones
pub fn require_subtype(
    entry_type: EntryType,
    id: &str,
) -> Result<&'static SubtypeDef, CatalogError> {
    find_subtype(entry_type, id).ok_or_else(|| CatalogError::UnknownSubtype {
        entry_type,
        subtype: id.to_string(),
    })
}

macro_rules! slider {
    ($id:literal, $label:literal, $min:literal..=$max:literal) => {
        slider!($id, $label, $min..=$max, 1)
    };
    ($id:literal, $label:literal, $min:literal..=$max:literal, $step:literal) => {
        FieldDef {
            id: $id,
            label: $label,
            kind: FieldKind::Slider {
                min: $min,
                max: $max,
                step: $step,
            },
        }
    };
}

macro_rules! field {
    ($id:literal, $label:literal, $kind:expr) => {
        FieldDef {
            id: $id,
            label: $label,
            kind: $kind,
        }
    };
}

const DURATION_OPTIONS: &[SelectOption] = &[
    SelectOption {
        value: "duration_option_1",
        label: "Less than an hour",
    },
    SelectOption {
        value: "duration_option_2",
        label: "A few hours",
    },
    SelectOption {
        value: "duration_option_3",
        label: "All day",
    },
    SelectOption {
        value: "duration_option_4",
        label: "Several days",
    },
];

const MOOD_OPTIONS: &[SelectOption] = &[
    SelectOption {
        value: "mood_option_great",
        label: "Great",
    },
    SelectOption {
        value: "mood_option_good",
        label: "Good",
    },
    SelectOption {
        value: "mood_option_okay",
        label: "Okay",
    },
    SelectOption {
        value: "mood_option_bad",
        label: "Bad",
    },
    SelectOption {
        value: "mood_option_terrible",
        label: "Terrible",
    },
];

const SYMPTOM_SUBTYPES: &[SubtypeDef] = &[
    SubtypeDef {
        id: "urticaria_uas7",
        label: "Urticaria Activity Score (UAS7)",
        fields: &[
            slider!("itching_severity", "Itching severity", 0..=3),
            slider!("hives_extent", "Number of hives", 0..=3),
            slider!("activity_impairment", "Impact on daily activities", 0..=3),
        ],
        score: Some(ScoreDef {
            field: "uas_score",
            label: "Daily UAS",
            sum_of: &["itching_severity", "hives_extent"],
        }),
    },
    SubtypeDef {
        id: "pain_vas",
        label: "Pain (VAS)",
        fields: &[slider!("pain_score", "Pain score", 0..=10)],
        score: None,
    },
    SubtypeDef {
        id: "asthma_act",
        label: "Asthma Control Test (ACT)",
        fields: &[
            slider!("activity_limitation", "Activity limitation", 1..=5),
            slider!("shortness_of_breath", "Shortness of breath", 1..=5),
            slider!("night_awakenings", "Night awakenings", 1..=5),
            slider!("rescue_inhaler_use", "Rescue inhaler use", 1..=5),
            slider!("self_assessed_control", "Self-assessed control", 1..=5),
        ],
        score: None,
    },
    SubtypeDef {
        id: "anxiety_gad7",
        label: "Anxiety (GAD-7)",
        fields: &[
            slider!("nervous_anxious", "Feeling nervous or anxious", 0..=3),
            slider!("control_worry", "Unable to control worrying", 0..=3),
            slider!("excessive_worrying", "Worrying too much", 0..=3),
            slider!("trouble_relaxing", "Trouble relaxing", 0..=3),
            slider!("restlessness", "Restlessness", 0..=3),
            slider!("irritability", "Irritability", 0..=3),
            slider!("fear_something_bad", "Fear something awful might happen", 0..=3),
        ],
        score: None,
    },
    SubtypeDef {
        id: "headache_hit6",
        label: "Headache Impact (HIT-6)",
        fields: &[
            slider!("pain_intensity", "Pain intensity", 1..=5),
            slider!("social_limitations", "Social limitations", 1..=5),
            slider!("irritability", "Irritability", 1..=5),
            slider!("concentration_difficulty", "Difficulty concentrating", 1..=5),
            slider!("fatigue", "Fatigue", 1..=5),
            slider!("role_disruption", "Disruption of daily roles", 1..=5),
        ],
        score: None,
    },
    SubtypeDef {
        id: "depression_phq9",
        label: "Depression (PHQ-9)",
        fields: &[
            slider!("interest_pleasure", "Little interest or pleasure", 0..=3),
            slider!("feeling_down", "Feeling down or hopeless", 0..=3),
            slider!("sleep_issues", "Sleep problems", 0..=3),
            slider!("fatigue", "Tired or little energy", 0..=3),
            slider!("appetite_change", "Appetite changes", 0..=3),
            slider!("self_worth", "Feeling bad about yourself", 0..=3),
            slider!("concentration_difficulty", "Trouble concentrating", 0..=3),
            slider!("psychomotor_change", "Moving or speaking slowly or restlessly", 0..=3),
            slider!("suicidal_thoughts", "Thoughts of self-harm", 0..=3),
        ],
        score: None,
    },
    SubtypeDef {
        id: "ibd_ibsss",
        label: "IBS Severity Score (IBS-SSS)",
        fields: &[
            slider!("abdominal_pain_severity", "Abdominal pain severity", 0..=100, 10),
            slider!("abdominal_distension", "Abdominal distension", 0..=100, 10),
            slider!("bowel_habit_satisfaction", "Bowel habit satisfaction", 0..=100, 10),
            slider!("life_interference", "Interference with life", 0..=100, 10),
            slider!("abdominal_pain_days", "Days with abdominal pain (of 10)", 0..=10),
        ],
        score: None,
    },
    SubtypeDef {
        id: "dermatology_dlqi",
        label: "Dermatology Life Quality Index (DLQI)",
        fields: &[
            slider!("itch_soreness", "Itchy, sore or painful skin", 0..=3),
            slider!("embarrassment", "Embarrassment", 0..=3),
            slider!("daily_activity_limitations", "Limits on daily activities", 0..=3),
            slider!("social_work_interference", "Interference with work or social life", 0..=3),
            slider!("treatment_difficulty", "Problems from treatment", 0..=3),
        ],
        score: None,
    },
    SubtypeDef {
        id: "pain_symptom",
        label: "Pain & Stiffness",
        fields: &[
            slider!("pain_score", "Pain score", 0..=10),
            slider!("stiffness_duration", "Morning stiffness", 1..=10),
            slider!("fatigue", "Fatigue", 0..=5),
            slider!("mobility_function", "Mobility and function", 0..=5),
        ],
        score: None,
    },
    SubtypeDef {
        id: "generic_symptom",
        label: "Other Symptom",
        fields: &[
            field!("symptom_name", "Symptom", FieldKind::Text),
            slider!("severity", "Severity", 1..=10),
            field!("duration", "Duration", FieldKind::Select(DURATION_OPTIONS)),
        ],
        score: None,
    },
];

const MEDICATION_SUBTYPES: &[SubtypeDef] = &[SubtypeDef {
    id: "standard_medication",
    label: "Medication",
    fields: &[
        field!("medication_name", "Medication", FieldKind::Text),
        field!("dosage", "Dosage", FieldKind::Text),
        field!("time_taken", "Time taken", FieldKind::Time),
        field!("reason", "Reason for taking", FieldKind::Text),
    ],
    score: None,
}];

const DIARY_SUBTYPES: &[SubtypeDef] = &[SubtypeDef {
    id: "diary_note",
    label: "Diary Note",
    fields: &[
        field!("title", "Title", FieldKind::Text),
        field!("mood", "Mood", FieldKind::Select(MOOD_OPTIONS)),
        slider!("energy_level", "Energy level", 1..=10),
    ],
    score: None,
}];

const TEST_RESULT_SUBTYPES: &[SubtypeDef] = &[SubtypeDef {
    id: "lab_test",
    label: "Lab Test",
    fields: &[
        field!("test_name", "Test", FieldKind::Text),
        field!("result", "Result", FieldKind::Text),
        field!("result_value", "Value", FieldKind::Text),
        field!("test_date", "Test date", FieldKind::Date),
    ],
    score: None,
}];

/// Indexed by [`type_def`]; keep the order of [`EntryType::all`]
static CATALOG: [TypeDef; 4] = [
    TypeDef {
        entry_type: EntryType::Symptom,
        description: "Symptom scores on validated questionnaires",
        subtypes: SYMPTOM_SUBTYPES,
    },
    TypeDef {
        entry_type: EntryType::Medication,
        description: "Medications taken",
        subtypes: MEDICATION_SUBTYPES,
    },
    TypeDef {
        entry_type: EntryType::Diary,
        description: "Free-form diary notes",
        subtypes: DIARY_SUBTYPES,
    },
    TypeDef {
        entry_type: EntryType::TestResult,
        description: "Lab and test results",
        subtypes: TEST_RESULT_SUBTYPES,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> BTreeMap<String, FieldValue> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), FieldValue::Text(v.to_string())))
            .collect()
    }

    fn subtype(entry_type: EntryType, id: &str) -> &'static SubtypeDef {
        find_subtype(entry_type, id).unwrap()
    }

    #[test]
    fn test_catalog_follows_entry_type_order() {
        for (def, entry_type) in catalog().iter().zip(EntryType::all()) {
            assert_eq!(def.entry_type, entry_type);
            assert_eq!(type_def(entry_type), def);
            assert!(!def.subtypes.is_empty());
        }
    }

    #[test]
    fn test_field_ids_unique_per_subtype() {
        for def in catalog() {
            for sub in def.subtypes {
                let mut ids: Vec<&str> = sub.fields.iter().map(|f| f.id).collect();
                ids.sort_unstable();
                ids.dedup();
                assert_eq!(ids.len(), sub.fields.len(), "{}", sub.id);
            }
        }
    }

    #[test]
    fn test_unknown_subtype() {
        let err = require_subtype(EntryType::Symptom, "mystery").unwrap_err();
        assert!(matches!(err, CatalogError::UnknownSubtype { .. }));
        assert!(err.to_string().contains("pain_vas"));

        // subtypes belong to one type only
        assert!(find_subtype(EntryType::Diary, "pain_vas").is_none());
    }

    #[test]
    fn test_slider_bounds_and_steps() {
        let pain = subtype(EntryType::Symptom, "pain_vas");

        let ok = pain.normalize_values(values(&[("pain_score", "7")])).unwrap();
        assert_eq!(ok["pain_score"], FieldValue::Number(7.into()));

        assert_eq!(
            pain.normalize_values(values(&[("pain_score", "11")])),
            Err(CatalogError::OutOfRange {
                field: "pain_score",
                value: "11".into(),
                min: 0,
                max: 10,
            })
        );
        assert!(matches!(
            pain.normalize_values(values(&[("pain_score", "high")])),
            Err(CatalogError::NotANumber { .. })
        ));
        assert!(matches!(
            pain.normalize_values(values(&[("pain_score", "2.5")])),
            Err(CatalogError::OffStep { .. })
        ));

        let ibs = subtype(EntryType::Symptom, "ibd_ibsss");
        assert!(ibs
            .normalize_values(values(&[("abdominal_pain_severity", "70")]))
            .is_ok());
        assert!(matches!(
            ibs.normalize_values(values(&[("abdominal_pain_severity", "75")])),
            Err(CatalogError::OffStep { step: 10, .. })
        ));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let pain = subtype(EntryType::Symptom, "pain_vas");
        assert_eq!(
            pain.normalize_values(values(&[("score", "3")])),
            Err(CatalogError::UnknownField {
                subtype: "pain_vas",
                field: "score".into(),
            })
        );
    }

    #[test]
    fn test_uas7_score_is_itching_plus_hives() {
        let uas = subtype(EntryType::Symptom, "urticaria_uas7");

        let scored = uas
            .normalize_values(values(&[
                ("itching_severity", "2"),
                ("hives_extent", "3"),
                ("activity_impairment", "1"),
                ("uas_score", "99"),
            ]))
            .unwrap();
        assert_eq!(scored["uas_score"], FieldValue::Number(5.into()));

        let partial = uas.normalize_values(values(&[("hives_extent", "1")])).unwrap();
        assert_eq!(partial["uas_score"], FieldValue::Number(1.into()));

        let empty = uas.normalize_values(BTreeMap::new()).unwrap();
        assert_eq!(empty["uas_score"], FieldValue::Number(0.into()));
    }

    #[test]
    fn test_select_accepts_value_short_form_or_label() {
        let diary = subtype(EntryType::Diary, "diary_note");
        for input in ["mood_option_good", "good", "GOOD"] {
            let normalized = diary.normalize_values(values(&[("mood", input)])).unwrap();
            assert_eq!(normalized["mood"], FieldValue::Text("mood_option_good".into()));
        }

        let err = diary
            .normalize_values(values(&[("mood", "ecstatic")]))
            .unwrap_err();
        assert!(err.to_string().contains("great, good, okay, bad, terrible"));

        let generic = subtype(EntryType::Symptom, "generic_symptom");
        let normalized = generic
            .normalize_values(BTreeMap::from([(
                "duration".to_string(),
                FieldValue::Number(2.into()),
            )]))
            .unwrap();
        assert_eq!(normalized["duration"], FieldValue::Text("duration_option_2".into()));
    }

    #[test]
    fn test_text_date_and_time_fields() {
        let lab = subtype(EntryType::TestResult, "lab_test");
        let normalized = lab
            .normalize_values(BTreeMap::from([
                ("result_value".to_string(), FieldValue::Number(5.into())),
                ("test_date".to_string(), FieldValue::Text("2024-06-01".into())),
            ]))
            .unwrap();
        assert_eq!(normalized["result_value"], FieldValue::Text("5".into()));
        assert_eq!(normalized["test_date"], FieldValue::Text("2024-06-01".into()));
        assert!(matches!(
            lab.normalize_values(values(&[("test_date", "June 1st")])),
            Err(CatalogError::InvalidDate { .. })
        ));

        let med = subtype(EntryType::Medication, "standard_medication");
        assert!(med.normalize_values(values(&[("time_taken", "08:30")])).is_ok());
        assert!(matches!(
            med.normalize_values(values(&[("time_taken", "25:00")])),
            Err(CatalogError::InvalidTime { .. })
        ));
    }

    #[test]
    fn test_normalized_values_normalize_again_unchanged() {
        let uas = subtype(EntryType::Symptom, "urticaria_uas7");
        let once = uas
            .normalize_values(values(&[("itching_severity", "1"), ("hives_extent", "2")]))
            .unwrap();
        assert_eq!(uas.normalize_values(once.clone()).unwrap(), once);
    }

    #[test]
    fn test_hints() {
        let ibs = subtype(EntryType::Symptom, "ibd_ibsss");
        assert_eq!(ibs.fields[0].hint(), "0-100 step 10");
        assert_eq!(subtype(EntryType::Symptom, "pain_vas").fields[0].hint(), "0-10");
        assert_eq!(
            subtype(EntryType::Diary, "diary_note").field("mood").unwrap().hint(),
            "great|good|okay|bad|terrible"
        );
    }
}
