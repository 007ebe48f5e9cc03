//! Profile model
//!
//! The single per-installation record of personal, medical and contact
//! information. Every group tolerates missing fields so partially filled or
//! older profiles still load.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fixed id of the one profile
pub const PROFILE_ID: &str = "profile";

/// Measurement unit system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "metric" => Some(Self::Metric),
            "imperial" => Some(Self::Imperial),
            _ => None,
        }
    }

    pub fn weight_unit(&self) -> &'static str {
        match self {
            Self::Metric => "kg",
            Self::Imperial => "lb",
        }
    }

    pub fn height_unit(&self) -> &'static str {
        match self {
            Self::Metric => "cm",
            Self::Imperial => "in",
        }
    }
}

/// A value with its unit, e.g. weight or height
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub unit: String,
}

impl Measurement {
    pub fn empty(unit: &str) -> Self {
        Self {
            value: None,
            unit: unit.to_string(),
        }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Some(v) => write!(f, "{} {}", v, self.unit),
            None => write!(f, "Not set"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalInfo {
    pub name: String,
    pub age: Option<u32>,
    pub gender: String,
    pub weight: Measurement,
    pub height: Measurement,
    pub blood_type: String,
}

impl Default for PersonalInfo {
    fn default() -> Self {
        Self {
            name: String::new(),
            age: None,
            gender: String::new(),
            weight: Measurement::empty("kg"),
            height: Measurement::empty("cm"),
            blood_type: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MedicalInfo {
    pub conditions: Vec<String>,
    pub allergies: Vec<String>,
    pub doctor_name: String,
    pub doctor_email: String,
    pub diagnosis: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ContactInfo {
    pub emergency_contact_name: String,
    pub emergency_contact_phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub language: String,
    pub unit_system: UnitSystem,
    pub privacy_mode: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            unit_system: UnitSystem::Metric,
            privacy_mode: true,
        }
    }
}

/// Validation errors for profiles
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileValidationError {
    AgeOutOfRange(u32),
    NonPositiveMeasurement(&'static str),
    InvalidDoctorEmail(String),
}

impl fmt::Display for ProfileValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AgeOutOfRange(age) => write!(f, "Age out of range: {}", age),
            Self::NonPositiveMeasurement(what) => write!(f, "{} must be greater than zero", what),
            Self::InvalidDoctorEmail(email) => write!(f, "Invalid doctor email: {}", email),
        }
    }
}

impl std::error::Error for ProfileValidationError {}

/// The user's profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default = "default_profile_id")]
    pub id: String,

    #[serde(default)]
    pub personal_info: PersonalInfo,

    #[serde(default)]
    pub medical_info: MedicalInfo,

    #[serde(default)]
    pub contact_info: ContactInfo,

    #[serde(default)]
    pub preferences: Preferences,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

fn default_profile_id() -> String {
    PROFILE_ID.to_string()
}

impl Profile {
    /// Create an empty profile with the given preferences
    ///
    /// Weight and height units follow the unit system.
    pub fn new(language: impl Into<String>, unit_system: UnitSystem) -> Self {
        let now = Utc::now();
        Self {
            id: default_profile_id(),
            personal_info: PersonalInfo {
                weight: Measurement::empty(unit_system.weight_unit()),
                height: Measurement::empty(unit_system.height_unit()),
                ..PersonalInfo::default()
            },
            medical_info: MedicalInfo::default(),
            contact_info: ContactInfo::default(),
            preferences: Preferences {
                language: language.into(),
                unit_system,
                privacy_mode: true,
            },
            created_at: now,
            updated_at: now,
        }
    }

    /// True when nothing identifying has been filled in yet
    pub fn is_empty(&self) -> bool {
        self.personal_info.name.trim().is_empty()
            && self.personal_info.age.map_or(true, |a| a == 0)
            && self.medical_info.doctor_name.trim().is_empty()
            && self.medical_info.conditions.is_empty()
    }

    pub fn validate(&self) -> Result<(), ProfileValidationError> {
        if let Some(age) = self.personal_info.age {
            if age > 150 {
                return Err(ProfileValidationError::AgeOutOfRange(age));
            }
        }

        if matches!(self.personal_info.weight.value, Some(v) if v <= 0.0) {
            return Err(ProfileValidationError::NonPositiveMeasurement("Weight"));
        }
        if matches!(self.personal_info.height.value, Some(v) if v <= 0.0) {
            return Err(ProfileValidationError::NonPositiveMeasurement("Height"));
        }

        let email = self.medical_info.doctor_email.trim();
        if !email.is_empty() && !looks_like_email(email) {
            return Err(ProfileValidationError::InvalidDoctorEmail(email.to_string()));
        }

        Ok(())
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self::new("en", UnitSystem::Metric)
    }
}

fn looks_like_email(s: &str) -> bool {
    match s.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.ends_with('.'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile() {
        let profile = Profile::default();
        assert_eq!(profile.id, "profile");
        assert_eq!(profile.personal_info.weight.unit, "kg");
        assert_eq!(profile.personal_info.height.unit, "cm");
        assert!(profile.preferences.privacy_mode);
        assert!(profile.is_empty());
    }

    #[test]
    fn test_imperial_units() {
        let profile = Profile::new("en", UnitSystem::Imperial);
        assert_eq!(profile.personal_info.weight.unit, "lb");
        assert_eq!(profile.personal_info.height.unit, "in");
    }

    #[test]
    fn test_partial_json_loads() {
        let json = r#"{"personal_info": {"name": "Ada"}, "medical_info": {"conditions": ["asthma"]}}"#;
        let profile: Profile = serde_json::from_str(json).unwrap();

        assert_eq!(profile.personal_info.name, "Ada");
        assert_eq!(profile.personal_info.weight.unit, "kg");
        assert_eq!(profile.medical_info.conditions, vec!["asthma"]);
        assert!(!profile.is_empty());
    }

    #[test]
    fn test_validation() {
        let mut profile = Profile::default();
        assert!(profile.validate().is_ok());

        profile.personal_info.age = Some(200);
        assert_eq!(
            profile.validate(),
            Err(ProfileValidationError::AgeOutOfRange(200))
        );

        profile.personal_info.age = Some(40);
        profile.personal_info.weight.value = Some(-1.0);
        assert!(profile.validate().is_err());

        profile.personal_info.weight.value = Some(70.0);
        profile.medical_info.doctor_email = "not-an-email".into();
        assert!(matches!(
            profile.validate(),
            Err(ProfileValidationError::InvalidDoctorEmail(_))
        ));

        profile.medical_info.doctor_email = "dr@clinic.example".into();
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn test_measurement_display() {
        assert_eq!(Measurement::empty("kg").to_string(), "Not set");
        let m = Measurement {
            value: Some(72.5),
            unit: "kg".into(),
        };
        assert_eq!(m.to_string(), "72.5 kg");
    }
}
