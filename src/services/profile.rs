//! Profile service
//!
//! Reads fall back to a fresh default profile when none is stored, so
//! callers always get a profile to show or edit.

use serde_json::{Map, Value};
use tracing::info;

use crate::config::Settings;
use crate::error::{SymlogError, SymlogResult};
use crate::models::{Profile, UnitSystem};
use crate::storage::{ProfileRepository, Store};

const NOT_SET: &str = "Not set";

/// Display-ready summary of the profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSummary {
    pub name: String,
    pub age: String,
    pub weight: String,
    pub height: String,
    pub conditions: String,
    pub doctor: String,
}

/// Service for the user profile
pub struct ProfileService<'a> {
    profiles: ProfileRepository<'a>,
    language: String,
    unit_system: UnitSystem,
}

impl<'a> ProfileService<'a> {
    /// New profiles take their language and unit system from `settings`
    pub fn new(store: &'a dyn Store, settings: &Settings) -> Self {
        Self {
            profiles: ProfileRepository::new(store),
            language: settings.language.clone(),
            unit_system: settings.unit_system,
        }
    }

    /// A fresh, unsaved profile
    pub fn default_profile(&self) -> Profile {
        Profile::new(self.language.clone(), self.unit_system)
    }

    /// The stored profile, or a default one if none exists
    pub fn get(&self) -> SymlogResult<Profile> {
        Ok(self
            .profiles
            .get()?
            .unwrap_or_else(|| self.default_profile()))
    }

    /// Validate and store the profile, refreshing `updated_at`
    pub fn save(&self, mut profile: Profile) -> SymlogResult<Profile> {
        profile
            .validate()
            .map_err(|e| SymlogError::Validation(e.to_string()))?;
        profile.updated_at = chrono::Utc::now();

        self.profiles.save(&profile)?;
        info!("profile saved");
        Ok(profile)
    }

    /// Set one field by dotted path, e.g. `personal_info.name`
    ///
    /// Missing intermediate objects are created. The result must still be a
    /// valid profile.
    pub fn update_field(&self, path: &str, value: Value) -> SymlogResult<Profile> {
        let keys: Vec<&str> = path.split('.').map(str::trim).collect();
        if keys.iter().any(|k| k.is_empty()) {
            return Err(SymlogError::Validation(format!(
                "Invalid field path: '{}'",
                path
            )));
        }
        if keys[0] == "id" {
            return Err(SymlogError::Validation("The profile id cannot be changed".into()));
        }

        let mut doc = serde_json::to_value(self.get()?)?;
        set_path(&mut doc, &keys, value);

        let profile: Profile = serde_json::from_value(doc).map_err(|e| {
            SymlogError::Validation(format!("Invalid value for '{}': {}", path, e))
        })?;

        self.save(profile)
    }

    /// Remove the stored profile and return a default one
    pub fn reset(&self) -> SymlogResult<Profile> {
        self.profiles.remove()?;
        info!("profile reset");
        Ok(self.default_profile())
    }

    pub fn is_empty(&self) -> SymlogResult<bool> {
        Ok(self.get()?.is_empty())
    }

    pub fn summary(&self) -> SymlogResult<ProfileSummary> {
        let profile = self.get()?;
        let personal = &profile.personal_info;
        let medical = &profile.medical_info;

        Ok(ProfileSummary {
            name: or_not_set(&personal.name),
            age: personal
                .age
                .filter(|a| *a > 0)
                .map_or_else(|| NOT_SET.to_string(), |a| a.to_string()),
            weight: personal.weight.to_string(),
            height: personal.height.to_string(),
            conditions: if medical.conditions.is_empty() {
                "None".to_string()
            } else {
                medical.conditions.join(", ")
            },
            doctor: or_not_set(&medical.doctor_name),
        })
    }

    /// The profile as pretty JSON
    pub fn export_json(&self) -> SymlogResult<String> {
        Ok(serde_json::to_string_pretty(&self.get()?)?)
    }
}

/// Parse a command-line value: valid JSON is taken as JSON, anything else as
/// a plain string
pub fn parse_field_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn set_path(doc: &mut Value, keys: &[&str], value: Value) {
    let Some((last, parents)) = keys.split_last() else {
        return;
    };

    let mut current = doc;
    for key in parents {
        if !current.is_object() {
            *current = Value::Object(Map::new());
        }
        let Some(map) = current.as_object_mut() else {
            return;
        };
        current = map
            .entry(key.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
    }

    if !current.is_object() {
        *current = Value::Object(Map::new());
    }
    if let Some(map) = current.as_object_mut() {
        map.insert(last.to_string(), value);
    }
}

fn or_not_set(s: &str) -> String {
    if s.trim().is_empty() {
        NOT_SET.to_string()
    } else {
        s.to_string()
    }
}
