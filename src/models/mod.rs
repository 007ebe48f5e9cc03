//! Core data models for SymLog
//!
//! Diary entries, the catalog of what they can record, and the user
//! profile.

pub mod entry;
pub mod entry_types;
pub mod ids;
pub mod profile;

pub use entry::{parse_tags, Entry, EntryType, EntryValidationError, FieldValue};
pub use entry_types::{
    catalog, find_subtype, require_subtype, type_def, CatalogError, FieldDef, FieldKind,
    ScoreDef, SelectOption, SubtypeDef, TypeDef,
};
pub use ids::EntryId;
pub use profile::{
    ContactInfo, Measurement, MedicalInfo, PersonalInfo, Preferences, Profile,
    ProfileValidationError, UnitSystem,
};
