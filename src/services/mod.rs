//! Service layer for SymLog
//!
//! The service layer provides business logic on top of the storage layer:
//! validation, id assignment, querying and profile editing.

pub mod data;
pub mod entry;
pub mod profile;

pub use data::{overview, wipe_all, DataOverview};
pub use entry::{
    group_by_date, paginate, sort_entries, EntryQuery, EntryService, EntryUpdate, NewEntry, Page,
    SortOrder,
};
pub use profile::{parse_field_value, ProfileService, ProfileSummary};
