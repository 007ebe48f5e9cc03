//! Entry service
//!
//! Provides business logic for diary entries: creation with id assignment,
//! in-place edits, and the filtered, sorted, paginated listing the CLI shows.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};
use tracing::info;

use crate::error::{SymlogError, SymlogResult};
use crate::models::{require_subtype, CatalogError, Entry, EntryId, EntryType, FieldValue};
use crate::storage::{EntryRepository, Store};

/// Date ordering for listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Newest first
    #[default]
    Descending,
    Ascending,
}

impl SortOrder {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "desc" | "descending" | "newest" => Some(Self::Descending),
            "asc" | "ascending" | "oldest" => Some(Self::Ascending),
            _ => None,
        }
    }
}

/// Filter, sort and page selection for [`EntryService::list`]
#[derive(Debug, Clone)]
pub struct EntryQuery {
    /// `None` means all types
    pub entry_type: Option<EntryType>,
    /// Case-insensitive term matched against notes, tags and subtype label
    pub search: Option<String>,
    pub order: SortOrder,
    /// 1-based
    pub page: usize,
    pub per_page: usize,
}

impl Default for EntryQuery {
    fn default() -> Self {
        Self {
            entry_type: None,
            search: None,
            order: SortOrder::default(),
            page: 1,
            per_page: 10,
        }
    }
}

/// One page of results
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// The page actually returned, after clamping
    pub page: usize,
    /// Always at least 1
    pub total_pages: usize,
    /// Matches across all pages
    pub total: usize,
}

/// Input for creating an entry
#[derive(Debug, Clone)]
pub struct NewEntry {
    pub entry_type: EntryType,
    /// Must name a subtype of `entry_type` in the catalog
    pub subtype_id: String,
    pub date: NaiveDate,
    pub values: BTreeMap<String, FieldValue>,
    pub notes: String,
    pub tags: Vec<String>,
}

impl NewEntry {
    pub fn new(entry_type: EntryType, subtype_id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            entry_type,
            subtype_id: subtype_id.into(),
            date,
            values: BTreeMap::new(),
            notes: String::new(),
            tags: Vec::new(),
        }
    }
}

/// Changes applied by [`EntryService::update`]; `None` leaves a field as is
#[derive(Debug, Clone, Default)]
pub struct EntryUpdate {
    pub date: Option<NaiveDate>,
    /// Merged into the existing values
    pub values: BTreeMap<String, FieldValue>,
    /// Field ids to drop
    pub remove_values: Vec<String>,
    pub notes: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Service for entry management
pub struct EntryService<'a> {
    entries: EntryRepository<'a>,
}

impl<'a> EntryService<'a> {
    pub fn new(store: &'a dyn Store) -> Self {
        Self {
            entries: EntryRepository::new(store),
        }
    }

    /// Create a new entry
    ///
    /// Values are checked against the subtype's fields, and the label and any
    /// computed score come from the catalog.
    pub fn create(&self, input: NewEntry) -> SymlogResult<Entry> {
        let subtype =
            require_subtype(input.entry_type, input.subtype_id.trim()).map_err(invalid)?;
        let values = subtype.normalize_values(input.values).map_err(invalid)?;

        let id = EntryId::next(Utc::now(), self.entries.latest_id()?);
        let mut entry = Entry::new(id, input.entry_type, subtype.id, input.date);
        entry.subtype_label = subtype.label.to_string();
        entry.values = values;
        entry.notes = input.notes;
        entry.tags = clean_tags(input.tags);

        entry
            .validate()
            .map_err(|e| SymlogError::Validation(e.to_string()))?;

        self.entries.upsert(entry.clone())?;
        info!(id = %entry.id, entry_type = entry.entry_type.as_str(), "entry created");

        Ok(entry)
    }

    /// Edit an entry in place; id and creation time are kept
    pub fn update(&self, id: EntryId, changes: EntryUpdate) -> SymlogResult<Entry> {
        let mut entry = self.get_required(id)?;
        let subtype = require_subtype(entry.entry_type, &entry.subtype_id).map_err(invalid)?;

        if let Some(date) = changes.date {
            entry.date = date;
        }
        for field in &changes.remove_values {
            entry.values.remove(field);
        }
        entry.values.extend(changes.values);
        entry.values = subtype
            .normalize_values(std::mem::take(&mut entry.values))
            .map_err(invalid)?;
        entry.subtype_label = subtype.label.to_string();
        if let Some(notes) = changes.notes {
            entry.notes = notes;
        }
        if let Some(tags) = changes.tags {
            entry.tags = clean_tags(tags);
        }

        entry
            .validate()
            .map_err(|e| SymlogError::Validation(e.to_string()))?;
        entry.touch();

        self.entries.upsert(entry.clone())?;
        info!(id = %entry.id, "entry updated");

        Ok(entry)
    }

    pub fn delete(&self, id: EntryId) -> SymlogResult<()> {
        if !self.entries.delete(id)? {
            return Err(SymlogError::entry_not_found(id.to_string()));
        }
        info!(%id, "entry deleted");
        Ok(())
    }

    pub fn get(&self, id: EntryId) -> SymlogResult<Option<Entry>> {
        self.entries.get(id)
    }

    /// Get an entry, or `NotFound`
    pub fn get_required(&self, id: EntryId) -> SymlogResult<Entry> {
        self.entries
            .get(id)?
            .ok_or_else(|| SymlogError::entry_not_found(id.to_string()))
    }

    /// All entries in stored order
    pub fn all(&self) -> SymlogResult<Vec<Entry>> {
        self.entries.get_all()
    }

    /// Filtered and sorted entries, unpaginated
    pub fn filter(&self, query: &EntryQuery) -> SymlogResult<Vec<Entry>> {
        let mut matches: Vec<Entry> = self
            .entries
            .get_all()?
            .into_iter()
            .filter(|e| query.entry_type.map_or(true, |t| e.entry_type == t))
            .filter(|e| query.search.as_deref().map_or(true, |s| e.matches_search(s)))
            .collect();

        sort_entries(&mut matches, query.order);
        Ok(matches)
    }

    /// One page of the filtered, sorted entries
    pub fn list(&self, query: &EntryQuery) -> SymlogResult<Page<Entry>> {
        Ok(paginate(self.filter(query)?, query.page, query.per_page))
    }
}

/// Sort by date, ties broken by id in the same direction
pub fn sort_entries(entries: &mut [Entry], order: SortOrder) {
    entries.sort_by(|a, b| {
        let ord = a.date.cmp(&b.date).then(a.id.cmp(&b.id));
        match order {
            SortOrder::Ascending => ord,
            SortOrder::Descending => ord.reverse(),
        }
    });
}

/// Group entries by date, keeping the order they arrive in
///
/// Expects input already sorted by date; dates then appear in that order.
pub fn group_by_date(entries: &[Entry]) -> Vec<(NaiveDate, Vec<&Entry>)> {
    let mut groups: Vec<(NaiveDate, Vec<&Entry>)> = Vec::new();
    for entry in entries {
        match groups.last_mut() {
            Some((date, group)) if *date == entry.date => group.push(entry),
            _ => groups.push((entry.date, vec![entry])),
        }
    }
    groups
}

/// Slice out a 1-based page; out-of-range pages are clamped
pub fn paginate<T>(items: Vec<T>, page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let total = items.len();
    let total_pages = total.div_ceil(per_page).max(1);
    let page = page.clamp(1, total_pages);

    let items = items
        .into_iter()
        .skip((page - 1) * per_page)
        .take(per_page)
        .collect();

    Page {
        items,
        page,
        total_pages,
        total,
    }
}

fn invalid(e: CatalogError) -> SymlogError {
    SymlogError::Validation(e.to_string())
}

fn clean_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}
