//! Entry CLI commands
//!
//! Implements CLI commands for diary entries.

use std::collections::BTreeMap;

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{
    format_entries_grouped, format_entry_details, format_entry_page, format_entry_types,
};
use crate::error::{SymlogError, SymlogResult};
use crate::models::entry::parse_tags;
use crate::models::{catalog, type_def, EntryId, EntryType, FieldValue};
use crate::services::{EntryQuery, EntryService, EntryUpdate, NewEntry, SortOrder};
use crate::storage::Store;

use super::{parse_date, parse_date_or_today};

/// Entry subcommands
#[derive(Subcommand)]
pub enum EntryCommands {
    /// Record a new entry
    Add {
        /// Entry type (symptom, medication, diary, test_result)
        entry_type: String,
        /// Subtype id (e.g., "pain_vas"); see `symlog entry types`
        subtype: String,
        /// Entry date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Field value as key=value (repeatable)
        #[arg(short, long = "value", value_name = "KEY=VALUE")]
        values: Vec<String>,
        /// Free-text notes
        #[arg(short, long)]
        notes: Option<String>,
        /// Comma-separated tags
        #[arg(short, long)]
        tags: Option<String>,
    },

    /// List entries
    List {
        /// Filter by entry type ("all" for every type)
        #[arg(short = 'T', long = "type")]
        entry_type: Option<String>,
        /// Search notes, tags and labels
        #[arg(short, long)]
        search: Option<String>,
        /// Sort order by date (desc, asc)
        #[arg(long, default_value = "desc")]
        sort: String,
        /// Page number
        #[arg(short, long, default_value = "1")]
        page: usize,
        /// Entries per page (defaults to the configured page size)
        #[arg(long)]
        per_page: Option<usize>,
        /// Group entries by date instead of a table
        #[arg(short, long)]
        grouped: bool,
    },

    /// Show entry details
    Show {
        /// Entry ID
        id: String,
    },

    /// Edit an entry
    Edit {
        /// Entry ID
        id: String,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// Set a field value as key=value (repeatable)
        #[arg(short, long = "value", value_name = "KEY=VALUE")]
        values: Vec<String>,
        /// Remove a field (repeatable)
        #[arg(long = "unset", value_name = "KEY")]
        unset: Vec<String>,
        /// New notes
        #[arg(short, long)]
        notes: Option<String>,
        /// New comma-separated tags (replaces existing tags)
        #[arg(short, long)]
        tags: Option<String>,
    },

    /// Delete an entry
    Delete {
        /// Entry ID
        id: String,
    },

    /// List the entry types, their subtypes and fields
    Types {
        /// Only this entry type
        entry_type: Option<String>,
    },
}

/// Handle an entry command
pub fn handle_entry_command(
    store: &dyn Store,
    settings: &Settings,
    cmd: EntryCommands,
) -> SymlogResult<()> {
    let service = EntryService::new(store);

    match cmd {
        EntryCommands::Add {
            entry_type,
            subtype,
            date,
            values,
            notes,
            tags,
        } => {
            let entry_type = parse_entry_type(&entry_type)?;
            let date = parse_date_or_today(date.as_deref())?;

            let mut input = NewEntry::new(entry_type, subtype, date);
            input.values = parse_values(&values)?;
            input.notes = notes.unwrap_or_default();
            input.tags = tags.as_deref().map(parse_tags).unwrap_or_default();

            let entry = service.create(input)?;
            println!("Recorded {}: {}", entry.entry_type, entry.display_label());
            println!("  ID: {}", entry.id);
            println!("  Date: {}", entry.date);
        }

        EntryCommands::List {
            entry_type,
            search,
            sort,
            page,
            per_page,
            grouped,
        } => {
            let entry_type = match entry_type.as_deref() {
                None => None,
                Some(t) if t.eq_ignore_ascii_case("all") => None,
                Some(t) => Some(parse_entry_type(t)?),
            };
            let order = SortOrder::parse(&sort).ok_or_else(|| {
                SymlogError::Validation(format!("Invalid sort order: '{}'. Use asc or desc", sort))
            })?;

            let query = EntryQuery {
                entry_type,
                search,
                order,
                page,
                per_page: per_page.unwrap_or(settings.entries_per_page),
            };

            if grouped {
                println!("{}", format_entries_grouped(&service.filter(&query)?));
            } else {
                println!("{}", format_entry_page(&service.list(&query)?));
            }
        }

        EntryCommands::Show { id } => {
            let entry = service.get_required(parse_entry_id(&id)?)?;
            print!("{}", format_entry_details(&entry));
        }

        EntryCommands::Edit {
            id,
            date,
            values,
            unset,
            notes,
            tags,
        } => {
            let id = parse_entry_id(&id)?;
            let changes = EntryUpdate {
                date: date.as_deref().map(parse_date).transpose()?,
                values: parse_values(&values)?,
                remove_values: unset,
                notes,
                tags: tags.as_deref().map(parse_tags),
            };

            let entry = service.update(id, changes)?;
            println!("Updated entry {}", entry.id);
            print!("{}", format_entry_details(&entry));
        }

        EntryCommands::Delete { id } => {
            let id = parse_entry_id(&id)?;
            service.delete(id)?;
            println!("Deleted entry {}", id);
        }

        EntryCommands::Types { entry_type } => {
            let types = match entry_type.as_deref() {
                None => catalog().iter().collect::<Vec<_>>(),
                Some(t) if t.eq_ignore_ascii_case("all") => catalog().iter().collect(),
                Some(t) => vec![type_def(parse_entry_type(t)?)],
            };
            print!("{}", format_entry_types(&types));
        }
    }

    Ok(())
}

fn parse_entry_type(s: &str) -> SymlogResult<EntryType> {
    EntryType::parse(s).ok_or_else(|| {
        SymlogError::Validation(format!(
            "Invalid entry type: '{}'. Use symptom, medication, diary or test_result",
            s
        ))
    })
}

fn parse_entry_id(s: &str) -> SymlogResult<EntryId> {
    s.parse()
        .map_err(|_| SymlogError::Validation(format!("Invalid entry ID: '{}'", s)))
}

/// Parse repeated `key=value` arguments
///
/// Values stay text here; the subtype's fields decide their stored form.
fn parse_values(raw: &[String]) -> SymlogResult<BTreeMap<String, FieldValue>> {
    raw.iter()
        .map(|pair| {
            let (key, value) = pair.split_once('=').ok_or_else(|| {
                SymlogError::Validation(format!("Invalid value '{}'. Use KEY=VALUE", pair))
            })?;
            let key = key.trim();
            if key.is_empty() {
                return Err(SymlogError::Validation(format!(
                    "Invalid value '{}'. Field id is empty",
                    pair
                )));
            }
            Ok((key.to_string(), FieldValue::Text(value.to_string())))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_values() {
        let values = parse_values(&["pain_score=7".into(), "title = left knee".into()]).unwrap();
        assert_eq!(values["pain_score"], FieldValue::Text("7".into()));
        assert_eq!(values["title"], FieldValue::Text(" left knee".into()));

        assert!(parse_values(&["novalue".into()]).is_err());
        assert!(parse_values(&["=5".into()]).is_err());
    }

    #[test]
    fn test_parse_entry_id() {
        assert_eq!(
            parse_entry_id("1718000000000").unwrap(),
            EntryId::from_raw(1_718_000_000_000)
        );
        assert!(parse_entry_id("abc").unwrap_err().is_validation());
    }
}
