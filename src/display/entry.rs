//! Entry display formatting
//!
//! Formats entries for terminal output as a table, grouped by date, or as a
//! detail view.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{find_subtype, Entry, FieldKind, FieldValue, SubtypeDef};
use crate::services::{group_by_date, Page};

const NOTES_WIDTH: usize = 40;

#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Type")]
    entry_type: String,
    #[tabled(rename = "Entry")]
    label: String,
    #[tabled(rename = "Values")]
    values: String,
    #[tabled(rename = "Notes")]
    notes: String,
}

impl From<&Entry> for EntryRow {
    fn from(entry: &Entry) -> Self {
        Self {
            id: entry.id.to_string(),
            date: entry.date.format("%Y-%m-%d").to_string(),
            entry_type: entry.entry_type.to_string(),
            label: entry.display_label(),
            values: format_values_inline(entry),
            notes: truncate(&entry.notes, NOTES_WIDTH),
        }
    }
}

/// Format entries as a table
pub fn format_entry_table(entries: &[Entry]) -> String {
    if entries.is_empty() {
        return "No entries found.".to_string();
    }

    let mut table = Table::new(entries.iter().map(EntryRow::from));
    table.with(Style::psql());
    table.to_string()
}

/// Format one page of entries with a page footer
pub fn format_entry_page(page: &Page<Entry>) -> String {
    let mut output = format_entry_table(&page.items);
    if page.total > 0 {
        output.push_str(&format!(
            "\n\nPage {} of {} ({} entr{})",
            page.page,
            page.total_pages,
            page.total,
            if page.total == 1 { "y" } else { "ies" }
        ));
    }
    output
}

/// Format entries under one heading per date
pub fn format_entries_grouped(entries: &[Entry]) -> String {
    if entries.is_empty() {
        return "No entries found.".to_string();
    }

    let mut output = String::new();
    for (date, group) in group_by_date(entries) {
        output.push_str(&format!("{}\n", date.format("%A, %Y-%m-%d")));
        output.push_str(&"-".repeat(30));
        output.push('\n');
        for entry in group {
            output.push_str(&format!(
                "  [{}] {} ({})",
                entry.id,
                entry.display_label(),
                entry.entry_type
            ));
            let values = format_values_inline(entry);
            if !values.is_empty() {
                output.push_str(&format!(" {}", values));
            }
            output.push('\n');
            if !entry.notes.is_empty() {
                output.push_str(&format!("      {}\n", entry.notes));
            }
        }
        output.push('\n');
    }

    output
}

/// Format entry details for display
pub fn format_entry_details(entry: &Entry) -> String {
    let mut output = String::new();

    output.push_str(&format!("Entry:    {}\n", entry.id));
    output.push_str(&format!("Type:     {}\n", entry.entry_type));
    output.push_str(&format!("Subtype:  {}\n", entry.subtype_id));
    if !entry.subtype_label.is_empty() {
        output.push_str(&format!("Label:    {}\n", entry.subtype_label));
    }
    output.push_str(&format!("Date:     {}\n", entry.date.format("%Y-%m-%d")));

    if !entry.values.is_empty() {
        output.push_str("Values:\n");
        let subtype = find_subtype(entry.entry_type, &entry.subtype_id);
        for (id, value) in &entry.values {
            output.push_str(&format!("  {}\n", describe_value(subtype, id, value)));
        }
    }

    if !entry.notes.is_empty() {
        output.push_str(&format!("Notes:    {}\n", entry.notes));
    }
    if !entry.tags.is_empty() {
        output.push_str(&format!("Tags:     {}\n", entry.tags.join(", ")));
    }

    output.push_str(&format!(
        "Created:  {}\n",
        entry.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    output.push_str(&format!(
        "Updated:  {}\n",
        entry.updated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output
}

/// `Label: value` using the catalog, else `field_id: value`
fn describe_value(subtype: Option<&SubtypeDef>, id: &str, value: &FieldValue) -> String {
    let Some(subtype) = subtype else {
        return format!("{}: {}", id, value);
    };

    if let Some(score) = subtype.score.filter(|s| s.field == id) {
        return format!("{}: {}", score.label, value);
    }
    match subtype.field(id) {
        Some(field) => {
            let shown = match (field.kind, value) {
                (FieldKind::Select(options), FieldValue::Text(v)) => options
                    .iter()
                    .find(|o| o.value == v.as_str())
                    .map_or_else(|| v.clone(), |o| o.label.to_string()),
                _ => value.to_string(),
            };
            format!("{}: {}", field.label, shown)
        }
        None => format!("{}: {}", id, value),
    }
}

fn format_values_inline(entry: &Entry) -> String {
    entry
        .values
        .iter()
        .map(|(field, value)| format!("{}={}", field, value))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Truncate a string to a maximum number of characters
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
