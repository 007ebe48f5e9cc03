//! Entry type catalog display

use crate::models::TypeDef;

/// Format entry types with their subtypes and field hints
pub fn format_entry_types(types: &[&TypeDef]) -> String {
    let mut output = String::new();

    for def in types {
        output.push_str(&format!(
            "{} ({}) - {}\n",
            def.entry_type,
            def.entry_type.as_str(),
            def.description
        ));
        output.push_str(&"-".repeat(40));
        output.push('\n');

        for subtype in def.subtypes {
            output.push_str(&format!("  {:<20} {}\n", subtype.id, subtype.label));
            for field in subtype.fields {
                output.push_str(&format!(
                    "      {:<28} {} [{}]\n",
                    field.id,
                    field.label,
                    field.hint()
                ));
            }
            if let Some(score) = subtype.score {
                output.push_str(&format!(
                    "      {:<28} {} (computed: {})\n",
                    score.field,
                    score.label,
                    score.sum_of.join(" + ")
                ));
            }
        }
        output.push('\n');
    }

    output
}
