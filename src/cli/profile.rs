//! Profile CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_profile_details, format_profile_summary};
use crate::error::SymlogResult;
use crate::services::{parse_field_value, ProfileService};
use crate::storage::Store;

/// Profile subcommands
#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Show the profile
    Show {
        /// Only the short summary
        #[arg(short, long)]
        summary: bool,

        /// Print as JSON
        #[arg(long, conflicts_with = "summary")]
        json: bool,
    },

    /// Set a profile field by dotted path
    ///
    /// Values are parsed as JSON when possible, so `42`, `true` and
    /// `["asthma"]` keep their types; anything else is stored as text.
    Set {
        /// Field path (e.g., "personal_info.name")
        path: String,
        /// New value
        value: String,
    },

    /// Reset the profile to defaults
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a profile command
pub fn handle_profile_command(
    store: &dyn Store,
    settings: &Settings,
    cmd: ProfileCommands,
) -> SymlogResult<()> {
    let service = ProfileService::new(store, settings);

    match cmd {
        ProfileCommands::Show { summary, json } => {
            if json {
                println!("{}", service.export_json()?);
            } else if summary {
                print!("{}", format_profile_summary(&service.summary()?));
            } else {
                if service.is_empty()? {
                    println!("Your profile is empty. Fill it in with: symlog profile set <path> <value>");
                    println!();
                }
                print!("{}", format_profile_details(&service.get()?));
            }
        }

        ProfileCommands::Set { path, value } => {
            service.update_field(&path, parse_field_value(&value))?;
            println!("Updated {}", path);
        }

        ProfileCommands::Reset { force } => {
            if !force {
                println!("This will erase your profile.");
                println!("To proceed, run again with --force flag:");
                println!("  symlog profile reset --force");
                return Ok(());
            }
            service.reset()?;
            println!("Profile reset to defaults.");
        }
    }

    Ok(())
}
