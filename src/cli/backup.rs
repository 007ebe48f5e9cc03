//! Backup CLI commands
//!
//! Implements CLI commands for encrypted backup export and restore.

use std::fs;
use std::path::PathBuf;

use chrono::Utc;
use clap::Subcommand;

use crate::backup::{
    inspect_envelope, last_backup_info, read_backup_file, record_last_backup, validate_passphrase,
    write_backup_file, BackupCodec,
};
use crate::config::{Settings, SymlogPaths};
use crate::crypto::{AesGcmCipher, SecureString};
use crate::display::{format_envelope_info, format_last_backup, format_restored_preview, format_size};
use crate::error::{SymlogError, SymlogResult};
use crate::services::overview;
use crate::storage::Store;

/// Environment variable read for the passphrase when `--passphrase` is absent
pub const PASSPHRASE_ENV: &str = "SYMLOG_BACKUP_PASSPHRASE";

/// Backup subcommands
#[derive(Subcommand)]
pub enum BackupCommands {
    /// Create an encrypted backup file
    Create {
        /// Output file or directory (defaults to the backup directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Passphrase (prompted for when not given)
        #[arg(long, env = PASSPHRASE_ENV, hide_env_values = true)]
        passphrase: Option<String>,
    },

    /// Restore all data from a backup file
    Restore {
        /// Backup file path
        file: PathBuf,

        /// Replace current data without further confirmation
        #[arg(short, long)]
        force: bool,

        /// Passphrase (prompted for when not given)
        #[arg(long, env = PASSPHRASE_ENV, hide_env_values = true)]
        passphrase: Option<String>,
    },

    /// Show backup metadata without decrypting
    Info {
        /// Backup file path
        file: PathBuf,
    },

    /// Show when the last backup was created
    Last,
}

/// Handle a backup command
pub fn handle_backup_command(
    store: &dyn Store,
    paths: &SymlogPaths,
    settings: &Settings,
    cmd: BackupCommands,
) -> SymlogResult<()> {
    let cipher = AesGcmCipher::new(settings.backup.kdf);
    let codec = BackupCodec::new(store, &cipher);

    match cmd {
        BackupCommands::Create { output, passphrase } => {
            let target = match output {
                Some(path) => path,
                None => {
                    let dir = settings.export_dir(paths);
                    fs::create_dir_all(&dir).map_err(|e| {
                        SymlogError::Io(format!("Failed to create backup directory: {}", e))
                    })?;
                    dir
                }
            };

            let passphrase = read_passphrase(passphrase, true)?;

            println!("Creating backup...");
            let contents = overview(store)?;
            let envelope = codec.create_backup(&passphrase)?;
            let exported = write_backup_file(&envelope, &target)?;
            record_last_backup(store, &exported.info)?;

            println!("Backup created: {}", exported.path.display());
            println!("Size: {}", format_size(exported.info.size));
            println!(
                "Contains {} entr{}{}",
                contents.entries,
                if contents.entries == 1 { "y" } else { "ies" },
                if contents.has_profile { " and your profile" } else { "" }
            );
            if contents.unreadable_entries > 0 {
                println!(
                    "Includes {} entr{} this version cannot display, kept unchanged.",
                    contents.unreadable_entries,
                    if contents.unreadable_entries == 1 { "y" } else { "ies" }
                );
            }
            println!();
            println!("Keep the passphrase safe: the backup cannot be restored without it.");
        }

        BackupCommands::Restore {
            file,
            force,
            passphrase,
        } => {
            let bytes = read_backup_file(&file)?;
            let info = inspect_envelope(&bytes)?;

            println!("Backup Information");
            println!("==================");
            println!("File:    {}", file.display());
            print!("{}", format_envelope_info(&info, Utc::now()));
            println!();

            if !force {
                println!("WARNING: Restoring replaces ALL current entries and your profile!");
                println!("To proceed, run again with --force flag:");
                println!("  symlog backup restore {} --force", file.display());
                return Ok(());
            }

            let passphrase = read_passphrase(passphrase, false)?;

            println!("Decrypting backup...");
            let restored = codec.restore_backup(&bytes, &passphrase)?;
            print!("{}", format_restored_preview(&restored));

            let summary = codec.apply_restored_data(&restored)?;
            println!();
            println!("Restore complete!");
            println!("{}", summary.summary());

            let unreadable = overview(store)?.unreadable_entries;
            if unreadable > 0 {
                println!(
                    "{} restored entr{} cannot be displayed by this version and will be skipped.",
                    unreadable,
                    if unreadable == 1 { "y" } else { "ies" }
                );
            }
        }

        BackupCommands::Info { file } => {
            let bytes = read_backup_file(&file)?;
            let info = inspect_envelope(&bytes)?;

            println!("Backup Details");
            println!("==============");
            println!("File:    {}", file.display());
            print!("{}", format_envelope_info(&info, Utc::now()));
        }

        BackupCommands::Last => {
            let info = last_backup_info(store)?;
            print!("{}", format_last_backup(info.as_ref(), Utc::now()));
        }
    }

    Ok(())
}

/// Take the passphrase from the flag or environment, else prompt for it
///
/// When creating, a prompted passphrase is asked for twice.
fn read_passphrase(provided: Option<String>, confirm: bool) -> SymlogResult<SecureString> {
    if let Some(passphrase) = provided {
        return Ok(SecureString::new(passphrase));
    }

    let passphrase = prompt("Backup passphrase: ")?;
    if confirm {
        validate_passphrase(&passphrase)?;
        let again = prompt("Confirm passphrase: ")?;
        if passphrase != again {
            return Err(SymlogError::Validation("Passphrases do not match".into()));
        }
    }
    Ok(passphrase)
}

fn prompt(message: &str) -> SymlogResult<SecureString> {
    rpassword::prompt_password(message)
        .map(SecureString::new)
        .map_err(|e| SymlogError::Io(format!("Failed to read passphrase: {}", e)))
}
