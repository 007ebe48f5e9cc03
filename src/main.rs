use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use symlog::cli::{
    handle_backup_command, handle_entry_command, handle_profile_command, handle_report_command,
    BackupCommands, EntryCommands, ProfileCommands, ReportArgs,
};
use symlog::config::{paths::DATA_DIR_ENV, Settings, SymlogPaths};
use symlog::services::{overview, wipe_all};
use symlog::storage::FileStore;

/// Env var holding the log filter
const LOG_ENV: &str = "SYMLOG_LOG";

#[derive(Parser)]
#[command(
    name = "symlog",
    version,
    about = "Personal health diary with encrypted backups",
    long_about = "SymLog records symptoms, medications, test results and diary notes, \
                  keeps a personal and medical profile, generates shareable health \
                  reports and exports everything as a passphrase-encrypted backup."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Entry management commands
    #[command(subcommand)]
    Entry(EntryCommands),

    /// Profile commands
    #[command(subcommand)]
    Profile(ProfileCommands),

    /// Encrypted backup commands
    #[command(subcommand)]
    Backup(BackupCommands),

    /// Generate a text health report
    Report(ReportArgs),

    /// Delete all entries and the profile
    Wipe {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = SymlogPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    paths.ensure_directories()?;

    let store = FileStore::new(paths.data_dir())?;

    match cli.command {
        Some(Commands::Entry(cmd)) => handle_entry_command(&store, &settings, cmd)?,
        Some(Commands::Profile(cmd)) => handle_profile_command(&store, &settings, cmd)?,
        Some(Commands::Backup(cmd)) => handle_backup_command(&store, &paths, &settings, cmd)?,
        Some(Commands::Report(args)) => handle_report_command(&store, &settings, args)?,
        Some(Commands::Wipe { force }) => {
            if !force {
                let contents = overview(&store)?;
                println!(
                    "This will permanently delete {} entr{} and your profile.",
                    contents.entries,
                    if contents.entries == 1 { "y" } else { "ies" }
                );
                println!("Create a backup first with: symlog backup create");
                println!("To proceed, run again with --force flag:");
                println!("  symlog wipe --force");
                return Ok(());
            }
            wipe_all(&store)?;
            println!("All data deleted.");
        }
        Some(Commands::Config) => {
            println!("SymLog Configuration");
            println!("====================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Backup directory: {}", settings.export_dir(&paths).display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("(override the base directory with {})", DATA_DIR_ENV);
            println!();
            println!("Settings:");
            println!("  Language:         {}", settings.language);
            println!("  Unit system:      {:?}", settings.unit_system);
            println!("  Entries per page: {}", settings.entries_per_page);
            println!(
                "  Backup KDF:       Argon2id m={} KiB, t={}, p={}",
                settings.backup.kdf.memory_cost,
                settings.backup.kdf.time_cost,
                settings.backup.kdf.parallelism
            );
        }
        None => {
            println!("SymLog - personal health diary");
            println!();
            println!("Run 'symlog --help' for usage information.");
            println!("Run 'symlog entry types' to see what can be recorded.");
        }
    }

    Ok(())
}
