//! Report CLI command

use std::path::PathBuf;

use chrono::Local;
use clap::Args;

use crate::config::Settings;
use crate::error::SymlogResult;
use crate::reports::{HealthReport, ReportConfig, ReportSections, ReportStyle, DEFAULT_TITLE};
use crate::storage::file_store::write_atomic;
use crate::storage::Store;

use super::parse_date;

/// Options for `symlog report`
#[derive(Args)]
pub struct ReportArgs {
    /// Report title
    #[arg(long, default_value = DEFAULT_TITLE)]
    pub title: String,

    /// Start date (YYYY-MM-DD), defaults to the earliest entry
    #[arg(long)]
    pub from: Option<String>,

    /// End date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    pub to: Option<String>,

    /// Only labels and dates, no values or notes
    #[arg(long)]
    pub summary: bool,

    /// Leave out a section: personal_info, medical_info, symptoms,
    /// medications, test_results, diary (repeatable)
    #[arg(long, value_name = "SECTION")]
    pub exclude: Vec<String>,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl ReportArgs {
    fn to_config(&self) -> SymlogResult<ReportConfig> {
        let mut include = ReportSections::default();
        for section in &self.exclude {
            include.exclude(section)?;
        }

        Ok(ReportConfig {
            title: self.title.clone(),
            include,
            date_from: self.from.as_deref().map(parse_date).transpose()?,
            date_to: self.to.as_deref().map(parse_date).transpose()?,
            style: if self.summary {
                ReportStyle::Summary
            } else {
                ReportStyle::Detailed
            },
        })
    }
}

/// Handle the report command
pub fn handle_report_command(
    store: &dyn Store,
    settings: &Settings,
    args: ReportArgs,
) -> SymlogResult<()> {
    let config = args.to_config()?;
    let report = HealthReport::generate(store, settings, &config, Local::now().date_naive())?;
    let text = report.format_text();

    match &args.output {
        Some(path) => {
            write_atomic(path, text.as_bytes())?;
            println!(
                "Report written to {} ({} entr{})",
                path.display(),
                report.entries.len(),
                if report.entries.len() == 1 { "y" } else { "ies" }
            );
        }
        None => print!("{}", text),
    }

    Ok(())
}
