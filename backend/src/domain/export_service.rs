//! Export service for the members list and the report summary.
//!
//! Builds CSV text in memory and optionally writes it into a directory.
//! Presentation (download dialogs, spreadsheets) is left to the caller.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use csv::{QuoteStyle, WriterBuilder};
use log::{error, info};
use shared::{Member, ReportSummary};
use std::fs;
use std::path::{Path, PathBuf};

const MEMBER_HEADER: [&str; 7] = ["ID", "Name", "Email", "Phone", "Role", "Status", "Join Date"];

/// A generated CSV document and the file name it should be saved under
#[derive(Debug, Clone, PartialEq)]
pub struct CsvExport {
    pub file_name: String,
    pub content: String,
}

#[derive(Clone, Default)]
pub struct ExportService;

impl ExportService {
    pub fn new() -> Self {
        Self
    }

    pub fn members_file_name(today: NaiveDate) -> String {
        format!("members_export_{}.csv", today.format("%Y-%m-%d"))
    }

    /// Members as CSV with every field quoted. An empty list is an error.
    pub fn export_members_csv(&self, members: &[Member], today: NaiveDate) -> Result<CsvExport> {
        info!("Exporting {} members as CSV", members.len());

        if members.is_empty() {
            error!("Member export requested with no members");
            bail!("No members to export");
        }

        let mut writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Always)
            .from_writer(Vec::new());

        writer
            .write_record(MEMBER_HEADER)
            .context("Failed to write member export header")?;

        for member in members {
            let status = member.status.to_string();
            let join_date = member.join_date.format("%Y-%m-%d").to_string();
            writer
                .write_record([
                    member.id.as_str(),
                    member.name.as_str(),
                    member.email.as_str(),
                    member.phone.as_str(),
                    member.role.as_str(),
                    status.as_str(),
                    join_date.as_str(),
                ])
                .with_context(|| format!("Failed to write member {}", member.id))?;
        }

        let content = finish(writer)?;
        Ok(CsvExport {
            file_name: Self::members_file_name(today),
            content,
        })
    }

    /// The report summary as `Metric,Value` rows
    pub fn export_report_summary_csv(&self, summary: &ReportSummary) -> Result<CsvExport> {
        info!("Exporting report summary for {}", summary.generated_on);

        let rows = [
            ("Report Date", summary.generated_on.format("%Y-%m-%d").to_string()),
            ("Total Members", summary.total_members.to_string()),
            ("Total Visitors", summary.total_visitors.to_string()),
            ("Total Transactions", summary.total_transactions.to_string()),
            ("Total Attendance Records", summary.total_attendance_records.to_string()),
            ("Total Income", format!("{:.2}", summary.total_income)),
            ("Total Expenses", format!("{:.2}", summary.total_expenses)),
            ("Net Balance", format!("{:.2}", summary.net_balance)),
        ];

        let mut writer = WriterBuilder::new().from_writer(Vec::new());
        writer
            .write_record(["Metric", "Value"])
            .context("Failed to write report header")?;
        for (metric, value) in rows {
            writer
                .write_record([metric, value.as_str()])
                .with_context(|| format!("Failed to write report row {}", metric))?;
        }

        Ok(CsvExport {
            file_name: format!(
                "church_report_summary_{}.csv",
                summary.generated_on.format("%Y-%m-%d")
            ),
            content: finish(writer)?,
        })
    }

    /// Write an export into `directory`, returning the full path
    pub fn write_export(&self, export: &CsvExport, directory: &Path) -> Result<PathBuf> {
        fs::create_dir_all(directory)
            .with_context(|| format!("Failed to create export directory {}", directory.display()))?;

        let path = directory.join(&export.file_name);
        fs::write(&path, &export.content)
            .with_context(|| format!("Failed to write export to {}", path.display()))?;

        info!("Wrote {} bytes to {}", export.content.len(), path.display());
        Ok(path)
    }
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV writer: {}", e))?;
    String::from_utf8(bytes).context("CSV output was not valid UTF-8")
}
