use anyhow::{Context, Result};
use csv::{Terminator, Writer, WriterBuilder};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::stats::LookupOutcome;

pub const HEADER: [&str; 4] = [
    "Domain",
    "Company Name",
    "HTTP Response Time (s)",
    "Parse Time (s)",
];

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub const NOT_FOUND: &str = "未找到主办单位名称";
pub const TIMED_OUT: &str = "请求超时";
pub const TIMED_OUT_TIME: &str = "超时";
pub const FAILED: &str = "请求失败";
pub const FAILED_TIME: &str = "失败";
pub const NOT_APPLICABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    #[serde(rename = "Domain")]
    pub domain: String,
    #[serde(rename = "Company Name")]
    pub company_name: String,
    #[serde(rename = "HTTP Response Time (s)")]
    pub http_time: String,
    #[serde(rename = "Parse Time (s)")]
    pub parse_time: String,
}

impl ReportRow {
    /// Flattens an outcome into a row. Skipped tokens have no row.
    pub fn from_outcome(domain: &str, outcome: &LookupOutcome) -> Option<Self> {
        let (company_name, http_time, parse_time) = match outcome {
            LookupOutcome::Success {
                organization,
                http_seconds,
                parse_seconds,
            } => (
                organization.clone(),
                format_seconds(*http_seconds),
                format_seconds(*parse_seconds),
            ),
            LookupOutcome::NotFound { http_seconds } => (
                NOT_FOUND.to_string(),
                format_seconds(*http_seconds),
                NOT_APPLICABLE.to_string(),
            ),
            LookupOutcome::Timeout => (
                TIMED_OUT.to_string(),
                TIMED_OUT_TIME.to_string(),
                NOT_APPLICABLE.to_string(),
            ),
            LookupOutcome::RequestFailed { .. } => (
                FAILED.to_string(),
                FAILED_TIME.to_string(),
                NOT_APPLICABLE.to_string(),
            ),
            LookupOutcome::SkippedIp => return None,
        };

        Some(Self {
            domain: domain.to_string(),
            company_name,
            http_time,
            parse_time,
        })
    }
}

pub fn format_seconds(seconds: f64) -> String {
    format!("{:.2}", seconds)
}

/// CSV report that is flushed after every row so an interrupted run keeps
/// everything written so far.
pub struct ReportWriter {
    writer: Writer<File>,
    path: PathBuf,
    rows: usize,
}

impl ReportWriter {
    pub fn create(path: &Path) -> Result<Self> {
        let mut file = File::create(path)
            .with_context(|| format!("Failed to create output file {:?}", path))?;
        // Spreadsheet tools need the BOM to pick UTF-8 for the Chinese status text
        file.write_all(UTF8_BOM)
            .with_context(|| format!("Failed to write to output file {:?}", path))?;

        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .terminator(Terminator::CRLF)
            .from_writer(file);
        writer.write_record(HEADER)?;
        writer.flush()?;

        info!(action = "create", component = "report_writer", file_path = ?path, "Report file opened");
        Ok(Self {
            writer,
            path: path.to_path_buf(),
            rows: 0,
        })
    }

    pub fn write_row(&mut self, row: &ReportRow) -> Result<()> {
        self.writer
            .serialize(row)
            .with_context(|| format!("Failed to write row for {:?}", row.domain))?;
        self.writer.flush()?;
        self.rows += 1;
        Ok(())
    }

    pub fn finish(mut self) -> Result<PathBuf> {
        self.writer.flush()?;
        info!(
            action = "complete",
            component = "report_writer",
            file_path = ?self.path,
            row_count = self.rows,
            "Report file closed"
        );
        Ok(self.path)
    }
}
