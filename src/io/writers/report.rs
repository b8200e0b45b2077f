//! Per-item standardization report. Every queued item gets a row regardless
//! of its state; dimensions are only recorded for completed items.
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde::Serialize;

use crate::core::batch::{BatchQueue, FailureReason, ItemId};
use crate::error::Result;
use crate::types::{ExportFormat, Lifecycle};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub id: ItemId,
    /// Name the item is exported under
    pub file_name: String,
    pub original_name: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub status: Lifecycle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureReason>,
}

pub fn report_rows(queue: &BatchQueue, format: ExportFormat) -> Vec<ReportRow> {
    queue
        .iter()
        .map(|item| {
            let size = item.output_size();
            ReportRow {
                id: item.id(),
                file_name: super::export::export_file_name(item.name(), format),
                original_name: item.name().to_string(),
                width: size.map(|(w, _)| w),
                height: size.map(|(_, h)| h),
                status: item.lifecycle(),
                failure: item.failure().cloned(),
            }
        })
        .collect()
}

/// `standardization_report_<UTC timestamp>.json`
pub fn default_report_name() -> String {
    format!(
        "standardization_report_{}.json",
        chrono::Utc::now().format("%Y%m%dT%H%M%SZ")
    )
}

pub fn write_json_report(rows: &[ReportRow], path: &Path) -> Result<()> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, rows)?;
    Ok(())
}
