// Report export: CSV for spreadsheets, JSON for everything else.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::Writer;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::ColumnMapping;
use crate::error::Result;
use crate::pipeline::aggregate::FinalRow;
use crate::pipeline::cluster::{ClusterReport, RunStats};

/// Output file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

/// Header row: cluster name, the input's own keyword and volume column
/// names, then the evidence columns.
pub fn csv_headers(columns: &ColumnMapping) -> Vec<String> {
    let mut headers = vec![
        "Cluster Name".to_string(),
        columns.keyword.clone(),
        columns.volume.clone(),
    ];
    headers.extend((1..=3).map(|i| format!("URL {i}")));
    headers.extend((1..=3).map(|i| format!("Title {i}")));
    headers
}

/// Write the report as CSV. Absent evidence cells are left empty.
pub fn write_csv<W: Write>(report: &ClusterReport, columns: &ColumnMapping, out: W) -> Result<()> {
    let mut wtr = Writer::from_writer(out);
    wtr.write_record(csv_headers(columns))?;

    for row in &report.rows {
        let mut record = vec![
            row.cluster_name.clone(),
            row.keyword.clone(),
            row.volume.to_string(),
        ];
        record.extend(row.urls.iter().map(|u| u.clone().unwrap_or_default()));
        record.extend(row.titles.iter().map(|t| t.clone().unwrap_or_default()));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct JsonExport<'a> {
    stats: &'a RunStats,
    rows: &'a [FinalRow],
}

/// Write the report as pretty-printed JSON.
pub fn write_json<W: Write>(report: &ClusterReport, out: W) -> Result<()> {
    let export = JsonExport {
        stats: &report.stats,
        rows: &report.rows,
    };
    serde_json::to_writer_pretty(out, &export)?;
    Ok(())
}

/// Write the report to a file in the given format.
pub fn export(
    report: &ClusterReport,
    columns: &ColumnMapping,
    format: ExportFormat,
    path: &Path,
) -> Result<()> {
    debug!(rows = report.rows.len(), path = %path.display(), "Exporting report");

    let file = File::create(path)?;
    match format {
        ExportFormat::Csv => write_csv(report, columns, file)?,
        ExportFormat::Json => write_json(report, file)?,
    }

    info!(rows = report.rows.len(), path = %path.display(), "Report exported");
    Ok(())
}
