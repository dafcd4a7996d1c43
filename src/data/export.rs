use std::io::Write;
use std::path::Path;

use thiserror::Error;

use super::chart::CorrelationChart;
use super::loader::{COL_BOOSTER_CATEGORY, COL_CLASS, COL_PAYLOAD_MASS};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to create {path}")]
    Create {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write CSV")]
    Csv(#[from] csv::Error),
    #[error("failed to flush CSV")]
    Io(#[from] std::io::Error),
}

/// Write the scatter points as CSV, using the source column names as header.
pub fn write_correlation_csv<W: Write>(
    chart: &CorrelationChart,
    out: W,
) -> Result<usize, ExportError> {
    let mut writer = csv::Writer::from_writer(out);
    for point in &chart.points {
        writer.serialize(point)?;
    }
    if chart.points.is_empty() {
        writer.write_record([COL_PAYLOAD_MASS, COL_CLASS, COL_BOOSTER_CATEGORY])?;
    }
    writer.flush()?;
    Ok(chart.points.len())
}

/// Export the scatter points to `path`. Returns the number of rows written.
pub fn export_correlation_csv(chart: &CorrelationChart, path: &Path) -> Result<usize, ExportError> {
    let file = std::fs::File::create(path).map_err(|source| ExportError::Create {
        path: path.display().to_string(),
        source,
    })?;
    let rows = write_correlation_csv(chart, file)?;
    log::info!("Exported {rows} launches to {}", path.display());
    Ok(rows)
}
