//! Training and evaluation output files.
//!
//! The loss history goes to a one-column CSV file and the residual report
//! to a pretty-printed JSON object.

use crate::core::constants::PROGRESS_HEADER;
use crate::core::error::Result;
use crate::core::types::Score;
use crate::metrics::ResidualReport;
use csv::WriterBuilder;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write the per-stage loss history as CSV with a single `loss` column.
pub fn write_progress<P: AsRef<Path>>(path: P, steps: &[Score]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_progress_to(file, steps)?;
    log::debug!("Wrote {} loss values to {}", steps.len(), path.display());
    Ok(())
}

/// Write the loss history CSV to any writer.
pub fn write_progress_to<W: Write>(writer: W, steps: &[Score]) -> Result<()> {
    let mut writer = WriterBuilder::new().from_writer(writer);
    writer.write_record([PROGRESS_HEADER])?;
    for loss in steps {
        writer.write_record([loss.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the residual report as pretty-printed JSON.
pub fn write_report<P: AsRef<Path>>(path: P, report: &ResidualReport) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, report)?;
    writer.flush()?;
    log::debug!("Wrote residual report to {}", path.display());
    Ok(())
}
