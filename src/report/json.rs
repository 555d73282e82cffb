use std::io::Write;

use anyhow::Result;

use crate::models::ReportEntry;

/// Pretty JSON array of all entries; returns the entry count.
pub fn render<W: Write>(entries: impl Iterator<Item = ReportEntry>, out: &mut W) -> Result<usize> {
    let entries: Vec<ReportEntry> = entries.collect();
    serde_json::to_writer_pretty(&mut *out, &entries)?;
    writeln!(out)?;
    out.flush()?;
    Ok(entries.len())
}
