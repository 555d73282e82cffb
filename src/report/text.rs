use std::io::Write;

use anyhow::Result;

use crate::models::ReportEntry;

/// Write each entry's notice block as it is pulled; returns the entry count.
pub fn render<W: Write>(entries: impl Iterator<Item = ReportEntry>, out: &mut W) -> Result<usize> {
    let mut count = 0;
    for entry in entries {
        write!(out, "{}", entry)?;
        count += 1;
    }
    out.flush()?;
    Ok(count)
}
