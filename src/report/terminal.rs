use std::io::Write;

use anyhow::Result;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::models::{FieldDisplay, ReportEntry};

/// Render a summary table of all entries; returns the entry count.
pub fn render<W: Write>(entries: impl Iterator<Item = ReportEntry>, out: &mut W) -> Result<usize> {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Name").add_attribute(Attribute::Bold),
            Cell::new("Version").add_attribute(Attribute::Bold),
            Cell::new("License").add_attribute(Attribute::Bold),
            Cell::new("License file").add_attribute(Attribute::Bold),
        ]);

    let mut count = 0;
    for entry in entries {
        let (found, color) = if entry.has_license_text() {
            ("✓ found", Color::Green)
        } else {
            ("✗ missing", Color::Yellow)
        };

        table.add_row(vec![
            Cell::new(&entry.name),
            Cell::new(entry.version.as_deref().unwrap_or("")),
            Cell::new(FieldDisplay(entry.license.as_ref()).to_string()),
            Cell::new(found).fg(color).set_alignment(CellAlignment::Center),
        ]);
        count += 1;
    }

    writeln!(out, "{}", table)?;
    out.flush()?;
    Ok(count)
}
