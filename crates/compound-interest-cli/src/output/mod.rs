pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;
use std::io::{self, Write};

/// Render to stdout in the requested format.
pub fn format_output(format: &OutputFormat, value: &Value) {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = render(format, &mut out, value) {
        eprintln!("Output error: {}", e);
    }
}

pub fn render<W: Write>(
    format: &OutputFormat,
    out: &mut W,
    value: &Value,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Json => json::write_json(out, value)?,
        OutputFormat::Table => table::write_table(out, value)?,
        OutputFormat::Csv => csv_out::write_csv(out, value)?,
        OutputFormat::Minimal => minimal::write_minimal(out, value)?,
    }
    Ok(())
}
