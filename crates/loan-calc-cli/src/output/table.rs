use serde_json::{Map, Value};
use std::io::{self, Write};
use tabled::{builder::Builder, Table};

use super::{flatten_fields, row_array, row_cells};

/// Human-readable tables: a field/value table for the result, a second table
/// for schedule rows, then any warnings and the methodology.
pub fn write_table<W: Write>(out: &mut W, value: &Value) -> io::Result<()> {
    let Value::Object(map) = value else {
        return writeln!(out, "{}", value);
    };

    match map.get("result") {
        Some(Value::Object(result)) => {
            write_result(out, result)?;
            write_notes(out, map)
        }
        _ => write_result(out, map),
    }
}

fn write_result<W: Write>(out: &mut W, result: &Map<String, Value>) -> io::Result<()> {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in flatten_fields(result) {
        builder.push_record([key, val]);
    }
    writeln!(out, "{}", Table::from(builder))?;

    if let Some(rows) = row_array(result) {
        let (headers, cells) = row_cells(rows);
        let mut builder = Builder::default();
        builder.push_record(headers);
        for row in cells {
            builder.push_record(row);
        }
        writeln!(out)?;
        writeln!(out, "{}", Table::from(builder))?;
    }
    Ok(())
}

fn write_notes<W: Write>(out: &mut W, envelope: &Map<String, Value>) -> io::Result<()> {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            writeln!(out, "\nWarnings:")?;
            for w in warnings.iter().filter_map(Value::as_str) {
                writeln!(out, "  - {}", w)?;
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        writeln!(out, "\nMethodology: {}", meth)?;
    }
    Ok(())
}
