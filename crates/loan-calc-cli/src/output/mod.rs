pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::{Map, Value};
use std::io::{self, Write};

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let written = match format {
        OutputFormat::Json => json::write_json(&mut out, value),
        OutputFormat::Table => table::write_table(&mut out, value),
        OutputFormat::Csv => csv_out::write_csv(&mut out, value),
        OutputFormat::Minimal => minimal::write_minimal(&mut out, value),
    };
    if let Err(e) = written.and_then(|_| out.flush()) {
        eprintln!("Failed to write output: {}", e);
    }
}

/// Scalar fields of an object, nested objects flattened to dotted keys
/// (`current.monthly_payment`). Arrays of objects are left out; see
/// [`row_array`].
pub(crate) fn flatten_fields(map: &Map<String, Value>) -> Vec<(String, String)> {
    let mut fields = Vec::new();
    flatten_into("", map, &mut fields);
    fields
}

fn flatten_into(prefix: &str, map: &Map<String, Value>, fields: &mut Vec<(String, String)>) {
    for (key, val) in map {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match val {
            Value::Object(inner) => flatten_into(&name, inner, fields),
            Value::Array(items) if is_row_array(items) => {}
            _ => fields.push((name, format_scalar(val))),
        }
    }
}

/// The first field holding an array of objects, e.g. schedule `rows`.
pub(crate) fn row_array(map: &Map<String, Value>) -> Option<&[Value]> {
    map.values().find_map(|v| match v {
        Value::Array(items) if is_row_array(items) => Some(items.as_slice()),
        _ => None,
    })
}

fn is_row_array(items: &[Value]) -> bool {
    matches!(items.first(), Some(Value::Object(_)))
}

/// Column headers and string cells for an array of flat objects.
pub(crate) fn row_cells(rows: &[Value]) -> (Vec<String>, Vec<Vec<String>>) {
    let headers: Vec<String> = match rows.first() {
        Some(Value::Object(first)) => first.keys().cloned().collect(),
        _ => return (Vec::new(), Vec::new()),
    };
    let cells = rows
        .iter()
        .filter_map(Value::as_object)
        .map(|row| {
            headers
                .iter()
                .map(|h| row.get(h).map(format_scalar).unwrap_or_default())
                .collect()
        })
        .collect();
    (headers, cells)
}

pub(crate) fn format_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(arr) => arr.iter().map(format_scalar).collect::<Vec<_>>().join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
