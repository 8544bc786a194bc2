use serde_json::Value;
use std::io::{self, Write};

use super::format_scalar;

/// Result fields printed by `--output minimal`, most specific first.
const PRIORITY_KEYS: [&str; 4] = [
    "monthly_payment",
    "monthly_payment_delta",
    "final_balance",
    "valid",
];

/// Print just the headline number of a result.
///
/// Falls back to the first field when none of the well-known keys is present.
pub fn write_minimal<W: Write>(out: &mut W, value: &Value) -> io::Result<()> {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let Value::Object(map) = result_obj else {
        return writeln!(out, "{}", format_scalar(result_obj));
    };

    for key in PRIORITY_KEYS {
        if let Some(val) = map.get(key).filter(|v| !v.is_null()) {
            return writeln!(out, "{}", format_scalar(val));
        }
    }

    match map.iter().next() {
        Some((key, val)) => writeln!(out, "{}: {}", key, format_scalar(val)),
        None => writeln!(out),
    }
}
