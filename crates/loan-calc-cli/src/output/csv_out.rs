use serde_json::Value;
use std::io::{self, Write};

use super::{flatten_fields, format_scalar, row_cells, row_array};

/// CSV output. Schedules export one line per payment period; every other
/// result becomes a two-column `field,value` listing.
pub fn write_csv<W: Write>(out: &mut W, value: &Value) -> io::Result<()> {
    let mut wtr = csv::Writer::from_writer(out);

    let body = match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) => result,
            _ => map,
        },
        _ => {
            wtr.write_record([format_scalar(value)])?;
            return wtr.flush();
        }
    };

    if let Some(rows) = row_array(body) {
        let (headers, cells) = row_cells(rows);
        wtr.write_record(&headers)?;
        for row in cells {
            wtr.write_record(&row)?;
        }
    } else {
        wtr.write_record(["field", "value"])?;
        for (key, val) in flatten_fields(body) {
            wtr.write_record([key, val])?;
        }
    }

    wtr.flush()
}
