use serde_json::Value;
use std::io;

use super::{flatten_scalars, object_rows, plain_text};

/// Write output as CSV to stdout.
///
/// A cash-flow schedule (array of rows) becomes one record per period; a
/// result envelope becomes two-column `field,value` records with nested
/// objects flattened. Schedules inside an envelope are omitted, use the
/// `cash-flows` command to export them.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let written = match value {
        Value::Array(arr) => write_rows(&mut wtr, arr),
        Value::Object(map) => {
            let body = match map.get("result") {
                Some(Value::Object(result)) => result,
                _ => map,
            };
            let mut fields = Vec::new();
            flatten_scalars("", body, &mut fields);
            write_fields(&mut wtr, &fields)
        }
        other => wtr.write_record([plain_text(other)]),
    };

    if let Err(e) = written.and_then(|_| wtr.flush().map_err(csv::Error::from)) {
        eprintln!("CSV write error: {}", e);
    }
}

fn write_rows(wtr: &mut csv::Writer<io::StdoutLock<'_>>, arr: &[Value]) -> csv::Result<()> {
    match object_rows(arr) {
        Some((headers, rows)) => {
            wtr.write_record(&headers)?;
            for row in rows {
                wtr.write_record(&row)?;
            }
        }
        None => {
            for item in arr {
                wtr.write_record([plain_text(item)])?;
            }
        }
    }
    Ok(())
}

fn write_fields(
    wtr: &mut csv::Writer<io::StdoutLock<'_>>,
    fields: &[(String, String)],
) -> csv::Result<()> {
    wtr.write_record(["field", "value"])?;
    for (key, val) in fields {
        wtr.write_record([key, val])?;
    }
    Ok(())
}
