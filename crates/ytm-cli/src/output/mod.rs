pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Render a JSON value as plain text for a table cell, CSV field or line.
/// Decimals arrive as strings, so strings are printed without quotes.
pub(crate) fn plain_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

/// Flatten nested objects into `parent.child` keys; arrays are left out.
pub(crate) fn flatten_scalars(
    prefix: &str,
    map: &serde_json::Map<String, Value>,
    out: &mut Vec<(String, String)>,
) {
    for (key, val) in map {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match val {
            Value::Object(inner) => flatten_scalars(&name, inner, out),
            Value::Array(_) => {}
            other => out.push((name, plain_text(other))),
        }
    }
}

/// Column headers and string rows for an array of flat objects.
pub(crate) fn object_rows(arr: &[Value]) -> Option<(Vec<String>, Vec<Vec<String>>)> {
    let Some(Value::Object(first)) = arr.first() else {
        return None;
    };
    let headers: Vec<String> = first.keys().cloned().collect();
    let rows = arr
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|h| map.get(h.as_str()).map(plain_text).unwrap_or_default())
                .collect()
        })
        .collect();
    Some((headers, rows))
}
