use serde_json::Value;

use super::plain_text;

/// Output fields in priority order: the headline yield first, then the
/// pricing classification when only a classification was requested.
const PRIORITY_KEYS: [&str; 3] = ["bond_equivalent_yield", "classification", "yield_per_period"];

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match result_obj {
        Value::Object(map) => {
            for key in PRIORITY_KEYS {
                if let Some(val) = map.get(key).filter(|v| !v.is_null()) {
                    println!("{}", plain_text(val));
                    return;
                }
            }
            if let Some((key, val)) = map.iter().next() {
                println!("{}: {}", key, plain_text(val));
            }
        }
        // A schedule: one total cash flow per line.
        Value::Array(rows) => {
            for row in rows {
                match row.get("total_cash_flow") {
                    Some(total) => println!("{}", plain_text(total)),
                    None => println!("{}", plain_text(row)),
                }
            }
        }
        other => println!("{}", plain_text(other)),
    }
}
