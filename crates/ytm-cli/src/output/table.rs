use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{flatten_scalars, object_rows, plain_text};

/// Format output as tables using the tabled crate.
///
/// Scalar result fields go into a Field/Value table; every array of rows
/// (the cash-flow schedule) is printed as its own table underneath.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) => {
                print_fields(result);
                print_nested_arrays(result);
                print_envelope_notes(map);
            }
            _ => {
                print_fields(map);
                print_nested_arrays(map);
            }
        },
        Value::Array(arr) => print_rows(arr),
        other => println!("{}", plain_text(other)),
    }
}

fn print_fields(map: &serde_json::Map<String, Value>) {
    let mut fields = Vec::new();
    flatten_scalars("", map, &mut fields);

    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in fields {
        builder.push_record([key, val]);
    }
    println!("{}", Table::from(builder));
}

fn print_nested_arrays(map: &serde_json::Map<String, Value>) {
    for (key, val) in map {
        if let Value::Array(arr) = val {
            println!("\n{}:", key);
            print_rows(arr);
        }
    }
}

fn print_rows(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    match object_rows(arr) {
        Some((headers, rows)) => {
            let mut builder = Builder::default();
            builder.push_record(headers);
            for row in rows {
                builder.push_record(row);
            }
            println!("{}", Table::from(builder));
        }
        None => {
            for item in arr {
                println!("{}", plain_text(item));
            }
        }
    }
}

fn print_envelope_notes(envelope: &serde_json::Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}
