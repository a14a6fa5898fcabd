use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{display_scalar, flatten_record};

/// Format output as tables using the tabled crate.
///
/// Scalar fields go into one Field/Value table; every array of records
/// (schedule, cumulative totals, journals) gets a titled table of its own.
pub fn print_table(value: &Value, dp: u32) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_section(None, result, dp);
                print_envelope_notes(map);
            } else {
                print_section(None, value, dp);
            }
        }
        Value::Array(arr) => print_record_table(arr, dp),
        _ => println!("{}", display_scalar(value, dp)),
    }
}

fn print_section(title: Option<&str>, value: &Value, dp: u32) {
    let Value::Object(map) = value else {
        println!("{}", display_scalar(value, dp));
        return;
    };

    let mut scalars = Builder::default();
    scalars.push_record(["Field", "Value"]);
    let mut has_scalars = false;
    let mut nested: Vec<(&String, &Value)> = Vec::new();

    for (key, val) in map {
        match val {
            Value::Array(arr) if arr.iter().any(Value::is_object) => nested.push((key, val)),
            Value::Object(_) => nested.push((key, val)),
            _ => {
                scalars.push_record([key.as_str(), &display_list(val, dp)]);
                has_scalars = true;
            }
        }
    }

    if let Some(t) = title {
        println!("\n{}", t);
    }
    if has_scalars {
        println!("{}", Table::from(scalars));
    }

    for (key, val) in nested {
        let heading = match title {
            Some(t) => format!("{t}.{key}"),
            None => key.clone(),
        };
        match val {
            Value::Array(arr) => {
                println!("\n{}", heading);
                print_record_table(arr, dp);
            }
            _ => print_section(Some(heading.as_str()), val, dp),
        }
    }
}

fn print_record_table(arr: &[Value], dp: u32) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    let rows: Vec<Vec<(String, Value)>> = arr
        .iter()
        .filter_map(Value::as_object)
        .map(flatten_record)
        .collect();

    let Some(first) = rows.first() else {
        for item in arr {
            println!("{}", display_list(item, dp));
        }
        return;
    };

    let headers: Vec<String> = first.iter().map(|(k, _)| k.clone()).collect();
    let mut builder = Builder::default();
    builder.push_record(headers.clone());

    for row in &rows {
        let cells: Vec<String> = headers
            .iter()
            .map(|h| {
                row.iter()
                    .find(|(k, _)| k == h)
                    .map(|(_, v)| display_list(v, dp))
                    .unwrap_or_default()
            })
            .collect();
        builder.push_record(cells);
    }

    println!("{}", Table::from(builder));
}

fn print_envelope_notes(envelope: &Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn display_list(value: &Value, dp: u32) -> String {
    match value {
        Value::Array(arr) => arr
            .iter()
            .map(|v| display_scalar(v, dp))
            .collect::<Vec<_>>()
            .join(", "),
        _ => display_scalar(value, dp),
    }
}
