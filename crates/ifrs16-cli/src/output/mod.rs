pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

use crate::OutputFormat;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, dp: u32, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value, dp),
        OutputFormat::Csv => csv_out::print_csv(value, dp),
        OutputFormat::Minimal => minimal::print_minimal(value, dp),
    }
}

/// Render a scalar for human-facing output. Decimal figures (serialized as
/// strings or JSON numbers) are rounded to `dp` places; JSON keeps full
/// precision and never comes through here.
pub fn display_scalar(value: &Value, dp: u32) -> String {
    match value {
        Value::String(s) => match Decimal::from_str(s) {
            Ok(d) => d.round_dp(dp).to_string(),
            Err(_) => s.clone(),
        },
        Value::Number(n) if n.is_i64() || n.is_u64() => n.to_string(),
        Value::Number(n) => match Decimal::from_str(&n.to_string()) {
            Ok(d) => d.round_dp(dp).to_string(),
            Err(_) => n.to_string(),
        },
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

/// Flatten nested objects into dotted keys so a record fits one table row.
pub fn flatten_record(map: &serde_json::Map<String, Value>) -> Vec<(String, Value)> {
    let mut out = Vec::new();
    for (key, val) in map {
        match val {
            Value::Object(inner) => {
                for (sub_key, sub_val) in flatten_record(inner) {
                    out.push((format!("{key}.{sub_key}"), sub_val));
                }
            }
            _ => out.push((key.clone(), val.clone())),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_rounds_decimal_strings() {
        assert_eq!(display_scalar(&json!("917593.697485220"), 0), "917594");
        assert_eq!(display_scalar(&json!("55055.62184911"), 2), "55055.62");
    }

    #[test]
    fn test_display_leaves_text_and_integers() {
        assert_eq!(display_scalar(&json!("Lease payment"), 2), "Lease payment");
        assert_eq!(display_scalar(&json!(20), 2), "20");
        assert_eq!(display_scalar(&Value::Null, 2), "");
    }

    #[test]
    fn test_flatten_nested_objects() {
        let v = json!({"year": 1, "values": {"payment": "10", "depreciation": "4"}});
        let flat = flatten_record(v.as_object().unwrap());
        let keys: Vec<&str> = flat.iter().map(|(k, _)| k.as_str()).collect();
        assert!(keys.contains(&"year"));
        assert!(keys.contains(&"values.payment"));
        assert!(keys.contains(&"values.depreciation"));
    }
}
