use serde_json::Value;

use super::display_scalar;

/// Priority list of headline figures, most specific first.
const PRIORITY_KEYS: [&str; 4] = [
    "present_value",
    "straight_line_depreciation",
    "right_of_use_asset_cost",
    "total_interest",
];

/// Print just the key answer value from the output.
///
/// Looks for the headline lease figures in order of priority, then falls
/// back to the first field in the result object.
pub fn print_minimal(value: &Value, dp: u32) {
    println!("{}", minimal_line(value, dp));
}

fn minimal_line(value: &Value, dp: u32) -> String {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Object(map) = result_obj {
        for key in &PRIORITY_KEYS {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    return display_scalar(val, dp);
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            return format!("{}: {}", key, display_scalar(val, dp));
        }
    }

    display_scalar(result_obj, dp)
}
