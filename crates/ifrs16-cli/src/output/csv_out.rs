use serde_json::Value;
use std::io;

use super::{display_scalar, flatten_record};

/// Fields whose rows are the main tabular answer, in order of preference.
const PRIMARY_ARRAYS: [&str; 3] = ["schedule", "journal_lines", "cumulative"];

/// Write output as CSV to stdout.
///
/// A report with a schedule prints the schedule rows; a flat result prints
/// two-column `field,value` pairs.
pub fn print_csv(value: &Value, dp: u32) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let body = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let written = match body {
        Value::Object(map) => match PRIMARY_ARRAYS
            .iter()
            .find_map(|k| map.get(*k).and_then(Value::as_array))
        {
            Some(rows) => write_rows(&mut wtr, rows, dp),
            None => write_pairs(&mut wtr, map, dp),
        },
        Value::Array(arr) => write_rows(&mut wtr, arr, dp),
        _ => wtr.write_record([display_scalar(body, dp)]),
    };

    if let Err(e) = written.and_then(|_| wtr.flush().map_err(csv::Error::from)) {
        eprintln!("CSV output error: {}", e);
    }
}

fn write_pairs<W: io::Write>(
    wtr: &mut csv::Writer<W>,
    map: &serde_json::Map<String, Value>,
    dp: u32,
) -> csv::Result<()> {
    wtr.write_record(["field", "value"])?;
    for (key, val) in flatten_record(map) {
        if val.is_array() {
            continue;
        }
        wtr.write_record([key, display_scalar(&val, dp)])?;
    }
    Ok(())
}

fn write_rows<W: io::Write>(wtr: &mut csv::Writer<W>, arr: &[Value], dp: u32) -> csv::Result<()> {
    let rows: Vec<Vec<(String, Value)>> = arr
        .iter()
        .filter_map(Value::as_object)
        .map(flatten_record)
        .collect();

    let Some(first) = rows.first() else {
        for item in arr {
            wtr.write_record([display_scalar(item, dp)])?;
        }
        return Ok(());
    };

    let headers: Vec<String> = first
        .iter()
        .filter(|(_, v)| !v.is_array())
        .map(|(k, _)| k.clone())
        .collect();
    wtr.write_record(&headers)?;

    for row in &rows {
        let record: Vec<String> = headers
            .iter()
            .map(|h| {
                row.iter()
                    .find(|(k, _)| k == h)
                    .map(|(_, v)| display_scalar(v, dp))
                    .unwrap_or_default()
            })
            .collect();
        wtr.write_record(&record)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render_rows(value: &Value, dp: u32) -> String {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        write_rows(&mut wtr, value.as_array().unwrap(), dp).unwrap();
        String::from_utf8(wtr.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn test_rows_are_rounded_for_display() {
        let rows = json!([
            {"year": 1, "opening_liability": "917593.6974852", "interest": "55055.621849"},
            {"year": 2, "opening_liability": "892649.3193", "interest": "53558.959158"}
        ]);
        let out = render_rows(&rows, 0);
        let lines: Vec<Vec<&str>> = out.lines().map(|l| l.split(',').collect()).collect();
        assert_eq!(lines.len(), 3);

        let col = |name: &str| lines[0].iter().position(|h| *h == name).unwrap();
        assert_eq!(lines[1][col("year")], "1");
        assert_eq!(lines[1][col("opening_liability")], "917594");
        assert_eq!(lines[1][col("interest")], "55056");
        assert_eq!(lines[2][col("interest")], "53559");
    }

    #[test]
    fn test_nested_arrays_are_skipped() {
        let rows = json!([{"year": 1, "entries": [{"a": 1}], "values": {"payment": "10"}}]);
        let out = render_rows(&rows, 2);
        let mut header: Vec<&str> = out.lines().next().unwrap().split(',').collect();
        header.sort();
        assert_eq!(header, vec!["values.payment", "year"]);
    }
}
