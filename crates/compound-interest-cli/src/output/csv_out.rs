use serde_json::{Map, Value};
use std::io::Write;

/// Per-period rows when the result carries them (`schedule` or `series`),
/// otherwise a two-column field/value listing.
pub fn write_csv<W: Write>(out: W, value: &Value) -> Result<(), Box<dyn std::error::Error>> {
    let mut wtr = csv::Writer::from_writer(out);

    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match result {
        Value::Object(map) => {
            if let Some(rows) = ["schedule", "series"]
                .iter()
                .find_map(|k| map.get(*k).and_then(Value::as_array))
            {
                write_array_csv(&mut wtr, rows)?;
            } else {
                wtr.write_record(["field", "value"])?;
                write_fields(&mut wtr, "", map)?;
            }
        }
        Value::Array(arr) => write_array_csv(&mut wtr, arr)?,
        _ => wtr.write_record([&format_csv_value(result)])?,
    }

    wtr.flush()?;
    Ok(())
}

/// Nested objects are flattened to dotted field names.
fn write_fields<W: Write>(
    wtr: &mut csv::Writer<W>,
    prefix: &str,
    map: &Map<String, Value>,
) -> Result<(), csv::Error> {
    for (key, val) in map {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match val {
            Value::Object(inner) => write_fields(wtr, &name, inner)?,
            _ => wtr.write_record([name.as_str(), &format_csv_value(val)])?,
        }
    }
    Ok(())
}

fn write_array_csv<W: Write>(wtr: &mut csv::Writer<W>, arr: &[Value]) -> Result<(), csv::Error> {
    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
        wtr.write_record(&headers)?;

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(*h).map(format_csv_value).unwrap_or_default())
                    .collect();
                wtr.write_record(&row)?;
            }
        }
    } else {
        for item in arr {
            wtr.write_record([&format_csv_value(item)])?;
        }
    }
    Ok(())
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
