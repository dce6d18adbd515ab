use serde_json::{Map, Value};
use std::io::{self, Write};
use tabled::{builder::Builder, Table};

/// Format output as tables using the tabled crate.
pub fn write_table<W: Write>(out: &mut W, value: &Value) -> io::Result<()> {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(result) => write_result(out, result, map),
            None => write_object(out, map),
        },
        Value::Array(arr) => write_array(out, arr),
        _ => writeln!(out, "{}", value),
    }
}

/// Scalars go in one field/value table; each array or nested object in the
/// result gets a titled table of its own.
fn write_result<W: Write>(
    out: &mut W,
    result: &Value,
    envelope: &Map<String, Value>,
) -> io::Result<()> {
    match result {
        Value::Object(res_map) => {
            let scalars: Map<String, Value> = res_map
                .iter()
                .filter(|(_, v)| !v.is_array() && !v.is_object())
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            if !scalars.is_empty() {
                write_object(out, &scalars)?;
            }

            for (key, val) in res_map {
                match val {
                    Value::Array(arr) => {
                        writeln!(out, "\n{}:", title(key))?;
                        write_array(out, arr)?;
                    }
                    Value::Object(inner) => {
                        writeln!(out, "\n{}:", title(key))?;
                        write_object(out, inner)?;
                    }
                    _ => {}
                }
            }
        }
        Value::Null => writeln!(out, "(none)")?,
        other => writeln!(out, "{}", format_value(other))?,
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            writeln!(out, "\nWarnings:")?;
            for w in warnings {
                if let Value::String(s) = w {
                    writeln!(out, "  - {}", s)?;
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        writeln!(out, "\nMethodology: {}", meth)?;
    }
    Ok(())
}

fn write_object<W: Write>(out: &mut W, map: &Map<String, Value>) -> io::Result<()> {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.as_str(), &format_value(val)]);
    }
    writeln!(out, "{}", Table::from(builder))
}

fn write_array<W: Write>(out: &mut W, arr: &[Value]) -> io::Result<()> {
    if arr.is_empty() {
        return writeln!(out, "(empty)");
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(headers.iter().map(|h| title(h)));

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(format_value).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }

        writeln!(out, "{}", Table::from(builder))
    } else {
        for item in arr {
            writeln!(out, "{}", format_value(item))?;
        }
        Ok(())
    }
}

/// `cumulative_deposits` -> `Cumulative deposits`
fn title(key: &str) -> String {
    let spaced = key.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(value: &Value) -> String {
        let mut buf = Vec::new();
        write_table(&mut buf, value).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_title() {
        assert_eq!(title("cumulative_deposits"), "Cumulative deposits");
        assert_eq!(title(""), "");
    }

    #[test]
    fn test_result_sections_and_warnings() {
        let value = json!({
            "result": {
                "currency": "ILS",
                "figures": [ { "label": "Final amount", "value": "₪1,127" } ],
                "schedule": [ { "period": 1, "total": "₪1,010" } ]
            },
            "methodology": "Monthly compounding",
            "warnings": ["Negative interest rate"]
        });
        let text = render(&value);

        assert!(text.contains("ILS"));
        assert!(text.contains("Figures:"));
        assert!(text.contains("₪1,127"));
        assert!(text.contains("Schedule:"));
        assert!(text.contains("₪1,010"));
        assert!(text.contains("  - Negative interest rate"));
        assert!(text.contains("Methodology: Monthly compounding"));
    }

    #[test]
    fn test_null_result() {
        let text = render(&json!({ "path": "x", "result": null }));
        assert!(text.contains("(none)"));
    }
}
