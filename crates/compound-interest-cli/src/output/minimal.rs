use serde_json::Value;
use std::io::{self, Write};

/// Print just the key answer value from the output.
///
/// Looks for well-known fields in the result object, then in its `summary`,
/// then falls back to the first field in the result object.
pub fn write_minimal<W: Write>(out: &mut W, value: &Value) -> io::Result<()> {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let priority_keys = [
        "final_amount",
        "final_amount_after_tax",
        "total_profit",
        "cleared",
    ];

    let summary = result_obj.get("summary");
    for scope in [Some(result_obj), summary].into_iter().flatten() {
        if let Value::Object(map) = scope {
            for key in &priority_keys {
                if let Some(val) = map.get(*key) {
                    if !val.is_null() {
                        return writeln!(out, "{}", format_minimal(val));
                    }
                }
            }
        }
    }

    if let Value::Object(map) = result_obj {
        if let Some((key, val)) = map.iter().next() {
            return writeln!(out, "{}: {}", key, format_minimal(val));
        }
    }

    writeln!(out, "{}", format_minimal(result_obj))
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(value: &Value) -> String {
        let mut buf = Vec::new();
        write_minimal(&mut buf, value).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_final_amount_from_summary() {
        let value = json!({
            "result": {
                "inputs": { "duration": 12 },
                "summary": { "total_profit": "126.8", "final_amount": "1126.8" }
            }
        });
        assert_eq!(render(&value), "1126.8\n");
    }

    #[test]
    fn test_falls_back_to_first_field() {
        let value = json!({ "result": { "initial_amount": "1000", "duration": "5" } });
        assert_eq!(render(&value), "initial_amount: 1000\n");
    }

    #[test]
    fn test_cleared_flag() {
        assert_eq!(render(&json!({ "path": "p", "cleared": true })), "true\n");
    }
}
