pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::{Map, Value};

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// The `result` object of a computation envelope, or the value itself.
pub(crate) fn result_of(value: &Value) -> &Value {
    value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value)
}

/// Scalar leaves of `map` as `(dotted.key, value)` pairs. Nested objects are
/// flattened; arrays of objects (series, slab breakdowns) are skipped and
/// collected by [`collect_series`] instead.
pub(crate) fn flatten_scalars(prefix: &str, map: &Map<String, Value>, out: &mut Vec<(String, String)>) {
    for (key, val) in map {
        let name = join_key(prefix, key);
        match val {
            Value::Object(inner) => flatten_scalars(&name, inner, out),
            Value::Array(items) if is_record_array(items) => {}
            _ => out.push((name, format_value(val))),
        }
    }
}

/// Arrays of objects anywhere under `map`, keyed by dotted path.
pub(crate) fn collect_series<'a>(
    prefix: &str,
    map: &'a Map<String, Value>,
    out: &mut Vec<(String, &'a [Value])>,
) {
    for (key, val) in map {
        let name = join_key(prefix, key);
        match val {
            Value::Object(inner) => collect_series(&name, inner, out),
            Value::Array(items) if is_record_array(items) => out.push((name, items)),
            _ => {}
        }
    }
}

/// Column headers taken from the first record.
pub(crate) fn record_headers(items: &[Value]) -> Vec<String> {
    match items.first() {
        Some(Value::Object(first)) => first.keys().cloned().collect(),
        _ => Vec::new(),
    }
}

pub(crate) fn record_row(item: &Value, headers: &[String]) -> Vec<String> {
    headers
        .iter()
        .map(|h| item.get(h.as_str()).map(format_value).unwrap_or_default())
        .collect()
}

fn is_record_array(items: &[Value]) -> bool {
    matches!(items.first(), Some(Value::Object(_)))
}

fn join_key(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

pub(crate) fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
