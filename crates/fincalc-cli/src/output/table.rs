use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{collect_series, flatten_scalars, format_value, record_headers, record_row, result_of};

/// Format output as tables using the tabled crate: one Field/Value table for
/// the scalar results, then one table per series.
pub fn print_table(value: &Value) {
    match result_of(value) {
        Value::Object(res_map) => {
            let mut scalars = Vec::new();
            flatten_scalars("", res_map, &mut scalars);
            let mut builder = Builder::default();
            builder.push_record(["Field", "Value"]);
            for (key, val) in scalars {
                builder.push_record([key, val]);
            }
            println!("{}", Table::from(builder));

            let mut series = Vec::new();
            collect_series("", res_map, &mut series);
            for (name, items) in series {
                println!("\n{}:", name);
                print_array_table(items);
            }
        }
        Value::Array(arr) => print_array_table(arr),
        other => println!("{}", format_value(other)),
    }

    print_envelope_notes(value);
}

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    let headers = record_headers(arr);
    if headers.is_empty() {
        for item in arr {
            println!("{}", format_value(item));
        }
        return;
    }

    let mut builder = Builder::default();
    builder.push_record(headers.clone());
    for item in arr {
        builder.push_record(record_row(item, &headers));
    }
    println!("{}", Table::from(builder));
}

fn print_envelope_notes(value: &Value) {
    let Some(envelope) = value.as_object() else {
        return;
    };

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
