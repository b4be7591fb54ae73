use serde_json::Value;

use super::{format_value, result_of};

/// Print just the key answer value from the output.
///
/// Heuristic: look for the headline field of each command in order of
/// priority, then fall back to the first field in the result object.
pub fn print_minimal(value: &Value) {
    let result_obj = result_of(value);

    let priority_keys = [
        "future_value",
        "emi",
        "better_regime",
        "monthly_savings_required",
        "slabs",
    ];

    if let Value::Object(map) = result_obj {
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() || *key == "better_regime" {
                    println!("{}", minimal_line(key, val, map));
                    return;
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_value(val));
            return;
        }
    }

    println!("{}", format_value(result_obj));
}

/// A regime verdict is only meaningful with the amount it saves; a tie
/// (`null` verdict) prints as "either".
fn minimal_line(key: &str, val: &Value, map: &serde_json::Map<String, Value>) -> String {
    match (key, map.get("savings")) {
        ("better_regime", _) if val.is_null() => "either".to_string(),
        ("better_regime", Some(savings)) => {
            format!("{} (saves {})", format_value(val), format_value(savings))
        }
        ("slabs", _) => serde_json::to_string(val).unwrap_or_default(),
        _ => format_value(val),
    }
}
