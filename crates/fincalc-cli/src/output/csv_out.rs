use serde_json::Value;
use std::io;

use super::{collect_series, flatten_scalars, format_value, record_headers, record_row, result_of};

/// Write output as CSV to stdout.
///
/// Results carrying a series (growth, balance, slab breakdown) are written
/// as that series so the file can be charted directly; with several series
/// the first one wins. Anything else becomes two-column `field,value` rows.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match result_of(value) {
        Value::Object(map) => {
            let mut series = Vec::new();
            collect_series("", map, &mut series);
            match series.first() {
                Some((_, items)) => write_records(&mut wtr, items),
                None => {
                    let mut scalars = Vec::new();
                    flatten_scalars("", map, &mut scalars);
                    let _ = wtr.write_record(["field", "value"]);
                    for (key, val) in scalars {
                        let _ = wtr.write_record([key, val]);
                    }
                }
            }
        }
        Value::Array(arr) => write_records(&mut wtr, arr),
        other => {
            let _ = wtr.write_record([format_value(other)]);
        }
    }

    let _ = wtr.flush();
}

fn write_records<W: io::Write>(wtr: &mut csv::Writer<W>, items: &[Value]) {
    let headers = record_headers(items);
    if headers.is_empty() {
        for item in items {
            let _ = wtr.write_record([format_value(item)]);
        }
        return;
    }
    let _ = wtr.write_record(&headers);
    for item in items {
        let _ = wtr.write_record(record_row(item, &headers));
    }
}
