use serde_json::Value;

use super::{quote_rows, scalar_to_string};

/// One line per quote row, or key=value pairs for everything else.
pub fn print_minimal(value: &Value) {
    if let Some(rows) = quote_rows(value) {
        for row in rows {
            println!(
                "{}\t{}\t{}\t{}",
                row.get("termLabel").map(scalar_to_string).unwrap_or_default(),
                row.get("percentageDisplay")
                    .map(scalar_to_string)
                    .unwrap_or_default(),
                row.get("paymentDisplay")
                    .map(scalar_to_string)
                    .unwrap_or_default(),
                row.get("lender").map(scalar_to_string).unwrap_or_default(),
            );
        }
        return;
    }

    let target = value.get("result").unwrap_or(value);
    if let Value::Object(map) = target {
        for (key, val) in map {
            println!("{}={}", key, scalar_to_string(val));
        }
    } else {
        println!("{}", target);
    }
}
