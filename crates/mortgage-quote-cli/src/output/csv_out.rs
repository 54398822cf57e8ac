use serde_json::Value;
use std::io;

use super::{quote_rows, scalar_to_string};

/// CSV to stdout: quote envelopes become one row per term, anything
/// else a key,value listing.
pub fn print_csv(value: &Value) {
    let mut writer = csv::Writer::from_writer(io::stdout());
    let result = if let Some(rows) = quote_rows(value) {
        write_quote_rows(&mut writer, rows)
    } else {
        write_flat(&mut writer, value.get("result").unwrap_or(value))
    };
    if let Err(e) = result.and_then(|_| writer.flush().map_err(Into::into)) {
        eprintln!("CSV output error: {}", e);
    }
}

fn write_quote_rows(
    writer: &mut csv::Writer<io::Stdout>,
    rows: &[Value],
) -> Result<(), Box<dyn std::error::Error>> {
    writer.write_record(["term", "ratePercent", "monthlyPayment", "lender", "source"])?;
    for row in rows {
        writer.write_record([
            field(row, "term"),
            field(row, "percentageDisplay"),
            field(row, "paymentDisplay"),
            field(row, "lender"),
            field(row, "source"),
        ])?;
    }
    Ok(())
}

fn write_flat(
    writer: &mut csv::Writer<io::Stdout>,
    value: &Value,
) -> Result<(), Box<dyn std::error::Error>> {
    writer.write_record(["field", "value"])?;
    if let Value::Object(map) = value {
        for (key, val) in map {
            writer.write_record([key.clone(), scalar_to_string(val)])?;
        }
    }
    Ok(())
}

fn field(row: &Value, key: &str) -> String {
    row.get(key).map(scalar_to_string).unwrap_or_default()
}
