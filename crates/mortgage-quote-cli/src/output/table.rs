use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{quote_rows, scalar_to_string};

/// Format output as a table using the tabled crate. Quote envelopes
/// get the dedicated Term/Rate/Payment/Lender layout; anything else
/// falls back to a flat field/value table.
pub fn print_table(value: &Value) {
    if let Some(rows) = quote_rows(value) {
        print_quote_table(rows);
        print_summary(value);
        print_warnings(value);
    } else if let Some(result) = value.get("result") {
        print_flat_object(result);
        print_warnings(value);
    } else {
        print_flat_object(value);
    }
}

fn print_quote_table(rows: &[Value]) {
    let mut builder = Builder::default();
    builder.push_record(["Term", "Rate", "Monthly Payment", "Lender", "Source"]);
    for row in rows {
        builder.push_record([
            str_field(row, "termLabel"),
            str_field(row, "percentageDisplay"),
            str_field(row, "paymentDisplay"),
            str_field(row, "lender"),
            str_field(row, "source"),
        ]);
    }
    let table = Table::from(builder);
    println!("{}", table);
}

fn print_summary(value: &Value) {
    let Some(result) = value.get("result") else {
        return;
    };
    let fields = [
        ("Total mortgage required", "totalMortgageRequired"),
        ("LTV %", "ltv"),
        ("LTV bracket", "ltvBracket"),
        ("Amortization (years)", "amortizationYears"),
        ("Context", "context"),
    ];
    println!();
    for (label, key) in fields {
        if let Some(v) = result.get(key) {
            println!("{}: {}", label, scalar_to_string(v));
        }
    }
}

fn print_warnings(value: &Value) {
    if let Some(Value::Array(warnings)) = value.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }
}

fn print_flat_object(value: &Value) {
    if let Value::Object(map) = value {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in map {
            builder.push_record([key.clone(), scalar_to_string(val)]);
        }
        let table = Table::from(builder);
        println!("{}", table);
    } else {
        println!("{}", value);
    }
}

fn str_field(row: &Value, key: &str) -> String {
    row.get(key).map(scalar_to_string).unwrap_or_default()
}
