//! Terminal rendering of calculation results.
//!
//! Results are rendered through their serde representation, so every
//! calculator gets a table without per-type code: scalar fields go into a
//! summary table, nested objects are flattened with dotted keys, and each
//! array becomes a table of its own.

use anyhow::Result;
use comfy_table::Table;
use serde::Serialize;
use serde_json::{Map, Value};

pub fn print<T: Serialize>(value: &T, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
        return Ok(());
    }

    let value = serde_json::to_value(value)?;
    let Value::Object(fields) = value else {
        println!("{}", cell(&value));
        return Ok(());
    };

    let mut summary = Table::new();
    summary.set_header(vec!["Metric", "Value"]);
    let mut collections = Vec::new();
    flatten("", &fields, &mut summary, &mut collections);

    println!("{summary}");
    for (name, rows) in collections {
        if rows.is_empty() {
            continue;
        }
        println!("\n{name}");
        println!("{}", rows_table(rows));
    }
    Ok(())
}

/// Prints the worst/base/best runs side by side, one row per scalar metric.
pub fn print_comparison<T: Serialize>(columns: &[(&str, &T)], json: bool) -> Result<()> {
    if json {
        let mut object = Map::new();
        for (name, value) in columns {
            object.insert(name.to_string(), serde_json::to_value(value)?);
        }
        println!("{}", serde_json::to_string_pretty(&Value::Object(object))?);
        return Ok(());
    }

    let values = columns
        .iter()
        .map(|(_, value)| serde_json::to_value(value))
        .collect::<Result<Vec<_>, _>>()?;

    let mut table = Table::new();
    let mut header = vec!["Metric".to_string()];
    header.extend(columns.iter().map(|(name, _)| name.to_string()));
    table.set_header(header);

    let Some(Value::Object(first)) = values.first() else {
        println!("{table}");
        return Ok(());
    };
    for (key, field) in first {
        if field.is_array() || field.is_object() {
            continue;
        }
        let mut row = vec![key.clone()];
        row.extend(values.iter().map(|v| cell(&v[key.as_str()])));
        table.add_row(row);
    }

    println!("{table}");
    Ok(())
}

fn flatten<'a>(
    prefix: &str,
    fields: &'a Map<String, Value>,
    summary: &mut Table,
    collections: &mut Vec<(String, &'a Vec<Value>)>,
) {
    for (key, field) in fields {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match field {
            Value::Object(nested) => flatten(&name, nested, summary, collections),
            Value::Array(rows) => collections.push((name, rows)),
            scalar => {
                summary.add_row(vec![name, cell(scalar)]);
            }
        }
    }
}

fn rows_table(rows: &[Value]) -> Table {
    // Columns are the union of keys in first-seen order; tagged enum rows
    // differ in which fields they carry.
    let mut columns: Vec<&str> = Vec::new();
    for row in rows {
        if let Value::Object(fields) = row {
            for key in fields.keys() {
                if !columns.contains(&key.as_str()) {
                    columns.push(key);
                }
            }
        }
    }

    let mut table = Table::new();
    if columns.is_empty() {
        table.set_header(vec!["Value"]);
        for row in rows {
            table.add_row(vec![cell(row)]);
        }
        return table;
    }

    table.set_header(columns.clone());
    for row in rows {
        table.add_row(columns.iter().map(|column| cell(&row[*column])).collect::<Vec<_>>());
    }
    table
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
