use rusqlite::Row;
use rusqlite::types::Value;

use crate::model::records::DynRow;

pub const NA: &str = "NA";

pub fn value_to_json(value: Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::String(NA.to_string()),
        Value::Integer(i) => serde_json::Value::from(i),
        Value::Real(f) => serde_json::Number::from_f64(f)
            .map(serde_json::Value::Number)
            .unwrap_or_else(|| serde_json::Value::String(NA.to_string())),
        Value::Text(s) => serde_json::Value::String(s),
        Value::Blob(b) => serde_json::Value::String(String::from_utf8_lossy(&b).into_owned()),
    }
}

/// Reads every column of a row. A repeated column name keeps its first value.
pub fn read_dyn_row(row: &Row<'_>, columns: &[String]) -> rusqlite::Result<DynRow> {
    let mut out = DynRow::new();
    for (idx, name) in columns.iter().enumerate() {
        if out.contains_key(name) {
            continue;
        }
        let value = row.get::<_, Value>(idx)?;
        out.insert(name.clone(), value_to_json(value));
    }
    Ok(out)
}

/// Text view of a column whatever its storage class; NULL and empty text are `None`.
pub fn opt_text(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<String>> {
    let text = match row.get::<_, Value>(idx)? {
        Value::Null => None,
        Value::Integer(i) => Some(i.to_string()),
        Value::Real(f) => Some(f.to_string()),
        Value::Text(s) => Some(s),
        Value::Blob(b) => Some(String::from_utf8_lossy(&b).into_owned()),
    };
    Ok(text.filter(|s| !s.is_empty()))
}

pub fn opt_int(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<i64>> {
    Ok(match row.get::<_, Value>(idx)? {
        Value::Integer(i) => Some(i),
        Value::Real(f) if f.is_finite() => Some(f as i64),
        Value::Text(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    })
}

pub fn opt_real(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<f64>> {
    Ok(match row.get::<_, Value>(idx)? {
        Value::Integer(i) => Some(i as f64),
        Value::Real(f) => Some(f),
        Value::Text(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

/// Ordering used when sorting display rows: numbers before text, numbers by
/// value, text lexicographically.
pub fn compare_json(a: Option<&serde_json::Value>, b: Option<&serde_json::Value>) -> std::cmp::Ordering {
    use serde_json::Value as J;
    use std::cmp::Ordering;

    match (a, b) {
        (Some(J::Number(x)), Some(J::Number(y))) => {
            let x = x.as_f64().unwrap_or(f64::NAN);
            let y = y.as_f64().unwrap_or(f64::NAN);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(J::Number(_)), Some(_)) => Ordering::Less,
        (Some(_), Some(J::Number(_))) => Ordering::Greater,
        (Some(J::String(x)), Some(J::String(y))) => x.cmp(y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}
