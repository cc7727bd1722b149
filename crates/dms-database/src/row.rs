//! Conversion of untyped list rows into JSON objects.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};
use sqlx::postgres::PgRow;
use sqlx::{Column, Row};

/// Convert every column of `row` into a JSON member named after the column.
///
/// Timestamps become ISO-8601 strings, integers and booleans keep their
/// JSON type, and NULL or unsupported values become `null`.
pub fn row_to_json(row: &PgRow) -> Map<String, Value> {
    let mut map = Map::new();
    for column in row.columns() {
        let name = column.name();
        let value = row
            .try_get::<DateTime<Utc>, _>(name)
            .map(timestamp_to_json)
            .or_else(|_| {
                row.try_get::<NaiveDateTime, _>(name)
                    .map(|dt| timestamp_to_json(dt.and_utc()))
            })
            .or_else(|_| row.try_get::<i64, _>(name).map(Value::from))
            .or_else(|_| row.try_get::<i32, _>(name).map(Value::from))
            .or_else(|_| row.try_get::<i16, _>(name).map(Value::from))
            .or_else(|_| row.try_get::<bool, _>(name).map(Value::from))
            .or_else(|_| row.try_get::<String, _>(name).map(Value::String))
            .unwrap_or(Value::Null);
        map.insert(name.to_string(), value);
    }
    map
}

/// Render a timestamp as `YYYY-MM-DDTHH:MM:SSZ`.
pub fn timestamp_to_json(dt: DateTime<Utc>) -> Value {
    Value::String(dt.to_rfc3339_opts(SecondsFormat::Secs, true))
}
