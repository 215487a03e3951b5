use rusqlite::types::ValueRef;
use silt_core::{DATE_FORMAT, DATETIME_FORMAT, Error, Result, TIME_FORMAT, Value};
use time::format_description::well_known::Rfc3339;

fn conversion(message: String) -> Error {
    Error::Conversion {
        context: "bound parameter".into(),
        message,
    }
}

/// Binds a core value as a SQLite parameter. Temporal values become TEXT in
/// their column layout, booleans become 0 or 1.
pub(crate) fn bind_value(value: &Value) -> Result<rusqlite::types::Value> {
    use rusqlite::types::Value as Sql;
    Ok(match value {
        Value::Boolean(Some(v)) => Sql::Integer(*v as i64),
        Value::Int8(Some(v)) => Sql::Integer((*v).into()),
        Value::Int16(Some(v)) => Sql::Integer((*v).into()),
        Value::Int32(Some(v)) => Sql::Integer((*v).into()),
        Value::Int64(Some(v)) => Sql::Integer(*v),
        Value::UInt8(Some(v)) => Sql::Integer((*v).into()),
        Value::UInt16(Some(v)) => Sql::Integer((*v).into()),
        Value::UInt32(Some(v)) => Sql::Integer((*v).into()),
        Value::Int128(Some(..)) | Value::UInt64(Some(..)) | Value::UInt128(Some(..)) => {
            return Err(conversion(
                "integer does not fit the 64 signed bits SQLite stores".into(),
            ));
        }
        Value::Float32(Some(v)) => Sql::Real((*v).into()),
        Value::Float64(Some(v)) => Sql::Real(*v),
        Value::Varchar(Some(v)) => Sql::Text(v.clone()),
        Value::Blob(Some(v)) => Sql::Blob(v.to_vec()),
        Value::Date(Some(v)) => {
            Sql::Text(v.format(DATE_FORMAT).map_err(|e| conversion(e.to_string()))?)
        }
        Value::Time(Some(v)) => {
            Sql::Text(v.format(TIME_FORMAT).map_err(|e| conversion(e.to_string()))?)
        }
        Value::Timestamp(Some(v)) => Sql::Text(
            v.format(DATETIME_FORMAT)
                .map_err(|e| conversion(e.to_string()))?,
        ),
        Value::TimestampWithTimezone(Some(v)) => {
            Sql::Text(v.format(&Rfc3339).map_err(|e| conversion(e.to_string()))?)
        }
        // Null and every None payload.
        _ => Sql::Null,
    })
}

/// Converts a SQLite result cell into a core value. The engine only produces
/// four storage classes, narrowing happens later against the entity's field
/// types.
pub(crate) fn extract_value(value: ValueRef<'_>) -> Result<Value> {
    Ok(match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(v) => Value::Int64(Some(v)),
        ValueRef::Real(v) => Value::Float64(Some(v)),
        ValueRef::Text(v) => Value::Varchar(Some(
            std::str::from_utf8(v)
                .map_err(|e| Error::Conversion {
                    context: "fetched text".into(),
                    message: e.to_string(),
                })?
                .to_owned(),
        )),
        ValueRef::Blob(v) => Value::Blob(Some(v.to_vec().into_boxed_slice())),
    })
}
