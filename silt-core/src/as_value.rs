use crate::{Error, Result, Value};
use time::{
    Date, OffsetDateTime, PrimitiveDateTime, Time, format_description::BorrowedFormatItem,
    format_description::well_known::Rfc3339, macros::format_description,
};

/// Text layout for DATE columns.
pub static DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
/// Text layout for TIME columns, fractional seconds kept when present.
pub static TIME_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!(version = 2, "[hour]:[minute]:[second][optional [.[subsecond]]]");
/// Text layout for local TIMESTAMP columns.
pub static DATETIME_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    version = 2,
    "[year]-[month]-[day] [hour]:[minute]:[second][optional [.[subsecond]]]"
);

/// Conversion from a concrete field type into [`Value`].
pub trait AsValue {
    /// The `None`-payload value of the matching variant, used as a column template.
    fn as_empty_value() -> Value;
    fn as_value(self) -> Value;
}

macro_rules! impl_as_value {
    ($type:ty, $variant:ident) => {
        impl AsValue for $type {
            fn as_empty_value() -> Value {
                Value::$variant(None)
            }
            fn as_value(self) -> Value {
                Value::$variant(Some(self.into()))
            }
        }
    };
}

impl_as_value!(bool, Boolean);
impl_as_value!(i8, Int8);
impl_as_value!(i16, Int16);
impl_as_value!(i32, Int32);
impl_as_value!(i64, Int64);
impl_as_value!(i128, Int128);
impl_as_value!(u8, UInt8);
impl_as_value!(u16, UInt16);
impl_as_value!(u32, UInt32);
impl_as_value!(u64, UInt64);
impl_as_value!(u128, UInt128);
impl_as_value!(f32, Float32);
impl_as_value!(f64, Float64);
impl_as_value!(String, Varchar);
impl_as_value!(Box<[u8]>, Blob);
impl_as_value!(Date, Date);
impl_as_value!(Time, Time);
impl_as_value!(PrimitiveDateTime, Timestamp);
impl_as_value!(OffsetDateTime, TimestampWithTimezone);

impl AsValue for &str {
    fn as_empty_value() -> Value {
        Value::Varchar(None)
    }
    fn as_value(self) -> Value {
        Value::Varchar(Some(self.to_owned()))
    }
}

impl AsValue for Vec<u8> {
    fn as_empty_value() -> Value {
        Value::Blob(None)
    }
    fn as_value(self) -> Value {
        Value::Blob(Some(self.into_boxed_slice()))
    }
}

impl<T: AsValue> AsValue for Option<T> {
    fn as_empty_value() -> Value {
        T::as_empty_value()
    }
    fn as_value(self) -> Value {
        match self {
            Some(v) => v.as_value(),
            None => T::as_empty_value(),
        }
    }
}

impl<T: AsValue> From<T> for Value {
    fn from(value: T) -> Self {
        value.as_value()
    }
}

/// Conversion from a fetched [`Value`] back into a concrete field type.
///
/// Returns `None` when the variant does not carry the requested type. SQLite
/// hands every integer back as `Int64` and every decimal as `Float64`, the
/// narrowing conversions here recover the declared field type.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Option<Self>;
}

macro_rules! impl_from_integer {
    ($type:ty, $variant:ident) => {
        impl FromValue for $type {
            fn from_value(value: &Value) -> Option<Self> {
                match value {
                    Value::$variant(Some(v)) => Some(*v),
                    Value::Int64(Some(v)) => (*v).try_into().ok(),
                    _ => None,
                }
            }
        }
    };
}

impl_from_integer!(i8, Int8);
impl_from_integer!(i16, Int16);
impl_from_integer!(i32, Int32);
impl_from_integer!(i128, Int128);
impl_from_integer!(u8, UInt8);
impl_from_integer!(u16, UInt16);
impl_from_integer!(u32, UInt32);
impl_from_integer!(u64, UInt64);
impl_from_integer!(u128, UInt128);

impl FromValue for i64 {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int64(Some(v)) => Some(*v),
            Value::Int8(Some(v)) => Some((*v).into()),
            Value::Int16(Some(v)) => Some((*v).into()),
            Value::Int32(Some(v)) => Some((*v).into()),
            _ => None,
        }
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Boolean(Some(v)) => Some(*v),
            Value::Int64(Some(v)) => Some(*v != 0),
            _ => None,
        }
    }
}

impl FromValue for f32 {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float32(Some(v)) => Some(*v),
            Value::Float64(Some(v)) => Some(*v as f32),
            Value::Int64(Some(v)) => Some(*v as f32),
            _ => None,
        }
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float64(Some(v)) => Some(*v),
            Value::Float32(Some(v)) => Some((*v).into()),
            Value::Int64(Some(v)) => Some(*v as f64),
            _ => None,
        }
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Varchar(Some(v)) => Some(v.clone()),
            _ => None,
        }
    }
}

impl FromValue for Vec<u8> {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Blob(Some(v)) => Some(v.to_vec()),
            _ => None,
        }
    }
}

impl FromValue for Box<[u8]> {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Blob(Some(v)) => Some(v.clone()),
            _ => None,
        }
    }
}

impl FromValue for Date {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Date(Some(v)) => Some(*v),
            Value::Varchar(Some(v)) => Date::parse(v, DATE_FORMAT).ok(),
            _ => None,
        }
    }
}

impl FromValue for Time {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Time(Some(v)) => Some(*v),
            Value::Varchar(Some(v)) => Time::parse(v, TIME_FORMAT).ok(),
            _ => None,
        }
    }
}

impl FromValue for PrimitiveDateTime {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Timestamp(Some(v)) => Some(*v),
            Value::Varchar(Some(v)) => PrimitiveDateTime::parse(v, DATETIME_FORMAT).ok(),
            _ => None,
        }
    }
}

impl FromValue for OffsetDateTime {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::TimestampWithTimezone(Some(v)) => Some(*v),
            Value::Varchar(Some(v)) => OffsetDateTime::parse(v, &Rfc3339).ok(),
            _ => None,
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> Option<Self> {
        if value.is_null() {
            Some(None)
        } else {
            T::from_value(value).map(Some)
        }
    }
}

/// Reads column `index` of a result row into a concrete field type.
pub fn decode<T: FromValue>(row: &[Value], index: usize, column: &str) -> Result<T> {
    let value = row.get(index).ok_or_else(|| Error::Conversion {
        context: format!("column `{}`", column),
        message: format!("row has {} values, index {} is out of range", row.len(), index),
    })?;
    T::from_value(value).ok_or_else(|| Error::Conversion {
        context: format!("column `{}`", column),
        message: format!("unexpected value {:?}", value),
    })
}
