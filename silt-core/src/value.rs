use std::{fmt, mem::discriminant};
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};

/// Storage class a column resolves to, SQLite's type system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affinity {
    Integer,
    Real,
    Text,
    Blob,
}

impl Affinity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Affinity::Integer => "INTEGER",
            Affinity::Real => "REAL",
            Affinity::Text => "TEXT",
            Affinity::Blob => "BLOB",
        }
    }
}

impl fmt::Display for Affinity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dynamically typed value moving between entities and the database.
///
/// Each variant carries an `Option` payload, a `None` payload is the typed
/// flavor of SQL NULL. The field types supported by the derive macro all map
/// onto one of these variants.
#[derive(Default, Debug, Clone, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Boolean(Option<bool>),
    Int8(Option<i8>),
    Int16(Option<i16>),
    Int32(Option<i32>),
    Int64(Option<i64>),
    Int128(Option<i128>),
    UInt8(Option<u8>),
    UInt16(Option<u16>),
    UInt32(Option<u32>),
    UInt64(Option<u64>),
    UInt128(Option<u128>),
    Float32(Option<f32>),
    Float64(Option<f64>),
    Varchar(Option<String>),
    Blob(Option<Box<[u8]>>),
    Date(Option<Date>),
    Time(Option<Time>),
    Timestamp(Option<PrimitiveDateTime>),
    TimestampWithTimezone(Option<OffsetDateTime>),
}

impl Value {
    /// Same variant, payload ignored.
    pub fn same_type(&self, other: &Self) -> bool {
        discriminant(self) == discriminant(other)
    }

    pub fn is_null(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Boolean(v) => v.is_none(),
            Value::Int8(v) => v.is_none(),
            Value::Int16(v) => v.is_none(),
            Value::Int32(v) => v.is_none(),
            Value::Int64(v) => v.is_none(),
            Value::Int128(v) => v.is_none(),
            Value::UInt8(v) => v.is_none(),
            Value::UInt16(v) => v.is_none(),
            Value::UInt32(v) => v.is_none(),
            Value::UInt64(v) => v.is_none(),
            Value::UInt128(v) => v.is_none(),
            Value::Float32(v) => v.is_none(),
            Value::Float64(v) => v.is_none(),
            Value::Varchar(v) => v.is_none(),
            Value::Blob(v) => v.is_none(),
            Value::Date(v) => v.is_none(),
            Value::Time(v) => v.is_none(),
            Value::Timestamp(v) => v.is_none(),
            Value::TimestampWithTimezone(v) => v.is_none(),
        }
    }

    /// Resolves the storage affinity of this value's type.
    ///
    /// `None` means the type cannot be stored: `Null` carries no type at all,
    /// and integers wider than 64 signed bits do not fit a SQLite INTEGER.
    /// Booleans store as 0 or 1, temporal types store as formatted TEXT.
    pub fn affinity(&self) -> Option<Affinity> {
        Some(match self {
            Value::Boolean(..)
            | Value::Int8(..)
            | Value::Int16(..)
            | Value::Int32(..)
            | Value::Int64(..)
            | Value::UInt8(..)
            | Value::UInt16(..)
            | Value::UInt32(..) => Affinity::Integer,
            Value::Float32(..) | Value::Float64(..) => Affinity::Real,
            Value::Varchar(..)
            | Value::Date(..)
            | Value::Time(..)
            | Value::Timestamp(..)
            | Value::TimestampWithTimezone(..) => Affinity::Text,
            Value::Blob(..) => Affinity::Blob,
            Value::Null | Value::Int128(..) | Value::UInt64(..) | Value::UInt128(..) => {
                return None;
            }
        })
    }
}
