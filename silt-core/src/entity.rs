use crate::{EntityDecl, Result, Row, Value};

/// A struct that maps onto a table row, normally implemented through
/// `#[derive(Entity)]`.
pub trait Entity: Sized + 'static {
    /// Raw declaration consumed by the schema reflector.
    fn declaration() -> &'static EntityDecl;

    /// Current primary key value, `Value::Null` when no key field is declared.
    fn key(&self) -> Value;

    /// Persisted field values in the descriptor's normalized column order,
    /// key first.
    fn row(&self) -> Row;

    /// Rebuilds an instance from a result row in normalized column order.
    fn from_row(row: &Row) -> Result<Self>;
}
