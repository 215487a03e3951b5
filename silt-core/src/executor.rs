use crate::{Driver, Result, Statement, Value};

/// Outcome of a statement that modifies data.
#[derive(Default, Debug, Clone, Copy)]
pub struct RowsAffected {
    pub rows_affected: u64,
    /// Rowid assigned by the most recent insert, when the driver tracks one.
    pub last_affected_id: Option<i64>,
}

/// Owned result row, aligned with the statement's column list.
pub type Row = Box<[Value]>;

/// Anything statements can run on: a connection or an open transaction.
pub trait Executor {
    type Driver: Driver;

    fn driver(&self) -> &Self::Driver;

    /// Runs a statement for its side effect.
    fn execute(&mut self, statement: &Statement) -> Result<RowsAffected>;

    /// Runs a statement and collects the rows it produces.
    fn fetch(&mut self, statement: &Statement) -> Result<Vec<Row>>;
}
