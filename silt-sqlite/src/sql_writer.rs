use silt_core::{SqlWriter, Statement};

/// SQLite dialect. The generic writer already speaks it apart from how
/// transactions start.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqliteSqlWriter;

impl SqlWriter for SqliteSqlWriter {
    /// The write lock is taken up front, a batch that fails halfway never
    /// holds a deferred lock while other work proceeds.
    fn sql_begin(&self) -> Statement {
        Statement::raw("BEGIN IMMEDIATE;")
    }
}
