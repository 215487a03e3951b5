use crate::{SqliteConnection, SqliteDriver};
use log::warn;
use silt_core::{Driver, Executor, Result, Row, RowsAffected, SqlWriter, Statement, Transaction};

/// Transaction scope over a borrowed connection.
///
/// Dropping the scope without committing rolls the transaction back, so an
/// early `?` inside a batch cannot leave the connection mid-transaction.
pub struct SqliteTransaction<'c> {
    connection: &'c mut SqliteConnection,
    finished: bool,
}

impl<'c> SqliteTransaction<'c> {
    pub(crate) fn new(connection: &'c mut SqliteConnection) -> Result<Self> {
        let begin = connection.driver().sql_writer().sql_begin();
        connection.execute(&begin)?;
        Ok(Self {
            connection,
            finished: false,
        })
    }

    fn finish(&mut self, statement: &Statement) -> Result<()> {
        self.finished = true;
        self.connection.execute(statement).map(|_| ())
    }
}

impl Executor for SqliteTransaction<'_> {
    type Driver = SqliteDriver;

    fn driver(&self) -> &SqliteDriver {
        self.connection.driver()
    }

    fn execute(&mut self, statement: &Statement) -> Result<RowsAffected> {
        self.connection.execute(statement)
    }

    fn fetch(&mut self, statement: &Statement) -> Result<Vec<Row>> {
        self.connection.fetch(statement)
    }
}

impl Transaction for SqliteTransaction<'_> {
    fn commit(mut self) -> Result<()> {
        let statement = self.driver().sql_writer().sql_commit();
        self.finish(&statement)
    }

    fn rollback(mut self) -> Result<()> {
        let statement = self.driver().sql_writer().sql_rollback();
        self.finish(&statement)
    }
}

impl Drop for SqliteTransaction<'_> {
    fn drop(&mut self) {
        if !self.finished {
            warn!("transaction dropped without commit, rolling back");
            let statement = self.driver().sql_writer().sql_rollback();
            if let Err(error) = self.finish(&statement) {
                warn!("implicit rollback failed: {}", error);
            }
        }
    }
}
