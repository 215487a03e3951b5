use crate::{
    SqliteDriver, SqliteTransaction,
    convert::{bind_value, extract_value},
};
use log::trace;
use rusqlite::{ErrorCode, params_from_iter};
use silt_core::{Connection, Error, Executor, Result, Row, RowsAffected, SqlErrorKind, Statement};
use std::path::Path;

pub(crate) fn sqlite_error(error: rusqlite::Error, sql: &str) -> Error {
    let kind = match &error {
        rusqlite::Error::SqliteFailure(e, ..) if e.code == ErrorCode::ConstraintViolation => {
            SqlErrorKind::Constraint
        }
        _ => SqlErrorKind::Other,
    };
    Error::Sql {
        kind,
        message: error.to_string(),
        sql: sql.to_owned(),
    }
}

/// A single synchronous session with an embedded SQLite database.
pub struct SqliteConnection {
    conn: rusqlite::Connection,
    driver: SqliteDriver,
}

impl SqliteConnection {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        rusqlite::Connection::open(path)
            .map(Self::wrap)
            .map_err(|e| sqlite_error(e, &path.display().to_string()))
    }

    pub fn open_in_memory() -> Result<Self> {
        rusqlite::Connection::open_in_memory()
            .map(Self::wrap)
            .map_err(|e| sqlite_error(e, ":memory:"))
    }

    fn wrap(conn: rusqlite::Connection) -> Self {
        Self {
            conn,
            driver: SqliteDriver::new(),
        }
    }

    fn bind_all(statement: &Statement) -> Result<Vec<rusqlite::types::Value>> {
        statement.values.iter().map(bind_value).collect()
    }
}

impl Executor for SqliteConnection {
    type Driver = SqliteDriver;

    fn driver(&self) -> &SqliteDriver {
        &self.driver
    }

    fn execute(&mut self, statement: &Statement) -> Result<RowsAffected> {
        trace!("execute: {}", statement);
        let params = Self::bind_all(statement)?;
        let mut prepared = self
            .conn
            .prepare(&statement.sql)
            .map_err(|e| sqlite_error(e, &statement.sql))?;
        let rows_affected = prepared
            .execute(params_from_iter(params))
            .map_err(|e| sqlite_error(e, &statement.sql))? as u64;
        drop(prepared);
        Ok(RowsAffected {
            rows_affected,
            last_affected_id: Some(self.conn.last_insert_rowid()),
        })
    }

    fn fetch(&mut self, statement: &Statement) -> Result<Vec<Row>> {
        trace!("fetch: {}", statement);
        let params = Self::bind_all(statement)?;
        let mut prepared = self
            .conn
            .prepare(&statement.sql)
            .map_err(|e| sqlite_error(e, &statement.sql))?;
        let columns = prepared.column_count();
        let mut rows = prepared
            .query(params_from_iter(params))
            .map_err(|e| sqlite_error(e, &statement.sql))?;
        let mut result = Vec::new();
        while let Some(row) = rows.next().map_err(|e| sqlite_error(e, &statement.sql))? {
            let mut values = Vec::with_capacity(columns);
            for i in 0..columns {
                let cell = row
                    .get_ref(i)
                    .map_err(|e| sqlite_error(e, &statement.sql))?;
                values.push(extract_value(cell)?);
            }
            result.push(values.into_boxed_slice());
        }
        Ok(result)
    }
}

impl Connection for SqliteConnection {
    type Transaction<'c> = SqliteTransaction<'c>;

    fn begin(&mut self) -> Result<SqliteTransaction<'_>> {
        SqliteTransaction::new(self)
    }
}
