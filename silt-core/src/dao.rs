use crate::{
    AsValue, Connection, Driver, Entity, Error, Executor, Registry, Result, SqlWriter, Statement,
    TableDef, Transaction, Value, decode,
};
use log::{debug, warn};
use std::{marker::PhantomData, sync::Arc};

/// Generic data access object: every CRUD operation for one entity type over
/// one borrowed connection.
///
/// `K` is the primary key type used for lookups, `E` the entity. Construction
/// is fail fast: a declaration that does not validate never produces a DAO.
pub struct Dao<'c, C, K, E>
where
    C: Connection,
    K: AsValue,
    E: Entity,
{
    connection: &'c mut C,
    table: Arc<TableDef>,
    key: PhantomData<K>,
    entity: PhantomData<E>,
}

impl<'c, C, K, E> Dao<'c, C, K, E>
where
    C: Connection,
    K: AsValue,
    E: Entity,
{
    pub fn new(connection: &'c mut C, registry: &Registry) -> Result<Self> {
        let table = registry.table_of::<E>()?;
        Ok(Self {
            connection,
            table,
            key: PhantomData,
            entity: PhantomData,
        })
    }

    pub fn table(&self) -> &TableDef {
        &self.table
    }

    fn writer(&self) -> <C::Driver as Driver>::SqlWriter {
        self.connection.driver().sql_writer()
    }

    /// Creates the backing table. Safe to call when it already exists.
    pub fn create_table(&mut self) -> Result<()> {
        let statement = self.writer().sql_create_table(&self.table, true);
        self.connection.execute(&statement).map(|_| ())
    }

    /// Drops the backing table. Safe to call when it does not exist.
    pub fn drop_table(&mut self) -> Result<()> {
        let statement = self.writer().sql_drop_table(&self.table, true);
        self.connection.execute(&statement).map(|_| ())
    }

    pub fn count(&mut self) -> Result<i64> {
        let statement = self.writer().sql_count(&self.table);
        let rows = self.connection.fetch(&statement)?;
        match rows.first() {
            Some(row) => decode(row, 0, "count"),
            None => Ok(0),
        }
    }

    /// Inserts one entity and returns the row id the engine assigned.
    ///
    /// A constraint violation (duplicate key, null in a NOT NULL column) is
    /// not an error here: the row is simply not stored and `-1` comes back.
    /// Every other failure is reported as an error.
    pub fn create(&mut self, entity: &E) -> Result<i64> {
        let statement = self.writer().sql_insert(&self.table, entity.row());
        match self.connection.execute(&statement) {
            Ok(affected) => Ok(affected.last_affected_id.unwrap_or(-1)),
            Err(error) if error.is_constraint_violation() => {
                debug!("insert into `{}` rejected: {}", self.table.name, error);
                Ok(-1)
            }
            Err(error) => Err(error),
        }
    }

    /// Inserts a batch atomically: either every entity is stored or none is.
    ///
    /// A constraint violation rolls the whole batch back and returns
    /// `Ok(false)`, any other failure rolls back and propagates.
    pub fn batch_create(&mut self, entities: &[E]) -> Result<bool> {
        if entities.is_empty() {
            return Ok(true);
        }
        let statements: Vec<Statement> = {
            let writer = self.writer();
            entities
                .iter()
                .map(|entity| writer.sql_insert(&self.table, entity.row()))
                .collect()
        };
        let mut transaction = self.connection.begin()?;
        for statement in &statements {
            if let Err(error) = transaction.execute(statement) {
                warn!(
                    "batch insert into `{}` rolled back: {}",
                    self.table.name, error
                );
                transaction
                    .rollback()
                    .unwrap_or_else(|e| warn!("rollback failed: {}", e));
                return if error.is_constraint_violation() {
                    Ok(false)
                } else {
                    Err(error)
                };
            }
        }
        transaction.commit()?;
        Ok(true)
    }

    /// Inserts the entities whose key is not present yet, skipping the rest.
    /// Returns how many rows were stored. Not atomic, unlike [`batch_create`].
    ///
    /// [`batch_create`]: Dao::batch_create
    pub fn batch_create_where_not_exist(&mut self, entities: &[E]) -> Result<usize> {
        let mut inserted = 0;
        for entity in entities {
            if self.exists(entity)? {
                continue;
            }
            if self.create(entity)? != -1 {
                inserted += 1;
            }
        }
        Ok(inserted)
    }

    /// Updates the row matching the entity's key with its current field
    /// values. Returns the number of rows changed, 0 when no row matches.
    pub fn update(&mut self, entity: &E) -> Result<u64> {
        let statement =
            self.writer()
                .sql_update(&self.table, entity.row(), entity.key(), None, &[])?;
        self.connection
            .execute(&statement)
            .map(|affected| affected.rows_affected)
    }

    /// Updates every row the clause selects with the entity's field values.
    pub fn update_where(
        &mut self,
        entity: &E,
        where_clause: &str,
        where_args: &[Value],
    ) -> Result<u64> {
        let statement = self.writer().sql_update(
            &self.table,
            entity.row(),
            entity.key(),
            Some(where_clause),
            where_args,
        )?;
        self.connection
            .execute(&statement)
            .map(|affected| affected.rows_affected)
    }

    /// Deletes the row matching the entity's key. Returns the number of rows
    /// removed, 0 when no row matches.
    pub fn delete(&mut self, entity: &E) -> Result<u64> {
        let statement = self.writer().sql_delete(&self.table, entity.key());
        self.connection
            .execute(&statement)
            .map(|affected| affected.rows_affected)
    }

    /// Empties the table.
    pub fn delete_all(&mut self) -> Result<bool> {
        let statement = self.writer().sql_delete_all(&self.table, None, &[])?;
        self.connection.execute(&statement).map(|_| true)
    }

    /// Deletes the rows the clause selects.
    pub fn delete_where(&mut self, where_clause: &str, where_args: &[Value]) -> Result<()> {
        let statement =
            self.writer()
                .sql_delete_all(&self.table, Some(where_clause), where_args)?;
        self.connection.execute(&statement).map(|_| ())
    }

    /// Fetches the entity with the given key, `Error::NotFound` when absent.
    pub fn find_by_id(&mut self, key: K) -> Result<E> {
        let key = key.as_value();
        let statement = self.writer().sql_select_by_key(&self.table, key.clone());
        let rows = self.connection.fetch(&statement)?;
        match rows.first() {
            Some(row) => E::from_row(row),
            None => Err(Error::NotFound {
                table: self.table.name.to_owned(),
                key: format!("{:?}", key),
            }),
        }
    }

    pub fn find_all(&mut self) -> Result<Vec<E>> {
        self.find_entities(None, &[])
    }

    pub fn find_where(&mut self, where_clause: &str, where_args: &[Value]) -> Result<Vec<E>> {
        self.find_entities(Some(where_clause), where_args)
    }

    fn find_entities(&mut self, clause: Option<&str>, args: &[Value]) -> Result<Vec<E>> {
        let statement = self.writer().sql_select(&self.table, clause, args)?;
        self.connection
            .fetch(&statement)?
            .iter()
            .map(E::from_row)
            .collect()
    }

    /// Whether a row with the entity's key is stored.
    pub fn exists(&mut self, entity: &E) -> Result<bool> {
        let statement = self.writer().sql_exists(&self.table, entity.key());
        let rows = self.connection.fetch(&statement)?;
        match rows.first() {
            Some(row) => Ok(decode::<i64>(row, 0, "count")? > 0),
            None => Ok(false),
        }
    }
}
