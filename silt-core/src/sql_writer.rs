use crate::{
    Affinity, Error, Generation, Result, Row, Statement, TableDef, Value, util::separated_by,
};

fn normalized(where_clause: Option<&str>) -> Option<&str> {
    where_clause.map(str::trim).filter(|c| !c.is_empty())
}

fn check_where_pair<'a>(
    where_clause: Option<&'a str>,
    where_args: &[Value],
) -> Result<Option<&'a str>> {
    let clause = normalized(where_clause);
    if clause.is_none() && !where_args.is_empty() {
        return Err(Error::MalformedQuery(format!(
            "{} bound arguments but no where clause to hold them",
            where_args.len()
        )));
    }
    Ok(clause)
}

/// Builds parameterized SQL from table descriptors.
///
/// The default methods write the generic dialect, every piece of user data
/// becomes a `?` placeholder with the value carried alongside the text.
/// Drivers override single methods where their engine deviates.
pub trait SqlWriter {
    fn write_identifier(&self, out: &mut String, value: &str) {
        out.push('"');
        let mut position = 0;
        for (i, c) in value.char_indices() {
            if c == '"' {
                out.push_str(&value[position..i]);
                out.push_str("\"\"");
                position = i + 1;
            }
        }
        out.push_str(&value[position..]);
        out.push('"');
    }

    fn write_column_type(&self, out: &mut String, affinity: Affinity) {
        out.push_str(affinity.as_str());
    }

    fn sql_create_table(&self, table: &TableDef, if_not_exists: bool) -> Statement {
        let mut sql = String::with_capacity(128);
        sql.push_str("CREATE TABLE ");
        if if_not_exists {
            sql.push_str("IF NOT EXISTS ");
        }
        self.write_identifier(&mut sql, table.name);
        sql.push_str(" (");
        separated_by(
            &mut sql,
            table.columns.iter(),
            |out, column| {
                self.write_identifier(out, column.name);
                out.push(' ');
                self.write_column_type(out, column.affinity);
                if column.primary_key {
                    out.push_str(" PRIMARY KEY");
                    if table.primary_key.generation == Generation::Auto {
                        out.push_str(" AUTOINCREMENT");
                    }
                } else if !column.nullable {
                    out.push_str(" NOT NULL");
                }
            },
            ", ",
        );
        sql.push_str(");");
        Statement::raw(sql)
    }

    fn sql_drop_table(&self, table: &TableDef, if_exists: bool) -> Statement {
        let mut sql = String::with_capacity(32);
        sql.push_str("DROP TABLE ");
        if if_exists {
            sql.push_str("IF EXISTS ");
        }
        self.write_identifier(&mut sql, table.name);
        sql.push(';');
        Statement::raw(sql)
    }

    /// INSERT of one row, the key column is skipped when the engine assigns it.
    /// `row` must be in the descriptor's normalized column order.
    fn sql_insert(&self, table: &TableDef, row: Row) -> Statement {
        let auto = table.primary_key.generation == Generation::Auto;
        let mut sql = String::with_capacity(128);
        sql.push_str("INSERT INTO ");
        self.write_identifier(&mut sql, table.name);
        sql.push_str(" (");
        separated_by(
            &mut sql,
            table.insert_columns(),
            |out, column| self.write_identifier(out, column.name),
            ", ",
        );
        sql.push_str(") VALUES (");
        let count = table.columns.len() - auto as usize;
        separated_by(&mut sql, 0..count, |out, _| out.push('?'), ", ");
        sql.push_str(");");
        let values = row
            .into_vec()
            .into_iter()
            .zip(table.columns.iter())
            .filter(|(_, column)| !(auto && column.primary_key))
            .map(|(value, _)| value)
            .collect();
        Statement::new(sql, values)
    }

    /// UPDATE of the non-key columns. Without a where clause the row matching
    /// `key` is targeted, otherwise the clause selects the rows.
    fn sql_update(
        &self,
        table: &TableDef,
        row: Row,
        key: Value,
        where_clause: Option<&str>,
        where_args: &[Value],
    ) -> Result<Statement> {
        let clause = check_where_pair(where_clause, where_args)?;
        if table.data_columns().next().is_none() {
            return Err(Error::MalformedQuery(format!(
                "table `{}` has no column to update besides the key",
                table.name
            )));
        }
        let mut sql = String::with_capacity(128);
        sql.push_str("UPDATE ");
        self.write_identifier(&mut sql, table.name);
        sql.push_str(" SET ");
        separated_by(
            &mut sql,
            table.data_columns(),
            |out, column| {
                self.write_identifier(out, column.name);
                out.push_str(" = ?");
            },
            ", ",
        );
        sql.push_str(" WHERE ");
        let mut values: Vec<Value> = row
            .into_vec()
            .into_iter()
            .zip(table.columns.iter())
            .filter(|(_, column)| !column.primary_key)
            .map(|(value, _)| value)
            .collect();
        match clause {
            Some(clause) => {
                sql.push_str(clause);
                values.extend(where_args.iter().cloned());
            }
            None => {
                self.write_identifier(&mut sql, table.primary_key.name);
                sql.push_str(" = ?");
                values.push(key);
            }
        }
        sql.push(';');
        Ok(Statement::new(sql, values))
    }

    fn sql_delete(&self, table: &TableDef, key: Value) -> Statement {
        let mut sql = String::with_capacity(64);
        sql.push_str("DELETE FROM ");
        self.write_identifier(&mut sql, table.name);
        sql.push_str(" WHERE ");
        self.write_identifier(&mut sql, table.primary_key.name);
        sql.push_str(" = ?;");
        Statement::new(sql, vec![key])
    }

    /// DELETE of every row, or of the rows a clause selects.
    fn sql_delete_all(
        &self,
        table: &TableDef,
        where_clause: Option<&str>,
        where_args: &[Value],
    ) -> Result<Statement> {
        let clause = check_where_pair(where_clause, where_args)?;
        let mut sql = String::with_capacity(64);
        sql.push_str("DELETE FROM ");
        self.write_identifier(&mut sql, table.name);
        if let Some(clause) = clause {
            sql.push_str(" WHERE ");
            sql.push_str(clause);
        }
        sql.push(';');
        Ok(Statement::new(sql, where_args.to_vec()))
    }

    fn write_column_list(&self, out: &mut String, table: &TableDef) {
        separated_by(
            out,
            table.columns.iter(),
            |out, column| self.write_identifier(out, column.name),
            ", ",
        );
    }

    /// SELECT of the full column list, optionally filtered by a clause.
    fn sql_select(
        &self,
        table: &TableDef,
        where_clause: Option<&str>,
        where_args: &[Value],
    ) -> Result<Statement> {
        let clause = check_where_pair(where_clause, where_args)?;
        let mut sql = String::with_capacity(128);
        sql.push_str("SELECT ");
        self.write_column_list(&mut sql, table);
        sql.push_str(" FROM ");
        self.write_identifier(&mut sql, table.name);
        if let Some(clause) = clause {
            sql.push_str(" WHERE ");
            sql.push_str(clause);
        }
        sql.push(';');
        Ok(Statement::new(sql, where_args.to_vec()))
    }

    fn sql_select_by_key(&self, table: &TableDef, key: Value) -> Statement {
        let mut sql = String::with_capacity(128);
        sql.push_str("SELECT ");
        self.write_column_list(&mut sql, table);
        sql.push_str(" FROM ");
        self.write_identifier(&mut sql, table.name);
        sql.push_str(" WHERE ");
        self.write_identifier(&mut sql, table.primary_key.name);
        sql.push_str(" = ?;");
        Statement::new(sql, vec![key])
    }

    fn sql_count(&self, table: &TableDef) -> Statement {
        let mut sql = String::with_capacity(48);
        sql.push_str("SELECT COUNT(*) FROM ");
        self.write_identifier(&mut sql, table.name);
        sql.push(';');
        Statement::raw(sql)
    }

    fn sql_exists(&self, table: &TableDef, key: Value) -> Statement {
        let mut sql = String::with_capacity(64);
        sql.push_str("SELECT COUNT(*) FROM ");
        self.write_identifier(&mut sql, table.name);
        sql.push_str(" WHERE ");
        self.write_identifier(&mut sql, table.primary_key.name);
        sql.push_str(" = ? LIMIT 1;");
        Statement::new(sql, vec![key])
    }

    fn sql_begin(&self) -> Statement {
        Statement::raw("BEGIN;")
    }

    fn sql_commit(&self) -> Statement {
        Statement::raw("COMMIT;")
    }

    fn sql_rollback(&self) -> Statement {
        Statement::raw("ROLLBACK;")
    }
}

/// Writer of the plain generic dialect, also the base for driver dialects.
#[derive(Debug, Default, Clone, Copy)]
pub struct GenericSqlWriter;

impl SqlWriter for GenericSqlWriter {}
