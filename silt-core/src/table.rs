use crate::{Error, Result, Value, value::Affinity};

/// How the primary key obtains its value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Generation {
    /// Application supplies the key.
    #[default]
    None,
    /// Engine assigns a fresh integer on insert.
    Auto,
}

/// One field of an entity as the derive macro transcribed it, unvalidated.
#[derive(Debug)]
pub struct FieldDecl {
    pub field: &'static str,
    pub column: &'static str,
    /// Empty value of the field's variant, the column's type template.
    pub value: Value,
    pub nullable: bool,
    pub primary_key: bool,
    pub generation: Generation,
}

/// Raw entity declaration emitted by `#[derive(Entity)]`, in field order.
///
/// Nothing in here has been checked: validation happens once, when the
/// registry derives the [`TableDef`].
#[derive(Debug)]
pub struct EntityDecl {
    /// Rust type name, used in diagnostics and name lookups.
    pub entity: &'static str,
    pub table: &'static str,
    pub fields: &'static [FieldDecl],
}

#[derive(Debug, Clone)]
pub struct ColumnDef {
    pub name: &'static str,
    pub value: Value,
    pub affinity: Affinity,
    pub nullable: bool,
    pub primary_key: bool,
}

#[derive(Debug, Clone)]
pub struct PrimaryKey {
    pub name: &'static str,
    pub affinity: Affinity,
    pub generation: Generation,
}

/// Validated table descriptor, the unit every SQL writer consumes.
///
/// Columns are normalized: the primary key comes first, the remaining columns
/// keep their declaration order. Entity `row()` and `from_row()` follow the
/// same order.
#[derive(Debug, Clone)]
pub struct TableDef {
    pub entity: &'static str,
    pub name: &'static str,
    pub columns: Box<[ColumnDef]>,
    pub primary_key: PrimaryKey,
}

impl TableDef {
    /// Derives and validates the descriptor of a declaration.
    ///
    /// Checks run in a fixed order: every field must resolve to an affinity,
    /// column names must be distinct, exactly one field must be the primary
    /// key, the key must have INTEGER, REAL or TEXT affinity, and automatic
    /// generation is only allowed on an INTEGER key.
    pub fn derive(decl: &EntityDecl) -> Result<TableDef> {
        let mut columns = Vec::with_capacity(decl.fields.len());
        for field in decl.fields {
            let affinity = field.value.affinity().ok_or(Error::UnsupportedFieldType {
                entity: decl.entity,
                field: field.field,
            })?;
            if columns.iter().any(|c: &ColumnDef| c.name == field.column) {
                return Err(Error::DuplicateColumn {
                    entity: decl.entity,
                    column: field.column,
                });
            }
            columns.push(ColumnDef {
                name: field.column,
                value: field.value.clone(),
                affinity,
                nullable: field.nullable,
                primary_key: field.primary_key,
            });
        }
        let mut keys = decl.fields.iter().filter(|f| f.primary_key);
        let key = match (keys.next(), keys.next()) {
            (None, _) => return Err(Error::NoPrimaryKeyFound(decl.entity)),
            (Some(key), None) => key,
            (Some(_), Some(_)) => {
                return Err(Error::MultiplePrimaryKeys {
                    entity: decl.entity,
                    count: decl.fields.iter().filter(|f| f.primary_key).count(),
                });
            }
        };
        let position = columns
            .iter()
            .position(|c| c.primary_key)
            .unwrap_or_default();
        let affinity = columns[position].affinity;
        if affinity == Affinity::Blob {
            return Err(Error::NoSuitablePrimaryKeyType {
                entity: decl.entity,
                field: key.field,
                affinity,
            });
        }
        if key.generation == Generation::Auto && affinity != Affinity::Integer {
            return Err(Error::UnauthorizedGenerationStrategy {
                entity: decl.entity,
                field: key.field,
                affinity,
            });
        }
        let key_column = columns.remove(position);
        columns.insert(0, key_column);
        Ok(TableDef {
            entity: decl.entity,
            name: decl.table,
            columns: columns.into_boxed_slice(),
            primary_key: PrimaryKey {
                name: key.column,
                affinity,
                generation: key.generation,
            },
        })
    }

    /// Columns except the primary key, in normalized order.
    pub fn data_columns(&self) -> impl Iterator<Item = &ColumnDef> {
        self.columns.iter().filter(|c| !c.primary_key)
    }

    /// Columns that take a bound value on insert. The key is skipped when the
    /// engine generates it.
    pub fn insert_columns(&self) -> impl Iterator<Item = &ColumnDef> {
        let auto = self.primary_key.generation == Generation::Auto;
        self.columns.iter().filter(move |c| !(auto && c.primary_key))
    }
}
