use crate::{Entity, Error, Result, TableDef};
use log::debug;
use std::{
    any::TypeId,
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

/// Cache of validated table descriptors, one per entity type.
///
/// Derivation runs once per type under the lock, so concurrent first access
/// validates a declaration exactly once. A declaration that fails validation
/// is not cached and every access keeps reporting the error.
#[derive(Default)]
pub struct Registry {
    tables: Mutex<HashMap<TypeId, Arc<TableDef>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The descriptor of `E`, deriving and caching it on first access.
    pub fn table_of<E: Entity>(&self) -> Result<Arc<TableDef>> {
        let mut tables = self.lock();
        if let Some(table) = tables.get(&TypeId::of::<E>()) {
            return Ok(table.clone());
        }
        let table = Arc::new(TableDef::derive(E::declaration())?);
        debug!("derived table `{}` for entity `{}`", table.name, table.entity);
        tables.insert(TypeId::of::<E>(), table.clone());
        Ok(table)
    }

    /// Looks up an already derived descriptor by table name or entity type name.
    pub fn table_named(&self, name: &str) -> Result<Arc<TableDef>> {
        self.lock()
            .values()
            .find(|t| t.name == name || t.entity == name)
            .cloned()
            .ok_or_else(|| Error::NotEntity(name.to_owned()))
    }

    /// Every descriptor derived so far.
    pub fn tables(&self) -> Vec<Arc<TableDef>> {
        self.lock().values().cloned().collect()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<TypeId, Arc<TableDef>>> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
