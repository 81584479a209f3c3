use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::error::StorageError;
use crate::traits::{BatchOp, KvPairs, Table, TableStore};

type Map = BTreeMap<Vec<u8>, Vec<u8>>;

#[derive(Default)]
struct Tables {
    chronicle: Map,
    priority: Map,
    deadline: Map,
}

impl Tables {
    fn map(&self, table: Table) -> &Map {
        match table {
            Table::Chronicle => &self.chronicle,
            Table::Priority => &self.priority,
            Table::Deadline => &self.deadline,
        }
    }

    fn map_mut(&mut self, table: Table) -> &mut Map {
        match table {
            Table::Chronicle => &mut self.chronicle,
            Table::Priority => &mut self.priority,
            Table::Deadline => &mut self.deadline,
        }
    }
}

/// In-memory table store. All three tables sit behind one lock so a batch
/// is applied as a single step.
pub struct MemoryStore {
    data: RwLock<Tables>,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            data: RwLock::new(Tables::default()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TableStore for MemoryStore {
    fn get(&self, table: Table, key: &[u8]) -> Result<Option<Vec<u8>>, StorageError> {
        let data = self.data.read().map_err(|e| StorageError::ReadError {
            table: table.name(),
            reason: e.to_string(),
        })?;
        Ok(data.map(table).get(key).cloned())
    }

    fn exists(&self, table: Table, key: &[u8]) -> Result<bool, StorageError> {
        let data = self.data.read().map_err(|e| StorageError::ReadError {
            table: table.name(),
            reason: e.to_string(),
        })?;
        Ok(data.map(table).contains_key(key))
    }

    fn scan(&self, table: Table) -> Result<KvPairs, StorageError> {
        let data = self.data.read().map_err(|e| StorageError::ReadError {
            table: table.name(),
            reason: e.to_string(),
        })?;
        Ok(data
            .map(table)
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }

    fn write_batch(&self, ops: Vec<BatchOp>) -> Result<(), StorageError> {
        let mut data = self.data.write().map_err(|e| StorageError::BatchError {
            reason: e.to_string(),
        })?;
        for op in ops {
            match op {
                BatchOp::Put { table, key, value } => {
                    data.map_mut(table).insert(key, value);
                }
                BatchOp::Delete { table, key } => {
                    data.map_mut(table).remove(&key);
                }
            }
        }
        Ok(())
    }
}
