use std::sync::Arc;

use crate::error::StorageError;

/// Result type for table scans: a list of key-value byte pairs.
pub type KvPairs = Vec<(Vec<u8>, Vec<u8>)>;

/// The three identity-keyed tables of the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Table {
    Chronicle,
    Priority,
    Deadline,
}

impl Table {
    /// Every table, in a fixed order.
    pub const ALL: [Table; 3] = [Table::Chronicle, Table::Priority, Table::Deadline];

    /// Stable table name, used for SQL tables and RocksDB column families.
    pub fn name(&self) -> &'static str {
        match self {
            Table::Chronicle => "chronicle",
            Table::Priority => "priority",
            Table::Deadline => "deadline",
        }
    }
}

/// Batch operation for atomic writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOp {
    Put {
        table: Table,
        key: Vec<u8>,
        value: Vec<u8>,
    },
    Delete {
        table: Table,
        key: Vec<u8>,
    },
}

/// Key-value storage split into named tables.
pub trait TableStore: Send + Sync {
    fn get(&self, table: Table, key: &[u8]) -> Result<Option<Vec<u8>>, StorageError>;
    fn exists(&self, table: Table, key: &[u8]) -> Result<bool, StorageError>;
    /// All entries of a table, ordered by key.
    fn scan(&self, table: Table) -> Result<KvPairs, StorageError>;
    /// Apply every op or none of them.
    fn write_batch(&self, ops: Vec<BatchOp>) -> Result<(), StorageError>;
}

/// Blanket implementation for `Arc<S>` so that a store can be shared across
/// multiple owners (e.g. for persistence-across-restart tests).
impl<S: TableStore + ?Sized> TableStore for Arc<S> {
    fn get(&self, table: Table, key: &[u8]) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).get(table, key)
    }

    fn exists(&self, table: Table, key: &[u8]) -> Result<bool, StorageError> {
        (**self).exists(table, key)
    }

    fn scan(&self, table: Table) -> Result<KvPairs, StorageError> {
        (**self).scan(table)
    }

    fn write_batch(&self, ops: Vec<BatchOp>) -> Result<(), StorageError> {
        (**self).write_batch(ops)
    }
}

/// Blanket implementation for `Box<dyn TableStore>` so that a backend chosen
/// from configuration can be used wherever a concrete store is expected.
impl TableStore for Box<dyn TableStore> {
    fn get(&self, table: Table, key: &[u8]) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).get(table, key)
    }

    fn exists(&self, table: Table, key: &[u8]) -> Result<bool, StorageError> {
        (**self).exists(table, key)
    }

    fn scan(&self, table: Table) -> Result<KvPairs, StorageError> {
        (**self).scan(table)
    }

    fn write_batch(&self, ops: Vec<BatchOp>) -> Result<(), StorageError> {
        (**self).write_batch(ops)
    }
}
