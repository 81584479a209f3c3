use std::sync::Arc;

use rocksdb::{
    BoundColumnFamily, ColumnFamilyDescriptor, DBWithThreadMode, IteratorMode, MultiThreaded,
    Options, WriteBatchWithTransaction,
};

use crate::error::StorageError;
use crate::traits::{BatchOp, KvPairs, Table, TableStore};

/// RocksDB-backed table store. Each [`Table`] is its own column family.
pub struct RocksDbStore {
    db: DBWithThreadMode<MultiThreaded>,
}

impl RocksDbStore {
    /// Open a RocksDB store at the given path, creating the column families
    /// on first use.
    pub fn new(path: &str) -> Result<Self, StorageError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_descriptors: Vec<ColumnFamilyDescriptor> = Table::ALL
            .iter()
            .map(|table| ColumnFamilyDescriptor::new(table.name(), Options::default()))
            .collect();

        let db =
            DBWithThreadMode::<MultiThreaded>::open_cf_descriptors(&opts, path, cf_descriptors)?;

        Ok(Self { db })
    }

    fn cf(&self, table: Table) -> Result<Arc<BoundColumnFamily<'_>>, StorageError> {
        self.db
            .cf_handle(table.name())
            .ok_or(StorageError::MissingTable {
                table: table.name(),
            })
    }
}

impl TableStore for RocksDbStore {
    fn get(&self, table: Table, key: &[u8]) -> Result<Option<Vec<u8>>, StorageError> {
        let cf = self.cf(table)?;
        Ok(self.db.get_cf(&cf, key)?)
    }

    fn exists(&self, table: Table, key: &[u8]) -> Result<bool, StorageError> {
        let cf = self.cf(table)?;
        Ok(self.db.get_pinned_cf(&cf, key)?.is_some())
    }

    fn scan(&self, table: Table) -> Result<KvPairs, StorageError> {
        let cf = self.cf(table)?;
        let mut results = Vec::new();
        for item in self.db.iterator_cf(&cf, IteratorMode::Start) {
            let (key, value) = item.map_err(|e| StorageError::ReadError {
                table: table.name(),
                reason: e.to_string(),
            })?;
            results.push((key.to_vec(), value.to_vec()));
        }
        Ok(results)
    }

    fn write_batch(&self, ops: Vec<BatchOp>) -> Result<(), StorageError> {
        let mut batch = WriteBatchWithTransaction::<false>::default();
        for op in ops {
            match op {
                BatchOp::Put { table, key, value } => {
                    let cf = self.cf(table)?;
                    batch.put_cf(&cf, &key, &value);
                }
                BatchOp::Delete { table, key } => {
                    let cf = self.cf(table)?;
                    batch.delete_cf(&cf, &key);
                }
            }
        }
        self.db.write(batch)?;
        Ok(())
    }
}
