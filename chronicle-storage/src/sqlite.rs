use std::sync::Mutex;

use rusqlite::{params, Connection};

use crate::error::StorageError;
use crate::traits::{BatchOp, KvPairs, Table, TableStore};

/// SQLite-backed table store.
/// Each [`Table`] maps to its own SQL table with BLOB key and value columns.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) a SQLite store at the given path.
    /// Use `:memory:` for an in-memory database (useful for tests).
    pub fn new(path: &str) -> Result<Self, StorageError> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
        for table in Table::ALL {
            conn.execute(
                &format!(
                    "CREATE TABLE IF NOT EXISTS {} (key BLOB PRIMARY KEY, value BLOB NOT NULL)",
                    table.name()
                ),
                [],
            )?;
        }
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl TableStore for SqliteStore {
    fn get(&self, table: Table, key: &[u8]) -> Result<Option<Vec<u8>>, StorageError> {
        let conn = self.conn.lock().map_err(|e| StorageError::ReadError {
            table: table.name(),
            reason: e.to_string(),
        })?;
        let mut stmt =
            conn.prepare_cached(&format!("SELECT value FROM {} WHERE key = ?1", table.name()))?;
        let mut rows = stmt.query(params![key])?;
        match rows.next()? {
            Some(row) => {
                let value: Vec<u8> = row.get(0)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    fn exists(&self, table: Table, key: &[u8]) -> Result<bool, StorageError> {
        let conn = self.conn.lock().map_err(|e| StorageError::ReadError {
            table: table.name(),
            reason: e.to_string(),
        })?;
        let mut stmt =
            conn.prepare_cached(&format!("SELECT 1 FROM {} WHERE key = ?1", table.name()))?;
        let mut rows = stmt.query(params![key])?;
        Ok(rows.next()?.is_some())
    }

    fn scan(&self, table: Table) -> Result<KvPairs, StorageError> {
        let conn = self.conn.lock().map_err(|e| StorageError::ReadError {
            table: table.name(),
            reason: e.to_string(),
        })?;
        let mut stmt = conn.prepare_cached(&format!(
            "SELECT key, value FROM {} ORDER BY key",
            table.name()
        ))?;
        let mut rows = stmt.query([])?;
        let mut results = Vec::new();
        while let Some(row) = rows.next()? {
            let k: Vec<u8> = row.get(0)?;
            let v: Vec<u8> = row.get(1)?;
            results.push((k, v));
        }
        Ok(results)
    }

    fn write_batch(&self, ops: Vec<BatchOp>) -> Result<(), StorageError> {
        let conn = self.conn.lock().map_err(|e| StorageError::BatchError {
            reason: e.to_string(),
        })?;
        let tx = conn.unchecked_transaction()?;
        for op in ops {
            match op {
                BatchOp::Put { table, key, value } => {
                    tx.execute(
                        &format!(
                            "INSERT OR REPLACE INTO {} (key, value) VALUES (?1, ?2)",
                            table.name()
                        ),
                        params![key, value],
                    )?;
                }
                BatchOp::Delete { table, key } => {
                    tx.execute(
                        &format!("DELETE FROM {} WHERE key = ?1", table.name()),
                        params![key],
                    )?;
                }
            }
        }
        tx.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_store() -> SqliteStore {
        SqliteStore::new(":memory:").unwrap()
    }

    fn put(table: Table, key: &[u8], value: &[u8]) -> BatchOp {
        BatchOp::Put {
            table,
            key: key.to_vec(),
            value: value.to_vec(),
        }
    }

    #[test]
    fn test_basic_crud() {
        let store = make_store();
        store
            .write_batch(vec![put(Table::Chronicle, b"alice", b"v1")])
            .unwrap();
        assert_eq!(
            store.get(Table::Chronicle, b"alice").unwrap(),
            Some(b"v1".to_vec())
        );
        assert!(store.exists(Table::Chronicle, b"alice").unwrap());
        assert!(!store.exists(Table::Priority, b"alice").unwrap());

        store
            .write_batch(vec![BatchOp::Delete {
                table: Table::Chronicle,
                key: b"alice".to_vec(),
            }])
            .unwrap();
        assert_eq!(store.get(Table::Chronicle, b"alice").unwrap(), None);
    }

    #[test]
    fn test_overwrite() {
        let store = make_store();
        store
            .write_batch(vec![put(Table::Priority, b"k", b"1")])
            .unwrap();
        store
            .write_batch(vec![put(Table::Priority, b"k", b"3")])
            .unwrap();
        assert_eq!(
            store.get(Table::Priority, b"k").unwrap(),
            Some(b"3".to_vec())
        );
    }

    #[test]
    fn test_scan_is_ordered_and_scoped() {
        let store = make_store();
        store
            .write_batch(vec![
                put(Table::Deadline, b"b", b"2"),
                put(Table::Deadline, b"a", b"1"),
                put(Table::Chronicle, b"c", b"3"),
            ])
            .unwrap();

        let results = store.scan(Table::Deadline).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].0, b"a".to_vec());
        assert_eq!(results[1].0, b"b".to_vec());
    }

    #[test]
    fn test_reopen_persists() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("chronicle.db");
        let path = path.to_str().unwrap();

        {
            let store = SqliteStore::new(path).unwrap();
            store
                .write_batch(vec![put(Table::Chronicle, b"k", b"v")])
                .unwrap();
        }

        let store = SqliteStore::new(path).unwrap();
        assert_eq!(
            store.get(Table::Chronicle, b"k").unwrap(),
            Some(b"v".to_vec())
        );
    }

    #[test]
    fn test_delete_nonexistent() {
        let store = make_store();
        store
            .write_batch(vec![BatchOp::Delete {
                table: Table::Priority,
                key: b"no_such_key".to_vec(),
            }])
            .unwrap();
    }
}
