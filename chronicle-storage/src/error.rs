use thiserror::Error;

/// Errors that can occur during storage operations.
///
/// Variants raised while touching a single table carry its name.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("reading {table} table failed: {reason}")]
    ReadError { table: &'static str, reason: String },

    #[error("write rejected: {reason}")]
    WriteError { reason: String },

    #[error("applying batch failed: {reason}")]
    BatchError { reason: String },

    #[error("{table} table is missing from the backend")]
    MissingTable { table: &'static str },

    #[error("encoding {table} record failed: {reason}")]
    SerializationError { table: &'static str, reason: String },

    #[error("decoding {table} record failed: {reason}")]
    DeserializationError { table: &'static str, reason: String },

    #[error("sqlite backend: {reason}")]
    SqliteError { reason: String },

    #[error("rocksdb backend: {reason}")]
    RocksDbError { reason: String },
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::SqliteError {
            reason: err.to_string(),
        }
    }
}

impl From<rocksdb::Error> for StorageError {
    fn from(err: rocksdb::Error) -> Self {
        StorageError::RocksDbError {
            reason: err.into_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_named_in_message() {
        let err = StorageError::DeserializationError {
            table: "deadline",
            reason: "unexpected eof".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "decoding deadline record failed: unexpected eof"
        );

        let err = StorageError::MissingTable { table: "priority" };
        assert!(err.to_string().starts_with("priority table"));
    }

    #[test]
    fn test_sqlite_error_from() {
        let err: StorageError = rusqlite::Error::InvalidQuery.into();
        assert!(matches!(err, StorageError::SqliteError { .. }));
    }
}
