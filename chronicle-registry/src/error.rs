use thiserror::Error;

use chronicle_storage::error::StorageError;
use chronicle_types::error::{ErrorKind, ValidationError};
use chronicle_types::primitives::{address_to_hex, Address};

/// Errors returned by registry operations.
///
/// `NotFound`, `AlreadyExists` and `InvalidInput` are ordinary outcomes the
/// caller branches on. `Storage` is a backend fault. In every case no state
/// was changed.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("no chronicle for {}", address_to_hex(.participant))]
    NotFound { participant: Address },

    #[error("chronicle already exists for {}", address_to_hex(.participant))]
    AlreadyExists { participant: Address },

    #[error("invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl RegistryError {
    /// The domain error kind, or `None` for storage faults.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            RegistryError::NotFound { .. } => Some(ErrorKind::NotFound),
            RegistryError::AlreadyExists { .. } => Some(ErrorKind::AlreadyExists),
            RegistryError::InvalidInput(_) => Some(ErrorKind::InvalidInput),
            RegistryError::Storage(_) => None,
        }
    }
}

/// Errors raised while loading configuration or opening a backend.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config error: {reason}")]
    Invalid { reason: String },

    #[error("unknown storage backend '{db_type}' (expected memory, sqlite or rocksdb)")]
    UnknownBackend { db_type: String },

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = RegistryError::NotFound {
            participant: [0xab; 20],
        };
        assert!(err.to_string().contains("0xabab"));
        assert_eq!(err.kind(), Some(ErrorKind::NotFound));
    }

    #[test]
    fn test_invalid_input_from_validation() {
        let err: RegistryError = ValidationError::ZeroWindow.into();
        assert_eq!(err.kind(), Some(ErrorKind::InvalidInput));
        assert!(err.to_string().contains("window"));
    }

    #[test]
    fn test_storage_has_no_domain_kind() {
        let err: RegistryError = StorageError::WriteError {
            reason: "disk full".to_string(),
        }
        .into();
        assert_eq!(err.kind(), None);
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ConfigError = io_err.into();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
