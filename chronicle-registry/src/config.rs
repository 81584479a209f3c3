use std::path::Path;

use serde::{Deserialize, Serialize};

use chronicle_storage::memory::MemoryStore;
use chronicle_storage::rocksdb::RocksDbStore;
use chronicle_storage::sqlite::SqliteStore;
use chronicle_storage::traits::TableStore;

use crate::error::ConfigError;
use crate::registry::ChronicleRegistry;

/// File name written by [`RegistryConfig::init`].
pub const CONFIG_FILE_NAME: &str = "chronicle.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistryConfig {
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: String,
    /// Storage backend: "memory", "sqlite", or "rocksdb"
    pub db_type: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: "./chronicle-data".to_string(),
            db_type: "memory".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl RegistryConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Invalid {
            reason: format!("failed to read config file '{}': {}", path, e),
        })?;
        let config: RegistryConfig =
            toml::from_str(&contents).map_err(|e| ConfigError::Invalid {
                reason: format!("failed to parse config file '{}': {}", path, e),
            })?;
        Ok(config)
    }

    /// Write a default configuration file into the given directory.
    pub fn init(dir: &str) -> Result<(), ConfigError> {
        let dir_path = Path::new(dir);
        if !dir_path.exists() {
            std::fs::create_dir_all(dir_path)?;
        }

        let config = RegistryConfig::default();
        let toml_str = toml::to_string_pretty(&config).map_err(|e| ConfigError::Invalid {
            reason: format!("failed to serialize default config: {}", e),
        })?;

        std::fs::write(dir_path.join(CONFIG_FILE_NAME), toml_str)?;
        Ok(())
    }

    /// Open the configured backend and a registry over it.
    pub fn open_registry(&self) -> Result<ChronicleRegistry<Box<dyn TableStore>>, ConfigError> {
        let store = open_store(&self.storage)?;
        Ok(ChronicleRegistry::open(store)?)
    }
}

/// Open the storage backend named by `config.db_type`.
pub fn open_store(config: &StorageConfig) -> Result<Box<dyn TableStore>, ConfigError> {
    let store: Box<dyn TableStore> = match config.db_type.as_str() {
        "memory" => Box::new(MemoryStore::new()),
        "sqlite" => {
            std::fs::create_dir_all(&config.data_dir)?;
            let path = Path::new(&config.data_dir).join("chronicle.db");
            Box::new(SqliteStore::new(&path.to_string_lossy())?)
        }
        "rocksdb" => {
            std::fs::create_dir_all(&config.data_dir)?;
            let path = Path::new(&config.data_dir).join("rocksdb");
            Box::new(RocksDbStore::new(&path.to_string_lossy())?)
        }
        other => {
            return Err(ConfigError::UnknownBackend {
                db_type: other.to_string(),
            })
        }
    };
    tracing::info!(db_type = %config.db_type, data_dir = %config.data_dir, "storage backend opened");
    Ok(store)
}
