//! Storage abstraction for the Chronicle registry.
//!
//! Provides a [`TableStore`](traits::TableStore) trait over the chronicle,
//! priority and deadline tables with memory, SQLite, and RocksDB backends,
//! plus the typed [`ChronicleLedger`](ledger::ChronicleLedger) on top.

pub mod error;
pub mod ledger;
pub mod memory;
pub mod rocksdb;
pub mod sqlite;
pub mod traits;
