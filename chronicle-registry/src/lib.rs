//! Per-participant objective registry.
//!
//! Each participant may hold one chronicle (an objective plus a completion
//! flag), optionally classified with a priority and bounded by a deadline.
//! [`ChronicleRegistry`] exposes the full lifecycle over a pluggable
//! [`TableStore`](chronicle_storage::traits::TableStore):
//!
//! ```ignore
//! use chronicle_registry::prelude::*;
//! use chronicle_storage::memory::MemoryStore;
//!
//! let registry = ChronicleRegistry::open(MemoryStore::new())?;
//! let ctx = Context::new(&identity, &clock);
//! registry.establish(&ctx, "Finish report")?;
//! registry.set_priority(&ctx, 2)?;
//! registry.configure_deadline(&ctx, 100)?;
//! let diagnosis = registry.diagnose(&ctx)?;
//! registry.terminate(&ctx)?;
//! ```
//!
//! Caller identity and height come from the host through [`IdentityProvider`]
//! and [`HeightClock`]; they are never read from global state.

pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod receipt;
pub mod registry;
pub mod testing;

pub use context::{Context, HeightClock, IdentityProvider};
pub use error::RegistryError;
pub use receipt::Receipt;
pub use registry::ChronicleRegistry;

/// Common imports for registry integrations.
pub mod prelude {
    pub use crate::context::{Context, HeightClock, IdentityProvider};
    pub use crate::error::RegistryError;
    pub use crate::receipt::Receipt;
    pub use crate::registry::ChronicleRegistry;
    pub use chronicle_types::error::ErrorKind;
    pub use chronicle_types::primitives::{Address, Height};
    pub use chronicle_types::view::{Diagnosis, Examination};
}
