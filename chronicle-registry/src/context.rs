//! Host collaborators and the per-invocation [`Context`].
//!
//! The registry never reads identity or height from ambient state. The host
//! supplies an [`IdentityProvider`] and a [`HeightClock`]; a [`Context`]
//! snapshots both once at the start of each operation.

use chronicle_types::primitives::{Address, Height};

/// Supplies the verified identity of the party invoking an operation.
pub trait IdentityProvider {
    fn caller(&self) -> Address;
}

/// Supplies the host's monotonically non-decreasing height counter.
pub trait HeightClock {
    fn current_height(&self) -> Height;
}

impl<T: IdentityProvider + ?Sized> IdentityProvider for &T {
    fn caller(&self) -> Address {
        (**self).caller()
    }
}

impl<T: HeightClock + ?Sized> HeightClock for &T {
    fn current_height(&self) -> Height {
        (**self).current_height()
    }
}

/// Caller identity and height captured for a single invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Context {
    sender: Address,
    block_height: Height,
}

impl Context {
    /// Snapshot the host collaborators.
    pub fn new(identity: &dyn IdentityProvider, clock: &dyn HeightClock) -> Self {
        Self {
            sender: identity.caller(),
            block_height: clock.current_height(),
        }
    }

    /// Build a context from already-known values.
    pub fn at(sender: Address, block_height: Height) -> Self {
        Self {
            sender,
            block_height,
        }
    }

    /// The invoking participant.
    pub fn sender(&self) -> Address {
        self.sender
    }

    /// Host height at invocation time.
    pub fn block_height(&self) -> Height {
        self.block_height
    }
}
