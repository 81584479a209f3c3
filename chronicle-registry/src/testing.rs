//! Fakes for the host collaborators.
//!
//! ```ignore
//! use chronicle_registry::testing::*;
//!
//! let env = TestEnv::new().with_sender(ALICE).with_height(500);
//! registry.establish(&env.ctx(), "Finish report")?;
//! env.set_sender(BOB);
//! env.advance(10);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use chronicle_types::primitives::{Address, Height};

use crate::context::{Context, HeightClock, IdentityProvider};

/// Test address constant for the first actor.
pub const ALICE: Address = [1u8; 20];
/// Test address constant for the second actor.
pub const BOB: Address = [2u8; 20];
/// Test address constant for the third actor.
pub const CHARLIE: Address = [3u8; 20];
/// Test address constant for the fourth actor.
pub const DAVE: Address = [4u8; 20];

/// An identity provider that always reports the same caller.
#[derive(Debug, Clone, Copy)]
pub struct FixedIdentity(pub Address);

impl IdentityProvider for FixedIdentity {
    fn caller(&self) -> Address {
        self.0
    }
}

/// A height clock moved by hand.
#[derive(Debug, Default)]
pub struct ManualClock {
    height: AtomicU64,
}

impl ManualClock {
    pub fn new(height: Height) -> Self {
        Self {
            height: AtomicU64::new(height),
        }
    }

    pub fn set(&self, height: Height) {
        self.height.store(height, Ordering::SeqCst);
    }

    /// Move the clock forward by `by` heights.
    pub fn advance(&self, by: u64) {
        self.height.fetch_add(by, Ordering::SeqCst);
    }
}

impl HeightClock for ManualClock {
    fn current_height(&self) -> Height {
        self.height.load(Ordering::SeqCst)
    }
}

/// Mutable sender plus a [`ManualClock`], for driving a registry from tests.
pub struct TestEnv {
    sender: RwLock<Address>,
    clock: ManualClock,
}

impl TestEnv {
    /// Sender [`ALICE`] at height 0.
    pub fn new() -> Self {
        Self {
            sender: RwLock::new(ALICE),
            clock: ManualClock::new(0),
        }
    }

    /// Set the sender address (builder, consuming).
    pub fn with_sender(self, addr: Address) -> Self {
        self.set_sender(addr);
        self
    }

    /// Set the height (builder, consuming).
    pub fn with_height(self, height: Height) -> Self {
        self.clock.set(height);
        self
    }

    /// Change the sender mid-test (non-consuming).
    pub fn set_sender(&self, addr: Address) {
        if let Ok(mut sender) = self.sender.write() {
            *sender = addr;
        }
    }

    /// Change the height mid-test (non-consuming).
    pub fn set_height(&self, height: Height) {
        self.clock.set(height);
    }

    pub fn advance(&self, by: u64) {
        self.clock.advance(by);
    }

    pub fn clock(&self) -> &ManualClock {
        &self.clock
    }

    /// Build a `Context` from the current sender and height.
    pub fn ctx(&self) -> Context {
        Context::new(self, &self.clock)
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityProvider for TestEnv {
    fn caller(&self) -> Address {
        self.sender.read().map(|s| *s).unwrap_or(ALICE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_builders() {
        let env = TestEnv::new().with_sender(BOB).with_height(500);
        let ctx = env.ctx();
        assert_eq!(ctx.sender(), BOB);
        assert_eq!(ctx.block_height(), 500);

        env.set_sender(CHARLIE);
        env.advance(7);
        let ctx = env.ctx();
        assert_eq!(ctx.sender(), CHARLIE);
        assert_eq!(ctx.block_height(), 507);
    }

    #[test]
    fn test_context_is_a_snapshot() {
        let env = TestEnv::new().with_height(10);
        let ctx = env.ctx();
        env.set_height(99);
        assert_eq!(ctx.block_height(), 10);
        assert_eq!(env.clock().current_height(), 99);
    }

    #[test]
    fn test_fixed_identity() {
        assert_eq!(FixedIdentity(DAVE).caller(), DAVE);
    }
}
