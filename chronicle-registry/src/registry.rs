use std::sync::{Mutex, MutexGuard};

use chronicle_storage::error::StorageError;
use chronicle_storage::ledger::{ChronicleLedger, SlotWrite};
use chronicle_storage::traits::{Table, TableStore};
use chronicle_types::primitives::{address_to_hex, Address};
use chronicle_types::record::{Chronicle, DeadlineConstraint, PriorityClassification};
use chronicle_types::view::{Diagnosis, Examination};

use crate::context::Context;
use crate::error::RegistryError;
use crate::metrics::RegistryMetrics;
use crate::receipt::Receipt;

/// The Chronicle Store.
///
/// Each participant holds at most one chronicle, plus an optional priority
/// and deadline. Every operation acts on the caller's own slot, except
/// [`delegate`](Self::delegate), which writes into the named target's slot.
///
/// Mutations serialize on a single writer lock held across the existence
/// check and the write, and each one lands as a single storage batch.
/// Single-table reads take no registry lock; [`diagnose`](Self::diagnose)
/// reads all three tables under it.
pub struct ChronicleRegistry<S: TableStore> {
    ledger: ChronicleLedger<S>,
    writer: Mutex<()>,
    metrics: RegistryMetrics,
}

impl<S: TableStore> ChronicleRegistry<S> {
    /// Open a registry over `store`, seeding the active-chronicle gauge from
    /// what is already stored.
    pub fn open(store: S) -> Result<Self, StorageError> {
        let ledger = ChronicleLedger::new(store);
        let metrics = RegistryMetrics::new();
        let existing = ledger.participants()?.len();
        metrics.active.set(existing as i64);
        tracing::debug!(existing, "chronicle registry opened");
        Ok(Self {
            ledger,
            writer: Mutex::new(()),
            metrics,
        })
    }

    /// Access the metrics.
    pub fn metrics(&self) -> &RegistryMetrics {
        &self.metrics
    }

    // ── Inspection ──────────────────────────────────────────────────────

    /// Summarize the caller's chronicle.
    pub fn examine(&self, ctx: &Context) -> Result<Examination, RegistryError> {
        let chronicle = self.ledger.load_chronicle(&ctx.sender())?;
        Ok(Examination::from(chronicle.as_ref()))
    }

    /// Existence flags across all three tables for the caller.
    pub fn diagnose(&self, ctx: &Context) -> Result<Diagnosis, RegistryError> {
        let who = ctx.sender();
        let slot = {
            let _guard = self.lock()?;
            self.ledger.load_slot(&who)?
        };
        Ok(Diagnosis {
            chronicle_exists: slot.chronicle.is_some(),
            priority_configured: slot.priority.is_some(),
            deadline_active: slot.deadline.is_some(),
            current_height: ctx.block_height(),
            participant: who,
        })
    }

    pub fn chronicle_of(&self, who: &Address) -> Result<Option<Chronicle>, RegistryError> {
        Ok(self.ledger.load_chronicle(who)?)
    }

    pub fn priority_of(
        &self,
        who: &Address,
    ) -> Result<Option<PriorityClassification>, RegistryError> {
        Ok(self.ledger.load_priority(who)?)
    }

    pub fn deadline_of(&self, who: &Address) -> Result<Option<DeadlineConstraint>, RegistryError> {
        Ok(self.ledger.load_deadline(who)?)
    }

    /// Every participant holding a chronicle, ordered by address bytes.
    pub fn participants(&self) -> Result<Vec<Address>, RegistryError> {
        Ok(self.ledger.participants()?)
    }

    // ── Mutation ────────────────────────────────────────────────────────

    /// Create the caller's chronicle.
    pub fn establish(&self, ctx: &Context, objective: &str) -> Result<Receipt, RegistryError> {
        let who = ctx.sender();
        let result = self.create(&who, objective).map(|()| {
            Receipt::new("establish", who, "Chronicle established")
                .add_attribute("length", objective.chars().count())
        });
        self.finish("establish", &who, result)
    }

    /// Replace the objective and completion flag of the caller's chronicle.
    pub fn modify(
        &self,
        ctx: &Context,
        objective: &str,
        fulfilled: bool,
    ) -> Result<Receipt, RegistryError> {
        let who = ctx.sender();
        let result = self.update(&who, || {
            let chronicle = Chronicle::with_state(objective, fulfilled)?;
            Ok((SlotWrite::Chronicle(chronicle), ()))
        });
        let result = result.map(|()| {
            Receipt::new("modify", who, "Chronicle updated").add_attribute("fulfilled", fulfilled)
        });
        self.finish("modify", &who, result)
    }

    /// Set the caller's deadline `window` heights from now, replacing any
    /// previous deadline.
    pub fn configure_deadline(&self, ctx: &Context, window: u64) -> Result<Receipt, RegistryError> {
        let who = ctx.sender();
        let result = self.update(&who, || {
            let deadline = DeadlineConstraint::from_window(ctx.block_height(), window)?;
            Ok((SlotWrite::Deadline(deadline), deadline.deadline_height))
        });
        let result = result.map(|deadline_height| {
            Receipt::new("configure_deadline", who, "Deadline configured")
                .add_attribute("deadline_height", deadline_height)
        });
        self.finish("configure_deadline", &who, result)
    }

    /// Classify the caller's chronicle with an urgency in [1, 3].
    pub fn set_priority(&self, ctx: &Context, urgency: u8) -> Result<Receipt, RegistryError> {
        let who = ctx.sender();
        let result = self.update(&who, || {
            let priority = PriorityClassification::new(urgency)?;
            Ok((SlotWrite::Priority(priority), ()))
        });
        let result = result.map(|()| {
            Receipt::new("set_priority", who, "Priority set").add_attribute("urgency", urgency)
        });
        self.finish("set_priority", &who, result)
    }

    /// Remove the caller's chronicle, priority and deadline in one batch.
    pub fn terminate(&self, ctx: &Context) -> Result<Receipt, RegistryError> {
        let who = ctx.sender();
        let result = self
            .update(&who, || Ok((SlotWrite::Clear, ())))
            .map(|()| Receipt::new("terminate", who, "Chronicle terminated"));
        self.finish("terminate", &who, result)
    }

    /// Create a chronicle for `target`. The caller's own slot is not read
    /// or written.
    pub fn delegate(
        &self,
        ctx: &Context,
        target: &Address,
        objective: &str,
    ) -> Result<Receipt, RegistryError> {
        let caller = ctx.sender();
        let result = self.create(target, objective).map(|()| {
            Receipt::new("delegate", *target, "Chronicle delegated").add_address("by", &caller)
        });
        self.finish("delegate", target, result)
    }

    // ── Internals ───────────────────────────────────────────────────────

    fn create(&self, who: &Address, objective: &str) -> Result<(), RegistryError> {
        let _guard = self.lock()?;
        if self.ledger.contains(Table::Chronicle, who)? {
            return Err(RegistryError::AlreadyExists { participant: *who });
        }
        let chronicle = Chronicle::open(objective)?;
        self.ledger.commit(who, SlotWrite::Chronicle(chronicle))?;
        Ok(())
    }

    /// Run `build` against an existing chronicle, commit the write it
    /// returns and hand back its companion value. Fails with `NotFound`
    /// before `build` runs if there is no chronicle.
    fn update<T, F>(&self, who: &Address, build: F) -> Result<T, RegistryError>
    where
        F: FnOnce() -> Result<(SlotWrite, T), RegistryError>,
    {
        let _guard = self.lock()?;
        if !self.ledger.contains(Table::Chronicle, who)? {
            return Err(RegistryError::NotFound { participant: *who });
        }
        let (write, value) = build()?;
        self.ledger.commit(who, write)?;
        Ok(value)
    }

    fn lock(&self) -> Result<MutexGuard<'_, ()>, StorageError> {
        self.writer.lock().map_err(|e| StorageError::WriteError {
            reason: e.to_string(),
        })
    }

    fn finish(
        &self,
        action: &'static str,
        who: &Address,
        result: Result<Receipt, RegistryError>,
    ) -> Result<Receipt, RegistryError> {
        match &result {
            Ok(_) => {
                self.metrics.observe_success(action);
                tracing::info!(action, participant = %address_to_hex(who), "chronicle operation applied");
            }
            Err(RegistryError::Storage(e)) => {
                tracing::warn!(action, participant = %address_to_hex(who), error = %e, "chronicle storage fault");
            }
            Err(e) => {
                self.metrics.rejected.inc();
                tracing::debug!(action, participant = %address_to_hex(who), reason = %e, "chronicle operation rejected");
            }
        }
        result
    }
}
