use borsh::{BorshDeserialize, BorshSerialize};

use chronicle_types::primitives::{Address, ADDRESS_LEN};
use chronicle_types::record::{Chronicle, DeadlineConstraint, PriorityClassification};

use crate::error::StorageError;
use crate::traits::{BatchOp, Table, TableStore};

/// Every record held for one participant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Slot {
    pub chronicle: Option<Chronicle>,
    pub priority: Option<PriorityClassification>,
    pub deadline: Option<DeadlineConstraint>,
}

/// A single change to a participant's slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotWrite {
    Chronicle(Chronicle),
    Priority(PriorityClassification),
    Deadline(DeadlineConstraint),
    /// Remove the chronicle, priority and deadline together.
    Clear,
}

/// Typed access to the three registry tables.
///
/// Every mutation goes through [`ChronicleLedger::commit`], which turns a
/// [`SlotWrite`] into one atomic batch. That is the only place where more
/// than one table is touched.
pub struct ChronicleLedger<S: TableStore> {
    store: S,
}

impl<S: TableStore> ChronicleLedger<S> {
    /// Create a new ledger wrapping the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Load the chronicle for a participant.
    pub fn load_chronicle(&self, who: &Address) -> Result<Option<Chronicle>, StorageError> {
        self.load(Table::Chronicle, who)
    }

    /// Load the priority classification for a participant.
    pub fn load_priority(
        &self,
        who: &Address,
    ) -> Result<Option<PriorityClassification>, StorageError> {
        self.load(Table::Priority, who)
    }

    /// Load the deadline constraint for a participant.
    pub fn load_deadline(&self, who: &Address) -> Result<Option<DeadlineConstraint>, StorageError> {
        self.load(Table::Deadline, who)
    }

    /// Load all three records for a participant.
    pub fn load_slot(&self, who: &Address) -> Result<Slot, StorageError> {
        Ok(Slot {
            chronicle: self.load_chronicle(who)?,
            priority: self.load_priority(who)?,
            deadline: self.load_deadline(who)?,
        })
    }

    /// Whether `table` holds a record for the participant.
    pub fn contains(&self, table: Table, who: &Address) -> Result<bool, StorageError> {
        self.store.exists(table, who)
    }

    /// Apply a slot write as one atomic batch.
    pub fn commit(&self, who: &Address, write: SlotWrite) -> Result<(), StorageError> {
        let ops = match write {
            SlotWrite::Chronicle(c) => vec![put(Table::Chronicle, who, &c)?],
            SlotWrite::Priority(p) => vec![put(Table::Priority, who, &p)?],
            SlotWrite::Deadline(d) => vec![put(Table::Deadline, who, &d)?],
            SlotWrite::Clear => Table::ALL
                .iter()
                .map(|&table| BatchOp::Delete {
                    table,
                    key: who.to_vec(),
                })
                .collect(),
        };
        self.store.write_batch(ops)
    }

    /// List every participant holding a chronicle, ordered by address bytes.
    pub fn participants(&self) -> Result<Vec<Address>, StorageError> {
        let results = self.store.scan(Table::Chronicle)?;
        let mut participants = Vec::with_capacity(results.len());
        for (key, _) in results {
            if key.len() == ADDRESS_LEN {
                let mut addr = [0u8; ADDRESS_LEN];
                addr.copy_from_slice(&key);
                participants.push(addr);
            } else {
                tracing::warn!(len = key.len(), "skipping malformed chronicle key");
            }
        }
        Ok(participants)
    }

    fn load<T: BorshDeserialize>(
        &self,
        table: Table,
        who: &Address,
    ) -> Result<Option<T>, StorageError> {
        match self.store.get(table, who)? {
            Some(bytes) => {
                let value =
                    T::try_from_slice(&bytes).map_err(|e| StorageError::DeserializationError {
                        table: table.name(),
                        reason: e.to_string(),
                    })?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }
}

fn put<T: BorshSerialize>(table: Table, who: &Address, value: &T) -> Result<BatchOp, StorageError> {
    let value = borsh::to_vec(value).map_err(|e| StorageError::SerializationError {
        table: table.name(),
        reason: e.to_string(),
    })?;
    Ok(BatchOp::Put {
        table,
        key: who.to_vec(),
        value,
    })
}
