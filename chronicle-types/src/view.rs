//! Read-only views returned by the inspection operations.

use serde::{Deserialize, Serialize};

use crate::primitives::{serde_address, Address, Height};
use crate::record::Chronicle;

/// Summary of a participant's chronicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Examination {
    pub present: bool,
    /// Objective length in characters, 0 when absent.
    pub length: usize,
    pub fulfilled: bool,
}

impl Examination {
    pub fn absent() -> Self {
        Self::default()
    }
}

impl From<Option<&Chronicle>> for Examination {
    fn from(chronicle: Option<&Chronicle>) -> Self {
        match chronicle {
            Some(c) => Examination {
                present: true,
                length: c.objective_len(),
                fulfilled: c.fulfilled,
            },
            None => Examination::absent(),
        }
    }
}

/// Existence flags across all three tables for one participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnosis {
    pub chronicle_exists: bool,
    pub priority_configured: bool,
    /// A deadline record exists. Says nothing about whether it has passed.
    pub deadline_active: bool,
    pub current_height: Height,
    #[serde(with = "serde_address")]
    pub participant: Address,
}

impl Diagnosis {
    /// True when no table holds a record for the participant.
    pub fn is_clear(&self) -> bool {
        !self.chronicle_exists && !self.priority_configured && !self.deadline_active
    }
}
