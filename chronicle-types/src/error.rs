use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{MAX_OBJECTIVE_CHARS, MAX_URGENCY, MIN_URGENCY};

/// The three expected failure outcomes of a registry operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The operation requires a chronicle that is absent.
    NotFound,
    /// The operation requires the absence of a chronicle that is present.
    AlreadyExists,
    /// A supplied value failed validation.
    InvalidInput,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::AlreadyExists => "already_exists",
            ErrorKind::InvalidInput => "invalid_input",
        }
    }
}

/// Input validation failures. All of them map to [`ErrorKind::InvalidInput`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("objective must not be empty")]
    EmptyObjective,

    #[error("objective too long: {len} > {max} characters", max = MAX_OBJECTIVE_CHARS)]
    ObjectiveTooLong { len: usize },

    #[error(
        "urgency must be between {min} and {max}, got {urgency}",
        min = MIN_URGENCY,
        max = MAX_URGENCY
    )]
    UrgencyOutOfRange { urgency: u8 },

    #[error("deadline window must be greater than zero")]
    ZeroWindow,

    #[error("deadline overflows height counter: {height} + {window}")]
    DeadlineOverflow { height: u64, window: u64 },

    #[error("malformed address: {reason}")]
    MalformedAddress { reason: String },
}

impl ValidationError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidInput
    }
}
