use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::constants::{MAX_OBJECTIVE_CHARS, MAX_URGENCY, MIN_URGENCY};
use crate::error::ValidationError;
use crate::primitives::Height;

/// A participant's single active objective.
#[derive(
    Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
pub struct Chronicle {
    /// Objective text, 1 to 100 characters.
    pub objective: String,
    /// Whether the objective has been met.
    pub fulfilled: bool,
}

impl Chronicle {
    /// A fresh, unfulfilled chronicle. Validates the objective.
    pub fn open(objective: &str) -> Result<Self, ValidationError> {
        validate_objective(objective)?;
        Ok(Self {
            objective: objective.to_string(),
            fulfilled: false,
        })
    }

    /// A chronicle with both fields supplied. Validates the objective.
    pub fn with_state(objective: &str, fulfilled: bool) -> Result<Self, ValidationError> {
        validate_objective(objective)?;
        Ok(Self {
            objective: objective.to_string(),
            fulfilled,
        })
    }

    /// Objective length in characters.
    pub fn objective_len(&self) -> usize {
        self.objective.chars().count()
    }
}

/// Urgency classification attached to a chronicle.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
pub struct PriorityClassification {
    pub urgency: u8,
}

impl PriorityClassification {
    pub fn new(urgency: u8) -> Result<Self, ValidationError> {
        validate_urgency(urgency)?;
        Ok(Self { urgency })
    }
}

/// Absolute deadline derived from a relative window.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
pub struct DeadlineConstraint {
    pub deadline_height: Height,
    /// Reserved for alerting. Always written `false`.
    pub alert_active: bool,
}

impl DeadlineConstraint {
    /// Compute a deadline `window` heights after `current`.
    pub fn from_window(current: Height, window: u64) -> Result<Self, ValidationError> {
        if window == 0 {
            return Err(ValidationError::ZeroWindow);
        }
        let deadline_height =
            current
                .checked_add(window)
                .ok_or(ValidationError::DeadlineOverflow {
                    height: current,
                    window,
                })?;
        Ok(Self {
            deadline_height,
            alert_active: false,
        })
    }
}

/// Validate an objective: non-empty, at most 100 characters.
pub fn validate_objective(objective: &str) -> Result<(), ValidationError> {
    if objective.is_empty() {
        return Err(ValidationError::EmptyObjective);
    }
    let len = objective.chars().count();
    if len > MAX_OBJECTIVE_CHARS {
        return Err(ValidationError::ObjectiveTooLong { len });
    }
    Ok(())
}

/// Validate an urgency level: within [1, 3].
pub fn validate_urgency(urgency: u8) -> Result<(), ValidationError> {
    if !(MIN_URGENCY..=MAX_URGENCY).contains(&urgency) {
        return Err(ValidationError::UrgencyOutOfRange { urgency });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_open_is_unfulfilled() {
        let c = Chronicle::open("Finish report").unwrap();
        assert_eq!(c.objective, "Finish report");
        assert!(!c.fulfilled);
    }

    #[test]
    fn test_empty_objective_rejected() {
        assert_eq!(Chronicle::open(""), Err(ValidationError::EmptyObjective));
        assert_eq!(
            Chronicle::with_state("", true),
            Err(ValidationError::EmptyObjective)
        );
    }

    #[test]
    fn test_objective_length_boundary() {
        let max = "a".repeat(MAX_OBJECTIVE_CHARS);
        assert!(Chronicle::open(&max).is_ok());
        let over = "a".repeat(MAX_OBJECTIVE_CHARS + 1);
        assert_eq!(
            Chronicle::open(&over),
            Err(ValidationError::ObjectiveTooLong { len: 101 })
        );
    }

    #[test]
    fn test_objective_len_counts_chars() {
        // 100 multi-byte characters are still within bounds.
        let wide = "é".repeat(MAX_OBJECTIVE_CHARS);
        let c = Chronicle::open(&wide).unwrap();
        assert_eq!(c.objective_len(), MAX_OBJECTIVE_CHARS);
    }

    #[test]
    fn test_urgency_bounds() {
        assert!(PriorityClassification::new(0).is_err());
        assert!(PriorityClassification::new(1).is_ok());
        assert!(PriorityClassification::new(3).is_ok());
        assert!(PriorityClassification::new(4).is_err());
    }

    #[test]
    fn test_deadline_from_window() {
        let d = DeadlineConstraint::from_window(500, 100).unwrap();
        assert_eq!(d.deadline_height, 600);
        assert!(!d.alert_active);
    }

    #[test]
    fn test_deadline_zero_window() {
        assert_eq!(
            DeadlineConstraint::from_window(500, 0),
            Err(ValidationError::ZeroWindow)
        );
    }

    #[test]
    fn test_deadline_overflow() {
        assert!(matches!(
            DeadlineConstraint::from_window(u64::MAX, 1),
            Err(ValidationError::DeadlineOverflow { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_urgency_accepted_iff_in_range(u in any::<u8>()) {
            prop_assert_eq!(PriorityClassification::new(u).is_ok(), (1..=3).contains(&u));
        }

        #[test]
        fn prop_deadline_strictly_after_current(h in 0u64..u64::MAX / 2, w in 1u64..u64::MAX / 2) {
            let d = DeadlineConstraint::from_window(h, w).unwrap();
            prop_assert!(d.deadline_height > h);
            prop_assert_eq!(d.deadline_height, h + w);
        }
    }
}
