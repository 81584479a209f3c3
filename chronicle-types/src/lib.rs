//! Shared type definitions for the Chronicle registry.

pub mod constants;
pub mod error;
pub mod primitives;
pub mod record;
pub mod view;

#[cfg(test)]
mod tests {
    use borsh::{BorshDeserialize, BorshSerialize};

    /// Helper: borsh round-trip test.
    fn borsh_roundtrip<T: BorshSerialize + BorshDeserialize + PartialEq + std::fmt::Debug>(
        value: &T,
    ) {
        let encoded = borsh::to_vec(value).expect("borsh serialize failed");
        let decoded = T::try_from_slice(&encoded).expect("borsh deserialize failed");
        assert_eq!(*value, decoded);
    }

    #[test]
    fn test_record_encodings_are_stable() {
        use crate::record::*;
        borsh_roundtrip(&Chronicle::with_state("Ship the release", true).unwrap());
        borsh_roundtrip(&PriorityClassification::new(2).unwrap());
        borsh_roundtrip(&DeadlineConstraint::from_window(7, 3).unwrap());
    }

    #[test]
    fn test_deadline_encoding_layout() {
        use crate::record::DeadlineConstraint;
        // u64 little-endian height followed by one bool byte.
        let d = DeadlineConstraint::from_window(0, 1).unwrap();
        let encoded = borsh::to_vec(&d).unwrap();
        assert_eq!(encoded, vec![1, 0, 0, 0, 0, 0, 0, 0, 0]);
    }
}
