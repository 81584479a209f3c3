use crate::error::ValidationError;

/// 20-byte participant identity supplied by the host.
pub type Address = [u8; 20];

/// Host height counter (monotonically non-decreasing).
pub type Height = u64;

/// Length of an [`Address`] in bytes.
pub const ADDRESS_LEN: usize = 20;

/// Render an address as `0x`-prefixed lowercase hex.
pub fn address_to_hex(addr: &Address) -> String {
    format!("0x{}", hex::encode(addr))
}

/// Parse a hex string (with or without `0x` prefix) into an address.
pub fn parse_address(s: &str) -> Result<Address, ValidationError> {
    let stripped = s.strip_prefix("0x").unwrap_or(s);
    let bytes = hex::decode(stripped).map_err(|e| ValidationError::MalformedAddress {
        reason: e.to_string(),
    })?;
    bytes
        .try_into()
        .map_err(|v: Vec<u8>| ValidationError::MalformedAddress {
            reason: format!("expected {} bytes, got {}", ADDRESS_LEN, v.len()),
        })
}

/// Serde helper rendering [`Address`] fields as hex strings in JSON views.
pub mod serde_address {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{address_to_hex, parse_address, Address};

    pub fn serialize<S>(value: &Address, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&address_to_hex(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Address, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_address(&s).map_err(serde::de::Error::custom)
    }
}
