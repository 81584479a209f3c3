//! Success result of a mutating registry operation.

use std::fmt;

use serde::Serialize;

use chronicle_types::primitives::{address_to_hex, serde_address, Address};

/// A key-value attribute attached to a [`Receipt`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    pub key: String,
    pub value: String,
}

/// What a successful operation did, and to whom.
///
/// ```ignore
/// let receipt = registry.establish(&ctx, "Finish report")?;
/// assert_eq!(receipt.action, "establish");
/// println!("{receipt}"); // "Chronicle established"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receipt {
    /// Operation name, e.g. `"terminate"`.
    pub action: &'static str,
    /// The participant whose slot was written.
    #[serde(with = "serde_address")]
    pub participant: Address,
    pub message: String,
    pub attributes: Vec<Attribute>,
}

impl Receipt {
    pub fn new(action: &'static str, participant: Address, message: impl Into<String>) -> Self {
        Receipt {
            action,
            participant,
            message: message.into(),
            attributes: Vec::new(),
        }
    }

    /// Add a key-value attribute.
    pub fn add_attribute(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.attributes.push(Attribute {
            key: key.into(),
            value: value.to_string(),
        });
        self
    }

    /// Add an address attribute (rendered as hex).
    pub fn add_address(self, key: impl Into<String>, addr: &Address) -> Self {
        self.add_attribute(key, address_to_hex(addr))
    }

    /// Look up an attribute value by key.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.key == key)
            .map(|a| a.value.as_str())
    }
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attributes() {
        let r = Receipt::new("set_priority", [1u8; 20], "Priority set")
            .add_attribute("urgency", 2u8)
            .add_address("by", &[2u8; 20]);
        assert_eq!(r.attribute("urgency"), Some("2"));
        assert!(r.attribute("by").unwrap().starts_with("0x0202"));
        assert_eq!(r.attribute("missing"), None);
        assert_eq!(r.to_string(), "Priority set");
    }

    #[test]
    fn test_json_shape() {
        let r = Receipt::new("terminate", [0u8; 20], "Chronicle terminated");
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["action"], "terminate");
        assert_eq!(json["participant"], format!("0x{}", "00".repeat(20)));
    }
}
