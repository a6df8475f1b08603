//! SKU identifier value object.

use crate::{validation::rules, PricingError};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// A validated stock keeping unit identifier.
///
/// SKUs are case-sensitive and stored exactly as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(try_from = "String", into = "String")]
pub struct Sku(String);

impl Sku {
    /// Parses and validates a SKU.
    pub fn parse(value: impl Into<String>) -> Result<Self, PricingError> {
        let value = value.into();
        rules::valid_sku(&value)
            .map_err(|e| PricingError::validation(format!("Invalid SKU '{}': {}", value, e.code)))?;
        Ok(Self(value))
    }

    /// Wraps a value already known to be valid (e.g. read back from the store).
    #[must_use]
    pub fn new_unchecked(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the SKU as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Sku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Sku {
    type Error = PricingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Sku> for String {
    fn from(sku: Sku) -> Self {
        sku.0
    }
}

impl AsRef<str> for Sku {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let sku = Sku::parse("SKU123").unwrap();
        assert_eq!(sku.as_str(), "SKU123");
        assert_eq!(sku.to_string(), "SKU123");
    }

    #[test]
    fn test_parse_invalid() {
        assert!(matches!(Sku::parse("  "), Err(PricingError::Validation(_))));
        assert!(Sku::parse("a b").is_err());
    }

    #[test]
    fn test_case_sensitive() {
        assert_ne!(Sku::parse("sku123").unwrap(), Sku::parse("SKU123").unwrap());
    }

    #[test]
    fn test_serde_round_trip_rejects_invalid() {
        let sku: Sku = serde_json::from_str("\"SKU-9\"").unwrap();
        assert_eq!(sku.as_str(), "SKU-9");
        assert_eq!(serde_json::to_string(&sku).unwrap(), "\"SKU-9\"");
        assert!(serde_json::from_str::<Sku>("\"bad sku\"").is_err());
    }
}
