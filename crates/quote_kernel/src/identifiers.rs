//! Strongly-typed identifiers for backend entities
//!
//! The backend assigns numeric ids. Newtype wrappers around them prevent
//! accidental mixing of different identifier types, e.g. passing a coverage
//! option id where a quote id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

macro_rules! define_id {
    ($name:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a backend-assigned id
            pub fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the underlying numeric id
            pub fn value(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.trim().parse()?))
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> i64 {
                id.0
            }
        }
    };
}

define_id!(QuoteId, "Identifier of a persisted quote");
define_id!(BusinessInfoId, "Identifier of a persisted business-information record");
define_id!(CoverageOptionId, "Identifier of a persisted coverage option");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_id_display() {
        let id = QuoteId::new(42);
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn test_id_parsing() {
        let parsed: QuoteId = " 17 ".parse().unwrap();
        assert_eq!(parsed, QuoteId::new(17));
        assert!("not-a-number".parse::<QuoteId>().is_err());
    }

    #[test]
    fn test_value_conversion() {
        let id = CoverageOptionId::from(9);
        let back: i64 = id.into();
        assert_eq!(back, 9);
        assert_eq!(id.value(), 9);
    }

    #[test]
    fn test_serde_transparent() {
        let id = QuoteId::new(5);
        assert_eq!(serde_json::to_string(&id).unwrap(), "5");
        let parsed: QuoteId = serde_json::from_str("5").unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_ids_do_not_mix() {
        // Different id types with the same value are distinct types;
        // equality is only defined within a type.
        let quote = QuoteId::new(1);
        let option = CoverageOptionId::new(1);
        assert_eq!(quote.value(), option.value());
    }
}
