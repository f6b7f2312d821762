//! Strongly-typed ID wrappers for backend entities
//!
//! The backend numbers entries, lines and accounts with plain integers.
//! Newtype wrappers keep an entry id from being passed where an account
//! code is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Macro to generate integer ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw backend number
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Get the raw backend number
            pub const fn value(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(s.parse()?))
            }
        }
    };
}

define_id!(EntryId, "JE-");
define_id!(LineId, "L-");
define_id!(AccountCode, "");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        assert_eq!(EntryId::new(7).to_string(), "JE-7");
        assert_eq!(LineId::new(2).to_string(), "L-2");
        assert_eq!(AccountCode::new(1001).to_string(), "1001");
    }

    #[test]
    fn test_id_parse_accepts_prefix() {
        assert_eq!("JE-12".parse::<EntryId>().unwrap(), EntryId::new(12));
        assert_eq!("12".parse::<EntryId>().unwrap(), EntryId::new(12));
        assert_eq!(" 4001 ".parse::<AccountCode>().unwrap(), AccountCode::new(4001));
        assert!("JE-x".parse::<EntryId>().is_err());
    }

    #[test]
    fn test_id_serialization_is_bare_number() {
        let json = serde_json::to_string(&AccountCode::new(5001)).unwrap();
        assert_eq!(json, "5001");
        let back: AccountCode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, AccountCode::new(5001));
    }

    #[test]
    fn test_ids_order_numerically() {
        let mut codes = vec![AccountCode::new(5001), AccountCode::new(1001), AccountCode::new(4001)];
        codes.sort();
        assert_eq!(codes.first(), Some(&AccountCode::new(1001)));
    }
}
