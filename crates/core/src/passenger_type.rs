//! Passenger categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Closed set of passenger categories, stored as lower-case text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PassengerType {
    Adult,
    Child,
    Infant,
}

impl PassengerType {
    pub const ALL: [PassengerType; 3] = [
        PassengerType::Adult,
        PassengerType::Child,
        PassengerType::Infant,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PassengerType::Adult => "adult",
            PassengerType::Child => "child",
            PassengerType::Infant => "infant",
        }
    }
}

impl fmt::Display for PassengerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown passenger type: {0}")]
pub struct UnknownPassengerType(pub String);

impl FromStr for PassengerType {
    type Err = UnknownPassengerType;

    /// Exact, case-sensitive match against the stored values.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownPassengerType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn parses_every_known_value() {
        for t in PassengerType::ALL {
            assert_eq!(t.as_str().parse::<PassengerType>(), Ok(t));
        }
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert_matches!("Adult".parse::<PassengerType>(), Err(UnknownPassengerType(_)));
    }

    #[test]
    fn unknown_value_is_rejected() {
        assert_eq!(
            "pilot".parse::<PassengerType>(),
            Err(UnknownPassengerType("pilot".into()))
        );
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(PassengerType::Infant).unwrap(),
            serde_json::json!("infant")
        );
    }
}
