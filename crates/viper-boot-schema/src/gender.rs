//! Gender enumeration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Valid names for gender.
///
/// A closed two-value set, serialized as `"MALE"` / `"FEMALE"` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    /// Valid name for male gender.
    Male,
    /// Valid name for female gender.
    Female,
}

impl Gender {
    /// All members of the enumeration, in declaration order.
    pub const ALL: [Self; 2] = [Self::Male, Self::Female];

    /// The wire name of the variant.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "MALE",
            Self::Female => "FEMALE",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MALE" => Ok(Self::Male),
            "FEMALE" => Ok(Self::Female),
            other => Err(format!("invalid gender: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        assert_eq!(Gender::Male.as_str(), "MALE");
        assert_eq!(Gender::Female.as_str(), "FEMALE");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("MALE".parse::<Gender>().unwrap(), Gender::Male);
        assert_eq!("FEMALE".parse::<Gender>().unwrap(), Gender::Female);
        assert!("male".parse::<Gender>().is_err());
        assert!("OTHER".parse::<Gender>().is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        for gender in Gender::ALL {
            let json = serde_json::to_string(&gender).unwrap();
            let back: Gender = serde_json::from_str(&json).unwrap();
            assert_eq!(back, gender);
        }
    }

    #[test]
    fn test_serialized_form() {
        assert_eq!(serde_json::to_string(&Gender::Male).unwrap(), "\"MALE\"");
        assert_eq!(serde_json::to_string(&Gender::Female).unwrap(), "\"FEMALE\"");
    }
}
