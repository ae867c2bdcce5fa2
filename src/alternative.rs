//! Alternative hypotheses
//!
//! Direction in which the observed statistic is compared against the rest of the
//! sample space.
use crate::errors::HypotestError;
use crate::utils::items_to_strings;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The alternative hypothesis of a test.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alternative {
    /// Outcomes whose statistic is at least as large in absolute value.
    #[default]
    #[serde(rename = "two-sided")]
    TwoSided,
    /// Outcomes whose statistic is less than or equal to the observed one.
    #[serde(rename = "less")]
    Less,
    /// Outcomes whose statistic is greater than or equal to the observed one.
    #[serde(rename = "greater")]
    Greater,
}

impl Alternative {
    /// The alternative pointing the other way. Two-sided is its own mirror.
    pub fn mirrored(self) -> Self {
        match self {
            Alternative::TwoSided => Alternative::TwoSided,
            Alternative::Less => Alternative::Greater,
            Alternative::Greater => Alternative::Less,
        }
    }
}

impl FromStr for Alternative {
    type Err = HypotestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "two-sided" => Ok(Alternative::TwoSided),
            "less" => Ok(Alternative::Less),
            "greater" => Ok(Alternative::Greater),
            _ => Err(HypotestError::ParseString(
                s.to_string(),
                "Alternative".to_string(),
                items_to_strings(vec!["two-sided", "less", "greater"]),
            )),
        }
    }
}

impl fmt::Display for Alternative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Alternative::TwoSided => "two-sided",
            Alternative::Less => "less",
            Alternative::Greater => "greater",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_alternative() {
        assert_eq!("two-sided".parse::<Alternative>().unwrap(), Alternative::TwoSided);
        assert_eq!("less".parse::<Alternative>().unwrap(), Alternative::Less);
        assert_eq!("greater".parse::<Alternative>().unwrap(), Alternative::Greater);
        assert!(matches!(
            "two_sided".parse::<Alternative>(),
            Err(HypotestError::ParseString(_, _, _))
        ));
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for alt in [Alternative::TwoSided, Alternative::Less, Alternative::Greater] {
            assert_eq!(alt.to_string().parse::<Alternative>().unwrap(), alt);
        }
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Alternative::TwoSided).unwrap(), "\"two-sided\"");
        let alt: Alternative = serde_json::from_str("\"greater\"").unwrap();
        assert_eq!(alt, Alternative::Greater);
    }

    #[test]
    fn test_mirrored() {
        assert_eq!(Alternative::Less.mirrored(), Alternative::Greater);
        assert_eq!(Alternative::Greater.mirrored(), Alternative::Less);
        assert_eq!(Alternative::TwoSided.mirrored(), Alternative::TwoSided);
    }
}
