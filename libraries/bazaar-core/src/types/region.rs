/// Region discriminant and routing
use crate::error::{MarketError, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Geographic partition a user record lives in for its whole lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    /// Eastern partition
    East,
    /// Western partition
    West,
}

impl Region {
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::East => "East",
            Region::West => "West",
        }
    }

    /// Resolve an identity's region tag to a partition.
    ///
    /// Matching is exact and case-sensitive. An absent tag is rejected the
    /// same way an unknown one is.
    pub fn route(tag: Option<&str>) -> Result<Self> {
        match tag {
            Some(tag) => tag.parse(),
            None => Err(MarketError::UnknownRegion(None)),
        }
    }
}

impl FromStr for Region {
    type Err = MarketError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "East" => Ok(Region::East),
            "West" => Ok(Region::West),
            other => Err(MarketError::UnknownRegion(Some(other.to_string()))),
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
