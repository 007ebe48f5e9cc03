//! Entry identifiers
//!
//! Entry ids are derived from the creation time in milliseconds since the
//! Unix epoch, so sorting by id sorts by creation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a diary entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(i64);

impl EntryId {
    /// Id for an entry created at `at`
    pub fn from_timestamp(at: DateTime<Utc>) -> Self {
        Self(at.timestamp_millis())
    }

    /// Id for an entry created at `at`, kept strictly above `latest`
    ///
    /// Two entries created in the same millisecond still get distinct,
    /// increasing ids.
    pub fn next(at: DateTime<Utc>, latest: Option<EntryId>) -> Self {
        let candidate = Self::from_timestamp(at);
        match latest {
            Some(latest) if latest >= candidate => Self(latest.0 + 1),
            _ => candidate,
        }
    }

    pub fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for EntryId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl FromStr for EntryId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}
