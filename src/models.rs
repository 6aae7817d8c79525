use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Conflict resolution applied by `INSERT OR <fallback>`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InsertFallback {
    /// Delete the conflicting row and insert the new one
    Replace,
    /// Keep the existing row and drop the new one silently
    Ignore,
    /// Abort the statement with a constraint error
    #[default]
    Rollback,
}

impl InsertFallback {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsertFallback::Replace => "REPLACE",
            InsertFallback::Ignore => "IGNORE",
            InsertFallback::Rollback => "ROLLBACK",
        }
    }
}

impl fmt::Display for InsertFallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InsertFallback {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "REPLACE" => Ok(InsertFallback::Replace),
            "IGNORE" => Ok(InsertFallback::Ignore),
            "ROLLBACK" => Ok(InsertFallback::Rollback),
            _ => Err(Error::InvalidFallback(s.to_string())),
        }
    }
}
