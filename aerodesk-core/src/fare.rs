use serde::{Deserialize, Serialize};
use std::fmt;

/// Cabin a ticket is sold in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FareClass {
    Economy,
    Business,
}

impl fmt::Display for FareClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FareClass::Economy => f.write_str("economy"),
            FareClass::Business => f.write_str("business"),
        }
    }
}
