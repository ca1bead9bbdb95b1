use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{CoreError, CoreResult};

/// A city name as accepted at the counter: ASCII letters and spaces, not blank.
///
/// The raw text is kept as typed so that endpoint comparisons stay exact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CityName(String);

impl CityName {
    pub fn parse(raw: &str) -> CoreResult<Self> {
        if raw.trim().is_empty() {
            return Err(CoreError::validation("City names cannot be empty"));
        }

        if !raw.chars().all(|c| c.is_ascii_alphabetic() || c == ' ') {
            return Err(CoreError::validation(
                "City names must only contain letters and spaces",
            ));
        }

        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CityName {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CityName> for String {
    fn from(city: CityName) -> Self {
        city.0
    }
}

impl PartialEq<str> for CityName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl fmt::Display for CityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(err: CoreError) -> String {
        match err {
            CoreError::ValidationError(msg) => msg,
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_accepts_letters_and_spaces() {
        let city = CityName::parse("Alice Springs").unwrap();
        assert_eq!(city.as_str(), "Alice Springs");
        assert_eq!(city, *"Alice Springs");
    }

    #[test]
    fn test_rejects_blank_names() {
        for raw in ["", "   "] {
            let err = CityName::parse(raw).unwrap_err();
            assert_eq!(message(err), "City names cannot be empty");
        }
    }

    #[test]
    fn test_rejects_digits_and_symbols() {
        for raw in ["Melbourne123", "Syd@ney", "Mel-bourne"] {
            let err = CityName::parse(raw).unwrap_err();
            assert_eq!(message(err), "City names must only contain letters and spaces");
        }
    }

    #[test]
    fn test_deserialization_validates() {
        let ok: CityName = serde_json::from_str("\"Perth\"").unwrap();
        assert_eq!(ok.as_str(), "Perth");

        let bad: Result<CityName, _> = serde_json::from_str("\"P3rth\"");
        assert!(bad.is_err());
    }
}
