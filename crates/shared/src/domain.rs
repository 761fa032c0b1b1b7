use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Record identifier as it arrives from the data file: either a JSON number or a string.
///
/// Numbers are kept as [`serde_json::Number`] so float ids and ids past `i64::MAX` decode
/// instead of failing the whole payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Number(serde_json::Number),
    Text(String),
}

impl UserId {
    /// Equality tolerant of number/string mismatches between a number and a string:
    /// `1`, `"1"` and `" 1.0"` all match `1`. Two strings compare exactly, so `"7"`
    /// and `"007"` stay distinct.
    pub fn loosely_eq(&self, other: &UserId) -> bool {
        match (self, other) {
            (Self::Text(left), Self::Text(right)) => left == right,
            (Self::Number(left), Self::Number(right)) => {
                left == right || left.as_f64() == right.as_f64()
            }
            (Self::Number(number), Self::Text(text)) | (Self::Text(text), Self::Number(number)) => {
                match (number.as_f64(), text_as_number(text)) {
                    (Some(left), Some(right)) => left == right,
                    _ => false,
                }
            }
        }
    }

    /// Compares against a textual token such as a `data-user-id` attribute value.
    pub fn matches_token(&self, token: &str) -> bool {
        self.loosely_eq(&UserId::Text(token.to_string()))
    }
}

/// Numeric reading of a string id; blank strings read as zero.
fn text_as_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Some(0.0)
    } else {
        trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub name: String,
    pub age: i64,
    pub phone: String,
    pub image: String,
    pub phrase: String,
    pub animal: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Alphabetical,
    Age,
}

impl SortKey {
    /// State a toggle for this key carries before its first activation.
    pub fn initial_mode(self) -> SortMode {
        match self {
            Self::Alphabetical => SortMode::AlphabeticalAscending,
            Self::Age => SortMode::AgeAscending,
        }
    }
}

#[derive(Debug, Error)]
#[error("unknown sort key '{0}'")]
pub struct UnknownSortKey(String);

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "alphabet" | "alphabetical" | "name" => Ok(Self::Alphabetical),
            "age" => Ok(Self::Age),
            other => Err(UnknownSortKey(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortMode {
    #[default]
    #[serde(rename = "alphabet")]
    AlphabeticalAscending,
    #[serde(rename = "non-alphabet")]
    AlphabeticalDescending,
    #[serde(rename = "age-grow")]
    AgeAscending,
    #[serde(rename = "age-fall")]
    AgeDescending,
}

impl SortMode {
    pub const ALL: [SortMode; 4] = [
        Self::AlphabeticalAscending,
        Self::AlphabeticalDescending,
        Self::AgeAscending,
        Self::AgeDescending,
    ];

    /// Token persisted in a toggle's `data-sort-state` attribute.
    pub fn token(self) -> &'static str {
        match self {
            Self::AlphabeticalAscending => "alphabet",
            Self::AlphabeticalDescending => "non-alphabet",
            Self::AgeAscending => "age-grow",
            Self::AgeDescending => "age-fall",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.token() == token)
    }

    /// Flips direction within the same key.
    pub fn next(self) -> Self {
        match self {
            Self::AlphabeticalAscending => Self::AlphabeticalDescending,
            Self::AlphabeticalDescending => Self::AlphabeticalAscending,
            Self::AgeAscending => Self::AgeDescending,
            Self::AgeDescending => Self::AgeAscending,
        }
    }

    pub fn key(self) -> SortKey {
        match self {
            Self::AlphabeticalAscending | Self::AlphabeticalDescending => SortKey::Alphabetical,
            Self::AgeAscending | Self::AgeDescending => SortKey::Age,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_and_text_ids_compare_loosely() {
        assert!(UserId::from(2).loosely_eq(&UserId::Text("2".into())));
        assert!(UserId::Text(" 2.0".into()).loosely_eq(&UserId::from(2)));
        assert!(UserId::Text("abc".into()).loosely_eq(&UserId::Text("abc".into())));
        assert!(!UserId::from(2).loosely_eq(&UserId::from(3)));
        assert!(UserId::Text(" ".into()).loosely_eq(&UserId::from(0)));
        assert!(!UserId::Text("abc".into()).loosely_eq(&UserId::from(0)));
        assert!(UserId::from(7).matches_token("7"));
    }

    #[test]
    fn two_text_ids_compare_exactly() {
        let seven = UserId::Text("7".into());
        for other in ["007", "7.0", " 7"] {
            assert!(!seven.loosely_eq(&UserId::Text(other.into())), "{other}");
            assert!(UserId::from(7).loosely_eq(&UserId::Text(other.into())), "{other}");
        }
        assert!(!seven.matches_token("007"));
    }

    #[test]
    fn float_and_wide_numeric_ids_decode() {
        let ids: Vec<UserId> =
            serde_json::from_str("[1.0, 18446744073709551615, \"x\"]").expect("ids");
        assert!(matches!(ids[0], UserId::Number(_)));
        assert!(ids[0].loosely_eq(&UserId::from(1)));
        assert!(ids[0].matches_token("1"));
        assert_eq!(ids[1].to_string(), "18446744073709551615");
        assert!(ids[1].matches_token("18446744073709551615"));
        assert_eq!(ids[2], UserId::Text("x".into()));
    }

    #[test]
    fn next_mode_is_an_involution_within_each_key() {
        for mode in SortMode::ALL {
            assert_ne!(mode.next(), mode);
            assert_eq!(mode.next().next(), mode);
            assert_eq!(mode.next().key(), mode.key());
        }
    }

    #[test]
    fn tokens_round_trip_and_match_serde_names() {
        for mode in SortMode::ALL {
            assert_eq!(SortMode::from_token(mode.token()), Some(mode));
            let json = serde_json::to_string(&mode).expect("json");
            assert_eq!(json, format!("\"{}\"", mode.token()));
        }
        assert_eq!(SortMode::from_token("sideways"), None);
    }

    #[test]
    fn sort_keys_parse_from_cli_spelling() {
        assert_eq!("alphabet".parse::<SortKey>().expect("key"), SortKey::Alphabetical);
        assert_eq!("AGE".parse::<SortKey>().expect("key"), SortKey::Age);
        assert!("height".parse::<SortKey>().is_err());
        assert_eq!(SortKey::Age.initial_mode(), SortMode::AgeAscending);
    }
}
