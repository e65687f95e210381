use std::fmt;

use serde::{Deserialize, Serialize};

/// Target chat of a request.
///
/// The API accepts either the numeric chat identifier or the `@username` of a
/// public channel. Each serializes as-is: a JSON number or a JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChatId {
    Id(i64),
    Username(String),
}

impl ChatId {
    /// Parse a CLI-style chat reference: integers become [`ChatId::Id`],
    /// anything else is kept as a channel handle.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<i64>() {
            Ok(id) => Self::Id(id),
            Err(_) => Self::Username(raw.trim().to_string()),
        }
    }
}

impl From<i64> for ChatId {
    fn from(id: i64) -> Self {
        Self::Id(id)
    }
}

impl From<i32> for ChatId {
    fn from(id: i32) -> Self {
        Self::Id(i64::from(id))
    }
}

impl From<&str> for ChatId {
    fn from(username: &str) -> Self {
        Self::Username(username.to_string())
    }
}

impl From<String> for ChatId {
    fn from(username: String) -> Self {
        Self::Username(username)
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Username(name) => f.write_str(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_id_serializes_as_number() {
        let json = serde_json::to_string(&ChatId::from(-1001234)).unwrap();
        assert_eq!(json, "-1001234");
    }

    #[test]
    fn username_serializes_as_string() {
        let json = serde_json::to_string(&ChatId::from("@channel")).unwrap();
        assert_eq!(json, r#""@channel""#);
    }

    #[test]
    fn parse_distinguishes_ids_from_handles() {
        assert_eq!(ChatId::parse("42"), ChatId::Id(42));
        assert_eq!(ChatId::parse(" -7 "), ChatId::Id(-7));
        assert_eq!(
            ChatId::parse("@news"),
            ChatId::Username("@news".to_string())
        );
    }

    #[test]
    fn deserializes_both_forms() {
        let id: ChatId = serde_json::from_str("99").unwrap();
        let name: ChatId = serde_json::from_str(r#""@x""#).unwrap();
        assert_eq!(id, ChatId::Id(99));
        assert_eq!(name, ChatId::Username("@x".to_string()));
    }
}
