//! JSON-within-JSON encoding.
//!
//! The Bot API expects structured parameters such as `reply_markup` and the
//! `results` of `answerInlineQuery` as a *string* holding JSON, not as a nested
//! object. Request types opt into this per field:
//!
//! ```
//! use serde::Serialize;
//! use ted_proto::{ForceReply, ReplyMarkup};
//!
//! #[derive(Serialize)]
//! struct Outgoing {
//!     #[serde(
//!         skip_serializing_if = "Option::is_none",
//!         serialize_with = "ted_proto::encoding::json_string_opt"
//!     )]
//!     reply_markup: Option<ReplyMarkup>,
//! }
//!
//! let body = serde_json::to_string(&Outgoing {
//!     reply_markup: Some(ForceReply::default().into()),
//! })
//! .unwrap();
//! assert_eq!(body, r#"{"reply_markup":"{\"force_reply\":true}"}"#);
//! ```

use serde::ser::{Error as _, Serialize, Serializer};

/// Encode `value` as JSON text.
pub fn to_json_string<T>(value: &T) -> Result<String, serde_json::Error>
where
    T: Serialize + ?Sized,
{
    serde_json::to_string(value)
}

/// `serialize_with` target: emits `value` as a string containing its JSON.
pub fn json_string<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Serialize + ?Sized,
    S: Serializer,
{
    let encoded = to_json_string(value).map_err(S::Error::custom)?;
    serializer.serialize_str(&encoded)
}

/// [`json_string`] for optional fields. Pair with
/// `skip_serializing_if = "Option::is_none"`; a `None` that is not skipped is
/// written as `null`.
#[allow(clippy::ref_option)]
pub fn json_string_opt<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Serialize,
    S: Serializer,
{
    match value {
        Some(inner) => json_string(inner, serializer),
        None => serializer.serialize_none(),
    }
}
