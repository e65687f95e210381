//! Reply markup attached to outgoing messages.
//!
//! Every variant serializes to a plain JSON object. Requests carrying markup
//! re-encode that object as a string via [`crate::encoding`].

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// One of the four interactive affordances a message can carry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReplyMarkup {
    InlineKeyboard(InlineKeyboardMarkup),
    ReplyKeyboard(ReplyKeyboardMarkup),
    RemoveKeyboard(ReplyKeyboardRemove),
    ForceReply(ForceReply),
}

impl From<InlineKeyboardMarkup> for ReplyMarkup {
    fn from(markup: InlineKeyboardMarkup) -> Self {
        Self::InlineKeyboard(markup)
    }
}

impl From<ReplyKeyboardMarkup> for ReplyMarkup {
    fn from(markup: ReplyKeyboardMarkup) -> Self {
        Self::ReplyKeyboard(markup)
    }
}

impl From<ReplyKeyboardRemove> for ReplyMarkup {
    fn from(markup: ReplyKeyboardRemove) -> Self {
        Self::RemoveKeyboard(markup)
    }
}

impl From<ForceReply> for ReplyMarkup {
    fn from(markup: ForceReply) -> Self {
        Self::ForceReply(markup)
    }
}

/// One button of a custom reply keyboard.
///
/// `request_contact` and `request_location` are mutually exclusive and only
/// honoured in private chats.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KeyboardButton {
    pub text: String,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub request_contact: bool,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub request_location: bool,
}

impl From<&str> for KeyboardButton {
    fn from(text: &str) -> Self {
        Self {
            text: text.to_string(),
            ..Self::default()
        }
    }
}

/// A custom keyboard replacing the user's letter keyboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReplyKeyboardMarkup {
    pub keyboard: Vec<Vec<KeyboardButton>>,

    /// Ask clients to shrink the keyboard to fit its rows.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub resize_keyboard: bool,

    /// Ask clients to hide the keyboard once a button was used.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub one_time_keyboard: bool,

    /// Show the keyboard only to mentioned users or the replied-to sender.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub selective: bool,
}

/// Instructs clients to drop the current custom keyboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplyKeyboardRemove {
    pub selective: bool,
}

impl Serialize for ReplyKeyboardRemove {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_flag_with_selective(
            serializer,
            "ReplyKeyboardRemove",
            "remove_keyboard",
            self.selective,
        )
    }
}

/// Makes clients open a reply prompt to the bot's message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ForceReply {
    pub selective: bool,
}

impl Serialize for ForceReply {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_flag_with_selective(serializer, "ForceReply", "force_reply", self.selective)
    }
}

/// `{"<flag>": true}` plus `"selective": true` when set.
fn serialize_flag_with_selective<S: Serializer>(
    serializer: S,
    name: &'static str,
    flag: &'static str,
    selective: bool,
) -> Result<S::Ok, S::Error> {
    let mut state = serializer.serialize_struct(name, 1 + usize::from(selective))?;
    state.serialize_field(flag, &true)?;
    if selective {
        state.serialize_field("selective", &true)?;
    } else {
        state.skip_field("selective")?;
    }
    state.end()
}

/// One button of an inline keyboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InlineKeyboardButton {
    pub text: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_data: Option<String>,
}

impl InlineKeyboardButton {
    pub fn callback(text: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            url: None,
            callback_data: Some(data.into()),
        }
    }

    pub fn url(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            url: Some(url.into()),
            callback_data: None,
        }
    }
}

/// Buttons shown right below the message they belong to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

impl From<InlineKeyboardButton> for InlineKeyboardMarkup {
    fn from(button: InlineKeyboardButton) -> Self {
        Self {
            inline_keyboard: vec![vec![button]],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn force_reply_default() {
        let json = serde_json::to_string(&ForceReply::default()).unwrap();
        assert_eq!(json, r#"{"force_reply":true}"#);
    }

    #[test]
    fn force_reply_selective() {
        let json = serde_json::to_string(&ForceReply { selective: true }).unwrap();
        assert_eq!(json, r#"{"force_reply":true,"selective":true}"#);
    }

    #[test]
    fn remove_keyboard_default_and_selective() {
        let plain = serde_json::to_value(ReplyKeyboardRemove::default()).unwrap();
        assert_eq!(plain, json!({"remove_keyboard": true}));

        let selective = serde_json::to_value(ReplyKeyboardRemove { selective: true }).unwrap();
        assert_eq!(selective, json!({"remove_keyboard": true, "selective": true}));
    }

    #[test]
    fn inline_keyboard_omits_empty_button_fields() {
        let markup = InlineKeyboardMarkup::from(InlineKeyboardButton::callback("Button", "Data"));
        let json = serde_json::to_string(&ReplyMarkup::from(markup)).unwrap();
        assert_eq!(
            json,
            r#"{"inline_keyboard":[[{"text":"Button","callback_data":"Data"}]]}"#
        );
    }

    #[test]
    fn reply_keyboard_omits_false_flags() {
        let markup = ReplyKeyboardMarkup {
            keyboard: vec![vec![
                KeyboardButton::from("Yes"),
                KeyboardButton {
                    text: "Share location".to_string(),
                    request_location: true,
                    ..KeyboardButton::default()
                },
            ]],
            resize_keyboard: true,
            ..ReplyKeyboardMarkup::default()
        };
        let value = serde_json::to_value(ReplyMarkup::from(markup)).unwrap();
        assert_eq!(
            value,
            json!({
                "keyboard": [[
                    {"text": "Yes"},
                    {"text": "Share location", "request_location": true}
                ]],
                "resize_keyboard": true
            })
        );
    }

    #[test]
    fn variants_have_no_discriminant() {
        let value = serde_json::to_value(ReplyMarkup::from(ForceReply::default())).unwrap();
        assert_eq!(value, json!({"force_reply": true}));
    }
}
