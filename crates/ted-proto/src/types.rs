//! Payloads received from the API: updates and the objects they carry.
//!
//! Unknown fields are ignored and optional fields default, so new API
//! additions never break decoding.

use serde::{Deserialize, Serialize};

/// An incoming update. At most one of the optional payloads is present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
    #[serde(default)]
    pub edited_message: Option<Message>,
    #[serde(default)]
    pub callback_query: Option<CallbackQuery>,
    #[serde(default)]
    pub inline_query: Option<InlineQuery>,
    #[serde(default)]
    pub chosen_inline_result: Option<ChosenInlineResult>,
}

/// Borrowed view of whichever payload an [`Update`] carries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UpdateKind<'a> {
    Message(&'a Message),
    EditedMessage(&'a Message),
    CallbackQuery(&'a CallbackQuery),
    InlineQuery(&'a InlineQuery),
    ChosenInlineResult(&'a ChosenInlineResult),
    /// A payload type this crate does not model.
    Unknown,
}

impl Update {
    pub fn kind(&self) -> UpdateKind<'_> {
        if let Some(message) = &self.message {
            UpdateKind::Message(message)
        } else if let Some(message) = &self.edited_message {
            UpdateKind::EditedMessage(message)
        } else if let Some(query) = &self.callback_query {
            UpdateKind::CallbackQuery(query)
        } else if let Some(query) = &self.inline_query {
            UpdateKind::InlineQuery(query)
        } else if let Some(result) = &self.chosen_inline_result {
            UpdateKind::ChosenInlineResult(result)
        } else {
            UpdateKind::Unknown
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Unique message identifier inside this chat.
    pub message_id: i64,

    /// Sender, empty for messages sent to channels.
    #[serde(default)]
    pub from: Option<User>,

    pub chat: Chat,

    /// Unix time the message was sent.
    #[serde(default)]
    pub date: i64,

    /// For replies, the original message. It never carries its own
    /// `reply_to_message`.
    #[serde(default)]
    pub reply_to_message: Option<Box<Message>>,

    #[serde(default)]
    pub text: Option<String>,

    /// Usernames, URLs, bot commands, etc. that appear in the text.
    #[serde(default)]
    pub entities: Vec<MessageEntity>,

    #[serde(default)]
    pub location: Option<Location>,
}

impl Message {
    /// The message text, or `""` for non-text messages.
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }
}

/// A Telegram user or bot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub is_bot: bool,
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    /// IETF language tag of the user's language.
    #[serde(default)]
    pub language_code: Option<String>,
    // The three flags below are only returned by getMe.
    #[serde(default)]
    pub can_join_groups: bool,
    #[serde(default)]
    pub can_read_all_group_messages: bool,
    #[serde(default)]
    pub supports_inline_queries: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    /// `private`, `group`, `supergroup` or `channel`.
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

/// A `(type, offset, length)` span in message text.
///
/// Offsets and lengths count UTF-16 code units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageEntity {
    #[serde(rename = "type")]
    pub kind: EntityKind,
    pub offset: usize,
    pub length: usize,
    /// For `text_link` entities, the URL opened on tap.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Mention,
    Hashtag,
    Cashtag,
    BotCommand,
    Url,
    Email,
    PhoneNumber,
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Spoiler,
    Code,
    Pre,
    TextLink,
    TextMention,
    CustomEmoji,
    #[serde(other)]
    Other,
}

/// A press on an inline keyboard button.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: User,
    /// Missing when the message is too old or was sent via inline mode.
    #[serde(default)]
    pub message: Option<Box<Message>>,
    #[serde(default)]
    pub inline_message_id: Option<String>,
    #[serde(default)]
    pub chat_instance: String,
    #[serde(default)]
    pub data: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub longitude: f64,
    pub latitude: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InlineQuery {
    pub id: String,
    pub from: User,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub offset: String,
}

/// An inline result that was chosen by a user and sent to their chat partner.
///
/// Only delivered when inline feedback is enabled via @BotFather.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChosenInlineResult {
    pub result_id: String,
    pub from: User,
    #[serde(default)]
    pub location: Option<Location>,
    /// Present only if an inline keyboard was attached to the message.
    #[serde(default)]
    pub inline_message_id: Option<String>,
    #[serde(default)]
    pub query: String,
}

/// Current status of the bot's webhook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookInfo {
    /// Empty if no webhook is set up.
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub has_custom_certificate: bool,
    #[serde(default)]
    pub pending_update_count: u64,
    /// Unix time of the most recent delivery error.
    #[serde(default)]
    pub last_error_date: Option<i64>,
    #[serde(default)]
    pub last_error_message: Option<String>,
    #[serde(default)]
    pub max_connections: Option<u32>,
    #[serde(default)]
    pub allowed_updates: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_message_update() {
        let update: Update = serde_json::from_str(
            r#"{
                "update_id": 10,
                "message": {
                    "message_id": 5,
                    "from": {"id": 1, "is_bot": false, "first_name": "Ada"},
                    "chat": {"id": 1, "type": "private"},
                    "date": 1700000000,
                    "text": "/start",
                    "entities": [{"type": "bot_command", "offset": 0, "length": 6}]
                }
            }"#,
        )
        .unwrap();

        let UpdateKind::Message(message) = update.kind() else {
            panic!("expected message update, got {:?}", update.kind());
        };
        assert_eq!(message.text(), "/start");
        assert_eq!(message.chat.kind, "private");
        assert_eq!(message.entities[0].kind, EntityKind::BotCommand);
    }

    #[test]
    fn decodes_callback_query_update() {
        let update: Update = serde_json::from_str(
            r#"{
                "update_id": 11,
                "callback_query": {
                    "id": "cb1",
                    "from": {"id": 2, "first_name": "Bob"},
                    "chat_instance": "x",
                    "data": "vote:yes"
                }
            }"#,
        )
        .unwrap();

        match update.kind() {
            UpdateKind::CallbackQuery(query) => {
                assert_eq!(query.data.as_deref(), Some("vote:yes"));
                assert!(query.message.is_none());
            }
            other => panic!("unexpected update kind: {other:?}"),
        }
    }

    #[test]
    fn unknown_entity_kinds_and_payloads_are_tolerated() {
        let update: Update = serde_json::from_str(
            r#"{"update_id": 12, "poll": {"id": "p"}}"#,
        )
        .unwrap();
        assert_eq!(update.kind(), UpdateKind::Unknown);

        let entity: MessageEntity =
            serde_json::from_str(r#"{"type": "blockquote", "offset": 0, "length": 3}"#).unwrap();
        assert_eq!(entity.kind, EntityKind::Other);
    }

    #[test]
    fn decodes_chosen_inline_result_and_inline_query() {
        let chosen: ChosenInlineResult = serde_json::from_str(
            r#"{"result_id": "r1", "from": {"id": 3, "first_name": "C"}, "query": "cats"}"#,
        )
        .unwrap();
        assert_eq!(chosen.result_id, "r1");
        assert!(chosen.location.is_none());

        let query: InlineQuery = serde_json::from_str(
            r#"{"id": "q", "from": {"id": 3, "first_name": "C"}, "query": "dogs", "offset": "",
                "location": {"latitude": 1.5, "longitude": 2.5}}"#,
        )
        .unwrap();
        assert_eq!(query.location.map(|l| l.latitude), Some(1.5));
    }

    #[test]
    fn decodes_webhook_info_without_webhook() {
        let info: WebhookInfo = serde_json::from_str(
            r#"{"url": "", "has_custom_certificate": false, "pending_update_count": 0}"#,
        )
        .unwrap();
        assert!(info.url.is_empty());
        assert!(info.allowed_updates.is_empty());
        assert!(info.last_error_message.is_none());
    }
}
