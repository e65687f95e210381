//! API operations.
//!
//! Each operation is a value implementing [`Request`]: it names its method and
//! builds its own wire payload. [`TypedRequest`] adds the type its `result`
//! decodes into, which is what [`crate::Bot::call`] returns.

use std::collections::BTreeMap;
use std::fmt::Display;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use ted_proto::encoding::{json_string, json_string_opt};
use ted_proto::{
    ChatId, InlineKeyboardMarkup, InlineQueryResult, Message, ParseMode, ReplyMarkup, Update,
    User, WebhookInfo,
};

/// Wire form of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// JSON body.
    Json(Vec<u8>),
    /// Form-encoded scalar query parameters with an empty body.
    Query(Vec<(String, String)>),
}

impl Payload {
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, serde_json::Error> {
        serde_json::to_vec(value).map(Self::Json)
    }
}

/// One API operation.
pub trait Request: Send + Sync {
    /// Bot API method name, e.g. `sendMessage`.
    fn method(&self) -> &'static str;

    fn payload(&self) -> Result<Payload, serde_json::Error>;
}

/// A [`Request`] whose successful `result` has a known shape.
pub trait TypedRequest: Request {
    type Output: DeserializeOwned;
}

/// Scalar query parameters. Setting a key twice keeps the last value; keys are
/// emitted in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(BTreeMap<String, String>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: &str, value: impl Display) -> Self {
        self.0.insert(key.to_string(), value.to_string());
        self
    }

    pub fn set_opt(self, key: &str, value: Option<impl Display>) -> Self {
        match value {
            Some(value) => self.set(key, value),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.0.into_iter().collect()
    }
}

macro_rules! json_request {
    ($ty:ty, $method:literal, $output:ty) => {
        impl Request for $ty {
            fn method(&self) -> &'static str {
                $method
            }

            fn payload(&self) -> Result<Payload, serde_json::Error> {
                Payload::json(self)
            }
        }

        impl TypedRequest for $ty {
            type Output = $output;
        }
    };
}

/// `getMe`: basic information about the bot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GetMe;

impl Request for GetMe {
    fn method(&self) -> &'static str {
        "getMe"
    }

    fn payload(&self) -> Result<Payload, serde_json::Error> {
        Ok(Payload::Query(Vec::new()))
    }
}

impl TypedRequest for GetMe {
    type Output = User;
}

/// `getWebhookInfo`: current webhook status. The URL is empty when the bot
/// uses long polling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GetWebhookInfo;

impl Request for GetWebhookInfo {
    fn method(&self) -> &'static str {
        "getWebhookInfo"
    }

    fn payload(&self) -> Result<Payload, serde_json::Error> {
        Ok(Payload::Query(Vec::new()))
    }
}

impl TypedRequest for GetWebhookInfo {
    type Output = WebhookInfo;
}

/// `getUpdates`: long-poll for incoming updates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GetUpdates {
    /// First update to return; confirms all updates before it.
    pub offset: Option<i64>,
    /// 1-100, defaults to 100.
    pub limit: Option<u32>,
    /// Long polling timeout in seconds.
    pub timeout: Option<u32>,
}

impl Request for GetUpdates {
    fn method(&self) -> &'static str {
        "getUpdates"
    }

    fn payload(&self) -> Result<Payload, serde_json::Error> {
        let params = QueryParams::new()
            .set_opt("offset", self.offset)
            .set_opt("limit", self.limit)
            .set_opt("timeout", self.timeout);
        Ok(Payload::Query(params.into_pairs()))
    }
}

impl TypedRequest for GetUpdates {
    type Output = Vec<Update>;
}

/// `sendMessage`: send a text message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SendMessage {
    pub chat_id: ChatId,

    /// 1-4096 characters after entities parsing.
    pub text: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub disable_web_page_preview: bool,

    /// Deliver silently; users get a notification with no sound.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub disable_notification: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to_message_id: Option<i64>,

    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "json_string_opt"
    )]
    pub reply_markup: Option<ReplyMarkup>,
}

impl SendMessage {
    pub fn new(chat_id: impl Into<ChatId>, text: impl Into<String>) -> Self {
        Self {
            chat_id: chat_id.into(),
            text: text.into(),
            parse_mode: None,
            disable_web_page_preview: false,
            disable_notification: false,
            reply_to_message_id: None,
            reply_markup: None,
        }
    }
}

json_request!(SendMessage, "sendMessage", Message);

/// Result of an edit: the edited message, or `true` for inline messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EditedMessage {
    Message(Box<Message>),
    Inline(bool),
}

/// `editMessageText`: replace the text of a message.
///
/// Address the message either by `chat_id` + `message_id` or by
/// `inline_message_id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EditMessageText {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<ChatId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_message_id: Option<String>,

    pub text: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub disable_web_page_preview: bool,

    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "json_string_opt"
    )]
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

impl EditMessageText {
    pub fn new(chat_id: impl Into<ChatId>, message_id: i64, text: impl Into<String>) -> Self {
        Self {
            chat_id: Some(chat_id.into()),
            message_id: Some(message_id),
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn inline(inline_message_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            inline_message_id: Some(inline_message_id.into()),
            text: text.into(),
            ..Self::default()
        }
    }
}

json_request!(EditMessageText, "editMessageText", EditedMessage);

/// `editMessageReplyMarkup`: replace only the inline keyboard of a message.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EditMessageReplyMarkup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<ChatId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_message_id: Option<String>,

    /// `None` removes the keyboard.
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "json_string_opt"
    )]
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

json_request!(
    EditMessageReplyMarkup,
    "editMessageReplyMarkup",
    EditedMessage
);

/// `answerCallbackQuery`: acknowledge an inline keyboard press, optionally
/// showing a notification or alert.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnswerCallbackQuery {
    pub callback_query_id: String,

    /// Notification text, 0-200 characters. Nothing is shown when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Show an alert instead of a notification.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub show_alert: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Seconds the answer may be cached client-side.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_time: Option<u32>,
}

impl AnswerCallbackQuery {
    pub fn new(callback_query_id: impl Into<String>) -> Self {
        Self {
            callback_query_id: callback_query_id.into(),
            ..Self::default()
        }
    }
}

json_request!(AnswerCallbackQuery, "answerCallbackQuery", bool);

/// `answerInlineQuery`: send results for an inline query. At most 50
/// results per query.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnswerInlineQuery {
    pub inline_query_id: String,

    #[serde(serialize_with = "json_string")]
    pub results: Vec<InlineQueryResult>,

    /// Seconds the results may be cached server-side. Defaults to 300.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_time: Option<u32>,

    /// Cache results only for the user who sent the query.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_personal: bool,

    /// Offset the client sends with the next query to get more results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_offset: Option<String>,

    /// Text of a button that switches the user to a private chat with the bot.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub switch_pm_text: Option<String>,

    /// Deep-linking parameter for the `/start` sent by that button.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub switch_pm_parameter: Option<String>,
}

impl AnswerInlineQuery {
    pub fn new(inline_query_id: impl Into<String>, results: Vec<InlineQueryResult>) -> Self {
        Self {
            inline_query_id: inline_query_id.into(),
            results,
            ..Self::default()
        }
    }
}

json_request!(AnswerInlineQuery, "answerInlineQuery", bool);
