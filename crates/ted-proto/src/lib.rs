//! # ted-proto
//!
//! Wire types for the Telegram Bot API, shared by the `ted` crates.
//!
//! This crate has no I/O. It provides:
//! - The response [`Response`] envelope and its error parameters
//! - [`ChatId`], the numeric-or-handle chat identifier
//! - The [`ReplyMarkup`] family attached to outgoing messages
//! - The [`InlineQueryResult`] and [`InputMessageContent`] families
//! - Incoming update payloads ([`Update`], [`Message`], ...)
//! - [`encoding`], the JSON-within-JSON helper the API requires for markup
//!   and inline results

mod chat;
mod command;
pub mod encoding;
mod envelope;
mod inline;
mod markup;
mod parse_mode;
mod types;

pub use chat::ChatId;
pub use envelope::{Response, ResponseParameters};
pub use inline::{
    InlineQueryResult, InlineQueryResultArticle, InlineQueryResultCachedDocument,
    InlineQueryResultCachedPhoto, InlineQueryResultCachedSticker, InlineQueryResultContact,
    InlineQueryResultLocation, InlineQueryResultPhoto, InlineQueryResultVenue,
    InputContactMessageContent, InputLocationMessageContent, InputMessageContent,
    InputTextMessageContent, InputVenueMessageContent,
};
pub use markup::{
    ForceReply, InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, ReplyKeyboardMarkup,
    ReplyKeyboardRemove, ReplyMarkup,
};
pub use parse_mode::ParseMode;
pub use types::{
    CallbackQuery, Chat, ChosenInlineResult, EntityKind, InlineQuery, Location, Message,
    MessageEntity, Update, UpdateKind, User, WebhookInfo,
};
