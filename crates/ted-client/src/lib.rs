//! Typed client for the Telegram Bot API.
//!
//! Every API operation is a value implementing [`Request`]. A [`Bot`] sends it
//! to `https://<host>/bot<token>/<method>`, retries transient transport
//! failures according to its [`RetryPolicy`], and decodes the response
//! envelope. `ok: false` envelopes surface as [`Error::Api`].
//!
//! # Examples
//!
//! ```no_run
//! use ted_client::{Bot, SendMessage, is_message_not_modified};
//! use ted_client::proto::{ForceReply, ParseMode};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads TED_BOT_TOKEN (and friends) from the environment or .env
//!     let bot = Bot::from_env()?;
//!
//!     let me = bot.get_me().await?;
//!     println!("running as @{}", me.username.unwrap_or_default());
//!
//!     let request = SendMessage {
//!         parse_mode: Some(ParseMode::Html),
//!         reply_markup: Some(ForceReply::default().into()),
//!         ..SendMessage::new(123_456_789, "<b>What's your name?</b>")
//!     };
//!     match bot.call(&request).await {
//!         Ok(message) => println!("sent message {}", message.message_id),
//!         Err(err) if is_message_not_modified(&err) => {}
//!         Err(err) => return Err(err.into()),
//!     }
//!
//!     Ok(())
//! }
//! ```

mod bot;
pub mod config;
pub mod error;
pub mod requests;
mod retry;
pub mod transport;

pub use ted_proto as proto;

// Re-export main types
pub use bot::Bot;
pub use config::BotConfig;
pub use error::{ApiError, BatchError, Error, Result, is_message_not_modified};
pub use requests::{
    AnswerCallbackQuery, AnswerInlineQuery, EditMessageReplyMarkup, EditMessageText,
    EditedMessage, GetMe, GetUpdates, GetWebhookInfo, Payload, QueryParams, Request, SendMessage,
    TypedRequest,
};
pub use retry::RetryPolicy;
pub use transport::{
    HttpClient, HttpRequest, HttpResponse, ReqwestClient, TransportError, TransportErrorKind,
};
