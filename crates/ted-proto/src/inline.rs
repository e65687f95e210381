//! Inline query results and the message content they send.

use serde::{Serialize, Serializer};

use crate::markup::InlineKeyboardMarkup;
use crate::parse_mode::ParseMode;

/// One result card offered in response to an inline query.
///
/// Serializes as the variant's own fields preceded by the `type` discriminant
/// the API uses to tell the kinds apart. Cached variants share their
/// discriminant with the uploaded kind (`photo`, `sticker`, `document`) and
/// are told apart by their `*_file_id` field.
#[derive(Debug, Clone, PartialEq)]
pub enum InlineQueryResult {
    Article(InlineQueryResultArticle),
    Photo(InlineQueryResultPhoto),
    Location(InlineQueryResultLocation),
    Venue(InlineQueryResultVenue),
    Contact(InlineQueryResultContact),
    CachedPhoto(InlineQueryResultCachedPhoto),
    CachedSticker(InlineQueryResultCachedSticker),
    CachedDocument(InlineQueryResultCachedDocument),
}

impl InlineQueryResult {
    /// The `type` discriminant written for this variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Article(_) => "article",
            Self::Photo(_) | Self::CachedPhoto(_) => "photo",
            Self::Location(_) => "location",
            Self::Venue(_) => "venue",
            Self::Contact(_) => "contact",
            Self::CachedSticker(_) => "sticker",
            Self::CachedDocument(_) => "document",
        }
    }

    /// Unique identifier of the result within its answer.
    pub fn id(&self) -> &str {
        match self {
            Self::Article(r) => &r.id,
            Self::Photo(r) => &r.id,
            Self::Location(r) => &r.id,
            Self::Venue(r) => &r.id,
            Self::Contact(r) => &r.id,
            Self::CachedPhoto(r) => &r.id,
            Self::CachedSticker(r) => &r.id,
            Self::CachedDocument(r) => &r.id,
        }
    }
}

#[derive(Serialize)]
struct Tagged<'a, T> {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(flatten)]
    body: &'a T,
}

fn tagged<T: Serialize, S: Serializer>(
    kind: &'static str,
    body: &T,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    Tagged { kind, body }.serialize(serializer)
}

impl Serialize for InlineQueryResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let kind = self.kind();
        match self {
            Self::Article(r) => tagged(kind, r, serializer),
            Self::Photo(r) => tagged(kind, r, serializer),
            Self::Location(r) => tagged(kind, r, serializer),
            Self::Venue(r) => tagged(kind, r, serializer),
            Self::Contact(r) => tagged(kind, r, serializer),
            Self::CachedPhoto(r) => tagged(kind, r, serializer),
            Self::CachedSticker(r) => tagged(kind, r, serializer),
            Self::CachedDocument(r) => tagged(kind, r, serializer),
        }
    }
}

macro_rules! impl_from_variant {
    ($($ty:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for InlineQueryResult {
                fn from(result: $ty) -> Self {
                    Self::$variant(result)
                }
            }
        )*
    };
}

impl_from_variant! {
    InlineQueryResultArticle => Article,
    InlineQueryResultPhoto => Photo,
    InlineQueryResultLocation => Location,
    InlineQueryResultVenue => Venue,
    InlineQueryResultContact => Contact,
    InlineQueryResultCachedPhoto => CachedPhoto,
    InlineQueryResultCachedSticker => CachedSticker,
    InlineQueryResultCachedDocument => CachedDocument,
}

/// A link to an article or web page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InlineQueryResultArticle {
    /// Unique identifier for this result, 1-64 bytes.
    pub id: String,
    pub title: String,
    pub input_message_content: InputMessageContent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Don't show the URL in the message.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub hide_url: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumb_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumb_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumb_height: Option<u32>,
}

impl InlineQueryResultArticle {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        input_message_content: impl Into<InputMessageContent>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            input_message_content: input_message_content.into(),
            reply_markup: None,
            url: None,
            hide_url: false,
            description: None,
            thumb_url: None,
            thumb_width: None,
            thumb_height: None,
        }
    }
}

/// A link to a photo, sent with an optional caption.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InlineQueryResultPhoto {
    pub id: String,
    /// A valid URL of the photo. JPEG only, at most 5MB.
    pub photo_url: String,
    pub thumb_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_message_content: Option<InputMessageContent>,
}

/// A location on a map.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InlineQueryResultLocation {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub title: String,
    /// Seconds the live location can be updated, 60-86400.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_period: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_message_content: Option<InputMessageContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumb_url: Option<String>,
}

/// A venue.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InlineQueryResultVenue {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub title: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foursquare_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_message_content: Option<InputMessageContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumb_url: Option<String>,
}

/// A contact with a phone number.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InlineQueryResultContact {
    pub id: String,
    pub phone_number: String,
    pub first_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_message_content: Option<InputMessageContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumb_url: Option<String>,
}

/// A photo already stored on the Telegram servers.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InlineQueryResultCachedPhoto {
    pub id: String,
    pub photo_file_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_message_content: Option<InputMessageContent>,
}

/// A sticker already stored on the Telegram servers.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InlineQueryResultCachedSticker {
    pub id: String,
    pub sticker_file_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_message_content: Option<InputMessageContent>,
}

/// A file already stored on the Telegram servers.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InlineQueryResultCachedDocument {
    pub id: String,
    pub title: String,
    pub document_file_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_message_content: Option<InputMessageContent>,
}

/// Content of the message sent when an inline result is chosen.
///
/// Serialized without a discriminant; the API infers the kind from the
/// fields present.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum InputMessageContent {
    Text(InputTextMessageContent),
    Location(InputLocationMessageContent),
    Venue(InputVenueMessageContent),
    Contact(InputContactMessageContent),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InputTextMessageContent {
    /// Text of the message to be sent, 1-4096 characters.
    pub message_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub disable_web_page_preview: bool,
}

impl InputTextMessageContent {
    pub fn new(message_text: impl Into<String>) -> Self {
        Self {
            message_text: message_text.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InputLocationMessageContent {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_period: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InputVenueMessageContent {
    pub latitude: f64,
    pub longitude: f64,
    pub title: String,
    pub address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InputContactMessageContent {
    pub phone_number: String,
    pub first_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl From<InputTextMessageContent> for InputMessageContent {
    fn from(content: InputTextMessageContent) -> Self {
        Self::Text(content)
    }
}

impl From<InputLocationMessageContent> for InputMessageContent {
    fn from(content: InputLocationMessageContent) -> Self {
        Self::Location(content)
    }
}

impl From<InputVenueMessageContent> for InputMessageContent {
    fn from(content: InputVenueMessageContent) -> Self {
        Self::Venue(content)
    }
}

impl From<InputContactMessageContent> for InputMessageContent {
    fn from(content: InputContactMessageContent) -> Self {
        Self::Contact(content)
    }
}
