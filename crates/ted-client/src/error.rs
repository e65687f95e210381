use std::fmt;

use thiserror::Error;

use ted_proto::{Response, ResponseParameters};

use crate::transport::TransportError;

/// Substring the API uses when an edit would not change the message.
const MESSAGE_NOT_MODIFIED: &str = "message is not modified";

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by [`crate::Bot`].
#[derive(Debug, Error)]
pub enum Error {
    /// The HTTP call itself failed. Transient failures are only reported once
    /// the retry budget is spent.
    #[error("transport error after {attempts} attempt(s): {source}")]
    Transport {
        attempts: u32,
        #[source]
        source: TransportError,
    },

    /// The request payload could not be encoded.
    #[error("failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),

    /// The response body was not a valid envelope.
    #[error("failed to decode response envelope (HTTP {status}): {source}")]
    Decode {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    /// The API answered with `ok: false`.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The envelope was fine but its `result` did not match the operation.
    #[error("unexpected result payload: {0}")]
    Result(#[source] serde_json::Error),

    /// At least one request of a batch failed.
    #[error(transparent)]
    Batch(#[from] BatchError),

    /// Bot token is missing from config and environment.
    #[error("bot token not found: set TED_BOT_TOKEN or configure `token`")]
    MissingToken,

    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// The API error behind this failure, if there is one.
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) => Some(err),
            _ => None,
        }
    }
}

/// A failure reported by the API in the response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub error_code: i64,
    pub description: String,
    pub parameters: Option<ResponseParameters>,
}

impl ApiError {
    /// Seconds to wait before repeating a rate-limited request.
    pub fn retry_after(&self) -> Option<u64> {
        self.parameters.as_ref().and_then(|p| p.retry_after)
    }

    /// New identifier of a group that was migrated to a supergroup.
    pub fn migrate_to_chat_id(&self) -> Option<i64> {
        self.parameters.as_ref().and_then(|p| p.migrate_to_chat_id)
    }
}

impl From<Response> for ApiError {
    fn from(response: Response) -> Self {
        Self {
            error_code: response.error_code,
            description: response.description,
            parameters: response.parameters,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

impl std::error::Error for ApiError {}

/// Aggregate failure of [`crate::Bot::send_all`].
///
/// Holds one slot per request of the batch; `None` marks a request that
/// succeeded. The successful responses themselves are not kept.
#[derive(Debug)]
pub struct BatchError {
    errors: Vec<Option<Error>>,
}

impl BatchError {
    pub(crate) fn new(errors: Vec<Option<Error>>) -> Self {
        Self { errors }
    }

    /// Number of requests in the batch.
    pub fn total(&self) -> usize {
        self.errors.len()
    }

    /// Number of requests that failed.
    pub fn failed(&self) -> usize {
        self.errors.iter().filter(|e| e.is_some()).count()
    }

    /// Failed requests as `(index in batch, error)`.
    pub fn failures(&self) -> impl Iterator<Item = (usize, &Error)> {
        self.errors
            .iter()
            .enumerate()
            .filter_map(|(i, e)| e.as_ref().map(|e| (i, e)))
    }

    pub fn into_errors(self) -> Vec<Option<Error>> {
        self.errors
    }
}

impl fmt::Display for BatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} out of {} requests were unsuccessful",
            self.failed(),
            self.total()
        )
    }
}

impl std::error::Error for BatchError {}

/// Whether `err` is the API refusing an edit that would change nothing.
///
/// Lets callers treat re-sending identical message content as a no-op.
pub fn is_message_not_modified(err: &Error) -> bool {
    err.as_api()
        .is_some_and(|api| api.description.contains(MESSAGE_NOT_MODIFIED))
}
