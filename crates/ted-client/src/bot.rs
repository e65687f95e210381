use std::fmt;
use std::sync::Arc;

use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, warn};

use ted_proto::{Response, Update, User, WebhookInfo};

use crate::config::BotConfig;
use crate::error::{ApiError, BatchError, Error, Result};
use crate::requests::{
    GetMe, GetUpdates, GetWebhookInfo, Payload, QueryParams, Request, TypedRequest,
};
use crate::retry::execute_with_retry;
use crate::transport::{HttpClient, HttpRequest, HttpResponse, ReqwestClient};

/// A Bot API client bound to one token.
///
/// Cheap to clone; clones share the HTTP client.
#[derive(Clone)]
pub struct Bot {
    config: Arc<BotConfig>,
    client: Arc<dyn HttpClient>,
}

impl Bot {
    /// Create a bot with default configuration and HTTP client.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        Self::from_config(BotConfig::new(token))
    }

    /// Create a bot from environment variables (see [`BotConfig::from_env`]).
    pub fn from_env() -> Result<Self> {
        Self::from_config(BotConfig::from_env()?)
    }

    /// Create a bot backed by a [`ReqwestClient`].
    pub fn from_config(config: BotConfig) -> Result<Self> {
        let client = ReqwestClient::new(config.request_timeout())
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self::with_client(config, Arc::new(client)))
    }

    /// Create a bot using a caller-supplied HTTP client.
    pub fn with_client(config: BotConfig, client: Arc<dyn HttpClient>) -> Self {
        Self {
            config: Arc::new(config),
            client,
        }
    }

    pub fn config(&self) -> &BotConfig {
        &self.config
    }

    /// Send a request and return the raw envelope.
    pub async fn send(&self, request: &dyn Request) -> Result<Response> {
        let method = request.method();
        match request.payload().map_err(Error::Encode)? {
            Payload::Json(body) => {
                self.dispatch(method, HttpRequest::json(self.config.endpoint(method), body))
                    .await
            }
            Payload::Query(params) => {
                self.dispatch(method, HttpRequest::query(self.config.endpoint(method), params))
                    .await
            }
        }
    }

    /// Send a request and decode its typed result.
    pub async fn call<R: TypedRequest>(&self, request: &R) -> Result<R::Output> {
        let response = self.send(request).await?;
        response.result_as().map_err(Error::Result)
    }

    /// Send an arbitrary method with a JSON body.
    pub async fn send_json<T>(&self, method: &str, body: &T) -> Result<Response>
    where
        T: Serialize + ?Sized,
    {
        let body = serde_json::to_vec(body).map_err(Error::Encode)?;
        self.dispatch(method, HttpRequest::json(self.config.endpoint(method), body))
            .await
    }

    /// Send an arbitrary method with scalar query parameters and no body.
    pub async fn send_query(&self, method: &str, params: QueryParams) -> Result<Response> {
        self.dispatch(
            method,
            HttpRequest::query(self.config.endpoint(method), params.into_pairs()),
        )
        .await
    }

    /// Send all requests concurrently.
    ///
    /// Responses are returned in input order. If any request fails the whole
    /// call fails with [`Error::Batch`], and the successful responses are
    /// discarded. Every request runs to completion either way.
    pub async fn send_all(&self, requests: &[&dyn Request]) -> Result<Vec<Response>> {
        let outcomes = join_all(requests.iter().map(|request| self.send(*request))).await;

        if outcomes.iter().all(std::result::Result::is_ok) {
            return Ok(outcomes.into_iter().flatten().collect());
        }

        let errors: Vec<Option<Error>> = outcomes.into_iter().map(|o| o.err()).collect();
        let batch = BatchError::new(errors);
        warn!(
            failed = batch.failed(),
            total = batch.total(),
            "batch completed with failures"
        );
        Err(batch.into())
    }

    /// `getMe`
    pub async fn get_me(&self) -> Result<User> {
        self.call(&GetMe).await
    }

    /// `getWebhookInfo`
    pub async fn get_webhook_info(&self) -> Result<WebhookInfo> {
        self.call(&GetWebhookInfo).await
    }

    /// `getUpdates`
    pub async fn get_updates(&self, request: &GetUpdates) -> Result<Vec<Update>> {
        self.call(request).await
    }

    async fn dispatch(&self, method: &str, request: HttpRequest) -> Result<Response> {
        debug!(method, "sending request");
        let response =
            execute_with_retry(self.client.as_ref(), &request, self.config.retry, method).await?;
        decode_envelope(method, &response)
    }
}

/// Decode the envelope, turning `ok: false` into [`Error::Api`].
///
/// The HTTP status is not consulted; the API reports failures in the body.
fn decode_envelope(method: &str, response: &HttpResponse) -> Result<Response> {
    let envelope: Response =
        serde_json::from_slice(&response.body).map_err(|source| Error::Decode {
            status: response.status,
            source,
        })?;

    if !envelope.ok {
        debug!(
            method,
            error_code = envelope.error_code,
            description = %envelope.description,
            "api returned an error"
        );
        return Err(ApiError::from(envelope).into());
    }

    Ok(envelope)
}

impl fmt::Debug for Bot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bot")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
