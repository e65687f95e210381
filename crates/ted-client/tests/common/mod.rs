//! Scripted HTTP client shared by the integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use ted_client::{
    Bot, BotConfig, HttpClient, HttpRequest, HttpResponse, RetryPolicy, TransportError,
};

pub type Outcome = Result<HttpResponse, TransportError>;

/// Replays canned outcomes and records every request it sees.
///
/// A client is either a sequence, where each call pops the next outcome, or a
/// set of routes keyed by API method, where every call to a method returns
/// the same outcome after an optional delay.
#[derive(Default)]
pub struct ScriptedClient {
    sequence: Mutex<VecDeque<Outcome>>,
    routes: HashMap<String, (Duration, Outcome)>,
    calls: AtomicUsize,
    seen: Mutex<Vec<HttpRequest>>,
}

impl ScriptedClient {
    pub fn sequence(outcomes: Vec<Outcome>) -> Arc<Self> {
        Arc::new(Self {
            sequence: Mutex::new(outcomes.into()),
            ..Self::default()
        })
    }

    pub fn routes(routes: Vec<(&str, Duration, Outcome)>) -> Arc<Self> {
        Arc::new(Self {
            routes: routes
                .into_iter()
                .map(|(method, delay, outcome)| (method.to_string(), (delay, outcome)))
                .collect(),
            ..Self::default()
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpClient for ScriptedClient {
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(request.clone());

        let method = request.url.rsplit('/').next().unwrap_or_default();
        if let Some((delay, outcome)) = self.routes.get(method) {
            tokio::time::sleep(*delay).await;
            return outcome.clone();
        }

        self.sequence
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted outcome left for {method}"))
    }
}

pub fn ok(result: &str) -> Outcome {
    Ok(HttpResponse::new(
        200,
        format!(r#"{{"ok":true,"result":{result}}}"#),
    ))
}

pub fn api_error(code: i64, description: &str) -> Outcome {
    Ok(HttpResponse::new(
        200,
        format!(r#"{{"ok":false,"error_code":{code},"description":"{description}"}}"#),
    ))
}

pub fn bot_with(client: Arc<ScriptedClient>) -> Bot {
    bot_with_policy(client, RetryPolicy::default())
}

pub fn bot_with_policy(client: Arc<ScriptedClient>, retry: RetryPolicy) -> Bot {
    let config = BotConfig {
        retry,
        ..BotConfig::new("123456:TEST-TOKEN")
    };
    Bot::with_client(config, client)
}

pub const ME: &str = r#"{"id":42,"is_bot":true,"first_name":"Ted","username":"ted_bot"}"#;
