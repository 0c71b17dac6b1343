//! Remote memory service abstraction and the Zep Cloud HTTP client
//!
//! [`MemoryService`] is the seam between the façade and the hosted service. It carries
//! exactly the four remote operations the façade needs. [`ZepClient`] implements it
//! over HTTP/JSON; tests substitute fakes.

use crate::types::{AppError, ContextMode, MemoryMessage, Result};
use crate::utils::config::MemoryConfig;
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{RequestBuilder, Response, Url};
use serde::{Deserialize, Serialize};

/// The remote conversational-memory capability.
///
/// Implementations make one remote request per call. Batching limits, idempotency
/// and rate limiting are owned by the remote service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MemoryService: Send + Sync {
    /// Register a user.
    async fn register_user(&self, user_id: &str, email: &str) -> Result<()>;

    /// Create a thread owned by `user_id`.
    async fn create_thread(&self, thread_id: &str, user_id: &str) -> Result<()>;

    /// Append an ordered batch of messages to a thread.
    async fn append_messages(&self, thread_id: &str, messages: &[MemoryMessage]) -> Result<()>;

    /// Fetch the context string for a thread, if the service has one.
    async fn thread_context(&self, thread_id: &str, mode: ContextMode) -> Result<Option<String>>;
}

#[derive(Serialize)]
struct AddUserRequest<'a> {
    user_id: &'a str,
    email: &'a str,
}

#[derive(Serialize)]
struct CreateThreadRequest<'a> {
    thread_id: &'a str,
    user_id: &'a str,
}

#[derive(Serialize)]
struct AddMessagesRequest<'a> {
    messages: &'a [MemoryMessage],
}

#[derive(Deserialize)]
struct ThreadContextResponse {
    #[serde(default)]
    context: Option<String>,
}

/// Shared handle to the Zep Cloud API.
///
/// Cloning is cheap and all clones share one connection pool. The handle is never
/// mutated after construction.
#[derive(Debug, Clone)]
pub struct ZepClient {
    http_client: reqwest::Client,
    base_url: Url,
}

impl ZepClient {
    /// Builds the client from validated configuration.
    pub fn new(config: MemoryConfig) -> Result<Self> {
        let base_url = Url::parse(&config.api_url).map_err(|e| {
            AppError::Config(format!("invalid memory service URL '{}': {}", config.api_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::Config(format!(
                "invalid memory service URL '{}'",
                config.api_url
            )));
        }

        let mut auth = HeaderValue::from_str(&format!("Api-Key {}", config.api_key.expose()))
            .map_err(|_| AppError::Config("ZEP_API_KEY contains invalid characters".to_string()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(concat!("zep-memory/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let http_client = builder
            .build()
            .map_err(|e| AppError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    /// Base URL every endpoint is resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Joins path segments onto the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // cannot_be_a_base URLs are rejected in `new`
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Endpoint under `/api/v2/threads/{thread_id}/`.
    ///
    /// URL parsing collapses empty, `.` and `..` segments (including their `%2E`
    /// spellings), which would address a different resource, so those ids are rejected.
    fn thread_endpoint(&self, thread_id: &str, action: &str) -> Result<Url> {
        if matches!(thread_id, "" | "." | "..") {
            return Err(AppError::InvalidInput(format!(
                "thread id '{}' cannot be used as a URL path segment",
                thread_id
            )));
        }
        Ok(self.endpoint(&["api", "v2", "threads", thread_id, action]))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| AppError::Http(format!("request to memory service failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Remote {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl MemoryService for ZepClient {
    async fn register_user(&self, user_id: &str, email: &str) -> Result<()> {
        let url = self.endpoint(&["api", "v2", "users"]);
        let request = self
            .http_client
            .post(url)
            .json(&AddUserRequest { user_id, email });

        self.send(request).await?;
        Ok(())
    }

    async fn create_thread(&self, thread_id: &str, user_id: &str) -> Result<()> {
        let url = self.endpoint(&["api", "v2", "threads"]);
        let request = self
            .http_client
            .post(url)
            .json(&CreateThreadRequest { thread_id, user_id });

        self.send(request).await?;
        Ok(())
    }

    async fn append_messages(&self, thread_id: &str, messages: &[MemoryMessage]) -> Result<()> {
        let url = self.thread_endpoint(thread_id, "messages")?;
        let request = self
            .http_client
            .post(url)
            .json(&AddMessagesRequest { messages });

        self.send(request).await?;
        Ok(())
    }

    async fn thread_context(&self, thread_id: &str, mode: ContextMode) -> Result<Option<String>> {
        let url = self.thread_endpoint(thread_id, "context")?;
        let request = self
            .http_client
            .get(url)
            .query(&[("mode", mode.as_str())]);

        let response = self.send(request).await?;
        let body: ThreadContextResponse = response
            .json()
            .await
            .map_err(|e| AppError::Parse(format!("failed to parse context response: {}", e)))?;

        Ok(body.context)
    }
}

/// Builds the process-wide memory client from the environment.
///
/// Call once at startup and hand the returned client to each operation. Fails with
/// [`AppError::Config`] when `ZEP_API_KEY` is missing or empty, so no operation can
/// run without a credential.
pub fn init() -> Result<ZepClient> {
    let config = MemoryConfig::from_env()?;
    let client = ZepClient::new(config)?;
    tracing::debug!(base_url = %client.base_url(), "Memory client initialized");
    Ok(client)
}
