//! API access layer, the single point of outbound HTTP traffic.
//!
//! Every call goes through [`ApiClient::request`], which
//!
//! 1. joins the endpoint onto the configured base URL,
//! 2. sends JSON content-type plus `Authorization: Bearer <token>` when the
//!    session holds a token (caller headers override both),
//! 3. aborts the attempt after the configured timeout,
//! 4. on 401 clears the session, navigates to login and fails without retry,
//! 5. parses the body as JSON or raw text depending on the content type,
//! 6. maps other non-2xx statuses to [`ApiError::Http`] with the body's
//!    `error`/`message` field as the message,
//! 7. retries transport failures with linear backoff (`n × retry_backoff`)
//!    up to `retry_attempts` times.

pub mod endpoints;
pub mod error;
pub mod guard;
pub mod transport;


use std::sync::Arc;
use std::time::Duration;

use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::time::{sleep, timeout};
use tracing::{debug, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::session::Session;

pub use error::{ApiError, ApiResult, FailureKind, TransportError};
pub use guard::SubmissionGuard;
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};

/// Per-call request envelope; the endpoint is passed alongside.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<Value>,
    /// Overrides [`ClientConfig::timeout`] for this call.
    pub timeout: Option<Duration>,
    /// Retries already spent; the call stops retrying once this reaches
    /// [`ClientConfig::retry_attempts`].
    pub retry_count: u32,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post(body: Option<Value>) -> Self {
        Self {
            method: Method::POST,
            body,
            ..Self::default()
        }
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_retry_count(mut self, retry_count: u32) -> Self {
        self.retry_count = retry_count;
        self
    }
}

/// Successful call result.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: StatusCode,
}

/// HTTP client for the HR assistant backend.
///
/// Construct once at startup and pass by reference; it shares the
/// [`Session`] it was built with.
pub struct ApiClient {
    config: ClientConfig,
    session: Session,
    transport: Arc<dyn Transport>,
    in_flight: SubmissionGuard,
}

impl ApiClient {
    /// Client over a fresh `reqwest` transport.
    pub fn new(config: ClientConfig, session: Session) -> Self {
        Self::with_transport(config, session, Arc::new(ReqwestTransport::new()))
    }

    pub fn with_transport(
        config: ClientConfig,
        session: Session,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            config,
            session,
            transport,
            in_flight: SubmissionGuard::new(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Issue a request and return the parsed body.
    pub async fn request(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> ApiResult<ApiResponse<Value>> {
        let url = self.config.endpoint_url(endpoint)?;
        let mut retry_count = options.retry_count;

        loop {
            match self.attempt(&url, &options).await {
                Err(ApiError::Transport(err))
                    if retry_count < self.config.retry_attempts && err.kind.is_retryable() =>
                {
                    retry_count += 1;
                    let backoff = self.config.retry_backoff * retry_count;
                    warn!(
                        endpoint,
                        retry = retry_count,
                        backoff_ms = backoff.as_millis() as u64,
                        kind = %err.kind,
                        error = %err,
                        "request failed, retrying"
                    );
                    sleep(backoff).await;
                }
                other => return other,
            }
        }
    }

    /// [`ApiClient::request`] with the body deserialized into `T`.
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> ApiResult<ApiResponse<T>> {
        let ApiResponse { data, status } = self.request(endpoint, options).await?;
        let data = serde_json::from_value(data)
            .map_err(|e| ApiError::Decode(format!("{endpoint}: {e}")))?;
        Ok(ApiResponse { data, status })
    }

    /// One attempt: no retry, but full status handling.
    async fn attempt(&self, url: &Url, options: &RequestOptions) -> ApiResult<ApiResponse<Value>> {
        let request = HttpRequest {
            method: options.method.clone(),
            url: url.clone(),
            headers: self.build_headers(&options.headers),
            body: options.body.clone(),
        };
        let response = self.send_with_timeout(request, options.timeout).await?;
        let status = response.status;
        let data = parse_body(&response);

        if status == StatusCode::UNAUTHORIZED {
            warn!(url = %url, "request unauthorized, clearing session");
            self.session.remove_token();
            self.session.redirect_to_login();
            let message = error_message(&data).unwrap_or_else(|| "Unauthorized".to_string());
            return Err(ApiError::Unauthorized(message));
        }

        if !status.is_success() {
            let message =
                error_message(&data).unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
            debug!(url = %url, status = status.as_u16(), error = %message, "request failed");
            return Err(ApiError::Http { status, message });
        }

        debug!(url = %url, status = status.as_u16(), "request succeeded");
        Ok(ApiResponse { data, status })
    }

    /// Dropping the transport future on timeout aborts the exchange.
    async fn send_with_timeout(
        &self,
        request: HttpRequest,
        limit: Option<Duration>,
    ) -> Result<HttpResponse, TransportError> {
        let limit = limit.unwrap_or(self.config.timeout);
        debug!(method = %request.method, url = %request.url, "sending request");
        match timeout(limit, self.transport.send(request)).await {
            Ok(result) => result,
            Err(_) => Err(TransportError::new(
                FailureKind::Timeout,
                format!("Request timed out after {}ms", limit.as_millis()),
            )),
        }
    }

    fn build_headers(&self, overrides: &HeaderMap) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = self.session.get_token() {
            match HeaderValue::from_str(&format!("Bearer {token}")) {
                Ok(value) => {
                    headers.insert(AUTHORIZATION, value);
                }
                Err(_) => warn!("session token is not a valid header value, sending without it"),
            }
        }
        for name in overrides.keys() {
            headers.remove(name);
        }
        for (name, value) in overrides {
            headers.append(name.clone(), value.clone());
        }
        headers
    }
}

/// JSON when the content type says so, otherwise the raw text as a string.
fn parse_body(response: &HttpResponse) -> Value {
    let text = String::from_utf8_lossy(&response.body);
    let is_json = response
        .content_type()
        .is_some_and(|ct| ct.to_ascii_lowercase().contains("json"));
    if is_json {
        match serde_json::from_str(&text) {
            Ok(value) => return value,
            Err(e) => debug!(error = %e, "JSON content type with unparseable body"),
        }
    }
    Value::String(text.into_owned())
}

/// Best-effort message from an error body: `error`, then `message`.
fn error_message(data: &Value) -> Option<String> {
    ["error", "message"]
        .iter()
        .filter_map(|key| data.get(key)?.as_str())
        .find(|msg| !msg.is_empty())
        .map(str::to_string)
}
