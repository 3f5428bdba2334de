//! Typed wrappers for each backend endpoint.

use http::{HeaderMap, Method};
use serde_json::Value;
use tokio::time::timeout;
use tracing::{debug, info};
use url::form_urlencoded;

use super::transport::HttpRequest;
use super::{ApiClient, ApiError, ApiResponse, ApiResult, RequestOptions};
use crate::models::auth::{Credentials, LoginResponse};
use crate::models::chat::{ChatRequest, ChatResponse};
use crate::models::system::HealthResponse;

pub const HEALTH: &str = "/api/health";
pub const LOGIN: &str = "/login";
pub const CHAT: &str = "/api/chat";
pub const CHAT_HISTORY: &str = "/api/chat/history";
pub const TOOLS_BALANCE: &str = "/api/tools/balance";
pub const TOOLS_HISTORY: &str = "/api/tools/history";
pub const SYSTEM_STATUS: &str = "/api/system/status";
pub const SWARM_STATUS: &str = "/api/swarm/status";
pub const SWARM_RESET: &str = "/api/swarm/reset";
pub const USER_SESSION_RESET: &str = "/api/user/session/reset";

/// Operations guarded against duplicate submission.
const LOGIN_OP: &str = "login";
const SEND_MESSAGE_OP: &str = "send_message";

/// `<prefix>/<segment>` with the segment percent-encoded.
fn with_segment(prefix: &str, segment: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(segment.as_bytes()).collect();
    format!("{prefix}/{}", encoded.replace('+', "%20"))
}

impl ApiClient {
    /// `POST /login`. Stores the returned access token in the session.
    pub async fn login(&self, credentials: &Credentials) -> ApiResult<ApiResponse<LoginResponse>> {
        let _slot = self
            .in_flight
            .try_acquire(LOGIN_OP)
            .ok_or(ApiError::DuplicateSubmission(LOGIN_OP))?;

        let body = serde_json::to_value(credentials).map_err(|e| ApiError::Decode(e.to_string()))?;
        let response = self
            .request_json::<LoginResponse>(LOGIN, RequestOptions::post(Some(body)))
            .await?;

        match response.data.access_token.as_deref() {
            Some(token) if !token.is_empty() => {
                self.session.set_token(token);
                info!(employee_id = %credentials.employee_id, "logged in");
            }
            _ => debug!("login response carried no access token"),
        }
        Ok(response)
    }

    /// Clear the session and go to the login screen. No network call.
    pub fn logout(&self) {
        self.session.remove_token();
        self.session.redirect_to_login();
        info!("logged out");
    }

    /// `GET /api/health`.
    pub async fn health_check(&self) -> ApiResult<ApiResponse<HealthResponse>> {
        self.request_json(HEALTH, RequestOptions::get()).await
    }

    /// `POST /api/chat`.
    pub async fn send_message(&self, message: &str) -> ApiResult<ApiResponse<ChatResponse>> {
        let _slot = self
            .in_flight
            .try_acquire(SEND_MESSAGE_OP)
            .ok_or(ApiError::DuplicateSubmission(SEND_MESSAGE_OP))?;

        let body = serde_json::to_value(ChatRequest {
            message: message.to_string(),
        })
        .map_err(|e| ApiError::Decode(e.to_string()))?;
        self.request_json(CHAT, RequestOptions::post(Some(body)))
            .await
    }

    /// `GET /api/tools/balance/{employee_id}`.
    pub async fn get_balance(&self, employee_id: &str) -> ApiResult<ApiResponse<Value>> {
        self.request(&with_segment(TOOLS_BALANCE, employee_id), RequestOptions::get())
            .await
    }

    /// `GET /api/tools/history/{employee_id}`.
    pub async fn get_history(&self, employee_id: &str) -> ApiResult<ApiResponse<Value>> {
        self.request(&with_segment(TOOLS_HISTORY, employee_id), RequestOptions::get())
            .await
    }

    /// `GET /api/system/status`.
    pub async fn get_system_status(&self) -> ApiResult<ApiResponse<Value>> {
        self.request(SYSTEM_STATUS, RequestOptions::get()).await
    }

    /// `GET /api/swarm/status`.
    pub async fn get_swarm_status(&self) -> ApiResult<ApiResponse<Value>> {
        self.request(SWARM_STATUS, RequestOptions::get()).await
    }

    /// `POST /api/swarm/reset/{thread_id}`.
    pub async fn reset_swarm_conversation(&self, thread_id: &str) -> ApiResult<ApiResponse<Value>> {
        self.request(&with_segment(SWARM_RESET, thread_id), RequestOptions::post(None))
            .await
    }

    /// `GET /api/chat/history`: the signed-in user's conversation log.
    pub async fn get_chat_history(&self) -> ApiResult<ApiResponse<Value>> {
        self.request(CHAT_HISTORY, RequestOptions::get()).await
    }

    /// `POST /api/user/session/reset`: restart the server-side conversation.
    pub async fn reset_user_session(&self) -> ApiResult<ApiResponse<Value>> {
        self.request(USER_SESSION_RESET, RequestOptions::post(None))
            .await
    }

    /// Single unauthenticated probe of the health endpoint.
    ///
    /// No retry and no session side effects; every failure reads as `false`.
    pub async fn test_connection(&self) -> bool {
        let url = match self.config.endpoint_url(HEALTH) {
            Ok(url) => url,
            Err(e) => {
                debug!(error = %e, "connection test skipped");
                return false;
            }
        };
        let request = HttpRequest {
            method: Method::GET,
            url,
            headers: HeaderMap::new(),
            body: None,
        };
        match timeout(self.config.timeout, self.transport.send(request)).await {
            Ok(Ok(resp)) => resp.status.is_success(),
            Ok(Err(e)) => {
                debug!(error = %e, "connection test failed");
                false
            }
            Err(_) => {
                debug!("connection test timed out");
                false
            }
        }
    }
}
