//! Helpers shared by the integration tests.

use std::sync::Arc;
use std::time::Duration;

use hrchat_core::host::RecordingNavigator;
use hrchat_core::models::auth::TokenClaims;
use hrchat_core::session::CookieJarStore;
use hrchat_core::{ApiClient, ClientConfig, Session};
use jsonwebtoken::{EncodingKey, Header, encode};

/// Token the mock backend hands out, signed the way the real backend signs.
pub fn issue_token(employee_id: &str, role: &str, name: &str, department: &str) -> String {
    let claims = TokenClaims {
        sub: Some(employee_id.into()),
        role: Some(role.into()),
        name: Some(name.into()),
        department: Some(department.into()),
        exp: Some((chrono::Utc::now().timestamp() + 3600) as f64),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"integration-secret"),
    )
    .expect("jwt encode")
}

/// Client pointed at `base_url` with fast retries and a recording navigator.
pub fn client_for(base_url: &str) -> (ApiClient, Arc<RecordingNavigator>) {
    let navigator = Arc::new(RecordingNavigator::new());
    let session =
        Session::new(Arc::new(CookieJarStore::new(false))).with_navigator(navigator.clone());
    let config = ClientConfig {
        timeout: Duration::from_secs(5),
        retry_backoff: Duration::from_millis(10),
        ..ClientConfig::new(base_url)
    };
    (ApiClient::new(config, session), navigator)
}
