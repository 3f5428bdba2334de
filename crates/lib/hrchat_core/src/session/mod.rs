//! Session and identity.
//!
//! [`Session`] is the single owner of the session token. Everything else
//! (identity, authorization level, expiry) is derived from the token on
//! demand and never cached. None of the operations here return errors: a
//! malformed token, a missing store or a storage failure all degrade to
//! "not authenticated".

pub mod cookies;
pub mod identity;
pub mod jwt;

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::host::{LOGIN_PATH, Location, Navigator};
use crate::models::auth::TokenClaims;

pub use cookies::{CookieJarStore, FileCookieStore, TOKEN_COOKIE, TokenStore};
pub use identity::{AuthLevel, FormattedName, UserIdentity, format_user_name};
pub use jwt::decode_token;

/// Handle to the session token and the host's navigation.
///
/// Cheap to clone; clones share the same store.
#[derive(Clone, Default)]
pub struct Session {
    store: Option<Arc<dyn TokenStore>>,
    navigator: Option<Arc<dyn Navigator>>,
}

impl Session {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self {
            store: Some(store),
            navigator: None,
        }
    }

    /// A session with no persistent store and no navigation context.
    pub fn detached() -> Self {
        Self::default()
    }

    /// Session for a page: in-memory cookie jar, `Secure` cookies on https.
    pub fn for_location(location: &Location, navigator: Arc<dyn Navigator>) -> Self {
        Self::new(Arc::new(CookieJarStore::for_location(location))).with_navigator(navigator)
    }

    pub fn with_navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    pub fn has_navigator(&self) -> bool {
        self.navigator.is_some()
    }

    pub fn get_token(&self) -> Option<String> {
        self.store.as_ref()?.get()
    }

    /// Store `token` with the fixed 1-day cookie lifetime.
    pub fn set_token(&self, token: &str) {
        match &self.store {
            Some(store) => store.set(token),
            None => debug!("no token store, dropping token"),
        }
    }

    /// Delete the token. Idempotent.
    pub fn remove_token(&self) {
        if let Some(store) = &self.store {
            store.remove();
        }
    }

    /// True iff a token is present. Expiry is **not** checked; use
    /// [`Session::is_token_expired`] or [`Session::require_auth`] for that.
    pub fn is_authenticated(&self) -> bool {
        self.get_token().is_some()
    }

    pub fn claims(&self) -> Option<TokenClaims> {
        decode_token(&self.get_token()?)
    }

    pub fn get_user_info(&self) -> Option<UserIdentity> {
        self.claims().map(|claims| UserIdentity::from_claims(&claims))
    }

    /// Absent or undecodable token counts as expired.
    pub fn is_token_expired(&self) -> bool {
        self.claims()
            .is_none_or(|claims| claims.is_expired_at(Utc::now().timestamp_millis()))
    }

    pub fn token_expires_at(&self) -> Option<DateTime<Utc>> {
        self.claims()?.expires_at()
    }

    /// Gate for protected views.
    ///
    /// Without a navigation context this returns `false` and leaves the token
    /// alone. Otherwise a missing or expired token is cleared and the host is
    /// sent to the login screen.
    pub fn require_auth(&self) -> bool {
        if self.navigator.is_none() {
            return false;
        }
        if !self.is_authenticated() || self.is_token_expired() {
            info!("session missing or expired, redirecting to login");
            self.remove_token();
            self.redirect_to_login();
            return false;
        }
        true
    }

    pub fn get_auth_level(&self) -> AuthLevel {
        AuthLevel::for_identity(self.get_user_info().as_ref())
    }

    pub fn has_permission(&self, required: AuthLevel) -> bool {
        self.get_auth_level() >= required
    }

    /// Full navigation to the login screen, when a navigator is attached.
    pub fn redirect_to_login(&self) {
        if let Some(navigator) = &self.navigator {
            navigator.navigate(LOGIN_PATH);
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("has_store", &self.store.is_some())
            .field("has_navigator", &self.navigator.is_some())
            .finish()
    }
}
