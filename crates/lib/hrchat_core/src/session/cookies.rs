//! Token storage backed by the `jwt_token` cookie.
//!
//! [`CookieJarStore`] is the page cookie jar; [`FileCookieStore`] keeps the
//! same cookie as a `Set-Cookie` line on disk so a terminal session survives
//! between runs. Both honour the cookie's expiry lazily on read.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use cookie::{Cookie, CookieJar, SameSite};
use time::{Duration, OffsetDateTime};
use tracing::{debug, warn};

use crate::host::Location;

/// Cookie name for the session token.
pub const TOKEN_COOKIE: &str = "jwt_token";

/// Cookie lifetime: 1 day.
pub const TOKEN_TTL_DAYS: i64 = 1;

/// Persistent store for the session token.
///
/// Implementations never fail towards the caller; storage problems are
/// logged and surface as an absent token.
pub trait TokenStore: Send + Sync {
    fn get(&self) -> Option<String>;
    fn set(&self, token: &str);
    fn remove(&self);
}

/// Build the session cookie (1 day, `SameSite=Strict`, `Secure` on https).
pub fn token_cookie(token: &str, secure: bool) -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, token.to_string()))
        .path("/")
        .secure(secure)
        .same_site(SameSite::Strict)
        .max_age(Duration::days(TOKEN_TTL_DAYS))
        .expires(OffsetDateTime::now_utc() + Duration::days(TOKEN_TTL_DAYS))
        .build()
}

fn is_live(cookie: &Cookie<'_>) -> bool {
    cookie
        .expires_datetime()
        .is_none_or(|at| at > OffsetDateTime::now_utc())
}

// =============================================================================
// In-memory cookie jar
// =============================================================================

/// The page's cookie jar.
#[derive(Debug)]
pub struct CookieJarStore {
    jar: Mutex<CookieJar>,
    secure: bool,
}

impl CookieJarStore {
    pub fn new(secure: bool) -> Self {
        Self {
            jar: Mutex::new(CookieJar::new()),
            secure,
        }
    }

    /// Jar for a page: `Secure` cookies when the page is served over https.
    pub fn for_location(location: &Location) -> Self {
        Self::new(location.is_secure())
    }

    /// The current session cookie, with all attributes.
    pub fn cookie(&self) -> Option<Cookie<'static>> {
        self.jar().get(TOKEN_COOKIE).cloned()
    }

    fn jar(&self) -> MutexGuard<'_, CookieJar> {
        self.jar.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TokenStore for CookieJarStore {
    fn get(&self) -> Option<String> {
        self.jar()
            .get(TOKEN_COOKIE)
            .filter(|c| is_live(c))
            .map(|c| c.value().to_string())
    }

    fn set(&self, token: &str) {
        self.jar().add(token_cookie(token, self.secure));
    }

    fn remove(&self) {
        self.jar().remove(Cookie::from(TOKEN_COOKIE));
    }
}

// =============================================================================
// File-backed cookie
// =============================================================================

/// Session cookie persisted to a file.
#[derive(Debug, Clone)]
pub struct FileCookieStore {
    path: PathBuf,
    secure: bool,
}

impl FileCookieStore {
    pub fn new(path: impl Into<PathBuf>, secure: bool) -> Self {
        Self {
            path: path.into(),
            secure,
        }
    }

    /// Default location: `<data dir>/hrchat/session`.
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("hrchat")
            .join("session")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_cookie(&self) -> Option<Cookie<'static>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read session cookie");
                return None;
            }
        };
        match Cookie::parse(raw.trim().to_string()) {
            Ok(cookie) if cookie.name() == TOKEN_COOKIE => Some(cookie),
            Ok(cookie) => {
                warn!(name = cookie.name(), "unexpected cookie in session file");
                None
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "malformed session cookie");
                None
            }
        }
    }

    fn write_cookie(&self, cookie: &Cookie<'_>) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, format!("{cookie}\n"))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))?;
        }
        Ok(())
    }
}

impl TokenStore for FileCookieStore {
    fn get(&self) -> Option<String> {
        self.read_cookie()
            .filter(|c| is_live(c))
            .map(|c| c.value().to_string())
    }

    fn set(&self, token: &str) {
        if let Err(e) = self.write_cookie(&token_cookie(token, self.secure)) {
            warn!(path = %self.path.display(), error = %e, "failed to persist session cookie");
        }
    }

    fn remove(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "removed session cookie"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to remove session cookie")
            }
        }
    }
}
