//! Host environment: page location and navigation.
//!
//! A client embedded in a page has a [`Location`] and a [`Navigator`]; a
//! client running outside a page (tests, the CLI talking to a remote backend)
//! has neither, or supplies its own navigator.

use std::sync::{Mutex, PoisonError};

use tracing::debug;
use url::Url;

/// Path of the login screen.
pub const LOGIN_PATH: &str = "/login";

/// Hostnames treated as the local development host.
const LOCAL_DEV_HOSTS: &[&str] = &["localhost", "127.0.0.1"];

/// Parsed URL of the page hosting the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    url: Url,
}

impl Location {
    /// Parse a page URL such as `https://hr.example.com/chat`.
    pub fn parse(href: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            url: Url::parse(href)?,
        })
    }

    /// Scheme followed by a colon, e.g. `"https:"`.
    pub fn protocol(&self) -> String {
        format!("{}:", self.url.scheme())
    }

    pub fn hostname(&self) -> &str {
        self.url.host_str().unwrap_or_default()
    }

    /// Serialized origin, e.g. `"https://hr.example.com"`.
    pub fn origin(&self) -> String {
        self.url.origin().ascii_serialization()
    }

    /// Whether the page is served over an encrypted transport.
    pub fn is_secure(&self) -> bool {
        self.url.scheme() == "https"
    }

    pub fn is_local_dev_host(&self) -> bool {
        LOCAL_DEV_HOSTS.contains(&self.hostname())
    }
}

/// Performs full navigations (the equivalent of assigning `location.href`).
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

/// Navigator that records every visit instead of leaving the page.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visits: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// All navigations so far, oldest first.
    pub fn visits(&self) -> Vec<String> {
        self.visits
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn last(&self) -> Option<String> {
        self.visits
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        debug!(path, "navigate");
        self.visits
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(path.to_string());
    }
}
