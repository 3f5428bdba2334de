//! Authentication models.
//!
//! Claims and login payloads as produced by the backend. Every field the
//! backend may omit is optional so that a partial payload still decodes.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

/// Claims carried in the session token payload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: employee ID (standard JWT `sub` claim). Numeric IDs are
    /// kept in their decimal form.
    #[serde(default, deserialize_with = "string_or_number")]
    pub sub: Option<String>,
    /// Role name, e.g. `"HR"` or `"Employee"`.
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    /// Expiry (NumericDate: unix seconds, fractions allowed).
    #[serde(default)]
    pub exp: Option<f64>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(Number),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    }))
}

impl TokenClaims {
    /// Whether the token has expired at `now_millis` (unix milliseconds).
    ///
    /// A payload without `exp` counts as expired.
    pub fn is_expired_at(&self, now_millis: i64) -> bool {
        match self.exp {
            Some(exp) => exp * 1000.0 < now_millis as f64,
            None => true,
        }
    }

    pub fn expires_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        chrono::DateTime::from_timestamp_millis((self.exp? * 1000.0) as i64)
    }
}

/// Login form body for `POST /login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub employee_id: String,
    pub password: String,
}

impl Credentials {
    pub fn new(employee_id: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            employee_id: employee_id.into(),
            password: password.into(),
        }
    }
}

/// Response body of `POST /login`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub access_token: Option<String>,
    /// Server-side user context; shape is owned by the backend.
    #[serde(default)]
    pub user: Option<serde_json::Value>,
    #[serde(default)]
    pub session_id: Option<String>,
    /// Any other keys the backend sent.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
