//! Shared fixtures for unit tests.

use jsonwebtoken::{EncodingKey, Header, encode};

use crate::models::auth::TokenClaims;

const TEST_SECRET: &[u8] = b"test-secret";

/// Claims for a user whose token expires `ttl_secs` from now (negative = past).
pub fn claims_for(sub: &str, role: &str, name: &str, ttl_secs: i64) -> TokenClaims {
    let department = if role == "HR" {
        "Human Resources"
    } else {
        "Engineering"
    };
    TokenClaims {
        sub: Some(sub.to_string()),
        role: Some(role.to_string()),
        name: Some(name.to_string()),
        department: Some(department.to_string()),
        exp: Some((chrono::Utc::now().timestamp() + ttl_secs) as f64),
    }
}

/// Sign `claims` into a compact HS256 token.
pub fn mint_token(claims: &TokenClaims) -> String {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(TEST_SECRET),
    )
    .expect("jwt encode")
}
