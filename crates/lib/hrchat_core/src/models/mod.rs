//! Wire and domain models shared by the session and API layers.

pub mod auth;
pub mod chat;
pub mod system;
