//! Account models.

use serde::{Deserialize, Serialize};

/// Username and password pair.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Plain `{"message": ...}` reply.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageReply {
    #[serde(default)]
    pub message: String,
}

/// Reply to a successful login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginReply {
    #[serde(default)]
    pub message: String,
    pub token: String,
}

/// Result of checking the stored token with the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenStatus {
    pub valid: bool,
    pub username: String,
}
