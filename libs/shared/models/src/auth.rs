use serde::{Deserialize, Serialize};

/// Storage key holding the bearer token, written by the login flow.
pub const AUTH_TOKEN_KEY: &str = "authToken";
/// Storage key holding the token type (usually `Bearer`).
pub const TOKEN_TYPE_KEY: &str = "tokenType";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthCredentials {
    pub token: String,
    pub token_type: String,
}

impl AuthCredentials {
    pub fn new(token: impl Into<String>, token_type: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            token_type: token_type.into(),
        }
    }

    /// Value of the `Authorization` header: `<tokenType> <token>`.
    pub fn authorization_header(&self) -> String {
        format!("{} {}", self.token_type, self.token)
    }
}
