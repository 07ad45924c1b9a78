use serde::{Deserialize, Serialize};

/// OAuth2-style password login form.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

impl TokenResponse {
    #[must_use]
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer",
        }
    }
}

/// Mutation result: which slug the operation resolved to.
#[derive(Debug, Serialize)]
pub struct PostSlug {
    pub slug: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub message: &'static str,
    pub project: &'static str,
    pub version: &'static str,
}
