//! Request form payloads.

use serde::Deserialize;
use validator::Validate;

/// POST /login form body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginForm {
    /// Requested username.
    #[validate(length(min = 1, max = 32, message = "username must be 1-32 characters"))]
    pub user: String,
}

/// POST /send form body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SendForm {
    /// Raw message text.
    #[validate(length(min = 1, max = 2000, message = "message must be 1-2000 characters"))]
    pub message: String,
}
