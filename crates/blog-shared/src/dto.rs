//! Data Transfer Objects - response payloads of the auth endpoints.

use serde::{Deserialize, Serialize};

/// Public data of a freshly registered user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisteredUser {
    pub user_id: i32,
    pub username: String,
    pub email: String,
}

/// Response containing an identity token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub user_id: i32,
    pub username: String,
}

/// The authenticated identity, as seen by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub user_id: i32,
    pub username: String,
}
