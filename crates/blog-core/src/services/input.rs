//! Validated inputs accepted by the entity services.
//!
//! Missing fields deserialize to empty values so that they are reported by
//! validation rather than by the JSON decoder.

use serde::Deserialize;
use validator::Validate;

/// Registration payload.
#[derive(Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct RegisterUser {
    #[validate(length(min = 3, max = 50, message = "must be between 3 and 50 characters"))]
    pub username: String,
    #[validate(length(min = 6, message = "must be at least 6 characters"))]
    pub password: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
}

/// Login payload.
#[derive(Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct Credentials {
    #[validate(length(min = 1, message = "is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct NewPost {
    #[validate(length(min = 1, max = 200, message = "must be between 1 and 200 characters"))]
    pub title: String,
    #[validate(length(min = 1, message = "is required"))]
    pub content: String,
}

/// Partial post update. Omitted or empty fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct PostChanges {
    #[validate(length(max = 200, message = "must be at most 200 characters"))]
    pub title: Option<String>,
    pub content: Option<String>,
}

impl PostChanges {
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.is_empty())
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref().filter(|c| !c.is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct NewComment {
    #[validate(length(min = 1, message = "is required"))]
    pub content: String,
}
