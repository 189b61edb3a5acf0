use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserSummary;

/// Post entity - a blog post owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn is_owned_by(&self, user_id: i32) -> bool {
        self.user_id == user_id
    }
}

/// A post with its owner resolved and embedded under `user`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDetail {
    #[serde(flatten)]
    pub post: Post,
    pub user: UserSummary,
}
