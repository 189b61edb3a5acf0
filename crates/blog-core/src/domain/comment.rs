use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Post, UserSummary};

/// Comment entity - attached to one post, written by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i32,
    pub content: String,
    pub user_id: i32,
    pub post_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A comment paired with its author, as loaded by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthoredComment {
    pub comment: Comment,
    pub user: UserSummary,
}

/// A comment with author and parent post embedded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentDetail {
    #[serde(flatten)]
    pub comment: Comment,
    pub user: UserSummary,
    pub post: Post,
}

impl CommentDetail {
    pub fn new(authored: AuthoredComment, post: Post) -> Self {
        Self {
            comment: authored.comment,
            user: authored.user,
            post,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_embeds_author_and_post() {
        let now = Utc::now();
        let post = Post {
            id: 7,
            title: "Hi".to_string(),
            content: "World".to_string(),
            user_id: 1,
            created_at: now,
            updated_at: now,
        };
        let authored = AuthoredComment {
            comment: Comment {
                id: 3,
                content: "nice".to_string(),
                user_id: 2,
                post_id: 7,
                created_at: now,
                updated_at: now,
            },
            user: UserSummary {
                id: 2,
                username: "bob".to_string(),
                email: "b@x.com".to_string(),
                created_at: now,
            },
        };

        let json = serde_json::to_value(CommentDetail::new(authored, post)).unwrap();

        assert_eq!(json["id"], 3);
        assert_eq!(json["content"], "nice");
        assert_eq!(json["user"]["username"], "bob");
        assert_eq!(json["post"]["title"], "Hi");
    }
}
