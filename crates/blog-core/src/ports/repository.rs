use async_trait::async_trait;

use crate::domain::{AuthoredComment, Comment, NewUser, Post, PostDetail, User};
use crate::error::RepoError;

/// User repository.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepoError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Insert a user. A duplicate username or email yields `RepoError::Constraint`.
    async fn create(&self, user: NewUser) -> Result<User, RepoError>;
}

/// Post repository. Soft-deleted posts are invisible to every method.
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn create(&self, user_id: i32, title: &str, content: &str) -> Result<Post, RepoError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError>;

    /// Find a post with its owner eagerly loaded.
    async fn find_detail(&self, id: i32) -> Result<Option<PostDetail>, RepoError>;

    /// All posts with owners, newest first.
    async fn list_details(&self) -> Result<Vec<PostDetail>, RepoError>;

    /// Write title/content of a post, guarded by its owner.
    /// Returns `RepoError::NotFound` when no live row matches id and owner.
    async fn update_owned(&self, post: &Post) -> Result<Post, RepoError>;

    /// Soft-delete a post, guarded by its owner.
    /// Returns `RepoError::NotFound` when no live row matches id and owner.
    async fn soft_delete_owned(&self, id: i32, owner_id: i32) -> Result<(), RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn create(&self, post_id: i32, user_id: i32, content: &str)
    -> Result<Comment, RepoError>;

    /// Find a comment with its author eagerly loaded.
    async fn find_authored(&self, id: i32) -> Result<Option<AuthoredComment>, RepoError>;

    /// Comments of a post with authors, newest first.
    async fn list_by_post(&self, post_id: i32) -> Result<Vec<AuthoredComment>, RepoError>;
}
