//! Post CRUD with owner-only mutation.

use std::sync::Arc;

use chrono::Utc;
use validator::Validate;

use crate::domain::{Post, PostDetail};
use crate::error::{DomainError, RepoError};
use crate::ports::PostRepository;

use super::input::{NewPost, PostChanges};

#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }

    pub async fn create(&self, author_id: i32, input: NewPost) -> Result<PostDetail, DomainError> {
        input.validate()?;

        let post = self
            .posts
            .create(author_id, &input.title, &input.content)
            .await?;

        tracing::info!(post_id = post.id, user_id = author_id, "Post created");
        self.get(post.id).await
    }

    /// All live posts, newest first.
    pub async fn list(&self) -> Result<Vec<PostDetail>, DomainError> {
        Ok(self.posts.list_details().await?)
    }

    pub async fn get(&self, id: i32) -> Result<PostDetail, DomainError> {
        self.posts
            .find_detail(id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))
    }

    /// Apply a partial update. Only the owner may update.
    pub async fn update(
        &self,
        actor_id: i32,
        id: i32,
        changes: PostChanges,
    ) -> Result<PostDetail, DomainError> {
        changes.validate()?;

        let mut post = self.owned_post(actor_id, id).await?;
        if let Some(title) = changes.title() {
            post.title = title.to_string();
        }
        if let Some(content) = changes.content() {
            post.content = content.to_string();
        }
        post.updated_at = Utc::now();

        self.posts
            .update_owned(&post)
            .await
            .map_err(|e| vanished(e, id))?;

        tracing::info!(post_id = id, user_id = actor_id, "Post updated");
        self.get(id).await
    }

    /// Soft-delete a post. Only the owner may delete.
    pub async fn delete(&self, actor_id: i32, id: i32) -> Result<(), DomainError> {
        self.owned_post(actor_id, id).await?;

        self.posts
            .soft_delete_owned(id, actor_id)
            .await
            .map_err(|e| vanished(e, id))?;

        tracing::info!(post_id = id, user_id = actor_id, "Post deleted");
        Ok(())
    }

    /// Absent posts are `NotFound`; posts owned by someone else are `Forbidden`.
    async fn owned_post(&self, actor_id: i32, id: i32) -> Result<Post, DomainError> {
        let Some(post) = self.posts.find_by_id(id).await? else {
            tracing::warn!(post_id = id, user_id = actor_id, "Post not found");
            return Err(DomainError::post_not_found(id));
        };

        if !post.is_owned_by(actor_id) {
            tracing::warn!(
                post_id = id,
                user_id = actor_id,
                owner_id = post.user_id,
                "Rejected modification by non-owner"
            );
            return Err(DomainError::Forbidden(
                "you are not the owner of this post".to_string(),
            ));
        }

        Ok(post)
    }
}

/// A guarded write that matched no row lost a race with a delete.
fn vanished(err: RepoError, id: i32) -> DomainError {
    match err {
        RepoError::NotFound => DomainError::post_not_found(id),
        other => other.into(),
    }
}
