//! Comments on posts.

use std::sync::Arc;

use validator::Validate;

use crate::domain::{CommentDetail, Post};
use crate::error::{DomainError, RepoError};
use crate::ports::{CommentRepository, PostRepository};

use super::input::NewComment;

#[derive(Clone)]
pub struct CommentService {
    comments: Arc<dyn CommentRepository>,
    posts: Arc<dyn PostRepository>,
}

impl CommentService {
    pub fn new(comments: Arc<dyn CommentRepository>, posts: Arc<dyn PostRepository>) -> Self {
        Self { comments, posts }
    }

    /// Comment on an existing post as `actor_id`.
    pub async fn create(
        &self,
        actor_id: i32,
        post_id: i32,
        input: NewComment,
    ) -> Result<CommentDetail, DomainError> {
        input.validate()?;
        let post = self.live_post(post_id).await?;

        let comment = self
            .comments
            .create(post_id, actor_id, &input.content)
            .await
            .map_err(|e| match e {
                RepoError::Reference(_) => DomainError::post_not_found(post_id),
                other => other.into(),
            })?;

        let authored = self
            .comments
            .find_authored(comment.id)
            .await?
            .ok_or_else(|| DomainError::Internal(format!("comment {} not readable", comment.id)))?;

        tracing::info!(
            comment_id = comment.id,
            post_id,
            user_id = actor_id,
            "Comment created"
        );
        Ok(CommentDetail::new(authored, post))
    }

    /// Comments of a post, newest first.
    pub async fn list_for_post(&self, post_id: i32) -> Result<Vec<CommentDetail>, DomainError> {
        let post = self.live_post(post_id).await?;

        let comments = self.comments.list_by_post(post_id).await?;
        Ok(comments
            .into_iter()
            .map(|authored| CommentDetail::new(authored, post.clone()))
            .collect())
    }

    async fn live_post(&self, post_id: i32) -> Result<Post, DomainError> {
        self.posts.find_by_id(post_id).await?.ok_or_else(|| {
            tracing::warn!(post_id, "Comment target post not found");
            DomainError::post_not_found(post_id)
        })
    }
}
