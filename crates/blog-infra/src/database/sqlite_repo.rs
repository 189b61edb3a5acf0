//! SQLite repository implementations.
//!
//! Every query filters out soft-deleted rows. Posts and comments are read
//! together with their owner in a single joined query.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use blog_core::domain::{AuthoredComment, Comment, NewUser, Post, PostDetail, User};
use blog_core::error::RepoError;
use blog_core::ports::{CommentRepository, PostRepository, UserRepository};

use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::sqlite_base::{SqliteRepository, repo_err};

/// SQLite user repository.
pub type SqliteUserRepository = SqliteRepository<UserEntity>;

/// SQLite post repository.
pub type SqlitePostRepository = SqliteRepository<PostEntity>;

/// SQLite comment repository.
pub type SqliteCommentRepository = SqliteRepository<CommentEntity>;

fn timestamp(at: DateTime<Utc>) -> DateTimeWithTimeZone {
    at.into()
}

/// Mask an email for logging to avoid PII in logs.
fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => match local.chars().next() {
            Some(first) if local.chars().count() > 1 => format!("{first}***@{domain}"),
            _ => format!("***@{domain}"),
        },
        None => "***".to_string(),
    }
}

fn post_detail(post: post::Model, owner: Option<user::Model>) -> Result<PostDetail, RepoError> {
    let owner = owner.ok_or_else(|| RepoError::Query(format!("post {} has no owner", post.id)))?;
    Ok(PostDetail {
        post: post.into(),
        user: owner.into(),
    })
}

fn authored_comment(
    comment: comment::Model,
    author: Option<user::Model>,
) -> Result<AuthoredComment, RepoError> {
    let author =
        author.ok_or_else(|| RepoError::Query(format!("comment {} has no author", comment.id)))?;
    Ok(AuthoredComment {
        comment: comment.into(),
        user: author.into(),
    })
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepoError> {
        let result = UserEntity::find_by_id(id)
            .filter(user::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(repo_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(username, "Finding user by username");

        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .filter(user::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(repo_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .filter(user::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(repo_err)?;

        Ok(result.map(Into::into))
    }

    async fn create(&self, new_user: NewUser) -> Result<User, RepoError> {
        let now = timestamp(Utc::now());

        let model = user::ActiveModel {
            username: Set(new_user.username),
            email: Set(new_user.email),
            password_hash: Set(new_user.password_hash),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(repo_err)?;

        Ok(model.into())
    }
}

#[async_trait]
impl PostRepository for SqlitePostRepository {
    async fn create(&self, user_id: i32, title: &str, content: &str) -> Result<Post, RepoError> {
        let now = timestamp(Utc::now());

        let model = post::ActiveModel {
            title: Set(title.to_string()),
            content: Set(content.to_string()),
            user_id: Set(user_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(repo_err)?;

        Ok(model.into())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find_by_id(id)
            .filter(post::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(repo_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_detail(&self, id: i32) -> Result<Option<PostDetail>, RepoError> {
        let result = PostEntity::find_by_id(id)
            .filter(post::Column::DeletedAt.is_null())
            .find_also_related(UserEntity)
            .one(&self.db)
            .await
            .map_err(repo_err)?;

        result
            .map(|(post, owner)| post_detail(post, owner))
            .transpose()
    }

    async fn list_details(&self) -> Result<Vec<PostDetail>, RepoError> {
        let rows = PostEntity::find()
            .filter(post::Column::DeletedAt.is_null())
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id)
            .find_also_related(UserEntity)
            .all(&self.db)
            .await
            .map_err(repo_err)?;

        rows.into_iter()
            .map(|(post, owner)| post_detail(post, owner))
            .collect()
    }

    async fn update_owned(&self, post: &Post) -> Result<Post, RepoError> {
        let result = PostEntity::update_many()
            .col_expr(post::Column::Title, Expr::value(post.title.clone()))
            .col_expr(post::Column::Content, Expr::value(post.content.clone()))
            .col_expr(post::Column::UpdatedAt, Expr::value(timestamp(post.updated_at)))
            .filter(post::Column::Id.eq(post.id))
            .filter(post::Column::UserId.eq(post.user_id))
            .filter(post::Column::DeletedAt.is_null())
            .exec(&self.db)
            .await
            .map_err(repo_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(post.clone())
    }

    async fn soft_delete_owned(&self, id: i32, owner_id: i32) -> Result<(), RepoError> {
        let now = timestamp(Utc::now());

        let result = PostEntity::update_many()
            .col_expr(post::Column::DeletedAt, Expr::value(now))
            .col_expr(post::Column::UpdatedAt, Expr::value(now))
            .filter(post::Column::Id.eq(id))
            .filter(post::Column::UserId.eq(owner_id))
            .filter(post::Column::DeletedAt.is_null())
            .exec(&self.db)
            .await
            .map_err(repo_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}

#[async_trait]
impl CommentRepository for SqliteCommentRepository {
    async fn create(
        &self,
        post_id: i32,
        user_id: i32,
        content: &str,
    ) -> Result<Comment, RepoError> {
        let now = timestamp(Utc::now());

        let model = comment::ActiveModel {
            content: Set(content.to_string()),
            user_id: Set(user_id),
            post_id: Set(post_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(repo_err)?;

        Ok(model.into())
    }

    async fn find_authored(&self, id: i32) -> Result<Option<AuthoredComment>, RepoError> {
        let result = CommentEntity::find_by_id(id)
            .filter(comment::Column::DeletedAt.is_null())
            .find_also_related(UserEntity)
            .one(&self.db)
            .await
            .map_err(repo_err)?;

        result
            .map(|(comment, author)| authored_comment(comment, author))
            .transpose()
    }

    async fn list_by_post(&self, post_id: i32) -> Result<Vec<AuthoredComment>, RepoError> {
        let rows = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .filter(comment::Column::DeletedAt.is_null())
            .order_by_desc(comment::Column::CreatedAt)
            .order_by_desc(comment::Column::Id)
            .find_also_related(UserEntity)
            .all(&self.db)
            .await
            .map_err(repo_err)?;

        rows.into_iter()
            .map(|(comment, author)| authored_comment(comment, author))
            .collect()
    }
}
