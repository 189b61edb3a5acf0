//! Comment handlers.
//!
//! The parent post comes either from `?post_id=` or from the
//! `/api/posts/{id}/comments` path; both forms behave the same.

use actix_web::{HttpResponse, web};
use serde::Deserialize;

use blog_core::services::NewComment;
use blog_shared::ApiResponse;

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Query string of the `/api/comments` endpoints. Kept as text so a
/// malformed id answers with our own message.
#[derive(Debug, Deserialize)]
pub struct CommentQuery {
    pub post_id: Option<String>,
}

impl CommentQuery {
    fn post_id(&self) -> Result<i32, AppError> {
        let raw = self
            .post_id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::BadRequest("post_id query parameter is required".into()))?;

        raw.parse()
            .map_err(|_| AppError::BadRequest(format!("invalid post_id: {raw}")))
    }
}

/// GET /api/comments?post_id={id}
pub async fn list_comments(
    state: web::Data<AppState>,
    query: web::Query<CommentQuery>,
) -> AppResult<HttpResponse> {
    list(&state, query.post_id()?).await
}

/// POST /api/comments?post_id={id}
pub async fn create_comment(
    state: web::Data<AppState>,
    identity: Identity,
    query: web::Query<CommentQuery>,
    body: web::Json<NewComment>,
) -> AppResult<HttpResponse> {
    create(&state, &identity, query.post_id()?, body.into_inner()).await
}

/// GET /api/posts/{id}/comments
pub async fn list_post_comments(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    list(&state, path.into_inner()).await
}

/// POST /api/posts/{id}/comments
pub async fn create_post_comment(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i32>,
    body: web::Json<NewComment>,
) -> AppResult<HttpResponse> {
    create(&state, &identity, path.into_inner(), body.into_inner()).await
}

async fn list(state: &AppState, post_id: i32) -> AppResult<HttpResponse> {
    let comments = state.comments.list_for_post(post_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(comments)))
}

async fn create(
    state: &AppState,
    identity: &Identity,
    post_id: i32,
    input: NewComment,
) -> AppResult<HttpResponse> {
    let comment = state.comments.create(identity.user_id, post_id, input).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(comment, "comment created")))
}
