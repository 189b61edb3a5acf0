//! Post handlers. Reads are public; writes go through the auth gate.

use actix_web::{HttpResponse, web};

use blog_core::services::{NewPost, PostChanges};
use blog_shared::ApiResponse;

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/posts
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.list().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(posts)))
}

/// GET /api/posts/{id}
pub async fn get_post(state: web::Data<AppState>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let post = state.posts.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(post)))
}

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<NewPost>,
) -> AppResult<HttpResponse> {
    let post = state.posts.create(identity.user_id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(post, "post created")))
}

/// PUT /api/posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i32>,
    body: web::Json<PostChanges>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .update(identity.user_id, path.into_inner(), body.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(post, "post updated")))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    state.posts.delete(identity.user_id, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::message("post deleted")))
}
