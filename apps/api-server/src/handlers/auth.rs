//! Registration, login and profile handlers.

use actix_web::{HttpResponse, web};

use blog_core::services::{Credentials, RegisterUser};
use blog_shared::ApiResponse;
use blog_shared::dto::{LoginResponse, ProfileResponse, RegisteredUser};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/register
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterUser>,
) -> AppResult<HttpResponse> {
    let user = state.users.register(body.into_inner()).await?;

    let data = RegisteredUser {
        user_id: user.id,
        username: user.username,
        email: user.email,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(data, "registration successful")))
}

/// POST /api/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<Credentials>,
) -> AppResult<HttpResponse> {
    let session = state.users.login(body.into_inner()).await?;

    let data = LoginResponse {
        token: session.token,
        token_type: "Bearer".to_string(),
        expires_in: session.expires_in.max(0) as u64,
        user_id: session.user_id,
        username: session.username,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(data, "login successful")))
}

/// GET /api/profile - Protected route
pub async fn profile(identity: Identity) -> AppResult<HttpResponse> {
    let data = ProfileResponse {
        user_id: identity.user_id,
        username: identity.username,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(data, "authenticated")))
}
